//! Merchant dashboard: headline metrics, 30-day returns chart, reason
//! distribution and the latest returns table.

use leptos::prelude::*;
use leptos::task::spawn_local;

use backo_shared::{ChartPoint, DashboardData, DistributionSlice};

use crate::api::use_api;
use crate::components::layout::{status_badge_class, ErrorBanner, LoadingState, Shell, surface_fetch_error};
use crate::web::route::AppRoute;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 200.0;
/// Axis never drops below this so a quiet month still reads as quiet.
const CHART_MIN_SCALE: f64 = 28.0;

/// Polyline points for the returns line chart.
fn chart_points(data: &[ChartPoint]) -> String {
    if data.is_empty() {
        return String::new();
    }
    let max = data
        .iter()
        .map(|p| p.value)
        .fold(CHART_MIN_SCALE, f64::max);
    let step = if data.len() > 1 {
        CHART_WIDTH / (data.len() - 1) as f64
    } else {
        CHART_WIDTH
    };
    data.iter()
        .enumerate()
        .map(|(i, p)| {
            let x = i as f64 * step;
            let y = CHART_HEIGHT - (p.value / max) * CHART_HEIGHT;
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Per-slice stroke-dasharray segments for the reasons donut. Values are
/// percentages; each entry is (color, dash length, dash offset).
fn donut_segments(slices: &[DistributionSlice]) -> Vec<(String, f64, f64)> {
    const CIRCUMFERENCE: f64 = 2.0 * std::f64::consts::PI * 40.0;
    const PALETTE: [&str; 6] = [
        "#FF7F14", "#3B82F6", "#10B981", "#F59E0B", "#8B5CF6", "#EF4444",
    ];
    let mut offset = 0.0;
    slices
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            let color = slice
                .color
                .clone()
                .unwrap_or_else(|| PALETTE[i % PALETTE.len()].to_string());
            let length = (slice.value / 100.0) * CIRCUMFERENCE;
            let segment = (color, length, offset);
            offset += length;
            segment
        })
        .collect()
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let session = crate::session::use_session();
    let router = crate::web::router::use_router();

    let (data, set_data) = signal(Option::<DashboardData>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let api = api.clone();
        spawn_local(async move {
            match api.dashboard().await {
                Ok(dashboard) => set_data.set(Some(dashboard)),
                Err(err) => surface_fetch_error(err, set_error_msg, &session, &router),
            }
        });
    }

    view! {
        <Shell active=AppRoute::Dashboard>
            <h1 class="text-2xl font-bold mb-6">"Dashboard"</h1>
            <ErrorBanner message=error_msg />

            <Show
                when=move || data.get().is_some()
                fallback=move || view! {
                    <Show when=move || error_msg.get().is_none()>
                        <LoadingState />
                    </Show>
                }
            >
                {move || {
                    let dashboard = data.get().unwrap_or_default();
                    let metrics = dashboard.metrics.clone();
                    let points = chart_points(&dashboard.returns_chart);
                    let segments = donut_segments(&dashboard.return_reasons);
                    let reasons = dashboard.return_reasons.clone();
                    let latest = dashboard.latest_returns.clone();

                    view! {
                        <div class="space-y-6">
                            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                                <div class="stat">
                                    <div class="stat-title">"Open returns"</div>
                                    <div class="stat-value text-primary">{metrics.open_returns}</div>
                                </div>
                                <div class="stat">
                                    <div class="stat-title">"Avg refund time"</div>
                                    <div class="stat-value text-2xl">{metrics.avg_refund_time.clone()}</div>
                                </div>
                                <div class="stat">
                                    <div class="stat-title">"Return rate"</div>
                                    <div class="stat-value text-2xl">{metrics.return_rate.clone()}</div>
                                </div>
                                <div class="stat">
                                    <div class="stat-title">"Urgent actions"</div>
                                    <div class="stat-value text-error">{metrics.urgent_actions}</div>
                                </div>
                            </div>

                            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                                <div class="card bg-base-100 shadow-xl lg:col-span-2">
                                    <div class="card-body">
                                        <h3 class="card-title text-base">"Returns, last 30 days"</h3>
                                        <svg viewBox="0 0 600 200" class="w-full h-48" preserveAspectRatio="none">
                                            <polyline
                                                points=points
                                                fill="none"
                                                stroke="#FF7F14"
                                                stroke-width="3"
                                                stroke-linecap="round"
                                                stroke-linejoin="round"
                                            />
                                        </svg>
                                    </div>
                                </div>

                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body">
                                        <h3 class="card-title text-base">"Return reasons"</h3>
                                        <div class="flex items-center gap-6">
                                            <svg viewBox="0 0 100 100" class="w-28 h-28 -rotate-90">
                                                {segments
                                                    .into_iter()
                                                    .map(|(color, length, offset)| view! {
                                                        <circle
                                                            cx="50"
                                                            cy="50"
                                                            r="40"
                                                            fill="none"
                                                            stroke=color
                                                            stroke-width="16"
                                                            stroke-dasharray=format!("{length:.2} 251.33")
                                                            stroke-dashoffset=format!("{:.2}", -offset)
                                                        />
                                                    })
                                                    .collect_view()}
                                            </svg>
                                            <ul class="text-sm space-y-1">
                                                {reasons
                                                    .into_iter()
                                                    .map(|slice| view! {
                                                        <li class="flex justify-between gap-4">
                                                            <span>{slice.label}</span>
                                                            <span class="opacity-60">{format!("{:.0}%", slice.value)}</span>
                                                        </li>
                                                    })
                                                    .collect_view()}
                                            </ul>
                                        </div>
                                    </div>
                                </div>
                            </div>

                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body p-0">
                                    <h3 class="card-title p-6 pb-2">"Latest returns"</h3>
                                    <div class="overflow-x-auto w-full">
                                        <table class="table table-zebra w-full">
                                            <thead>
                                                <tr>
                                                    <th>"Return"</th>
                                                    <th>"Customer"</th>
                                                    <th>"Product"</th>
                                                    <th>"Status"</th>
                                                    <th>"Date"</th>
                                                    <th class="text-right">"Amount"</th>
                                                </tr>
                                            </thead>
                                            <tbody>
                                                <Show when={
                                                    let empty = latest.is_empty();
                                                    move || empty
                                                }>
                                                    <tr>
                                                        <td colspan="6" class="text-center py-8 text-base-content/50">
                                                            "No returns yet."
                                                        </td>
                                                    </tr>
                                                </Show>
                                                {latest
                                                    .into_iter()
                                                    .map(|entry| view! {
                                                        <tr>
                                                            <td class="font-mono text-sm">{entry.id}</td>
                                                            <td>{entry.customer}</td>
                                                            <td>{entry.product}</td>
                                                            <td>
                                                                <span class=status_badge_class(&entry.status)>
                                                                    {entry.status.clone()}
                                                                </span>
                                                            </td>
                                                            <td>{entry.date}</td>
                                                            <td class="text-right">{entry.amount}</td>
                                                        </tr>
                                                    })
                                                    .collect_view()}
                                            </tbody>
                                        </table>
                                    </div>
                                </div>
                            </div>
                        </div>
                    }
                }}
            </Show>
        </Shell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_scale_never_drops_below_minimum() {
        let data = vec![
            ChartPoint { date: "d1".into(), value: 2.0 },
            ChartPoint { date: "d2".into(), value: 7.0 },
        ];
        // With max clamped to 28, 7 returns maps to three quarters up.
        let points = chart_points(&data);
        assert_eq!(points, "0.0,185.7 600.0,150.0");
    }

    #[test]
    fn chart_spikes_expand_the_scale() {
        let data = vec![
            ChartPoint { date: "d1".into(), value: 0.0 },
            ChartPoint { date: "d2".into(), value: 56.0 },
        ];
        let points = chart_points(&data);
        assert_eq!(points, "0.0,200.0 600.0,0.0");
    }

    #[test]
    fn empty_chart_renders_no_points() {
        assert_eq!(chart_points(&[]), "");
    }

    #[test]
    fn donut_segments_accumulate_offsets() {
        let slices = vec![
            DistributionSlice { label: "Wrong size".into(), value: 50.0, color: None },
            DistributionSlice { label: "Damaged".into(), value: 25.0, color: Some("#000000".into()) },
        ];
        let segments = donut_segments(&slices);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].2, 0.0);
        assert!((segments[0].1 - 125.66).abs() < 0.01);
        assert!((segments[1].2 - 125.66).abs() < 0.01);
        assert_eq!(segments[1].0, "#000000");
    }
}
