//! Analytics: metric cards with period-over-period deltas, return rate
//! trend, reason counts and approval/rejection breakdowns.

use leptos::prelude::*;
use leptos::task::spawn_local;

use backo_shared::{AnalyticsData, ApprovalPoint, ReasonCount, TrendPoint};

use crate::api::use_api;
use crate::components::layout::{ErrorBanner, LoadingState, Shell, surface_fetch_error};
use crate::web::route::AppRoute;

const TREND_WIDTH: f64 = 500.0;
const TREND_HEIGHT: f64 = 160.0;

/// A brand-new store has no return history; the charts render these
/// placeholder series instead of an empty frame.
fn fallback_trend() -> Vec<TrendPoint> {
    [
        ("Jul", 6.5),
        ("Aug", 7.2),
        ("Sep", 8.1),
        ("Oct", 9.5),
        ("Nov", 9.8),
        ("Dec", 8.9),
        ("Jan", 8.5),
        ("Feb", 8.5),
    ]
    .into_iter()
    .map(|(month, value)| TrendPoint {
        month: month.to_string(),
        value,
    })
    .collect()
}

fn fallback_reasons() -> Vec<ReasonCount> {
    [
        ("Wrong Size", 12),
        ("Not as Described", 8),
        ("Item Damaged", 5),
        ("Refund Item", 2),
        ("Other", 1),
    ]
    .into_iter()
    .map(|(reason, count)| ReasonCount {
        reason: reason.to_string(),
        count,
    })
    .collect()
}

fn fallback_approvals() -> Vec<ApprovalPoint> {
    [
        ("Aug", 18, 3),
        ("Sep", 22, 4),
        ("Oct", 25, 5),
        ("Nov", 28, 6),
        ("Dec", 24, 4),
        ("Jan", 26, 3),
        ("Feb", 24, 4),
    ]
    .into_iter()
    .map(|(month, approved, rejected)| ApprovalPoint {
        month: month.to_string(),
        approved,
        rejected,
    })
    .collect()
}

fn or_fallback<T>(series: Vec<T>, fallback: fn() -> Vec<T>) -> Vec<T> {
    if series.is_empty() {
        fallback()
    } else {
        series
    }
}

fn trend_points(data: &[TrendPoint]) -> String {
    if data.is_empty() {
        return String::new();
    }
    let max = data.iter().map(|p| p.value).fold(1.0_f64, f64::max);
    let step = if data.len() > 1 {
        TREND_WIDTH / (data.len() - 1) as f64
    } else {
        TREND_WIDTH
    };
    data.iter()
        .enumerate()
        .map(|(i, p)| {
            let x = i as f64 * step;
            let y = TREND_HEIGHT - (p.value / max) * TREND_HEIGHT;
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a signed percentage delta, e.g. `+12.5%` / `-3.0%`.
fn delta_label(change: f64) -> String {
    if change >= 0.0 {
        format!("+{change:.1}%")
    } else {
        format!("{change:.1}%")
    }
}

fn delta_class(change: f64) -> &'static str {
    if change >= 0.0 {
        "stat-desc text-success"
    } else {
        "stat-desc text-error"
    }
}

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    let api = use_api();
    let session = crate::session::use_session();
    let router = crate::web::router::use_router();

    let (data, set_data) = signal(Option::<AnalyticsData>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let api = api.clone();
        spawn_local(async move {
            match api.analytics().await {
                Ok(analytics) => set_data.set(Some(analytics)),
                Err(err) => surface_fetch_error(err, set_error_msg, &session, &router),
            }
        });
    }

    view! {
        <Shell active=AppRoute::Analytics>
            <h1 class="text-2xl font-bold mb-6">"Analytics"</h1>
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
                    let analytics = data.get().unwrap_or_default();
                    let metrics = analytics.metrics.clone();
                    let changes = metrics.changes.clone();
                    let trend_series = or_fallback(analytics.return_rate_trend.clone(), fallback_trend);
                    let trend = trend_points(&trend_series);
                    let reasons = or_fallback(analytics.return_reasons_count.clone(), fallback_reasons);
                    let max_reason = reasons.iter().map(|r| r.count).max().unwrap_or(1).max(1);
                    let approval = or_fallback(analytics.approval_vs_rejection.clone(), fallback_approvals);
                    let max_month = approval
                        .iter()
                        .map(|p| p.approved + p.rejected)
                        .max()
                        .unwrap_or(1)
                        .max(1);

                    view! {
                        <div class="space-y-6">
                            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                                <div class="stat">
                                    <div class="stat-title">"Total returns"</div>
                                    <div class="stat-value text-primary">{metrics.total_returns}</div>
                                    <div class=delta_class(changes.total_returns)>{delta_label(changes.total_returns)}</div>
                                </div>
                                <div class="stat">
                                    <div class="stat-title">"Approval rate"</div>
                                    <div class="stat-value text-2xl">{format!("{:.1}%", metrics.approval_rate)}</div>
                                    <div class=delta_class(changes.approval_rate)>{delta_label(changes.approval_rate)}</div>
                                </div>
                                <div class="stat">
                                    <div class="stat-title">"Avg processing time"</div>
                                    <div class="stat-value text-2xl">{format!("{:.1} days", metrics.avg_processing_time)}</div>
                                    <div class=delta_class(-changes.avg_processing_time)>{delta_label(changes.avg_processing_time)}</div>
                                </div>
                                <div class="stat">
                                    <div class="stat-title">"Refund amount"</div>
                                    <div class="stat-value text-2xl">{format!("${:.2}", metrics.refund_amount)}</div>
                                    <div class=delta_class(changes.refund_amount)>{delta_label(changes.refund_amount)}</div>
                                </div>
                            </div>

                            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body">
                                        <h3 class="card-title text-base">"Return rate trend"</h3>
                                        <svg viewBox="0 0 500 160" class="w-full h-40" preserveAspectRatio="none">
                                            <polyline
                                                points=trend
                                                fill="none"
                                                stroke="#FF7F14"
                                                stroke-width="3"
                                                stroke-linecap="round"
                                                stroke-linejoin="round"
                                            />
                                        </svg>
                                        <div class="flex justify-between text-xs opacity-60">
                                            {trend_series
                                                .iter()
                                                .map(|p| view! { <span>{p.month.clone()}</span> })
                                                .collect_view()}
                                        </div>
                                    </div>
                                </div>

                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body">
                                        <h3 class="card-title text-base">"Return reasons"</h3>
                                        <div class="space-y-2">
                                            {reasons
                                                .into_iter()
                                                .map(|entry| {
                                                    let width = (entry.count as f64 / max_reason as f64) * 100.0;
                                                    view! {
                                                        <div>
                                                            <div class="flex justify-between text-sm mb-1">
                                                                <span>{entry.reason}</span>
                                                                <span class="opacity-60">{entry.count}</span>
                                                            </div>
                                                            <div class="h-2 bg-base-200 rounded-full">
                                                                <div
                                                                    class="h-2 bg-primary rounded-full"
                                                                    style=format!("width: {width:.0}%")
                                                                ></div>
                                                            </div>
                                                        </div>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    </div>
                                </div>
                            </div>

                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <h3 class="card-title text-base">"Approved vs rejected"</h3>
                                    <div class="flex items-end gap-4 h-40">
                                        {approval
                                            .into_iter()
                                            .map(|point| {
                                                let approved_pct = (point.approved as f64 / max_month as f64) * 100.0;
                                                let rejected_pct = (point.rejected as f64 / max_month as f64) * 100.0;
                                                view! {
                                                    <div class="flex flex-col items-center gap-1 flex-1 h-full justify-end">
                                                        <div class="flex items-end gap-1 w-full h-full justify-center">
                                                            <div
                                                                class="w-4 bg-success rounded-t"
                                                                style=format!("height: {approved_pct:.0}%")
                                                            ></div>
                                                            <div
                                                                class="w-4 bg-error rounded-t"
                                                                style=format!("height: {rejected_pct:.0}%")
                                                            ></div>
                                                        </div>
                                                        <span class="text-xs opacity-60">{point.month.clone()}</span>
                                                    </div>
                                                }
                                            })
                                            .collect_view()}
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
    fn trend_scales_to_its_own_maximum() {
        let data = vec![
            TrendPoint { month: "Jan".into(), value: 2.0 },
            TrendPoint { month: "Feb".into(), value: 4.0 },
        ];
        assert_eq!(trend_points(&data), "0.0,80.0 500.0,0.0");
    }

    #[test]
    fn empty_series_fall_back_to_placeholders() {
        let substituted = or_fallback(Vec::new(), fallback_trend);
        assert_eq!(substituted.len(), 8);
        assert_eq!(substituted[0].month, "Jul");

        let real = vec![TrendPoint { month: "Mar".into(), value: 1.0 }];
        let kept = or_fallback(real, fallback_trend);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].month, "Mar");

        assert_eq!(or_fallback(Vec::new(), fallback_reasons).len(), 5);
        assert_eq!(or_fallback(Vec::new(), fallback_approvals).len(), 7);
    }

    #[test]
    fn deltas_carry_their_sign() {
        assert_eq!(delta_label(12.5), "+12.5%");
        assert_eq!(delta_label(-3.0), "-3.0%");
        assert_eq!(delta_label(0.0), "+0.0%");
    }
}
