//! Portal step 4: track a return. The URL is shareable; everything on
//! this page comes from the public tracking endpoint.

use leptos::prelude::*;
use leptos::task::spawn_local;

use backo_shared::{date, PublicReturn, Resolution, StatusBucket};

use crate::api::use_api;
use crate::components::icons::{CheckCircle, Share2};
use crate::components::layout::LoadingState;

fn bucket_badge_class(bucket: StatusBucket) -> &'static str {
    match bucket {
        StatusBucket::Pending => "badge badge-lg badge-warning",
        StatusBucket::InProgress => "badge badge-lg badge-info",
        StatusBucket::Completed => "badge badge-lg badge-success",
    }
}

fn share_url() -> String {
    web_sys::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default()
}

#[component]
pub fn TrackReturnPage(store_url: String, return_id: String) -> impl IntoView {
    let api = use_api();

    let (data, set_data) = signal(Option::<PublicReturn>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let api = api.clone();
        spawn_local(async move {
            match api.public_return(&store_url, &return_id).await {
                Ok(details) => set_data.set(Some(details)),
                Err(err) => set_error_msg.set(Some(err.to_string())),
            }
        });
    }

    view! {
        <div class="min-h-screen bg-base-200 py-12 px-4">
            <div class="max-w-lg mx-auto space-y-6">
                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <Show
                    when=move || data.get().is_some()
                    fallback=move || view! {
                        <Show when=move || error_msg.get().is_none()>
                            <LoadingState />
                        </Show>
                    }
                >
                    {move || {
                        let details = data.get().unwrap_or_default();
                        let bucket = StatusBucket::from_status(&details.status);
                        let link = share_url();
                        let mail_href = format!(
                            "mailto:?subject=Return%20{}&body={}",
                            details.return_id,
                            js_sys::encode_uri_component(&link)
                        );
                        let whatsapp_href = format!(
                            "https://wa.me/?text={}",
                            js_sys::encode_uri_component(&link)
                        );

                        view! {
                            <div class="space-y-6">
                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body items-center text-center">
                                        <p class="text-sm text-base-content/60">"Return"</p>
                                        <h1 class="text-2xl font-bold font-mono">{details.return_id.clone()}</h1>
                                        <span class=bucket_badge_class(bucket)>{bucket.label()}</span>
                                        <div class="flex gap-2 mt-2">
                                            <a class="btn btn-ghost btn-sm gap-1" href=mail_href>
                                                <Share2 attr:class="h-4 w-4" /> "Email"
                                            </a>
                                            <a class="btn btn-ghost btn-sm gap-1" href=whatsapp_href target="_blank">
                                                <Share2 attr:class="h-4 w-4" /> "WhatsApp"
                                            </a>
                                        </div>
                                    </div>
                                </div>

                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body">
                                        <h2 class="card-title text-base">"Details"</h2>
                                        <dl class="grid grid-cols-2 gap-y-2 text-sm">
                                            {details.product.clone().map(|product| view! {
                                                <dt class="text-base-content/60">"Item"</dt>
                                                <dd>{product.name}</dd>
                                            })}
                                            <dt class="text-base-content/60">"Reason"</dt>
                                            <dd>{details.reason.clone()}</dd>
                                            <dt class="text-base-content/60">"Resolution"</dt>
                                            <dd>{Resolution::display_for(&details.preferred_resolution)}</dd>
                                            <dt class="text-base-content/60">"Amount"</dt>
                                            <dd>{format!("${:.2}", details.amount)}</dd>
                                            {details.refund_method.clone().map(|method| view! {
                                                <dt class="text-base-content/60">"Refund method"</dt>
                                                <dd>{method}</dd>
                                            })}
                                            {details.return_address.clone().map(|address| view! {
                                                <dt class="text-base-content/60">"Ship to"</dt>
                                                <dd>{address}</dd>
                                            })}
                                        </dl>
                                    </div>
                                </div>

                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body">
                                        <h2 class="card-title text-base">"Progress"</h2>
                                        <ul class="space-y-4">
                                            {details.timeline
                                                .iter()
                                                .map(|entry| {
                                                    let done = entry.completed;
                                                    view! {
                                                        <li class="flex gap-3">
                                                            <div class=if done { "text-success" } else { "text-base-content/30" }>
                                                                <CheckCircle attr:class="h-5 w-5" />
                                                            </div>
                                                            <div>
                                                                <p class=if done { "font-semibold" } else { "font-semibold opacity-50" }>
                                                                    {entry.step.clone()}
                                                                </p>
                                                                <p class="text-sm text-base-content/60">{entry.description.clone()}</p>
                                                                {entry.date.clone().map(|d| view! {
                                                                    <p class="text-xs text-base-content/40">{date::long_date(&d)}</p>
                                                                })}
                                                            </div>
                                                        </li>
                                                    }
                                                })
                                                .collect_view()}
                                        </ul>
                                    </div>
                                </div>
                            </div>
                        }
                    }}
                </Show>
            </div>
        </div>
    }
}
