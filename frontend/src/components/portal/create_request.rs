//! Portal step 2: build and submit the return request for a found order.

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

use backo_shared::{
    validate, CustomerInfo, PublicOrder, Resolution, ReturnProduct, ReturnSubmission,
    MAX_RETURN_PHOTOS, RETURN_REASONS,
};

use crate::api::use_api;
use crate::components::icons::{Camera, X};
use crate::flow::use_flow;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// Resolve the order this page works on. The stash is authoritative; in
/// debug builds a missing stash falls back to a fixture so the page can
/// be worked on without a backend, in release it redirects.
fn resolve_order(flow: &crate::flow::FlowStore) -> Option<PublicOrder> {
    let stashed = flow.load_order();
    #[cfg(debug_assertions)]
    {
        Some(stashed.unwrap_or_else(crate::flow::dev_fixture_order))
    }
    #[cfg(not(debug_assertions))]
    {
        stashed
    }
}

#[component]
pub fn CreateRequestPage(store_url: String, order_id: String) -> impl IntoView {
    let api = use_api();
    let flow = use_flow();
    let router = use_router();

    let Some(order) = resolve_order(&flow) else {
        // Arrived out of order: no lookup result to build on. Show why,
        // then bounce back to the entry page.
        let entry = AppRoute::PortalFind {
            store_url: store_url.clone(),
        };
        set_timeout(
            move || router.replace(entry),
            std::time::Duration::from_secs(2),
        );
        return view! {
            <div class="min-h-screen bg-base-200 flex items-center justify-center px-4">
                <div class="card bg-base-100 shadow-xl max-w-md w-full">
                    <div class="card-body text-center">
                        <h2 class="text-xl font-semibold">"No order selected"</h2>
                        <p class="text-base-content/70">
                            "Look up your order first. Taking you back..."
                        </p>
                    </div>
                </div>
            </div>
        }
        .into_any();
    };

    let items = order.items.clone();
    let (selected_item, set_selected_item) = signal(0_usize);
    let (reason, set_reason) = signal(RETURN_REASONS[0].to_string());
    let (resolution, set_resolution) = signal(Resolution::Refund);
    let (notes, set_notes) = signal(String::new());
    let (photos, set_photos) = signal(Vec::<File>::new());
    let (consent, set_consent) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let (submitted, set_submitted) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // All-or-nothing: a selection that would push past the cap is rejected
    // whole, so the user re-picks instead of guessing which files made it.
    let add_photos = move |incoming: Vec<File>| {
        set_photos.update(|current| {
            if current.len() + incoming.len() > MAX_RETURN_PHOTOS {
                set_error_msg.set(Some(format!(
                    "You can attach at most {MAX_RETURN_PHOTOS} photos"
                )));
                return;
            }
            set_error_msg.set(None);
            current.extend(incoming);
        });
    };

    let on_photo_change = move |ev: leptos::web_sys::Event| {
        let input = event_target::<leptos::web_sys::HtmlInputElement>(&ev);
        let Some(list) = input.files() else { return };
        let incoming = (0..list.length()).filter_map(|i| list.get(i)).collect();
        add_photos(incoming);
        input.set_value("");
    };

    // Drops arrive unfiltered, unlike the picker with its accept attr.
    let on_photo_drop = move |ev: leptos::web_sys::DragEvent| {
        ev.prevent_default();
        let Some(list) = ev.data_transfer().and_then(|dt| dt.files()) else {
            return;
        };
        let incoming = (0..list.length())
            .filter_map(|i| list.get(i))
            .filter(|file| validate::image_mime(&file.type_()))
            .collect();
        add_photos(incoming);
    };

    let remove_photo = move |index: usize| {
        set_photos.update(|current| {
            if index < current.len() {
                current.remove(index);
            }
        });
        set_error_msg.set(None);
    };

    let on_submit = {
        let order = order.clone();
        let store_url = store_url.clone();
        let order_id = order_id.clone();
        let flow = flow.clone();
        let router = router.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();

            if !consent.get() {
                set_error_msg.set(Some("Please accept the return policy to continue".to_string()));
                return;
            }
            let Some(item) = order.items.get(selected_item.get()).cloned() else {
                set_error_msg.set(Some("Select the item you want to return".to_string()));
                return;
            };

            set_is_submitting.set(true);
            set_error_msg.set(None);

            let api = api.clone();
            let flow = flow.clone();
            let router = router.clone();
            let store_url = store_url.clone();
            let order_id = order_id.clone();
            let customer = order.customer.clone().unwrap_or(CustomerInfo {
                name: String::new(),
                email: String::new(),
                phone: None,
            });
            spawn_local(async move {
                let submission = ReturnSubmission {
                    order_id,
                    customer,
                    product: ReturnProduct {
                        name: item.product_name.clone(),
                        price: item.price,
                        quantity: item.quantity,
                    },
                    reason: reason.get_untracked(),
                    preferred_resolution: resolution.get_untracked().as_str().to_string(),
                    amount: item.refund_amount(),
                    notes: notes.get_untracked(),
                };
                let attached = photos.get_untracked();
                match api.create_return(&store_url, &submission, &attached).await {
                    Ok(created) => {
                        flow.complete_submission(&created.return_id);
                        set_submitted.set(true);
                        // Brief confirmation before moving on.
                        let target = AppRoute::PortalSuccess {
                            store_url,
                            order_id: submission.order_id.clone(),
                        };
                        set_timeout(
                            move || router.replace(target),
                            std::time::Duration::from_secs(2),
                        );
                    }
                    Err(err) => {
                        set_error_msg.set(Some(err.to_string()));
                        set_is_submitting.set(false);
                    }
                }
            });
        }
    };

    let order_number = order.order_number.clone();
    let order_total = order.total;

    view! {
        <div class="min-h-screen bg-base-200 py-12 px-4">
            <div class="max-w-lg mx-auto space-y-6">
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title text-lg">"Order " {order_number}</h2>
                        <p class="text-base-content/70 text-sm">
                            {format!("Order total ${order_total:.2}")}
                        </p>
                    </div>
                </div>

                <Show when=move || submitted.get()>
                    <div role="alert" class="alert alert-success">
                        <span>"Return request submitted. Taking you to your confirmation..."</span>
                    </div>
                </Show>

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body" on:submit=on_submit.clone()>
                        <h2 class="card-title text-lg">"Return details"</h2>

                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="item">
                                <span class="label-text">"Item to return"</span>
                            </label>
                            <select
                                id="item"
                                class="select select-bordered"
                                on:change=move |ev| {
                                    if let Ok(index) = event_target_value(&ev).parse() {
                                        set_selected_item.set(index);
                                    }
                                }
                            >
                                {items
                                    .iter()
                                    .enumerate()
                                    .map(|(i, item)| view! {
                                        <option value=i.to_string()>{item.display_label()}</option>
                                    })
                                    .collect_view()}
                            </select>
                        </div>

                        <div class="form-control">
                            <label class="label" for="reason">
                                <span class="label-text">"Reason"</span>
                            </label>
                            <select
                                id="reason"
                                class="select select-bordered"
                                on:change=move |ev| set_reason.set(event_target_value(&ev))
                            >
                                {RETURN_REASONS
                                    .into_iter()
                                    .map(|r| view! { <option value=r>{r}</option> })
                                    .collect_view()}
                            </select>
                        </div>

                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Preferred resolution"</span>
                            </label>
                            <div class="flex gap-4">
                                {[Resolution::Refund, Resolution::Exchange, Resolution::StoreCredit]
                                    .into_iter()
                                    .map(|option| view! {
                                        <label class="label cursor-pointer gap-2">
                                            <input
                                                type="radio"
                                                name="resolution"
                                                class="radio radio-primary radio-sm"
                                                prop:checked=move || resolution.get() == option
                                                on:change=move |_| set_resolution.set(option)
                                            />
                                            <span class="label-text">{option.display_name()}</span>
                                        </label>
                                    })
                                    .collect_view()}
                            </div>
                        </div>

                        <div class="form-control">
                            <label class="label" for="notes">
                                <span class="label-text">"Notes (optional)"</span>
                            </label>
                            <textarea
                                id="notes"
                                class="textarea textarea-bordered"
                                placeholder="Anything else we should know"
                                on:input=move |ev| set_notes.set(event_target_value(&ev))
                                prop:value=notes
                            ></textarea>
                        </div>

                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">
                                    {move || format!("Photos ({}/{})", photos.with(|p| p.len()), MAX_RETURN_PHOTOS)}
                                </span>
                            </label>
                            <label
                                class="border-2 border-dashed border-base-300 rounded-box p-6 text-center cursor-pointer hover:border-primary"
                                on:dragover=move |ev: leptos::web_sys::DragEvent| ev.prevent_default()
                                on:drop=on_photo_drop
                            >
                                <Camera attr:class="h-6 w-6 mx-auto opacity-50" />
                                <p class="text-sm mt-2">"Drop photos here or click to browse"</p>
                                <input
                                    type="file"
                                    accept="image/*"
                                    multiple
                                    class="hidden"
                                    on:change=on_photo_change
                                />
                            </label>
                            <ul class="mt-2 space-y-1">
                                {move || photos
                                    .get()
                                    .into_iter()
                                    .enumerate()
                                    .map(|(i, file)| view! {
                                        <li class="flex items-center justify-between text-sm bg-base-200 rounded px-3 py-1">
                                            <span class="truncate">{file.name()}</span>
                                            <button
                                                type="button"
                                                class="btn btn-ghost btn-xs"
                                                on:click=move |_| remove_photo(i)
                                            >
                                                <X attr:class="h-3 w-3" />
                                            </button>
                                        </li>
                                    })
                                    .collect_view()}
                            </ul>
                        </div>

                        <div class="form-control">
                            <label class="label cursor-pointer justify-start gap-3">
                                <input
                                    type="checkbox"
                                    class="checkbox checkbox-primary checkbox-sm"
                                    prop:checked=consent
                                    on:change=move |ev| set_consent.set(event_target_checked(&ev))
                                />
                                <span class="label-text">
                                    "I have read and accept the store's return policy"
                                </span>
                            </label>
                        </div>

                        <div class="form-control mt-4">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Submitting..." }.into_any()
                                } else {
                                    "Submit return request".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
    .into_any()
}
