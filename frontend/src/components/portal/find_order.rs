//! Portal entry page: look up an order by id and email or phone.

use leptos::prelude::*;
use leptos::task::spawn_local;

use backo_shared::{normalize_store_domain, validate, FindOrderRequest, PublicStore};

use crate::api::use_api;
use crate::components::icons::Store;
use crate::components::portal::{accent_style, PortalHeader};
use crate::flow::use_flow;
use crate::api::ApiError;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// Only a definite "no such store" hides the lookup form. Any other
/// failure (network down, proxy error) leaves the form usable, just
/// unbranded.
fn lookup_hides_form(err: &ApiError) -> bool {
    matches!(err, ApiError::Api { status: 404, .. })
}

#[component]
pub fn FindOrderPage(store_url: String) -> impl IntoView {
    let api = use_api();
    let flow = use_flow();
    let router = use_router();

    let (store, set_store) = signal(Option::<PublicStore>::None);
    let (store_missing, set_store_missing) = signal(false);
    let (order_id, set_order_id) = signal(String::new());
    let (contact, set_contact) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // Branding fetch is independent of the lookup; an unknown store hides
    // the form entirely instead of failing at submit time.
    {
        let api = api.clone();
        let domain = normalize_store_domain(&store_url);
        spawn_local(async move {
            match api.public_store(&domain).await {
                Ok(info) => set_store.set(Some(info)),
                Err(err) => {
                    web_sys::console::log_1(&format!("[Portal] Store lookup failed: {err}").into());
                    if lookup_hides_form(&err) {
                        set_store_missing.set(true);
                    }
                }
            }
        });
    }

    let on_submit = {
        let store_url = store_url.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();

            let id = order_id.get().trim().to_string();
            let contact_value = contact.get().trim().to_string();
            if !validate::order_id(&id) {
                set_error_msg.set(Some("Order ID must be at least 3 characters".to_string()));
                return;
            }
            if !validate::email_or_phone(&contact_value) {
                set_error_msg.set(Some("Enter the email address or phone number used on the order".to_string()));
                return;
            }

            set_is_submitting.set(true);
            set_error_msg.set(None);

            let api = api.clone();
            let flow = flow.clone();
            let router = router.clone();
            let store_url = store_url.clone();
            spawn_local(async move {
                let req = FindOrderRequest {
                    order_id: id.clone(),
                    email_or_phone: contact_value,
                    store_url: store_url.clone(),
                };
                match api.find_order(&req).await {
                    Ok(order) => {
                        flow.stash_order(&order);
                        router.navigate_route(AppRoute::PortalCreate {
                            store_url,
                            order_id: id,
                        });
                    }
                    Err(err) => set_error_msg.set(Some(err.to_string())),
                }
                set_is_submitting.set(false);
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 py-12 px-4">
            <div class="max-w-md mx-auto">
                <PortalHeader store=store />

                <Show
                    when=move || !store_missing.get()
                    fallback=|| view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body items-center text-center">
                                <Store attr:class="w-10 h-10 text-base-content/40" />
                                <h2 class="text-xl font-semibold">"Store not found"</h2>
                                <p class="text-base-content/70">
                                    "This return portal does not exist. Check the link you were given."
                                </p>
                            </div>
                        </div>
                    }
                >
                    <div class="card bg-base-100 shadow-xl">
                        <form class="card-body" on:submit=on_submit.clone()>
                            <h2 class="card-title text-lg">"Start a return"</h2>

                            <Show when=move || error_msg.get().is_some()>
                                <div role="alert" class="alert alert-error text-sm py-2">
                                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                                </div>
                            </Show>

                            <div class="form-control">
                                <label class="label" for="order-id">
                                    <span class="label-text">"Order ID"</span>
                                </label>
                                <input
                                    id="order-id"
                                    type="text"
                                    placeholder="ORD-1001"
                                    on:input=move |ev| set_order_id.set(event_target_value(&ev))
                                    prop:value=order_id
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="contact">
                                    <span class="label-text">"Email or phone"</span>
                                </label>
                                <input
                                    id="contact"
                                    type="text"
                                    placeholder="you@example.com"
                                    on:input=move |ev| set_contact.set(event_target_value(&ev))
                                    prop:value=contact
                                    class="input input-bordered"
                                    required
                                />
                            </div>

                            <div class="form-control mt-4">
                                <button
                                    class="btn btn-primary"
                                    style=move || accent_style(&store.get())
                                    disabled=move || is_submitting.get()
                                >
                                    {move || if is_submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "Looking up..." }.into_any()
                                    } else {
                                        "Find my order".into_any()
                                    }}
                                </button>
                            </div>
                        </form>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_a_missing_store_hides_the_form() {
        assert!(lookup_hides_form(&ApiError::Api {
            status: 404,
            message: "Store not found".to_string(),
        }));
        assert!(!lookup_hides_form(&ApiError::Network("dns".to_string())));
        assert!(!lookup_hides_form(&ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        }));
        assert!(!lookup_hides_form(&ApiError::InvalidBody { status: 502 }));
    }
}
