//! Store setup wizard, step 2 of 3: return window and refund methods.

use leptos::prelude::*;
use leptos::task::spawn_local;

use backo_shared::{validate, RefundMethods, ReturnPolicyUpdate};

use crate::api::use_api;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn ReturnPolicyPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (window_days, set_window_days) = signal("30".to_string());
    let (bank_transfer, set_bank_transfer) = signal(true);
    let (digital_wallet, set_digital_wallet) = signal(true);
    let (store_credit, set_store_credit) = signal(true);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let Ok(days) = window_days.get().trim().parse::<i32>() else {
            set_error_msg.set(Some("Return window must be a number of days".to_string()));
            return;
        };
        if !validate::return_window(days) {
            set_error_msg.set(Some("Return window must be between 1 and 365 days".to_string()));
            return;
        }
        let methods = RefundMethods {
            bank_transfer: bank_transfer.get(),
            digital_wallet: digital_wallet.get(),
            store_credit: store_credit.get(),
        };
        if !methods.any_enabled() {
            set_error_msg.set(Some("Select at least one refund method".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        let router = router.clone();
        spawn_local(async move {
            let req = ReturnPolicyUpdate {
                return_window: days,
                refund_methods: methods,
            };
            match api.update_return_policy(&req).await {
                Ok(_) => router.navigate_route(AppRoute::Branding),
                Err(err) => set_error_msg.set(Some(err.to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 py-12 px-4">
            <div class="max-w-xl mx-auto space-y-6">
                <ul class="steps w-full">
                    <li class="step step-primary">"Store"</li>
                    <li class="step step-primary">"Return policy"</li>
                    <li class="step">"Branding"</li>
                </ul>

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body" on:submit=on_submit>
                        <h2 class="card-title">"Return policy"</h2>
                        <p class="text-base-content/70 text-sm">
                            "How long customers have to start a return, and how they get refunded."
                        </p>

                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="window">
                                <span class="label-text">"Return window (days)"</span>
                            </label>
                            <input
                                id="window"
                                type="number"
                                min="1"
                                max="365"
                                on:input=move |ev| set_window_days.set(event_target_value(&ev))
                                prop:value=window_days
                                class="input input-bordered w-32"
                                required
                            />
                        </div>

                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Refund methods"</span>
                            </label>
                            <label class="label cursor-pointer justify-start gap-3">
                                <input
                                    type="checkbox"
                                    class="checkbox checkbox-primary"
                                    prop:checked=bank_transfer
                                    on:change=move |ev| set_bank_transfer.set(event_target_checked(&ev))
                                />
                                <span class="label-text">"Bank transfer"</span>
                            </label>
                            <label class="label cursor-pointer justify-start gap-3">
                                <input
                                    type="checkbox"
                                    class="checkbox checkbox-primary"
                                    prop:checked=digital_wallet
                                    on:change=move |ev| set_digital_wallet.set(event_target_checked(&ev))
                                />
                                <span class="label-text">"Digital wallet"</span>
                            </label>
                            <label class="label cursor-pointer justify-start gap-3">
                                <input
                                    type="checkbox"
                                    class="checkbox checkbox-primary"
                                    prop:checked=store_credit
                                    on:change=move |ev| set_store_credit.set(event_target_checked(&ev))
                                />
                                <span class="label-text">"Store credit"</span>
                            </label>
                        </div>

                        <div class="form-control mt-4">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                                } else {
                                    "Continue".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
