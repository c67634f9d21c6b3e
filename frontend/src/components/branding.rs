//! Store setup wizard, step 3 of 3: portal branding.

use leptos::prelude::*;
use leptos::task::spawn_local;

use backo_shared::{validate, BrandingUpdate};

use crate::api::use_api;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn BrandingPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (color, set_color) = signal("#FF7F14".to_string());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let value = color.get().trim().to_string();
        if !validate::hex_color(&value) {
            set_error_msg.set(Some("Color must be a hex value like #FF7F14".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        let router = router.clone();
        spawn_local(async move {
            let req = BrandingUpdate {
                primary_color: value,
            };
            match api.update_branding(&req).await {
                // Last wizard step: the store is now set up.
                Ok(_) => router.replace(AppRoute::Dashboard),
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
                    <li class="step step-primary">"Branding"</li>
                </ul>

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body" on:submit=on_submit>
                        <h2 class="card-title">"Portal branding"</h2>
                        <p class="text-base-content/70 text-sm">
                            "Pick the accent color your customers see on the return portal."
                        </p>

                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="color">
                                <span class="label-text">"Primary color"</span>
                            </label>
                            <div class="flex items-center gap-3">
                                <input
                                    type="color"
                                    prop:value=color
                                    on:input=move |ev| set_color.set(event_target_value(&ev))
                                    class="w-12 h-12 rounded cursor-pointer border border-base-300"
                                />
                                <input
                                    id="color"
                                    type="text"
                                    on:input=move |ev| set_color.set(event_target_value(&ev))
                                    prop:value=color
                                    class="input input-bordered w-36 font-mono"
                                    required
                                />
                            </div>
                        </div>

                        // Live preview of the portal button in the chosen color.
                        <div class="rounded-box border border-base-300 p-6 mt-2">
                            <p class="text-sm text-base-content/70 mb-3">"Preview"</p>
                            <button
                                type="button"
                                class="btn text-white border-none"
                                style=move || format!("background-color: {}", color.get())
                            >
                                "Start a return"
                            </button>
                        </div>

                        <div class="form-control mt-4">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Finishing..." }.into_any()
                                } else {
                                    "Finish setup".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
