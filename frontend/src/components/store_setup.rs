//! Store setup wizard, step 1 of 3: name, URL and logo.

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

use backo_shared::{validate, MAX_LOGO_BYTES};

use crate::api::use_api;
use crate::components::icons::Upload;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// Pull the first file out of a change/drop event's file list and check
/// it against the logo constraints.
fn accept_logo(file: File) -> Result<File, String> {
    if !validate::logo_mime(&file.type_()) {
        return Err("Logo must be a PNG or JPG image".to_string());
    }
    if file.size() > MAX_LOGO_BYTES {
        return Err("Logo must be smaller than 2 MB".to_string());
    }
    Ok(file)
}

#[component]
pub fn StoreSetupPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (store_name, set_store_name) = signal(String::new());
    let (store_url, set_store_url) = signal(String::new());
    let (logo, set_logo) = signal(Option::<File>::None);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let take_file = move |file: Option<File>| {
        let Some(file) = file else { return };
        match accept_logo(file) {
            Ok(file) => {
                set_error_msg.set(None);
                set_logo.set(Some(file));
            }
            Err(msg) => set_error_msg.set(Some(msg)),
        }
    };

    let on_file_change = move |ev: leptos::web_sys::Event| {
        let input = event_target::<leptos::web_sys::HtmlInputElement>(&ev);
        take_file(input.files().and_then(|list| list.get(0)));
    };

    let on_drop = move |ev: leptos::web_sys::DragEvent| {
        ev.prevent_default();
        take_file(ev.data_transfer().and_then(|dt| dt.files()).and_then(|list| list.get(0)));
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let name = store_name.get().trim().to_string();
        let url = store_url.get().trim().to_string();
        if !validate::store_name(&name) {
            set_error_msg.set(Some("Store name must be between 2 and 100 characters".to_string()));
            return;
        }
        if !validate::store_url(&url) {
            set_error_msg.set(Some("Please enter a valid store URL".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        let router = router.clone();
        spawn_local(async move {
            let file = logo.get_untracked();
            match api.setup_store(&name, &url, file.as_ref()).await {
                Ok(_) => router.navigate_route(AppRoute::ReturnPolicy),
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
                    <li class="step">"Return policy"</li>
                    <li class="step">"Branding"</li>
                </ul>

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body" on:submit=on_submit>
                        <h2 class="card-title">"Set up your store"</h2>
                        <p class="text-base-content/70 text-sm">
                            "Customers will reach the return portal through your store URL."
                        </p>

                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="store-name">
                                <span class="label-text">"Store name"</span>
                            </label>
                            <input
                                id="store-name"
                                type="text"
                                placeholder="My Store"
                                on:input=move |ev| set_store_name.set(event_target_value(&ev))
                                prop:value=store_name
                                class="input input-bordered"
                                required
                            />
                        </div>

                        <div class="form-control">
                            <label class="label" for="store-url">
                                <span class="label-text">"Store URL"</span>
                            </label>
                            <input
                                id="store-url"
                                type="text"
                                placeholder="mystore.com"
                                on:input=move |ev| set_store_url.set(event_target_value(&ev))
                                prop:value=store_url
                                class="input input-bordered"
                                required
                            />
                        </div>

                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Store logo (optional)"</span>
                            </label>
                            <label
                                class="border-2 border-dashed border-base-300 rounded-box p-8 text-center cursor-pointer hover:border-primary"
                                on:dragover=move |ev: leptos::web_sys::DragEvent| ev.prevent_default()
                                on:drop=on_drop
                            >
                                <Upload attr:class="h-8 w-8 mx-auto opacity-50" />
                                <p class="text-sm mt-2">
                                    {move || match logo.get() {
                                        Some(file) => file.name(),
                                        None => "Drop a PNG or JPG here, or click to browse (max 2 MB)".to_string(),
                                    }}
                                </p>
                                <input type="file" accept="image/png,image/jpeg" class="hidden" on:change=on_file_change />
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
