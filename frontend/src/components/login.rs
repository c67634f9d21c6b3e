//! Merchant login page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use backo_shared::{validate, LoginRequest};

use crate::api::use_api;
use crate::components::icons::Package;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let email_value = email.get();
        let password_value = password.get();
        if !validate::email(&email_value) {
            set_error_msg.set(Some("Please enter a valid email address".to_string()));
            return;
        }
        if password_value.len() < 6 {
            set_error_msg.set(Some("Password must be at least 6 characters".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        let session = session.clone();
        let router = router.clone();
        spawn_local(async move {
            let req = LoginRequest {
                email: email_value,
                password: password_value,
            };
            match api.login(&req).await {
                Ok(data) => {
                    session.set_token(&data.token);
                    let destination = if data.is_store_setup {
                        AppRoute::Dashboard
                    } else {
                        AppRoute::StoreSetup
                    };
                    router.replace(destination);
                }
                Err(err) => set_error_msg.set(Some(err.to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Package attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Backo"</h1>
                        <p class="text-base-content/70">"Sign in to manage your returns"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@store.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "No account yet? "
                            <a
                                class="link link-primary"
                                on:click={
                                    let router = use_router();
                                    move |_| router.navigate_route(AppRoute::Register)
                                }
                            >
                                "Create one"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
