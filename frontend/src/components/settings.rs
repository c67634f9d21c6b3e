//! Settings: return policy and branding in one form, plus the Shopify and
//! WooCommerce integration panels.

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

use backo_shared::{
    validate, IntegrationStatus, RefundMethods, ShopifyConnectRequest, StoreProfile,
    StoreSettings, SyncResult, WooCommerceConnectRequest, MAX_LOGO_BYTES,
};

use crate::api::use_api;
use crate::components::icons::CheckCircle;
use crate::components::layout::{ErrorBanner, LoadingState, Shell, surface_fetch_error};
use crate::web::route::AppRoute;

fn sync_summary(noun: &str, result: &SyncResult) -> String {
    format!("Synced {} {} ({} skipped)", result.synced, noun, result.skipped)
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let api = use_api();
    let session = crate::session::use_session();
    let router = crate::web::router::use_router();

    let (loaded, set_loaded) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (saved_msg, set_saved_msg) = signal(Option::<String>::None);

    // Form state, filled from the server once.
    let (window_days, set_window_days) = signal("30".to_string());
    let (threshold, set_threshold) = signal("0".to_string());
    let (bank_transfer, set_bank_transfer) = signal(true);
    let (digital_wallet, set_digital_wallet) = signal(true);
    let (store_credit, set_store_credit) = signal(true);
    let (color, set_color) = signal("#FF7F14".to_string());
    let (new_logo, set_new_logo) = signal(Option::<File>::None);
    let (is_saving, set_is_saving) = signal(false);
    let (profile, set_profile) = signal(Option::<StoreProfile>::None);

    {
        let api = api.clone();
        spawn_local(async move {
            if let Ok(current) = api.store().await {
                set_profile.set(Some(current));
            }
        });
    }

    {
        let api = api.clone();
        spawn_local(async move {
            match api.settings().await {
                Ok(settings) => {
                    set_window_days.set(settings.return_window.to_string());
                    set_threshold.set(settings.automatic_approval_threshold.to_string());
                    set_bank_transfer.set(settings.refund_methods.bank_transfer);
                    set_digital_wallet.set(settings.refund_methods.digital_wallet);
                    set_store_credit.set(settings.refund_methods.store_credit);
                    set_color.set(settings.primary_color);
                }
                Err(err) => surface_fetch_error(err, set_error_msg, &session, &router),
            }
            set_loaded.set(true);
        });
    }

    let on_logo_change = move |ev: leptos::web_sys::Event| {
        let input = event_target::<leptos::web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|list| list.get(0)) else {
            return;
        };
        if !validate::logo_mime(&file.type_()) {
            set_error_msg.set(Some("Logo must be a PNG or JPG image".to_string()));
            return;
        }
        if file.size() > MAX_LOGO_BYTES {
            set_error_msg.set(Some("Logo must be smaller than 2 MB".to_string()));
            return;
        }
        set_error_msg.set(None);
        set_new_logo.set(Some(file));
    };

    let on_save = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();

            let Ok(days) = window_days.get().trim().parse::<i32>() else {
                set_error_msg.set(Some("Return window must be a number of days".to_string()));
                return;
            };
            if !validate::return_window(days) {
                set_error_msg.set(Some("Return window must be between 1 and 365 days".to_string()));
                return;
            }
            let Ok(threshold_value) = threshold.get().trim().parse::<f64>() else {
                set_error_msg.set(Some("Approval threshold must be a number".to_string()));
                return;
            };
            let methods = RefundMethods {
                bank_transfer: bank_transfer.get(),
                digital_wallet: digital_wallet.get(),
                store_credit: store_credit.get(),
            };
            if !methods.any_enabled() {
                set_error_msg.set(Some("Select at least one refund method".to_string()));
                return;
            }
            let color_value = color.get().trim().to_string();
            if !validate::hex_color(&color_value) {
                set_error_msg.set(Some("Color must be a hex value like #FF7F14".to_string()));
                return;
            }

            set_is_saving.set(true);
            set_error_msg.set(None);
            set_saved_msg.set(None);

            let api = api.clone();
            spawn_local(async move {
                let settings = StoreSettings {
                    return_window: days,
                    automatic_approval_threshold: threshold_value,
                    refund_methods: methods,
                    primary_color: color_value,
                    store_logo: None,
                };
                let file = new_logo.get_untracked();
                match api.update_settings(&settings, file.as_ref()).await {
                    Ok(_) => {
                        set_saved_msg.set(Some("Settings saved".to_string()));
                        set_new_logo.set(None);
                    }
                    Err(err) => set_error_msg.set(Some(err.to_string())),
                }
                set_is_saving.set(false);
            });
        }
    };

    view! {
        <Shell active=AppRoute::Settings>
            <div class="flex items-center gap-4 mb-6">
                <h1 class="text-2xl font-bold">"Settings"</h1>
                {move || profile.get().map(|store| view! {
                    <div class="flex items-center gap-2 text-base-content/70">
                        {store.store_logo.clone().map(|src| view! {
                            <img src=src alt=store.store_name.clone() class="h-8 w-8 rounded object-contain" />
                        })}
                        <span>{store.store_name.clone()}</span>
                    </div>
                })}
            </div>
            <ErrorBanner message=error_msg />
            <Show when=move || saved_msg.get().is_some()>
                <div role="alert" class="alert alert-success mb-4">
                    <span>{move || saved_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show when=move || loaded.get() fallback=LoadingState>
                <div class="grid grid-cols-1 xl:grid-cols-2 gap-6 items-start">
                    <div class="card bg-base-100 shadow-xl">
                        <form class="card-body" on:submit=on_save.clone()>
                            <h2 class="card-title text-lg">"Return policy & branding"</h2>

                            <div class="flex gap-4">
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
                                        class="input input-bordered w-36"
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label" for="threshold">
                                        <span class="label-text">"Auto-approve under ($)"</span>
                                    </label>
                                    <input
                                        id="threshold"
                                        type="number"
                                        min="0"
                                        step="0.01"
                                        on:input=move |ev| set_threshold.set(event_target_value(&ev))
                                        prop:value=threshold
                                        class="input input-bordered w-36"
                                    />
                                </div>
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

                            <div class="form-control">
                                <label class="label" for="color">
                                    <span class="label-text">"Primary color"</span>
                                </label>
                                <div class="flex items-center gap-3">
                                    <input
                                        type="color"
                                        prop:value=color
                                        on:input=move |ev| set_color.set(event_target_value(&ev))
                                        class="w-10 h-10 rounded cursor-pointer border border-base-300"
                                    />
                                    <input
                                        id="color"
                                        type="text"
                                        on:input=move |ev| set_color.set(event_target_value(&ev))
                                        prop:value=color
                                        class="input input-bordered w-36 font-mono"
                                    />
                                </div>
                            </div>

                            <div class="form-control">
                                <label class="label" for="logo">
                                    <span class="label-text">"Replace logo (PNG/JPG, max 2 MB)"</span>
                                </label>
                                <input
                                    id="logo"
                                    type="file"
                                    accept="image/png,image/jpeg"
                                    class="file-input file-input-bordered w-full"
                                    on:change=on_logo_change
                                />
                            </div>

                            <div class="form-control mt-4">
                                <button class="btn btn-primary" disabled=move || is_saving.get()>
                                    {move || if is_saving.get() {
                                        view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                                    } else {
                                        "Save settings".into_any()
                                    }}
                                </button>
                            </div>
                        </form>
                    </div>

                    <div class="space-y-6">
                        <ShopifyPanel />
                        <WooCommercePanel />
                    </div>
                </div>
            </Show>
        </Shell>
    }
}

#[component]
fn ShopifyPanel() -> impl IntoView {
    let api = use_api();

    let (status, set_status) = signal(Option::<IntegrationStatus>::None);
    let (shop_domain, set_shop_domain) = signal(String::new());
    let (access_token, set_access_token) = signal(String::new());
    let (api_key, set_api_key) = signal(String::new());
    let (api_secret, set_api_secret) = signal(String::new());
    let (is_connecting, set_is_connecting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let api = api.clone();
        spawn_local(async move {
            match api.shopify_status().await {
                Ok(current) => set_status.set(Some(current)),
                Err(err) => set_error_msg.set(Some(err.to_string())),
            }
        });
    }

    let on_connect = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            set_is_connecting.set(true);
            set_error_msg.set(None);

            let api = api.clone();
            spawn_local(async move {
                let req = ShopifyConnectRequest {
                    shop_domain: shop_domain.get_untracked(),
                    access_token: access_token.get_untracked(),
                    api_key: api_key.get_untracked(),
                    api_secret_key: api_secret.get_untracked(),
                };
                match api.connect_shopify(&req).await {
                    Ok(connected) => set_status.set(Some(connected)),
                    Err(err) => set_error_msg.set(Some(err.to_string())),
                }
                set_is_connecting.set(false);
            });
        }
    };

    let is_connected = move || status.get().is_some_and(|s| s.is_connected);

    let (syncing, set_syncing) = signal(false);
    let (sync_msg, set_sync_msg) = signal(Option::<String>::None);
    let on_sync_orders = {
        let api = api.clone();
        move |_| {
            let api = api.clone();
            set_syncing.set(true);
            set_sync_msg.set(None);
            spawn_local(async move {
                match api.sync_orders().await {
                    Ok(result) => set_sync_msg.set(Some(sync_summary("orders", &result))),
                    Err(err) => set_error_msg.set(Some(err.to_string())),
                }
                set_syncing.set(false);
            });
        }
    };
    let on_sync_products = {
        let api = api.clone();
        move |_| {
            let api = api.clone();
            set_syncing.set(true);
            set_sync_msg.set(None);
            spawn_local(async move {
                match api.sync_products().await {
                    Ok(result) => set_sync_msg.set(Some(sync_summary("products", &result))),
                    Err(err) => set_error_msg.set(Some(err.to_string())),
                }
                set_syncing.set(false);
            });
        }
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title text-lg">"Shopify"</h2>
                <ErrorBanner message=error_msg />

                <Show
                    when=is_connected
                    fallback=move || view! {
                        <form class="space-y-2" on:submit=on_connect.clone()>
                            <input
                                type="text"
                                placeholder="myshop.myshopify.com"
                                class="input input-bordered w-full"
                                on:input=move |ev| set_shop_domain.set(event_target_value(&ev))
                                prop:value=shop_domain
                                required
                            />
                            <input
                                type="password"
                                placeholder="Admin access token"
                                class="input input-bordered w-full"
                                on:input=move |ev| set_access_token.set(event_target_value(&ev))
                                prop:value=access_token
                                required
                            />
                            <input
                                type="text"
                                placeholder="API key"
                                class="input input-bordered w-full"
                                on:input=move |ev| set_api_key.set(event_target_value(&ev))
                                prop:value=api_key
                                required
                            />
                            <input
                                type="password"
                                placeholder="API secret key"
                                class="input input-bordered w-full"
                                on:input=move |ev| set_api_secret.set(event_target_value(&ev))
                                prop:value=api_secret
                                required
                            />
                            <button class="btn btn-primary w-full" disabled=move || is_connecting.get()>
                                {move || if is_connecting.get() { "Connecting..." } else { "Connect Shopify" }}
                            </button>
                        </form>
                    }
                >
                    <div class="space-y-3">
                        <div class="flex items-center gap-2 text-success">
                            <CheckCircle attr:class="h-5 w-5" />
                            <span>
                                "Connected to "
                                {move || status.get().and_then(|s| s.shop_domain).unwrap_or_default()}
                            </span>
                        </div>
                        <div class="flex gap-2">
                            <button
                                class="btn btn-sm btn-outline"
                                disabled=move || syncing.get()
                                on:click=on_sync_orders.clone()
                            >
                                "Sync orders"
                            </button>
                            <button
                                class="btn btn-sm btn-outline"
                                disabled=move || syncing.get()
                                on:click=on_sync_products.clone()
                            >
                                "Sync products"
                            </button>
                        </div>
                        <Show when=move || sync_msg.get().is_some()>
                            <p class="text-sm text-base-content/70">
                                {move || sync_msg.get().unwrap_or_default()}
                            </p>
                        </Show>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn WooCommercePanel() -> impl IntoView {
    let api = use_api();

    let (status, set_status) = signal(Option::<IntegrationStatus>::None);
    let (store_url, set_store_url) = signal(String::new());
    let (consumer_key, set_consumer_key) = signal(String::new());
    let (consumer_secret, set_consumer_secret) = signal(String::new());
    let (is_connecting, set_is_connecting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let api = api.clone();
        spawn_local(async move {
            match api.woocommerce_status().await {
                Ok(current) => set_status.set(Some(current)),
                Err(err) => set_error_msg.set(Some(err.to_string())),
            }
        });
    }

    let on_connect = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            set_is_connecting.set(true);
            set_error_msg.set(None);

            let api = api.clone();
            spawn_local(async move {
                let req = WooCommerceConnectRequest {
                    store_url: store_url.get_untracked(),
                    consumer_key: consumer_key.get_untracked(),
                    consumer_secret: consumer_secret.get_untracked(),
                };
                match api.connect_woocommerce(&req).await {
                    Ok(connected) => set_status.set(Some(connected)),
                    Err(err) => set_error_msg.set(Some(err.to_string())),
                }
                set_is_connecting.set(false);
            });
        }
    };

    let is_connected = move || status.get().is_some_and(|s| s.is_connected);

    let (syncing, set_syncing) = signal(false);
    let (sync_msg, set_sync_msg) = signal(Option::<String>::None);
    let on_sync_orders = {
        let api = api.clone();
        move |_| {
            let api = api.clone();
            set_syncing.set(true);
            set_sync_msg.set(None);
            spawn_local(async move {
                match api.sync_orders().await {
                    Ok(result) => set_sync_msg.set(Some(sync_summary("orders", &result))),
                    Err(err) => set_error_msg.set(Some(err.to_string())),
                }
                set_syncing.set(false);
            });
        }
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title text-lg">"WooCommerce"</h2>
                <ErrorBanner message=error_msg />

                <Show
                    when=is_connected
                    fallback=move || view! {
                        <form class="space-y-2" on:submit=on_connect.clone()>
                            <input
                                type="text"
                                placeholder="https://mystore.com"
                                class="input input-bordered w-full"
                                on:input=move |ev| set_store_url.set(event_target_value(&ev))
                                prop:value=store_url
                                required
                            />
                            <input
                                type="text"
                                placeholder="Consumer key"
                                class="input input-bordered w-full"
                                on:input=move |ev| set_consumer_key.set(event_target_value(&ev))
                                prop:value=consumer_key
                                required
                            />
                            <input
                                type="password"
                                placeholder="Consumer secret"
                                class="input input-bordered w-full"
                                on:input=move |ev| set_consumer_secret.set(event_target_value(&ev))
                                prop:value=consumer_secret
                                required
                            />
                            <button class="btn btn-primary w-full" disabled=move || is_connecting.get()>
                                {move || if is_connecting.get() { "Connecting..." } else { "Connect WooCommerce" }}
                            </button>
                        </form>
                    }
                >
                    <div class="space-y-3">
                        <div class="flex items-center gap-2 text-success">
                            <CheckCircle attr:class="h-5 w-5" />
                            <span>
                                "Connected to "
                                {move || status.get().and_then(|s| s.store_url).unwrap_or_default()}
                            </span>
                        </div>
                        <button
                            class="btn btn-sm btn-outline"
                            disabled=move || syncing.get()
                            on:click=on_sync_orders.clone()
                        >
                            "Sync orders"
                        </button>
                        <Show when=move || sync_msg.get().is_some()>
                            <p class="text-sm text-base-content/70">
                                {move || sync_msg.get().unwrap_or_default()}
                            </p>
                        </Show>
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
    fn sync_summary_reports_both_counts() {
        let result = SyncResult {
            synced: 12,
            skipped: 3,
        };
        assert_eq!(
            sync_summary("orders", &result),
            "Synced 12 orders (3 skipped)"
        );
        assert_eq!(
            sync_summary("products", &result),
            "Synced 12 products (3 skipped)"
        );
    }
}
