//! Products catalog: search, status filter and Shopify sync.

use leptos::prelude::*;
use leptos::task::spawn_local;

use backo_shared::Product;

use crate::api::use_api;
use crate::components::icons::{RefreshCw, Search};
use crate::components::layout::{ErrorBanner, LoadingState, Shell, surface_fetch_error};
use crate::web::route::AppRoute;

fn filter_products(products: &[Product], query: &str, status: &str) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| status == "All" || p.status == status)
        .filter(|p| {
            needle.is_empty()
                || p.title.to_lowercase().contains(&needle)
                || p.vendor
                    .as_deref()
                    .is_some_and(|v| v.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    let api = use_api();
    let session = crate::session::use_session();
    let router = crate::web::router::use_router();

    let (products, set_products) = signal(Vec::<Product>::new());
    let (loading, set_loading) = signal(true);
    let (syncing, set_syncing) = signal(false);
    let (shopify_connected, set_shopify_connected) = signal(false);
    let (query, set_query) = signal(String::new());
    let (status_filter, set_status_filter) = signal("All".to_string());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let load_products = {
        let api = api.clone();
        let session = session.clone();
        let router = router.clone();
        move || {
            let api = api.clone();
            let session = session.clone();
            let router = router.clone();
            set_loading.set(true);
            spawn_local(async move {
                match api.products().await {
                    Ok(data) => set_products.set(data),
                    Err(err) => surface_fetch_error(err, set_error_msg, &session, &router),
                }
                set_loading.set(false);
            });
        }
    };

    load_products();

    {
        let api = api.clone();
        spawn_local(async move {
            if let Ok(status) = api.shopify_status().await {
                set_shopify_connected.set(status.is_connected);
            }
        });
    }

    let on_sync = {
        let api = api.clone();
        let load_products = load_products.clone();
        move |_| {
            let api = api.clone();
            let load_products = load_products.clone();
            set_syncing.set(true);
            spawn_local(async move {
                match api.sync_products().await {
                    Ok(_) => load_products(),
                    Err(err) => set_error_msg.set(Some(err.to_string())),
                }
                set_syncing.set(false);
            });
        }
    };

    let statuses = move || {
        let mut all: Vec<String> =
            products.with(|list| list.iter().map(|p| p.status.clone()).collect());
        all.sort();
        all.dedup();
        all
    };

    let visible = move || {
        products.with(|list| filter_products(list, &query.get(), &status_filter.get()))
    };

    view! {
        <Shell active=AppRoute::Products>
            <div class="flex items-center justify-between mb-6">
                <h1 class="text-2xl font-bold">"Products"</h1>
                <Show when=move || shopify_connected.get()>
                    <button class="btn btn-outline gap-2" on:click=on_sync.clone() disabled=move || syncing.get()>
                        <RefreshCw attr:class=move || if syncing.get() { "h-4 w-4 animate-spin" } else { "h-4 w-4" } />
                        "Sync products"
                    </button>
                </Show>
            </div>
            <ErrorBanner message=error_msg />

            <div class="flex flex-wrap gap-3 mb-4">
                <label class="input input-bordered flex items-center gap-2 flex-1 min-w-64">
                    <Search attr:class="h-4 w-4 opacity-50" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Search by title or vendor"
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                        prop:value=query
                    />
                </label>
                <select
                    class="select select-bordered"
                    on:change=move |ev| set_status_filter.set(event_target_value(&ev))
                >
                    <option value="All">"All statuses"</option>
                    {move || statuses()
                        .into_iter()
                        .map(|s| view! { <option value=s.clone()>{s.clone()}</option> })
                        .collect_view()}
                </select>
            </div>

            <Show when=move || !loading.get() fallback=LoadingState>
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Product"</th>
                                        <th>"Vendor"</th>
                                        <th>"Type"</th>
                                        <th>"Status"</th>
                                        <th class="text-right">"Price"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || visible().is_empty()>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                "No products match the current filters."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=visible
                                        key=|p| p.id.clone()
                                        children=move |product: Product| view! {
                                            <tr>
                                                <td>
                                                    <div class="flex items-center gap-3">
                                                        {product.image.clone().map(|src| view! {
                                                            <div class="avatar">
                                                                <div class="w-10 rounded">
                                                                    <img src=src alt=product.title.clone() />
                                                                </div>
                                                            </div>
                                                        })}
                                                        <span class="font-semibold">{product.title.clone()}</span>
                                                    </div>
                                                </td>
                                                <td>{product.vendor.clone().unwrap_or_default()}</td>
                                                <td>{product.product_type.clone().unwrap_or_default()}</td>
                                                <td>
                                                    <span class=if product.status == "Active" {
                                                        "badge badge-success badge-outline"
                                                    } else {
                                                        "badge badge-ghost"
                                                    }>
                                                        {product.status.clone()}
                                                    </span>
                                                </td>
                                                <td class="text-right">
                                                    {product.price.map(|p| format!("${p:.2}")).unwrap_or_else(|| "-".to_string())}
                                                </td>
                                            </tr>
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            </Show>
        </Shell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str, vendor: Option<&str>, status: &str) -> Product {
        Product {
            id: title.to_string(),
            title: title.to_string(),
            vendor: vendor.map(|v| v.to_string()),
            status: status.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn search_covers_title_and_vendor() {
        let products = vec![
            product("Blue Sneakers", Some("Acme"), "Active"),
            product("White T-Shirt", None, "Draft"),
        ];
        assert_eq!(filter_products(&products, "sneakers", "All").len(), 1);
        assert_eq!(filter_products(&products, "acme", "All").len(), 1);
        // A product without a vendor never matches a vendor query.
        assert_eq!(filter_products(&products, "acme", "Draft").len(), 0);
        assert_eq!(filter_products(&products, "", "Draft").len(), 1);
    }
}
