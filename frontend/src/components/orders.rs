//! Orders table: search, status and payment filters, per-row status
//! updates and Shopify sync.

use leptos::prelude::*;
use leptos::task::spawn_local;

use backo_shared::{date, Order, OrderStatusUpdate, ORDER_STATUSES};

use crate::api::use_api;
use crate::components::icons::{RefreshCw, Search};
use crate::components::layout::{ErrorBanner, LoadingState, Shell, surface_fetch_error};
use crate::web::route::AppRoute;

fn order_badge_class(status: &str) -> &'static str {
    match status {
        "Pending" => "badge badge-warning badge-outline",
        "Processing" | "In Transit" => "badge badge-info badge-outline",
        "Delivered" => "badge badge-success badge-outline",
        "Cancelled" => "badge badge-error badge-outline",
        _ => "badge badge-ghost",
    }
}

/// Apply the search box and both dropdown filters. "All" disables a
/// dropdown; the query matches order number, customer name or email.
fn filter_orders(orders: &[Order], query: &str, status: &str, payment: &str) -> Vec<Order> {
    let needle = query.trim().to_lowercase();
    orders
        .iter()
        .filter(|o| status == "All" || o.status == status)
        .filter(|o| payment == "All" || o.payment_method == payment)
        .filter(|o| {
            needle.is_empty()
                || o.order_number.to_lowercase().contains(&needle)
                || o.customer.name.to_lowercase().contains(&needle)
                || o.customer.email.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[component]
pub fn OrdersPage() -> impl IntoView {
    let api = use_api();
    let session = crate::session::use_session();
    let router = crate::web::router::use_router();

    let (orders, set_orders) = signal(Vec::<Order>::new());
    let (loading, set_loading) = signal(true);
    let (syncing, set_syncing) = signal(false);
    let (shopify_connected, set_shopify_connected) = signal(false);
    let (query, set_query) = signal(String::new());
    let (status_filter, set_status_filter) = signal("All".to_string());
    let (payment_filter, set_payment_filter) = signal("All".to_string());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let load_orders = {
        let api = api.clone();
        let session = session.clone();
        let router = router.clone();
        move || {
            let api = api.clone();
            let session = session.clone();
            let router = router.clone();
            set_loading.set(true);
            spawn_local(async move {
                match api.orders().await {
                    Ok(data) => set_orders.set(data),
                    Err(err) => surface_fetch_error(err, set_error_msg, &session, &router),
                }
                set_loading.set(false);
            });
        }
    };

    load_orders();

    // Sync is only offered once a commerce platform is connected.
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
        let load_orders = load_orders.clone();
        move |_| {
            let api = api.clone();
            let load_orders = load_orders.clone();
            set_syncing.set(true);
            spawn_local(async move {
                match api.sync_orders().await {
                    Ok(_) => load_orders(),
                    Err(err) => set_error_msg.set(Some(err.to_string())),
                }
                set_syncing.set(false);
            });
        }
    };

    let change_status = {
        let api = api.clone();
        let load_orders = load_orders.clone();
        move |order_id: String, status: String| {
            let api = api.clone();
            let load_orders = load_orders.clone();
            spawn_local(async move {
                let update = OrderStatusUpdate { status };
                match api.update_order(&order_id, &update).await {
                    // Re-fetch rather than patching locally so the row
                    // reflects whatever the server actually stored.
                    Ok(_) => load_orders(),
                    Err(err) => set_error_msg.set(Some(err.to_string())),
                }
            });
        }
    };

    let payment_methods = move || {
        let mut methods: Vec<String> = orders
            .with(|list| list.iter().map(|o| o.payment_method.clone()).collect());
        methods.sort();
        methods.dedup();
        methods
    };

    let visible = move || {
        orders.with(|list| filter_orders(list, &query.get(), &status_filter.get(), &payment_filter.get()))
    };

    view! {
        <Shell active=AppRoute::Orders>
            <div class="flex items-center justify-between mb-6">
                <h1 class="text-2xl font-bold">"Orders"</h1>
                <Show when=move || shopify_connected.get()>
                    <button class="btn btn-outline gap-2" on:click=on_sync.clone() disabled=move || syncing.get()>
                        <RefreshCw attr:class=move || if syncing.get() { "h-4 w-4 animate-spin" } else { "h-4 w-4" } />
                        "Sync orders"
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
                        placeholder="Search by order, name or email"
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                        prop:value=query
                    />
                </label>
                <select
                    class="select select-bordered"
                    on:change=move |ev| set_status_filter.set(event_target_value(&ev))
                >
                    <option value="All">"All statuses"</option>
                    {ORDER_STATUSES
                        .into_iter()
                        .map(|s| view! { <option value=s>{s}</option> })
                        .collect_view()}
                </select>
                <select
                    class="select select-bordered"
                    on:change=move |ev| set_payment_filter.set(event_target_value(&ev))
                >
                    <option value="All">"All payments"</option>
                    {move || payment_methods()
                        .into_iter()
                        .map(|m| view! { <option value=m.clone()>{m.clone()}</option> })
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
                                        <th>"Order"</th>
                                        <th>"Customer"</th>
                                        <th>"Items"</th>
                                        <th>"Placed"</th>
                                        <th>"Payment"</th>
                                        <th class="text-right">"Amount"</th>
                                        <th>"Status"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || visible().is_empty()>
                                        <tr>
                                            <td colspan="7" class="text-center py-8 text-base-content/50">
                                                "No orders match the current filters."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=visible
                                        key=|o| (o.id.clone(), o.status.clone())
                                        children={
                                            let change_status = change_status.clone();
                                            move |order: Order| {
                                                let change_status = change_status.clone();
                                                let order_id = order.id.clone();
                                                let current = order.status.clone();
                                                view! {
                                                    <tr>
                                                        <td class="font-mono text-sm font-bold">{order.order_number.clone()}</td>
                                                        <td>
                                                            <div>{order.customer.name.clone()}</div>
                                                            <div class="text-xs opacity-60">{order.customer.email.clone()}</div>
                                                        </td>
                                                        <td>{order.items.len()}</td>
                                                        <td>{order.placed_date.clone().map(|d| date::long_date(&d)).unwrap_or_default()}</td>
                                                        <td>{order.payment_method.clone()}</td>
                                                        <td class="text-right">{format!("${:.2}", order.amount)}</td>
                                                        <td>
                                                            <div class="flex items-center gap-2">
                                                                <span class=order_badge_class(&order.status)>{order.status.clone()}</span>
                                                                <select
                                                                    class="select select-bordered select-xs"
                                                                    on:change=move |ev| {
                                                                        change_status(order_id.clone(), event_target_value(&ev))
                                                                    }
                                                                >
                                                                    {ORDER_STATUSES
                                                                        .into_iter()
                                                                        .map(|s| view! {
                                                                            <option value=s selected=(s == current)>{s}</option>
                                                                        })
                                                                        .collect_view()}
                                                                </select>
                                                            </div>
                                                        </td>
                                                    </tr>
                                                }
                                            }
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
    use backo_shared::CustomerInfo;

    fn order(number: &str, name: &str, email: &str, status: &str, payment: &str) -> Order {
        Order {
            id: number.to_string(),
            order_number: number.to_string(),
            customer: CustomerInfo {
                name: name.to_string(),
                email: email.to_string(),
                phone: None,
            },
            status: status.to_string(),
            payment_method: payment.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn search_matches_number_name_and_email() {
        let orders = vec![
            order("ORD-1001", "Ada Lovelace", "ada@example.com", "Delivered", "Card"),
            order("ORD-1002", "Grace Hopper", "grace@example.com", "Pending", "PayPal"),
        ];
        assert_eq!(filter_orders(&orders, "ord-1001", "All", "All").len(), 1);
        assert_eq!(filter_orders(&orders, "grace", "All", "All").len(), 1);
        assert_eq!(filter_orders(&orders, "example.com", "All", "All").len(), 2);
        assert_eq!(filter_orders(&orders, "nothing", "All", "All").len(), 0);
    }

    #[test]
    fn dropdown_filters_compose_with_search() {
        let orders = vec![
            order("ORD-1001", "Ada", "ada@example.com", "Delivered", "Card"),
            order("ORD-1002", "Ada", "ada@example.com", "Pending", "Card"),
            order("ORD-1003", "Ada", "ada@example.com", "Pending", "PayPal"),
        ];
        assert_eq!(filter_orders(&orders, "", "Pending", "All").len(), 2);
        assert_eq!(filter_orders(&orders, "", "Pending", "PayPal").len(), 1);
        assert_eq!(filter_orders(&orders, "ada", "Delivered", "Card").len(), 1);
    }
}
