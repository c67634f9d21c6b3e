//! Returns table with lifecycle tabs and search.

use leptos::prelude::*;
use leptos::task::spawn_local;

use backo_shared::{date, ReturnFilter, ReturnRecord, Resolution};

use crate::api::use_api;
use crate::components::icons::Search;
use crate::components::layout::{status_badge_class, ErrorBanner, LoadingState, Shell, surface_fetch_error};
use crate::web::route::AppRoute;

/// Tab filter plus the search box; the query matches return id, customer
/// name or product name.
fn filter_returns(returns: &[ReturnRecord], query: &str, tab: ReturnFilter) -> Vec<ReturnRecord> {
    let needle = query.trim().to_lowercase();
    returns
        .iter()
        .filter(|r| tab.matches(&r.status))
        .filter(|r| {
            needle.is_empty()
                || r.return_id.to_lowercase().contains(&needle)
                || r.customer.name.to_lowercase().contains(&needle)
                || r.product.name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[component]
pub fn ReturnsPage() -> impl IntoView {
    let api = use_api();
    let session = crate::session::use_session();
    let router = crate::web::router::use_router();

    let (returns, set_returns) = signal(Vec::<ReturnRecord>::new());
    let (loading, set_loading) = signal(true);
    let (active_tab, set_active_tab) = signal(ReturnFilter::Open);
    let (query, set_query) = signal(String::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let api = api.clone();
        spawn_local(async move {
            match api.returns().await {
                Ok(data) => set_returns.set(data),
                Err(err) => surface_fetch_error(err, set_error_msg, &session, &router),
            }
            set_loading.set(false);
        });
    }

    let count_for = move |tab: ReturnFilter| {
        returns.with(|list| list.iter().filter(|r| tab.matches(&r.status)).count())
    };

    let visible = move || {
        returns.with(|list| filter_returns(list, &query.get(), active_tab.get()))
    };

    view! {
        <Shell active=AppRoute::Returns>
            <h1 class="text-2xl font-bold mb-6">"Returns"</h1>
            <ErrorBanner message=error_msg />

            <div class="flex flex-wrap items-center gap-4 mb-4">
                <label class="input input-bordered flex items-center gap-2 w-72">
                    <Search attr:class="h-4 w-4 opacity-50" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Search by return id, customer or product"
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                        prop:value=query
                    />
                </label>
            </div>

            <div role="tablist" class="tabs tabs-boxed mb-4 w-fit">
                {ReturnFilter::ALL
                    .into_iter()
                    .map(|tab| view! {
                        <a
                            role="tab"
                            class=move || if active_tab.get() == tab { "tab tab-active" } else { "tab" }
                            on:click=move |_| set_active_tab.set(tab)
                        >
                            {tab.label()}
                            <span class="badge badge-sm ml-2">{move || count_for(tab)}</span>
                        </a>
                    })
                    .collect_view()}
            </div>

            <Show when=move || !loading.get() fallback=LoadingState>
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Return"</th>
                                        <th>"Customer"</th>
                                        <th>"Product"</th>
                                        <th>"Reason"</th>
                                        <th>"Resolution"</th>
                                        <th>"Date"</th>
                                        <th class="text-right">"Amount"</th>
                                        <th>"Status"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || visible().is_empty()>
                                        <tr>
                                            <td colspan="8" class="text-center py-8 text-base-content/50">
                                                "No returns in this state."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=visible
                                        key=|r| (r.return_id.clone(), r.status.clone())
                                        children=move |entry: ReturnRecord| view! {
                                            <tr>
                                                <td class="font-mono text-sm font-bold">{entry.return_id.clone()}</td>
                                                <td>
                                                    <div>{entry.customer.name.clone()}</div>
                                                    <div class="text-xs opacity-60">{entry.customer.email.clone()}</div>
                                                </td>
                                                <td>{entry.product.name.clone()}</td>
                                                <td>{entry.reason.clone()}</td>
                                                <td>{Resolution::display_for(&entry.preferred_resolution)}</td>
                                                <td>{entry.date.clone().map(|d| date::long_date(&d)).unwrap_or_default()}</td>
                                                <td class="text-right">{format!("${:.2}", entry.amount)}</td>
                                                <td>
                                                    <span class=status_badge_class(&entry.status)>{entry.status.clone()}</span>
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
    use backo_shared::{CustomerInfo, ReturnProduct};

    fn record(id: &str, customer: &str, product: &str, status: &str) -> ReturnRecord {
        ReturnRecord {
            return_id: id.to_string(),
            customer: CustomerInfo {
                name: customer.to_string(),
                email: format!("{}@example.com", customer.to_lowercase()),
                phone: None,
            },
            product: ReturnProduct {
                name: product.to_string(),
                price: 49.99,
                quantity: 1,
            },
            status: status.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn search_matches_id_customer_and_product() {
        let returns = vec![
            record("RET-001", "Ada", "Blue Sneakers", "Pending Approval"),
            record("RET-002", "Grace", "White T-Shirt", "Awaiting Receipt"),
        ];
        assert_eq!(filter_returns(&returns, "ret-001", ReturnFilter::Open).len(), 1);
        assert_eq!(filter_returns(&returns, "grace", ReturnFilter::Open).len(), 1);
        assert_eq!(filter_returns(&returns, "sneakers", ReturnFilter::Open).len(), 1);
        assert_eq!(filter_returns(&returns, "nothing", ReturnFilter::Open).len(), 0);
    }

    #[test]
    fn search_composes_with_the_active_tab() {
        let returns = vec![
            record("RET-001", "Ada", "Blue Sneakers", "Pending Approval"),
            record("RET-002", "Ada", "Blue Sneakers", "Completed"),
        ];
        assert_eq!(filter_returns(&returns, "ada", ReturnFilter::Open).len(), 1);
        assert_eq!(filter_returns(&returns, "ada", ReturnFilter::Closed).len(), 1);
        assert_eq!(filter_returns(&returns, "", ReturnFilter::Open).len(), 1);
    }
}
