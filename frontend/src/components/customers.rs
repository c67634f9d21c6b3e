//! Customers table with search.

use leptos::prelude::*;
use leptos::task::spawn_local;

use backo_shared::CustomerRecord;

use crate::api::use_api;
use crate::components::icons::Search;
use crate::components::layout::{ErrorBanner, LoadingState, Shell, surface_fetch_error};
use crate::web::route::AppRoute;

fn filter_customers(customers: &[CustomerRecord], query: &str) -> Vec<CustomerRecord> {
    let needle = query.trim().to_lowercase();
    customers
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.name.to_lowercase().contains(&needle)
                || c.email.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[component]
pub fn CustomersPage() -> impl IntoView {
    let api = use_api();
    let session = crate::session::use_session();
    let router = crate::web::router::use_router();

    let (customers, set_customers) = signal(Vec::<CustomerRecord>::new());
    let (loading, set_loading) = signal(true);
    let (query, set_query) = signal(String::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let api = api.clone();
        spawn_local(async move {
            match api.customers().await {
                Ok(data) => set_customers.set(data),
                Err(err) => surface_fetch_error(err, set_error_msg, &session, &router),
            }
            set_loading.set(false);
        });
    }

    let visible = move || customers.with(|list| filter_customers(list, &query.get()));

    view! {
        <Shell active=AppRoute::Customers>
            <h1 class="text-2xl font-bold mb-6">"Customers"</h1>
            <ErrorBanner message=error_msg />

            <label class="input input-bordered flex items-center gap-2 mb-4 max-w-md">
                <Search attr:class="h-4 w-4 opacity-50" />
                <input
                    type="text"
                    class="grow"
                    placeholder="Search by name or email"
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                    prop:value=query
                />
            </label>

            <Show when=move || !loading.get() fallback=LoadingState>
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Name"</th>
                                        <th>"Email"</th>
                                        <th>"Phone"</th>
                                        <th class="text-right">"Orders"</th>
                                        <th class="text-right">"Returns"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || visible().is_empty()>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                "No customers found."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=visible
                                        key=|c| c.email.clone()
                                        children=move |customer: CustomerRecord| view! {
                                            <tr>
                                                <td class="font-semibold">{customer.name.clone()}</td>
                                                <td>{customer.email.clone()}</td>
                                                <td>{customer.phone.clone().unwrap_or_else(|| "-".to_string())}</td>
                                                <td class="text-right">{customer.total_orders}</td>
                                                <td class="text-right">{customer.total_returns}</td>
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

    #[test]
    fn search_is_case_insensitive() {
        let customers = vec![
            CustomerRecord {
                name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
                ..Default::default()
            },
            CustomerRecord {
                name: "Grace Hopper".into(),
                email: "grace@navy.mil".into(),
                ..Default::default()
            },
        ];
        assert_eq!(filter_customers(&customers, "ADA").len(), 1);
        assert_eq!(filter_customers(&customers, "navy").len(), 1);
        assert_eq!(filter_customers(&customers, "").len(), 2);
    }
}
