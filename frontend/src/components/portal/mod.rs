//! Public customer-facing return portal.
//!
//! Four sequential pages: find the order, create the request, confirm,
//! track. No merchant credential is ever required here; state crosses
//! pages through [`crate::flow::FlowStore`].

pub mod create_request;
pub mod find_order;
pub mod success;
pub mod track;

use backo_shared::PublicStore;
use leptos::prelude::*;

/// Shared portal header: store logo or name, tinted with the merchant's
/// primary color when branding resolved.
#[component]
pub fn PortalHeader(store: ReadSignal<Option<PublicStore>>) -> impl IntoView {
    view! {
        <div class="text-center mb-8">
            {move || match store.get() {
                Some(info) => view! {
                    <div class="flex flex-col items-center gap-3">
                        {info.store_logo.clone().map(|src| view! {
                            <img src=src alt=info.store_name.clone() class="h-16 object-contain" />
                        })}
                        <h1 class="text-3xl font-bold">{info.store_name.clone()}</h1>
                        <p class="text-base-content/70">"Returns & exchanges"</p>
                    </div>
                }
                .into_any(),
                None => view! {
                    <h1 class="text-3xl font-bold">"Returns & exchanges"</h1>
                }
                .into_any(),
            }}
        </div>
    }
}

/// Inline style for portal action buttons, using the merchant's primary
/// color when known.
pub fn accent_style(store: &Option<PublicStore>) -> String {
    match store
        .as_ref()
        .and_then(|s| s.primary_color.as_deref())
    {
        Some(color) => format!("background-color: {color}; border-color: {color}; color: white"),
        None => String::new(),
    }
}
