//! Backo frontend application.
//!
//! Context-driven architecture with high cohesion and low coupling:
//! - `web::route`: route definitions and guard policy (domain model)
//! - `web::router`: router service (core engine)
//! - `session`: merchant credential management
//! - `api`: REST client
//! - `flow`: public return flow state
//! - `components`: UI component layer

mod api;
mod flow;
mod session;

mod components {
    pub mod analytics;
    pub mod branding;
    pub mod customers;
    pub mod dashboard;
    mod icons;
    mod layout;
    pub mod login;
    pub mod orders;
    pub mod portal;
    pub mod products;
    pub mod register;
    pub mod return_policy;
    pub mod returns;
    pub mod settings;
    pub mod store_setup;
}

// Browser platform layer. Everything that touches window/history lives
// under here.
pub(crate) mod web {
    pub mod route;
    pub mod router;
    pub mod storage;

    pub use storage::LocalStorage;
}

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::components::analytics::AnalyticsPage;
use crate::components::branding::BrandingPage;
use crate::components::customers::CustomersPage;
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::orders::OrdersPage;
use crate::components::portal::create_request::CreateRequestPage;
use crate::components::portal::find_order::FindOrderPage;
use crate::components::portal::success::ReturnSuccessPage;
use crate::components::portal::track::TrackReturnPage;
use crate::components::products::ProductsPage;
use crate::components::register::RegisterPage;
use crate::components::return_policy::ReturnPolicyPage;
use crate::components::returns::ReturnsPage;
use crate::components::settings::SettingsPage;
use crate::components::store_setup::StoreSetupPage;
use crate::flow::FlowStore;
use crate::session::Session;
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

/// Route matcher: maps a committed route to its view.
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::StoreSetup => view! { <StoreSetupPage /> }.into_any(),
        AppRoute::ReturnPolicy => view! { <ReturnPolicyPage /> }.into_any(),
        AppRoute::Branding => view! { <BrandingPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Orders => view! { <OrdersPage /> }.into_any(),
        AppRoute::Products => view! { <ProductsPage /> }.into_any(),
        AppRoute::Returns => view! { <ReturnsPage /> }.into_any(),
        AppRoute::Customers => view! { <CustomersPage /> }.into_any(),
        AppRoute::Analytics => view! { <AnalyticsPage /> }.into_any(),
        AppRoute::Settings => view! { <SettingsPage /> }.into_any(),
        AppRoute::PortalFind { store_url } => {
            view! { <FindOrderPage store_url=store_url /> }.into_any()
        }
        AppRoute::PortalCreate {
            store_url,
            order_id,
        } => view! { <CreateRequestPage store_url=store_url order_id=order_id /> }.into_any(),
        AppRoute::PortalSuccess { store_url, .. } => {
            view! { <ReturnSuccessPage store_url=store_url /> }.into_any()
        }
        AppRoute::PortalTrack {
            store_url,
            return_id,
        } => view! { <TrackReturnPage store_url=store_url return_id=return_id /> }.into_any(),
        // The guard rewrites NotFound before it ever commits; kept for
        // exhaustiveness.
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. Session context: the credential everything else reads.
    let session = Session::browser();
    provide_context(session.clone());

    // 2. API client bound to that session.
    provide_context(ApiClient::new(session));

    // 3. Per-tab state for the public return flow.
    provide_context(FlowStore::browser());

    view! {
        // 4. Router: resolves the guard before any view mounts.
        <Router>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
