//! Merchant app shell: sidebar navigation plus the page content area.

use leptos::prelude::*;

use crate::api::ApiError;
use crate::components::icons::*;
use crate::session::{use_session, Session};
use crate::web::route::AppRoute;
use crate::web::router::{use_router, RouterService};

/// Surface a merchant-page fetch failure. A 401 means the stored
/// credential is no longer accepted: drop it and return to login
/// instead of leaving a dead page behind a banner.
pub fn surface_fetch_error(
    err: ApiError,
    set_error: WriteSignal<Option<String>>,
    session: &Session,
    router: &RouterService,
) {
    if err.is_unauthorized() {
        session.clear();
        router.replace(AppRoute::Login);
        return;
    }
    set_error.set(Some(err.to_string()));
}

fn nav_items() -> [(AppRoute, &'static str); 7] {
    [
        (AppRoute::Dashboard, "Dashboard"),
        (AppRoute::Orders, "Orders"),
        (AppRoute::Products, "Products"),
        (AppRoute::Returns, "Returns"),
        (AppRoute::Customers, "Customers"),
        (AppRoute::Analytics, "Analytics"),
        (AppRoute::Settings, "Settings"),
    ]
}

fn nav_icon(route: &AppRoute) -> AnyView {
    match route {
        AppRoute::Orders => view! { <ShoppingCart attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Products => view! { <Box attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Returns => view! { <RotateCcw attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Customers => view! { <Users attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Analytics => view! { <BarChart3 attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Settings => view! { <Cog attr:class="h-5 w-5" /> }.into_any(),
        _ => view! { <LayoutDashboard attr:class="h-5 w-5" /> }.into_any(),
    }
}

/// Sidebar plus content shell wrapping every merchant page.
#[component]
pub fn Shell(active: AppRoute, children: Children) -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let on_logout = {
        let router = router.clone();
        move |_| {
            session.clear();
            router.replace(AppRoute::Login);
        }
    };

    view! {
        <div class="flex min-h-screen bg-base-200">
            <aside class="w-64 bg-base-100 shadow-xl flex flex-col shrink-0">
                <div class="flex items-center gap-2 p-6">
                    <Package attr:class="h-8 w-8 text-primary" />
                    <span class="text-2xl font-bold">"Backo"</span>
                </div>
                <ul class="menu px-4 gap-1 flex-1">
                    {nav_items()
                        .into_iter()
                        .map(|(route, label)| {
                            let router = router.clone();
                            let is_active = route == active;
                            let target = route.clone();
                            view! {
                                <li>
                                    <a
                                        class=if is_active { "active font-semibold" } else { "" }
                                        on:click=move |_| router.navigate_route(target.clone())
                                    >
                                        {nav_icon(&route)}
                                        {label}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <div class="p-4">
                    <button on:click=on_logout class="btn btn-ghost w-full justify-start gap-2 text-error">
                        <LogOut attr:class="h-5 w-5" /> "Log out"
                    </button>
                </div>
            </aside>
            <main class="flex-1 p-4 md:p-8 overflow-x-auto">{children()}</main>
        </div>
    }
}

/// daisyUI badge class for a return status string.
pub fn status_badge_class(status: &str) -> &'static str {
    use backo_shared::StatusBucket;
    match StatusBucket::from_status(status) {
        StatusBucket::Pending => "badge badge-warning badge-outline",
        StatusBucket::InProgress => "badge badge-info badge-outline",
        StatusBucket::Completed => "badge badge-success badge-outline",
    }
}

/// Error banner shown above page content when a fetch or mutation fails.
#[component]
pub fn ErrorBanner(message: ReadSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div role="alert" class="alert alert-error mb-4">
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

/// Centered spinner used while a page's first fetch is in flight.
#[component]
pub fn LoadingState() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-16">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}
