//! Route definitions and guard policy - domain model.
//!
//! Pure logic, no DOM or web_sys dependency: URL parsing, the per-route
//! access gate, and the guard decision table the router service executes.
//! Keeping the decision pure means the whole authorization matrix is
//! host-testable without a browser.

use std::fmt::Display;

/// Application routes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Merchant login (default and catch-all target).
    #[default]
    Login,
    Register,
    /// Onboarding wizard, step 1 of 3.
    StoreSetup,
    /// Wizard step 2: return policy.
    ReturnPolicy,
    /// Wizard step 3: branding.
    Branding,
    Dashboard,
    Orders,
    Products,
    Returns,
    Customers,
    Analytics,
    Settings,
    /// Public portal entry: find an order.
    PortalFind { store_url: String },
    /// Public portal: create a return request for a found order.
    PortalCreate { store_url: String, order_id: String },
    /// Public portal: submission confirmation.
    PortalSuccess { store_url: String, order_id: String },
    /// Public portal: track a return by id (shareable URL).
    PortalTrack { store_url: String, return_id: String },
    NotFound,
}

/// Access policy attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// No token needed (login, register, the whole customer portal).
    Public,
    /// Wizard pages: token required and the store must NOT be set up yet.
    SetupPending,
    /// Main-app pages: token required and the store must be set up.
    SetupComplete,
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Mount the route's view.
    Proceed,
    /// Navigate elsewhere instead; the requested view never mounts.
    Redirect(AppRoute),
    /// Token present but the remote `isStoreSetup` flag is needed before
    /// the gate can be resolved.
    NeedsProfile,
}

impl AppRoute {
    /// Parse a URL path into a route. Unknown paths become `NotFound`,
    /// which the guard redirects to login (the catch-all rule).
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] | ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["store-setup"] => Self::StoreSetup,
            ["return-policy-settings"] => Self::ReturnPolicy,
            ["branding-customization"] => Self::Branding,
            ["dashboard"] => Self::Dashboard,
            ["orders"] => Self::Orders,
            ["products"] => Self::Products,
            ["returns"] => Self::Returns,
            ["customers"] => Self::Customers,
            ["analytics"] => Self::Analytics,
            ["settings"] => Self::Settings,
            ["return", store] => Self::PortalFind {
                store_url: (*store).to_string(),
            },
            ["return", store, "order", order, "create"] => Self::PortalCreate {
                store_url: (*store).to_string(),
                order_id: (*order).to_string(),
            },
            ["return", store, "success", order] => Self::PortalSuccess {
                store_url: (*store).to_string(),
                order_id: (*order).to_string(),
            },
            ["return", store, "track", ret] => Self::PortalTrack {
                store_url: (*store).to_string(),
                return_id: (*ret).to_string(),
            },
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::StoreSetup => "/store-setup".to_string(),
            Self::ReturnPolicy => "/return-policy-settings".to_string(),
            Self::Branding => "/branding-customization".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Orders => "/orders".to_string(),
            Self::Products => "/products".to_string(),
            Self::Returns => "/returns".to_string(),
            Self::Customers => "/customers".to_string(),
            Self::Analytics => "/analytics".to_string(),
            Self::Settings => "/settings".to_string(),
            Self::PortalFind { store_url } => format!("/return/{store_url}"),
            Self::PortalCreate {
                store_url,
                order_id,
            } => format!("/return/{store_url}/order/{order_id}/create"),
            Self::PortalSuccess {
                store_url,
                order_id,
            } => format!("/return/{store_url}/success/{order_id}"),
            Self::PortalTrack {
                store_url,
                return_id,
            } => format!("/return/{store_url}/track/{return_id}"),
            Self::NotFound => "/login".to_string(),
        }
    }

    pub fn gate(&self) -> Gate {
        match self {
            Self::Login
            | Self::Register
            | Self::NotFound
            | Self::PortalFind { .. }
            | Self::PortalCreate { .. }
            | Self::PortalSuccess { .. }
            | Self::PortalTrack { .. } => Gate::Public,
            Self::StoreSetup | Self::ReturnPolicy | Self::Branding => Gate::SetupPending,
            Self::Dashboard
            | Self::Orders
            | Self::Products
            | Self::Returns
            | Self::Customers
            | Self::Analytics
            | Self::Settings => Gate::SetupComplete,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// First guard stage, synchronous: token presence.
///
/// A gated route without a token redirects straight to login - no profile
/// fetch is ever issued for an unauthenticated navigation. `NotFound`
/// redirects to login unconditionally.
pub fn decide(route: &AppRoute, has_token: bool) -> Decision {
    if *route == AppRoute::NotFound {
        return Decision::Redirect(AppRoute::Login);
    }
    match route.gate() {
        Gate::Public => Decision::Proceed,
        Gate::SetupPending | Gate::SetupComplete => {
            if has_token {
                Decision::NeedsProfile
            } else {
                Decision::Redirect(AppRoute::Login)
            }
        }
    }
}

/// Second guard stage, run once the remote `isStoreSetup` flag arrived.
///
/// The flag is re-fetched on every guarded navigation rather than cached:
/// the action that flips it (completing setup) happens on a different page
/// than the one being guarded.
pub fn resolve_profile(route: &AppRoute, is_store_setup: bool) -> Decision {
    match (route.gate(), is_store_setup) {
        // Setup already done: the wizard may not be revisited.
        (Gate::SetupPending, true) => Decision::Redirect(AppRoute::Dashboard),
        (Gate::SetupPending, false) => Decision::Proceed,
        (Gate::SetupComplete, true) => Decision::Proceed,
        // Main app before setup: back to the wizard.
        (Gate::SetupComplete, false) => Decision::Redirect(AppRoute::StoreSetup),
        (Gate::Public, _) => Decision::Proceed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        let routes = [
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::StoreSetup,
            AppRoute::ReturnPolicy,
            AppRoute::Branding,
            AppRoute::Dashboard,
            AppRoute::Orders,
            AppRoute::Products,
            AppRoute::Returns,
            AppRoute::Customers,
            AppRoute::Analytics,
            AppRoute::Settings,
            AppRoute::PortalFind {
                store_url: "mystore".into(),
            },
            AppRoute::PortalCreate {
                store_url: "mystore".into(),
                order_id: "ORD-1001".into(),
            },
            AppRoute::PortalSuccess {
                store_url: "mystore".into(),
                order_id: "ORD-1001".into(),
            },
            AppRoute::PortalTrack {
                store_url: "mystore".into(),
                return_id: "RET-77".into(),
            },
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn root_and_unknown_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path(""), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/bogus"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/return/mystore/extra"), AppRoute::NotFound);
    }

    #[test]
    fn unauthenticated_gated_routes_redirect_without_profile_fetch() {
        for route in [AppRoute::Dashboard, AppRoute::Orders, AppRoute::StoreSetup] {
            assert_eq!(decide(&route, false), Decision::Redirect(AppRoute::Login));
        }
    }

    #[test]
    fn public_routes_never_wait_on_a_profile() {
        let portal = AppRoute::PortalFind {
            store_url: "mystore".into(),
        };
        assert_eq!(decide(&portal, false), Decision::Proceed);
        assert_eq!(decide(&portal, true), Decision::Proceed);
        assert_eq!(decide(&AppRoute::Login, true), Decision::Proceed);
    }

    #[test]
    fn gated_routes_with_token_need_the_remote_flag() {
        assert_eq!(decide(&AppRoute::Dashboard, true), Decision::NeedsProfile);
        assert_eq!(decide(&AppRoute::StoreSetup, true), Decision::NeedsProfile);
    }

    #[test]
    fn completed_setup_locks_the_wizard() {
        assert_eq!(
            resolve_profile(&AppRoute::StoreSetup, true),
            Decision::Redirect(AppRoute::Dashboard)
        );
        assert_eq!(resolve_profile(&AppRoute::StoreSetup, false), Decision::Proceed);
    }

    #[test]
    fn incomplete_setup_locks_the_dashboard() {
        assert_eq!(
            resolve_profile(&AppRoute::Dashboard, false),
            Decision::Redirect(AppRoute::StoreSetup)
        );
        assert_eq!(resolve_profile(&AppRoute::Dashboard, true), Decision::Proceed);
    }

    #[test]
    fn not_found_is_routed_to_login() {
        assert_eq!(decide(&AppRoute::NotFound, true), Decision::Redirect(AppRoute::Login));
        assert_eq!(decide(&AppRoute::NotFound, false), Decision::Redirect(AppRoute::Login));
    }
}
