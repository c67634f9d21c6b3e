//! Router service - core engine.
//!
//! Wraps the web_sys History API with high cohesion: every touch of
//! window.history lives in this module. Navigation follows a
//! "request -> guard -> resolve -> commit" flow, and the committed route
//! signal only ever holds a route the guard allowed. Views are
//! constructed after the decision, never before it, so a denied
//! navigation paints nothing.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;

use super::route::{decide, resolve_profile, AppRoute, Decision};
use crate::api::ApiClient;
use crate::session::Session;

/// Read the current browser path.
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Used for redirects so the denied URL never lands in history.
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Router service.
///
/// Drives the UI through a signal holding the committed route. `None`
/// means a guard decision is still in flight and the outlet stays blank.
#[derive(Clone)]
pub struct RouterService {
    current_route: ReadSignal<Option<AppRoute>>,
    set_route: WriteSignal<Option<AppRoute>>,
    session: Session,
    api: ApiClient,
}

impl RouterService {
    fn new(session: Session, api: ApiClient) -> Self {
        let (current_route, set_route) = signal(None);
        Self {
            current_route,
            set_route,
            session,
            api,
        }
    }

    pub fn current_route(&self) -> ReadSignal<Option<AppRoute>> {
        self.current_route
    }

    /// Navigate to a path (pushState).
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    /// Navigate to a route value (pushState).
    pub fn navigate_route(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// Replace the current entry, used by guards and post-login hops.
    pub fn replace(&self, route: AppRoute) {
        self.navigate_to_route(route, false);
    }

    /// **Core method: navigation with guards.**
    ///
    /// Synchronous gates commit immediately. Routes whose gate depends
    /// on the remote setup flag commit only after the profile round
    /// trip settles; a failed round trip drops the token and lands on
    /// login.
    fn navigate_to_route(&self, target: AppRoute, use_push: bool) {
        match decide(&target, self.session.has_token()) {
            Decision::Proceed => self.commit(target, use_push),
            Decision::Redirect(redirect) => {
                web_sys::console::log_1(
                    &format!("[Router] Access denied for {target}. Redirecting.").into(),
                );
                self.commit(redirect, false);
            }
            Decision::NeedsProfile => {
                let this = self.clone();
                spawn_local(async move {
                    match this.api.me().await {
                        Ok(me) => match resolve_profile(&target, me.is_store_setup) {
                            Decision::Redirect(redirect) => this.commit(redirect, false),
                            _ => this.commit(target, use_push),
                        },
                        Err(err) => {
                            web_sys::console::log_1(
                                &format!("[Router] Profile check failed: {err}").into(),
                            );
                            this.session.clear();
                            this.commit(AppRoute::Login, false);
                        }
                    }
                });
            }
        }
    }

    /// Write history and publish the route to the outlet.
    fn commit(&self, route: AppRoute, use_push: bool) {
        let path = route.to_path();
        if use_push {
            push_history_state(&path);
        } else {
            replace_history_state(&path);
        }
        self.set_route.set(Some(route));
    }

    /// Resolve the landing route on first load.
    ///
    /// A token holder arriving at the bare origin is taken to wherever
    /// their setup state points; everyone else goes through the normal
    /// guard for whatever URL they typed.
    fn init_current(&self) {
        let path = current_path();
        if path == "/" && self.session.has_token() {
            let this = self.clone();
            spawn_local(async move {
                match this.api.me().await {
                    Ok(me) if me.is_store_setup => this.commit(AppRoute::Dashboard, false),
                    Ok(_) => this.commit(AppRoute::StoreSetup, false),
                    Err(_) => {
                        this.session.clear();
                        this.commit(AppRoute::Login, false);
                    }
                }
            });
            return;
        }
        self.navigate_to_route(AppRoute::from_path(&path), false);
    }

    /// Listen for the browser back/forward buttons.
    fn init_popstate_listener(&self) {
        let this = self.clone();

        let closure = Closure::<dyn Fn()>::new(move || {
            // popstate re-runs the guard; history already moved, so a
            // denied target is replaced rather than pushed.
            this.navigate_to_route(AppRoute::from_path(&current_path()), false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Leak the closure to keep the listener alive.
        closure.forget();
    }
}

/// Provide the router service to Context and initialize it.
fn provide_router(session: Session, api: ApiClient) -> RouterService {
    let router = RouterService::new(session, api);

    router.init_popstate_listener();
    router.init_current();

    provide_context(router.clone());
    router
}

/// Fetch the router service from Context.
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI components
// ============================================================================

/// Router root component. Provides the routing context, use at the App root.
#[component]
pub fn Router(children: Children) -> impl IntoView {
    let session = crate::session::use_session();
    let api = crate::api::use_api();
    provide_router(session, api);

    children()
}

/// Router outlet component.
///
/// Renders the view matching the committed route. While a guard decision
/// is pending the outlet renders nothing, so protected content never
/// flashes before a redirect.
#[component]
pub fn RouterOutlet(
    /// Route matcher: receives the committed route, returns its view.
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        router
            .current_route()
            .get()
            .map(|route| matcher(route))
    }
}
