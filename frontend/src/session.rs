//! Merchant session handling.
//!
//! The bearer token lives in persistent browser storage, but call sites never
//! touch the storage key directly: everything goes through a [`Session`]
//! handle backed by a [`TokenStore`]. Tests substitute an in-memory store,
//! the app injects the localStorage-backed one at startup.
//!
//! Lifecycle: written after login/register succeed, read by the API client
//! and the router guards, removed on logout or when a guarded profile fetch
//! fails (token treated as invalid, no silent renewal).

use std::sync::Arc;

use backo_shared::TOKEN_KEY;
use leptos::prelude::*;

use crate::web::LocalStorage;

/// Storage seam for the single credential string.
pub trait TokenStore {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn remove(&self);
}

/// Production store: one localStorage key.
pub struct BrowserTokens;

impl TokenStore for BrowserTokens {
    fn get(&self) -> Option<String> {
        LocalStorage::get(TOKEN_KEY)
    }

    fn set(&self, token: &str) {
        LocalStorage::set(TOKEN_KEY, token);
    }

    fn remove(&self) {
        LocalStorage::delete(TOKEN_KEY);
    }
}

/// Cheap cloneable session handle, passed to the API client and the router.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore + Send + Sync>,
}

impl Session {
    pub fn browser() -> Self {
        Self::with_store(Arc::new(BrowserTokens))
    }

    pub fn with_store(store: Arc<dyn TokenStore + Send + Sync>) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Option<String> {
        self.store.get().filter(|t| !t.is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// Value for the `Authorization` header, absent when logged out.
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {t}"))
    }

    pub fn set_token(&self, token: &str) {
        self.store.set(token);
    }

    pub fn clear(&self) {
        self.store.remove();
    }
}

/// Fetch the session handle from the Leptos context.
pub fn use_session() -> Session {
    use_context::<Session>().expect("Session should be provided at the app root")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// In-memory token store for host tests.
    pub(crate) struct MemoryTokens(pub Mutex<Option<String>>);

    impl MemoryTokens {
        pub(crate) fn empty() -> Arc<Self> {
            Arc::new(Self(Mutex::new(None)))
        }

        pub(crate) fn holding(token: &str) -> Arc<Self> {
            Arc::new(Self(Mutex::new(Some(token.to_string()))))
        }
    }

    impl TokenStore for MemoryTokens {
        fn get(&self) -> Option<String> {
            self.0.lock().unwrap().clone()
        }

        fn set(&self, token: &str) {
            *self.0.lock().unwrap() = Some(token.to_string());
        }

        fn remove(&self) {
            *self.0.lock().unwrap() = None;
        }
    }

    #[test]
    fn bearer_absent_without_token() {
        let session = Session::with_store(MemoryTokens::empty());
        assert!(!session.has_token());
        assert_eq!(session.bearer(), None);
    }

    #[test]
    fn bearer_formats_stored_token() {
        let session = Session::with_store(MemoryTokens::holding("abc"));
        assert_eq!(session.bearer().as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn empty_string_counts_as_logged_out() {
        let session = Session::with_store(MemoryTokens::holding(""));
        assert!(!session.has_token());
    }

    #[test]
    fn clear_removes_credential() {
        let store = MemoryTokens::holding("abc");
        let session = Session::with_store(store.clone());
        session.clear();
        assert!(store.0.lock().unwrap().is_none());
        assert!(!session.has_token());
    }
}
