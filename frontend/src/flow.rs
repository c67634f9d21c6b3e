//! Public return flow state.
//!
//! The find-order, create-request and success pages are separate routes
//! with no server-side session, so the order lookup result and the new
//! return's id cross pages through per-tab session storage. This module
//! owns that lifecycle: stash on lookup, read on the next page, clear on
//! successful submission. Absence on read is how the pages detect an
//! out-of-order entry and bounce back to the start.

use std::sync::Arc;

use backo_shared::{CustomerInfo, OrderItem, PublicOrder, ORDER_DATA_KEY, RETURN_ID_KEY};

use crate::web::storage::SessionStorage;

/// Per-tab string store. Seam over sessionStorage so the flow lifecycle
/// tests run on the host.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str);
}

/// sessionStorage-backed implementation.
pub struct TabSession;

impl KeyValueStore for TabSession {
    fn get(&self, key: &str) -> Option<String> {
        SessionStorage::get(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        SessionStorage::set(key, value)
    }

    fn remove(&self, key: &str) {
        SessionStorage::delete(key);
    }
}

#[derive(Clone)]
pub struct FlowStore {
    store: Arc<dyn KeyValueStore + Send + Sync>,
}

impl FlowStore {
    pub fn browser() -> Self {
        Self::with_store(Arc::new(TabSession))
    }

    pub fn with_store(store: Arc<dyn KeyValueStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Stash the looked-up order for the create-request page.
    pub fn stash_order(&self, order: &PublicOrder) {
        if let Ok(json) = serde_json::to_string(order) {
            self.store.set(ORDER_DATA_KEY, &json);
        }
    }

    /// Read the stashed order; `None` means the visitor skipped the
    /// lookup step.
    pub fn load_order(&self) -> Option<PublicOrder> {
        let json = self.store.get(ORDER_DATA_KEY)?;
        serde_json::from_str(&json).ok()
    }

    pub fn load_return_id(&self) -> Option<String> {
        self.store.get(RETURN_ID_KEY).filter(|id| !id.is_empty())
    }

    pub fn clear_return_id(&self) {
        self.store.remove(RETURN_ID_KEY);
    }

    /// Record a successful submission: the return id becomes readable for
    /// the success page and the consumed order is dropped.
    pub fn complete_submission(&self, return_id: &str) {
        self.store.set(RETURN_ID_KEY, return_id);
        self.store.remove(ORDER_DATA_KEY);
    }
}

/// Fetch the flow store from Context.
pub fn use_flow() -> FlowStore {
    leptos::prelude::use_context::<FlowStore>()
        .expect("FlowStore not found in context. Ensure App provides it.")
}

/// Placeholder order for working on the create-request page without a
/// backend. Compiled out of release builds, where a missing stash
/// redirects instead.
#[cfg(debug_assertions)]
pub fn dev_fixture_order() -> PublicOrder {
    PublicOrder {
        order_number: "ORD-1001".to_string(),
        order_date: Some("2026-01-05".to_string()),
        items: vec![
            OrderItem {
                product_name: "Blue Sneakers".to_string(),
                quantity: 1,
                price: 99.99,
            },
            OrderItem {
                product_name: "White T-Shirt".to_string(),
                quantity: 2,
                price: 45.0,
            },
        ],
        total: 189.99,
        customer: Some(CustomerInfo {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MemoryStore(Mutex<HashMap<String, String>>);

    impl MemoryStore {
        fn new() -> Arc<Self> {
            Arc::new(Self(Mutex::new(HashMap::new())))
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.lock().unwrap().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> bool {
            self.0.lock().unwrap().insert(key.to_string(), value.to_string());
            true
        }

        fn remove(&self, key: &str) {
            self.0.lock().unwrap().remove(key);
        }
    }

    fn sample_order() -> PublicOrder {
        PublicOrder {
            order_number: "ORD-2002".to_string(),
            total: 59.5,
            ..Default::default()
        }
    }

    #[test]
    fn order_round_trips_through_the_stash() {
        let flow = FlowStore::with_store(MemoryStore::new());
        assert!(flow.load_order().is_none());

        flow.stash_order(&sample_order());
        let loaded = flow.load_order().unwrap();
        assert_eq!(loaded.order_number, "ORD-2002");
        assert_eq!(loaded.total, 59.5);
    }

    #[test]
    fn submission_sets_return_id_and_consumes_the_order() {
        let flow = FlowStore::with_store(MemoryStore::new());
        flow.stash_order(&sample_order());

        flow.complete_submission("RET-77");
        assert_eq!(flow.load_return_id().as_deref(), Some("RET-77"));
        assert!(flow.load_order().is_none());
    }

    #[test]
    fn cleared_return_id_reads_as_absent() {
        let flow = FlowStore::with_store(MemoryStore::new());
        flow.complete_submission("RET-77");
        flow.clear_return_id();
        assert!(flow.load_return_id().is_none());
    }

    #[test]
    fn corrupt_stash_reads_as_absent() {
        let store = MemoryStore::new();
        store.set(ORDER_DATA_KEY, "{not json");
        let flow = FlowStore::with_store(store);
        assert!(flow.load_order().is_none());
    }
}
