//! Backo shared protocol crate.
//!
//! Wire types exchanged with the Backo REST API plus the pure domain helpers
//! the frontend needs (client-side validation, status bucketing, date
//! formatting). Nothing in here touches the DOM, so every module is testable
//! on the host.

use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;
pub mod status;
pub mod validate;

pub use protocol::*;
pub use status::{Resolution, ReturnFilter, StatusBucket, ORDER_STATUSES, RETURN_REASONS};

// =========================================================
// Constants
// =========================================================

/// localStorage key holding the merchant bearer token.
pub const TOKEN_KEY: &str = "token";
/// sessionStorage key bridging the find-order and create-request pages.
pub const ORDER_DATA_KEY: &str = "orderData";
/// sessionStorage key bridging the create-request and success pages.
pub const RETURN_ID_KEY: &str = "returnId";

/// Photo attachment cap on a public return request.
pub const MAX_RETURN_PHOTOS: usize = 5;
/// Store logo upload cap in bytes (2 MiB).
pub const MAX_LOGO_BYTES: f64 = 2.0 * 1024.0 * 1024.0;

/// Return-window bounds in days.
pub const RETURN_WINDOW_MIN: i32 = 1;
pub const RETURN_WINDOW_MAX: i32 = 365;

// =========================================================
// Error body
// =========================================================

/// Non-2xx responses carry `{ message }`; successful responses are the
/// payload itself with no wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Normalize a store URL or domain for the public-store lookup:
/// strip the scheme and a leading `www.`, drop any path.
pub fn normalize_store_domain(input: &str) -> String {
    let s = input.trim();
    let s = s
        .strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"))
        .unwrap_or(s);
    let s = s.strip_prefix("www.").unwrap_or(s);
    match s.split_once('/') {
        Some((host, _)) => host.to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_scheme_and_www() {
        assert_eq!(normalize_store_domain("https://www.mystore.com"), "mystore.com");
        assert_eq!(normalize_store_domain("http://mystore.com/shop"), "mystore.com");
        assert_eq!(normalize_store_domain("www.mystore.com"), "mystore.com");
        assert_eq!(normalize_store_domain("mystore"), "mystore");
        assert_eq!(normalize_store_domain("  mystore.com  "), "mystore.com");
    }

    #[test]
    fn error_body_tolerates_missing_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"message":"Order not found"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Order not found"));

        let body: ErrorBody = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.message.is_none());
    }
}
