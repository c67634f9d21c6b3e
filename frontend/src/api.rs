//! HTTP client for the Backo REST API.
//!
//! One struct owns the base URL and the session; every endpoint is a
//! method returning `Result<T, ApiError>`. Response classification is a
//! pure function over (status, body) so the whole failure taxonomy is
//! host-testable without a browser.

use std::fmt::Display;

use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::{File, FormData};

use backo_shared::{
    AnalyticsData, BrandingUpdate, DashboardData, CustomerRecord, ErrorBody, FindOrderRequest,
    IntegrationStatus, LoginData, LoginRequest, MeData, NewReturn, Order, OrderStatusUpdate,
    Product, PublicOrder, PublicReturn, PublicStore, RegisterData, RegisterRequest,
    ReturnPolicyUpdate, ReturnRecord, ReturnSubmission, ShopifyConnectRequest, StoreProfile,
    StoreSettings, SyncResult, WooCommerceConnectRequest,
};

use crate::session::Session;

/// Compile-time override for the API origin; defaults to the local
/// development backend.
const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

// ============================================================================
// Errors
// ============================================================================

/// Failure taxonomy of an API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection,
    /// CORS rejection). The inner string is the transport detail.
    Network(String),
    /// Non-2xx with a JSON body: the server-provided message, verbatim
    /// when present, a per-endpoint fallback otherwise.
    Api { status: u16, message: String },
    /// A body that was not JSON at all, usually an HTML error page from
    /// a proxy or a dev server answering in the backend's place. The raw
    /// body is deliberately not carried.
    InvalidBody { status: u16 },
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(_) => write!(
                f,
                "Could not reach the server. Please check if the backend API is running."
            ),
            Self::Api { message, .. } => write!(f, "{message}"),
            Self::InvalidBody { status } => write!(
                f,
                "Server returned a non-JSON response (HTTP {status}). Check that the backend API is reachable."
            ),
        }
    }
}

impl ApiError {
    /// True when the server rejected the credential itself.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }
}

/// Classify a settled response.
///
/// 2xx bodies must parse as `T`; non-2xx bodies shaped `{message}` carry
/// the server message; anything unparsable becomes `InvalidBody` so raw
/// HTML never reaches the UI.
fn classify<T: DeserializeOwned>(
    status: u16,
    ok: bool,
    body: &str,
    fallback: &str,
) -> Result<T, ApiError> {
    if ok {
        return serde_json::from_str::<T>(body).map_err(|_| ApiError::InvalidBody { status });
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => Err(ApiError::Api {
            status,
            message: err.message.unwrap_or_else(|| fallback.to_string()),
        }),
        Err(_) => Err(ApiError::InvalidBody { status }),
    }
}

/// The Authorization header, present exactly when a token is stored.
fn auth_header(session: &Session) -> Option<(&'static str, String)> {
    session.bearer().map(|value| ("Authorization", value))
}

/// Every photo rides under this one repeated field name; the server reads
/// the files from it and ignores anything else.
const PHOTO_FIELD: &str = "photos";

/// Scalar multipart entries of a return submission, in wire order.
/// `customer` and `product` are JSON strings inside the form.
fn return_form_fields(
    submission: &ReturnSubmission,
) -> Result<Vec<(&'static str, String)>, ApiError> {
    let customer = serde_json::to_string(&submission.customer)
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let product = serde_json::to_string(&submission.product)
        .map_err(|e| ApiError::Network(e.to_string()))?;
    Ok(vec![
        ("orderId", submission.order_id.clone()),
        ("customer", customer),
        ("product", product),
        ("reason", submission.reason.clone()),
        ("preferredResolution", submission.preferred_resolution.clone()),
        ("amount", submission.amount.to_string()),
        ("notes", submission.notes.clone()),
    ])
}

// ============================================================================
// Client
// ============================================================================

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(session: Session) -> Self {
        let base = option_env!("BACKO_API_URL").unwrap_or(DEFAULT_BASE_URL);
        Self::with_base(base, session)
    }

    pub fn with_base(base_url: &str, session: Session) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match auth_header(&self.session) {
            Some((name, value)) => builder.header(name, &value),
            None => builder,
        }
    }

    async fn read<T: DeserializeOwned>(res: Response, fallback: &str) -> Result<T, ApiError> {
        let status = res.status();
        let ok = res.ok();
        let body = res
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        classify(status, ok, &body, fallback)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<T, ApiError> {
        let res = self
            .authed(Request::get(&self.url(path)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::read(res, fallback).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        builder: RequestBuilder,
        body: &B,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let res = self
            .authed(builder)
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::read(res, fallback).await
    }

    /// POST/PUT with no request body.
    async fn send_empty<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let res = self
            .authed(builder)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::read(res, fallback).await
    }

    async fn send_form<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        form: FormData,
        fallback: &str,
    ) -> Result<T, ApiError> {
        // No Content-Type here: the browser sets the multipart boundary.
        let res = self
            .authed(builder)
            .body(form)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::read(res, fallback).await
    }

    fn new_form() -> Result<FormData, ApiError> {
        FormData::new().map_err(|_| ApiError::Network("failed to build form data".to_string()))
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    pub async fn login(&self, req: &LoginRequest) -> Result<LoginData, ApiError> {
        self.send_json(Request::post(&self.url("/auth/login")), req, "Login failed")
            .await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<RegisterData, ApiError> {
        self.send_json(
            Request::post(&self.url("/auth/register")),
            req,
            "Registration failed",
        )
        .await
    }

    pub async fn me(&self) -> Result<MeData, ApiError> {
        self.get_json("/auth/me", "Failed to get user info").await
    }

    // ------------------------------------------------------------------
    // Store & onboarding
    // ------------------------------------------------------------------

    pub async fn setup_store(
        &self,
        store_name: &str,
        store_url: &str,
        logo: Option<&File>,
    ) -> Result<StoreProfile, ApiError> {
        let form = Self::new_form()?;
        let _ = form.append_with_str("storeName", store_name);
        let _ = form.append_with_str("storeUrl", store_url);
        if let Some(file) = logo {
            let _ = form.append_with_blob_and_filename("storeLogo", file, &file.name());
        }
        self.send_form(
            Request::post(&self.url("/store/setup")),
            form,
            "Store setup failed",
        )
        .await
    }

    pub async fn store(&self) -> Result<StoreProfile, ApiError> {
        self.get_json("/store", "Failed to get store info").await
    }

    pub async fn update_return_policy(&self, req: &ReturnPolicyUpdate) -> Result<StoreProfile, ApiError> {
        self.send_json(
            Request::put(&self.url("/store/return-policy")),
            req,
            "Failed to update return policy",
        )
        .await
    }

    pub async fn update_branding(&self, req: &BrandingUpdate) -> Result<StoreProfile, ApiError> {
        self.send_json(
            Request::put(&self.url("/store/branding")),
            req,
            "Failed to update branding",
        )
        .await
    }

    /// Public branding lookup by normalized store domain; no credential.
    pub async fn public_store(&self, domain: &str) -> Result<PublicStore, ApiError> {
        let encoded: String = js_sys::encode_uri_component(domain).into();
        self.get_json(&format!("/public/store/{encoded}"), "Failed to fetch store info")
            .await
    }

    // ------------------------------------------------------------------
    // Integrations
    // ------------------------------------------------------------------

    pub async fn connect_shopify(&self, req: &ShopifyConnectRequest) -> Result<IntegrationStatus, ApiError> {
        self.send_json(
            Request::post(&self.url("/store/shopify/connect")),
            req,
            "Failed to connect Shopify store",
        )
        .await
    }

    pub async fn shopify_status(&self) -> Result<IntegrationStatus, ApiError> {
        self.get_json("/store/shopify/status", "Failed to get Shopify status")
            .await
    }

    pub async fn connect_woocommerce(
        &self,
        req: &WooCommerceConnectRequest,
    ) -> Result<IntegrationStatus, ApiError> {
        self.send_json(
            Request::post(&self.url("/store/woocommerce/connect")),
            req,
            "Failed to connect WooCommerce store",
        )
        .await
    }

    pub async fn woocommerce_status(&self) -> Result<IntegrationStatus, ApiError> {
        self.get_json("/store/woocommerce/status", "Failed to get WooCommerce status")
            .await
    }

    pub async fn sync_orders(&self) -> Result<SyncResult, ApiError> {
        self.send_empty(Request::post(&self.url("/orders/sync")), "Failed to sync orders")
            .await
    }

    pub async fn sync_products(&self) -> Result<SyncResult, ApiError> {
        self.send_empty(
            Request::post(&self.url("/products/sync")),
            "Failed to sync products",
        )
        .await
    }

    // ------------------------------------------------------------------
    // Merchant data
    // ------------------------------------------------------------------

    pub async fn dashboard(&self) -> Result<DashboardData, ApiError> {
        self.get_json("/dashboard", "Failed to get dashboard data").await
    }

    pub async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get_json("/orders", "Failed to get orders").await
    }

    pub async fn update_order(
        &self,
        order_id: &str,
        update: &OrderStatusUpdate,
    ) -> Result<Order, ApiError> {
        self.send_json(
            Request::put(&self.url(&format!("/orders/{order_id}"))),
            update,
            "Failed to update order",
        )
        .await
    }

    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json("/products", "Failed to get products").await
    }

    pub async fn returns(&self) -> Result<Vec<ReturnRecord>, ApiError> {
        self.get_json("/returns", "Failed to get returns").await
    }

    pub async fn customers(&self) -> Result<Vec<CustomerRecord>, ApiError> {
        self.get_json("/customers", "Failed to get customers").await
    }

    pub async fn analytics(&self) -> Result<AnalyticsData, ApiError> {
        self.get_json("/analytics", "Failed to get analytics").await
    }

    pub async fn settings(&self) -> Result<StoreSettings, ApiError> {
        self.get_json("/settings", "Failed to get settings").await
    }

    /// Settings save goes out as multipart so a replacement logo can ride
    /// along; `refundMethods` is a JSON string field.
    pub async fn update_settings(
        &self,
        settings: &StoreSettings,
        logo: Option<&File>,
    ) -> Result<StoreSettings, ApiError> {
        let form = Self::new_form()?;
        let _ = form.append_with_str("returnWindow", &settings.return_window.to_string());
        let _ = form.append_with_str(
            "automaticApprovalThreshold",
            &settings.automatic_approval_threshold.to_string(),
        );
        let methods = serde_json::to_string(&settings.refund_methods)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let _ = form.append_with_str("refundMethods", &methods);
        let _ = form.append_with_str("primaryColor", &settings.primary_color);
        if let Some(file) = logo {
            let _ = form.append_with_blob_and_filename("storeLogo", file, &file.name());
        }
        self.send_form(
            Request::put(&self.url("/settings")),
            form,
            "Failed to update settings",
        )
        .await
    }

    // ------------------------------------------------------------------
    // Public return flow
    // ------------------------------------------------------------------

    pub async fn find_order(&self, req: &FindOrderRequest) -> Result<PublicOrder, ApiError> {
        self.send_json(
            Request::post(&self.url("/returns/public/orders/find")),
            req,
            "Failed to find order",
        )
        .await
    }

    pub async fn create_return(
        &self,
        store_url: &str,
        submission: &ReturnSubmission,
        photos: &[File],
    ) -> Result<NewReturn, ApiError> {
        let form = Self::new_form()?;
        for (name, value) in return_form_fields(submission)? {
            let _ = form.append_with_str(name, &value);
        }
        for photo in photos {
            let _ = form.append_with_blob_and_filename(PHOTO_FIELD, photo, &photo.name());
        }
        self.send_form(
            Request::post(&self.url(&format!("/returns/public/returns/{store_url}"))),
            form,
            "Failed to create return request",
        )
        .await
    }

    pub async fn public_return(
        &self,
        store_url: &str,
        return_id: &str,
    ) -> Result<PublicReturn, ApiError> {
        self.get_json(
            &format!("/returns/public/returns/{store_url}/{return_id}"),
            "Failed to get return details",
        )
        .await
    }
}

/// Fetch the API client from Context.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient not found in context. Ensure App provides it.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::MemoryTokens;
    use backo_shared::LoginData;

    #[test]
    fn ok_json_parses_payload() {
        let body = r#"{"token":"abc123","isStoreSetup":true}"#;
        let data: LoginData = classify(200, true, body, "Login failed").unwrap();
        assert_eq!(data.token, "abc123");
        assert!(data.is_store_setup);
    }

    #[test]
    fn server_message_is_surfaced_verbatim() {
        let body = r#"{"message":"Invalid email or password"}"#;
        let err = classify::<LoginData>(401, false, body, "Login failed").unwrap_err();
        assert_eq!(
            err,
            ApiError::Api {
                status: 401,
                message: "Invalid email or password".to_string()
            }
        );
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn missing_message_falls_back_per_endpoint() {
        let err = classify::<LoginData>(500, false, "{}", "Login failed").unwrap_err();
        assert_eq!(
            err,
            ApiError::Api {
                status: 500,
                message: "Login failed".to_string()
            }
        );
    }

    #[test]
    fn html_body_never_leaks_markup() {
        let html = "<!DOCTYPE html><html><body><h1>502 Bad Gateway</h1></body></html>";
        let err = classify::<LoginData>(502, false, html, "Login failed").unwrap_err();
        assert_eq!(err, ApiError::InvalidBody { status: 502 });
        let shown = err.to_string();
        assert!(!shown.is_empty());
        assert!(!shown.contains('<'));
    }

    #[test]
    fn ok_status_with_html_body_is_invalid() {
        let err =
            classify::<LoginData>(200, true, "<html>dev server</html>", "Login failed").unwrap_err();
        assert_eq!(err, ApiError::InvalidBody { status: 200 });
    }

    #[test]
    fn unauthorized_is_detected() {
        let err = ApiError::Api {
            status: 401,
            message: "Token expired".to_string(),
        };
        assert!(err.is_unauthorized());
        assert!(!ApiError::Network("dns".to_string()).is_unauthorized());
    }

    #[test]
    fn auth_header_present_exactly_when_token_stored() {
        let anon = Session::with_store(MemoryTokens::empty());
        assert_eq!(auth_header(&anon), None);

        let signed_in = Session::with_store(MemoryTokens::holding("tok-1"));
        assert_eq!(
            auth_header(&signed_in),
            Some(("Authorization", "Bearer tok-1".to_string()))
        );
    }

    #[test]
    fn return_form_uses_the_server_field_names() {
        let submission = ReturnSubmission {
            order_id: "ORD-1001".to_string(),
            customer: backo_shared::CustomerInfo {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone: None,
            },
            product: backo_shared::ReturnProduct {
                name: "Blue Sneakers".to_string(),
                price: 99.99,
                quantity: 1,
            },
            reason: "Wrong Size / Fit".to_string(),
            preferred_resolution: "refund".to_string(),
            amount: 99.99,
            notes: String::new(),
        };
        let fields = return_form_fields(&submission).unwrap();
        let names: Vec<&str> = fields.iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            [
                "orderId",
                "customer",
                "product",
                "reason",
                "preferredResolution",
                "amount",
                "notes"
            ]
        );
        // No per-index photo fields; files all share the one repeated name.
        assert_eq!(PHOTO_FIELD, "photos");
        assert!(fields.iter().all(|(n, _)| !n.starts_with("photo_")));

        let customer = &fields[1].1;
        assert!(customer.contains("\"jane@example.com\""));
        assert_eq!(fields[5].1, "99.99");
    }

    #[test]
    fn base_url_joins_paths() {
        let api = ApiClient::with_base("http://localhost:5000/api/", Session::with_store(MemoryTokens::empty()));
        assert_eq!(api.url("/orders"), "http://localhost:5000/api/orders");
        assert_eq!(api.url("orders"), "http://localhost:5000/api/orders");
    }
}
