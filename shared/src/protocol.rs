//! Request and response bodies for the Backo REST API.
//!
//! Field names are camelCase on the wire (the backend is an Express app);
//! every struct carries `rename_all` so the Rust side stays snake_case.
//! Optional fields default rather than fail: list payloads are read-mostly
//! copies and the client renders whatever subset the server sent.

use serde::{Deserialize, Serialize};

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub token: String,
    #[serde(default)]
    pub is_store_setup: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeData {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_store_setup: bool,
}

// =========================================================
// Store profile & onboarding
// =========================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreProfile {
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub store_url: String,
    #[serde(default)]
    pub store_logo: Option<String>,
    #[serde(default)]
    pub is_store_setup: bool,
    #[serde(default)]
    pub primary_color: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundMethods {
    pub bank_transfer: bool,
    pub digital_wallet: bool,
    pub store_credit: bool,
}

impl RefundMethods {
    /// At least one refund method must stay enabled.
    pub fn any_enabled(&self) -> bool {
        self.bank_transfer || self.digital_wallet || self.store_credit
    }
}

impl Default for RefundMethods {
    fn default() -> Self {
        Self {
            bank_transfer: true,
            digital_wallet: true,
            store_credit: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnPolicyUpdate {
    pub return_window: i32,
    pub refund_methods: RefundMethods,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingUpdate {
    pub primary_color: String,
}

/// Branding payload shown on the public portal, fetched by domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStore {
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub store_logo: Option<String>,
    #[serde(default)]
    pub primary_color: Option<String>,
}

// =========================================================
// Commerce-platform integrations
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyConnectRequest {
    pub shop_domain: String,
    pub access_token: String,
    pub api_key: String,
    pub api_secret_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WooCommerceConnectRequest {
    pub store_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationStatus {
    #[serde(default)]
    pub is_connected: bool,
    #[serde(default)]
    pub shop_domain: Option<String>,
    #[serde(default)]
    pub store_url: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
}

/// Result summary of an order or product sync run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    #[serde(default)]
    pub synced: u32,
    #[serde(default)]
    pub skipped: u32,
}

// =========================================================
// Records (read-mostly lists)
// =========================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub product_name: String,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
}

fn one() -> u32 {
    1
}

impl OrderItem {
    /// Label used by item selectors: `Blue Sneakers (x2)` for multi-quantity.
    pub fn display_label(&self) -> String {
        if self.quantity > 1 {
            format!("{} (x{})", self.product_name, self.quantity)
        } else {
            self.product_name.clone()
        }
    }

    /// Refund amount for a return of this line item. Per-unit price,
    /// not price times quantity: the server refunds one unit per request.
    pub fn refund_amount(&self) -> f64 {
        self.price
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub customer: CustomerInfo,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub placed_date: Option<String>,
    #[serde(default)]
    pub delivered_date: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub shipping_address: Option<Address>,
    #[serde(default)]
    pub billing_address: Option<Address>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub total_returns: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnProduct {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "one")]
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRecord {
    #[serde(default)]
    pub return_id: String,
    #[serde(default)]
    pub customer: CustomerInfo,
    #[serde(default)]
    pub product: ReturnProduct,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub preferred_resolution: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub date: Option<String>,
}

// =========================================================
// Dashboard & analytics
// =========================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    #[serde(default)]
    pub open_returns: u32,
    #[serde(default)]
    pub avg_refund_time: String,
    #[serde(default)]
    pub return_rate: String,
    #[serde(default)]
    pub urgent_actions: u32,
}

/// One point on the 30-day returns line chart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub value: f64,
}

/// One slice of a distribution pie (`value` is a percentage).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSlice {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestReturn {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub status_color: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub amount: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(default)]
    pub metrics: DashboardMetrics,
    #[serde(default)]
    pub returns_chart: Vec<ChartPoint>,
    #[serde(default)]
    pub return_reasons: Vec<DistributionSlice>,
    #[serde(default)]
    pub latest_returns: Vec<LatestReturn>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricChanges {
    #[serde(default)]
    pub total_returns: f64,
    #[serde(default)]
    pub approval_rate: f64,
    #[serde(default)]
    pub avg_processing_time: f64,
    #[serde(default)]
    pub refund_amount: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsMetrics {
    #[serde(default)]
    pub total_returns: u32,
    #[serde(default)]
    pub approval_rate: f64,
    #[serde(default)]
    pub avg_processing_time: f64,
    #[serde(default)]
    pub refund_amount: f64,
    #[serde(default)]
    pub changes: MetricChanges,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasonCount {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalPoint {
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub approved: u32,
    #[serde(default)]
    pub rejected: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    #[serde(default)]
    pub metrics: AnalyticsMetrics,
    #[serde(default)]
    pub return_rate_trend: Vec<TrendPoint>,
    #[serde(default)]
    pub return_reasons_count: Vec<ReasonCount>,
    #[serde(default)]
    pub return_reasons_distribution: Vec<DistributionSlice>,
    #[serde(default)]
    pub resolution_methods: Vec<DistributionSlice>,
    #[serde(default)]
    pub approval_vs_rejection: Vec<ApprovalPoint>,
}

// =========================================================
// Settings
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    #[serde(default = "default_return_window")]
    pub return_window: i32,
    #[serde(default)]
    pub automatic_approval_threshold: f64,
    #[serde(default)]
    pub refund_methods: RefundMethods,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default)]
    pub store_logo: Option<String>,
}

fn default_return_window() -> i32 {
    30
}

fn default_primary_color() -> String {
    "#FF7F14".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            return_window: default_return_window(),
            automatic_approval_threshold: 0.0,
            refund_methods: RefundMethods::default(),
            primary_color: default_primary_color(),
            store_logo: None,
        }
    }
}

// =========================================================
// Public return flow
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindOrderRequest {
    pub order_id: String,
    pub email_or_phone: String,
    pub store_url: String,
}

/// Order payload returned by the public lookup and handed across pages
/// through sessionStorage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicOrder {
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub customer: Option<CustomerInfo>,
}

/// Fields of a public return request. Sent as multipart form data with
/// `customer` and `product` serialized to JSON strings and every photo
/// attached under the repeated `photos` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnSubmission {
    pub order_id: String,
    pub customer: CustomerInfo,
    pub product: ReturnProduct,
    pub reason: String,
    pub preferred_resolution: String,
    pub amount: f64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReturn {
    pub return_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    #[serde(default)]
    pub step: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicReturn {
    #[serde(default)]
    pub return_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub product: Option<ReturnProduct>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub preferred_resolution: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub return_address: Option<String>,
    #[serde(default)]
    pub refund_method: Option<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_deserializes_backend_shape() {
        let json = r#"{
            "_id": "65ab",
            "orderNumber": "ORD-1001",
            "customer": { "name": "Ada", "email": "a@b.com" },
            "amount": 189.99,
            "status": "Delivered",
            "paymentMethod": "Credit Card",
            "items": [
                { "productName": "Blue Sneakers", "quantity": 1, "price": 99.99 },
                { "productName": "White T-Shirt", "quantity": 2, "price": 45.00 }
            ]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, "65ab");
        assert_eq!(order.order_number, "ORD-1001");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[1].quantity, 2);
        assert!(order.placed_date.is_none());
    }

    #[test]
    fn item_display_label_marks_quantity() {
        let single = OrderItem {
            product_name: "Blue Sneakers".into(),
            quantity: 1,
            price: 99.99,
        };
        let multi = OrderItem {
            product_name: "White T-Shirt".into(),
            quantity: 2,
            price: 45.0,
        };
        assert_eq!(single.display_label(), "Blue Sneakers");
        assert_eq!(multi.display_label(), "White T-Shirt (x2)");
    }

    #[test]
    fn refund_amount_is_per_unit() {
        let multi = OrderItem {
            product_name: "White T-Shirt".into(),
            quantity: 3,
            price: 45.0,
        };
        assert_eq!(multi.refund_amount(), 45.0);
    }

    #[test]
    fn refund_methods_require_at_least_one() {
        let none = RefundMethods {
            bank_transfer: false,
            digital_wallet: false,
            store_credit: false,
        };
        assert!(!none.any_enabled());
        assert!(RefundMethods::default().any_enabled());
    }

    #[test]
    fn find_order_request_uses_camel_case() {
        let req = FindOrderRequest {
            order_id: "ORD-1001".into(),
            email_or_phone: "a@b.com".into(),
            store_url: "mystore".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"orderId\""));
        assert!(json.contains("\"emailOrPhone\""));
        assert!(json.contains("\"storeUrl\""));
    }
}
