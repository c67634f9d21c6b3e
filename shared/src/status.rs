//! Return status and resolution domain types.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Coarse display bucket for the public track page's status badge.
///
/// The full lifecycle lives server-side; the portal only distinguishes
/// "not looked at yet", "moving", and "done".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBucket {
    Pending,
    InProgress,
    Completed,
}

impl StatusBucket {
    pub fn from_status(status: &str) -> Self {
        match status {
            "Pending Approval" => Self::Pending,
            "Completed" => Self::Completed,
            _ => Self::InProgress,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

/// Merchant-side filter tabs on the returns table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnFilter {
    #[default]
    Open,
    AwaitingReceipt,
    Inspection,
    RefundPending,
    Closed,
}

impl ReturnFilter {
    pub const ALL: [ReturnFilter; 5] = [
        Self::Open,
        Self::AwaitingReceipt,
        Self::Inspection,
        Self::RefundPending,
        Self::Closed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::AwaitingReceipt => "Awaiting Receipt",
            Self::Inspection => "Inspection",
            Self::RefundPending => "Refund Pending",
            Self::Closed => "Closed",
        }
    }

    /// Whether a server status string falls under this tab.
    pub fn matches(&self, status: &str) -> bool {
        match self {
            Self::Open => matches!(status, "Pending Approval" | "Awaiting Receipt"),
            Self::AwaitingReceipt => status == "Awaiting Receipt",
            Self::Inspection => status == "In Inspection",
            Self::RefundPending => status == "Refund Pending",
            Self::Closed => matches!(status, "Completed" | "Rejected"),
        }
    }
}

/// Resolution the customer asks for; wire strings match the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resolution {
    #[default]
    #[serde(rename = "refund")]
    Refund,
    #[serde(rename = "exchange")]
    Exchange,
    #[serde(rename = "store-credit")]
    StoreCredit,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Refund => "refund",
            Self::Exchange => "exchange",
            Self::StoreCredit => "store-credit",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Refund => "Refund",
            Self::Exchange => "Exchange",
            Self::StoreCredit => "Store Credit",
        }
    }

    /// Display name for an arbitrary wire value, e.g. on the track page.
    pub fn display_for(wire: &str) -> &'static str {
        match wire {
            "refund" => "Refund",
            "exchange" => "Exchange",
            _ => "Store Credit",
        }
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons offered on the public create-request form.
pub const RETURN_REASONS: [&str; 6] = [
    "Wrong Size",
    "Defective / Damaged",
    "Not as Described",
    "Changed Mind",
    "Received Wrong Item",
    "Other",
];

/// Statuses a merchant can move an order to.
pub const ORDER_STATUSES: [&str; 5] =
    ["Pending", "Processing", "In Transit", "Delivered", "Cancelled"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_mapping_is_coarse() {
        assert_eq!(StatusBucket::from_status("Pending Approval"), StatusBucket::Pending);
        assert_eq!(StatusBucket::from_status("Completed"), StatusBucket::Completed);
        // Everything else is in progress, including unknown statuses.
        assert_eq!(StatusBucket::from_status("Awaiting Receipt"), StatusBucket::InProgress);
        assert_eq!(StatusBucket::from_status("In Inspection"), StatusBucket::InProgress);
        assert_eq!(StatusBucket::from_status("Refund Pending"), StatusBucket::InProgress);
        assert_eq!(StatusBucket::from_status("garbage"), StatusBucket::InProgress);
    }

    #[test]
    fn open_tab_covers_pending_and_awaiting() {
        assert!(ReturnFilter::Open.matches("Pending Approval"));
        assert!(ReturnFilter::Open.matches("Awaiting Receipt"));
        assert!(!ReturnFilter::Open.matches("Completed"));
        assert!(ReturnFilter::Closed.matches("Rejected"));
        assert!(ReturnFilter::Closed.matches("Completed"));
        assert!(!ReturnFilter::Closed.matches("In Inspection"));
    }

    #[test]
    fn resolution_wire_strings() {
        assert_eq!(serde_json::to_string(&Resolution::StoreCredit).unwrap(), "\"store-credit\"");
        assert_eq!(Resolution::display_for("exchange"), "Exchange");
        assert_eq!(Resolution::display_for("unknown"), "Store Credit");
    }
}
