//! # Checkout Request Types
//!
//! Typed records for the checkout acceptance gate. Instances are produced
//! by the schema validator and are immutable for the rest of the request.

use serde::{Deserialize, Serialize};

/// A US shipping address
///
/// String fields are stored with surrounding whitespace already trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// First street line
    pub line1: String,

    /// Second street line (apartment, suite)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,

    /// City name
    pub city: String,

    /// Two-letter state code (e.g. "NY")
    pub state: String,

    /// ZIP or ZIP+4 code
    pub zip: String,

    /// Country code, always "US"
    pub country: String,
}

/// A line item in a checkout request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stock keeping unit
    pub sku: String,

    /// Quantity ordered
    pub qty: u32,

    /// Unit price in cents
    pub price_cents: i64,
}

impl LineItem {
    /// Subtotal for this line, widened so the order sum cannot overflow
    pub fn subtotal_cents(&self) -> i128 {
        i128::from(self.qty) * i128::from(self.price_cents)
    }
}

/// A structurally valid checkout request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Line items, at least one
    pub items: Vec<LineItem>,

    /// Shipping address
    pub address: Address,

    /// Opaque payment token from the payment form
    pub payment_token: String,

    /// Declared order total in cents
    pub total_cents: i64,
}

impl CheckoutRequest {
    /// Recompute the order total from line-item subtotals
    pub fn computed_total_cents(&self) -> i128 {
        self.items.iter().map(LineItem::subtotal_cents).sum()
    }

    /// Total unit count across all items
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.qty).sum()
    }
}
