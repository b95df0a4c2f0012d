//! # Cart Types
//!
//! Wire-level cart items, validation, and the derived line items sent to
//! the payment provider. Validation happens here, before any remote call.

use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
            Currency::JPY => "jpy",
            Currency::CAD => "cad",
            Currency::AUD => "aud",
        }
    }

    /// Parse a currency code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "usd" => Some(Currency::USD),
            "eur" => Some(Currency::EUR),
            "gbp" => Some(Currency::GBP),
            "jpy" => Some(Currency::JPY),
            "cad" => Some(Currency::CAD),
            "aud" => Some(Currency::AUD),
            _ => None,
        }
    }

    /// Returns the number of decimal places for this currency
    /// (JPY has 0 decimals, the others have 2)
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Convert a decimal amount to the smallest currency unit (cents, etc.).
    /// Rounds half away from zero, so 10.005 USD becomes 1001 cents.
    pub fn to_smallest_unit(&self, amount: f64) -> i64 {
        let multiplier = 10_f64.powi(self.decimal_places() as i32);
        (amount * multiplier).round() as i64
    }

    /// Convert from smallest unit back to decimal
    pub fn from_smallest_unit(&self, amount: i64) -> f64 {
        let divisor = 10_f64.powi(self.decimal_places() as i32);
        amount as f64 / divisor
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Price with amount in smallest currency unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in smallest currency unit (cents for USD)
    pub amount: i64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    /// Create a new price from a decimal amount
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self {
            amount: currency.to_smallest_unit(amount),
            currency,
        }
    }

    /// Create a price from the smallest unit (cents)
    pub fn from_cents(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Get the decimal amount
    pub fn as_decimal(&self) -> f64 {
        self.currency.from_smallest_unit(self.amount)
    }
}

/// One entry of the client-submitted `items` array, exactly as it arrives
/// on the wire. Untrusted until it passes through [`Cart::from_items`].
#[derive(Debug, Clone, Deserialize)]
pub struct CartItem {
    /// Product display name
    pub name: String,
    /// Unit price in major currency units (e.g. dollars)
    pub price: f64,
    /// Quantity
    pub qty: u32,
}

/// A line item derived from a validated [`CartItem`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name (copied from the cart item)
    pub name: String,

    /// Unit price in smallest currency unit
    pub unit_price: Price,

    /// Quantity
    pub quantity: u32,
}

impl LineItem {
    /// Validate one cart item and derive its line item. The index is only
    /// used to point validation errors at the offending entry.
    fn try_from_cart_item(item: &CartItem, index: usize, currency: Currency) -> CheckoutResult<Self> {
        if item.name.trim().is_empty() {
            return Err(CheckoutError::Validation(format!(
                "items[{index}].name must not be empty"
            )));
        }
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(CheckoutError::Validation(format!(
                "items[{index}].price must be a non-negative number"
            )));
        }
        if item.qty == 0 {
            return Err(CheckoutError::Validation(format!(
                "items[{index}].qty must be greater than zero"
            )));
        }

        Ok(Self {
            name: item.name.clone(),
            unit_price: Price::new(item.price, currency),
            quantity: item.qty,
        })
    }

    /// Calculate the total price for this line item
    pub fn total(&self) -> Price {
        Price {
            amount: self.unit_price.amount * self.quantity as i64,
            currency: self.unit_price.currency,
        }
    }
}

/// A validated cart, ready for checkout.
///
/// Exists only for the duration of one request. The id is generated per
/// request and used to correlate log lines, nothing more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Request-scoped cart ID (generated)
    pub id: String,

    /// Line items, in request order
    pub line_items: Vec<LineItem>,

    /// Currency (same for all items, fixed per deployment)
    pub currency: Currency,
}

impl Cart {
    /// Validate raw cart items and build a cart.
    ///
    /// The whole request is rejected on the first malformed entry; entries
    /// are never skipped or clamped. Every valid entry produces exactly one
    /// line item, in order.
    pub fn from_items(items: &[CartItem], currency: Currency) -> CheckoutResult<Self> {
        if items.is_empty() {
            return Err(CheckoutError::Validation(
                "items must be a non-empty array".to_string(),
            ));
        }

        let line_items = items
            .iter()
            .enumerate()
            .map(|(i, item)| LineItem::try_from_cart_item(item, i, currency))
            .collect::<CheckoutResult<Vec<_>>>()?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            line_items,
            currency,
        })
    }

    /// Calculate the cart total
    pub fn total(&self) -> Price {
        let total_amount: i64 = self.line_items.iter().map(|item| item.total().amount).sum();
        Price {
            amount: total_amount,
            currency: self.currency,
        }
    }

    /// Get the summed item count
    pub fn item_count(&self) -> u32 {
        self.line_items.iter().map(|i| i.quantity).sum()
    }

    /// Check if the cart is empty
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}
