//! Hosted checkout session payload.
//!
//! A checkout always carries a single "TrueFunded Challenge" line item priced
//! in minor currency units, and sends the buyer back to the dashboard on
//! success or the pricing page on cancel.

use serde::{Deserialize, Serialize};

use crate::domain::error::TruefundedError;

pub const PRODUCT_NAME: &str = "TrueFunded Challenge";
pub const CURRENCY: &str = "usd";
pub const PAYMENT_METHOD: &str = "card";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    Payment,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub currency: String,
    /// Price in minor units (cents).
    pub unit_amount: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub mode: CheckoutMode,
    pub payment_method_types: Vec<String>,
    pub line_items: Vec<LineItem>,
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutSession {
    /// Builds the session for a challenge purchase of `amount` currency units.
    pub fn for_amount(amount: f64, site_url: &str) -> Result<Self, TruefundedError> {
        let unit_amount = to_minor_units(amount)?;
        let site_url = site_url.trim_end_matches('/');
        Ok(Self {
            mode: CheckoutMode::Payment,
            payment_method_types: vec![PAYMENT_METHOD.to_string()],
            line_items: vec![LineItem {
                name: PRODUCT_NAME.to_string(),
                currency: CURRENCY.to_string(),
                unit_amount,
                quantity: 1,
            }],
            success_url: format!("{site_url}/dashboard"),
            cancel_url: format!("{site_url}/pricing"),
        })
    }

    pub fn total_minor_units(&self) -> i64 {
        self.line_items
            .iter()
            .map(|item| item.unit_amount * i64::from(item.quantity))
            .sum()
    }
}

/// Converts a currency amount to whole cents, rejecting zero, negative and
/// non-finite values.
pub fn to_minor_units(amount: f64) -> Result<i64, TruefundedError> {
    if !amount.is_finite() {
        return Err(TruefundedError::InvalidAmount {
            amount,
            reason: "amount must be a finite number".to_string(),
        });
    }
    if amount <= 0.0 {
        return Err(TruefundedError::InvalidAmount {
            amount,
            reason: "amount must be positive".to_string(),
        });
    }
    let cents = (amount * 100.0).round();
    if cents < 1.0 {
        return Err(TruefundedError::InvalidAmount {
            amount,
            reason: "amount is smaller than one cent".to_string(),
        });
    }
    if cents > i64::MAX as f64 {
        return Err(TruefundedError::InvalidAmount {
            amount,
            reason: "amount is too large".to_string(),
        });
    }
    Ok(cents as i64)
}
