//! Challenge plans shown on the pricing page.

#[derive(Debug, Clone, PartialEq)]
pub struct PricingPlan {
    pub name: &'static str,
    pub account_size: f64,
    /// Challenge fee in currency units, sent as the checkout amount.
    pub price: f64,
    pub profit_target_pct: f64,
    pub max_drawdown_pct: f64,
    pub featured: bool,
}

pub const PLANS: &[PricingPlan] = &[
    PricingPlan {
        name: "Starter",
        account_size: 10_000.0,
        price: 99.0,
        profit_target_pct: 8.0,
        max_drawdown_pct: 10.0,
        featured: false,
    },
    PricingPlan {
        name: "Pro",
        account_size: 50_000.0,
        price: 299.0,
        profit_target_pct: 8.0,
        max_drawdown_pct: 10.0,
        featured: true,
    },
    PricingPlan {
        name: "Elite",
        account_size: 100_000.0,
        price: 499.0,
        profit_target_pct: 10.0,
        max_drawdown_pct: 12.0,
        featured: false,
    },
];

/// Formats a currency amount with thousands separators, e.g. `100,000.00`.
pub fn format_money(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{:02}", if negative { "-" } else { "" }, grouped, frac)
}
