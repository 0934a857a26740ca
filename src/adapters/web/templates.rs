//! HTML templates using Askama.
//!
//! Each page template renders only its inner content; [`BasePage`] wraps it
//! in the site layout for full-page requests.

use askama::Template;

use crate::domain::account::AccountSnapshot;
use crate::domain::pricing::{PricingPlan, format_money};
use crate::domain::user::User;

#[derive(Template)]
#[template(path = "base.html")]
pub struct BasePage<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate<'a> {
    pub plans: &'a [PricingPlan],
}

impl HomeTemplate<'_> {
    pub fn largest_account(&self) -> String {
        let max = self
            .plans
            .iter()
            .map(|p| p.account_size)
            .fold(0.0_f64, f64::max);
        format_money(max)
    }
}

pub struct PlanCard {
    pub name: &'static str,
    pub account_size: String,
    pub price: String,
    /// Raw amount posted to the checkout endpoint.
    pub checkout_amount: String,
    pub profit_target: String,
    pub max_drawdown: String,
    pub featured: bool,
}

impl From<&PricingPlan> for PlanCard {
    fn from(plan: &PricingPlan) -> Self {
        Self {
            name: plan.name,
            account_size: format_money(plan.account_size),
            price: format_money(plan.price),
            checkout_amount: plan.price.to_string(),
            profit_target: format!("{:.0}%", plan.profit_target_pct),
            max_drawdown: format!("{:.0}%", plan.max_drawdown_pct),
            featured: plan.featured,
        }
    }
}

#[derive(Template)]
#[template(path = "pricing.html")]
pub struct PricingTemplate {
    pub plans: Vec<PlanCard>,
}

impl PricingTemplate {
    pub fn new(plans: &[PricingPlan]) -> Self {
        Self {
            plans: plans.iter().map(PlanCard::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate<'a> {
    pub error: Option<&'a str>,
    pub username: &'a str,
    pub next: &'a str,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate<'a> {
    pub username: &'a str,
}

#[derive(Template)]
#[template(path = "account.html")]
pub struct AccountTemplate<'a> {
    pub login: &'a str,
    pub balance: String,
    pub profit: String,
    pub return_pct: String,
    pub chart_svg: &'a str,
}

impl<'a> AccountTemplate<'a> {
    pub fn new(login: &'a str, snapshot: &AccountSnapshot, chart_svg: &'a str) -> Self {
        Self {
            login,
            balance: format_money(snapshot.balance),
            profit: format_money(snapshot.profit),
            return_pct: format!("{:.2}%", snapshot.return_pct()),
            chart_svg,
        }
    }
}

pub struct UserRow {
    pub id: String,
    pub email: String,
    pub balance: String,
    pub profit: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        let money = |v: Option<f64>| v.map(format_money).unwrap_or_else(|| "-".to_string());
        Self {
            id: user.id.clone(),
            email: user.email.clone().unwrap_or_default(),
            balance: money(user.balance),
            profit: money(user.profit),
        }
    }
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub rows: Vec<UserRow>,
}

impl AdminTemplate {
    pub fn new(users: &[User]) -> Self {
        Self {
            rows: users.iter().map(UserRow::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}
