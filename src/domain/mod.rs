//! Core domain types: records, payloads, settings and errors.

pub mod account;
pub mod checkout;
pub mod error;
pub mod payout;
pub mod pricing;
pub mod settings;
pub mod user;
