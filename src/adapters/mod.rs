//! Concrete adapter implementations for ports.

pub mod chart_svg;
pub mod env_config_adapter;
pub mod file_config_adapter;
pub mod mt5_bridge_adapter;
pub mod stripe_adapter;
pub mod supabase_adapter;
pub mod web;
