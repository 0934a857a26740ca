//! Traits at each external seam.

pub mod account_bridge_port;
pub mod config_port;
pub mod database_port;
pub mod payment_port;
