//! truefunded: web front end and API glue for a proprietary trading firm.
//!
//! Hexagonal architecture: domain types in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`], command line in [`cli`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
