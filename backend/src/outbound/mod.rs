//! Outbound adapters implementing the driven ports.

pub mod cache;
pub mod persistence;
