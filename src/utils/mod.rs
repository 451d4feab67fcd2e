//! Shared utilities

pub mod bounded;
pub mod config_store;
