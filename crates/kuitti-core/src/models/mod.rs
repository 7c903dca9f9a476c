//! Data models for receipts and configuration.

pub mod receipt;
pub mod config;
