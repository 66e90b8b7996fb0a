//! Proxy Verify - bulk proxy probing
//!
//! Routes a test request through every candidate endpoint as SOCKS5, SOCKS4
//! and HTTP, and keeps the first protocol that answers for each one.

pub mod progress;
pub mod proxy;

pub use proxy::*;

/// Application result type
pub type Result<T> = anyhow::Result<T>;
