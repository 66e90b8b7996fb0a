//! Proxy module for loading and probing candidate proxies
//!
//! This module provides functionality for:
//! - Loading candidate endpoints from a newline-delimited file
//! - Probing each candidate as SOCKS5, SOCKS4 and HTTP with bounded concurrency
//! - Appending verified candidates to one file per protocol
//! - Stopping cooperatively when the run is interrupted

pub mod cancel;
pub mod checker;
pub mod models;
pub mod parser;
pub mod writer;

pub use cancel::CancelFlag;
pub use checker::{
    CheckerConfig, HttpTransport, ProbeContext, ProbeResponse, ProbeTransport, ProxyChecker,
};
pub use models::{Candidate, ProbeOutcome, ProtocolAttempt, ProxyType, VerifiedResult, TRIAL_ORDER};
pub use parser::{LoadError, ProxyParser};
pub use writer::ResultWriter;
