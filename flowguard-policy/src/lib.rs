//! Remote ACL validation client for FLOWGUARD.
//!
//! Asks the policy service whether one candidate flow would be accepted by
//! its current rules, without modifying them.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod wire;

pub use client::{PolicyClient, PolicyConfig};
pub use wire::FlowValidation;
