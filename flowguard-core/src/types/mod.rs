//! Domain types for FLOWGUARD.
//!
//! - [`FlowKey`]: Identity of a proposed flow, used as the cache key
//! - [`PolicyCredential`]: Secret token authenticating policy requests
//! - [`Verdict`]: Allow/deny outcome of a check

mod credential;
mod flow;

pub use credential::*;
pub use flow::*;
