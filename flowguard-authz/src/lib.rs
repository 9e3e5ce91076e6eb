//! # FLOWGUARD Authorizer
//!
//! Decides whether a proposed flow `source -> destination:port` is permitted.
//!
//! ## Decision order
//!
//! 1. Source outside the address space: denied
//! 2. Destination outside the address space: allowed
//! 3. Both inside: fresh cached verdict, otherwise ask the policy service and
//!    cache its answer. Failures are returned as errors and never cached.
//!
//! ## Example
//!
//! ```rust,ignore
//! use flowguard_authz::{Authorizer, AuthorizerConfig};
//!
//! let authorizer = Authorizer::from_config(AuthorizerConfig::from_env()?)?;
//! let allowed = authorizer.is_authorized("10.0.0.5", "10.0.0.6", "22").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod authorizer;
mod config;

pub use authorizer::Authorizer;
pub use config::AuthorizerConfig;
