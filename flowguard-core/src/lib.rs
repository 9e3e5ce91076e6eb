//! # FLOWGUARD Core
//!
//! Core types, errors, and traits for the FLOWGUARD flow authorization engine.
//!
//! This crate provides the building blocks used by all other FLOWGUARD crates:
//!
//! - **Types**: Flow keys, policy credentials
//! - **Network**: Address spaces and endpoint membership classification
//! - **Errors**: Error hierarchy shared by the policy client and authorizer
//! - **Traits**: Seams for the policy validator and the authorizer itself
//!
//! ## Example
//!
//! ```rust
//! use flowguard_core::{AddressSpace, NetworkMembership};
//!
//! let space: AddressSpace = "10.0.0.0/8".parse().unwrap();
//! let membership = NetworkMembership::new(space);
//! assert!(membership.is_member("10.1.2.3"));
//! assert!(!membership.is_member("not-an-ip"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod network;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{is_allowed, FlowguardError, Result};
pub use network::{AddressSpace, NetworkMembership};
pub use traits::*;
pub use types::*;
