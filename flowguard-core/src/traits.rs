//! Common traits for FLOWGUARD.
//!
//! These traits define the seams between the authorizer, the remote policy
//! service, and whatever listener triggers each check.

use async_trait::async_trait;

use crate::error::Result;

// ═══════════════════════════════════════════════════════════════════════════════
// POLICY VALIDATOR TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for asking the authoritative ACL whether a single flow is allowed.
///
/// Implementations might use:
/// - The hosted policy API over HTTPS (production)
/// - A stub with canned verdicts (testing)
#[async_trait]
pub trait PolicyValidator: Send + Sync {
    /// Evaluates one candidate flow against the remote policy.
    ///
    /// Returns `Ok(true)` when allowed, `Ok(false)` when denied. Any `Err`
    /// must be treated as a denial by the caller.
    async fn validate(
        &self,
        source: &str,
        destination: &str,
        destination_port: &str,
    ) -> Result<bool>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// AUTHORIZER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface consumed by listeners that need an allow/deny decision per flow.
#[async_trait]
pub trait FlowAuthorizer: Send + Sync {
    /// Decides whether the flow `source -> destination:destination_port` is
    /// permitted. An `Err` always accompanies a denial.
    async fn is_authorized(
        &self,
        source: &str,
        destination: &str,
        destination_port: &str,
    ) -> Result<bool>;
}
