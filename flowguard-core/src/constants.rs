//! Constants shared across FLOWGUARD crates.

// ═══════════════════════════════════════════════════════════════════════════════
// POLICY SERVICE
// ═══════════════════════════════════════════════════════════════════════════════

/// Base URL of the hosted ACL policy API.
pub const DEFAULT_POLICY_API_URL: &str = "https://api.tailscale.com/api/v2/tailnet";

/// Policy group used when none is configured. The service resolves it to the
/// group owning the credential.
pub const WILDCARD_POLICY_GROUP: &str = "-";

/// Path appended to `{base}/{group}` for flow validation.
pub const ACL_VALIDATE_PATH: &str = "acl/validate";

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Default freshness window for cached verdicts, in seconds.
pub const DEFAULT_TTL_SECONDS: u64 = 60;

// ═══════════════════════════════════════════════════════════════════════════════
// ENVIRONMENT
// ═══════════════════════════════════════════════════════════════════════════════

/// Policy group identifier.
pub const ENV_POLICY_GROUP: &str = "FLOWGUARD_POLICY_GROUP";
/// Secret API token.
pub const ENV_CREDENTIAL: &str = "FLOWGUARD_CREDENTIAL";
/// Cache TTL in seconds.
pub const ENV_TTL_SECONDS: &str = "FLOWGUARD_TTL_SECONDS";
/// CIDR of the trusted internal network.
pub const ENV_ADDRESS_SPACE: &str = "FLOWGUARD_ADDRESS_SPACE";
/// Override for [`DEFAULT_POLICY_API_URL`].
pub const ENV_POLICY_URL: &str = "FLOWGUARD_POLICY_URL";
/// Optional HTTP timeout for policy requests, in seconds.
pub const ENV_REQUEST_TIMEOUT_SECONDS: &str = "FLOWGUARD_REQUEST_TIMEOUT_SECONDS";
