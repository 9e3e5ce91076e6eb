//! Authorizer configuration: address space, cache TTL, policy client.

use std::time::Duration;

use flowguard_core::constants::{
    DEFAULT_TTL_SECONDS, ENV_ADDRESS_SPACE, ENV_CREDENTIAL, ENV_POLICY_GROUP, ENV_POLICY_URL,
    ENV_REQUEST_TIMEOUT_SECONDS, ENV_TTL_SECONDS,
};
use flowguard_core::error::{FlowguardError, Result};
use flowguard_core::network::AddressSpace;
use flowguard_core::types::PolicyCredential;
use flowguard_policy::PolicyConfig;

/// Everything needed to build an [`Authorizer`](crate::Authorizer).
#[derive(Clone, Debug)]
pub struct AuthorizerConfig {
    /// Trusted internal network
    pub address_space: AddressSpace,
    /// Freshness window for cached verdicts
    pub ttl: Duration,
    /// Remote policy service settings
    pub policy: PolicyConfig,
}

impl AuthorizerConfig {
    /// Creates a config with the default TTL.
    pub fn new(address_space: AddressSpace, policy: PolicyConfig) -> Self {
        Self {
            address_space,
            ttl: Duration::from_secs(DEFAULT_TTL_SECONDS),
            policy,
        }
    }

    /// Overrides the cache TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Loads config from `FLOWGUARD_*` environment variables, reading a
    /// `.env` file first if one exists.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads config through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let credential = var(ENV_CREDENTIAL)
            .map(PolicyCredential::new)
            .ok_or_else(|| FlowguardError::ConfigError(format!("{} is required", ENV_CREDENTIAL)))?;

        let address_space: AddressSpace = var(ENV_ADDRESS_SPACE)
            .ok_or_else(|| {
                FlowguardError::ConfigError(format!("{} is required", ENV_ADDRESS_SPACE))
            })?
            .parse()?;

        let ttl = match var(ENV_TTL_SECONDS) {
            Some(raw) => Duration::from_secs(parse_seconds(ENV_TTL_SECONDS, &raw)?),
            None => Duration::from_secs(DEFAULT_TTL_SECONDS),
        };

        let mut policy = PolicyConfig::new(credential);
        if let Some(url) = var(ENV_POLICY_URL) {
            policy = policy.with_base_url(url);
        }
        if let Some(group) = var(ENV_POLICY_GROUP) {
            policy = policy.with_policy_group(group);
        }
        if let Some(raw) = var(ENV_REQUEST_TIMEOUT_SECONDS) {
            let secs = parse_seconds(ENV_REQUEST_TIMEOUT_SECONDS, &raw)?;
            policy = policy.with_request_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            address_space,
            ttl,
            policy,
        })
    }
}

fn parse_seconds(name: &str, raw: &str) -> Result<u64> {
    raw.trim().parse::<u64>().map_err(|_| {
        FlowguardError::ConfigError(format!("{} must be whole seconds, got '{}'", name, raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_minimal_config() {
        let config = AuthorizerConfig::from_lookup(lookup(&[
            (ENV_CREDENTIAL, "tskey"),
            (ENV_ADDRESS_SPACE, "10.0.0.0/8"),
        ]))
        .unwrap();

        assert_eq!(config.address_space.to_string(), "10.0.0.0/8");
        assert_eq!(config.ttl, Duration::from_secs(DEFAULT_TTL_SECONDS));
        assert_eq!(config.policy.policy_group(), "-");
        assert_eq!(config.policy.credential.expose(), "tskey");
        assert!(config.policy.request_timeout.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = AuthorizerConfig::from_lookup(lookup(&[
            (ENV_CREDENTIAL, "tskey"),
            (ENV_ADDRESS_SPACE, "100.64.0.0/10"),
            (ENV_TTL_SECONDS, "300"),
            (ENV_POLICY_GROUP, "example.com"),
            (ENV_POLICY_URL, "http://localhost:9000"),
            (ENV_REQUEST_TIMEOUT_SECONDS, "5"),
        ]))
        .unwrap();

        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(
            config.policy.validate_url(),
            "http://localhost:9000/example.com/acl/validate"
        );
        assert_eq!(config.policy.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_missing_credential() {
        let err = AuthorizerConfig::from_lookup(lookup(&[(ENV_ADDRESS_SPACE, "10.0.0.0/8")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_CREDENTIAL));
    }

    #[test]
    fn test_blank_credential_is_missing() {
        let err = AuthorizerConfig::from_lookup(lookup(&[
            (ENV_CREDENTIAL, "  "),
            (ENV_ADDRESS_SPACE, "10.0.0.0/8"),
        ]))
        .unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_invalid_address_space() {
        let err = AuthorizerConfig::from_lookup(lookup(&[
            (ENV_CREDENTIAL, "tskey"),
            (ENV_ADDRESS_SPACE, "10.0.0.0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, FlowguardError::InvalidAddressSpace(_)));
    }

    #[test]
    fn test_max_ttl_accepted() {
        let config = AuthorizerConfig::from_lookup(lookup(&[
            (ENV_CREDENTIAL, "tskey"),
            (ENV_ADDRESS_SPACE, "10.0.0.0/8"),
            (ENV_TTL_SECONDS, "18446744073709551615"),
        ]))
        .unwrap();

        assert_eq!(config.ttl, Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_invalid_ttl() {
        let err = AuthorizerConfig::from_lookup(lookup(&[
            (ENV_CREDENTIAL, "tskey"),
            (ENV_ADDRESS_SPACE, "10.0.0.0/8"),
            (ENV_TTL_SECONDS, "1m"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(ENV_TTL_SECONDS));
    }
}
