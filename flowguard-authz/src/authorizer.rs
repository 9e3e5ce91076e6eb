//! Flow authorization: membership, cached verdicts, remote validation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, instrument};

use flowguard_cache::AuthorizationCache;
use flowguard_core::error::{FlowguardError, Result};
use flowguard_core::network::NetworkMembership;
use flowguard_core::traits::{FlowAuthorizer, PolicyValidator};
use flowguard_core::types::FlowKey;
use flowguard_policy::PolicyClient;

use crate::config::AuthorizerConfig;

/// Decides whether flows are permitted.
///
/// Share one instance across tasks behind an `Arc`. Concurrent misses for the
/// same flow are not coalesced: each asks the policy service and the last
/// answer stored wins.
pub struct Authorizer {
    membership: NetworkMembership,
    cache: AuthorizationCache,
    validator: Arc<dyn PolicyValidator>,
    ttl: Duration,
}

impl Authorizer {
    /// Creates an authorizer around any policy validator.
    pub fn new(
        membership: NetworkMembership,
        validator: Arc<dyn PolicyValidator>,
        ttl: Duration,
    ) -> Self {
        Self {
            membership,
            cache: AuthorizationCache::new(),
            validator,
            ttl,
        }
    }

    /// Creates an authorizer that validates against the HTTP policy service.
    pub fn from_config(config: AuthorizerConfig) -> Result<Self> {
        let client = PolicyClient::with_config(config.policy)?;
        Ok(Self::new(
            NetworkMembership::new(config.address_space),
            Arc::new(client),
            config.ttl,
        ))
    }

    /// Returns the verdict cache.
    pub fn cache(&self) -> &AuthorizationCache {
        &self.cache
    }

    /// Returns the membership classifier.
    pub fn membership(&self) -> &NetworkMembership {
        &self.membership
    }

    /// Returns the cache TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Decides whether `source -> destination:destination_port` is permitted.
    ///
    /// Any `Err` is a denial. The policy call is unbounded; use
    /// [`is_authorized_within`](Self::is_authorized_within) to cap it.
    pub async fn is_authorized(
        &self,
        source: &str,
        destination: &str,
        destination_port: &str,
    ) -> Result<bool> {
        self.decide(source, destination, destination_port, None)
            .await
    }

    /// Like [`is_authorized`](Self::is_authorized), but gives up on the
    /// policy service after `deadline` with [`FlowguardError::Timeout`].
    /// A timed out check caches nothing.
    pub async fn is_authorized_within(
        &self,
        source: &str,
        destination: &str,
        destination_port: &str,
        deadline: Duration,
    ) -> Result<bool> {
        self.decide(source, destination, destination_port, Some(deadline))
            .await
    }

    #[instrument(skip(self))]
    async fn decide(
        &self,
        source: &str,
        destination: &str,
        destination_port: &str,
        deadline: Option<Duration>,
    ) -> Result<bool> {
        debug!("Checking if authorized");

        if !self.membership.is_member(source) {
            debug!("Source outside address space");
            return Ok(false);
        }

        // No egress policy is consulted for external destinations
        if !self.membership.is_member(destination) {
            debug!("Destination outside address space");
            return Ok(true);
        }

        let key = FlowKey::new(source, destination, destination_port);

        if let Some(cached) = self.cache.get(&key) {
            debug!(fresh = cached.fresh, verdict = cached.verdict, "Cache retrieved");
            if cached.fresh {
                return Ok(cached.verdict);
            }
        }

        let authorized = match self.remote_verdict(&key, deadline).await {
            Ok(authorized) => authorized,
            Err(e) => {
                error!(flow = %key, error = %e, "Could not check if authorized");
                return Err(e);
            }
        };

        debug!(flow = %key, authorized, "Cache set");
        self.cache.set(key, authorized, self.ttl);
        Ok(authorized)
    }

    async fn remote_verdict(&self, key: &FlowKey, deadline: Option<Duration>) -> Result<bool> {
        let call = self
            .validator
            .validate(&key.source, &key.destination, &key.destination_port);

        match deadline {
            None => call.await,
            Some(deadline) => tokio::time::timeout(deadline, call)
                .await
                .map_err(|_| FlowguardError::Timeout {
                    millis: saturating_millis(deadline),
                })?,
        }
    }
}

fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl FlowAuthorizer for Authorizer {
    async fn is_authorized(
        &self,
        source: &str,
        destination: &str,
        destination_port: &str,
    ) -> Result<bool> {
        self.decide(source, destination, destination_port, None)
            .await
    }
}
