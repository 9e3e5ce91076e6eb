//! Policy service client implementation.
//!
//! Sends a single-flow validation to `{base}/{group}/acl/validate` using Basic
//! authentication with the API token as the user name and an empty password.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, instrument, warn};

use flowguard_core::constants::{ACL_VALIDATE_PATH, DEFAULT_POLICY_API_URL, WILDCARD_POLICY_GROUP};
use flowguard_core::error::{FlowguardError, Result};
use flowguard_core::traits::PolicyValidator;
use flowguard_core::types::PolicyCredential;

use crate::wire::{request_body, FlowValidation};

/// Policy client configuration.
#[derive(Clone, Debug)]
pub struct PolicyConfig {
    /// Base URL of the policy API, without the group segment
    pub base_url: String,
    /// Policy group to validate against; `None` or empty selects the wildcard group
    pub policy_group: Option<String>,
    /// API token
    pub credential: PolicyCredential,
    /// HTTP timeout for a validation round trip; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl PolicyConfig {
    /// Creates config for the hosted policy API with the given credential.
    pub fn new(credential: PolicyCredential) -> Self {
        Self {
            base_url: DEFAULT_POLICY_API_URL.into(),
            policy_group: None,
            credential,
            request_timeout: None,
        }
    }

    /// Points the client at a different policy API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Selects the policy group.
    pub fn with_policy_group(mut self, group: impl Into<String>) -> Self {
        self.policy_group = Some(group.into());
        self
    }

    /// Bounds each validation request.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Returns the effective policy group.
    pub fn policy_group(&self) -> &str {
        match self.policy_group.as_deref() {
            Some(group) if !group.is_empty() => group,
            _ => WILDCARD_POLICY_GROUP,
        }
    }

    /// Returns the full validation endpoint.
    pub fn validate_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.policy_group(),
            ACL_VALIDATE_PATH
        )
    }
}

/// Client for the remote ACL validation endpoint.
///
/// Holds a pooled `reqwest::Client`; each validation is one request and one
/// fully consumed response. Nothing is retried.
pub struct PolicyClient {
    config: PolicyConfig,
    http_client: reqwest::Client,
}

impl PolicyClient {
    /// Creates a new client with the given config.
    pub fn with_config(config: PolicyConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| FlowguardError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    fn authorization(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&basic_credential(&self.config.credential))
            .map_err(|_| {
                FlowguardError::ConfigError("credential is not a valid header value".into())
            })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

/// Renders `Basic base64(token + ":")`.
fn basic_credential(credential: &PolicyCredential) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:", credential.expose()))
    )
}

#[async_trait]
impl PolicyValidator for PolicyClient {
    /// Validates one flow. An empty 200 response means the flow is accepted;
    /// a 200 carrying a body lists policy violations and means denied.
    #[instrument(skip(self))]
    async fn validate(
        &self,
        source: &str,
        destination: &str,
        destination_port: &str,
    ) -> Result<bool> {
        let body = request_body(&FlowValidation::for_flow(
            source,
            destination,
            destination_port,
        ))?;

        let response = self
            .http_client
            .post(self.config.validate_url())
            .header(AUTHORIZATION, self.authorization()?)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, body.len())
            .body(body)
            .send()
            .await
            .map_err(|e| FlowguardError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Policy service returned non-200 status");
            return Err(FlowguardError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let payload = response
            .bytes()
            .await
            .map_err(|e| FlowguardError::Transport(e.to_string()))?;

        if payload.is_empty() {
            debug!("Flow accepted by policy");
            Ok(true)
        } else {
            debug!(
                violations = %String::from_utf8_lossy(&payload),
                "Flow rejected by policy"
            );
            Ok(false)
        }
    }
}
