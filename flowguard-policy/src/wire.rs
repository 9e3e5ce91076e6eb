//! Request body sent to the ACL validation endpoint.

use serde::Serialize;

use flowguard_core::error::Result;

/// One candidate flow to evaluate against the policy.
///
/// The service checks that `src` is accepted for every `accept` target and
/// rejected for every `deny` target. Only a single accept target is ever sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlowValidation {
    /// Source address
    pub src: String,
    /// `destination:port` targets expected to be accepted
    pub accept: Vec<String>,
    /// Targets expected to be denied (always empty)
    pub deny: Vec<String>,
}

impl FlowValidation {
    /// Builds the validation for `source -> destination:destination_port`.
    pub fn for_flow(source: &str, destination: &str, destination_port: &str) -> Self {
        Self {
            src: source.to_string(),
            accept: vec![format!("{}:{}", destination, destination_port)],
            deny: Vec::new(),
        }
    }
}

/// Serializes the request body: a JSON array holding one validation.
pub(crate) fn request_body(validation: &FlowValidation) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&[validation])?)
}
