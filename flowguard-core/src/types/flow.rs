//! Flow identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of an authorization check: `true` allows the flow, `false` denies it.
pub type Verdict = bool;

/// A proposed flow, identified by its endpoints and destination port.
///
/// Fields are kept as given by the caller; two keys are equal only when all
/// three components are byte-for-byte equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowKey {
    /// Source address
    pub source: String,
    /// Destination address
    pub destination: String,
    /// Destination port
    pub destination_port: String,
}

impl FlowKey {
    /// Creates a flow key from its three components.
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        destination_port: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            destination_port: destination_port.into(),
        }
    }

    /// Returns the `destination:port` target as sent in an accept rule.
    pub fn target(&self) -> String {
        format!("{}:{}", self.destination, self.destination_port)
    }
}

impl fmt::Display for FlowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}->{}:{}",
            self.source, self.destination, self.destination_port
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_display() {
        let key = FlowKey::new("10.0.0.5", "10.0.0.6", "22");
        assert_eq!(key.to_string(), "10.0.0.5->10.0.0.6:22");
        assert_eq!(key.target(), "10.0.0.6:22");
    }

    #[test]
    fn test_no_collision_on_ambiguous_rendering() {
        // Both render as "a->b:c:d" but are distinct flows
        let one = FlowKey::new("a", "b:c", "d");
        let two = FlowKey::new("a", "b", "c:d");
        assert_eq!(one.to_string(), two.to_string());
        assert_ne!(one, two);

        let set: HashSet<FlowKey> = [one, two].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
