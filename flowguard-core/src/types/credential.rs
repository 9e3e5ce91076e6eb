//! Policy service credential.

use std::fmt;

use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret token used to authenticate policy validation requests.
///
/// The token is never printed: `Debug` is redacted and there is no `Display`.
/// It is zeroized when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop, Deserialize)]
#[serde(transparent)]
pub struct PolicyCredential {
    token: String,
}

impl PolicyCredential {
    /// Wraps a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Returns the raw token. Callers must not log it.
    pub fn expose(&self) -> &str {
        &self.token
    }

    /// Returns true if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }
}

impl fmt::Debug for PolicyCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PolicyCredential(***)")
    }
}
