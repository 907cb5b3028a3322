//! Opaque holder for credentials

use serde::Deserialize;
use std::fmt;

/// A credential that is never printed.
///
/// `SecretString` has no `Display` and no `Serialize` impl, and its `Debug`
/// output is redacted. The plaintext is only reachable through
/// [`expose_secret`](Self::expose_secret).
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a plaintext value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Reveal the plaintext value
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// True when the secret carries no value; an empty secret counts as unset
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}
