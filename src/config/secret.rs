//! Credential wrappers using the secrecy crate
//!
//! Store and mail passwords live in [`SecretString`]: memory is zeroed on
//! drop, `Debug` prints a redaction marker, and reading the value requires an
//! explicit `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use attendance_report::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let password = secret_string("sa@123".to_string());
//! assert_eq!(password.expose_secret(), "sa@123");
//! assert!(!format!("{password:?}").contains("sa@123"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret};
use serde::{Deserialize, Deserializer};
use zeroize::Zeroize;

/// String payload of a secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// A zeroize-on-drop, Debug-redacted string
pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string into a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}
