//! Credential records
//!
//! One registered identity: a username and the secret it was registered with.

use serde::{Deserialize, Serialize};

/// A stored username/secret pair.
///
/// Secrets are kept and compared verbatim. There is no hashing step, so any
/// backend persisting these records holds plaintext secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    username: String,
    secret: String,
}

impl CredentialRecord {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Exact, case-sensitive comparison against an asserted secret.
    pub fn matches_secret(&self, secret: &str) -> bool {
        self.secret == secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_comparison_is_exact() {
        let record = CredentialRecord::new("alice", "Secret1");
        assert!(record.matches_secret("Secret1"));
        assert!(!record.matches_secret("secret1"));
        assert!(!record.matches_secret("Secret1 "));
    }
}
