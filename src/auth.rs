//! Credentials and `Basic` authorization for the Stockast API
//!
//! The browser client this SDK replaces read its account and password out of
//! persistent storage into globals. Here the client is handed an explicit
//! [`CredentialProvider`] instead, and requests without credentials simply
//! go out unauthenticated.

use crate::codec;

/// An account/password pair for the Stockast API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account name (the user's email address)
    pub account: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Create a new credential pair
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            password: password.into(),
        }
    }
}

/// Source of credentials for outgoing requests
///
/// Implementations can read from a keychain, a config file, or wherever else
/// credentials live; [`StaticCredentials`] covers the fixed-pair case.
pub trait CredentialProvider: Send + Sync {
    /// The credentials to attach to the next request, if any
    fn credentials(&self) -> Option<Credentials>;
}

/// A provider that always returns the same credential pair
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a provider around a fixed credential pair
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(account, password),
        }
    }
}

impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> Option<Credentials> {
        Some(self.credentials.clone())
    }
}

/// Render the `Authorization` header value for a credential pair
pub fn basic_authorization(credentials: &Credentials) -> String {
    let pair = format!("{}:{}", credentials.account, credentials.password);
    format!("Basic {}", codec::encode(&pair))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_authorization() {
        let credentials = Credentials::new("someone@example.com", "1234");
        assert_eq!(
            basic_authorization(&credentials),
            "Basic c29tZW9uZUBleGFtcGxlLmNvbToxMjM0"
        );
    }

    #[test]
    fn test_static_provider_hands_out_its_pair() {
        let provider = StaticCredentials::new("someone@example.com", "1234");
        assert_eq!(
            provider.credentials(),
            Some(Credentials::new("someone@example.com", "1234"))
        );
    }
}
