//! Credential resolution from configuration.
//!
//! The service key is the only secret the system handles. It is resolved
//! on demand from the loaded config (file or environment override) and
//! wrapped so it never ends up in logs.

use super::types::ServiceConfig;

/// Authentication type for service requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    /// Standard `Authorization: Bearer` header.
    Bearer,
    /// No authentication required (local model servers).
    None,
}

impl AuthType {
    /// Parse auth type from string.
    /// Defaults to `Bearer` for unknown values.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "none" => AuthType::None,
            _ => AuthType::Bearer,
        }
    }
}

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// Use `expose()` only when building the outbound header.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Status of credential resolution for the service.
#[derive(Debug, Clone)]
pub enum CredentialStatus {
    Configured(SecureString),
    Unconfigured {
        reason: String,
    },
    /// No authentication required.
    NoAuth,
}

impl ServiceConfig {
    pub fn auth_type(&self) -> AuthType {
        AuthType::parse(&self.auth_type_str)
    }

    pub fn resolve_credential(&self) -> CredentialStatus {
        match self.auth_type() {
            AuthType::None => CredentialStatus::NoAuth,
            AuthType::Bearer => match self.api_key.as_deref() {
                Some(key) if !key.is_empty() => {
                    CredentialStatus::Configured(SecureString::new(key.to_string()))
                }
                _ => CredentialStatus::Unconfigured {
                    reason: "api_key is not set (use HAMMOCK_API_KEY or OPENAI_API_KEY)"
                        .to_string(),
                },
            },
        }
    }

    /// Has valid credentials or doesn't need them.
    pub fn is_configured(&self) -> bool {
        matches!(
            self.resolve_credential(),
            CredentialStatus::Configured(_) | CredentialStatus::NoAuth
        )
    }
}
