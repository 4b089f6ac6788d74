//! Authentication header building for service requests.

use super::credentials::{AuthType, CredentialStatus};
use super::types::ServiceConfig;

/// Header name and value for authentication.
pub type AuthHeader = (String, String);

/// Build the `Authorization` header for the service.
///
/// Returns `None` if no auth is needed or the credential is missing.
pub fn build_auth_header(service: &ServiceConfig) -> Option<AuthHeader> {
    match (service.auth_type(), service.resolve_credential()) {
        (AuthType::Bearer, CredentialStatus::Configured(key)) => Some((
            "Authorization".to_string(),
            format!("Bearer {}", key.expose()),
        )),
        (AuthType::None, _) => None,
        (_, CredentialStatus::Unconfigured { .. }) => None,
        (_, CredentialStatus::NoAuth) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_service(auth_type: &str, api_key: Option<&str>) -> ServiceConfig {
        ServiceConfig {
            auth_type_str: auth_type.to_string(),
            api_key: api_key.map(String::from),
            ..ServiceConfig::default()
        }
    }

    #[test]
    fn test_no_auth_service() {
        let service = make_service("none", Some("ignored"));
        assert!(build_auth_header(&service).is_none());
    }

    #[test]
    fn test_bearer_header() {
        let service = make_service("bearer", Some("sk-456"));
        let (name, value) = build_auth_header(&service).unwrap();
        assert_eq!(name, "Authorization");
        assert_eq!(value, "Bearer sk-456");
    }

    #[test]
    fn test_missing_key() {
        assert!(build_auth_header(&make_service("bearer", None)).is_none());
        assert!(build_auth_header(&make_service("bearer", Some(""))).is_none());
    }
}
