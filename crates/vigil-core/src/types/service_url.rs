//! Remote service URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, ValidationError};

/// A validated base URL for the remote backing service.
///
/// Network URLs must use HTTPS (or HTTP for localhost, which the test
/// and local-development servers use).
///
/// # Example
///
/// ```
/// use vigil_core::ServiceUrl;
///
/// let service = ServiceUrl::new("https://example.supabase.co").unwrap();
/// assert_eq!(service.rest_url("prayers"),
///            "https://example.supabase.co/rest/v1/prayers");
/// assert_eq!(service.auth_url("token"),
///            "https://example.supabase.co/auth/v1/token");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServiceUrl(Url);

impl ServiceUrl {
    /// Create a new service URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute, has no host, or uses
    /// a scheme other than HTTPS (HTTP is allowed only for localhost).
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| ValidationError::Field {
            field: "service URL",
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let normalized = if url.path() == "/" {
            let mut u = url.clone();
            u.set_path("");
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Returns the row-query endpoint URL for a table or view.
    pub fn rest_url(&self, resource: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/rest/v1/{}", base, resource)
    }

    /// Returns the remote-procedure endpoint URL for a function.
    pub fn rpc_url(&self, function: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/rest/v1/rpc/{}", base, function)
    }

    /// Returns the auth endpoint URL for a method.
    pub fn auth_url(&self, method: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/auth/v1/{}", base, method)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(ValidationError::Field {
                field: "service URL",
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1");

        let scheme = url.scheme();
        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(ValidationError::Field {
                field: "service URL",
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(ValidationError::Field {
                field: "service URL",
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ServiceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ServiceUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ServiceUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ServiceUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ServiceUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ServiceUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let service = ServiceUrl::new("https://example.supabase.co").unwrap();
        assert_eq!(service.host(), Some("example.supabase.co"));
    }

    #[test]
    fn valid_localhost_http() {
        let service = ServiceUrl::new("http://localhost:54321").unwrap();
        assert_eq!(service.host(), Some("localhost"));
    }

    #[test]
    fn endpoint_construction() {
        let service = ServiceUrl::new("https://example.supabase.co").unwrap();
        assert_eq!(
            service.rest_url("prayers"),
            "https://example.supabase.co/rest/v1/prayers"
        );
        assert_eq!(
            service.rpc_url("join_organization_by_code"),
            "https://example.supabase.co/rest/v1/rpc/join_organization_by_code"
        );
        assert_eq!(
            service.auth_url("signup"),
            "https://example.supabase.co/auth/v1/signup"
        );
    }

    #[test]
    fn normalizes_trailing_slash() {
        let service = ServiceUrl::new("https://example.supabase.co/").unwrap();
        assert_eq!(
            service.rest_url("prayers"),
            "https://example.supabase.co/rest/v1/prayers"
        );
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ServiceUrl::new("http://example.supabase.co").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ServiceUrl::new("/rest/v1/prayers").is_err());
    }
}
