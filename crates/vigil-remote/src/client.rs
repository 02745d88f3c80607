//! REST client for the remote service.
//!
//! The service exposes three surfaces under one base URL: row queries
//! (`/rest/v1/{table}`), remote procedures (`/rest/v1/rpc/{fn}`), and
//! auth (`/auth/v1/{method}`). Row-level security on the service side
//! decides what each bearer token may see; this client only shapes
//! requests.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, RANGE};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, trace};

use vigil_core::error::{ApiError, BackendError, Error};
use vigil_core::ServiceUrl;

/// Accept value asking the row API for a single object instead of an
/// array.
const ACCEPT_SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

pub(crate) fn map_reqwest(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Backend(BackendError::Timeout)
    } else if err.is_connect() {
        Error::Backend(BackendError::Connection {
            message: err.to_string(),
        })
    } else {
        Error::Backend(BackendError::Http {
            message: err.to_string(),
        })
    }
}

/// Error body shapes the service emits: the row API uses
/// `{message, code}`, the auth API uses `{error, error_description}` or
/// `{msg}`.
#[derive(Debug, serde::Deserialize)]
struct ServiceErrorBody {
    message: Option<String>,
    code: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
    msg: Option<String>,
}

/// HTTP client for the remote service.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    service: ServiceUrl,
    api_key: String,
}

impl RestClient {
    /// Create a new client for the given service with its publishable
    /// API key.
    pub fn new(service: ServiceUrl, api_key: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("vigil/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            service,
            api_key: api_key.into(),
        }
    }

    /// Returns the service URL this client is configured for.
    pub fn service(&self) -> &ServiceUrl {
        &self.service
    }

    /// Query rows from a table: filters and ordering travel as query
    /// parameters, the page window travels as a `Range` header.
    #[instrument(skip(self, token), fields(service = %self.service))]
    pub(crate) async fn select_rows<R>(
        &self,
        table: &str,
        params: &[(&str, String)],
        window: (u32, u32),
        token: &str,
    ) -> Result<Vec<R>, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.service.rest_url(table);
        debug!(table, from = window.0, to = window.1, "Row query");
        trace!(?params, "query parameters");

        let response = self
            .http
            .get(&url)
            .query(params)
            .headers(self.row_headers(token))
            .header(RANGE, format!("{}-{}", window.0, window.1))
            .header("Range-Unit", "items")
            .send()
            .await
            .map_err(map_reqwest)?;

        self.handle_response(response).await
    }

    /// Insert a single row and return the stored representation.
    #[instrument(skip(self, row, token), fields(service = %self.service))]
    pub(crate) async fn insert_row<B, R>(&self, table: &str, row: &B, token: &str) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.service.rest_url(table);
        debug!(table, "Row insert");

        let response = self
            .http
            .post(&url)
            .json(row)
            .headers(self.row_headers(token))
            .header(ACCEPT, ACCEPT_SINGLE_OBJECT)
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(map_reqwest)?;

        self.handle_response(response).await
    }

    /// Call a remote procedure. Procedures used here return no body.
    #[instrument(skip(self, body, token), fields(service = %self.service))]
    pub(crate) async fn rpc<B>(&self, function: &str, body: &B, token: &str) -> Result<(), Error>
    where
        B: Serialize,
    {
        let url = self.service.rpc_url(function);
        debug!(function, "Remote procedure call");

        let response = self
            .http
            .post(&url)
            .json(body)
            .headers(self.row_headers(token))
            .send()
            .await
            .map_err(map_reqwest)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error_response(response).await.into())
        }
    }

    /// Call an auth endpoint with a JSON body.
    #[instrument(skip(self, body, bearer), fields(service = %self.service))]
    pub(crate) async fn auth_post<B, R>(
        &self,
        method: &str,
        query: &[(&str, &str)],
        body: &B,
        bearer: Option<&str>,
    ) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.service.auth_url(method);
        debug!(method, "Auth request");

        let response = self
            .http
            .post(&url)
            .query(query)
            .json(body)
            .headers(self.auth_headers(bearer))
            .send()
            .await
            .map_err(map_reqwest)?;

        self.handle_response(response).await
    }

    /// Call an auth endpoint that returns no content.
    #[instrument(skip(self, bearer), fields(service = %self.service))]
    pub(crate) async fn auth_post_no_response(
        &self,
        method: &str,
        bearer: Option<&str>,
    ) -> Result<(), Error> {
        let url = self.service.auth_url(method);
        debug!(method, "Auth request (no response)");

        let response = self
            .http
            .post(&url)
            .headers(self.auth_headers(bearer))
            .send()
            .await
            .map_err(map_reqwest)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error_response(response).await.into())
        }
    }

    /// Fetch from an auth endpoint.
    #[instrument(skip(self, bearer), fields(service = %self.service))]
    pub(crate) async fn auth_get<R>(&self, method: &str, bearer: &str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.service.auth_url(method);
        debug!(method, "Auth fetch");

        let response = self
            .http
            .get(&url)
            .headers(self.auth_headers(Some(bearer)))
            .send()
            .await
            .map_err(map_reqwest)?;

        self.handle_response(response).await
    }

    /// Headers for the row API: the API key plus the caller's bearer
    /// token, which row-level security evaluates.
    fn row_headers(&self, token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&self.api_key).expect("invalid API key characters"),
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .expect("invalid token characters"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Headers for the auth API: the API key, plus a bearer token when
    /// the endpoint operates on an existing session.
    fn auth_headers(&self, bearer: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&self.api_key).expect("invalid API key characters"),
        );
        let bearer = bearer.unwrap_or(&self.api_key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", bearer))
                .expect("invalid token characters"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Handle a response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "Service response");

        if status.is_success() {
            let body = response.json::<R>().await.map_err(map_reqwest)?;
            Ok(body)
        } else {
            Err(self.parse_error_response(response).await.into())
        }
    }

    /// Parse an error response into a structured API error.
    async fn parse_error_response(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();

        match response.json::<ServiceErrorBody>().await {
            Ok(body) => ApiError::new(
                status,
                body.code.or(body.error),
                body.message.or(body.error_description).or(body.msg),
            ),
            Err(_) => ApiError::new(status, None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let service = ServiceUrl::new("https://example.supabase.co").unwrap();
        let client = RestClient::new(service.clone(), "anon-key");
        assert_eq!(client.service().as_str(), service.as_str());
    }
}
