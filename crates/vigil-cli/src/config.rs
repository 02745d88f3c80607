//! Service location resolution.

use std::env;

use anyhow::{Context, Result};

use vigil_core::ServiceUrl;
use vigil_remote::RestClient;

/// Service flags as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ServiceOptions {
    pub service_url: Option<String>,
    pub api_key: Option<String>,
}

/// Build a service client from flags, falling back to environment
/// variables.
pub fn client(options: &ServiceOptions) -> Result<RestClient> {
    let url = options
        .service_url
        .clone()
        .or_else(|| env::var("VIGIL_SERVICE_URL").ok())
        .context("No service URL. Pass --service-url or set VIGIL_SERVICE_URL.")?;

    let api_key = options
        .api_key
        .clone()
        .or_else(|| env::var("VIGIL_API_KEY").ok())
        .context("No API key. Pass --api-key or set VIGIL_API_KEY.")?;

    let service = ServiceUrl::new(&url).context("Invalid service URL")?;

    Ok(RestClient::new(service, api_key))
}
