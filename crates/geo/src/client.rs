//! HTTP client for the IP-to-country lookup service.

use std::time::Duration;

use serde::Deserialize;

use crate::countries::country_name;

/// Default lookup endpoint. Responds to `GET /{ip}` with
/// `{"ip": "...", "country": "CA"}`.
const DEFAULT_API_URL: &str = "https://api.country.is";

/// Default per-call timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Error type for geolocation failures.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("Geolocation request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote service returned a non-2xx status code.
    #[error("Geolocation service returned HTTP {0}")]
    HttpStatus(u16),

    /// The service returned a country code with no entry in the ISO table.
    #[error("Unknown country code: {0}")]
    UnknownCountryCode(String),
}

/// Configuration for the geolocation client.
#[derive(Debug, Clone)]
pub struct GeoConfig {
    /// Base URL of the lookup service.
    pub api_url: String,
    /// Per-call HTTP timeout.
    pub timeout: Duration,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GeoConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable           | Default                  |
    /// |--------------------|--------------------------|
    /// | `GEO_API_URL`      | `https://api.country.is` |
    /// | `GEO_TIMEOUT_SECS` | `5`                      |
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("GEO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("GEO_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        }
    }
}

/// Wire format returned by the lookup service.
#[derive(Debug, Deserialize)]
struct LookupResponse {
    /// ISO 3166-1 alpha-2 code, e.g. `"CA"`.
    country: String,
}

/// A resolved country: alpha-2 code plus English name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCountry {
    pub iso_code: String,
    pub name: String,
}

/// Client for resolving the country behind an IP address.
#[derive(Debug, Clone)]
pub struct GeoClient {
    client: reqwest::Client,
    api_url: String,
}

impl GeoClient {
    /// Create a new client with a pre-configured HTTP timeout.
    pub fn new(config: GeoConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            api_url: config.api_url,
        }
    }

    /// Resolve the country for `ip`.
    ///
    /// One HTTP round-trip plus a static table lookup; no persistence here.
    /// Callers decide whether the result is stored (see `CountryRepo`).
    pub async fn lookup_country(&self, ip: &str) -> Result<ResolvedCountry, GeoError> {
        let url = format!("{}/{}", self.api_url.trim_end_matches('/'), ip);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeoError::HttpStatus(response.status().as_u16()));
        }

        let body: LookupResponse = response.json().await?;
        let code = body.country.to_uppercase();

        let name = country_name(&code).ok_or_else(|| GeoError::UnknownCountryCode(code.clone()))?;

        Ok(ResolvedCountry {
            iso_code: code,
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = GeoConfig::default();
        assert_eq!(config.api_url, "https://api.country.is");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn error_display_unknown_code() {
        let err = GeoError::UnknownCountryCode("XX".to_string());
        assert_eq!(err.to_string(), "Unknown country code: XX");
    }

    #[test]
    fn error_display_http_status() {
        let err = GeoError::HttpStatus(503);
        assert_eq!(err.to_string(), "Geolocation service returned HTTP 503");
    }
}
