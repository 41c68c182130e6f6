//! Weather gateway.
//!
//! Forwards the caller's `lat`/`lon` values to the configured OpenWeather endpoint
//! verbatim and relays the JSON body unchanged. Rejections of those values are left to
//! the upstream. There is no caching, retry or rate limiting.

use serde_json::Value;

use crate::server::{config::WeatherConfig, error::weather::WeatherError};

/// Service for current weather lookups.
pub struct WeatherService<'a> {
    http_client: &'a reqwest::Client,
    config: &'a WeatherConfig,
}

impl<'a> WeatherService<'a> {
    /// Creates a new WeatherService.
    ///
    /// # Arguments
    /// - `http_client` - Shared HTTP client, configured without redirects
    /// - `config` - Upstream endpoint and credential
    pub fn new(http_client: &'a reqwest::Client, config: &'a WeatherConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Returns the API key, or `WeatherError::MissingApiKey` when none is configured.
    pub fn ensure_configured(&self) -> Result<&'a str, WeatherError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(WeatherError::MissingApiKey)
    }

    /// Fetches current conditions for the given coordinates.
    ///
    /// Queries the upstream with `lat`, `lon`, `appid` and `units=metric`. Absent
    /// coordinates are omitted from the query.
    ///
    /// # Arguments
    /// - `lat` - Raw latitude as received from the client
    /// - `lon` - Raw longitude as received from the client
    ///
    /// # Returns
    /// - `Ok(Value)` - The upstream JSON body
    /// - `Err(WeatherError::MissingApiKey)` - No credential is configured
    /// - `Err(WeatherError::Upstream(_))` - Transport failure, non-success status or
    ///   a body that is not JSON
    pub async fn current(
        &self,
        lat: Option<&str>,
        lon: Option<&str>,
    ) -> Result<Value, WeatherError> {
        let api_key = self.ensure_configured()?;

        let mut query = Vec::with_capacity(4);
        if let Some(lat) = lat {
            query.push(("lat", lat));
        }
        if let Some(lon) = lon {
            query.push(("lon", lon));
        }
        query.push(("appid", api_key));
        query.push(("units", "metric"));

        let body = self
            .http_client
            .get(&self.config.url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(body)
    }
}
