//! Itinerary API Client
//!
//! Thin wrapper over the itinerary HTTP API (create, fetch and patch
//! itineraries, add stops, fetch the grid). Every request is bounded by the
//! configured timeout.

use crate::config::ApiClientConfig;
use crate::models::itinerary::{Itinerary, ItineraryGrid, ItineraryPatch, ItinerarySubmission, NewStop};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("request timed out")]
    Timeout,
    #[error("API responded with {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for ApiClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiClientError::Timeout
        } else {
            ApiClientError::Transport(err)
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone)]
pub struct ItineraryApiClient {
    http: Client,
    base_url: Url,
}

impl ItineraryApiClient {
    pub fn new(config: &ApiClientConfig) -> Result<Self, ApiClientError> {
        // Url::join drops the last segment unless the base ends with a slash
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, base_url })
    }

    /// Client configured from `GLOBETROTTER_API_URL` and
    /// `GLOBETROTTER_API_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, ApiClientError> {
        Self::new(&ApiClientConfig::from_env())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ApiClientError> {
        Ok(self.base_url.join(path)?)
    }

    pub async fn create_itinerary(
        &self,
        submission: &ItinerarySubmission,
    ) -> Result<Itinerary, ApiClientError> {
        let url = self.url("itineraries")?;
        self.send(self.http.post(url).json(submission)).await
    }

    pub async fn get_itinerary(&self, id: Uuid) -> Result<Itinerary, ApiClientError> {
        let url = self.url(&format!("itineraries/{}", id))?;
        self.send(self.http.get(url)).await
    }

    pub async fn patch_itinerary(
        &self,
        id: Uuid,
        patch: &ItineraryPatch,
    ) -> Result<Itinerary, ApiClientError> {
        let url = self.url(&format!("itineraries/{}", id))?;
        self.send(self.http.patch(url).json(patch)).await
    }

    pub async fn add_stop(&self, id: Uuid, stop: &NewStop) -> Result<Itinerary, ApiClientError> {
        let url = self.url(&format!("itineraries/{}/stops", id))?;
        self.send(self.http.post(url).json(stop)).await
    }

    pub async fn get_grid(&self, id: Uuid) -> Result<ItineraryGrid, ApiClientError> {
        let url = self.url(&format!("itineraries/{}/grid", id))?;
        self.send(self.http.get(url)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiClientError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    log::warn!(
                        "Itinerary API request failed with {} and the body could not be read: {}",
                        status,
                        err
                    );
                    return Err(err.into());
                }
            };
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|parsed| parsed.error)
                .unwrap_or(body);
            log::warn!("Itinerary API request failed with {}: {}", status, message);
            return Err(ApiClientError::Status { status, message });
        }

        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = ApiClientConfig::new("http://localhost:9000/api", Duration::from_secs(1));
        let client = ItineraryApiClient::new(&config).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:9000/api/");

        let id = Uuid::nil();
        assert_eq!(
            client.url(&format!("itineraries/{}/grid", id)).unwrap().as_str(),
            format!("http://localhost:9000/api/itineraries/{}/grid", id)
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ApiClientConfig::new("not a url", Duration::from_secs(1));
        assert!(matches!(
            ItineraryApiClient::new(&config),
            Err(ApiClientError::InvalidUrl(_))
        ));
    }
}
