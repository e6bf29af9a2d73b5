use async_trait::async_trait;
use geopin_core::config::LayeredConfig;
use geopin_core::error::{GeopinError, Result};
use geopin_core::models::{Distance, GeoPoint, NearbyResult, NearestPlace, NewPlace, Place};
use geopin_core::ports::GeoQueryService;
use reqwest::{StatusCode, Url};
use std::time::Duration;

use crate::dto::{CreatePlaceRequest, CreatePlaceResponse, DistanceResponse, PlaceWithDistance};

/// Header carrying the creation key of `POST /places`
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// HTTP implementation of the place service port
pub struct HttpGeoClient {
    /// Base URL without trailing slash (e.g., "https://gis.example.com/api")
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpGeoClient {
    /// Create a client using the transport's default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a client with an optional request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| GeopinError::ConfigInvalid {
            key: "request_timeout_secs".to_string(),
            reason: format!("Failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Create a client from layered configuration
    pub fn from_config(config: &LayeredConfig) -> Result<Self> {
        Self::with_timeout(
            config.api_url.value.clone(),
            config.request_timeout_secs.value.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        let url = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params)
        };
        url.map_err(|e| GeopinError::ConfigInvalid {
            key: "api_url".to_string(),
            reason: format!("Cannot build request URL from '{}': {}", raw, e),
        })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                GeopinError::Network(format!("request to {} timed out", self.base_url))
            } else {
                GeopinError::Network(format!("failed to reach {}: {}", self.base_url, e))
            }
        })
    }
}

async fn unexpected(response: reqwest::Response) -> GeopinError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    GeopinError::UnexpectedResponse {
        status: status.as_u16(),
        reason: if body.is_empty() {
            status.canonical_reason().unwrap_or("unknown status").to_string()
        } else {
            body
        },
    }
}

/// Statuses that mean the service looked at the place and refused it
fn is_rejection(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY
    )
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status().as_u16();
    response.json().await.map_err(|e| GeopinError::UnexpectedResponse {
        status,
        reason: format!("Failed to parse place service response: {}", e),
    })
}

#[async_trait]
impl GeoQueryService for HttpGeoClient {
    async fn create_place(&self, place: &NewPlace) -> Result<Place> {
        let url = self.endpoint("/places", &[])?;
        let request = self
            .client
            .post(url)
            .header(IDEMPOTENCY_HEADER, place.idempotency_key.to_string())
            .json(&CreatePlaceRequest::from(place));

        let response = self.send(request).await?;
        let status = response.status();

        if matches!(status, StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS) {
            tracing::warn!(%status, "place service did not accept '{}' in time", place.name);
            return Err(GeopinError::Network(format!(
                "place service at {} answered {}; the place may or may not have been created",
                self.base_url, status
            )));
        }

        if is_rejection(status) {
            let reason = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "place service rejected '{}'", place.name);
            return Err(GeopinError::Validation {
                field: "place".to_string(),
                reason: if reason.is_empty() {
                    format!("rejected by place service ({})", status)
                } else {
                    reason
                },
            });
        }

        if status != StatusCode::CREATED {
            return Err(unexpected(response).await);
        }

        let created: CreatePlaceResponse = decode(response).await?;
        let created = created.into_place(place)?;
        tracing::info!("Created place '{}' at {}", created.name, created.location);
        Ok(created)
    }

    async fn find_nearby(&self, origin: GeoPoint, radius: Distance) -> Result<NearbyResult> {
        let url = self.endpoint(
            "/places/nearby",
            &[
                ("latitude", origin.latitude().to_string()),
                ("longitude", origin.longitude().to_string()),
                ("radius", radius.to_meters().to_string()),
            ],
        )?;

        let response = self.send(self.client.get(url)).await?;
        if response.status() != StatusCode::OK {
            return Err(unexpected(response).await);
        }

        let entries: Vec<PlaceWithDistance> = decode(response).await?;
        let places = entries
            .into_iter()
            .map(PlaceWithDistance::into_nearby)
            .collect::<Result<NearbyResult>>()?;

        tracing::info!("Found {} places within {} m of {}", places.len(), radius.to_meters(), origin);
        Ok(places)
    }

    async fn find_nearest(&self, origin: GeoPoint) -> Result<NearestPlace> {
        let url = self.endpoint(
            "/places/nearest",
            &[
                ("latitude", origin.latitude().to_string()),
                ("longitude", origin.longitude().to_string()),
            ],
        )?;

        let response = self.send(self.client.get(url)).await?;
        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                return Err(GeopinError::NotFound(format!("no place near {}", origin)));
            }
            _ => return Err(unexpected(response).await),
        }

        let entry: Option<PlaceWithDistance> = decode(response).await?;
        let nearest = entry
            .ok_or_else(|| GeopinError::NotFound(format!("no place near {}", origin)))?
            .into_nearest()?;

        tracing::info!("Nearest place to {} is '{}'", origin, nearest.place.name);
        Ok(nearest)
    }

    async fn compute_distance(&self, a: GeoPoint, b: GeoPoint) -> Result<f64> {
        let url = self.endpoint(
            "/places/distance",
            &[
                ("lat1", a.latitude().to_string()),
                ("lon1", a.longitude().to_string()),
                ("lat2", b.latitude().to_string()),
                ("lon2", b.longitude().to_string()),
            ],
        )?;

        let response = self.send(self.client.get(url)).await?;
        if response.status() != StatusCode::OK {
            return Err(unexpected(response).await);
        }

        let distance: DistanceResponse = decode(response).await?;
        let meters = distance.into_meters()?;
        tracing::info!("Distance between {} and {} is {} m", a, b, meters);
        Ok(meters)
    }
}
