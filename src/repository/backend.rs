//! Backend resource access.
//!
//! # Responsibilities
//! - Define the four calls the repository needs from the REST resource
//! - Implement them over HTTP with reqwest
//! - Tag every request with a request id for log correlation

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use crate::config::BackendConfig;
use crate::domain::{ClientFields, ClientId, Cliente};
use crate::repository::error::TransportError;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Conventional REST collection of client records.
#[async_trait]
pub trait ClientBackend: Send + Sync {
    /// `GET /clientes`
    async fn fetch_all(&self) -> Result<Vec<Cliente>, TransportError>;

    /// `POST /clientes`
    async fn insert(&self, fields: &ClientFields) -> Result<Cliente, TransportError>;

    /// `PUT /clientes/{id}`
    async fn replace(&self, id: &ClientId, record: &Cliente) -> Result<Cliente, TransportError>;

    /// `DELETE /clientes/{id}`
    async fn remove(&self, id: &ClientId) -> Result<(), TransportError>;
}

/// reqwest-backed client for the `/clientes` resource.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    collection_url: Url,
}

impl HttpBackend {
    /// Build a backend from configuration.
    pub fn new(config: &BackendConfig) -> Result<Self, TransportError> {
        let collection_url = config
            .collection_url()
            .map_err(|e| TransportError::Unavailable(format!("invalid backend URL: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        tracing::info!(url = %collection_url, "HTTP backend ready");
        Ok(Self { client, collection_url })
    }

    /// URL of the collection this backend talks to.
    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    fn item_url(&self, id: &ClientId) -> Url {
        let mut url = self.collection_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response, TransportError> {
        let request_id = Uuid::new_v4();
        let request = self
            .client
            .request(method.clone(), url.clone())
            .header(REQUEST_ID_HEADER, request_id.to_string());

        tracing::debug!(%request_id, %method, %url, "Backend request");

        let response = build(request).send().await.map_err(|e| {
            tracing::warn!(%request_id, %method, %url, error = %e, "Backend request failed");
            TransportError::Request(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%request_id, %method, %url, status = status.as_u16(), "Backend returned error status");
            return Err(TransportError::Status { status: status.as_u16(), body });
        }

        tracing::debug!(%request_id, status = status.as_u16(), "Backend response");
        Ok(response)
    }
}

#[async_trait]
impl ClientBackend for HttpBackend {
    async fn fetch_all(&self) -> Result<Vec<Cliente>, TransportError> {
        let response = self.send(Method::GET, self.collection_url.clone(), |r| r).await?;
        Ok(response.json().await?)
    }

    async fn insert(&self, fields: &ClientFields) -> Result<Cliente, TransportError> {
        let response = self
            .send(Method::POST, self.collection_url.clone(), |r| r.json(fields))
            .await?;
        Ok(response.json().await?)
    }

    async fn replace(&self, id: &ClientId, record: &Cliente) -> Result<Cliente, TransportError> {
        let response = self
            .send(Method::PUT, self.item_url(id), |r| r.json(record))
            .await?;
        Ok(response.json().await?)
    }

    async fn remove(&self, id: &ClientId) -> Result<(), TransportError> {
        self.send(Method::DELETE, self.item_url(id), |r| r).await?;
        Ok(())
    }
}
