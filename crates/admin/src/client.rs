//! HTTP client for the management product API.
//!
//! Every call is a JSON `POST` with a bearer token. The HTTP status is not
//! inspected: whatever JSON the server answers with is handed back, and it
//! is up to the caller to decide what the body means. Only transport
//! failures and bodies that are not JSON surface as [`ApiError`].

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use catalog_products::{ProductFilter, ProductId};

use crate::ack::Acknowledgement;
use crate::config::CatalogConfig;

pub const LIST_ENDPOINT: &str = "item/list";
pub const STATUS_ENDPOINT: &str = "item/changeitemstatus";
pub const CREATE_ENDPOINT: &str = "item/add";

/// Separator the status endpoint uses to tell a bulk change from a single one.
pub const BULK_ID_SEPARATOR: &str = "|";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Operations the catalog store needs from the management API.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch one page of products. Returns the parsed body unmodified.
    async fn list_products(&self, filter: &ProductFilter) -> Result<Value, ApiError>;

    async fn set_status(&self, id: &ProductId, active: bool) -> Result<Acknowledgement, ApiError>;

    async fn bulk_set_status(
        &self,
        ids: &[ProductId],
        active: bool,
    ) -> Result<Acknowledgement, ApiError>;

    /// Forward `payload` as-is. Returns the parsed body unmodified.
    async fn create_product(&self, payload: &Value) -> Result<Value, ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusFlag {
    #[serde(rename = "ON")]
    On,
    #[serde(rename = "OFF")]
    Off,
}

impl From<bool> for StatusFlag {
    fn from(active: bool) -> Self {
        if active { StatusFlag::On } else { StatusFlag::Off }
    }
}

/// Request body for the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub id_barang: String,
    pub status: StatusFlag,
}

impl StatusChange {
    pub fn single(id: &ProductId, active: bool) -> Self {
        Self {
            id_barang: id.to_string(),
            status: active.into(),
        }
    }

    pub fn bulk(ids: &[ProductId], active: bool) -> Self {
        let joined = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(BULK_ID_SEPARATOR);

        Self {
            id_barang: joined,
            status: active.into(),
        }
    }
}

/// `reqwest`-backed [`CatalogApi`].
#[derive(Debug, Clone)]
pub struct RemoteCatalogClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl RemoteCatalogClient {
    pub fn new(config: &CatalogConfig) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    pub fn with_http(http: reqwest::Client, config: &CatalogConfig) -> Self {
        Self {
            http,
            api_base: config.product_api_base(),
            token: config.token().to_string(),
        }
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.api_base, endpoint)
    }

    async fn post<B>(&self, endpoint: &str, body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.endpoint_url(endpoint);
        tracing::debug!(%url, "posting to management API");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(
                %url,
                status = status.as_u16(),
                "management API answered with non-success status"
            );
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CatalogApi for RemoteCatalogClient {
    async fn list_products(&self, filter: &ProductFilter) -> Result<Value, ApiError> {
        self.post(LIST_ENDPOINT, filter).await
    }

    async fn set_status(&self, id: &ProductId, active: bool) -> Result<Acknowledgement, ApiError> {
        let change = StatusChange::single(id, active);
        tracing::debug!(
            id_barang = %change.id_barang,
            status = ?change.status,
            "updating product status"
        );

        let body = self.post(STATUS_ENDPOINT, &change).await?;
        Ok(Acknowledgement::from_body(body))
    }

    async fn bulk_set_status(
        &self,
        ids: &[ProductId],
        active: bool,
    ) -> Result<Acknowledgement, ApiError> {
        let change = StatusChange::bulk(ids, active);
        tracing::debug!(
            id_barang = %change.id_barang,
            status = ?change.status,
            "bulk updating product status"
        );

        let body = self.post(STATUS_ENDPOINT, &change).await?;
        Ok(Acknowledgement::from_body(body))
    }

    async fn create_product(&self, payload: &Value) -> Result<Value, ApiError> {
        self.post(CREATE_ENDPOINT, payload).await
    }
}
