//! REST client for the Venezia API.

use super::{
    ActionBackend, AddStockRequest, AddStockResponse, BackendMode, CreateProductRequest,
    CreateProductResponse, ErrorBody,
};
use crate::config::AssistantConfig;
use crate::error::BackendError;
use crate::model::{Driver, DriverRoster};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

pub const ADD_STOCK_PATH: &str = "/api/executive/add-stock";
pub const CREATE_PRODUCT_PATH: &str = "/api/executive/create-product";
pub const DRIVERS_PATH: &str = "/api/drivers";

/// Builds the shared HTTP client. No timeout unless one is configured.
pub fn build_client(config: &AssistantConfig) -> Result<Client, BackendError> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(BackendError::from)
}

/// [`ActionBackend`] over HTTP. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AssistantConfig) -> Result<Self, BackendError> {
        Ok(Self::new(build_client(config)?, config.api_base_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        decode(response).await
    }
}

/// Maps non-2xx responses to [`BackendError::Rejected`], preferring the
/// server's `message` field over the raw body.
async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or(text);
        warn!(status = status.as_u16(), %message, "Request rejected");
        return Err(BackendError::Rejected {
            status: status.as_u16(),
            message,
        });
    }
    response
        .json::<R>()
        .await
        .map_err(|e| BackendError::Decode(e.to_string()))
}

/// The drivers endpoint answers either with the `{success, drivers}` envelope
/// or with a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum DriversBody {
    Roster(DriverRoster),
    List(Vec<Driver>),
}

#[async_trait]
impl ActionBackend for HttpBackend {
    fn mode(&self) -> BackendMode {
        BackendMode::Live
    }

    #[instrument(skip(self), fields(product_id = request.product_id))]
    async fn add_stock(&self, request: &AddStockRequest) -> Result<AddStockResponse, BackendError> {
        debug!(?request, "add_stock called");
        let response: AddStockResponse = self.post(ADD_STOCK_PATH, request).await?;
        info!(new_stock = response.new_stock, "Stock added");
        Ok(response)
    }

    #[instrument(skip(self), fields(name = %request.name))]
    async fn create_product(
        &self,
        request: &CreateProductRequest,
    ) -> Result<CreateProductResponse, BackendError> {
        debug!(?request, "create_product called");
        let response: CreateProductResponse = self.post(CREATE_PRODUCT_PATH, request).await?;
        info!(product_id = response.product.id, "Product created");
        Ok(response)
    }

    #[instrument(skip(self))]
    async fn list_drivers(&self) -> Result<DriverRoster, BackendError> {
        let response = self.client.get(self.url(DRIVERS_PATH)).send().await?;
        let roster = match decode::<DriversBody>(response).await? {
            DriversBody::Roster(roster) => roster,
            DriversBody::List(drivers) => DriverRoster::new(drivers),
        };
        info!(drivers = roster.drivers.len(), "Drivers listed");
        Ok(roster)
    }
}
