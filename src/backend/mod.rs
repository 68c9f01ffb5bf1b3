//! # Action Backends
//!
//! Every side effect the assistant performs goes through the [`ActionBackend`]
//! trait. Two implementations exist, selected by the executor as a strategy:
//!
//! - [`HttpBackend`] calls the Venezia REST API. Its results are real.
//! - [`SimulatedBackend`] is an in-memory actor that mimics the same endpoints.
//!   Its results are never persisted.
//!
//! Which one served a call is reported by [`ActionBackend::mode`], so "was this
//! real?" is answered by the type that did the work instead of by the wording of
//! a message. [`mock::MockBackend`] is an expectation-driven double for tests.

pub mod http;
pub mod mock;
pub mod simulated;

pub use http::HttpBackend;
pub use simulated::{SimulatedActor, SimulatedBackend};

use crate::error::BackendError;
use crate::model::{DriverRoster, Unit};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Whether a backend mutates the system of record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    Live,
    Simulated,
}

impl BackendMode {
    pub fn is_simulated(self) -> bool {
        matches!(self, BackendMode::Simulated)
    }
}

/// The operations the executor can perform.
#[async_trait]
pub trait ActionBackend: Send + Sync {
    fn mode(&self) -> BackendMode;

    /// Adds stock. Not idempotent: every call is a separate addition.
    async fn add_stock(&self, request: &AddStockRequest) -> Result<AddStockResponse, BackendError>;

    async fn create_product(
        &self,
        request: &CreateProductRequest,
    ) -> Result<CreateProductResponse, BackendError>;

    async fn list_drivers(&self) -> Result<DriverRoster, BackendError>;
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Body of `POST /api/executive/add-stock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddStockRequest {
    pub product_id: u32,
    pub quantity: f64,
    pub unit: Unit,
}

/// The product as echoed back by the add-stock endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockedProduct {
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddStockResponse {
    pub product: StockedProduct,
    /// Stock level after the addition, as computed by the server.
    pub new_stock: f64,
}

pub const AI_CREATED_CONTEXT: &str = "ai_created";
pub const ICE_CREAM_CATEGORY: &str = "Helado";

/// Body of `POST /api/executive/create-product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
    pub context: String,
    pub category: String,
    pub initial_stock: f64,
}

impl CreateProductRequest {
    /// An ice-cream product created from chat, starting with no stock.
    pub fn ai_created(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            context: AI_CREATED_CONTEXT.to_string(),
            category: ICE_CREAM_CATEGORY.to_string(),
            initial_stock: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedProduct {
    pub id: u32,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub stock: f64,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProductResponse {
    pub product: CreatedProduct,
}

/// Error body shape shared by the REST endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
