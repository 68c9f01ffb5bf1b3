//! # Action Executor
//!
//! Turns a classified message into exactly one [`ActionResult`].
//!
//! Execution happens in two steps:
//!
//! 1. [`ActionExecutor::resolve`] extracts and validates the payload. A command
//!    whose required parameters are missing stops here with
//!    [`ActionError::MissingParameters`] and no backend is called.
//! 2. [`ActionExecutor::execute`] performs the side effect through the primary
//!    [`ActionBackend`]. For add-stock only, a failed call is retried once on the
//!    fallback backend; the result is flagged `simulated` when the backend that
//!    served it reports [`BackendMode::Simulated`].
//!
//! [`ActionExecutor::handle`] runs both and renders every error into a chat
//! message, so it never fails. Order commands and non-listing delivery commands
//! only return guidance; nothing is created from chat text except stock
//! additions and new products.

pub mod messages;

use crate::backend::{ActionBackend, AddStockRequest, BackendMode, CreateProductRequest};
use crate::config::AssistantConfig;
use crate::error::{ActionError, BackendError};
use crate::extract;
use crate::model::{
    ActionResult, Catalog, Category, Command, FailureKind, InventoryActionPayload, Payload,
    ProductCreationPayload,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Words that send a production message to product creation instead of batch guidance.
const CREATION_TRIGGERS: &[&str] = &["nuevo", "crear", "sabor"];

/// Words that turn a delivery message into a driver listing.
const DRIVER_LISTING_TRIGGERS: &[&str] = &["disponibles", "repartidores", "drivers"];

fn contains_any(lower_text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| lower_text.contains(*w))
}

fn to_data<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

pub struct ActionExecutor {
    catalog: Catalog,
    primary: Arc<dyn ActionBackend>,
    fallback: Option<Arc<dyn ActionBackend>>,
    fallback_product_id: u32,
    default_price: f64,
    default_batch_quantity: f64,
}

impl ActionExecutor {
    /// `fallback` is only consulted for add-stock.
    pub fn new(
        primary: Arc<dyn ActionBackend>,
        fallback: Option<Arc<dyn ActionBackend>>,
        config: &AssistantConfig,
    ) -> Self {
        Self {
            catalog: Catalog::default(),
            primary,
            fallback,
            fallback_product_id: config.fallback_product_id,
            default_price: config.default_price,
            default_batch_quantity: config.default_batch_quantity,
        }
    }

    pub fn primary_mode(&self) -> BackendMode {
        self.primary.mode()
    }

    /// Classify-independent entry point: resolves and executes, rendering any error.
    #[instrument(skip(self, text))]
    pub async fn handle(&self, category: Category, text: &str) -> ActionResult {
        debug!(text, "handle called");
        let result = match self.resolve(category, text) {
            Ok(command) => self.execute(&command).await,
            Err(e) => {
                info!(error = %e, "Command needs more information");
                self.render_missing(category, e)
            }
        };
        info!(
            succeeded = result.succeeded,
            simulated = result.simulated,
            failure = ?result.failure,
            "Command handled"
        );
        result
    }

    /// Builds the [`Command`] for `text`, attaching the payload its category needs.
    pub fn resolve(&self, category: Category, text: &str) -> Result<Command, ActionError> {
        let command = Command::new(text, category);
        match category {
            Category::Inventory => {
                let payload =
                    extract::inventory_payload(&self.catalog, text, self.fallback_product_id)
                        .ok_or_else(|| {
                            ActionError::MissingParameters("quantity and product".into())
                        })?;
                Ok(command.with_payload(Payload::AddStock(payload)))
            }
            Category::Production if is_product_creation(text) => {
                let name = extract::product_name(text)
                    .ok_or_else(|| ActionError::MissingParameters("product name".into()))?;
                let price = extract::price(text).unwrap_or(self.default_price);
                Ok(command.with_payload(Payload::CreateProduct(ProductCreationPayload {
                    name,
                    price,
                })))
            }
            _ => Ok(command),
        }
    }

    /// Runs a resolved command. Backend failures are rendered, never returned.
    pub async fn execute(&self, command: &Command) -> ActionResult {
        match (command.category, &command.payload) {
            (Category::Inventory, Some(Payload::AddStock(payload))) => self.add_stock(payload).await,
            (Category::Inventory, _) => self.render_missing(
                Category::Inventory,
                ActionError::MissingParameters("quantity and product".into()),
            ),
            (Category::Production, Some(Payload::CreateProduct(payload))) => {
                self.create_product(payload).await
            }
            (Category::Production, _) => self.batch_guidance(&command.text),
            (Category::Order, _) => ActionResult::prompt(messages::ORDER_PROMPT),
            (Category::Delivery, _) => {
                if contains_any(&command.text.to_lowercase(), DRIVER_LISTING_TRIGGERS) {
                    self.list_drivers().await
                } else {
                    ActionResult::prompt(messages::DELIVERY_HELP)
                }
            }
            (Category::None, _) => ActionResult::prompt(messages::NOT_A_COMMAND),
        }
    }

    fn render_missing(&self, category: Category, error: ActionError) -> ActionResult {
        let message = match category {
            Category::Production => messages::MISSING_PRODUCT_NAME.to_string(),
            _ => messages::missing_stock_info(self.catalog.canonical_names()),
        };
        ActionResult::failed(error.kind(), message)
    }

    // --- add stock ---

    #[instrument(skip(self, payload), fields(product_id = payload.product_id, quantity = payload.quantity, unit = %payload.unit))]
    async fn add_stock(&self, payload: &InventoryActionPayload) -> ActionResult {
        match self.try_add_stock(payload).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "add_stock failed on every backend");
                ActionResult::failed(e.kind(), messages::stock_connection_error(payload))
            }
        }
    }

    async fn try_add_stock(
        &self,
        payload: &InventoryActionPayload,
    ) -> Result<ActionResult, ActionError> {
        let request = AddStockRequest {
            product_id: payload.product_id,
            quantity: payload.quantity,
            unit: payload.unit,
        };

        let (response, mode) = match self.primary.add_stock(&request).await {
            Ok(response) => (response, self.primary.mode()),
            Err(e) => {
                let Some(fallback) = &self.fallback else {
                    return Err(e.into());
                };
                warn!(error = %e, "add_stock failed, using simulated backend");
                (fallback.add_stock(&request).await?, fallback.mode())
            }
        };

        let simulated = mode.is_simulated();
        let message = if simulated {
            messages::stock_simulated(payload, &response)
        } else {
            messages::stock_added(payload, &response)
        };
        info!(new_stock = response.new_stock, simulated, "Stock added");
        Ok(ActionResult::executed(message, to_data(&response), simulated))
    }

    // --- production ---

    #[instrument(skip(self, payload), fields(name = %payload.name, price = payload.price))]
    async fn create_product(&self, payload: &ProductCreationPayload) -> ActionResult {
        match self.try_create_product(payload).await {
            Ok(result) => result,
            Err(ActionError::ServerRejected(message)) => {
                warn!(%message, "Product name collision");
                ActionResult::failed(
                    FailureKind::ServerRejected,
                    messages::duplicate_product(&message),
                )
            }
            Err(e) => {
                warn!(error = %e, "create_product failed");
                ActionResult::failed(e.kind(), messages::create_error(&payload.name))
            }
        }
    }

    async fn try_create_product(
        &self,
        payload: &ProductCreationPayload,
    ) -> Result<ActionResult, ActionError> {
        let request = CreateProductRequest::ai_created(payload.name.clone(), payload.price);
        let response = self
            .primary
            .create_product(&request)
            .await
            .map_err(|e| match e {
                BackendError::Rejected { ref message, .. } if e.is_duplicate() => {
                    ActionError::ServerRejected(message.clone())
                }
                other => ActionError::Transport(other),
            })?;

        let simulated = self.primary.mode().is_simulated();
        info!(product_id = response.product.id, simulated, "Product created");
        Ok(ActionResult::executed(
            messages::product_created(&response.product, &payload.name),
            to_data(&response),
            simulated,
        ))
    }

    fn batch_guidance(&self, text: &str) -> ActionResult {
        let lower = text.to_lowercase();
        let quantity = extract::quantity(text)
            .map(|q| q.amount)
            .unwrap_or(self.default_batch_quantity);
        let name = extract::batch_product_name(&lower);
        debug!(name, quantity, "Production batch guidance");
        ActionResult::prompt(messages::batch_guidance(
            name,
            quantity,
            self.catalog.canonical_names(),
        ))
    }

    // --- delivery ---

    #[instrument(skip(self))]
    async fn list_drivers(&self) -> ActionResult {
        match self.primary.list_drivers().await {
            Ok(roster) if roster.success => ActionResult::executed(
                messages::driver_status(&roster),
                to_data(&roster),
                self.primary.mode().is_simulated(),
            ),
            Ok(_) => {
                warn!("Driver listing reported success=false");
                ActionResult::failed(
                    FailureKind::ServerRejected,
                    messages::drivers_connection_error(),
                )
            }
            Err(e) => {
                warn!(error = %e, "list_drivers failed");
                ActionResult::failed(
                    ActionError::from(e).kind(),
                    messages::drivers_connection_error(),
                )
            }
        }
    }
}

fn is_product_creation(text: &str) -> bool {
    contains_any(&text.to_lowercase(), CREATION_TRIGGERS)
}
