//! # Simulated Backend
//!
//! An in-memory stand-in for the Venezia REST API, run as an actor.
//!
//! [`SimulatedActor`] owns the product store and driver roster and processes
//! requests sequentially in its own Tokio task, so the store needs no locks.
//! [`SimulatedBackend`] is the cloneable handle that sends requests over the
//! actor's inbox and awaits a oneshot reply.
//!
//! Nothing here is persisted. Every result served by this backend reports
//! [`BackendMode::Simulated`], and the executor flags it as such.

use super::{
    ActionBackend, AddStockRequest, AddStockResponse, BackendMode, CreateProductRequest,
    CreateProductResponse, CreatedProduct, StockedProduct,
};
use crate::error::BackendError;
use crate::model::{Driver, DriverRoster};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

type Reply<T> = oneshot::Sender<Result<T, BackendError>>;

/// Messages accepted by [`SimulatedActor`].
#[derive(Debug)]
pub enum SimulatedRequest {
    AddStock {
        request: AddStockRequest,
        respond_to: Reply<AddStockResponse>,
    },
    CreateProduct {
        request: CreateProductRequest,
        respond_to: Reply<CreateProductResponse>,
    },
    ListDrivers {
        respond_to: Reply<DriverRoster>,
    },
}

#[derive(Debug, Clone)]
struct StoredProduct {
    name: String,
    price: f64,
    stock: f64,
    category: String,
}

/// Products the simulated store starts with: `(id, name, price, stock)`.
pub const SEED_PRODUCTS: &[(u32, &str, f64, f64)] = &[
    (1, "Chocolate Amargo", 3500.0, 25.0),
    (2, "Vainilla", 3200.0, 18.0),
    (3, "Dulce de Leche", 3800.0, 12.0),
    (4, "Frutilla", 3600.0, 20.0),
    (5, "Menta Granizada", 3700.0, 15.0),
];

/// The roster the simulated driver listing returns.
pub fn seed_drivers() -> Vec<Driver> {
    vec![
        Driver::new("Juan Pérez", "Moto Honda", true, 2),
        Driver::new("María García", "Auto Fiat", true, 1),
        Driver::new("Carlos López", "Bicicleta", false, 0),
        Driver::new("Ana Rodríguez", "Moto Yamaha", true, 3),
    ]
    .into_iter()
    .zip(1..)
    .map(|(driver, id)| Driver {
        id: Some(id),
        ..driver
    })
    .collect()
}

/// Server half of the simulated backend.
pub struct SimulatedActor {
    receiver: mpsc::Receiver<SimulatedRequest>,
    products: BTreeMap<u32, StoredProduct>,
    drivers: Vec<Driver>,
    next_id: u32,
}

impl SimulatedActor {
    /// Creates a seeded actor and its client. Call [`run`](Self::run) in a task.
    pub fn new(buffer_size: usize) -> (Self, SimulatedBackend) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let products: BTreeMap<u32, StoredProduct> = SEED_PRODUCTS
            .iter()
            .map(|&(id, name, price, stock)| {
                (
                    id,
                    StoredProduct {
                        name: name.to_string(),
                        price,
                        stock,
                        category: super::ICE_CREAM_CATEGORY.to_string(),
                    },
                )
            })
            .collect();
        let next_id = products.keys().max().map_or(1, |max| max + 1);
        let actor = Self {
            receiver,
            products,
            drivers: seed_drivers(),
            next_id,
        };
        (actor, SimulatedBackend::new(sender))
    }

    /// Processes requests until every [`SimulatedBackend`] handle is dropped.
    pub async fn run(mut self) {
        info!(products = self.products.len(), "Simulated backend started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SimulatedRequest::AddStock { request, respond_to } => {
                    debug!(?request, "AddStock");
                    let result = self.add_stock(&request);
                    match &result {
                        Ok(response) => info!(
                            product_id = request.product_id,
                            new_stock = response.new_stock,
                            "Stock added"
                        ),
                        Err(e) => warn!(product_id = request.product_id, error = %e, "AddStock failed"),
                    }
                    let _ = respond_to.send(result);
                }
                SimulatedRequest::CreateProduct { request, respond_to } => {
                    debug!(?request, "CreateProduct");
                    let result = self.create_product(request);
                    match &result {
                        Ok(response) => info!(
                            product_id = response.product.id,
                            size = self.products.len(),
                            "Created"
                        ),
                        Err(e) => warn!(error = %e, "CreateProduct failed"),
                    }
                    let _ = respond_to.send(result);
                }
                SimulatedRequest::ListDrivers { respond_to } => {
                    debug!(drivers = self.drivers.len(), "ListDrivers");
                    let _ = respond_to.send(Ok(DriverRoster::new(self.drivers.clone())));
                }
            }
        }

        info!(products = self.products.len(), "Simulated backend shutdown");
    }

    fn add_stock(&mut self, request: &AddStockRequest) -> Result<AddStockResponse, BackendError> {
        let product = self
            .products
            .get_mut(&request.product_id)
            .ok_or_else(|| BackendError::Rejected {
                status: 404,
                message: "Product not found".to_string(),
            })?;
        product.stock += request.quantity;
        Ok(AddStockResponse {
            product: StockedProduct {
                name: product.name.clone(),
                price: product.price,
            },
            new_stock: product.stock,
        })
    }

    fn create_product(
        &mut self,
        request: CreateProductRequest,
    ) -> Result<CreateProductResponse, BackendError> {
        let name = request.name.trim();
        if name.is_empty() || !request.price.is_finite() || request.price <= 0.0 {
            return Err(BackendError::Rejected {
                status: 400,
                message: "Name and price are required".to_string(),
            });
        }

        let wanted = name.to_lowercase();
        if let Some(existing) = self.products.values().find(|p| {
            let have = p.name.to_lowercase();
            have.contains(&wanted) || wanted.contains(&have)
        }) {
            return Err(BackendError::Rejected {
                status: 400,
                message: format!(
                    "A product similar to \"{}\" already exists: \"{}\"",
                    name, existing.name
                ),
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        let stored = StoredProduct {
            name: name.to_string(),
            price: request.price,
            stock: request.initial_stock,
            category: request.category,
        };
        let product = CreatedProduct {
            id,
            name: stored.name.clone(),
            price: stored.price,
            stock: stored.stock,
            category: stored.category.clone(),
        };
        self.products.insert(id, stored);
        Ok(CreateProductResponse { product })
    }
}

/// Client half of the simulated backend.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    sender: mpsc::Sender<SimulatedRequest>,
}

impl SimulatedBackend {
    pub fn new(sender: mpsc::Sender<SimulatedRequest>) -> Self {
        Self { sender }
    }

    async fn call<T: Send>(
        &self,
        build: impl FnOnce(Reply<T>) -> SimulatedRequest + Send,
    ) -> Result<T, BackendError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| BackendError::ActorClosed)?;
        response.await.map_err(|_| BackendError::ActorDropped)?
    }
}

#[async_trait]
impl ActionBackend for SimulatedBackend {
    fn mode(&self) -> BackendMode {
        BackendMode::Simulated
    }

    async fn add_stock(&self, request: &AddStockRequest) -> Result<AddStockResponse, BackendError> {
        let request = request.clone();
        self.call(|respond_to| SimulatedRequest::AddStock {
            request,
            respond_to,
        })
        .await
    }

    async fn create_product(
        &self,
        request: &CreateProductRequest,
    ) -> Result<CreateProductResponse, BackendError> {
        let request = request.clone();
        self.call(|respond_to| SimulatedRequest::CreateProduct {
            request,
            respond_to,
        })
        .await
    }

    async fn list_drivers(&self) -> Result<DriverRoster, BackendError> {
        self.call(|respond_to| SimulatedRequest::ListDrivers { respond_to })
            .await
    }
}
