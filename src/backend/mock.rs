//! # Mock Backend
//!
//! An [`ActionBackend`] that answers from a queue of expectations, for testing
//! the executor without a server.
//!
//! ```ignore
//! let mock = MockBackend::new();
//! mock.expect_add_stock().return_err(BackendError::Transport("refused".into()));
//!
//! let executor = ActionExecutor::new(Arc::new(mock.clone()), None, &config);
//! executor.handle(Category::Inventory, "Suma 15 kg de chocolate").await;
//!
//! mock.verify(); // Ensures all expectations were met
//! ```
//!
//! Every call is recorded, so "no request was sent" is `mock.calls().is_empty()`.
//! A call that does not match the next expectation panics.

use super::{
    ActionBackend, AddStockRequest, AddStockResponse, BackendMode, CreateProductRequest,
    CreateProductResponse,
};
use crate::error::BackendError;
use crate::model::DriverRoster;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

enum Expectation {
    AddStock(Result<AddStockResponse, BackendError>),
    CreateProduct(Result<CreateProductResponse, BackendError>),
    ListDrivers(Result<DriverRoster, BackendError>),
}

/// A request the mock received.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    AddStock(AddStockRequest),
    CreateProduct(CreateProductRequest),
    ListDrivers,
}

type Queue = Arc<Mutex<VecDeque<Expectation>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Expectation-driven backend double. Clones share the same queue.
#[derive(Clone)]
pub struct MockBackend {
    mode: BackendMode,
    expectations: Queue,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// A mock that reports [`BackendMode::Live`].
    pub fn new() -> Self {
        Self::with_mode(BackendMode::Live)
    }

    /// A mock that reports [`BackendMode::Simulated`], for use as a fallback.
    pub fn simulated() -> Self {
        Self::with_mode(BackendMode::Simulated)
    }

    fn with_mode(mode: BackendMode) -> Self {
        Self {
            mode,
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn expect_add_stock(&self) -> AddStockExpectationBuilder {
        AddStockExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_create_product(&self) -> CreateProductExpectationBuilder {
        CreateProductExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_list_drivers(&self) -> ListDriversExpectationBuilder {
        ListDriversExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Requests received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn next(&self, call: RecordedCall) -> Expectation {
        lock(&self.calls).push(call.clone());
        lock(&self.expectations)
            .pop_front()
            .unwrap_or_else(|| panic!("Unexpected request: {call:?}"))
    }
}

#[async_trait]
impl ActionBackend for MockBackend {
    fn mode(&self) -> BackendMode {
        self.mode
    }

    async fn add_stock(&self, request: &AddStockRequest) -> Result<AddStockResponse, BackendError> {
        match self.next(RecordedCall::AddStock(request.clone())) {
            Expectation::AddStock(response) => response,
            _ => panic!("Expectation mismatch: got add_stock"),
        }
    }

    async fn create_product(
        &self,
        request: &CreateProductRequest,
    ) -> Result<CreateProductResponse, BackendError> {
        match self.next(RecordedCall::CreateProduct(request.clone())) {
            Expectation::CreateProduct(response) => response,
            _ => panic!("Expectation mismatch: got create_product"),
        }
    }

    async fn list_drivers(&self) -> Result<DriverRoster, BackendError> {
        match self.next(RecordedCall::ListDrivers) {
            Expectation::ListDrivers(response) => response,
            _ => panic!("Expectation mismatch: got list_drivers"),
        }
    }
}

/// Builder for `add_stock` expectations.
pub struct AddStockExpectationBuilder {
    expectations: Queue,
}

impl AddStockExpectationBuilder {
    pub fn return_ok(self, response: AddStockResponse) {
        lock(&self.expectations).push_back(Expectation::AddStock(Ok(response)));
    }

    pub fn return_err(self, error: BackendError) {
        lock(&self.expectations).push_back(Expectation::AddStock(Err(error)));
    }
}

/// Builder for `create_product` expectations.
pub struct CreateProductExpectationBuilder {
    expectations: Queue,
}

impl CreateProductExpectationBuilder {
    pub fn return_ok(self, response: CreateProductResponse) {
        lock(&self.expectations).push_back(Expectation::CreateProduct(Ok(response)));
    }

    pub fn return_err(self, error: BackendError) {
        lock(&self.expectations).push_back(Expectation::CreateProduct(Err(error)));
    }
}

/// Builder for `list_drivers` expectations.
pub struct ListDriversExpectationBuilder {
    expectations: Queue,
}

impl ListDriversExpectationBuilder {
    pub fn return_ok(self, roster: DriverRoster) {
        lock(&self.expectations).push_back(Expectation::ListDrivers(Ok(roster)));
    }

    pub fn return_err(self, error: BackendError) {
        lock(&self.expectations).push_back(Expectation::ListDrivers(Err(error)));
    }
}
