//! Drives the HTTP backend and the whole assistant against a stub Venezia API
//! served on an ephemeral port.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use venezia_assistant::assistant::Reply;
use venezia_assistant::backend::http::{ADD_STOCK_PATH, CREATE_PRODUCT_PATH, DRIVERS_PATH};
use venezia_assistant::backend::{
    ActionBackend, AddStockRequest, CreateProductRequest, HttpBackend,
};
use venezia_assistant::chat::CHAT_PATH;
use venezia_assistant::config::AssistantConfig;
use venezia_assistant::error::BackendError;
use venezia_assistant::executor::messages::SIMULATION_HEADER;
use venezia_assistant::lifecycle::AssistantSystem;
use venezia_assistant::model::{FailureKind, Unit};

// =============================================================================
// STUB SERVER
// =============================================================================

#[derive(Debug, Clone)]
struct StubProduct {
    name: String,
    price: f64,
    stock: f64,
    category: String,
}

#[derive(Clone, Default)]
struct Stub {
    products: Arc<Mutex<BTreeMap<u32, StubProduct>>>,
}

impl Stub {
    fn seeded() -> Self {
        let stub = Self::default();
        stub.products.lock().unwrap().insert(
            1,
            StubProduct {
                name: "Chocolate Amargo".into(),
                price: 3500.0,
                stock: 25.0,
                category: "Helado".into(),
            },
        );
        stub.products.lock().unwrap().insert(
            2,
            StubProduct {
                name: "Vainilla".into(),
                price: 3200.0,
                stock: 18.0,
                category: "Helado".into(),
            },
        );
        stub
    }
}

fn product_json(id: u32, p: &StubProduct) -> Value {
    json!({"id": id, "name": p.name, "price": p.price, "stock": p.stock, "category": p.category})
}

async fn add_stock(State(stub): State<Stub>, Json(req): Json<AddStockRequest>) -> Response {
    let mut products = stub.products.lock().unwrap();
    match products.get_mut(&req.product_id) {
        Some(product) => {
            product.stock += req.quantity;
            Json(json!({
                "success": true,
                "product": product_json(req.product_id, product),
                "new_stock": product.stock
            }))
            .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": "Product not found"})),
        )
            .into_response(),
    }
}

async fn create_product(
    State(stub): State<Stub>,
    Json(req): Json<CreateProductRequest>,
) -> Response {
    let mut products = stub.products.lock().unwrap();
    let wanted = req.name.to_lowercase();
    if let Some(existing) = products.values().find(|p| p.name.to_lowercase() == wanted) {
        let message = format!(
            "A product similar to \"{}\" already exists: \"{}\"",
            req.name, existing.name
        );
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": message})),
        )
            .into_response();
    }
    let id = products.keys().max().copied().unwrap_or(0) + 1;
    let product = StubProduct {
        name: req.name,
        price: req.price,
        stock: req.initial_stock,
        category: req.category,
    };
    let body = json!({"success": true, "product": product_json(id, &product)});
    products.insert(id, product);
    Json(body).into_response()
}

async fn get_product(State(stub): State<Stub>, Path(id): Path<u32>) -> Response {
    match stub.products.lock().unwrap().get(&id) {
        Some(product) => Json(product_json(id, product)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn drivers() -> Json<Value> {
    Json(json!([
        {"id": 1, "name": "María García", "vehicle": "Auto Fiat", "available": true, "current_orders": 1},
        {"id": 2, "name": "Carlos López", "vehicle": "Bicicleta", "available": false, "current_orders": 0}
    ]))
}

async fn chat(Json(body): Json<Value>) -> Json<Value> {
    let turns = body["history"].as_array().map_or(0, Vec::len);
    Json(json!({
        "success": true,
        "response": format!("stub: {} ({} turns)", body["message"].as_str().unwrap_or(""), turns)
    }))
}

fn stub_app(stub: Stub) -> Router {
    Router::new()
        .route(ADD_STOCK_PATH, post(add_stock))
        .route(CREATE_PRODUCT_PATH, post(create_product))
        .route("/api/products/:id", get(get_product))
        .route(DRIVERS_PATH, get(drivers))
        .route(CHAT_PATH, post(chat))
        .with_state(stub)
}

fn broken_app() -> Router {
    Router::new().route(
        ADD_STOCK_PATH,
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": false, "message": "db offline"})),
            )
        }),
    )
}

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn config(&self) -> AssistantConfig {
        AssistantConfig {
            api_base_url: self.base_url.clone(),
            request_timeout_secs: Some(5),
            ..AssistantConfig::default()
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn backend(server: &TestServer) -> HttpBackend {
    HttpBackend::from_config(&server.config()).unwrap()
}

// =============================================================================
// HTTP BACKEND
// =============================================================================

#[tokio::test]
async fn add_stock_is_not_idempotent() {
    let server = TestServer::spawn(stub_app(Stub::seeded())).await;
    let backend = backend(&server);
    let request = AddStockRequest {
        product_id: 1,
        quantity: 15.0,
        unit: Unit::Kg,
    };

    let first = backend.add_stock(&request).await.unwrap();
    let second = backend.add_stock(&request).await.unwrap();

    assert_eq!(first.new_stock, 40.0);
    assert_eq!(second.new_stock, 55.0);
    assert_eq!(second.product.name, "Chocolate Amargo");
}

#[tokio::test]
async fn rejection_carries_server_message() {
    let server = TestServer::spawn(stub_app(Stub::seeded())).await;
    let err = backend(&server)
        .add_stock(&AddStockRequest {
            product_id: 99,
            quantity: 1.0,
            unit: Unit::Kg,
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        BackendError::Rejected {
            status: 404,
            message: "Product not found".into()
        }
    );
}

#[tokio::test]
async fn created_product_reads_back_as_submitted() {
    let server = TestServer::spawn(stub_app(Stub::seeded())).await;
    let created = backend(&server)
        .create_product(&CreateProductRequest::ai_created("Cookies & Cream", 4000.0))
        .await
        .unwrap();

    let read: Value = reqwest::get(format!("{}/api/products/{}", server.base_url, created.product.id))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(read["name"], "Cookies & Cream");
    assert_eq!(read["price"], 4000.0);
    assert_eq!(read["stock"], 0.0);
    assert_eq!(read["category"], "Helado");
}

#[tokio::test]
async fn drivers_accepts_bare_array() {
    let server = TestServer::spawn(stub_app(Stub::seeded())).await;
    let roster = backend(&server).list_drivers().await.unwrap();
    assert!(roster.success);
    assert_eq!(roster.drivers.len(), 2);
    assert_eq!(roster.drivers[0].id, Some(1));
}

// =============================================================================
// FULL SYSTEM
// =============================================================================

#[tokio::test]
async fn stock_command_updates_the_real_inventory() {
    let stub = Stub::seeded();
    let server = TestServer::spawn(stub_app(stub.clone())).await;
    let mut system = AssistantSystem::new(&server.config()).unwrap();

    let reply = system.assistant.respond("Suma 15 kg de chocolate").await;

    let Reply::Action(result) = reply else {
        panic!("expected an action reply");
    };
    assert!(result.succeeded);
    assert!(!result.simulated);
    assert!(result.message.contains("al inventario real"));
    assert_eq!(stub.products.lock().unwrap()[&1].stock, 40.0);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn duplicate_flavor_is_reported_verbatim() {
    let server = TestServer::spawn(stub_app(Stub::seeded())).await;
    let mut system = AssistantSystem::new(&server.config()).unwrap();

    let reply = system
        .assistant
        .respond("Crear sabor Vainilla precio $3000")
        .await;

    let Reply::Action(result) = reply else {
        panic!("expected an action reply");
    };
    assert_eq!(result.failure, Some(FailureKind::ServerRejected));
    assert!(result
        .message
        .contains(r#"A product similar to "Vainilla" already exists: "Vainilla""#));
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn server_error_falls_back_to_simulation() {
    let server = TestServer::spawn(broken_app()).await;
    let mut system = AssistantSystem::new(&server.config()).unwrap();

    let reply = system.assistant.respond("Suma 15 kg de chocolate").await;

    let Reply::Action(result) = reply else {
        panic!("expected an action reply");
    };
    assert!(result.succeeded);
    assert!(result.simulated);
    assert!(result.message.starts_with(SIMULATION_HEADER));
    // Seeded simulated stock for Chocolate Amargo is 25.
    assert!(result.message.contains("- Stock simulado: 40 kg"));
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn driver_question_lists_both_sections() {
    let server = TestServer::spawn(stub_app(Stub::seeded())).await;
    let mut system = AssistantSystem::new(&server.config()).unwrap();

    let reply = system
        .assistant
        .respond("¿Qué repartidores están disponibles?")
        .await;

    assert!(reply.text().contains("✅ **Disponibles (1):**"));
    assert!(reply.text().contains("❌ **No disponibles (1):**"));
    assert!(reply.text().contains("Asignar orden #1234 a María García"));
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn chat_sends_history() {
    let server = TestServer::spawn(stub_app(Stub::seeded())).await;
    let mut system = AssistantSystem::new(&server.config()).unwrap();

    let first = system.assistant.respond("hola").await;
    let second = system.assistant.respond("gracias").await;

    assert_eq!(first, Reply::Chat("stub: hola (0 turns)".into()));
    assert_eq!(second, Reply::Chat("stub: gracias (2 turns)".into()));
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn unreachable_api_degrades_gracefully() {
    let config = AssistantConfig {
        api_base_url: "http://127.0.0.1:9".into(),
        ..AssistantConfig::default()
    };
    let mut system = AssistantSystem::new(&config).unwrap();

    let chat = system.assistant.respond("hola").await;
    assert!(matches!(chat, Reply::Canned(_)));

    let stock = system.assistant.respond("Agregar 2.5 kg de vainilla").await;
    let Reply::Action(result) = stock else {
        panic!("expected an action reply");
    };
    assert!(result.simulated);
    assert!(result.message.contains("- Stock simulado: 20.5 kg"));

    let create = system.assistant.respond("crear sabor Pistacho").await;
    let Reply::Action(result) = create else {
        panic!("expected an action reply");
    };
    assert_eq!(result.failure, Some(FailureKind::Transport));
    assert!(!result.simulated);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn offline_mode_simulates_everything() {
    let config = AssistantConfig {
        offline: true,
        ..AssistantConfig::default()
    };
    let mut system = AssistantSystem::new(&config).unwrap();

    let Reply::Action(stock) = system.assistant.respond("Suma 3 kg de frutilla").await else {
        panic!("expected an action reply");
    };
    assert!(stock.simulated);
    assert!(stock.message.contains("- Stock simulado: 23 kg"));

    let Reply::Action(created) = system.assistant.respond("nuevo sabor Pistacho").await else {
        panic!("expected an action reply");
    };
    assert!(created.succeeded);
    assert!(created.simulated);
    assert!(created.message.contains("- ID: #6"));

    let drivers = system.assistant.respond("drivers").await;
    assert!(drivers.text().contains("✅ **Disponibles (3):**"));
    system.shutdown().await.unwrap();
}
