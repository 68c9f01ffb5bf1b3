use pretty_assertions::assert_eq;
use std::sync::Arc;
use venezia_assistant::backend::mock::{MockBackend, RecordedCall};
use venezia_assistant::backend::{
    ActionBackend, AddStockRequest, AddStockResponse, CreateProductRequest, CreateProductResponse,
    CreatedProduct, StockedProduct,
};
use venezia_assistant::classifier::CommandClassifier;
use venezia_assistant::config::AssistantConfig;
use venezia_assistant::error::BackendError;
use venezia_assistant::executor::messages::{SIMULATION_HEADER, SIMULATION_NOTE};
use venezia_assistant::executor::ActionExecutor;
use venezia_assistant::model::{Category, Driver, DriverRoster, FailureKind, Unit};

fn executor_with(primary: &MockBackend, fallback: Option<&MockBackend>) -> ActionExecutor {
    ActionExecutor::new(
        Arc::new(primary.clone()),
        fallback.map(|f| Arc::new(f.clone()) as Arc<dyn ActionBackend>),
        &AssistantConfig::default(),
    )
}

fn stocked(name: &str, price: f64, new_stock: f64) -> AddStockResponse {
    AddStockResponse {
        product: StockedProduct {
            name: name.to_string(),
            price,
        },
        new_stock,
    }
}

fn refused() -> BackendError {
    BackendError::Transport("connection refused".into())
}

async fn run(executor: &ActionExecutor, text: &str) -> venezia_assistant::model::ActionResult {
    let category = CommandClassifier::default().classify(text);
    executor.handle(category, text).await
}

#[tokio::test]
async fn missing_quantity_makes_no_call() {
    let primary = MockBackend::new();
    let fallback = MockBackend::simulated();
    let executor = executor_with(&primary, Some(&fallback));

    let result = run(&executor, "quiero agregar stock").await;

    assert!(!result.succeeded);
    assert_eq!(result.failure, Some(FailureKind::MissingParameters));
    assert!(result.message.contains("necesito más información"));
    assert!(result.message.contains("- Menta Granizada"));
    assert!(primary.calls().is_empty());
    assert!(fallback.calls().is_empty());
}

#[tokio::test]
async fn live_addition_trusts_server_values() {
    let primary = MockBackend::new();
    primary
        .expect_add_stock()
        .return_ok(stocked("Chocolate Amargo", 3500.0, 137.5));
    let executor = executor_with(&primary, None);

    let result = run(&executor, "Suma 15 kg de chocolate").await;

    assert!(result.succeeded);
    assert!(!result.simulated);
    assert!(result.message.contains("- Stock actual: 137.5 kg"));
    assert_eq!(result.data["new_stock"], 137.5);
    assert_eq!(
        primary.calls(),
        vec![RecordedCall::AddStock(AddStockRequest {
            product_id: 1,
            quantity: 15.0,
            unit: Unit::Kg,
        })]
    );
    primary.verify();
}

#[tokio::test]
async fn unknown_flavor_defaults_to_fallback_product() {
    let primary = MockBackend::new();
    primary
        .expect_add_stock()
        .return_ok(stocked("Chocolate Amargo", 3500.0, 32.0));
    let executor = executor_with(&primary, None);

    run(&executor, "Agregar 7 kg").await;

    assert_eq!(
        primary.calls(),
        vec![RecordedCall::AddStock(AddStockRequest {
            product_id: 1,
            quantity: 7.0,
            unit: Unit::Kg,
        })]
    );
}

#[tokio::test]
async fn batch_wording_still_adds_stock_in_liters() {
    let primary = MockBackend::new();
    primary
        .expect_add_stock()
        .return_ok(stocked("Menta Granizada", 3700.0, 17.0));
    let executor = executor_with(&primary, None);

    let result = run(&executor, "Suma 2 lotes de menta").await;

    assert!(result.succeeded);
    assert_eq!(
        primary.calls(),
        vec![RecordedCall::AddStock(AddStockRequest {
            product_id: 5,
            quantity: 2.0,
            unit: Unit::Liter,
        })]
    );
    primary.verify();
}

#[tokio::test]
async fn oversized_quantity_makes_no_call() {
    let primary = MockBackend::new();
    let fallback = MockBackend::simulated();
    let executor = executor_with(&primary, Some(&fallback));

    let text = format!("suma {} kg de chocolate", "9".repeat(400));
    let result = run(&executor, &text).await;

    assert_eq!(result.failure, Some(FailureKind::MissingParameters));
    assert!(primary.calls().is_empty());
    assert!(fallback.calls().is_empty());
}

#[tokio::test]
async fn transport_failure_is_simulated_and_says_so() {
    let primary = MockBackend::new();
    primary.expect_add_stock().return_err(refused());
    let fallback = MockBackend::simulated();
    fallback
        .expect_add_stock()
        .return_ok(stocked("Vainilla", 3200.0, 23.0));
    let executor = executor_with(&primary, Some(&fallback));

    let result = run(&executor, "Agregar 5 kg de vainilla").await;

    assert!(result.succeeded);
    assert!(result.simulated);
    assert!(result.message.starts_with(SIMULATION_HEADER));
    assert!(result.message.contains(SIMULATION_NOTE));
    assert!(result.message.contains("- Stock simulado: 23 kg"));
    assert!(!result.message.contains("inventario real"));
    assert_eq!(primary.calls().len(), 1);
    assert_eq!(fallback.calls().len(), 1);
    primary.verify();
    fallback.verify();
}

#[tokio::test]
async fn server_rejection_also_falls_back() {
    let primary = MockBackend::new();
    primary.expect_add_stock().return_err(BackendError::Rejected {
        status: 500,
        message: "db offline".into(),
    });
    let fallback = MockBackend::simulated();
    fallback
        .expect_add_stock()
        .return_ok(stocked("Frutilla", 3600.0, 22.0));
    let executor = executor_with(&primary, Some(&fallback));

    let result = run(&executor, "suma 2 kg de frutilla").await;

    assert!(result.simulated);
    fallback.verify();
}

#[tokio::test]
async fn failing_fallback_is_connection_error() {
    let primary = MockBackend::new();
    primary.expect_add_stock().return_err(refused());
    let fallback = MockBackend::simulated();
    fallback
        .expect_add_stock()
        .return_err(BackendError::ActorClosed);
    let executor = executor_with(&primary, Some(&fallback));

    let result = run(&executor, "Suma 3 litros de menta").await;

    assert!(!result.succeeded);
    assert!(!result.simulated);
    assert_eq!(result.failure, Some(FailureKind::Transport));
    assert!(result.message.starts_with("❌ **Error de conexión**"));
    assert!(result
        .message
        .contains("para agregar 3 litro de Menta Granizada"));
}

#[tokio::test]
async fn without_fallback_transport_failure_is_reported() {
    let primary = MockBackend::new();
    primary.expect_add_stock().return_err(refused());
    let executor = executor_with(&primary, None);

    let result = run(&executor, "Suma 1 kg de dulce de leche").await;

    assert_eq!(result.failure, Some(FailureKind::Transport));
    assert!(!result.simulated);
}

#[tokio::test]
async fn repeated_command_adds_twice() {
    let primary = MockBackend::new();
    primary
        .expect_add_stock()
        .return_ok(stocked("Chocolate Amargo", 3500.0, 40.0));
    primary
        .expect_add_stock()
        .return_ok(stocked("Chocolate Amargo", 3500.0, 55.0));
    let executor = executor_with(&primary, None);

    let first = run(&executor, "Suma 15 kg de chocolate").await;
    let second = run(&executor, "Suma 15 kg de chocolate").await;

    assert_eq!(primary.calls().len(), 2);
    assert!(first.message.contains("Stock actual: 40 kg"));
    assert!(second.message.contains("Stock actual: 55 kg"));
    primary.verify();
}

#[tokio::test]
async fn creates_product_with_fixed_fields() {
    let primary = MockBackend::new();
    primary.expect_create_product().return_ok(CreateProductResponse {
        product: CreatedProduct {
            id: 6,
            name: "Cookies & Cream".into(),
            price: 4000.0,
            stock: 0.0,
            category: "Helado".into(),
        },
    });
    let executor = executor_with(&primary, None);

    let result = run(&executor, "Crear sabor Cookies & Cream precio $4000").await;

    assert!(result.succeeded);
    assert!(result.message.contains("- ID: #6"));
    assert!(result.message.contains("\"Suma X kg de Cookies & Cream\""));
    assert_eq!(
        primary.calls(),
        vec![RecordedCall::CreateProduct(CreateProductRequest::ai_created(
            "Cookies & Cream",
            4000.0
        ))]
    );
}

#[tokio::test]
async fn duplicate_name_is_passed_through_without_fallback() {
    let server_message = r#"A product similar to "Vainilla Francesa" already exists: "Vainilla""#;
    let primary = MockBackend::new();
    primary.expect_create_product().return_err(BackendError::Rejected {
        status: 400,
        message: server_message.into(),
    });
    let fallback = MockBackend::simulated();
    let executor = executor_with(&primary, Some(&fallback));

    let result = run(&executor, "nuevo sabor Vainilla Francesa").await;

    assert_eq!(result.failure, Some(FailureKind::ServerRejected));
    assert!(result.message.starts_with("⚠️ **Producto Similar Existe**"));
    assert!(result.message.contains(server_message));
    assert!(result.message.contains("- Usa un nombre diferente"));
    assert!(fallback.calls().is_empty());
}

#[tokio::test]
async fn other_create_failures_are_generic() {
    let primary = MockBackend::new();
    primary.expect_create_product().return_err(refused());
    let executor = executor_with(&primary, Some(&MockBackend::simulated()));

    let result = run(&executor, "crear sabor Pistacho").await;

    assert_eq!(result.failure, Some(FailureKind::Transport));
    assert!(result.message.contains("No pude crear \"Pistacho\""));
}

#[tokio::test]
async fn bare_new_flavor_asks_for_a_name() {
    let primary = MockBackend::new();
    let executor = executor_with(&primary, None);

    let result = run(&executor, "quiero un nuevo sabor").await;

    assert_eq!(result.failure, Some(FailureKind::MissingParameters));
    assert!(result.message.contains("Crear sabor [Nombre] precio $[cantidad]"));
    assert!(primary.calls().is_empty());
}

#[tokio::test]
async fn driver_listing_renders_both_sections() {
    let primary = MockBackend::new();
    primary.expect_list_drivers().return_ok(DriverRoster::new(vec![
        Driver::new("Juan Pérez", "Moto Honda", true, 2),
        Driver::new("Ana Rodríguez", "Moto Yamaha", true, 3),
    ]));
    let executor = executor_with(&primary, None);

    let result = run(&executor, "¿Qué repartidores están disponibles?").await;

    assert!(result.succeeded);
    assert!(result.message.contains("✅ **Disponibles (2):**"));
    assert!(result.message.contains("❌ **No disponibles (0):**"));
    assert!(result.message.contains("Asignar orden #1234 a Juan Pérez"));
}

#[tokio::test]
async fn driver_failure_is_connection_error() {
    let primary = MockBackend::new();
    primary.expect_list_drivers().return_err(refused());
    let executor = executor_with(&primary, None);

    let result = run(&executor, "drivers").await;

    assert_eq!(result.failure, Some(FailureKind::Transport));
    assert!(result.message.starts_with("❌ **Error de conexión**"));
}

#[tokio::test]
async fn simulated_primary_flags_every_result() {
    let primary = MockBackend::simulated();
    primary
        .expect_add_stock()
        .return_ok(stocked("Chocolate Amargo", 3500.0, 27.0));
    let executor = executor_with(&primary, None);

    let result = run(&executor, "Suma 2 kg de chocolate").await;

    assert!(result.simulated);
    assert!(result.message.starts_with(SIMULATION_HEADER));
}

#[tokio::test]
async fn every_category_produces_a_message() {
    let executor = executor_with(&MockBackend::new(), None);
    for (category, text) in [
        (Category::Production, "producir chocolate"),
        (Category::Order, "crear orden"),
        (Category::Delivery, "repartir"),
        (Category::None, ""),
    ] {
        let result = executor.handle(category, text).await;
        assert!(!result.message.is_empty(), "{category:?} gave an empty message");
    }
}
