//! Chat-bubble text for every executor outcome.
//!
//! Formatting is kept apart from dispatch so that each outcome's wording can be
//! asserted on its own. Numbers use `f64`'s `Display`, which prints `15.0` as `15`.

use crate::backend::{AddStockResponse, CreatedProduct};
use crate::model::{DriverRoster, InventoryActionPayload};
use std::fmt::Write;

/// Marker that opens every simulated add-stock reply.
pub const SIMULATION_HEADER: &str = "⚠️ ¡Comando ejecutado en modo simulación!";

/// Marker that closes every simulated add-stock reply.
pub const SIMULATION_NOTE: &str =
    "🔧 **Nota:** El backend no está disponible, esto es solo una simulación.";

pub const ORDER_PROMPT: &str = "🛒 Para crear órdenes de venta necesito más información:

**Datos requeridos:**
- Cliente (nombre/teléfono)
- Productos y cantidades
- Método de pago
- ¿Es para delivery?

**Ejemplo:** \"Crear orden para Juan Pérez, 2 kg chocolate y 1 kg vainilla, pago efectivo, delivery a Av. Corrientes 1234\"

¿Me proporcionas estos datos?";

pub const DELIVERY_HELP: &str = "🚚 **Control de entregas disponible:**

Puedo ayudarte con:
- Ver repartidores disponibles: \"¿Qué repartidores están disponibles?\"
- Asignar repartidores a órdenes
- Actualizar estado de entregas
- Optimizar rutas

**Ejemplo:** \"Asignar orden #1234 a Juan Pérez\" o \"¿Qué repartidores están disponibles?\"

¿Qué acción específica necesitas?";

pub const MISSING_PRODUCT_NAME: &str = "🆕 **Crear Nuevo Sabor**

Para crear un nuevo producto necesito el nombre:

**Formato:** \"Crear sabor [Nombre] precio $[cantidad]\"
**Ejemplo:** \"Crear sabor Cookies & Cream precio $4000\"

¿Qué sabor quieres crear?";

pub const NOT_A_COMMAND: &str =
    "No reconocí ninguna acción en tu mensaje. Puedo agregar stock, crear sabores, \
     consultar repartidores o ayudarte con órdenes y producción.";

/// Used when a driver-less roster leaves nobody to suggest.
const DEFAULT_DRIVER_SUGGESTION: &str = "Juan";

fn product_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names
        .into_iter()
        .map(|name| format!("- {name}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn stock_added(payload: &InventoryActionPayload, response: &AddStockResponse) -> String {
    let unit = payload.unit;
    format!(
        "✅ ¡Listo! He agregado {qty} {unit} de {name} al inventario real.

📦 **Acción ejecutada en la base de datos:**
- Producto: {name}
- Cantidad agregada: {qty} {unit}
- Stock actual: {stock} {unit}
- Precio: ${price}

🔄 **El cambio se refleja inmediatamente en toda la aplicación web.**
💡 *Puedes verificarlo en la sección de productos o inventario.*",
        qty = payload.quantity,
        name = response.product.name,
        stock = response.new_stock,
        price = response.product.price,
    )
}

pub fn stock_simulated(payload: &InventoryActionPayload, response: &AddStockResponse) -> String {
    let unit = payload.unit;
    format!(
        "{SIMULATION_HEADER}

📦 **Acción ejecutada (solo simulación):**
- Producto: {name}
- Cantidad agregada: {qty} {unit}
- Stock simulado: {stock} {unit}

{SIMULATION_NOTE}
💡 *Para cambios reales, usa el Asistente Guiado o verifica la conexión.*",
        name = payload.product_name,
        qty = payload.quantity,
        stock = response.new_stock,
    )
}

pub fn stock_connection_error(payload: &InventoryActionPayload) -> String {
    format!(
        "❌ **Error de conexión**

No pude conectar con la base de datos para agregar {qty} {unit} de {name}.

🔧 **Posibles causas:**
- Servidor backend no disponible
- Producto no encontrado en la base de datos
- Error de red

💡 **Soluciones:**
- Usa el Asistente Guiado para acciones manuales
- Verifica que el servidor esté ejecutándose
- Intenta nuevamente en unos momentos",
        qty = payload.quantity,
        unit = payload.unit,
        name = payload.product_name,
    )
}

pub fn missing_stock_info<'a>(products: impl IntoIterator<Item = &'a str>) -> String {
    format!(
        "❓ Entiendo que quieres agregar stock, pero necesito más información:

**Formato sugerido:** \"Suma 2 kg de chocolate\" o \"Agregar 5 kg de vainilla\"

📦 **Productos disponibles:**
{}

¿Podrías especificar la cantidad y el producto?",
        product_list(products)
    )
}

pub fn batch_guidance<'a>(
    product_name: &str,
    quantity: f64,
    products: impl IntoIterator<Item = &'a str>,
) -> String {
    let short = product_name
        .split_whitespace()
        .next()
        .unwrap_or(product_name)
        .to_lowercase();
    format!(
        "🏭 **Gestión de Producción**

📋 **Para órdenes de producción:**
El sistema actual maneja inventario directo. Para aumentar stock de {product_name}:

💡 **Comando sugerido:** \"Suma {quantity} kg de {short}\"

📦 **Productos disponibles para stock:**
{}

🎯 *El comando de suma actualizará el inventario inmediatamente en la base de datos.*",
        product_list(products)
    )
}

/// `requested_name` is the name as typed, used in the follow-up hint.
pub fn product_created(product: &CreatedProduct, requested_name: &str) -> String {
    format!(
        "🆕 ¡Nuevo sabor creado exitosamente!

📦 **Producto agregado a la base de datos:**
- Nombre: {name}
- ID: #{id}
- Precio: ${price}
- Stock inicial: {stock} kg
- Categoría: {category}

🔄 **El producto ya está disponible en toda la aplicación.**
💡 *Ahora puedes agregar stock con: \"Suma X kg de {requested_name}\"*",
        name = product.name,
        id = product.id,
        price = product.price,
        stock = product.stock,
        category = product.category,
    )
}

/// The server's message is shown verbatim.
pub fn duplicate_product(server_message: &str) -> String {
    format!(
        "⚠️ **Producto Similar Existe**

{server_message}

💡 **Opciones:**
- Usa un nombre diferente
- Agrega stock al producto existente
- Modifica el nombre para hacerlo único"
    )
}

pub fn create_error(name: &str) -> String {
    format!(
        "❌ **Error al crear producto**

No pude crear \"{name}\" en la base de datos.

🔧 **Posibles causas:**
- Servidor backend no disponible
- Producto con nombre similar ya existe
- Error de red

💡 **Soluciones:**
- Verifica que el servidor esté ejecutándose
- Usa el Asistente Guiado para crear productos manualmente
- Intenta con un nombre diferente"
    )
}

/// Both sections are always rendered; an empty one shows a zero count.
pub fn driver_status(roster: &DriverRoster) -> String {
    let (available, unavailable) = roster.partition();
    let mut out = String::from("🚚 **Estado actual de repartidores:**\n\n");

    let _ = writeln!(out, "✅ **Disponibles ({}):**", available.len());
    for driver in &available {
        let _ = writeln!(
            out,
            "• {} - {} ({} órdenes activas)",
            driver.name, driver.vehicle, driver.current_orders
        );
    }

    let _ = writeln!(out, "\n❌ **No disponibles ({}):**", unavailable.len());
    for driver in &unavailable {
        let _ = writeln!(out, "• {} - {}", driver.name, driver.vehicle);
    }

    let suggested = available
        .first()
        .map_or(DEFAULT_DRIVER_SUGGESTION, |d| d.name.as_str());
    let _ = write!(
        out,
        "\n💡 **Puedes decir:** \"Asignar orden #1234 a {suggested}\""
    );
    out
}

pub fn drivers_connection_error() -> String {
    format!(
        "❌ **Error de conexión**\n\nNo pude consultar el estado de los repartidores.\n\n{DELIVERY_HELP}"
    )
}
