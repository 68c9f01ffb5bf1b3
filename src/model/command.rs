//! Commands and the structured payloads extracted from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The classifier's verdict for a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Stock mutations ("Suma 15 kg de chocolate").
    Inventory,
    /// Production batches and new flavors.
    Production,
    /// Sales orders. Never executed from chat.
    Order,
    /// Drivers and deliveries.
    Delivery,
    /// Ordinary conversation, handed to the chat fallback.
    None,
}

impl Category {
    /// Whether the executor should handle this category at all.
    pub fn is_actionable(self) -> bool {
        !matches!(self, Category::None)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Inventory => "inventory",
            Category::Production => "production",
            Category::Order => "order",
            Category::Delivery => "delivery",
            Category::None => "none",
        };
        f.write_str(name)
    }
}

/// A raw message together with its resolved category and payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub text: String,
    pub category: Category,
    pub payload: Option<Payload>,
}

impl Command {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Structured parameters for the two executable actions.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    AddStock(InventoryActionPayload),
    CreateProduct(ProductCreationPayload),
}

/// Measurement token captured next to a quantity. Synonyms collapse to one
/// wire form (`kilogramo` is sent as `kg`, `l` as `litro`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "kg")]
    Kg,
    #[serde(rename = "litro")]
    Liter,
    #[serde(rename = "unidad")]
    Unit,
}

impl Unit {
    /// Maps a captured token (already lower-cased) to a unit.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "kg" | "kilogramo" => Some(Unit::Kg),
            "litro" | "l" => Some(Unit::Liter),
            "unidad" => Some(Unit::Unit),
            _ => None,
        }
    }

    /// Wire and display form.
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Liter => "litro",
            Unit::Unit => "unidad",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A positive amount with its unit, as typed by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    pub amount: f64,
    pub unit: Unit,
}

/// Parameters for `add_stock`.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryActionPayload {
    /// The synonym that matched, or the canonical name when the fallback product was used.
    pub product_key: String,
    pub product_id: u32,
    /// Canonical catalog name, used in messages when the server is unreachable.
    pub product_name: String,
    pub quantity: f64,
    pub unit: Unit,
}

/// Parameters for `create_product`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCreationPayload {
    pub name: String,
    pub price: f64,
}
