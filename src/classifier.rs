//! # Command Classification
//!
//! Maps a free-text chat message to exactly one [`Category`].
//!
//! The classifier is an ordered list of `(KeywordRule, Category)` pairs. The
//! message is lower-cased once and each rule is tested in sequence; the first
//! rule with any keyword contained in the text decides the category. A message
//! that matches none of the rules is ordinary chat ([`Category::None`]).
//!
//! The default order is Inventory, Production, Order, Delivery. That order is
//! the tie-break when a message satisfies several rules, e.g.
//! "producir 5 kg de chocolate" carries a unit token (Inventory) and a
//! production verb (Production) and resolves to Inventory.
//!
//! Matching is plain substring containment, so "hacerlo" triggers the `hacer`
//! verb. The classifier holds no state and is safe to share across tasks.

use crate::model::{Category, Command};

/// Stock-mutation verbs, unit tokens and the inventory nouns.
pub const INVENTORY_KEYWORDS: &[&str] = &[
    "suma",
    "agregar",
    "añadir",
    "incrementar",
    "stock",
    "inventario",
    "kg",
    "kilogramo",
    "litro",
];

/// Production verbs and new-item phrases.
pub const PRODUCTION_KEYWORDS: &[&str] = &[
    "producir",
    "hacer",
    "preparar",
    "lote",
    "receta",
    "fabricar",
    "crear sabor",
    "nuevo sabor",
    "nueva receta",
];

pub const ORDER_KEYWORDS: &[&str] = &["crear orden", "nueva venta", "vender", "orden", "pedido"];

pub const DELIVERY_KEYWORDS: &[&str] = &[
    "entregar",
    "delivery",
    "envío",
    "repartir",
    "asignar repartidor",
    "repartidores",
    "drivers",
    "disponibles",
];

/// A keyword-set membership predicate over lower-cased text.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    keywords: &'static [&'static str],
}

impl KeywordRule {
    pub const fn new(keywords: &'static [&'static str]) -> Self {
        Self { keywords }
    }

    /// True when any keyword is a substring of `lower_text`.
    pub fn matches(&self, lower_text: &str) -> bool {
        self.keywords.iter().any(|k| lower_text.contains(*k))
    }
}

/// Ordered keyword classifier.
#[derive(Debug, Clone)]
pub struct CommandClassifier {
    rules: Vec<(KeywordRule, Category)>,
}

impl Default for CommandClassifier {
    fn default() -> Self {
        Self::new(vec![
            (KeywordRule::new(INVENTORY_KEYWORDS), Category::Inventory),
            (KeywordRule::new(PRODUCTION_KEYWORDS), Category::Production),
            (KeywordRule::new(ORDER_KEYWORDS), Category::Order),
            (KeywordRule::new(DELIVERY_KEYWORDS), Category::Delivery),
        ])
    }
}

impl CommandClassifier {
    pub fn new(rules: Vec<(KeywordRule, Category)>) -> Self {
        Self { rules }
    }

    /// Returns the category of the first matching rule, or [`Category::None`].
    pub fn classify(&self, text: &str) -> Category {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .find(|(rule, _)| rule.matches(&lower))
            .map(|(_, category)| *category)
            .unwrap_or(Category::None)
    }

    /// Classifies `text` into a [`Command`] without a payload.
    pub fn command(&self, text: &str) -> Command {
        Command::new(text, self.classify(text))
    }
}
