//! # Parameter Extraction
//!
//! One pure parser per field. Each takes the raw message (original casing, so
//! names can be echoed back as typed) and returns an optional typed value;
//! defaults are applied by the caller.
//!
//! Numbers use plain decimal notation (`15`, `2.5`). Thousands separators and
//! decimal commas are not recognized: `1.500 kg` parses as 1.5 kg.

use crate::model::{Catalog, InventoryActionPayload, ProductMatch, Quantity, Unit};
use once_cell::sync::Lazy;
use regex::Regex;

// Leftmost alternative wins: `l` shadows `lote`, so "2 lotes" reads as liters.
static QUANTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(kg|kilogramo|litro|l|unidad|lote)")
        .expect("quantity pattern is valid")
});

static PRODUCT_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:crear|nuevo|nueva)\s+(?:sabor\s+)?(.+?)(?:\s+(?:precio|a|por)|\s*$)")
        .expect("product name pattern is valid")
});

static PRICE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)precio\s+(?:\$)?(\d+(?:\.\d+)?)").expect("price pattern is valid")
});

/// Words that only name the kind of thing being created, never a flavor.
const PLACEHOLDER_NAMES: &[&str] = &["sabor", "receta"];

/// First `<number> <unit>` pair in the text.
pub fn quantity(text: &str) -> Option<Quantity> {
    let caps = QUANTITY_RE.captures(text)?;
    let amount = parse_amount(caps.get(1)?.as_str())?;
    let unit = Unit::from_token(&caps.get(2)?.as_str().to_lowercase())?;
    Some(Quantity { amount, unit })
}

/// First catalog product whose synonym appears in `lower_text`.
pub fn product<'a>(catalog: &'a Catalog, lower_text: &str) -> Option<ProductMatch<'a>> {
    catalog.find_in(lower_text)
}

/// Flavor name after `crear` / `nuevo` / `nueva` (optionally followed by `sabor`),
/// up to a trailing `precio`, `a` or `por` clause.
pub fn product_name(text: &str) -> Option<String> {
    let caps = PRODUCT_NAME_RE.captures(text)?;
    let name = caps.get(1)?.as_str().trim();
    if name.is_empty()
        || PLACEHOLDER_NAMES
            .iter()
            .any(|p| name.eq_ignore_ascii_case(p))
    {
        return None;
    }
    Some(name.to_string())
}

/// Amount after `precio`, with or without a leading `$`.
pub fn price(text: &str) -> Option<f64> {
    PRICE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_amount(m.as_str()))
}

/// Digit runs too long for `f64` overflow to infinity; those are not amounts.
fn parse_amount(digits: &str) -> Option<f64> {
    digits.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Builds an add-stock payload.
///
/// Requires a positive quantity. When no synonym matches, the
/// product with `fallback_id` is used; `None` is returned if that id is not in
/// the catalog either.
pub fn inventory_payload(
    catalog: &Catalog,
    text: &str,
    fallback_id: u32,
) -> Option<InventoryActionPayload> {
    let qty = quantity(text).filter(|q| q.amount > 0.0)?;
    let lower = text.to_lowercase();

    let (key, entry) = match product(catalog, &lower) {
        Some(found) => (found.key, found.entry),
        None => {
            let entry = catalog.by_id(fallback_id)?;
            (entry.canonical_name, entry)
        }
    };

    Some(InventoryActionPayload {
        product_key: key.to_string(),
        product_id: entry.product_id,
        product_name: entry.canonical_name.to_string(),
        quantity: qty.amount,
        unit: qty.unit,
    })
}

/// Display name used in production-batch guidance.
pub fn batch_product_name(lower_text: &str) -> &'static str {
    if lower_text.contains("vainilla") {
        "Vainilla Bourbon"
    } else if lower_text.contains("frutilla") {
        "Frutilla Natural"
    } else if lower_text.contains("dulce") {
        "Dulce de Leche"
    } else {
        "Chocolate Premium"
    }
}
