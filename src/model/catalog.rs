//! The fixed synonym table translating user-typed flavor names to backend products.
//!
//! Lookup is first-match-wins over the declaration order below: entries are
//! scanned top to bottom and, within an entry, synonyms left to right. The first
//! synonym found as a substring of the lower-cased message resolves the product.

/// One catalog record: every alias a user may type for a single backend product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductEntry {
    pub synonyms: &'static [&'static str],
    pub product_id: u32,
    pub canonical_name: &'static str,
}

/// Result of a successful synonym lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductMatch<'a> {
    /// The synonym that was found in the text.
    pub key: &'static str,
    pub entry: &'a ProductEntry,
}

const DEFAULT_ENTRIES: &[ProductEntry] = &[
    ProductEntry {
        synonyms: &["chocolate", "chocolate amargo"],
        product_id: 1,
        canonical_name: "Chocolate Amargo",
    },
    ProductEntry {
        synonyms: &["vainilla"],
        product_id: 2,
        canonical_name: "Vainilla",
    },
    ProductEntry {
        synonyms: &["dulce de leche"],
        product_id: 3,
        canonical_name: "Dulce de Leche",
    },
    ProductEntry {
        synonyms: &["frutilla"],
        product_id: 4,
        canonical_name: "Frutilla",
    },
    ProductEntry {
        synonyms: &["menta", "menta granizada"],
        product_id: 5,
        canonical_name: "Menta Granizada",
    },
];

/// Ordered synonym-to-product table.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<ProductEntry>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRIES.to_vec())
    }
}

impl Catalog {
    pub fn new(entries: Vec<ProductEntry>) -> Self {
        Self { entries }
    }

    /// Scans `lower_text` for the first synonym in declaration order.
    pub fn find_in(&self, lower_text: &str) -> Option<ProductMatch<'_>> {
        self.entries.iter().find_map(|entry| {
            entry
                .synonyms
                .iter()
                .copied()
                .find(|synonym| lower_text.contains(*synonym))
                .map(|key| ProductMatch { key, entry })
        })
    }

    pub fn by_id(&self, product_id: u32) -> Option<&ProductEntry> {
        self.entries.iter().find(|e| e.product_id == product_id)
    }

    /// Canonical names in declaration order, for "available products" listings.
    pub fn canonical_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.canonical_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonyms_resolve_to_the_same_product() {
        let catalog = Catalog::default();
        let plain = catalog.find_in("suma 2 kg de chocolate").unwrap();
        let full = catalog.find_in("suma 2 kg de chocolate amargo").unwrap();
        assert_eq!(plain.entry.product_id, 1);
        assert_eq!(full.entry.product_id, 1);
        assert_eq!(full.entry.canonical_name, "Chocolate Amargo");
    }

    #[test]
    fn declaration_order_breaks_ties() {
        let catalog = Catalog::default();
        // vainilla (2) is declared before frutilla (4)
        let found = catalog.find_in("frutilla y vainilla").unwrap();
        assert_eq!(found.entry.product_id, 2);
        assert_eq!(found.key, "vainilla");
    }

    #[test]
    fn unknown_flavor_is_none() {
        assert!(Catalog::default().find_in("agregar 7 kg de pistacho").is_none());
    }

    #[test]
    fn canonical_names_keep_order() {
        let names: Vec<_> = Catalog::default().canonical_names().collect();
        assert_eq!(
            names,
            vec!["Chocolate Amargo", "Vainilla", "Dulce de Leche", "Frutilla", "Menta Granizada"]
        );
    }
}
