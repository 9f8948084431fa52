//! Produce record and product code format

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Four groups of four alphanumeric characters separated by hyphens.
static PRODUCT_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^(?:[A-Za-z0-9]{4}-){3}[A-Za-z0-9]{4}$").expect("product code pattern is valid")
});

/// A single produce item in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Produce {
    /// Display name, also the sort key for listings
    pub name: String,
    /// Unique identifier, `XXXX-XXXX-XXXX-XXXX`
    pub produce_code: String,
    /// Price per unit
    pub unit_price: f64,
}

impl Produce {
    /// Create a new produce record
    pub fn new(name: impl Into<String>, produce_code: impl Into<String>, unit_price: f64) -> Self {
        Self {
            name: name.into(),
            produce_code: produce_code.into(),
            unit_price,
        }
    }

    /// Check whether this record carries a well-formed product code
    pub fn has_valid_code(&self) -> bool {
        is_valid_product_code(&self.produce_code)
    }
}

/// Check a product code against the `XXXX-XXXX-XXXX-XXXX` format
pub fn is_valid_product_code(code: &str) -> bool {
    PRODUCT_CODE_REGEX.is_match(code)
}
