//! Catalog record types at the upstream boundary.
//!
//! The upstream catalog is duck-typed: prices arrive as numbers or
//! currency-formatted strings, boolean flags arrive as 0/1 integers,
//! and optional fields may be missing entirely. Everything is coerced
//! here before it reaches core logic.

use serde::{Deserialize, Deserializer, Serialize};

/// A price as the upstream source delivers it: numeric or free-text
/// (e.g. `"₹1,234.50 "`). Use [`crate::matcher::normalize_price`] to
/// obtain a usable value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

impl From<f64> for RawPrice {
    fn from(value: f64) -> Self {
        RawPrice::Number(value)
    }
}

impl From<&str> for RawPrice {
    fn from(value: &str) -> Self {
        RawPrice::Text(value.to_string())
    }
}

/// A single medicine in the catalog.
///
/// `id` is unique within one query's result set. `is_ai_generated`
/// partitions a result set into catalog-sourced and generated items;
/// `explanation` is only ever present on generated ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    /// Opaque upstream identifier
    pub id: String,
    /// Brand name as marketed
    pub brand_name: String,
    /// Manufacturer name
    #[serde(default)]
    pub manufacturer: String,
    /// Active ingredient string, free-text, not normalized at source
    #[serde(default)]
    pub salt_composition: String,
    /// Dosage form (e.g. "Tablet", "Syrup")
    #[serde(default)]
    pub dosage_form: String,
    /// Pack size label (e.g. "strip of 15 tablets")
    #[serde(default)]
    pub pack_size_label: Option<String>,
    /// Strength label (e.g. "650mg"), shown next to the brand name
    #[serde(default)]
    pub strength: Option<String>,
    /// Price as delivered upstream; may be absent or malformed
    #[serde(default)]
    pub price: Option<RawPrice>,
    /// Generic (vs. branded) flag
    #[serde(default, deserialize_with = "flag")]
    pub is_generic: bool,
    /// Discontinued flag
    #[serde(default, deserialize_with = "flag")]
    pub is_discontinued: bool,
    /// True for results produced by the generative collaborator rather
    /// than backed by a catalog record
    #[serde(default, deserialize_with = "flag")]
    pub is_ai_generated: bool,
    /// Image reference, if any
    #[serde(default)]
    pub image: Option<String>,
    /// Affiliate purchase link, if any
    #[serde(default)]
    pub affiliate_link: Option<String>,
    /// Natural-language explanation; only on AI-generated items
    #[serde(default)]
    pub explanation: Option<String>,
}

impl CatalogItem {
    /// Create a catalog item with required fields.
    pub fn new(id: impl Into<String>, brand_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            brand_name: brand_name.into(),
            manufacturer: String::new(),
            salt_composition: String::new(),
            dosage_form: String::new(),
            pack_size_label: None,
            strength: None,
            price: None,
            is_generic: false,
            is_discontinued: false,
            is_ai_generated: false,
            image: None,
            affiliate_link: None,
            explanation: None,
        }
    }

    /// Display name: brand name with strength appended when present.
    pub fn display_name(&self) -> String {
        match &self.strength {
            Some(s) if !s.is_empty() => format!("{} {}", self.brand_name, s),
            _ => self.brand_name.clone(),
        }
    }

    /// Whether the item carries an image reference.
    pub fn has_image(&self) -> bool {
        self.image.as_deref().is_some_and(|i| !i.is_empty())
    }
}

/// Deserialize upstream boolean flags that arrive as `true`/`false`,
/// `0`/`1`, or null.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Int(n)) => n != 0,
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_numeric_flags() {
        let json = r#"{
            "id": "MED-1",
            "brand_name": "Dolo 650",
            "manufacturer": "Micro Labs",
            "is_generic": 0,
            "is_discontinued": 1,
            "is_ai_generated": true,
            "price": "₹33.60"
        }"#;

        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert!(!item.is_generic);
        assert!(item.is_discontinued);
        assert!(item.is_ai_generated);
        assert_eq!(item.price, Some(RawPrice::Text("₹33.60".into())));
    }

    #[test]
    fn test_deserialize_missing_fields_default() {
        let json = r#"{"id": "MED-2", "brand_name": "Crocin"}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();

        assert!(!item.is_generic);
        assert!(item.price.is_none());
        assert!(item.explanation.is_none());
        assert_eq!(item.manufacturer, "");
    }

    #[test]
    fn test_deserialize_numeric_price() {
        let json = r#"{"id": "MED-3", "brand_name": "Pan 40", "price": 125.5}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price, Some(RawPrice::Number(125.5)));
    }

    #[test]
    fn test_display_name_with_strength() {
        let mut item = CatalogItem::new("MED-4", "Calpol");
        assert_eq!(item.display_name(), "Calpol");

        item.strength = Some("500mg".into());
        assert_eq!(item.display_name(), "Calpol 500mg");
    }

    #[test]
    fn test_has_image() {
        let mut item = CatalogItem::new("MED-5", "Azee");
        assert!(!item.has_image());

        item.image = Some(String::new());
        assert!(!item.has_image());

        item.image = Some("/files/azee.jpg".into());
        assert!(item.has_image());
    }
}
