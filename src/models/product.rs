use serde::{Deserialize, Serialize};

/// Catalog entry. Immutable from this system's perspective; the catalog
/// table is sourced by an external process.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct Product {
    pub product_id: i64,
    pub product_name: String, // Display name
    pub image_url: String,    // Externally-hosted image
}

/// One row of a user's purchase history after the catalog join. A purchase
/// can reference a product the catalog no longer carries; those rows keep
/// the id and leave name and image empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PurchasedProduct {
    pub product_id: i64,
    pub product_name: Option<String>,
    pub image_url: Option<String>,
}

impl PurchasedProduct {
    pub fn display_name(&self) -> String {
        match &self.product_name {
            Some(name) => name.clone(),
            None => format!("Product #{}", self.product_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_catalog_name() {
        let row = PurchasedProduct {
            product_id: 7,
            product_name: Some("Classic Tee".into()),
            image_url: None,
        };
        assert_eq!(row.display_name(), "Classic Tee");
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let row = PurchasedProduct {
            product_id: 7,
            product_name: None,
            image_url: None,
        };
        assert_eq!(row.display_name(), "Product #7");
    }
}
