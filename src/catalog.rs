use std::collections::HashMap;
use std::sync::Arc;

use leptos::logging::log;
use tokio::sync::RwLock;

use crate::db::{Database, StoreError};
use crate::models::product::{Product, PurchasedProduct};

/// Process-wide product catalog, loaded from the store once and reused for
/// every request. A catalog change made externally is invisible until
/// `invalidate` runs; there is no partial refresh and no eviction.
#[derive(Debug, Default)]
pub struct CatalogCache {
    products: RwLock<Option<Arc<HashMap<i64, Product>>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(None),
        }
    }

    /// Return the memoized catalog, loading it on first use. Re-checked
    /// under the write lock so concurrent first requests load only once.
    pub async fn get_or_load(&self, db: &Database) -> Result<Arc<HashMap<i64, Product>>, StoreError> {
        if let Some(catalog) = self.products.read().await.as_ref() {
            return Ok(Arc::clone(catalog));
        }

        let mut slot = self.products.write().await;
        if let Some(catalog) = slot.as_ref() {
            return Ok(Arc::clone(catalog));
        }

        let catalog: HashMap<i64, Product> = db
            .load_products()
            .await?
            .into_iter()
            .map(|p| (p.product_id, p))
            .collect();
        log!("Catalog cache primed with {} products", catalog.len());

        let catalog = Arc::new(catalog);
        *slot = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Drop the memoized catalog; the next lookup reloads from the store.
    pub async fn invalidate(&self) {
        *self.products.write().await = None;
        log!("Catalog cache invalidated");
    }
}

/// Left join of purchased product ids against the catalog. Ids the catalog
/// does not know still produce a row, with the name and image left empty.
pub fn join_purchases(
    product_ids: &[i64],
    catalog: &HashMap<i64, Product>,
) -> Vec<PurchasedProduct> {
    product_ids
        .iter()
        .map(|&product_id| match catalog.get(&product_id) {
            Some(product) => PurchasedProduct {
                product_id,
                product_name: Some(product.product_name.clone()),
                image_url: Some(product.image_url.clone()),
            },
            None => PurchasedProduct {
                product_id,
                product_name: None,
                image_url: None,
            },
        })
        .collect()
}

/// Everything the given name bought, enriched from the cached catalog.
/// An unknown name is an empty list, not an error.
pub async fn purchases_for_user(
    db: &Database,
    cache: &CatalogCache,
    name: &str,
) -> Result<Vec<PurchasedProduct>, StoreError> {
    let ids = db.purchased_product_ids(name).await?;
    let catalog = cache.get_or_load(db).await?;
    Ok(join_purchases(&ids, &catalog))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> HashMap<i64, Product> {
        [
            (
                1,
                Product {
                    product_id: 1,
                    product_name: "Classic Tee".into(),
                    image_url: "https://img.example.com/classic-tee.png".into(),
                },
            ),
            (
                2,
                Product {
                    product_id: 2,
                    product_name: "Logo Hoodie".into(),
                    image_url: "https://img.example.com/logo-hoodie.png".into(),
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn join_enriches_known_products() {
        let rows = join_purchases(&[1, 2], &catalog());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_id, 1);
        assert_eq!(rows[0].product_name.as_deref(), Some("Classic Tee"));
        assert_eq!(
            rows[0].image_url.as_deref(),
            Some("https://img.example.com/classic-tee.png")
        );
    }

    #[test]
    fn join_keeps_rows_missing_from_catalog() {
        let rows = join_purchases(&[2, 99], &catalog());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].product_id, 99);
        assert_eq!(rows[1].product_name, None);
        assert_eq!(rows[1].image_url, None);
    }

    #[test]
    fn join_of_nothing_is_nothing() {
        assert!(join_purchases(&[], &catalog()).is_empty());
    }

    #[test]
    fn join_preserves_input_order() {
        let rows = join_purchases(&[2, 1], &catalog());
        let ids: Vec<i64> = rows.iter().map(|r| r.product_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
