#[cfg(feature = "ssr")]
mod db_impl {
    use crate::models::product::Product;
    use crate::models::review::{NewReview, Review};
    use chrono::Utc;
    use leptos::logging;
    use leptos::logging::log;
    use sqlx::postgres::PgPoolOptions;
    use sqlx::PgPool;

    /// Connections kept small; this serves one interactive page.
    const MAX_CONNECTIONS: u32 = 5;

    #[cfg(test)]
    mod tests {
        use super::*;

        // Integration tests need a live PostgreSQL instance:
        //   DATABASE_URL=postgres://... cargo test -- --ignored

        async fn create_test_db() -> Database {
            let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
            let db = Database::connect(&url).await.unwrap();
            db.create_schema().await.unwrap();

            // Start from a clean slate; children before parents.
            for table in ["product_reviews", "orders", "products"] {
                sqlx::query(&format!("DELETE FROM cyshop.{}", table))
                    .execute(&db.pool)
                    .await
                    .unwrap();
            }
            db
        }

        async fn seed_shop(db: &Database) {
            for (id, name, image) in [
                (1i64, "Classic Tee", "https://img.example.com/classic-tee.png"),
                (2, "Logo Hoodie", "https://img.example.com/logo-hoodie.png"),
                (3, "Trucker Cap", "https://img.example.com/trucker-cap.png"),
            ] {
                sqlx::query(
                    "INSERT INTO cyshop.products (product_id, product_name, image_url)
                     VALUES ($1, $2, $3)",
                )
                .bind(id)
                .bind(name)
                .bind(image)
                .execute(&db.pool)
                .await
                .unwrap();
            }

            // Alice bought the tee twice; lookups must de-duplicate.
            for (name, product_id) in [("Alice", 1i64), ("Alice", 1), ("Alice", 2), ("Bob", 3)] {
                sqlx::query("INSERT INTO cyshop.orders (name, product_id) VALUES ($1, $2)")
                    .bind(name)
                    .bind(product_id)
                    .execute(&db.pool)
                    .await
                    .unwrap();
            }
        }

        #[tokio::test]
        #[ignore = "requires database"]
        async fn test_schema_creation() {
            log!("[TEST] Starting test_schema_creation");
            let db = create_test_db().await;

            let tables: Vec<String> = sqlx::query_scalar(
                "SELECT table_name FROM information_schema.tables
                 WHERE table_schema = 'cyshop'",
            )
            .fetch_all(&db.pool)
            .await
            .unwrap();

            assert!(tables.contains(&"products".to_string()));
            assert!(tables.contains(&"orders".to_string()));
            assert!(tables.contains(&"product_reviews".to_string()));
        }

        #[tokio::test]
        #[ignore = "requires database"]
        async fn test_purchase_lookup() {
            log!("[TEST] Starting test_purchase_lookup");
            let db = create_test_db().await;
            seed_shop(&db).await;

            // Unknown name is an empty result, not an error.
            let none = db.purchased_product_ids("Nobody").await.unwrap();
            assert!(none.is_empty());

            // Name matching is exact; no trimming or case folding.
            let none = db.purchased_product_ids("alice").await.unwrap();
            assert!(none.is_empty());
            let none = db.purchased_product_ids(" Alice").await.unwrap();
            assert!(none.is_empty());

            // Duplicate orders collapse to distinct product ids.
            let ids = db.purchased_product_ids("Alice").await.unwrap();
            assert_eq!(ids, vec![1, 2]);
            log!("[TEST] Purchase lookup - PASSED");
        }

        #[tokio::test]
        #[ignore = "requires database"]
        async fn test_review_roundtrip() {
            log!("[TEST] Starting test_review_roundtrip");
            let db = create_test_db().await;
            seed_shop(&db).await;

            // A product nobody reviewed reads back as empty.
            let reviews = db.reviews_for_product(3).await.unwrap();
            assert!(reviews.is_empty());

            let first = NewReview {
                product_id: 1,
                user_name: "Alice".into(),
                review: "Nice".into(),
            };
            db.insert_review(&first).await.unwrap();

            // Insert timestamps are captured at call time; space the two
            // writes out so the ordering is unambiguous.
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;

            let second = NewReview {
                product_id: 1,
                user_name: "Bob".into(),
                review: "Great fit!".into(),
            };
            db.insert_review(&second).await.unwrap();

            let reviews = db.reviews_for_product(1).await.unwrap();
            assert_eq!(reviews.len(), 2);
            assert_eq!(reviews[0].user_name, "Bob");
            assert_eq!(reviews[0].review, "Great fit!");
            assert_eq!(reviews[1].user_name, "Alice");
            assert!(reviews[0].ts_utc > reviews[1].ts_utc);

            // No uniqueness constraint: the same user may review again.
            db.insert_review(&second).await.unwrap();
            let reviews = db.reviews_for_product(1).await.unwrap();
            assert_eq!(reviews.len(), 3);
            log!("[TEST] Review roundtrip - PASSED");
        }

        #[tokio::test]
        #[ignore = "requires database"]
        async fn test_catalog_load() {
            let db = create_test_db().await;
            seed_shop(&db).await;

            let products = db.load_products().await.unwrap();
            assert_eq!(products.len(), 3);
            let tee = products.iter().find(|p| p.product_id == 1).unwrap();
            assert_eq!(tee.product_name, "Classic Tee");
            assert_eq!(tee.image_url, "https://img.example.com/classic-tee.png");
        }
    }

    #[derive(Debug, thiserror::Error)]
    pub enum StoreError {
        #[error("database error: {0}")]
        Sqlx(#[from] sqlx::Error),
    }

    // Shared handle to the review store. The pool inside is the only
    // process-lifetime resource; clones share it.
    #[derive(Debug, Clone)]
    pub struct Database {
        pool: PgPool,
    }

    impl Database {
        pub async fn new(settings: &crate::config::Settings) -> Result<Self, StoreError> {
            let db = Self::connect(&settings.database_url()).await?;
            logging::log!(
                "Database connection pool established for {}:{}/{}",
                settings.host,
                settings.port,
                settings.database
            );
            Ok(db)
        }

        pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
            let pool = PgPoolOptions::new()
                .max_connections(MAX_CONNECTIONS)
                // Probe connections before use; a dead connection is
                // replaced instead of surfacing to the caller.
                .test_before_acquire(true)
                .connect(database_url)
                .await?;
            Ok(Database { pool })
        }

        // Create the review schema. Catalog and orders are owned by external
        // processes; IF NOT EXISTS keeps this a no-op on a provisioned store
        // while making a fresh dev or test database usable.
        pub async fn create_schema(&self) -> Result<(), StoreError> {
            sqlx::query("CREATE SCHEMA IF NOT EXISTS cyshop")
                .execute(&self.pool)
                .await?;

            // 1. Product catalog
            sqlx::query(
                "CREATE TABLE IF NOT EXISTS cyshop.products (
                    product_id   BIGINT PRIMARY KEY,
                    product_name TEXT NOT NULL,
                    image_url    TEXT NOT NULL
                )",
            )
            .execute(&self.pool)
            .await?;

            // 2. Orders, read-only here
            sqlx::query(
                "CREATE TABLE IF NOT EXISTS cyshop.orders (
                    id         BIGSERIAL PRIMARY KEY,
                    name       TEXT NOT NULL,
                    product_id BIGINT NOT NULL REFERENCES cyshop.products (product_id)
                )",
            )
            .execute(&self.pool)
            .await?;

            // 3. Reviews, append-only
            sqlx::query(
                "CREATE TABLE IF NOT EXISTS cyshop.product_reviews (
                    product_id BIGINT NOT NULL REFERENCES cyshop.products (product_id),
                    user_name  TEXT NOT NULL,
                    review     TEXT NOT NULL,
                    ts_utc     TIMESTAMPTZ NOT NULL
                )",
            )
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        /// Full catalog load; the cache layer memoizes the result.
        pub async fn load_products(&self) -> Result<Vec<Product>, StoreError> {
            let products = sqlx::query_as::<_, Product>(
                "SELECT product_id, product_name, image_url FROM cyshop.products",
            )
            .fetch_all(&self.pool)
            .await?;
            log!("Fetched {} products from the catalog", products.len());
            Ok(products)
        }

        /// Distinct product ids the given name ordered. Matching is exact:
        /// no trimming, no case folding.
        pub async fn purchased_product_ids(&self, name: &str) -> Result<Vec<i64>, StoreError> {
            let ids = sqlx::query_scalar(
                "SELECT DISTINCT o.product_id
                 FROM cyshop.orders o
                 WHERE o.name = $1
                 ORDER BY o.product_id",
            )
            .bind(name)
            .fetch_all(&self.pool)
            .await?;
            Ok(ids)
        }

        /// Append one review row, stamped with the current UTC time. The
        /// caller is responsible for validating the text first.
        pub async fn insert_review(&self, review: &NewReview) -> Result<(), StoreError> {
            sqlx::query(
                "INSERT INTO cyshop.product_reviews (product_id, user_name, review, ts_utc)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(review.product_id)
            .bind(&review.user_name)
            .bind(&review.review)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
            log!(
                "Review saved for product {} by {}",
                review.product_id,
                review.user_name
            );
            Ok(())
        }

        /// All reviews for one product, newest first.
        pub async fn reviews_for_product(
            &self,
            product_id: i64,
        ) -> Result<Vec<Review>, StoreError> {
            let reviews = sqlx::query_as::<_, Review>(
                "SELECT user_name, review, ts_utc
                 FROM cyshop.product_reviews
                 WHERE product_id = $1
                 ORDER BY ts_utc DESC",
            )
            .bind(product_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(reviews)
        }
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::{Database, StoreError};
