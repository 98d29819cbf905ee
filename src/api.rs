#[cfg(feature = "ssr")]
use actix_web::{web, HttpResponse};
#[cfg(feature = "ssr")]
use crate::catalog::{purchases_for_user, CatalogCache};
#[cfg(feature = "ssr")]
use crate::db::Database;
#[cfg(feature = "ssr")]
use crate::models::review::NewReview;
#[cfg(feature = "ssr")]
use leptos::logging::log;

#[cfg(feature = "ssr")]
use serde::Deserialize;
#[cfg(feature = "ssr")]
#[derive(Deserialize)]
pub struct PurchaseQuery {
    pub name: String,
}

#[cfg(feature = "ssr")]
pub async fn get_purchases(
    db: web::Data<Database>,
    cache: web::Data<CatalogCache>,
    query: web::Query<PurchaseQuery>,
) -> HttpResponse {
    log!("[SERVER] Purchase lookup for name: {}", query.name);

    match purchases_for_user(&db, &cache, &query.name).await {
        Ok(purchases) => {
            log!(
                "[SERVER] Returning {} purchased products for {}",
                purchases.len(),
                query.name
            );
            HttpResponse::Ok().json(purchases)
        }
        Err(err) => {
            log!(
                "[SERVER ERROR] Purchase lookup failed for {}: {:?}",
                query.name,
                err
            );
            HttpResponse::InternalServerError().body("Failed to look up purchases")
        }
    }
}

#[cfg(feature = "ssr")]
pub async fn create_review(
    db: web::Data<Database>,
    request: web::Json<NewReview>,
) -> HttpResponse {
    log!(
        "[API] Review submission for product {} by {}",
        request.product_id,
        request.user_name
    );

    // Empty-after-trim text never reaches the store.
    let review = match request.into_inner().validated() {
        Ok(review) => review,
        Err(err) => {
            log!("[API] Rejected review: {}", err);
            return HttpResponse::BadRequest().body(err.to_string());
        }
    };

    match db.insert_review(&review).await {
        Ok(()) => {
            log!("[API] Review saved for product {}", review.product_id);
            HttpResponse::Ok().body("Review saved")
        }
        Err(e) => {
            log!("[API] Database error: {:?}", e);
            HttpResponse::InternalServerError().body(format!("Database error: {}", e))
        }
    }
}

#[cfg(feature = "ssr")]
pub async fn get_reviews(
    db: web::Data<Database>,
    product_id: web::Path<i64>,
) -> HttpResponse {
    match db.reviews_for_product(*product_id).await {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(err) => {
            leptos::logging::error!("Failed to fetch reviews: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch reviews")
        }
    }
}

#[cfg(feature = "ssr")]
pub async fn refresh_catalog(
    db: web::Data<Database>,
    cache: web::Data<CatalogCache>,
) -> HttpResponse {
    cache.invalidate().await;
    match cache.get_or_load(&db).await {
        Ok(catalog) => {
            HttpResponse::Ok().body(format!("Catalog reloaded: {} products", catalog.len()))
        }
        Err(err) => {
            leptos::logging::error!("Failed to reload catalog: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to reload catalog")
        }
    }
}
