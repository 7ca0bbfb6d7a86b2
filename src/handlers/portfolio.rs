use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::{CacheConfig, RedisCache, keys};
use crate::db::portfolio as portfolio_db;
use crate::db::portfolio::SavePortfolioError;
use crate::models::portfolio::{PortfolioDetail, PortfolioSummary};

/// GET /api/portfolios/{id} — the fully-assembled portfolio aggregate.
pub async fn get_portfolio(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    cache_cfg: web::Data<CacheConfig>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let cache_key = keys::portfolio(&id.to_string());

    // Try the cache first; a cache error degrades to the database path.
    match cache.get::<serde_json::Value>(&cache_key).await {
        Ok(Some(cached)) => HttpResponse::Ok().json(cached),
        Ok(None) => match portfolio_db::fetch_portfolio(db.get_ref(), id).await {
            Ok(Some(detail)) => {
                let _ = cache
                    .set(&cache_key, &detail, Some(cache_cfg.portfolio_ttl.as_secs()))
                    .await;
                HttpResponse::Ok().json(detail)
            }
            Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Portfolio {id} not found"),
            })),
            Err(e) => {
                tracing::error!("portfolio fetch failed for {id}: {e}");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Failed to load portfolio details",
                }))
            }
        },
        Err(e) => {
            tracing::warn!("Cache error: {}", e);
            match portfolio_db::fetch_portfolio(db.get_ref(), id).await {
                Ok(Some(detail)) => HttpResponse::Ok().json(detail),
                Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Portfolio {id} not found"),
                })),
                Err(e) => {
                    tracing::error!("portfolio fetch failed for {id}: {e}");
                    HttpResponse::InternalServerError().json(serde_json::json!({
                        "error": "Failed to load portfolio details",
                    }))
                }
            }
        }
    }
}

/// GET /api/portfolios/user/{user_id} — root-row summaries for the dashboard.
pub async fn get_portfolios_by_user(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let user_id = path.into_inner();
    match portfolio_db::list_portfolios_by_user(db.get_ref(), user_id).await {
        Ok(items) => {
            let response: Vec<PortfolioSummary> =
                items.into_iter().map(PortfolioSummary::from).collect();
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch portfolios: {e}"),
        })),
    }
}

/// POST /api/portfolios — save the whole aggregate (insert or update), one
/// pass of diff-and-upsert per child collection.
pub async fn save_portfolio(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    body: web::Json<PortfolioDetail>,
) -> impl Responder {
    match portfolio_db::save_portfolio(db.get_ref(), body.into_inner()).await {
        Ok(id) => {
            // The stored aggregate changed; drop any cached copy.
            let _ = cache.delete(&keys::portfolio(&id.to_string())).await;
            HttpResponse::Ok().json(serde_json::json!({ "id": id }))
        }
        Err(SavePortfolioError::TitleRequired) => {
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Portfolio title is required",
            }))
        }
        Err(SavePortfolioError::Db(e)) => {
            tracing::error!("portfolio save failed: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to save portfolio",
            }))
        }
    }
}

/// DELETE /api/portfolios/{id} — delete the root row; children cascade in
/// the database.
pub async fn delete_portfolio(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match portfolio_db::delete_portfolio(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                let _ = cache.delete(&keys::portfolio(&id.to_string())).await;
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Portfolio {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Portfolio {id} not found"),
                }))
            }
        }
        Err(e) => {
            tracing::error!("portfolio delete failed for {id}: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to delete portfolio: {e}"),
            }))
        }
    }
}
