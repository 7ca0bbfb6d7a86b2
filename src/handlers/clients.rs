use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::{CacheConfig, RedisCache, keys};
use crate::db::clients as client_db;
use crate::models::PaginationQuery;
use crate::models::clients::{CreateClient, UpdateClient};

/// GET /api/clients/{id} — get a single client record.
pub async fn get_client(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    cache_cfg: web::Data<CacheConfig>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let cache_key = keys::client(&id.to_string());

    match cache.get::<serde_json::Value>(&cache_key).await {
        Ok(Some(cached)) => HttpResponse::Ok().json(cached),
        Ok(None) => match client_db::get_client_by_id(db.get_ref(), id).await {
            Ok(Some(client)) => {
                let _ = cache
                    .set(&cache_key, &client, Some(cache_cfg.client_ttl.as_secs()))
                    .await;
                HttpResponse::Ok().json(client)
            }
            Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Client {id} not found"),
            })),
            Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            })),
        },
        Err(e) => {
            tracing::warn!("Cache error: {}", e);
            match client_db::get_client_by_id(db.get_ref(), id).await {
                Ok(Some(client)) => HttpResponse::Ok().json(client),
                Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Client {id} not found"),
                })),
                Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                })),
            }
        }
    }
}

/// GET /api/clients/user/{user_id} — list a user's clients.
/// Query params: ?page=1&limit=20
pub async fn get_clients_by_user(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    query: web::Query<PaginationQuery>,
) -> impl Responder {
    let user_id = path.into_inner();
    match client_db::get_clients_by_user(db.get_ref(), user_id, query.page(), query.limit()).await {
        Ok(clients) => HttpResponse::Ok().json(clients),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch clients: {e}"),
        })),
    }
}

/// POST /api/clients — create a new client record.
pub async fn create_client(
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateClient>,
) -> impl Responder {
    match client_db::insert_client(db.get_ref(), body.into_inner()).await {
        Ok(client) => HttpResponse::Created().json(client),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create client: {e}"),
        })),
    }
}

/// PUT /api/clients/{id} — update a client record.
pub async fn update_client(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateClient>,
) -> impl Responder {
    let id = path.into_inner();
    match client_db::update_client(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => {
            let _ = cache.delete(&keys::client(&id.to_string())).await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": format!("Failed to update client: {e}"),
            }))
        }
    }
}

/// DELETE /api/clients/{id} — delete a client record.
pub async fn delete_client(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match client_db::delete_client(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                let _ = cache.delete(&keys::client(&id.to_string())).await;
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Client {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Client {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete client: {e}"),
        })),
    }
}
