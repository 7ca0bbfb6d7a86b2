use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::{CacheConfig, RedisCache, keys};
use crate::db::users as user_db;
use crate::models::PaginationQuery;
use crate::models::users::{CreateUser, UpdateUser, UserResponse};

/// GET /api/users — list users with pagination.
/// Query params: ?page=1&limit=20
pub async fn get_users(
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> impl Responder {
    match user_db::get_users_paginated(db.get_ref(), query.page(), query.limit()).await {
        Ok(users) => {
            let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch users: {e}"),
        })),
    }
}

/// GET /api/users/{id} — get a single user profile.
pub async fn get_user(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    cache_cfg: web::Data<CacheConfig>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let cache_key = keys::user(&id.to_string());

    match cache.get::<serde_json::Value>(&cache_key).await {
        Ok(Some(cached)) => HttpResponse::Ok().json(cached),
        Ok(None) => match user_db::get_user_by_id(db.get_ref(), id).await {
            Ok(Some(user)) => {
                let response = UserResponse::from(user);
                let _ = cache
                    .set(&cache_key, &response, Some(cache_cfg.user_ttl.as_secs()))
                    .await;
                HttpResponse::Ok().json(response)
            }
            Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("User {id} not found"),
            })),
            Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            })),
        },
        Err(e) => {
            tracing::warn!("Cache error: {}", e);
            match user_db::get_user_by_id(db.get_ref(), id).await {
                Ok(Some(user)) => HttpResponse::Ok().json(UserResponse::from(user)),
                Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("User {id} not found"),
                })),
                Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                })),
            }
        }
    }
}

/// POST /api/users — create a user profile.
pub async fn create_user(
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateUser>,
) -> impl Responder {
    match user_db::insert_user(db.get_ref(), body.into_inner()).await {
        Ok(user) => HttpResponse::Created().json(UserResponse::from(user)),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create user: {e}"),
        })),
    }
}

/// PUT /api/users/{id} — update a user profile.
pub async fn update_user(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUser>,
) -> impl Responder {
    let id = path.into_inner();
    match user_db::update_user(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => {
            let _ = cache.delete(&keys::user(&id.to_string())).await;
            HttpResponse::Ok().json(UserResponse::from(updated))
        }
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": format!("Failed to update user: {e}"),
            }))
        }
    }
}

/// DELETE /api/users/{id} — delete a user profile (owned rows cascade).
pub async fn delete_user(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match user_db::delete_user(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                let _ = cache.delete(&keys::user(&id.to_string())).await;
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("User {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("User {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete user: {e}"),
        })),
    }
}
