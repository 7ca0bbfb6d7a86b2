use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::tasks as task_db;
use crate::models::tasks::{CreateTask, TaskListQuery, UpdateTask};

/// GET /api/tasks/user/{user_id} — list a user's tasks.
/// Query params: ?status=todo|in_progress|done
pub async fn get_tasks_by_user(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    query: web::Query<TaskListQuery>,
) -> impl Responder {
    let user_id = path.into_inner();
    match task_db::get_tasks_by_user(db.get_ref(), user_id, query.into_inner().status).await {
        Ok(tasks) => HttpResponse::Ok().json(tasks),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch tasks: {e}"),
        })),
    }
}

/// GET /api/tasks/{id} — get a single task.
pub async fn get_task(db: web::Data<DatabaseConnection>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    match task_db::get_task_by_id(db.get_ref(), id).await {
        Ok(Some(task)) => HttpResponse::Ok().json(task),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Task {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/tasks — create a new task.
pub async fn create_task(
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateTask>,
) -> impl Responder {
    match task_db::insert_task(db.get_ref(), body.into_inner()).await {
        Ok(task) => HttpResponse::Created().json(task),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create task: {e}"),
        })),
    }
}

/// PUT /api/tasks/{id} — update a task.
pub async fn update_task(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTask>,
) -> impl Responder {
    let id = path.into_inner();
    match task_db::update_task(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": format!("Failed to update task: {e}"),
            }))
        }
    }
}

/// DELETE /api/tasks/{id} — delete a task.
pub async fn delete_task(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match task_db::delete_task(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Task {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Task {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete task: {e}"),
        })),
    }
}
