use sea_orm::*;
use uuid::Uuid;

use crate::models::tasks::{self, CreateTask, TaskPriority, TaskStatus, UpdateTask};

/// Insert a new task (defaults to todo / medium priority).
pub async fn insert_task(db: &DatabaseConnection, input: CreateTask) -> Result<tasks::Model, DbErr> {
    let new_task = tasks::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(input.user_id),
        title: Set(input.title),
        description: Set(input.description),
        status: Set(TaskStatus::Todo),
        priority: Set(input.priority.unwrap_or(TaskPriority::Medium)),
        due_date: Set(input.due_date),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_task.insert(db).await
}

/// Fetch a single task by ID.
pub async fn get_task_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<tasks::Model>, DbErr> {
    tasks::Entity::find_by_id(id).one(db).await
}

/// Fetch a user's tasks, optionally filtered by status, due-soonest first.
pub async fn get_tasks_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
    status: Option<TaskStatus>,
) -> Result<Vec<tasks::Model>, DbErr> {
    let mut query = tasks::Entity::find().filter(tasks::Column::UserId.eq(user_id));

    if let Some(status) = status {
        query = query.filter(tasks::Column::Status.eq(status));
    }

    query
        .order_by_asc(tasks::Column::DueDate)
        .order_by_asc(tasks::Column::CreatedAt)
        .all(db)
        .await
}

/// Update an existing task.
pub async fn update_task(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateTask,
) -> Result<tasks::Model, DbErr> {
    let task = tasks::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Task not found".to_string()))?;

    let mut active: tasks::ActiveModel = task.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(Some(description));
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    if let Some(priority) = input.priority {
        active.priority = Set(priority);
    }
    if let Some(due_date) = input.due_date {
        active.due_date = Set(Some(due_date));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a task by ID.
pub async fn delete_task(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    tasks::Entity::delete_by_id(id).exec(db).await
}
