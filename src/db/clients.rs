use sea_orm::*;
use uuid::Uuid;

use crate::models::clients::{self, CreateClient, UpdateClient};

/// Insert a new client record.
pub async fn insert_client(
    db: &DatabaseConnection,
    input: CreateClient,
) -> Result<clients::Model, DbErr> {
    let new_client = clients::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(input.user_id),
        name: Set(input.name),
        company: Set(input.company),
        email: Set(input.email),
        phone: Set(input.phone),
        location: Set(input.location),
        notes: Set(input.notes),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_client.insert(db).await
}

/// Fetch a single client by ID.
pub async fn get_client_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<clients::Model>, DbErr> {
    clients::Entity::find_by_id(id).one(db).await
}

/// Fetch a user's clients with pagination, alphabetical by name.
pub async fn get_clients_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
    page: u64,
    limit: u64,
) -> Result<Vec<clients::Model>, DbErr> {
    clients::Entity::find()
        .filter(clients::Column::UserId.eq(user_id))
        .order_by_asc(clients::Column::Name)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}

/// Update an existing client record.
pub async fn update_client(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateClient,
) -> Result<clients::Model, DbErr> {
    let client = clients::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Client not found".to_string()))?;

    let mut active: clients::ActiveModel = client.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(company) = input.company {
        active.company = Set(Some(company));
    }
    if let Some(email) = input.email {
        active.email = Set(Some(email));
    }
    if let Some(phone) = input.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(location) = input.location {
        active.location = Set(Some(location));
    }
    if let Some(notes) = input.notes {
        active.notes = Set(Some(notes));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a client by ID.
pub async fn delete_client(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    clients::Entity::delete_by_id(id).exec(db).await
}
