use sea_orm::*;
use uuid::Uuid;

use crate::models::invoices::{
    self, CreateInvoice, InvoiceStatus, LineItem, UpdateInvoice, invoice_totals,
};

/// Insert a new invoice in draft state. Totals are derived from the line
/// items server-side; client-supplied totals are never trusted.
pub async fn insert_invoice(
    db: &DatabaseConnection,
    input: CreateInvoice,
) -> Result<invoices::Model, DbErr> {
    let tax_rate = input.tax_rate.unwrap_or(0.0);
    let (subtotal, total) = invoice_totals(&input.line_items, tax_rate);

    let new_invoice = invoices::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(input.user_id),
        client_id: Set(input.client_id),
        number: Set(input.number),
        status: Set(InvoiceStatus::Draft),
        currency: Set(input.currency.unwrap_or_else(|| "USD".to_string())),
        line_items: Set(serde_json::json!(input.line_items)),
        tax_rate: Set(tax_rate),
        subtotal: Set(subtotal),
        total: Set(total),
        issue_date: Set(input.issue_date),
        due_date: Set(input.due_date),
        paid_at: Set(None),
        notes: Set(input.notes),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_invoice.insert(db).await
}

/// Fetch a single invoice by ID.
pub async fn get_invoice_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<invoices::Model>, DbErr> {
    invoices::Entity::find_by_id(id).one(db).await
}

/// Fetch a user's invoices with pagination, newest issue date first.
pub async fn get_invoices_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
    page: u64,
    limit: u64,
) -> Result<Vec<invoices::Model>, DbErr> {
    invoices::Entity::find()
        .filter(invoices::Column::UserId.eq(user_id))
        .order_by_desc(invoices::Column::IssueDate)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}

/// Fetch all invoices billed to one client.
pub async fn get_invoices_by_client(
    db: &DatabaseConnection,
    client_id: Uuid,
) -> Result<Vec<invoices::Model>, DbErr> {
    invoices::Entity::find()
        .filter(invoices::Column::ClientId.eq(client_id))
        .order_by_desc(invoices::Column::IssueDate)
        .all(db)
        .await
}

/// Update an existing invoice. Totals are recomputed whenever line items or
/// the tax rate change.
pub async fn update_invoice(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateInvoice,
) -> Result<invoices::Model, DbErr> {
    let invoice = invoices::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Invoice not found".to_string()))?;

    let current_items: Vec<LineItem> =
        serde_json::from_value(invoice.line_items.clone()).unwrap_or_default();
    let current_tax_rate = invoice.tax_rate;

    let mut active: invoices::ActiveModel = invoice.into();

    if let Some(number) = input.number {
        active.number = Set(number);
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    if let Some(currency) = input.currency {
        active.currency = Set(currency);
    }
    if let Some(issue_date) = input.issue_date {
        active.issue_date = Set(issue_date);
    }
    if let Some(due_date) = input.due_date {
        active.due_date = Set(due_date);
    }
    if let Some(notes) = input.notes {
        active.notes = Set(Some(notes));
    }

    if input.line_items.is_some() || input.tax_rate.is_some() {
        let items = input.line_items.unwrap_or(current_items);
        let tax_rate = input.tax_rate.unwrap_or(current_tax_rate);
        let (subtotal, total) = invoice_totals(&items, tax_rate);
        active.line_items = Set(serde_json::json!(items));
        active.tax_rate = Set(tax_rate);
        active.subtotal = Set(subtotal);
        active.total = Set(total);
    }

    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Record a payment: stamp `paid_at` and flip the status to paid.
pub async fn record_payment(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<invoices::Model, DbErr> {
    let invoice = invoices::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Invoice not found".to_string()))?;

    let mut active: invoices::ActiveModel = invoice.into();
    active.status = Set(InvoiceStatus::Paid);
    active.paid_at = Set(Some(chrono::Utc::now()));
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Move a draft invoice to sent (called after the invoice email goes out).
pub async fn mark_sent(db: &DatabaseConnection, id: Uuid) -> Result<invoices::Model, DbErr> {
    let invoice = invoices::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Invoice not found".to_string()))?;

    let mut active: invoices::ActiveModel = invoice.into();
    active.status = Set(InvoiceStatus::Sent);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete an invoice by ID.
pub async fn delete_invoice(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    invoices::Entity::delete_by_id(id).exec(db).await
}
