use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Invoice lifecycle states, stored as lowercase strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "sent")]
    Sent,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "overdue")]
    Overdue,
    #[sea_orm(string_value = "void")]
    Void,
}

/// SeaORM entity for the `invoices` table. Line items live in a JSON
/// column; totals are derived server-side and stored denormalized for
/// listing without re-summing.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub client_id: Uuid,
    pub number: String,
    pub status: InvoiceStatus,
    pub currency: String,
    pub line_items: Json,
    #[sea_orm(column_type = "Double")]
    pub tax_rate: f64,
    #[sea_orm(column_type = "Double")]
    pub subtotal: f64,
    #[sea_orm(column_type = "Double")]
    pub total: f64,
    pub issue_date: Date,
    pub due_date: Date,
    pub paid_at: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id"
    )]
    Client,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

/// Sum line items and apply the tax rate (a percentage), rounding both
/// figures to cents.
pub fn invoice_totals(items: &[LineItem], tax_rate: f64) -> (f64, f64) {
    let subtotal: f64 = items.iter().map(|i| i.quantity * i.unit_price).sum();
    let subtotal = round_cents(subtotal);
    let total = round_cents(subtotal * (1.0 + tax_rate / 100.0));
    (subtotal, total)
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoice {
    pub user_id: Uuid,
    pub client_id: Uuid,
    pub number: String,
    pub currency: Option<String>,
    pub line_items: Vec<LineItem>,
    pub tax_rate: Option<f64>,
    pub issue_date: Date,
    pub due_date: Date,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvoice {
    pub number: Option<String>,
    pub status: Option<InvoiceStatus>,
    pub currency: Option<String>,
    pub line_items: Option<Vec<LineItem>>,
    pub tax_rate: Option<f64>,
    pub issue_date: Option<Date>,
    pub due_date: Option<Date>,
    pub notes: Option<String>,
}
