//! Tests for invoice totals and payment recording.
//!
//! Totals are pure arithmetic and tested directly; the payment path runs
//! against SeaORM's mock database and asserts the statements it produces.
//!
//! Run with: `cargo test --test invoice_test`

use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

use soloflow_backend::db::invoices::{insert_invoice, record_payment};
use soloflow_backend::models::invoices::{
    self, CreateInvoice, InvoiceStatus, LineItem, invoice_totals,
};

fn item(description: &str, quantity: f64, unit_price: f64) -> LineItem {
    LineItem {
        description: description.to_string(),
        quantity,
        unit_price,
    }
}

#[test]
fn totals_sum_line_items_and_apply_tax() {
    let items = vec![item("Design sprint", 2.0, 100.0), item("Retainer", 1.0, 150.0)];

    let (subtotal, total) = invoice_totals(&items, 10.0);
    assert_eq!(subtotal, 350.0);
    assert_eq!(total, 385.0);
}

#[test]
fn totals_round_to_cents() {
    let items = vec![item("Hourly work", 3.0, 33.333)];

    let (subtotal, total) = invoice_totals(&items, 0.0);
    assert_eq!(subtotal, 100.0);
    assert_eq!(total, 100.0);
}

#[test]
fn totals_of_no_items_are_zero() {
    let (subtotal, total) = invoice_totals(&[], 21.0);
    assert_eq!(subtotal, 0.0);
    assert_eq!(total, 0.0);
}

fn invoice_row(id: Uuid, status: InvoiceStatus) -> invoices::Model {
    let today = Utc::now().date_naive();
    invoices::Model {
        id,
        user_id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        number: "INV-0042".to_string(),
        status,
        currency: "USD".to_string(),
        line_items: serde_json::json!([
            { "description": "Design sprint", "quantity": 2.0, "unit_price": 100.0 },
        ]),
        tax_rate: 0.0,
        subtotal: 200.0,
        total: 200.0,
        issue_date: today,
        due_date: today,
        paid_at: None,
        notes: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

#[tokio::test]
async fn insert_stores_server_computed_totals() {
    let id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![invoice_row(id, InvoiceStatus::Draft)]])
        .into_connection();

    let input = CreateInvoice {
        user_id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        number: "INV-0042".to_string(),
        currency: None,
        line_items: vec![item("Design sprint", 2.0, 100.0), item("Retainer", 1.0, 150.0)],
        tax_rate: Some(10.0),
        issue_date: Utc::now().date_naive(),
        due_date: Utc::now().date_naive(),
        notes: None,
    };

    insert_invoice(&db, input).await.expect("insert succeeds");

    let log = db.into_transaction_log();
    let stmt = format!("{:?}", log[0]);
    assert!(stmt.contains("350"), "subtotal is derived from line items");
    assert!(stmt.contains("385"), "total applies the tax rate");
    assert!(stmt.contains("draft"), "new invoices start as drafts");
}

#[tokio::test]
async fn record_payment_stamps_paid_at_and_status() {
    let id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // lookup, then the UPDATE .. RETURNING row
        .append_query_results([vec![invoice_row(id, InvoiceStatus::Sent)]])
        .append_query_results([vec![invoice_row(id, InvoiceStatus::Paid)]])
        .into_connection();

    let updated = record_payment(&db, id).await.expect("payment recorded");
    assert_eq!(updated.status, InvoiceStatus::Paid);

    let log = db.into_transaction_log();
    let update_stmt = format!("{:?}", log[1]);
    assert!(update_stmt.contains("UPDATE"));
    assert!(update_stmt.contains("paid"));
    assert!(update_stmt.contains("paid_at"));
}
