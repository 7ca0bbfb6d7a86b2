use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::{CacheConfig, RedisCache, keys};
use crate::db::clients as client_db;
use crate::db::invoices as invoice_db;
use crate::email::EmailClient;
use crate::models::PaginationQuery;
use crate::models::invoices::{self, CreateInvoice, InvoiceStatus, LineItem, UpdateInvoice};

/// GET /api/invoices/{id} — get a single invoice.
pub async fn get_invoice(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    cache_cfg: web::Data<CacheConfig>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let cache_key = keys::invoice(&id.to_string());

    match cache.get::<serde_json::Value>(&cache_key).await {
        Ok(Some(cached)) => HttpResponse::Ok().json(cached),
        Ok(None) => match invoice_db::get_invoice_by_id(db.get_ref(), id).await {
            Ok(Some(invoice)) => {
                let _ = cache
                    .set(&cache_key, &invoice, Some(cache_cfg.invoice_ttl.as_secs()))
                    .await;
                HttpResponse::Ok().json(invoice)
            }
            Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Invoice {id} not found"),
            })),
            Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            })),
        },
        Err(e) => {
            tracing::warn!("Cache error: {}", e);
            match invoice_db::get_invoice_by_id(db.get_ref(), id).await {
                Ok(Some(invoice)) => HttpResponse::Ok().json(invoice),
                Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Invoice {id} not found"),
                })),
                Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                })),
            }
        }
    }
}

/// GET /api/invoices/user/{user_id} — list a user's invoices.
/// Query params: ?page=1&limit=20
pub async fn get_invoices_by_user(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    query: web::Query<PaginationQuery>,
) -> impl Responder {
    let user_id = path.into_inner();
    match invoice_db::get_invoices_by_user(db.get_ref(), user_id, query.page(), query.limit()).await
    {
        Ok(invoices) => HttpResponse::Ok().json(invoices),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch invoices: {e}"),
        })),
    }
}

/// GET /api/invoices/client/{client_id} — list invoices billed to a client.
pub async fn get_invoices_by_client(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let client_id = path.into_inner();
    match invoice_db::get_invoices_by_client(db.get_ref(), client_id).await {
        Ok(invoices) => HttpResponse::Ok().json(invoices),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch invoices: {e}"),
        })),
    }
}

/// POST /api/invoices — create a new invoice (draft).
pub async fn create_invoice(
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateInvoice>,
) -> impl Responder {
    match invoice_db::insert_invoice(db.get_ref(), body.into_inner()).await {
        Ok(invoice) => HttpResponse::Created().json(invoice),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create invoice: {e}"),
        })),
    }
}

/// PUT /api/invoices/{id} — update an invoice.
pub async fn update_invoice(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateInvoice>,
) -> impl Responder {
    let id = path.into_inner();
    match invoice_db::update_invoice(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => {
            let _ = cache.delete(&keys::invoice(&id.to_string())).await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": format!("Failed to update invoice: {e}"),
            }))
        }
    }
}

/// POST /api/invoices/{id}/payment — record a payment against an invoice.
pub async fn record_payment(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match invoice_db::record_payment(db.get_ref(), id).await {
        Ok(updated) => {
            let _ = cache.delete(&keys::invoice(&id.to_string())).await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": format!("Failed to record payment: {e}"),
            }))
        }
    }
}

/// POST /api/invoices/{id}/send — email the invoice to the client, then
/// move a draft to sent.
pub async fn send_invoice(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    email: web::Data<EmailClient>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    let invoice = match invoice_db::get_invoice_by_id(db.get_ref(), id).await {
        Ok(Some(invoice)) => invoice,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Invoice {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let client = match client_db::get_client_by_id(db.get_ref(), invoice.client_id).await {
        Ok(Some(client)) => client,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Client {} not found", invoice.client_id),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let Some(to) = client.email.clone() else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!("Client {} has no email address", client.name),
        }));
    };

    let subject = format!("Invoice {} from {}", invoice.number, client.name);
    let html = render_invoice_html(&invoice, &client.name);

    if let Err(e) = email.send(&to, &subject, &html).await {
        tracing::error!("invoice {id} email failed: {e}");
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Failed to send invoice email",
        }));
    }

    if invoice.status == InvoiceStatus::Draft {
        match invoice_db::mark_sent(db.get_ref(), id).await {
            Ok(updated) => {
                let _ = cache.delete(&keys::invoice(&id.to_string())).await;
                return HttpResponse::Ok().json(updated);
            }
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Invoice emailed but status update failed: {e}"),
                }));
            }
        }
    }

    HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Invoice {} sent to {to}", invoice.number),
    }))
}

/// DELETE /api/invoices/{id} — delete an invoice.
pub async fn delete_invoice(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match invoice_db::delete_invoice(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                let _ = cache.delete(&keys::invoice(&id.to_string())).await;
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Invoice {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Invoice {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete invoice: {e}"),
        })),
    }
}

fn render_invoice_html(invoice: &invoices::Model, client_name: &str) -> String {
    let items: Vec<LineItem> =
        serde_json::from_value(invoice.line_items.clone()).unwrap_or_default();

    let mut rows = String::new();
    for item in &items {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.2}</td></tr>",
            item.description,
            item.quantity,
            item.quantity * item.unit_price,
        ));
    }

    format!(
        "<h2>Invoice {}</h2>\
         <p>To: {client_name}</p>\
         <table><tr><th>Description</th><th>Qty</th><th>Amount</th></tr>{rows}</table>\
         <p>Subtotal: {:.2} {}</p>\
         <p>Total due: {:.2} {} by {}</p>",
        invoice.number,
        invoice.subtotal,
        invoice.currency,
        invoice.total,
        invoice.currency,
        invoice.due_date,
    )
}
