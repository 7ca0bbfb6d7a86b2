pub mod clients;
pub mod invoices;
pub mod portfolio;
pub mod tasks;
pub mod users;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── User routes ──
    cfg.service(
        web::resource("/users")
            .route(web::get().to(users::get_users))
            .route(web::post().to(users::create_user)),
    );
    cfg.service(
        web::resource("/users/{id}")
            .route(web::get().to(users::get_user))
            .route(web::put().to(users::update_user))
            .route(web::delete().to(users::delete_user)),
    );

    // ── Portfolio routes (whole-aggregate save/load) ──
    cfg.service(web::resource("/portfolios").route(web::post().to(portfolio::save_portfolio)));
    cfg.service(
        web::resource("/portfolios/{id}")
            .route(web::get().to(portfolio::get_portfolio))
            .route(web::delete().to(portfolio::delete_portfolio)),
    );
    cfg.service(
        web::resource("/portfolios/user/{user_id}")
            .route(web::get().to(portfolio::get_portfolios_by_user)),
    );

    // ── Client routes ──
    cfg.service(
        web::scope("/clients")
            .route("", web::post().to(clients::create_client))
            .route("/{id}", web::get().to(clients::get_client))
            .route("/{id}", web::put().to(clients::update_client))
            .route("/{id}", web::delete().to(clients::delete_client))
            .route("/user/{user_id}", web::get().to(clients::get_clients_by_user)),
    );

    // ── Invoice routes ──
    cfg.service(
        web::scope("/invoices")
            .route("", web::post().to(invoices::create_invoice))
            .route("/{id}", web::get().to(invoices::get_invoice))
            .route("/{id}", web::put().to(invoices::update_invoice))
            .route("/{id}", web::delete().to(invoices::delete_invoice))
            .route("/{id}/payment", web::post().to(invoices::record_payment))
            .route("/{id}/send", web::post().to(invoices::send_invoice))
            .route("/user/{user_id}", web::get().to(invoices::get_invoices_by_user))
            .route("/client/{client_id}", web::get().to(invoices::get_invoices_by_client)),
    );

    // ── Task routes ──
    cfg.service(
        web::scope("/tasks")
            .route("", web::post().to(tasks::create_task))
            .route("/{id}", web::get().to(tasks::get_task))
            .route("/{id}", web::put().to(tasks::update_task))
            .route("/{id}", web::delete().to(tasks::delete_task))
            .route("/user/{user_id}", web::get().to(tasks::get_tasks_by_user)),
    );
}
