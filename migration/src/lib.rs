pub use sea_orm_migration::prelude::*;

mod m20250412_000001_create_users_table;
mod m20250412_000002_create_clients_table;
mod m20250412_000003_create_portfolios_table;
mod m20250412_000004_create_portfolio_children;
mod m20250412_000005_create_team_tables;
mod m20250419_000001_create_invoices_table;
mod m20250419_000002_create_tasks_table;
mod m20250503_000001_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250412_000001_create_users_table::Migration),
            Box::new(m20250412_000002_create_clients_table::Migration),
            Box::new(m20250412_000003_create_portfolios_table::Migration),
            Box::new(m20250412_000004_create_portfolio_children::Migration),
            Box::new(m20250412_000005_create_team_tables::Migration),
            Box::new(m20250419_000001_create_invoices_table::Migration),
            Box::new(m20250419_000002_create_tasks_table::Migration),
            Box::new(m20250503_000001_add_lookup_indexes::Migration),
        ]
    }
}
