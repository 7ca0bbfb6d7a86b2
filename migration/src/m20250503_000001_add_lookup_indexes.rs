use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Portfolios {
    Table,
    UserId,
}

#[derive(DeriveIden)]
enum TeamMembers {
    Table,
    PortfolioId,
}

#[derive(DeriveIden)]
enum TeamMemberSocialLinks {
    Table,
    TeamMemberId,
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    UserId,
}

#[derive(DeriveIden)]
enum Invoices {
    Table,
    UserId,
    ClientId,
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    UserId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on portfolios.user_id for the dashboard listing
        manager
            .create_index(
                Index::create()
                    .name("idx_portfolios_user_id")
                    .table(Portfolios::Table)
                    .col(Portfolios::UserId)
                    .to_owned(),
            )
            .await?;

        // Index on team_members.portfolio_id for the aggregate fan-out
        manager
            .create_index(
                Index::create()
                    .name("idx_team_members_portfolio_id")
                    .table(TeamMembers::Table)
                    .col(TeamMembers::PortfolioId)
                    .to_owned(),
            )
            .await?;

        // Index on team_member_social_links.team_member_id for the per-member
        // link queries
        manager
            .create_index(
                Index::create()
                    .name("idx_team_member_social_links_team_member_id")
                    .table(TeamMemberSocialLinks::Table)
                    .col(TeamMemberSocialLinks::TeamMemberId)
                    .to_owned(),
            )
            .await?;

        // Index on clients.user_id for listing a user's clients
        manager
            .create_index(
                Index::create()
                    .name("idx_clients_user_id")
                    .table(Clients::Table)
                    .col(Clients::UserId)
                    .to_owned(),
            )
            .await?;

        // Index on invoices.user_id for listing a user's invoices
        manager
            .create_index(
                Index::create()
                    .name("idx_invoices_user_id")
                    .table(Invoices::Table)
                    .col(Invoices::UserId)
                    .to_owned(),
            )
            .await?;

        // Index on invoices.client_id for per-client billing history
        manager
            .create_index(
                Index::create()
                    .name("idx_invoices_client_id")
                    .table(Invoices::Table)
                    .col(Invoices::ClientId)
                    .to_owned(),
            )
            .await?;

        // Index on tasks.user_id for listing a user's tasks
        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_user_id")
                    .table(Tasks::Table)
                    .col(Tasks::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_portfolios_user_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_team_members_portfolio_id").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_team_member_social_links_team_member_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_clients_user_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_invoices_user_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_invoices_client_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_tasks_user_id").to_owned())
            .await?;

        Ok(())
    }
}
