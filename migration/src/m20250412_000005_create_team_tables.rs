use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum TeamMembers {
    Table,
    Id,
    PortfolioId,
    Name,
    Role,
    Bio,
    Email,
    AvatarUrl,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TeamMemberSocialLinks {
    Table,
    Id,
    TeamMemberId,
    Platform,
    Url,
    Icon,
    UpdatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Portfolios {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TeamMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeamMembers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TeamMembers::PortfolioId).uuid().not_null())
                    .col(ColumnDef::new(TeamMembers::Name).string().not_null())
                    .col(ColumnDef::new(TeamMembers::Role).string().not_null())
                    .col(ColumnDef::new(TeamMembers::Bio).text())
                    .col(ColumnDef::new(TeamMembers::Email).string())
                    .col(ColumnDef::new(TeamMembers::AvatarUrl).string())
                    .col(
                        ColumnDef::new(TeamMembers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_members_portfolio_id")
                            .from(TeamMembers::Table, TeamMembers::PortfolioId)
                            .to(Portfolios::Table, Portfolios::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Second level of the aggregate: links cascade from their member,
        // which itself cascades from the portfolio.
        manager
            .create_table(
                Table::create()
                    .table(TeamMemberSocialLinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeamMemberSocialLinks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TeamMemberSocialLinks::TeamMemberId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamMemberSocialLinks::Platform)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamMemberSocialLinks::Url)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TeamMemberSocialLinks::Icon).string())
                    .col(
                        ColumnDef::new(TeamMemberSocialLinks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_member_social_links_team_member_id")
                            .from(
                                TeamMemberSocialLinks::Table,
                                TeamMemberSocialLinks::TeamMemberId,
                            )
                            .to(TeamMembers::Table, TeamMembers::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeamMemberSocialLinks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeamMembers::Table).to_owned())
            .await
    }
}
