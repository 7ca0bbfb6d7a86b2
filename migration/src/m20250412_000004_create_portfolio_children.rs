use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden, Clone, Copy)]
enum PortfolioContacts {
    Table,
    Id,
    PortfolioId,
    Email,
    Phone,
    Location,
    LinkedinUrl,
    GithubUrl,
    WebsiteUrl,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum PortfolioProjects {
    Table,
    Id,
    PortfolioId,
    Title,
    Description,
    Technologies,
    ImageUrl,
    LinkUrl,
    IsFeatured,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum PortfolioExperiences {
    Table,
    Id,
    PortfolioId,
    Company,
    Role,
    Duration,
    Description,
    Achievements,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum PortfolioSkills {
    Table,
    Id,
    PortfolioId,
    Name,
    Level,
    Category,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum PortfolioServices {
    Table,
    Id,
    PortfolioId,
    Title,
    Description,
    Price,
    Icon,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum PortfolioTestimonials {
    Table,
    Id,
    PortfolioId,
    Author,
    Company,
    Content,
    AvatarUrl,
    Rating,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum PortfolioSocialLinks {
    Table,
    Id,
    PortfolioId,
    Platform,
    Url,
    Icon,
    UpdatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden, Clone, Copy)]
enum Portfolios {
    Table,
    Id,
}

/// Shared column scaffold: uuid primary key, cascading portfolio FK, and a
/// refresh timestamp. Every child table of the portfolio aggregate starts
/// from this shape.
fn child_table<T: Iden + Copy + 'static>(
    table: T,
    id: T,
    portfolio_id: T,
    updated_at: T,
    fk_name: &str,
) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(id).uuid().not_null().primary_key())
        .col(ColumnDef::new(portfolio_id).uuid().not_null())
        .col(
            ColumnDef::new(updated_at)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name(fk_name)
                .from(table, portfolio_id)
                .to(Portfolios::Table, Portfolios::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                child_table(
                    PortfolioContacts::Table,
                    PortfolioContacts::Id,
                    PortfolioContacts::PortfolioId,
                    PortfolioContacts::UpdatedAt,
                    "fk_portfolio_contacts_portfolio_id",
                )
                .col(ColumnDef::new(PortfolioContacts::Email).string().not_null())
                .col(ColumnDef::new(PortfolioContacts::Phone).string())
                .col(ColumnDef::new(PortfolioContacts::Location).string())
                .col(ColumnDef::new(PortfolioContacts::LinkedinUrl).string())
                .col(ColumnDef::new(PortfolioContacts::GithubUrl).string())
                .col(ColumnDef::new(PortfolioContacts::WebsiteUrl).string())
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                child_table(
                    PortfolioProjects::Table,
                    PortfolioProjects::Id,
                    PortfolioProjects::PortfolioId,
                    PortfolioProjects::UpdatedAt,
                    "fk_portfolio_projects_portfolio_id",
                )
                .col(ColumnDef::new(PortfolioProjects::Title).string().not_null())
                .col(
                    ColumnDef::new(PortfolioProjects::Description)
                        .text()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(PortfolioProjects::Technologies)
                        .json_binary()
                        .not_null(),
                )
                .col(ColumnDef::new(PortfolioProjects::ImageUrl).string())
                .col(ColumnDef::new(PortfolioProjects::LinkUrl).string())
                .col(
                    ColumnDef::new(PortfolioProjects::IsFeatured)
                        .boolean()
                        .not_null(),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                child_table(
                    PortfolioExperiences::Table,
                    PortfolioExperiences::Id,
                    PortfolioExperiences::PortfolioId,
                    PortfolioExperiences::UpdatedAt,
                    "fk_portfolio_experiences_portfolio_id",
                )
                .col(
                    ColumnDef::new(PortfolioExperiences::Company)
                        .string()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(PortfolioExperiences::Role)
                        .string()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(PortfolioExperiences::Duration)
                        .string()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(PortfolioExperiences::Description)
                        .text()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(PortfolioExperiences::Achievements)
                        .json_binary()
                        .not_null(),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                child_table(
                    PortfolioSkills::Table,
                    PortfolioSkills::Id,
                    PortfolioSkills::PortfolioId,
                    PortfolioSkills::UpdatedAt,
                    "fk_portfolio_skills_portfolio_id",
                )
                .col(ColumnDef::new(PortfolioSkills::Name).string().not_null())
                .col(ColumnDef::new(PortfolioSkills::Level).integer().not_null())
                .col(
                    ColumnDef::new(PortfolioSkills::Category)
                        .string()
                        .not_null(),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                child_table(
                    PortfolioServices::Table,
                    PortfolioServices::Id,
                    PortfolioServices::PortfolioId,
                    PortfolioServices::UpdatedAt,
                    "fk_portfolio_services_portfolio_id",
                )
                .col(ColumnDef::new(PortfolioServices::Title).string().not_null())
                .col(
                    ColumnDef::new(PortfolioServices::Description)
                        .text()
                        .not_null(),
                )
                .col(ColumnDef::new(PortfolioServices::Price).string().not_null())
                .col(ColumnDef::new(PortfolioServices::Icon).string())
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                child_table(
                    PortfolioTestimonials::Table,
                    PortfolioTestimonials::Id,
                    PortfolioTestimonials::PortfolioId,
                    PortfolioTestimonials::UpdatedAt,
                    "fk_portfolio_testimonials_portfolio_id",
                )
                .col(
                    ColumnDef::new(PortfolioTestimonials::Author)
                        .string()
                        .not_null(),
                )
                .col(ColumnDef::new(PortfolioTestimonials::Company).string())
                .col(
                    ColumnDef::new(PortfolioTestimonials::Content)
                        .text()
                        .not_null(),
                )
                .col(ColumnDef::new(PortfolioTestimonials::AvatarUrl).string())
                .col(
                    ColumnDef::new(PortfolioTestimonials::Rating)
                        .integer()
                        .not_null(),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                child_table(
                    PortfolioSocialLinks::Table,
                    PortfolioSocialLinks::Id,
                    PortfolioSocialLinks::PortfolioId,
                    PortfolioSocialLinks::UpdatedAt,
                    "fk_portfolio_social_links_portfolio_id",
                )
                .col(
                    ColumnDef::new(PortfolioSocialLinks::Platform)
                        .string()
                        .not_null(),
                )
                .col(ColumnDef::new(PortfolioSocialLinks::Url).string().not_null())
                .col(ColumnDef::new(PortfolioSocialLinks::Icon).string())
                .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PortfolioSocialLinks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PortfolioTestimonials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PortfolioServices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PortfolioSkills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PortfolioExperiences::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PortfolioProjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PortfolioContacts::Table).to_owned())
            .await?;
        Ok(())
    }
}
