//! Portfolio aggregate repository.
//!
//! A portfolio is stored flat across nine tables but edited and served as
//! one nested document. The read path fans out one query per child
//! collection and joins in memory; the write path reconciles each stored
//! collection against the incoming one by id — rows whose ids are missing
//! from the incoming set are deleted, everything incoming is upserted in
//! place. Deleting a portfolio touches only the root row; the schema's
//! cascading foreign keys remove the children.
//!
//! Saves are not atomic and not safe to run concurrently for the same
//! portfolio: there is no version column, so two overlapping saves can
//! interleave their id diffs and lose updates. Callers serialize saves per
//! portfolio at the edge.

use std::collections::HashSet;

use futures_util::future::try_join_all;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use uuid::Uuid;

use crate::models::contact::{self, ContactData};
use crate::models::experience::{self, ExperienceData};
use crate::models::member_link;
use crate::models::portfolio::{self, PortfolioDetail};
use crate::models::project::{self, ProjectData};
use crate::models::service::{self, ServiceData};
use crate::models::skill::{self, SkillData};
use crate::models::social_link::{self, SocialLinkData};
use crate::models::team_member::{self, TeamMemberData};
use crate::models::testimonial::{self, TestimonialData};

/// Failures surfaced by [`save_portfolio`].
#[derive(Debug, thiserror::Error)]
pub enum SavePortfolioError {
    #[error("portfolio title is required")]
    TitleRequired,
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Fetch the fully-populated aggregate, or `None` if the root row does not
/// exist (no child queries are issued in that case).
pub async fn fetch_portfolio(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<PortfolioDetail>, DbErr> {
    let Some(root) = portfolio::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    // Zero contact rows is not an error; the aggregate gets the default.
    let contact_row = contact::Entity::find()
        .filter(contact::Column::PortfolioId.eq(id))
        .one(db)
        .await?;

    let (projects, experiences, skills, services, testimonials, members, links) = tokio::try_join!(
        project::Entity::find()
            .filter(project::Column::PortfolioId.eq(id))
            .all(db),
        experience::Entity::find()
            .filter(experience::Column::PortfolioId.eq(id))
            .all(db),
        skill::Entity::find()
            .filter(skill::Column::PortfolioId.eq(id))
            .all(db),
        service::Entity::find()
            .filter(service::Column::PortfolioId.eq(id))
            .all(db),
        testimonial::Entity::find()
            .filter(testimonial::Column::PortfolioId.eq(id))
            .all(db),
        team_member::Entity::find()
            .filter(team_member::Column::PortfolioId.eq(id))
            .all(db),
        social_link::Entity::find()
            .filter(social_link::Column::PortfolioId.eq(id))
            .all(db),
    )?;

    // Second-level fan-out: each member's links, scoped by member id.
    let member_links = try_join_all(members.iter().map(|m| {
        member_link::Entity::find()
            .filter(member_link::Column::TeamMemberId.eq(m.id))
            .all(db)
    }))
    .await?;

    let team_members = members
        .into_iter()
        .zip(member_links)
        .map(|(m, links)| TeamMemberData::with_links(m, links))
        .collect();

    Ok(Some(PortfolioDetail {
        id: Some(root.id),
        user_id: root.user_id,
        name: root.name,
        title: root.title,
        subtitle: root.subtitle,
        bio: root.bio,
        theme: root.theme,
        layout: root.layout,
        contact: Some(contact_row.map(ContactData::from).unwrap_or_default()),
        projects: projects.into_iter().map(ProjectData::from).collect(),
        experiences: experiences.into_iter().map(ExperienceData::from).collect(),
        skills: skills.into_iter().map(SkillData::from).collect(),
        services: services.into_iter().map(ServiceData::from).collect(),
        testimonials: testimonials
            .into_iter()
            .map(TestimonialData::from)
            .collect(),
        team_members,
        social_links: links.into_iter().map(SocialLinkData::from).collect(),
    }))
}

/// List a user's portfolio root rows (no child collections).
pub async fn list_portfolios_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<portfolio::Model>, DbErr> {
    portfolio::Entity::find()
        .filter(portfolio::Column::UserId.eq(user_id))
        .order_by_asc(portfolio::Column::CreatedAt)
        .all(db)
        .await
}

/// Upsert the root and reconcile every child collection, returning the
/// portfolio id.
///
/// Children are processed in a fixed order: contact, projects, experiences,
/// skills, services, testimonials, team members (and their links), social
/// links. A failure aborts the remaining collections and is reported once;
/// collections already reconciled stay applied.
///
/// An empty incoming collection is skipped outright — no id query, no
/// delete — so clearing a collection client-side does not remove its stored
/// rows. Kept as-is until the product decides otherwise.
pub async fn save_portfolio(
    db: &DatabaseConnection,
    detail: PortfolioDetail,
) -> Result<Uuid, SavePortfolioError> {
    if detail.title.trim().is_empty() {
        return Err(SavePortfolioError::TitleRequired);
    }

    let PortfolioDetail {
        id,
        user_id,
        name,
        title,
        subtitle,
        bio,
        theme,
        layout,
        contact,
        projects,
        experiences,
        skills,
        services,
        testimonials,
        team_members,
        social_links,
    } = detail;

    let portfolio_id = id.unwrap_or_else(Uuid::new_v4);
    let now = chrono::Utc::now();

    let root = portfolio::ActiveModel {
        id: Set(portfolio_id),
        user_id: Set(user_id),
        name: Set(name),
        title: Set(title),
        subtitle: Set(subtitle),
        bio: Set(bio),
        theme: Set(theme),
        layout: Set(layout),
        created_at: Set(now),
        updated_at: Set(now),
    };
    portfolio::Entity::insert(root)
        .on_conflict(
            OnConflict::column(portfolio::Column::Id)
                .update_columns([
                    portfolio::Column::Name,
                    portfolio::Column::Title,
                    portfolio::Column::Subtitle,
                    portfolio::Column::Bio,
                    portfolio::Column::Theme,
                    portfolio::Column::Layout,
                    portfolio::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .map_err(log_save_err("root"))?;

    if let Some(contact_data) = contact {
        upsert_contact(db, portfolio_id, contact_data, now)
            .await
            .map_err(log_save_err("contact"))?;
    }

    if !projects.is_empty() {
        reconcile_projects(db, portfolio_id, &projects, now)
            .await
            .map_err(log_save_err("projects"))?;
    }
    if !experiences.is_empty() {
        reconcile_experiences(db, portfolio_id, &experiences, now)
            .await
            .map_err(log_save_err("experiences"))?;
    }
    if !skills.is_empty() {
        reconcile_skills(db, portfolio_id, &skills, now)
            .await
            .map_err(log_save_err("skills"))?;
    }
    if !services.is_empty() {
        reconcile_services(db, portfolio_id, &services, now)
            .await
            .map_err(log_save_err("services"))?;
    }
    if !testimonials.is_empty() {
        reconcile_testimonials(db, portfolio_id, &testimonials, now)
            .await
            .map_err(log_save_err("testimonials"))?;
    }
    if !team_members.is_empty() {
        reconcile_team_members(db, portfolio_id, &team_members, now)
            .await
            .map_err(log_save_err("team members"))?;
    }
    if !social_links.is_empty() {
        reconcile_social_links(db, portfolio_id, &social_links, now)
            .await
            .map_err(log_save_err("social links"))?;
    }

    Ok(portfolio_id)
}

/// Delete a portfolio root row. Child rows go with it via the schema's
/// cascading foreign keys; no explicit child cleanup happens here.
pub async fn delete_portfolio(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    portfolio::Entity::delete_by_id(id).exec(db).await
}

fn log_save_err(step: &'static str) -> impl FnOnce(DbErr) -> DbErr {
    move |e| {
        tracing::error!("portfolio save failed at {step}: {e}");
        e
    }
}

/// Ids present in storage but absent from the incoming set.
fn stale_ids(existing: impl Iterator<Item = Uuid>, incoming: &HashSet<Uuid>) -> Vec<Uuid> {
    existing.filter(|id| !incoming.contains(id)).collect()
}

async fn upsert_contact(
    db: &DatabaseConnection,
    portfolio_id: Uuid,
    data: ContactData,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<(), DbErr> {
    let row = contact::ActiveModel {
        id: Set(data.id.unwrap_or_else(Uuid::new_v4)),
        portfolio_id: Set(portfolio_id),
        email: Set(data.email),
        phone: Set(data.phone),
        location: Set(data.location),
        linkedin_url: Set(data.linkedin_url),
        github_url: Set(data.github_url),
        website_url: Set(data.website_url),
        updated_at: Set(now),
    };
    contact::Entity::insert(row)
        .on_conflict(
            OnConflict::column(contact::Column::Id)
                .update_columns([
                    contact::Column::Email,
                    contact::Column::Phone,
                    contact::Column::Location,
                    contact::Column::LinkedinUrl,
                    contact::Column::GithubUrl,
                    contact::Column::WebsiteUrl,
                    contact::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}

async fn reconcile_projects(
    db: &DatabaseConnection,
    portfolio_id: Uuid,
    items: &[ProjectData],
    now: chrono::DateTime<chrono::Utc>,
) -> Result<(), DbErr> {
    let existing = project::Entity::find()
        .filter(project::Column::PortfolioId.eq(portfolio_id))
        .all(db)
        .await?;

    let keep: HashSet<Uuid> = items.iter().map(|p| p.id).collect();
    let stale = stale_ids(existing.into_iter().map(|m| m.id), &keep);
    if !stale.is_empty() {
        project::Entity::delete_many()
            .filter(project::Column::Id.is_in(stale))
            .exec(db)
            .await?;
    }

    for item in items {
        let row = project::ActiveModel {
            id: Set(item.id),
            portfolio_id: Set(portfolio_id),
            title: Set(item.title.clone()),
            description: Set(item.description.clone()),
            technologies: Set(serde_json::json!(item.technologies)),
            image_url: Set(item.image_url.clone()),
            link_url: Set(item.link_url.clone()),
            is_featured: Set(item.featured),
            updated_at: Set(now),
        };
        project::Entity::insert(row)
            .on_conflict(
                OnConflict::column(project::Column::Id)
                    .update_columns([
                        project::Column::Title,
                        project::Column::Description,
                        project::Column::Technologies,
                        project::Column::ImageUrl,
                        project::Column::LinkUrl,
                        project::Column::IsFeatured,
                        project::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    Ok(())
}

async fn reconcile_experiences(
    db: &DatabaseConnection,
    portfolio_id: Uuid,
    items: &[ExperienceData],
    now: chrono::DateTime<chrono::Utc>,
) -> Result<(), DbErr> {
    let existing = experience::Entity::find()
        .filter(experience::Column::PortfolioId.eq(portfolio_id))
        .all(db)
        .await?;

    let keep: HashSet<Uuid> = items.iter().map(|e| e.id).collect();
    let stale = stale_ids(existing.into_iter().map(|m| m.id), &keep);
    if !stale.is_empty() {
        experience::Entity::delete_many()
            .filter(experience::Column::Id.is_in(stale))
            .exec(db)
            .await?;
    }

    for item in items {
        let row = experience::ActiveModel {
            id: Set(item.id),
            portfolio_id: Set(portfolio_id),
            company: Set(item.company.clone()),
            role: Set(item.role.clone()),
            duration: Set(item.duration.clone()),
            description: Set(item.description.clone()),
            achievements: Set(serde_json::json!(item.achievements)),
            updated_at: Set(now),
        };
        experience::Entity::insert(row)
            .on_conflict(
                OnConflict::column(experience::Column::Id)
                    .update_columns([
                        experience::Column::Company,
                        experience::Column::Role,
                        experience::Column::Duration,
                        experience::Column::Description,
                        experience::Column::Achievements,
                        experience::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    Ok(())
}

async fn reconcile_skills(
    db: &DatabaseConnection,
    portfolio_id: Uuid,
    items: &[SkillData],
    now: chrono::DateTime<chrono::Utc>,
) -> Result<(), DbErr> {
    let existing = skill::Entity::find()
        .filter(skill::Column::PortfolioId.eq(portfolio_id))
        .all(db)
        .await?;

    let keep: HashSet<Uuid> = items.iter().map(|s| s.id).collect();
    let stale = stale_ids(existing.into_iter().map(|m| m.id), &keep);
    if !stale.is_empty() {
        skill::Entity::delete_many()
            .filter(skill::Column::Id.is_in(stale))
            .exec(db)
            .await?;
    }

    for item in items {
        let row = skill::ActiveModel {
            id: Set(item.id),
            portfolio_id: Set(portfolio_id),
            name: Set(item.name.clone()),
            level: Set(item.level),
            category: Set(item.category.clone()),
            updated_at: Set(now),
        };
        skill::Entity::insert(row)
            .on_conflict(
                OnConflict::column(skill::Column::Id)
                    .update_columns([
                        skill::Column::Name,
                        skill::Column::Level,
                        skill::Column::Category,
                        skill::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    Ok(())
}

async fn reconcile_services(
    db: &DatabaseConnection,
    portfolio_id: Uuid,
    items: &[ServiceData],
    now: chrono::DateTime<chrono::Utc>,
) -> Result<(), DbErr> {
    let existing = service::Entity::find()
        .filter(service::Column::PortfolioId.eq(portfolio_id))
        .all(db)
        .await?;

    let keep: HashSet<Uuid> = items.iter().map(|s| s.id).collect();
    let stale = stale_ids(existing.into_iter().map(|m| m.id), &keep);
    if !stale.is_empty() {
        service::Entity::delete_many()
            .filter(service::Column::Id.is_in(stale))
            .exec(db)
            .await?;
    }

    for item in items {
        let row = service::ActiveModel {
            id: Set(item.id),
            portfolio_id: Set(portfolio_id),
            title: Set(item.title.clone()),
            description: Set(item.description.clone()),
            price: Set(item.price.clone()),
            icon: Set(item.icon.clone()),
            updated_at: Set(now),
        };
        service::Entity::insert(row)
            .on_conflict(
                OnConflict::column(service::Column::Id)
                    .update_columns([
                        service::Column::Title,
                        service::Column::Description,
                        service::Column::Price,
                        service::Column::Icon,
                        service::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    Ok(())
}

async fn reconcile_testimonials(
    db: &DatabaseConnection,
    portfolio_id: Uuid,
    items: &[TestimonialData],
    now: chrono::DateTime<chrono::Utc>,
) -> Result<(), DbErr> {
    let existing = testimonial::Entity::find()
        .filter(testimonial::Column::PortfolioId.eq(portfolio_id))
        .all(db)
        .await?;

    let keep: HashSet<Uuid> = items.iter().map(|t| t.id).collect();
    let stale = stale_ids(existing.into_iter().map(|m| m.id), &keep);
    if !stale.is_empty() {
        testimonial::Entity::delete_many()
            .filter(testimonial::Column::Id.is_in(stale))
            .exec(db)
            .await?;
    }

    for item in items {
        let row = testimonial::ActiveModel {
            id: Set(item.id),
            portfolio_id: Set(portfolio_id),
            author: Set(item.author.clone()),
            company: Set(item.company.clone()),
            content: Set(item.content.clone()),
            avatar_url: Set(item.avatar_url.clone()),
            rating: Set(item.rating),
            updated_at: Set(now),
        };
        testimonial::Entity::insert(row)
            .on_conflict(
                OnConflict::column(testimonial::Column::Id)
                    .update_columns([
                        testimonial::Column::Author,
                        testimonial::Column::Company,
                        testimonial::Column::Content,
                        testimonial::Column::AvatarUrl,
                        testimonial::Column::Rating,
                        testimonial::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    Ok(())
}

async fn reconcile_team_members(
    db: &DatabaseConnection,
    portfolio_id: Uuid,
    members: &[TeamMemberData],
    now: chrono::DateTime<chrono::Utc>,
) -> Result<(), DbErr> {
    let existing = team_member::Entity::find()
        .filter(team_member::Column::PortfolioId.eq(portfolio_id))
        .all(db)
        .await?;

    let keep: HashSet<Uuid> = members.iter().map(|m| m.id).collect();
    let stale = stale_ids(existing.into_iter().map(|m| m.id), &keep);
    if !stale.is_empty() {
        // Removed members' link rows fall to the cascade FK.
        team_member::Entity::delete_many()
            .filter(team_member::Column::Id.is_in(stale))
            .exec(db)
            .await?;
    }

    for member in members {
        let row = team_member::ActiveModel {
            id: Set(member.id),
            portfolio_id: Set(portfolio_id),
            name: Set(member.name.clone()),
            role: Set(member.role.clone()),
            bio: Set(member.bio.clone()),
            email: Set(member.email.clone()),
            avatar_url: Set(member.avatar_url.clone()),
            updated_at: Set(now),
        };
        team_member::Entity::insert(row)
            .on_conflict(
                OnConflict::column(team_member::Column::Id)
                    .update_columns([
                        team_member::Column::Name,
                        team_member::Column::Role,
                        team_member::Column::Bio,
                        team_member::Column::Email,
                        team_member::Column::AvatarUrl,
                        team_member::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        reconcile_member_links(db, member.id, &member.social_links, now).await?;
    }

    Ok(())
}

/// Link diff is scoped to one member: an id here is never compared against
/// another member's links.
async fn reconcile_member_links(
    db: &DatabaseConnection,
    member_id: Uuid,
    links: &[SocialLinkData],
    now: chrono::DateTime<chrono::Utc>,
) -> Result<(), DbErr> {
    if links.is_empty() {
        return Ok(());
    }

    let existing = member_link::Entity::find()
        .filter(member_link::Column::TeamMemberId.eq(member_id))
        .all(db)
        .await?;

    let keep: HashSet<Uuid> = links.iter().map(|l| l.id).collect();
    let stale = stale_ids(existing.into_iter().map(|m| m.id), &keep);
    if !stale.is_empty() {
        member_link::Entity::delete_many()
            .filter(member_link::Column::Id.is_in(stale))
            .exec(db)
            .await?;
    }

    for link in links {
        let row = member_link::ActiveModel {
            id: Set(link.id),
            team_member_id: Set(member_id),
            platform: Set(link.platform.clone()),
            url: Set(link.url.clone()),
            icon: Set(link.icon.clone()),
            updated_at: Set(now),
        };
        member_link::Entity::insert(row)
            .on_conflict(
                OnConflict::column(member_link::Column::Id)
                    .update_columns([
                        member_link::Column::Platform,
                        member_link::Column::Url,
                        member_link::Column::Icon,
                        member_link::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    Ok(())
}

async fn reconcile_social_links(
    db: &DatabaseConnection,
    portfolio_id: Uuid,
    links: &[SocialLinkData],
    now: chrono::DateTime<chrono::Utc>,
) -> Result<(), DbErr> {
    let existing = social_link::Entity::find()
        .filter(social_link::Column::PortfolioId.eq(portfolio_id))
        .all(db)
        .await?;

    let keep: HashSet<Uuid> = links.iter().map(|l| l.id).collect();
    let stale = stale_ids(existing.into_iter().map(|m| m.id), &keep);
    if !stale.is_empty() {
        social_link::Entity::delete_many()
            .filter(social_link::Column::Id.is_in(stale))
            .exec(db)
            .await?;
    }

    for link in links {
        let row = social_link::ActiveModel {
            id: Set(link.id),
            portfolio_id: Set(portfolio_id),
            platform: Set(link.platform.clone()),
            url: Set(link.url.clone()),
            icon: Set(link.icon.clone()),
            updated_at: Set(now),
        };
        social_link::Entity::insert(row)
            .on_conflict(
                OnConflict::column(social_link::Column::Id)
                    .update_columns([
                        social_link::Column::Platform,
                        social_link::Column::Url,
                        social_link::Column::Icon,
                        social_link::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    Ok(())
}
