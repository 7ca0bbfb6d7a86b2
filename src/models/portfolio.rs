use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::contact::ContactData;
use super::experience::ExperienceData;
use super::project::ProjectData;
use super::service::ServiceData;
use super::skill::SkillData;
use super::social_link::SocialLinkData;
use super::team_member::TeamMemberData;
use super::testimonial::TestimonialData;

/// SeaORM entity for the `portfolios` table — the root row every child
/// collection hangs off.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolios")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub title: String,
    pub subtitle: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub theme: String,
    pub layout: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::project::Entity")]
    Projects,
    #[sea_orm(has_many = "super::team_member::Entity")]
    TeamMembers,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::team_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// The fully-assembled portfolio served to (and accepted from) the client
/// app: root fields plus every child collection, camelCase on the wire.
///
/// `id` is `None` for a portfolio that has never been saved; child ids are
/// generated client-side and stay stable across edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDetail {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub user_id: Uuid,
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    pub theme: String,
    pub layout: String,
    #[serde(default)]
    pub contact: Option<ContactData>,
    #[serde(default)]
    pub projects: Vec<ProjectData>,
    #[serde(default)]
    pub experiences: Vec<ExperienceData>,
    #[serde(default)]
    pub skills: Vec<SkillData>,
    #[serde(default)]
    pub services: Vec<ServiceData>,
    #[serde(default)]
    pub testimonials: Vec<TestimonialData>,
    #[serde(default)]
    pub team_members: Vec<TeamMemberData>,
    #[serde(default)]
    pub social_links: Vec<SocialLinkData>,
}

/// Root-row summary for dashboard listings (no child collections).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub theme: String,
    pub layout: String,
    pub updated_at: DateTimeUtc,
}

impl From<Model> for PortfolioSummary {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            name: m.name,
            title: m.title,
            subtitle: m.subtitle,
            theme: m.theme,
            layout: m.layout,
            updated_at: m.updated_at,
        }
    }
}
