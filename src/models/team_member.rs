use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::member_link;
use super::social_link::SocialLinkData;

/// SeaORM entity for the `team_members` table. Each member owns its own
/// social-link rows (`team_member_social_links`), a second level of nesting
/// under the portfolio.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub name: String,
    pub role: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::portfolio::Entity",
        from = "Column::PortfolioId",
        to = "super::portfolio::Column::Id"
    )]
    Portfolio,
    #[sea_orm(has_many = "super::member_link::Entity")]
    SocialLinks,
}

impl Related<super::portfolio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Portfolio.def()
    }
}

impl Related<super::member_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SocialLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberData {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub social_links: Vec<SocialLinkData>,
}

impl TeamMemberData {
    /// Join a member row with its fetched link rows.
    pub fn with_links(m: Model, links: Vec<member_link::Model>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            role: m.role,
            bio: m.bio,
            email: m.email,
            avatar_url: m.avatar_url,
            social_links: links.into_iter().map(SocialLinkData::from).collect(),
        }
    }
}
