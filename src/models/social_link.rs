use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `portfolio_social_links` table (portfolio-level
/// links, distinct from the per-member collection).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolio_social_links")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub platform: String,
    pub url: String,
    pub icon: Option<String>,
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
}

impl Related<super::portfolio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Portfolio.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// One social link, used for both the portfolio-level collection and each
/// team member's own collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinkData {
    pub id: Uuid,
    pub platform: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl From<Model> for SocialLinkData {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            platform: m.platform,
            url: m.url,
            icon: m.icon,
        }
    }
}
