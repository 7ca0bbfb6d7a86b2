use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::social_link::SocialLinkData;

/// SeaORM entity for the `team_member_social_links` table. Same shape as
/// the portfolio-level links, but parented by a team member.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_member_social_links")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub team_member_id: Uuid,
    pub platform: String,
    pub url: String,
    pub icon: Option<String>,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team_member::Entity",
        from = "Column::TeamMemberId",
        to = "super::team_member::Column::Id"
    )]
    TeamMember,
}

impl Related<super::team_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamMember.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

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
