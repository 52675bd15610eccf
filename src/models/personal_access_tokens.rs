// ============================================================================
// MODEL: PERSONAL ACCESS TOKENS
// ============================================================================
//
// One row per login session. A bearer token is a signed JWT whose `sid`
// claim names `token_id`; the token only resolves while the row exists
// and `expires_at` is in the future.
//
// Columns:
//   - id (INTEGER, PRIMARY KEY, SERIAL)
//   - user_id (INTEGER, NOT NULL, FK users, ON DELETE CASCADE)
//   - token_id (VARCHAR, UNIQUE, NOT NULL) - UUID v4
//   - name (VARCHAR, NOT NULL) - "login", "register", ...
//   - expires_at (TIMESTAMPTZ, NOT NULL)
//   - last_used_at (TIMESTAMPTZ, NULL)
//   - created_at (TIMESTAMPTZ, NOT NULL)
//
// Lifecycle:
//   1. POST /api/register or /api/login inserts a row and signs a JWT
//   2. Every protected request looks the row up and touches last_used_at
//   3. POST /api/logout deletes the row, revoking the token immediately
//
// ============================================================================

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "personal_access_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,

    #[sea_orm(unique)]
    pub token_id: String,

    pub name: String,

    pub expires_at: DateTimeUtc,

    pub last_used_at: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
}

impl Model {
    pub fn is_live_at(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.expires_at > now
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn session(expires_at: chrono::DateTime<Utc>) -> Model {
        Model {
            id: 1,
            user_id: 7,
            token_id: "c1b2".to_string(),
            name: "login".to_string(),
            expires_at,
            last_used_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_session_liveness() {
        let now = Utc::now();
        assert!(session(now + Duration::hours(1)).is_live_at(now));
        assert!(!session(now - Duration::seconds(1)).is_live_at(now));
        assert!(!session(now).is_live_at(now));
    }
}
