use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;

use crate::models::personal_access_tokens;

pub struct SessionRepository;

impl SessionRepository {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        token_id: &str,
        name: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<personal_access_tokens::Model, DbErr> {
        let session = personal_access_tokens::ActiveModel {
            user_id: Set(user_id),
            token_id: Set(token_id.to_string()),
            name: Set(name.to_string()),
            expires_at: Set(expires_at),
            last_used_at: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        session.insert(db).await
    }

    pub async fn find_by_token_id<C: ConnectionTrait>(
        db: &C,
        token_id: &str,
    ) -> Result<Option<personal_access_tokens::Model>, DbErr> {
        personal_access_tokens::Entity::find()
            .filter(personal_access_tokens::Column::TokenId.eq(token_id))
            .one(db)
            .await
    }

    pub async fn touch<C: ConnectionTrait>(db: &C, id: i32, at: DateTime<Utc>) -> Result<(), DbErr> {
        personal_access_tokens::Entity::update_many()
            .col_expr(personal_access_tokens::Column::LastUsedAt, Expr::value(Some(at)))
            .filter(personal_access_tokens::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(())
    }

    pub async fn delete_by_token_id<C: ConnectionTrait>(db: &C, token_id: &str) -> Result<u64, DbErr> {
        let result = personal_access_tokens::Entity::delete_many()
            .filter(personal_access_tokens::Column::TokenId.eq(token_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
