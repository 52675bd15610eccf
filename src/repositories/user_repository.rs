use chrono::Utc;
use sea_orm::*;

use crate::models::users;

pub struct UserRepository;

impl UserRepository {
    pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(db).await
    }

    pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(db)
            .await
    }

    /// `password_hash` must already be hashed.
    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        name: &str,
        email: &str,
        password_hash: String,
    ) -> Result<users::Model, DbErr> {
        let now = Utc::now();
        let user = users::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password: Set(password_hash),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        user.insert(db).await
    }
}
