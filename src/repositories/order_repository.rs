use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::*;

use crate::models::orders::{self, OrderStatus};

pub struct OrderRepository;

impl OrderRepository {
    pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<orders::Model>, DbErr> {
        orders::Entity::find_by_id(id).one(db).await
    }

    pub async fn exists<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, DbErr> {
        Ok(Self::find(db, id).await?.is_some())
    }

    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        total_amount: Decimal,
        status: OrderStatus,
        created_at: DateTime<Utc>,
    ) -> Result<orders::Model, DbErr> {
        let order = orders::ActiveModel {
            user_id: Set(user_id),
            total_amount: Set(total_amount),
            status: Set(status),
            created_at: Set(created_at),
            updated_at: Set(created_at),
            ..Default::default()
        };

        order.insert(db).await
    }
}
