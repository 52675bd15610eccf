use chrono::Utc;
use sea_orm::*;

use crate::models::{orders, payments};
use crate::services::validation::{NewPayment, PaymentChanges};

pub type PaymentRow = (payments::Model, Option<orders::Model>);

pub struct PaymentRepository;

impl PaymentRepository {
    /// Every payment joined with its order.
    pub async fn all_with_order<C: ConnectionTrait>(db: &C) -> Result<Vec<PaymentRow>, DbErr> {
        payments::Entity::find()
            .find_also_related(orders::Entity)
            .order_by_asc(payments::Column::Id)
            .all(db)
            .await
    }

    pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<payments::Model>, DbErr> {
        payments::Entity::find_by_id(id).one(db).await
    }

    pub async fn find_with_order<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<PaymentRow>, DbErr> {
        payments::Entity::find_by_id(id)
            .find_also_related(orders::Entity)
            .one(db)
            .await
    }

    pub async fn insert<C: ConnectionTrait>(db: &C, input: NewPayment) -> Result<payments::Model, DbErr> {
        let now = Utc::now();
        let payment = payments::ActiveModel {
            order_id: Set(input.order_id),
            payment_method: Set(input.payment_method),
            amount: Set(input.amount),
            paid_at: Set(input.paid_at),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        payment.insert(db).await
    }

    /// Writes the supplied fields only; everything else keeps its value.
    pub async fn update<C: ConnectionTrait>(
        db: &C,
        payment: payments::Model,
        changes: PaymentChanges,
    ) -> Result<payments::Model, DbErr> {
        let mut active: payments::ActiveModel = payment.into();

        if let Some(order_id) = changes.order_id {
            active.order_id = Set(order_id);
        }
        if let Some(payment_method) = changes.payment_method {
            active.payment_method = Set(payment_method);
        }
        if let Some(amount) = changes.amount {
            active.amount = Set(amount);
        }
        if let Some(paid_at) = changes.paid_at {
            active.paid_at = Set(paid_at);
        }
        active.updated_at = Set(Utc::now());

        active.update(db).await
    }

    /// Hard delete. Returns whether a row was removed.
    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, DbErr> {
        let result = payments::Entity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected > 0)
    }
}
