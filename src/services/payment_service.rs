use sea_orm::{ConnectionTrait, DbErr};

use crate::errors::{AppError, FieldErrors, Result};
use crate::models::dto::PaymentWithOrder;
use crate::repositories::{OrderRepository, PaymentRepository};
use crate::services::validation::{self, NewPayment, Payload, PaymentChanges, Presence};

pub const NOT_FOUND: &str = "Payment not found";

pub struct PaymentService;

impl PaymentService {
    /// All payments with their orders, no paging.
    pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<PaymentWithOrder>> {
        let rows = PaymentRepository::all_with_order(db).await?;
        Ok(rows
            .into_iter()
            .map(|(payment, order)| PaymentWithOrder::new(payment, order))
            .collect())
    }

    pub async fn show<C: ConnectionTrait>(db: &C, id: i32) -> Result<PaymentWithOrder> {
        let (payment, order) = PaymentRepository::find_with_order(db, id)
            .await?
            .ok_or(AppError::NotFound(NOT_FOUND))?;
        Ok(PaymentWithOrder::new(payment, order))
    }

    pub async fn create<C: ConnectionTrait>(db: &C, payload: &Payload) -> Result<PaymentWithOrder> {
        let input = Self::validate_create(db, payload).await?;
        let order_id = input.order_id;

        let payment = PaymentRepository::insert(db, input).await?;
        tracing::info!(payment_id = payment.id, order_id, "payment created");

        let order = OrderRepository::find(db, payment.order_id).await?;
        Ok(PaymentWithOrder::new(payment, order))
    }

    /// Unknown ids fail before the body is validated.
    pub async fn update<C: ConnectionTrait>(db: &C, id: i32, payload: &Payload) -> Result<PaymentWithOrder> {
        let payment = PaymentRepository::find(db, id)
            .await?
            .ok_or(AppError::NotFound(NOT_FOUND))?;

        let changes = Self::validate_update(db, payload).await?;
        let payment = PaymentRepository::update(db, payment, changes).await?;
        tracing::info!(payment_id = payment.id, "payment updated");

        let order = OrderRepository::find(db, payment.order_id).await?;
        Ok(PaymentWithOrder::new(payment, order))
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<()> {
        if !PaymentRepository::delete(db, id).await? {
            return Err(AppError::NotFound(NOT_FOUND));
        }
        tracing::info!(payment_id = id, "payment deleted");
        Ok(())
    }

    /// Create rules: every field but `paid_at` is required.
    pub async fn validate_create<C: ConnectionTrait>(db: &C, payload: &Payload) -> Result<NewPayment> {
        let (changes, mut errors) = validation::check_payment_fields(payload, Presence::Required);
        Self::check_order_exists(db, &changes, &mut errors).await?;
        errors.into_result()?;

        changes
            .into_new_payment()
            .ok_or_else(|| AppError::Internal("validated payment is missing required fields".to_string()))
    }

    /// Update rules: same as create, applied only to the keys present.
    pub async fn validate_update<C: ConnectionTrait>(db: &C, payload: &Payload) -> Result<PaymentChanges> {
        let (changes, mut errors) = validation::check_payment_fields(payload, Presence::Sometimes);
        Self::check_order_exists(db, &changes, &mut errors).await?;
        errors.into_result()?;
        Ok(changes)
    }

    // Ownership of the order is not checked: any authenticated user may
    // attach a payment to any order.
    async fn check_order_exists<C: ConnectionTrait>(
        db: &C,
        changes: &PaymentChanges,
        errors: &mut FieldErrors,
    ) -> std::result::Result<(), DbErr> {
        if let Some(order_id) = changes.order_id {
            if !OrderRepository::exists(db, order_id).await? {
                errors.add("order_id", "The selected order id is invalid.");
            }
        }
        Ok(())
    }
}

/// Path ids that are not positive integers never match a row.
pub fn parse_payment_id(raw: &str) -> Result<i32> {
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(AppError::NotFound(NOT_FOUND))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::orders::{self, OrderStatus};
    use crate::models::payments;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::json;
    use std::str::FromStr;

    fn order(id: i32) -> orders::Model {
        let now = Utc::now();
        orders::Model {
            id,
            user_id: 1,
            total_amount: Decimal::from(500),
            status: OrderStatus::Processing,
            created_at: now,
            updated_at: now,
        }
    }

    fn payment(id: i32, order_id: i32, method: &str, amount: &str) -> payments::Model {
        let now = Utc::now();
        payments::Model {
            id,
            order_id,
            payment_method: method.to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            paid_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn payload(value: serde_json::Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_create_reports_every_failing_field() {
        // order lookup comes back empty
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<orders::Model>::new()])
            .into_connection();

        let err = PaymentService::create(
            &db,
            &payload(json!({"order_id": 99999, "payment_method": "cash", "amount": -5})),
        )
        .await
        .unwrap_err();

        let AppError::Validation(errors) = err else {
            panic!("expected a validation error, got {err:?}");
        };
        assert!(errors.has("order_id"));
        assert!(errors.has("amount"));
        assert!(!errors.has("payment_method"));
    }

    #[tokio::test]
    async fn test_create_inserts_and_loads_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![order(5)]])
            .append_query_results([vec![payment(1, 5, "credit_card", "150.50")]])
            .append_query_results([vec![order(5)]])
            .into_connection();

        let created = PaymentService::create(
            &db,
            &payload(json!({"order_id": 5, "payment_method": "credit_card", "amount": 150.50})),
        )
        .await
        .unwrap();

        assert_eq!(created.order_id, 5);
        assert_eq!(created.order.unwrap().id, 5);
    }

    #[tokio::test]
    async fn test_update_unknown_payment_skips_validation() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<payments::Model>::new()])
            .into_connection();

        // the body is invalid too, but not found wins
        let err = PaymentService::update(&db, 99999, &payload(json!({"amount": -1})))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(NOT_FOUND)));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![payment(1, 5, "credit_card", "100.00")]])
            .append_query_results([vec![payment(1, 5, "stripe", "100.00")]])
            .append_query_results([vec![order(5)]])
            .into_connection();

        let updated = PaymentService::update(&db, 1, &payload(json!({"payment_method": "stripe"})))
            .await
            .unwrap();
        assert_eq!(updated.payment_method, "stripe");

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("UPDATE"));
        assert!(log.contains("payment_method"));
        assert!(!log.contains(r#"\"amount\" = "#));
    }

    #[tokio::test]
    async fn test_delete_unknown_payment() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let err = PaymentService::delete(&db, 42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(NOT_FOUND)));
    }

    #[test]
    fn test_parse_payment_id() {
        assert_eq!(parse_payment_id("12").unwrap(), 12);
        assert!(matches!(parse_payment_id("abc"), Err(AppError::NotFound(_))));
        assert!(matches!(parse_payment_id("0"), Err(AppError::NotFound(_))));
        assert!(matches!(parse_payment_id("-3"), Err(AppError::NotFound(_))));
    }
}
