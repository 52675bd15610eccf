// Response shapes for the JSON API
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::orders::{self, OrderStatus};
use crate::models::{payments, users};
use crate::utils::money;

/// `{success, message?, data?}` envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub id: i32,
    pub user_id: i32,
    #[serde(serialize_with = "money::serialize")]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<orders::Model> for OrderSummary {
    fn from(order: orders::Model) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            total_amount: order.total_amount,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// A payment row with its order embedded.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentWithOrder {
    pub id: i32,
    pub order_id: i32,
    pub payment_method: String,
    #[serde(serialize_with = "money::serialize")]
    pub amount: Decimal,
    pub paid_at: Option<NaiveDateTime>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub order: Option<OrderSummary>,
}

impl PaymentWithOrder {
    pub fn new(payment: payments::Model, order: Option<orders::Model>) -> Self {
        Self {
            id: payment.id,
            order_id: payment.order_id,
            payment_method: payment.payment_method,
            amount: payment.amount,
            paid_at: payment.paid_at,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
            order: order.map(OrderSummary::from),
        }
    }
}

/// Returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub user: users::Model,
    pub token: String,
    pub token_type: &'static str,
}

impl AuthPayload {
    pub fn bearer(user: users::Model, token: String) -> Self {
        Self {
            user,
            token,
            token_type: "Bearer",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: String,
    pub server_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_payment_serializes_amounts_as_strings() {
        let now = Utc::now();
        let payment = payments::Model {
            id: 3,
            order_id: 5,
            payment_method: "credit_card".to_string(),
            amount: Decimal::from_str("150.5").unwrap(),
            paid_at: None,
            created_at: now,
            updated_at: now,
        };
        let order = orders::Model {
            id: 5,
            user_id: 1,
            total_amount: Decimal::from(300),
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(PaymentWithOrder::new(payment, Some(order))).unwrap();

        assert_eq!(json["amount"], "150.50");
        assert_eq!(json["paid_at"], serde_json::Value::Null);
        assert_eq!(json["order"]["id"], 5);
        assert_eq!(json["order"]["total_amount"], "300.00");
        assert_eq!(json["order"]["status"], "pending");
    }

    #[test]
    fn test_envelope_omits_empty_fields() {
        let json = serde_json::to_value(ApiResponse::message("Payment deleted successfully")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": "Payment deleted successfully"})
        );
    }
}
