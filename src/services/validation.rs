//! Request validation.
//!
//! Every endpoint has an explicit check that turns a raw JSON object into a
//! typed input plus a [`FieldErrors`] map. Each field reports its first
//! failing rule; all fields are always checked. Checks that need the
//! database (order existence, unique email) are done by the services on top
//! of these results.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use validator::{ValidateEmail, ValidateLength};

use crate::errors::FieldErrors;
use crate::utils::money;

pub type Payload = Map<String, Value>;

const MAX_STRING: u64 = 255;
const MIN_PASSWORD: u64 = 8;

/// Whether a rule set applies to absent keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The key must be present (create).
    Required,
    /// Rules only run when the key is present (update).
    Sometimes,
}

/// Validated payment fields. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentChanges {
    pub order_id: Option<i32>,
    pub payment_method: Option<String>,
    pub amount: Option<Decimal>,
    /// `Some(None)` clears the timestamp.
    pub paid_at: Option<Option<NaiveDateTime>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub order_id: i32,
    pub payment_method: String,
    pub amount: Decimal,
    pub paid_at: Option<NaiveDateTime>,
}

impl PaymentChanges {
    /// All required fields, if every one of them was supplied.
    pub fn into_new_payment(self) -> Option<NewPayment> {
        Some(NewPayment {
            order_id: self.order_id?,
            payment_method: self.payment_method?,
            amount: self.amount?,
            paid_at: self.paid_at.flatten(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A present key after input normalization: strings are trimmed and blank
/// strings count as null.
enum Field<'a> {
    Missing,
    Empty,
    Filled(&'a Value),
}

fn field<'a>(payload: &'a Payload, key: &str) -> Field<'a> {
    match payload.get(key) {
        None => Field::Missing,
        Some(Value::Null) => Field::Empty,
        Some(Value::String(s)) if s.trim().is_empty() => Field::Empty,
        Some(Value::Array(items)) if items.is_empty() => Field::Empty,
        Some(value) => Field::Filled(value),
    }
}

fn label(key: &str) -> String {
    key.replace('_', " ")
}

fn required_message(key: &str) -> String {
    format!("The {} field is required.", label(key))
}

/// Applies the presence rule. Returns the value when there is one to check.
fn required<'a>(
    payload: &'a Payload,
    key: &str,
    presence: Presence,
    errors: &mut FieldErrors,
) -> Option<&'a Value> {
    match field(payload, key) {
        Field::Filled(value) => Some(value),
        Field::Missing if presence == Presence::Sometimes => None,
        Field::Missing | Field::Empty => {
            errors.add(key, required_message(key));
            None
        }
    }
}

fn string_rule(key: &str, value: &Value, max: u64, errors: &mut FieldErrors) -> Option<String> {
    let Some(text) = value.as_str() else {
        errors.add(key, format!("The {} field must be a string.", label(key)));
        return None;
    };

    let text = text.trim();
    if !text.validate_length(None, Some(max), None) {
        errors.add(
            key,
            format!("The {} field must not be greater than {} characters.", label(key), max),
        );
        return None;
    }

    Some(text.to_string())
}

fn parse_id(value: &Value) -> Option<i32> {
    let id = match value {
        Value::Number(n) => n.as_i64().and_then(|id| i32::try_from(id).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    id.filter(|id| *id > 0)
}

fn parse_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => money::parse(&n.to_string()),
        Value::String(s) => money::parse(s),
        _ => None,
    }
}

/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` (optionally with
/// fractional seconds), RFC 3339 (converted to UTC) and `YYYY-MM-DD`.
pub fn parse_date(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    const FORMATS: [&str; 5] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|dt| dt.naive_utc()))
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Payment rules shared by create (`Required`) and update (`Sometimes`).
/// Order existence is not checked here.
pub fn check_payment_fields(payload: &Payload, presence: Presence) -> (PaymentChanges, FieldErrors) {
    let mut errors = FieldErrors::new();
    let mut changes = PaymentChanges::default();

    if let Some(value) = required(payload, "order_id", presence, &mut errors) {
        match parse_id(value) {
            Some(id) => changes.order_id = Some(id),
            None => errors.add("order_id", "The selected order id is invalid."),
        }
    }

    if let Some(value) = required(payload, "payment_method", presence, &mut errors) {
        changes.payment_method = string_rule("payment_method", value, MAX_STRING, &mut errors);
    }

    if let Some(value) = required(payload, "amount", presence, &mut errors) {
        match parse_amount(value) {
            None => errors.add("amount", "The amount field must be a number."),
            Some(amount) if amount < Decimal::ZERO => {
                errors.add("amount", "The amount field must be at least 0.")
            }
            Some(amount) => {
                let amount = money::normalize(amount);
                if amount > money::MAX {
                    errors.add(
                        "amount",
                        format!("The amount field must not be greater than {}.", money::MAX),
                    );
                } else {
                    changes.amount = Some(amount);
                }
            }
        }
    }

    // nullable: an explicit null or blank string clears the timestamp
    match field(payload, "paid_at") {
        Field::Missing => {}
        Field::Empty => changes.paid_at = Some(None),
        Field::Filled(value) => match value.as_str().and_then(parse_date) {
            Some(paid_at) => changes.paid_at = Some(Some(paid_at)),
            None => errors.add("paid_at", "The paid at field must be a valid date."),
        },
    }

    (changes, errors)
}

/// Registration rules. Email uniqueness is checked by the auth service.
pub fn check_registration(payload: &Payload) -> (Option<Registration>, FieldErrors) {
    let mut errors = FieldErrors::new();

    let name = required(payload, "name", Presence::Required, &mut errors)
        .and_then(|value| string_rule("name", value, MAX_STRING, &mut errors));

    let email = required(payload, "email", Presence::Required, &mut errors)
        .and_then(|value| string_rule("email", value, MAX_STRING, &mut errors))
        .and_then(|email| {
            if email.validate_email() {
                Some(email.to_lowercase())
            } else {
                errors.add("email", "The email field must be a valid email address.");
                None
            }
        });

    let password = required(payload, "password", Presence::Required, &mut errors).and_then(|value| {
        let Some(password) = value.as_str() else {
            errors.add("password", "The password field must be a string.");
            return None;
        };
        if !password.validate_length(Some(MIN_PASSWORD), None, None) {
            errors.add("password", "The password field must be at least 8 characters.");
            return None;
        }
        Some(password.to_string())
    });

    let registration = match (name, email, password) {
        (Some(name), Some(email), Some(password)) => Some(Registration { name, email, password }),
        _ => None,
    };

    (registration, errors)
}

pub fn check_login(payload: &Payload) -> Result<Credentials, FieldErrors> {
    let mut errors = FieldErrors::new();

    let email = required(payload, "email", Presence::Required, &mut errors)
        .and_then(|value| string_rule("email", value, MAX_STRING, &mut errors));

    let password = required(payload, "password", Presence::Required, &mut errors).and_then(|value| {
        let password = value.as_str().map(str::to_string);
        if password.is_none() {
            errors.add("password", "The password field must be a string.");
        }
        password
    });

    match (email, password) {
        (Some(email), Some(password)) if errors.is_empty() => Ok(Credentials {
            email: email.to_lowercase(),
            password,
        }),
        _ => Err(errors),
    }
}
