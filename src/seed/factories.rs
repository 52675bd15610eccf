// Random demo data
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;

use crate::models::orders::OrderStatus;
use crate::utils::money;

pub const PAYMENT_METHODS: [&str; 5] = ["credit_card", "paypal", "bank_transfer", "cash", "stripe"];

const ORDER_STATUSES: [OrderStatus; 4] = [
    OrderStatus::Pending,
    OrderStatus::Processing,
    OrderStatus::Completed,
    OrderStatus::Cancelled,
];

const FIRST_NAMES: [&str; 12] = [
    "Amara", "Bastien", "Chloe", "Dmitri", "Elif", "Farid", "Greta", "Hiro", "Ines", "Jonas", "Keziah", "Luca",
];

const LAST_NAMES: [&str; 10] = [
    "Okafor", "Lemaire", "Novak", "Sato", "Haddad", "Lindqvist", "Moreau", "Petrov", "Quinn", "Rossi",
];

pub struct FakeUser {
    pub name: String,
    pub email: String,
}

pub struct FakeOrder {
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

pub struct FakePayment {
    pub payment_method: String,
    pub paid_at: Option<NaiveDateTime>,
}

/// `sequence` keeps emails unique within one seeding run.
pub fn fake_user<R: Rng>(rng: &mut R, sequence: usize) -> FakeUser {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");

    FakeUser {
        name: format!("{} {}", first, last),
        email: format!(
            "{}.{}{}@example.net",
            first.to_lowercase(),
            last.to_lowercase(),
            sequence
        ),
    }
}

pub fn fake_order<R: Rng>(rng: &mut R) -> FakeOrder {
    FakeOrder {
        total_amount: random_amount(rng),
        status: *ORDER_STATUSES.choose(rng).unwrap_or(&OrderStatus::Pending),
        created_at: within_last_six_months(rng),
    }
}

pub fn fake_payment<R: Rng>(rng: &mut R) -> FakePayment {
    let paid_at = rng
        .gen_bool(0.8)
        .then(|| within_last_six_months(rng).naive_utc());

    FakePayment {
        payment_method: PAYMENT_METHODS.choose(rng).copied().unwrap_or("cash").to_string(),
        paid_at,
    }
}

/// 10.00 to 5000.00
pub fn random_amount<R: Rng>(rng: &mut R) -> Decimal {
    money::normalize(Decimal::new(rng.gen_range(1_000..=500_000), 2))
}

fn within_last_six_months<R: Rng>(rng: &mut R) -> DateTime<Utc> {
    let window = Duration::days(182).num_seconds();
    Utc::now() - Duration::seconds(rng.gen_range(0..=window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_amounts_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let amount = random_amount(&mut rng);
            assert!(amount >= Decimal::from(10) && amount <= Decimal::from(5000));
            assert_eq!(amount.scale(), 2);
        }
    }

    #[test]
    fn test_payments_use_known_methods_and_past_dates() {
        let mut rng = StdRng::seed_from_u64(11);
        let now = Utc::now().naive_utc();
        let mut unpaid = 0;

        for _ in 0..200 {
            let payment = fake_payment(&mut rng);
            assert!(PAYMENT_METHODS.contains(&payment.payment_method.as_str()));
            match payment.paid_at {
                Some(paid_at) => assert!(paid_at <= now),
                None => unpaid += 1,
            }
        }

        assert!(unpaid > 0 && unpaid < 100);
    }

    #[test]
    fn test_fake_user_emails_are_unique_per_sequence() {
        let mut rng = StdRng::seed_from_u64(3);
        let first = fake_user(&mut rng, 1);
        let second = fake_user(&mut rng, 2);
        assert_ne!(first.email, second.email);
        assert!(first.email.ends_with("@example.net"));
    }
}
