//! Demo data, loaded at startup when `SEED_DB=true`.

pub mod factories;

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sea_orm::{ConnectionTrait, DbErr, TransactionTrait};

use crate::models::users;
use crate::repositories::{OrderRepository, PaymentRepository, UserRepository};
use crate::services::validation::NewPayment;
use crate::utils::password;

const DEMO_EMAIL: &str = "kunta@example.com";
const DEMO_PASSWORD: &str = "Super_Secret_Pw2025!";
const DEMO_ORDERS: usize = 3;
const FAKE_USERS: usize = 10;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub orders: usize,
    pub payments: usize,
}

/// Seeds the demo account plus random users, orders and payments in one
/// transaction. Does nothing when the demo account already exists.
pub async fn run<C: TransactionTrait + ConnectionTrait>(db: &C) -> Result<SeedReport, DbErr> {
    if UserRepository::find_by_email(db, DEMO_EMAIL).await?.is_some() {
        tracing::info!("demo data already present, skipping seed");
        return Ok(SeedReport::default());
    }

    let demo_hash = password::hash_password(DEMO_PASSWORD).map_err(DbErr::Custom)?;
    let report = seed(db, &mut StdRng::from_entropy(), demo_hash).await?;

    tracing::info!(
        users = report.users,
        orders = report.orders,
        payments = report.payments,
        "database seeded"
    );
    Ok(report)
}

async fn seed<C: TransactionTrait + ConnectionTrait, R: Rng>(
    db: &C,
    rng: &mut R,
    password_hash: String,
) -> Result<SeedReport, DbErr> {
    let mut report = SeedReport::default();
    let txn = db.begin().await?;

    let kunta = UserRepository::insert(&txn, "Kunta", DEMO_EMAIL, password_hash.clone()).await?;
    report.users += 1;
    seed_orders(&txn, rng, &kunta, DEMO_ORDERS, 1..=2, &mut report).await?;

    for sequence in 1..=FAKE_USERS {
        let fake = factories::fake_user(rng, sequence);
        // every fake account shares the demo password
        let user = UserRepository::insert(&txn, &fake.name, &fake.email, password_hash.clone()).await?;
        report.users += 1;

        let order_count = rng.gen_range(1..=5);
        seed_orders(&txn, rng, &user, order_count, 1..=3, &mut report).await?;
    }

    txn.commit().await?;
    Ok(report)
}

/// Payments copy their order's total as amount.
async fn seed_orders<C: ConnectionTrait, R: Rng>(
    db: &C,
    rng: &mut R,
    user: &users::Model,
    order_count: usize,
    payments_per_order: RangeInclusive<usize>,
    report: &mut SeedReport,
) -> Result<(), DbErr> {
    for _ in 0..order_count {
        let fake = factories::fake_order(rng);
        let order = OrderRepository::insert(db, user.id, fake.total_amount, fake.status, fake.created_at).await?;
        report.orders += 1;

        for _ in 0..rng.gen_range(payments_per_order.clone()) {
            let fake = factories::fake_payment(rng);
            PaymentRepository::insert(
                db,
                NewPayment {
                    order_id: order.id,
                    payment_method: fake.payment_method,
                    amount: order.total_amount,
                    paid_at: fake.paid_at,
                },
            )
            .await?;
            report.payments += 1;
        }
    }

    Ok(())
}
