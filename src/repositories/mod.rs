//! Table access. Every operation takes the connection it runs on, so the
//! same call works against the pool or inside a transaction.

pub mod order_repository;
pub mod payment_repository;
pub mod session_repository;
pub mod user_repository;

pub use order_repository::OrderRepository;
pub use payment_repository::PaymentRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;
