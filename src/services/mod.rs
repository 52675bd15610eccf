pub mod auth_service;
pub mod authenticator;
pub mod payment_service;
pub mod validation;

pub use auth_service::AuthService;
pub use authenticator::{Authenticator, SessionAuthenticator};
pub use payment_service::PaymentService;
