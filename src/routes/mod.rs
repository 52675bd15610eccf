pub mod auth;
pub mod payments;
pub mod ping;

use actix_web::{error, web};

use crate::errors::AppError;

/// Malformed or non-object JSON bodies answer with the standard envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = match &err {
            error::JsonPayloadError::ContentType => "Expected a JSON request body".to_string(),
            other => other.to_string(),
        };
        AppError::BadRequest(message).into()
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .service(ping::ping)
            .configure(auth::auth_routes)
            .configure(payments::payments_routes),
    );
}
