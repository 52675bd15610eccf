use actix_web::{middleware::from_fn, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::errors::Result;
use crate::middleware::{require_auth, AuthUser};
use crate::models::dto::ApiResponse;
use crate::services::payment_service::parse_payment_id;
use crate::services::PaymentService;
use crate::services::validation::Payload;

/// GET /api/payments
pub async fn list_payments(
    _auth_user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse> {
    let payments = PaymentService::list(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(payments)))
}

/// POST /api/payments
pub async fn create_payment(
    _auth_user: AuthUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<Payload>,
) -> Result<HttpResponse> {
    let payment = PaymentService::create(db.get_ref(), &body).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message("Payment created successfully", payment)))
}

/// GET /api/payments/{id}
pub async fn show_payment(
    _auth_user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_payment_id(&path)?;
    let payment = PaymentService::show(db.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(payment)))
}

/// PUT and PATCH /api/payments/{id}
pub async fn update_payment(
    _auth_user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
    body: web::Json<Payload>,
) -> Result<HttpResponse> {
    let id = parse_payment_id(&path)?;
    let payment = PaymentService::update(db.get_ref(), id, &body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message("Payment updated successfully", payment)))
}

/// DELETE /api/payments/{id}
pub async fn delete_payment(
    _auth_user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_payment_id(&path)?;
    PaymentService::delete(db.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Payment deleted successfully")))
}

pub fn payments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payments")
            .wrap(from_fn(require_auth))
            .route("", web::get().to(list_payments))
            .route("", web::post().to(create_payment))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(show_payment))
                    .route(web::put().to(update_payment))
                    .route(web::patch().to(update_payment))
                    .route(web::delete().to(delete_payment)),
            ),
    );
}
