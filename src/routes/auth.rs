use actix_web::{get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::errors::Result;
use crate::middleware::AuthUser;
use crate::models::dto::ApiResponse;
use crate::services::validation::Payload;
use crate::services::{AuthService, Authenticator};

/// POST /api/register - create an account (public)
#[post("/register")]
pub async fn register(
    body: web::Json<Payload>,
    db: web::Data<DatabaseConnection>,
    authenticator: web::Data<dyn Authenticator>,
) -> Result<HttpResponse> {
    let auth = AuthService::register(db.get_ref(), authenticator.get_ref(), &body).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message("User registered successfully", auth)))
}

/// POST /api/login - exchange credentials for a bearer token (public)
#[post("/login")]
pub async fn login(
    body: web::Json<Payload>,
    db: web::Data<DatabaseConnection>,
    authenticator: web::Data<dyn Authenticator>,
) -> Result<HttpResponse> {
    let auth = AuthService::login(db.get_ref(), authenticator.get_ref(), &body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message("Login successful", auth)))
}

/// POST /api/logout - revoke the presented token (protected)
#[post("/logout")]
pub async fn logout(
    auth_user: AuthUser,
    authenticator: web::Data<dyn Authenticator>,
) -> Result<HttpResponse> {
    AuthService::logout(authenticator.get_ref(), &auth_user).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Logged out successfully")))
}

/// GET /api/user - the current user, unwrapped (protected)
#[get("/user")]
pub async fn current_user(
    auth_user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse> {
    let user = AuthService::current_user(db.get_ref(), &auth_user).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(login)
        .service(logout)
        .service(current_user);
}
