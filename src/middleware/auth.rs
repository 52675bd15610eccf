use actix_web::{
    body::MessageBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    http::header,
    middleware::Next,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::{ready, LocalBoxFuture};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::services::authenticator::Authenticator;

/// The authenticated caller, extracted on every protected route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i32,
    /// Session the bearer token belongs to.
    pub session_id: String,
}

/// Pulls the token out of `Authorization: Bearer <token>`.
fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn authenticate(req: &HttpRequest) -> LocalBoxFuture<'static, Result<AuthUser, AppError>> {
    let authenticator = req.app_data::<web::Data<dyn Authenticator>>().cloned();
    let token = bearer_token(req);

    Box::pin(async move {
        let Some(authenticator) = authenticator else {
            return Err(AppError::Internal("authenticator is not configured".to_string()));
        };
        let token = token.ok_or(AppError::Unauthenticated)?;

        authenticator.resolve(&token).await
    })
}

/// Scope guard: resolves the caller before the handler extracts anything,
/// so a bad token answers 401 whatever the body looks like. The resolved
/// [`AuthUser`] is left in the request extensions for the handler.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let auth_user = authenticate(req.request()).await?;
    req.extensions_mut().insert(auth_user);
    next.call(req).await
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let resolved = req.extensions().get::<AuthUser>().cloned();
        match resolved {
            Some(auth_user) => Box::pin(ready(Ok(auth_user))),
            None => authenticate(req),
        }
    }
}
