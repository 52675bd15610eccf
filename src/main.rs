mod config;
mod db;
mod errors;
mod middleware;
mod models;
mod repositories;
mod routes;
mod seed;
mod services;
mod utils;

use std::io;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::services::{Authenticator, SessionAuthenticator};
use crate::utils::jwt::JwtKeys;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    tracing::info!(env = %config.app_env, "🔌 Connecting to database...");
    let db = db::establish_connection(&config.database_url)
        .await
        .map_err(io::Error::other)?;
    tracing::info!("✅ Database connected!");

    if config.sync_schema {
        db::sync_schema(&db).await.map_err(io::Error::other)?;
    }
    if config.seed_db {
        seed::run(&db).await.map_err(io::Error::other)?;
    }

    let db = web::Data::new(db);
    let authenticator: Arc<dyn Authenticator> = Arc::new(SessionAuthenticator::new(
        db.clone().into_inner(),
        JwtKeys::from_secret(&config.jwt_secret),
        chrono::Duration::hours(config.token_ttl_hours),
    ));
    let authenticator = web::Data::from(authenticator);

    let (host, port) = config.bind_address();
    tracing::info!("🚀 Starting server on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(db.clone())
            .app_data(authenticator.clone())
            .configure(routes::configure_routes)
    })
        .bind((host, port))?
        .run()
        .await
}
