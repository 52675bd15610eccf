use actix_web::{get, HttpResponse};
use chrono::{SecondsFormat, Utc};

use crate::models::dto::PingResponse;

#[get("/ping")]
pub async fn ping() -> HttpResponse {
    let now = Utc::now();
    HttpResponse::Ok().json(PingResponse {
        success: true,
        message: "pong",
        timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, false),
        server_time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_ping() {
        let app = test::init_service(App::new().service(ping)).await;

        let req = test::TestRequest::get().uri("/ping").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "pong");
        assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
        assert!(
            chrono::NaiveDateTime::parse_from_str(body["server_time"].as_str().unwrap(), "%Y-%m-%d %H:%M:%S")
                .is_ok()
        );
    }
}
