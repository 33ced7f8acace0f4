use actix_web::{get, web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::configuration::Settings;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Number of configured recipients, including empty entries.
    pub recipients: usize,
    pub token_configured: bool,
}

#[utoipa::path(
    get,
    path = "/health-check",
    responses(
        (status = 200, description = "Relay is up", body = HealthResponse)
    ),
    tag = "health check",
)]
#[get("/health-check")]
pub async fn health_check(settings: web::Data<Settings>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        recipients: settings.recipients.len(),
        token_configured: !settings.token.is_empty(),
    })
}

#[cfg(test)]
mod tests {
    use super::health_check;
    use crate::configuration::Settings;
    use actix_web::web::Data;
    use actix_web::{App, test};
    use serde_json::json;

    #[actix_web::test]
    async fn reports_relay_configuration() {
        let settings = Settings::from_lookup(|key| match key {
            "URL" => Some("http://chat.local/api".to_string()),
            "RECIPIENTS" => Some("a@x.com,b@x.com".to_string()),
            _ => None,
        })
        .unwrap();
        let app = test::init_service(
            App::new().app_data(Data::new(settings)).service(health_check),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health-check").to_request()).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["recipients"], json!(2));
        assert_eq!(body["token_configured"], json!(false));
    }
}
