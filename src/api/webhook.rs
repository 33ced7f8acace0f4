use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::configuration::Settings;
use crate::model::alert::InboundAlert;
use crate::model::global_error::{AppError, ErrorCode};
use crate::relay::relay_alert;
use crate::util::ChatNotifier;
use crate::util::body::read_body;

pub const SUCCESS_BODY: &str = "Successfully processed webhook";

#[utoipa::path(
    post,
    path = "/webhook",
    summary = "Relay a Sentry alert to the chat endpoint",
    request_body = InboundAlert,
    responses(
        (status = 200, description = "Alert forwarded", body = String),
        (status = 400, description = "Request body could not be read"),
        (status = 405, description = "Method other than POST"),
        (status = 500, description = "Decode, encode or forwarding failed"),
    ),
    tag = "webhook",
)]
#[tracing::instrument(
    name = "Relay webhook",
    skip(payload, settings, notifier),
    fields(request_id = %Uuid::new_v4())
)]
pub async fn receive_webhook(
    payload: web::Payload,
    settings: web::Data<Settings>,
    notifier: web::Data<ChatNotifier>,
) -> Result<HttpResponse, AppError> {
    let body = read_body(payload, settings.max_body_bytes)
        .await
        .map_err(|e| {
            warn!(error = %e, "rejected webhook body");
            AppError::with_detail(ErrorCode::InvalidBody, e.to_string())
        })?;

    relay_alert(&body, &settings.recipients, notifier.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, kind = e.kind(), "failed to relay webhook");
            AppError::from(e)
        })?;

    info!("webhook relayed");
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(SUCCESS_BODY))
}

/// Fallback for every non-POST request on a POST-only resource.
pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, AppError> {
    warn!(method = %req.method(), path = %req.path(), "method not allowed");
    Err(AppError::new(ErrorCode::MethodNotAllowed))
}
