use actix_web::{HttpResponse, web};
use tracing::{info, warn};
use uuid::Uuid;

use crate::configuration::Settings;
use crate::model::event::GenericEvent;
use crate::model::global_error::{AppError, ErrorCode};
use crate::util::body::read_body;

#[utoipa::path(
    post,
    path = "/events",
    summary = "Log a generic event",
    request_body = GenericEvent,
    responses(
        (status = 200, description = "Event logged"),
        (status = 400, description = "Body unreadable or not a valid event"),
        (status = 405, description = "Method other than POST"),
    ),
    tag = "events",
)]
#[tracing::instrument(
    name = "Log event",
    skip(payload, settings),
    fields(request_id = %Uuid::new_v4())
)]
pub async fn log_event(
    payload: web::Payload,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, AppError> {
    let body = read_body(payload, settings.max_body_bytes)
        .await
        .map_err(|e| AppError::with_detail(ErrorCode::InvalidBody, e.to_string()))?;

    let event: GenericEvent = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "rejected event payload");
        AppError::with_detail(ErrorCode::MalformedEvent, e.to_string())
    })?;

    info!(event = %event.event, message = %event.data.message, "received webhook");

    Ok(HttpResponse::Ok().finish())
}
