use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::configuration::Settings;
use crate::api::health_check::HealthResponse;
use crate::model::alert::{AlertEvent, InboundAlert};
use crate::model::event::{EventData, GenericEvent};
use crate::util::ChatNotifier;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health_check::health_check,
        api::webhook::receive_webhook,
        api::event_log::log_event,
    ),
    components(schemas(InboundAlert, AlertEvent, GenericEvent, EventData, HealthResponse)),
    tags(
        (name = "webhook", description = "Sentry alert relay"),
        (name = "events", description = "Generic event log"),
    )
)]
pub struct ApiDoc;

/// Registers every route. Expects `Data<Settings>` and `Data<ChatNotifier>` on the app.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(api::health_check::health_check)
        .service(
            web::resource("/webhook")
                .route(web::post().to(api::receive_webhook))
                .default_service(web::to(api::method_not_allowed)),
        )
        .service(
            web::resource("/events")
                .route(web::post().to(api::log_event))
                .default_service(web::to(api::method_not_allowed)),
        )
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
}

pub fn run(
    listener: TcpListener,
    settings: Settings,
    notifier: ChatNotifier,
) -> Result<Server, std::io::Error> {
    let settings = Data::new(settings);
    let notifier = Data::new(notifier);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(settings.clone())
            .app_data(notifier.clone())
            .configure(routes)
    })
        .listen(listener)?
        .run();

    Ok(server)
}
