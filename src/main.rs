use std::net::TcpListener;

use dotenv::dotenv;
use sentry_relay::configuration::get_configuration;
use sentry_relay::startup::run;
use sentry_relay::telemetry::{get_subscriber, init_subscriber};
use sentry_relay::util::ChatNotifier;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let subscriber = get_subscriber(
        "sentry_relay".into(),
        "info".into(),
        std::io::stdout
    );
    init_subscriber(subscriber)?;

    let settings = get_configuration()?;
    let notifier = ChatNotifier::from_settings(&settings)?;

    let (host, port) = settings.address();
    let listener = TcpListener::bind((host.as_str(), port))?;
    info!("Server listening on {}:{}", host, port);

    run(listener, settings, notifier)?.await?;

    Ok(())
}
