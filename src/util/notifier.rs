use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::{info, instrument};

use crate::configuration::Settings;
use crate::model::global_error::RelayError;

/// Posts rendered notifications to the chat endpoint.
///
/// The inner client is built once and reused, so connections are pooled across requests.
#[derive(Debug, Clone)]
pub struct ChatNotifier {
    client: Client,
    url: String,
    token: String,
}

impl ChatNotifier {
    pub fn new(url: String, token: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, url, token })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, reqwest::Error> {
        Self::new(
            settings.forward_url.clone(),
            settings.token.clone(),
            settings.forward_timeout,
        )
    }

    /// Sends an already encoded notification. Anything but `200 OK` is a failure; no retry.
    #[instrument(name = "Forward notification", skip(self, payload), fields(bytes = payload.len()))]
    pub async fn send(&self, payload: Vec<u8>) -> Result<(), RelayError> {
        let res = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(RelayError::Remote(status));
        }

        info!(status = status.as_u16(), "notification accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::matchers::*;
    use httptest::responders::*;
    use httptest::{Expectation, Server, all_of, cycle};
    use serde_json::json;

    fn notifier_for(server: &Server) -> ChatNotifier {
        ChatNotifier::new(
            server.url_str("/notify"),
            "secret".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[actix_web::test]
    async fn sends_bearer_token_and_json_content_type() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/notify"),
                request::headers(contains(("authorization", "Bearer secret"))),
                request::headers(contains(("content-type", "application/json"))),
                request::body(json_decoded(eq(json!({ "text": "hi" })))),
            ])
            .respond_with(status_code(200)),
        );

        let result = notifier_for(&server).send(br#"{"text":"hi"}"#.to_vec()).await;

        assert!(result.is_ok());
    }

    #[actix_web::test]
    async fn non_200_status_is_a_remote_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/notify"))
                .times(3)
                .respond_with(cycle![
                    status_code(201),
                    status_code(403),
                    status_code(500),
                ]),
        );
        let notifier = notifier_for(&server);

        for expected in [201, 403, 500] {
            match notifier.send(b"{}".to_vec()).await {
                Err(RelayError::Remote(status)) => assert_eq!(status.as_u16(), expected),
                other => panic!("expected remote error, got {other:?}"),
            }
        }
    }

    #[actix_web::test]
    async fn unreachable_destination_is_a_transport_error() {
        let closed_port = {
            let ephemeral = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            ephemeral.local_addr().unwrap().port()
        };
        let notifier = ChatNotifier::new(
            format!("http://127.0.0.1:{closed_port}/notify"),
            String::new(),
            Duration::from_secs(2),
        )
        .unwrap();

        let result = notifier.send(b"{}".to_vec()).await;

        assert!(matches!(result, Err(RelayError::Transport(_))));
    }
}
