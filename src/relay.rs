use tracing::debug;

use crate::model::alert::{InboundAlert, OutboundNotification};
use crate::model::global_error::RelayError;
use crate::util::ChatNotifier;

/// Decodes an alert, renders its report and forwards it to the chat endpoint.
pub async fn relay_alert(
    body: &[u8],
    recipients: &[String],
    notifier: &ChatNotifier,
) -> Result<(), RelayError> {
    let alert = InboundAlert::from_slice(body)?;
    debug!(alert_id = %alert.id, project = %alert.project, level = %alert.level, "decoded alert");

    let notification = OutboundNotification::new(recipients.to_vec(), alert.render_report());
    let payload = notification.to_json()?;

    notifier.send(payload).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::alert::DIVIDER;
    use httptest::matchers::*;
    use httptest::responders::*;
    use httptest::{Expectation, Server, all_of};
    use serde_json::json;
    use std::time::Duration;

    fn notifier_for(server: &Server) -> ChatNotifier {
        ChatNotifier::new(server.url_str("/notify"), "t0k3n".into(), Duration::from_secs(5)).unwrap()
    }

    #[actix_web::test]
    async fn forwards_rendered_report_to_recipients() {
        let server = Server::run();
        let text = format!(
            "{DIVIDER}\n\nProject: p\n\nID: 1\n\nLevel: error\n\nEnvironment: prod\n\n\
             Culprit: c\n\nMessage: m\n\nURL: http://e\n\n\
             {DIVIDER}Triggering Rules:\n\n- rule one\n\n"
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/notify"),
                request::body(json_decoded(eq(json!({
                    "recipients": ["a@x.com", "b@x.com"],
                    "sender": { "id": "sentry", "name": "Sentry" },
                    "text": text,
                })))),
            ])
            .respond_with(status_code(200)),
        );
        let body = json!({
            "id": "1", "url": "http://e", "level": "error", "culprit": "c",
            "message": "m", "project": "p", "triggering_rules": ["rule one"],
            "event": { "environment": "prod" }
        });
        let recipients = vec!["a@x.com".to_string(), "b@x.com".to_string()];

        let result = relay_alert(body.to_string().as_bytes(), &recipients, &notifier_for(&server)).await;

        assert!(result.is_ok(), "{result:?}");
    }

    #[actix_web::test]
    async fn malformed_alert_is_never_forwarded() {
        let server = Server::run();
        server.expect(Expectation::matching(any()).times(0).respond_with(status_code(200)));

        let result = relay_alert(b"[\"not\", \"an\", \"alert\"]", &[], &notifier_for(&server)).await;

        assert!(matches!(result, Err(RelayError::Decode(_))));
    }
}
