use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::model::global_error::RelayError;

/// Frames the rendered report above and below.
pub const DIVIDER: &str = "===========================================================";

const SENDER_ID: &str = "sentry";
const SENDER_NAME: &str = "Sentry";

/// Alert webhook body as posted by Sentry.
///
/// Missing or `null` fields decode to their empty value, unknown fields are ignored.
/// Keys are also accepted capitalised or upper-cased; a key given twice under two
/// spellings is a decode error.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct InboundAlert {
    #[serde(alias = "ID", alias = "Id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(alias = "URL", alias = "Url", default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(alias = "Level", alias = "LEVEL", default, deserialize_with = "null_as_default")]
    pub level: String,
    #[serde(alias = "Logger", alias = "LOGGER", default)]
    pub logger: Option<String>,
    #[serde(alias = "Culprit", alias = "CULPRIT", default, deserialize_with = "null_as_default")]
    pub culprit: String,
    #[serde(alias = "Message", alias = "MESSAGE", default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(alias = "Project", alias = "PROJECT", default, deserialize_with = "null_as_default")]
    pub project: String,
    #[serde(alias = "Project_name", alias = "PROJECT_NAME", default, deserialize_with = "null_as_default")]
    pub project_name: String,
    #[serde(alias = "Project_slug", alias = "PROJECT_SLUG", default, deserialize_with = "null_as_default")]
    pub project_slug: String,
    #[serde(alias = "Triggering_rules", alias = "TRIGGERING_RULES", default, deserialize_with = "null_as_default")]
    pub triggering_rules: Vec<String>,
    #[serde(alias = "Event", alias = "EVENT", default, deserialize_with = "null_as_default")]
    pub event: AlertEvent,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AlertEvent {
    #[serde(alias = "Environment", alias = "ENVIRONMENT", default, deserialize_with = "null_as_default")]
    pub environment: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl InboundAlert {
    pub fn from_slice(body: &[u8]) -> Result<Self, RelayError> {
        serde_json::from_slice(body).map_err(RelayError::Decode)
    }

    pub fn render_report(&self) -> String {
        let mut report = format!(
            "{DIVIDER}\n\n\
             Project: {}\n\n\
             ID: {}\n\n\
             Level: {}\n\n\
             Environment: {}\n\n\
             Culprit: {}\n\n\
             Message: {}\n\n\
             URL: {}\n\n\
             {DIVIDER}",
            self.project,
            self.id,
            self.level,
            self.event.environment,
            self.culprit,
            self.message,
            self.url,
        );

        if !self.triggering_rules.is_empty() {
            report.push_str("Triggering Rules:\n\n");
            for rule in &self.triggering_rules {
                report.push_str("- ");
                report.push_str(rule);
                report.push_str("\n\n");
            }
        }

        report
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Sender {
    pub id: String,
    pub name: String,
}

/// Message body accepted by the chat notification endpoint.
#[derive(Debug, Serialize)]
pub struct OutboundNotification {
    pub recipients: Vec<String>,
    pub sender: Sender,
    pub text: String,
}

impl OutboundNotification {
    pub fn new(recipients: Vec<String>, text: String) -> Self {
        Self {
            recipients,
            sender: Sender {
                id: SENDER_ID.to_string(),
                name: SENDER_NAME.to_string(),
            },
            text,
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, RelayError> {
        serde_json::to_vec(self).map_err(RelayError::Encode)
    }
}

/// Splits a comma-separated recipient list as-is: entries are neither trimmed nor filtered.
pub fn split_recipients(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}
