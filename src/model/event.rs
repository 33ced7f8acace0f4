use serde::Deserialize;
use utoipa::ToSchema;

/// Generic event body accepted by the event log endpoint.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GenericEvent {
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub data: EventData,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EventData {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::GenericEvent;

    #[test]
    fn missing_fields_decode_empty() {
        let event: GenericEvent = serde_json::from_str(r#"{"event":"deploy"}"#).unwrap();
        assert_eq!(event.event, "deploy");
        assert_eq!(event.data.message, "");
    }

    #[test]
    fn nested_message_is_read() {
        let event: GenericEvent =
            serde_json::from_str(r#"{"event":"deploy","data":{"message":"v1.2"}}"#).unwrap();
        assert_eq!(event.data.message, "v1.2");
    }
}
