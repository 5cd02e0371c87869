use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Surface tag sent with every relayed message from this client.
pub const CLI_SURFACE: &str = "cli";

/// Placeholder shown when the gateway answers without a `response` field.
pub const NO_RESPONSE_TEXT: &str = "No response received.";

#[derive(Serialize, Debug, Clone)]
pub struct GatewayMessageRequest {
    pub session_id: String,
    pub message: String,
    pub surface: String,
}

#[derive(Debug, Clone, Default)]
pub struct GatewayMessageResponse {
    pub response: Option<String>,
}

impl GatewayMessageResponse {
    pub fn from_value(value: &Value) -> Self {
        let response = value
            .get("response")
            .and_then(|v| v.as_str())
            .map(str::to_owned);
        Self { response }
    }

    pub fn text(&self) -> &str {
        self.response.as_deref().unwrap_or(NO_RESPONSE_TEXT)
    }
}

/// A location descriptor whose ZIP resolution is left to the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LocationTarget {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct JourneyCreateRequest {
    pub campaign_type: String,
    pub name: String,
    pub user_id: Option<String>,
    pub created_from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<LocationTarget>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_codes: Option<Vec<String>>,
}

/// Subset of the journey creation response that the CLI summarizes.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct JourneyCreateResponse {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub journey_id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Value>,
    #[serde(default)]
    pub edges: Vec<Value>,
}

impl JourneyCreateResponse {
    /// Journey identifier as text; backends report it as a string or a number.
    pub fn display_id(&self) -> Option<String> {
        self.journey_id
            .as_ref()
            .or(self.id.as_ref())
            .and_then(|value| match value {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_response_falls_back_to_placeholder() {
        let missing = GatewayMessageResponse::from_value(&json!({"session_id": "abc"}));
        assert_eq!(missing.text(), NO_RESPONSE_TEXT);

        let non_string = GatewayMessageResponse::from_value(&json!({"response": 42}));
        assert_eq!(non_string.text(), NO_RESPONSE_TEXT);

        let present = GatewayMessageResponse::from_value(&json!({"response": "Hello"}));
        assert_eq!(present.text(), "Hello");
    }

    #[test]
    fn journey_request_omits_absent_location_fields() {
        let request = JourneyCreateRequest {
            campaign_type: "turning_65".to_string(),
            name: "Ohio Turning 65 Journey".to_string(),
            user_id: None,
            created_from: "cli".to_string(),
            locations: Some(vec![LocationTarget {
                kind: "state".to_string(),
                value: "OH".to_string(),
            }]),
            zip_codes: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "campaign_type": "turning_65",
                "name": "Ohio Turning 65 Journey",
                "user_id": null,
                "created_from": "cli",
                "locations": [{"type": "state", "value": "OH"}]
            })
        );
    }

    #[test]
    fn journey_response_prefers_journey_id() {
        let response: JourneyCreateResponse = serde_json::from_value(json!({
            "id": "row-1",
            "journey_id": "j-42",
            "nodes": [{}, {}],
        }))
        .unwrap();
        assert_eq!(response.display_id().as_deref(), Some("j-42"));
        assert_eq!(response.nodes.len(), 2);
        assert!(response.edges.is_empty());

        let numeric: JourneyCreateResponse = serde_json::from_value(json!({"id": 7})).unwrap();
        assert_eq!(numeric.display_id().as_deref(), Some("7"));
    }
}
