use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const SERVICE_NAME: &str = "VaRest Receiver";

/// A JSON object posted by a client. Any set of top-level keys is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InboundMessage(pub Map<String, Value>);

impl InboundMessage {
    /// The client's own identifier: `id`, falling back to `message_id`.
    pub fn id(&self) -> Option<&Value> {
        ["id", "message_id"]
            .iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| !value.is_null())
    }

    pub fn kind(&self) -> &str {
        self.0
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
    }

    pub fn field_names(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }
}

#[derive(Debug, Serialize)]
pub struct Acknowledgment {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub status: &'static str,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<Value>,
    pub data: AckData,
}

#[derive(Debug, Serialize)]
pub struct AckData {
    pub processed_type: String,
    pub received_fields: Vec<String>,
}

impl Acknowledgment {
    pub fn received(message: &InboundMessage) -> Self {
        Self {
            kind: "acknowledgment",
            status: "received",
            timestamp: now_rfc3339(),
            message_id: message.id().cloned(),
            data: AckData {
                processed_type: message.kind().to_string(),
                received_fields: message.field_names(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ApiInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

impl ApiInfo {
    pub fn current() -> Self {
        Self {
            name: SERVICE_NAME,
            version: env!("CARGO_PKG_VERSION"),
            endpoints: BTreeMap::from([
                ("POST /message", "Main message receiver"),
                ("POST /data", "Alternative data receiver"),
                ("GET /health", "Health check"),
                ("GET /", "API info"),
            ]),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
