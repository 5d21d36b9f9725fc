use serde_json::{json, Value};

/// A notification target checks can subscribe to.
///
/// Only identity and an opaque channel configuration are modeled here; the
/// channel-type-specific surfaces (email, Slack, webhook, ...) live with the
/// remote API.
#[derive(Debug, Clone)]
pub struct AlertChannel {
    logical_id: String,
    pub kind: String,
    pub config: Value,
}

impl AlertChannel {
    pub fn new<S: Into<String>, K: Into<String>>(logical_id: S, kind: K, config: Value) -> Self {
        Self {
            logical_id: logical_id.into(),
            kind: kind.into(),
            config,
        }
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    pub fn synthesize(&self) -> Value {
        json!({
            "type": self.kind,
            "config": self.config,
        })
    }
}
