use serde_json::{json, Value};

use crate::constructs::Ref;

/// Join entity binding one check to one alert channel.
///
/// Created lazily from [`Check::subscriptions`](crate::Check::subscriptions)
/// and owned by the project registry, not by the check itself. Both sides are
/// referenced by logical id and resolved at deployment time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertChannelSubscription {
    logical_id: String,
    pub check_id: Ref,
    pub alert_channel_id: Ref,
    pub activated: bool,
}

impl AlertChannelSubscription {
    pub fn new<S: Into<String>>(logical_id: S, check_id: Ref, alert_channel_id: Ref) -> Self {
        Self {
            logical_id: logical_id.into(),
            check_id,
            alert_channel_id,
            activated: true,
        }
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    pub fn synthesize(&self) -> Value {
        json!({
            "checkId": self.check_id,
            "alertChannelId": self.alert_channel_id,
            "activated": self.activated,
        })
    }
}
