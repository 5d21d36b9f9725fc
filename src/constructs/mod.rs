pub mod alert_channel;
pub mod check;
pub mod group;
pub mod reference;
pub mod subscription;

pub use alert_channel::AlertChannel;
pub use check::{ApiRequest, Check, CheckProps, CheckSpec, EnvironmentVariable};
pub use group::CheckGroup;
pub use reference::Ref;
pub use subscription::AlertChannelSubscription;

use thiserror::Error;

/// Errors raised while building or synthesizing the construct graph.
#[derive(Debug, Error)]
pub enum ConstructError {
    #[error("logical id must not be empty")]
    EmptyLogicalId,

    #[error("required field `{field}` is missing on {kind} `{logical_id}` after applying defaults")]
    MissingRequiredField {
        kind: &'static str,
        logical_id: String,
        field: &'static str,
    },

    #[error("duplicate logical id `{0}`")]
    DuplicateLogicalId(String),

    #[error("`{source_id}` references `{target}`, which is not part of the project")]
    UnresolvedRef { source_id: String, target: String },
}
