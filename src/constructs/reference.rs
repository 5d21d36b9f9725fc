use serde::{Deserialize, Serialize};

/// A deferred reference to another construct's logical id.
///
/// Refs are plain tokens at construction time; they are checked against the
/// project registry right before synthesis, never eagerly. On the wire a ref
/// serializes as `{"ref": "<logicalId>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ref {
    #[serde(rename = "ref")]
    logical_id: String,
}

impl Ref {
    pub fn to<S: Into<String>>(logical_id: S) -> Self {
        Self {
            logical_id: logical_id.into(),
        }
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }
}
