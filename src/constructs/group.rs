use serde_json::{json, Value};

/// A named group checks can be attached to via `groupId`.
#[derive(Debug, Clone)]
pub struct CheckGroup {
    logical_id: String,
    pub name: String,
}

impl CheckGroup {
    pub fn new<S: Into<String>, N: Into<String>>(logical_id: S, name: N) -> Self {
        Self {
            logical_id: logical_id.into(),
            name: name.into(),
        }
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    pub fn synthesize(&self) -> Value {
        json!({ "name": self.name })
    }
}
