use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::constructs::{AlertChannelSubscription, ConstructError, Ref};
use crate::session::Session;

/// A single environment variable binding made available to a check at run time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentVariable {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

/// Request definition executed by an API check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    #[serde(default = "default_method")]
    pub method: String,
    pub url: String,
}

fn default_method() -> String {
    "GET".to_string()
}

/// The closed set of check variants, tagged by check type on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "checkType")]
pub enum CheckSpec {
    #[serde(rename = "API")]
    Api { request: ApiRequest },
    #[serde(rename = "BROWSER")]
    Browser { script: String },
}

/// Configuration surface for a check. Only `name` is required, and it may be
/// supplied by the session defaults instead of the caller.
#[derive(Debug, Default, Clone)]
pub struct CheckProps {
    pub name: Option<String>,
    pub activated: Option<bool>,
    pub muted: Option<bool>,
    pub double_check: Option<bool>,
    pub should_fail: Option<bool>,
    pub runtime_id: Option<String>,
    pub locations: Option<Vec<String>>,
    pub private_locations: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub frequency: Option<u32>,
    pub environment_variables: Option<Vec<EnvironmentVariable>>,
    pub group_id: Option<Ref>,
    pub alert_channels: Option<Vec<Ref>>,
}

/// A declarative description of one remote monitoring check.
///
/// Common fields live on the struct itself; type-specific configuration lives
/// in the [`CheckSpec`] variant. Instances do not mutate after construction.
#[derive(Debug, Clone)]
pub struct Check {
    logical_id: String,
    pub name: String,
    pub activated: Option<bool>,
    pub muted: Option<bool>,
    pub double_check: Option<bool>,
    pub should_fail: Option<bool>,
    pub runtime_id: Option<String>,
    pub locations: Option<Vec<String>>,
    pub private_locations: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub frequency: Option<u32>,
    pub environment_variables: Vec<EnvironmentVariable>,
    pub group_id: Option<Ref>,
    pub alert_channels: Vec<Ref>,
    pub spec: CheckSpec,
    source_file: Option<String>,
}

impl Check {
    /// Build a check from user-supplied props, filling unset properties from
    /// the session defaults.
    ///
    /// Fails with [`ConstructError::MissingRequiredField`] if `name` is still
    /// absent after the defaults were applied.
    pub fn new<S: Into<String>>(
        logical_id: S,
        mut props: CheckProps,
        spec: CheckSpec,
        session: &Session,
    ) -> Result<Self, ConstructError> {
        let logical_id = logical_id.into();
        if logical_id.is_empty() {
            return Err(ConstructError::EmptyLogicalId);
        }

        session.check_defaults.merge_into(&mut props);

        let name = props
            .name
            .ok_or_else(|| ConstructError::MissingRequiredField {
                kind: "check",
                logical_id: logical_id.clone(),
                field: "name",
            })?;

        Ok(Self {
            logical_id,
            name,
            activated: props.activated,
            muted: props.muted,
            double_check: props.double_check,
            should_fail: props.should_fail,
            runtime_id: props.runtime_id,
            locations: props.locations,
            private_locations: props.private_locations,
            tags: props.tags,
            frequency: props.frequency,
            environment_variables: props.environment_variables.unwrap_or_default(),
            group_id: props.group_id,
            // Subscriptions are materialized separately; see `subscriptions`.
            alert_channels: props.alert_channels.unwrap_or_default(),
            spec,
            source_file: session.check_file_path.clone(),
        })
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// Derive one subscription per associated alert channel.
    ///
    /// The composite logical id is deterministic, so registering the result
    /// twice replaces rather than duplicates (the registry upserts by id).
    pub fn subscriptions(&self) -> Vec<AlertChannelSubscription> {
        self.alert_channels
            .iter()
            .map(|channel| {
                AlertChannelSubscription::new(
                    format!(
                        "check-alert-channel-subscription#{}#{}",
                        self.logical_id,
                        channel.logical_id()
                    ),
                    Ref::to(self.logical_id.clone()),
                    channel.clone(),
                )
            })
            .collect()
    }

    /// Produce the plain wire representation of this check.
    ///
    /// Pure: reads current field values only. Unset optional properties are
    /// omitted; `environmentVariables` is always present, possibly empty.
    pub fn synthesize(&self) -> Value {
        let mut out = Map::new();
        out.insert("name".to_string(), json!(self.name));
        if let Some(v) = self.activated {
            out.insert("activated".to_string(), json!(v));
        }
        if let Some(v) = self.muted {
            out.insert("muted".to_string(), json!(v));
        }
        if let Some(v) = self.double_check {
            out.insert("doubleCheck".to_string(), json!(v));
        }
        if let Some(v) = self.should_fail {
            out.insert("shouldFail".to_string(), json!(v));
        }
        if let Some(v) = &self.runtime_id {
            out.insert("runtimeId".to_string(), json!(v));
        }
        if let Some(v) = &self.locations {
            out.insert("locations".to_string(), json!(v));
        }
        if let Some(v) = &self.private_locations {
            out.insert("privateLocations".to_string(), json!(v));
        }
        if let Some(v) = &self.tags {
            out.insert("tags".to_string(), json!(v));
        }
        if let Some(v) = self.frequency {
            out.insert("frequency".to_string(), json!(v));
        }
        if let Some(v) = &self.group_id {
            out.insert("groupId".to_string(), json!(v));
        }
        out.insert(
            "environmentVariables".to_string(),
            json!(self.environment_variables),
        );
        match &self.spec {
            CheckSpec::Api { request } => {
                out.insert("checkType".to_string(), json!("API"));
                out.insert("request".to_string(), json!(request));
            }
            CheckSpec::Browser { script } => {
                out.insert("checkType".to_string(), json!("BROWSER"));
                out.insert("script".to_string(), json!(script));
            }
        }
        if let Some(path) = &self.source_file {
            // Duplicated on purpose: the CLI filters on `__checkFilePath`,
            // the backend stores `sourceFile`.
            out.insert("__checkFilePath".to_string(), json!(path));
            out.insert("sourceFile".to_string(), json!(path));
        }
        Value::Object(out)
    }
}
