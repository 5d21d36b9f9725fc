use serde::Deserialize;

use crate::constructs::{CheckProps, EnvironmentVariable};

/// Per-invocation context handed to every construct constructor.
///
/// Carries the default configuration from the project manifest and the path
/// of the file the checks were defined in. Read-only from the construct's
/// perspective; a fresh session is built for each deployment run.
#[derive(Debug, Default, Clone)]
pub struct Session {
    pub check_defaults: CheckDefaults,
    pub check_file_path: Option<String>,
}

impl Session {
    pub fn new(check_defaults: CheckDefaults, check_file_path: Option<String>) -> Self {
        Self {
            check_defaults,
            check_file_path,
        }
    }
}

/// Default values applied to any check property the user left unset.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckDefaults {
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
}

impl CheckDefaults {
    /// Fill in every property the caller left absent.
    ///
    /// Presence is what counts: an explicit `Some(false)` or `Some(0)` stays
    /// as given, only `None` takes the default. Properties with no default
    /// pass through untouched.
    pub fn merge_into(&self, props: &mut CheckProps) {
        props.activated = props.activated.or(self.activated);
        props.muted = props.muted.or(self.muted);
        props.double_check = props.double_check.or(self.double_check);
        props.should_fail = props.should_fail.or(self.should_fail);
        props.frequency = props.frequency.or(self.frequency);
        props.runtime_id = props.runtime_id.take().or_else(|| self.runtime_id.clone());
        props.locations = props.locations.take().or_else(|| self.locations.clone());
        props.private_locations = props
            .private_locations
            .take()
            .or_else(|| self.private_locations.clone());
        props.tags = props.tags.take().or_else(|| self.tags.clone());
        props.environment_variables = props
            .environment_variables
            .take()
            .or_else(|| self.environment_variables.clone());
    }
}
