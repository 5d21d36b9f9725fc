use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::constructs::{
    AlertChannel, Check, CheckGroup, CheckProps, CheckSpec, EnvironmentVariable, Ref,
};
use crate::project::Project;
use crate::session::{CheckDefaults, Session};

/// Declarative project manifest, the JSON analogue of a configuration file
/// checked into the monitored repository.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectManifest {
    project_name: String,
    logical_id: String,
    #[serde(default)]
    repo_url: Option<String>,
    #[serde(default)]
    check_defaults: CheckDefaults,
    #[serde(default)]
    alert_channels: Vec<AlertChannelEntry>,
    #[serde(default)]
    groups: Vec<GroupEntry>,
    #[serde(default)]
    checks: Vec<CheckEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlertChannelEntry {
    logical_id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    config: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupEntry {
    logical_id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckEntry {
    logical_id: String,
    #[serde(flatten)]
    spec: CheckSpec,
    #[serde(flatten)]
    props: ManifestCheckProps,
}

/// Check properties as they appear in the manifest. References are written
/// as plain logical ids and converted to [`Ref`]s when the construct graph
/// is built.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifestCheckProps {
    name: Option<String>,
    activated: Option<bool>,
    muted: Option<bool>,
    double_check: Option<bool>,
    should_fail: Option<bool>,
    runtime_id: Option<String>,
    locations: Option<Vec<String>>,
    private_locations: Option<Vec<String>>,
    tags: Option<Vec<String>>,
    frequency: Option<u32>,
    environment_variables: Option<Vec<EnvironmentVariable>>,
    group_id: Option<String>,
    alert_channels: Option<Vec<String>>,
}

impl ManifestCheckProps {
    fn into_props(self) -> CheckProps {
        CheckProps {
            name: self.name,
            activated: self.activated,
            muted: self.muted,
            double_check: self.double_check,
            should_fail: self.should_fail,
            runtime_id: self.runtime_id,
            locations: self.locations,
            private_locations: self.private_locations,
            tags: self.tags,
            frequency: self.frequency,
            environment_variables: self.environment_variables,
            group_id: self.group_id.map(Ref::to),
            alert_channels: self
                .alert_channels
                .map(|ids| ids.into_iter().map(Ref::to).collect()),
        }
    }
}

/// Read a project manifest and build the full construct graph from it.
pub fn load_project<P: AsRef<Path>>(path: P) -> Result<Project> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read project manifest {}", path.display()))?;
    let manifest: ProjectManifest = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid project manifest {}", path.display()))?;
    build_project(manifest, Some(path.display().to_string()))
}

fn build_project(manifest: ProjectManifest, source_file: Option<String>) -> Result<Project> {
    let session = Session::new(manifest.check_defaults, source_file);

    let mut project = Project::new(manifest.logical_id, manifest.project_name);
    project.repo_url = manifest.repo_url;

    for group in manifest.groups {
        project.add_group(CheckGroup::new(group.logical_id, group.name))?;
    }
    for channel in manifest.alert_channels {
        project.add_alert_channel(AlertChannel::new(
            channel.logical_id,
            channel.kind,
            channel.config,
        ))?;
    }
    for entry in manifest.checks {
        let check = Check::new(entry.logical_id, entry.props.into_props(), entry.spec, &session)?;
        project.add_check(check)?;
    }

    Ok(project)
}
