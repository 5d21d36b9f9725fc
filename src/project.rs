use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::constructs::{
    AlertChannel, AlertChannelSubscription, Check, CheckGroup, ConstructError,
};

/// The deployment unit: every construct of one project, keyed by logical id.
///
/// The registry owns all constructs, including the subscriptions derived from
/// checks. Logical ids must be unique per construct kind; registering a
/// duplicate check, group or alert channel is an error, while subscriptions
/// upsert by id so re-adding a check's subscriptions replaces instead of
/// duplicating.
#[derive(Debug)]
pub struct Project {
    pub logical_id: String,
    pub name: String,
    pub repo_url: Option<String>,
    checks: BTreeMap<String, Check>,
    groups: BTreeMap<String, CheckGroup>,
    alert_channels: BTreeMap<String, AlertChannel>,
    subscriptions: BTreeMap<String, AlertChannelSubscription>,
}

impl Project {
    pub fn new<S: Into<String>, N: Into<String>>(logical_id: S, name: N) -> Self {
        Self {
            logical_id: logical_id.into(),
            name: name.into(),
            repo_url: None,
            checks: BTreeMap::new(),
            groups: BTreeMap::new(),
            alert_channels: BTreeMap::new(),
            subscriptions: BTreeMap::new(),
        }
    }

    pub fn add_check(&mut self, check: Check) -> Result<(), ConstructError> {
        if self.checks.contains_key(check.logical_id()) {
            return Err(ConstructError::DuplicateLogicalId(
                check.logical_id().to_string(),
            ));
        }
        for subscription in check.subscriptions() {
            self.subscriptions
                .insert(subscription.logical_id().to_string(), subscription);
        }
        self.checks.insert(check.logical_id().to_string(), check);
        Ok(())
    }

    pub fn add_group(&mut self, group: CheckGroup) -> Result<(), ConstructError> {
        if self.groups.contains_key(group.logical_id()) {
            return Err(ConstructError::DuplicateLogicalId(
                group.logical_id().to_string(),
            ));
        }
        self.groups.insert(group.logical_id().to_string(), group);
        Ok(())
    }

    pub fn add_alert_channel(&mut self, channel: AlertChannel) -> Result<(), ConstructError> {
        if self.alert_channels.contains_key(channel.logical_id()) {
            return Err(ConstructError::DuplicateLogicalId(
                channel.logical_id().to_string(),
            ));
        }
        self.alert_channels
            .insert(channel.logical_id().to_string(), channel);
        Ok(())
    }

    pub fn checks(&self) -> impl Iterator<Item = &Check> {
        self.checks.values()
    }

    pub fn subscriptions(&self) -> impl Iterator<Item = &AlertChannelSubscription> {
        self.subscriptions.values()
    }

    /// Count the registered constructs per kind.
    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            check_count: self.checks.len(),
            group_count: self.groups.len(),
            alert_channel_count: self.alert_channels.len(),
            subscription_count: self.subscriptions.len(),
        }
    }

    /// Check every deferred reference against the registry.
    ///
    /// Refs stay unresolved until right before synthesis; this is the
    /// resolution pass.
    fn resolve_refs(&self) -> Result<(), ConstructError> {
        for check in self.checks.values() {
            if let Some(group_ref) = &check.group_id {
                if !self.groups.contains_key(group_ref.logical_id()) {
                    return Err(ConstructError::UnresolvedRef {
                        source_id: check.logical_id().to_string(),
                        target: group_ref.logical_id().to_string(),
                    });
                }
            }
        }
        for subscription in self.subscriptions.values() {
            if !self.checks.contains_key(subscription.check_id.logical_id()) {
                return Err(ConstructError::UnresolvedRef {
                    source_id: subscription.logical_id().to_string(),
                    target: subscription.check_id.logical_id().to_string(),
                });
            }
            if !self
                .alert_channels
                .contains_key(subscription.alert_channel_id.logical_id())
            {
                return Err(ConstructError::UnresolvedRef {
                    source_id: subscription.logical_id().to_string(),
                    target: subscription.alert_channel_id.logical_id().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Synthesize the full construct graph into the ordered deploy payload.
    ///
    /// Runs the ref-resolution pass first, then emits one wire object per
    /// construct tagged with its kind and logical id. Groups and alert
    /// channels come before the checks that reference them; subscriptions
    /// come last.
    pub fn synthesize(&self) -> Result<Vec<Value>, ConstructError> {
        self.resolve_refs()?;

        let mut resources = Vec::new();
        for (id, group) in &self.groups {
            resources.push(tag_resource("check-group", id, group.synthesize()));
        }
        for (id, channel) in &self.alert_channels {
            resources.push(tag_resource("alert-channel", id, channel.synthesize()));
        }
        for (id, check) in &self.checks {
            resources.push(tag_resource("check", id, check.synthesize()));
        }
        for (id, subscription) in &self.subscriptions {
            resources.push(tag_resource(
                "check-alert-channel-subscription",
                id,
                subscription.synthesize(),
            ));
        }
        Ok(resources)
    }
}

// Identity has to survive onto the wire: the server-side diff matches
// resources by logical id, and refs name logical ids.
fn tag_resource(kind: &str, logical_id: &str, mut payload: Value) -> Value {
    if let Some(object) = payload.as_object_mut() {
        object.insert("type".to_string(), json!(kind));
        object.insert("logicalId".to_string(), json!(logical_id));
    }
    payload
}

/// Construct counts for one project, mostly for logging.
pub struct ProjectSummary {
    pub check_count: usize,
    pub group_count: usize,
    pub alert_channel_count: usize,
    pub subscription_count: usize,
}

impl ProjectSummary {
    pub fn total_constructs(&self) -> usize {
        self.check_count + self.group_count + self.alert_channel_count + self.subscription_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructs::{ApiRequest, CheckProps, CheckSpec, Ref};
    use crate::session::Session;

    fn check(logical_id: &str, props: CheckProps) -> Check {
        let props = CheckProps {
            name: Some(format!("{logical_id} check")),
            ..props
        };
        let spec = CheckSpec::Api {
            request: ApiRequest {
                method: "GET".to_string(),
                url: "https://example.com".to_string(),
            },
        };
        Check::new(logical_id, props, spec, &Session::default()).unwrap()
    }

    #[test]
    fn test_duplicate_logical_id_rejected() {
        let mut project = Project::new("proj", "Project");
        project.add_check(check("api", CheckProps::default())).unwrap();
        let err = project
            .add_check(check("api", CheckProps::default()))
            .unwrap_err();

        assert!(matches!(err, ConstructError::DuplicateLogicalId(id) if id == "api"));
    }

    #[test]
    fn test_subscription_registration_is_idempotent() {
        let mut project = Project::new("proj", "Project");
        project
            .add_alert_channel(AlertChannel::new("email-ops", "EMAIL", json!({})))
            .unwrap();

        let subscribed = check(
            "subscribed",
            CheckProps {
                alert_channels: Some(vec![Ref::to("email-ops")]),
                ..Default::default()
            },
        );
        // Re-registering the same pair must replace, not duplicate.
        for subscription in subscribed.subscriptions() {
            project
                .subscriptions
                .insert(subscription.logical_id().to_string(), subscription);
        }
        project.add_check(subscribed).unwrap();

        assert_eq!(project.summary().subscription_count, 1);
    }

    #[test]
    fn test_unresolved_group_ref_fails_synthesis() {
        let mut project = Project::new("proj", "Project");
        project
            .add_check(check(
                "grouped",
                CheckProps {
                    group_id: Some(Ref::to("missing-group")),
                    ..Default::default()
                },
            ))
            .unwrap();

        let err = project.synthesize().unwrap_err();
        assert!(matches!(
            err,
            ConstructError::UnresolvedRef { target, .. } if target == "missing-group"
        ));
    }

    #[test]
    fn test_unresolved_alert_channel_ref_fails_synthesis() {
        let mut project = Project::new("proj", "Project");
        project
            .add_check(check(
                "subscribed",
                CheckProps {
                    alert_channels: Some(vec![Ref::to("missing-channel")]),
                    ..Default::default()
                },
            ))
            .unwrap();

        let err = project.synthesize().unwrap_err();
        assert!(matches!(
            err,
            ConstructError::UnresolvedRef { target, .. } if target == "missing-channel"
        ));
    }

    #[test]
    fn test_synthesize_tags_and_orders_resources() {
        let mut project = Project::new("proj", "Project");
        project
            .add_group(CheckGroup::new("critical", "Critical"))
            .unwrap();
        project
            .add_alert_channel(AlertChannel::new("email-ops", "EMAIL", json!({})))
            .unwrap();
        project
            .add_check(check(
                "grouped",
                CheckProps {
                    group_id: Some(Ref::to("critical")),
                    alert_channels: Some(vec![Ref::to("email-ops")]),
                    ..Default::default()
                },
            ))
            .unwrap();

        let resources = project.synthesize().unwrap();
        assert_eq!(resources.len(), 4);
        assert_eq!(resources[0]["type"], "check-group");
        assert_eq!(resources[1]["type"], "alert-channel");
        assert_eq!(resources[2]["type"], "check");
        assert_eq!(resources[2]["logicalId"], "grouped");
        assert_eq!(resources[2]["name"], "grouped check");
        assert_eq!(resources[3]["type"], "check-alert-channel-subscription");
        assert_eq!(
            resources[3]["logicalId"],
            "check-alert-channel-subscription#grouped#email-ops"
        );
    }

    #[test]
    fn test_summary_counts() {
        let mut project = Project::new("proj", "Project");
        project
            .add_group(CheckGroup::new("critical", "Critical"))
            .unwrap();
        project.add_check(check("api", CheckProps::default())).unwrap();

        let summary = project.summary();
        assert_eq!(summary.check_count, 1);
        assert_eq!(summary.group_count, 1);
        assert_eq!(summary.alert_channel_count, 0);
        assert_eq!(summary.subscription_count, 0);
        assert_eq!(summary.total_constructs(), 2);
    }
}
