//! Identity and context handed to the sidebar.

use serde::{Deserialize, Serialize};

/// The logged-in user as known by the session layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(default, rename = "orgName")]
    pub org_name: String,
}

/// Profile fields returned by the `user` GraphQL query.
///
/// The API may omit any field; missing values render as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl UserProfile {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    pub fn picture(&self) -> &str {
        self.picture.as_deref().unwrap_or_default()
    }
}

/// `data` payload of the user info query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfoResponse {
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// Remotely configured feature toggles consumed by the sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Shows the announcements widget.
    #[serde(default)]
    pub announcekit: bool,
}

/// Cluster selection shared with the rest of the console.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterContext {
    pub selected_cluster_name: String,
    /// Clusters the user can switch between; always contains the selection.
    #[serde(default)]
    pub available_clusters: Vec<String>,
}

impl ClusterContext {
    pub fn new(selected: impl Into<String>, available: Vec<String>) -> Self {
        let selected_cluster_name = selected.into();
        let mut available_clusters = available;
        if !selected_cluster_name.is_empty() && !available_clusters.contains(&selected_cluster_name) {
            available_clusters.insert(0, selected_cluster_name.clone());
        }
        Self {
            selected_cluster_name,
            available_clusters,
        }
    }

    /// Moves the selection to the next available cluster, wrapping around.
    /// Returns the new selection.
    pub fn select_next(&mut self) -> &str {
        if !self.available_clusters.is_empty() {
            let next_index = self
                .available_clusters
                .iter()
                .position(|name| name == &self.selected_cluster_name)
                .map(|index| (index + 1) % self.available_clusters.len())
                .unwrap_or(0);
            self.selected_cluster_name = self.available_clusters[next_index].clone();
        }
        &self.selected_cluster_name
    }

    /// Selects `name`, adding it to the available clusters when unknown.
    pub fn select(&mut self, name: &str) {
        if !self.available_clusters.iter().any(|cluster| cluster == name) {
            self.available_clusters.push(name.to_string());
        }
        self.selected_cluster_name = name.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_with_missing_fields_reads_as_empty() {
        let response: UserInfoResponse = serde_json::from_str(r#"{"user":{"name":"A"}}"#).expect("parse user info");
        let profile = response.user.expect("user present");
        assert_eq!(profile.name(), "A");
        assert_eq!(profile.email(), "");
        assert_eq!(profile.picture(), "");
    }

    #[test]
    fn null_user_deserializes_to_none() {
        let response: UserInfoResponse = serde_json::from_str(r#"{"user":null}"#).expect("parse user info");
        assert!(response.user.is_none());
    }

    #[test]
    fn select_next_wraps_around() {
        let mut clusters = ClusterContext::new("foo", vec!["foo".into(), "bar".into()]);
        assert_eq!(clusters.select_next(), "bar");
        assert_eq!(clusters.select_next(), "foo");
    }

    #[test]
    fn selection_is_always_available() {
        let clusters = ClusterContext::new("baz", vec!["foo".into()]);
        assert_eq!(clusters.available_clusters, vec!["baz".to_string(), "foo".to_string()]);
    }

    #[test]
    fn user_reads_org_name_from_camel_case() {
        let user: User = serde_json::from_str(r#"{"email":"a@x.com","orgName":"Acme"}"#).expect("parse user");
        assert_eq!(user.org_name, "Acme");
    }
}
