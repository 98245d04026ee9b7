//! Live view pages addressable from the sidebar.

use serde::{Deserialize, Serialize};

/// Pages of the live view, scoped to a cluster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiveViewPage {
    #[default]
    Default,
    Cluster,
    Namespace,
    Namespaces,
    Node,
    Nodes,
    Pod,
    Pods,
    Service,
    Services,
}

/// Optional entity names used by the pages that need them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityParams {
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub pod: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub node: Option<String>,
}

/// A live view page together with the cluster and params it is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityUrl {
    pub cluster_name: String,
    pub page: LiveViewPage,
    #[serde(default)]
    pub params: EntityParams,
}

impl EntityUrl {
    pub fn new(cluster_name: impl Into<String>, page: LiveViewPage) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            page,
            params: EntityParams::default(),
        }
    }

    pub fn with_params(mut self, params: EntityParams) -> Self {
        self.params = params;
        self
    }
}
