//! In-app paths for live view pages.
//!
//! Every dynamic segment is encoded with `encodeURIComponent` semantics so
//! cluster and entity names containing `/`, spaces or other reserved
//! characters never leak into the path structure.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use pixie_types::{EntityUrl, LiveViewPage};

/// Characters left untouched by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a single path segment.
pub fn encode_uri_component(segment: &str) -> String {
    utf8_percent_encode(segment, URI_COMPONENT).to_string()
}

/// Builds the in-app path for a live view entity.
///
/// Pages whose required params are missing degrade to the closest page that
/// can still be addressed: a single entity falls back to its listing, and a
/// namespaced listing without a namespace falls back to the cluster page.
pub fn to_entity_pathname(entity: &EntityUrl) -> String {
    let cluster = encode_uri_component(&entity.cluster_name);
    let params = &entity.params;
    let namespace = params.namespace.as_deref().map(encode_uri_component);
    let cluster_path = format!("/live/clusters/{cluster}");

    match (entity.page, namespace) {
        (LiveViewPage::Namespaces, _) | (LiveViewPage::Namespace, None) => format!("{cluster_path}/namespaces"),
        (LiveViewPage::Namespace, Some(namespace)) => format!("{cluster_path}/namespaces/{namespace}"),
        (LiveViewPage::Nodes, _) => format!("{cluster_path}/nodes"),
        (LiveViewPage::Node, _) => match params.node.as_deref() {
            Some(node) => format!("{cluster_path}/nodes/{}", encode_uri_component(node)),
            None => format!("{cluster_path}/nodes"),
        },
        (LiveViewPage::Pods, Some(namespace)) => format!("{cluster_path}/namespaces/{namespace}/pods"),
        (LiveViewPage::Pod, Some(namespace)) => match params.pod.as_deref() {
            Some(pod) => format!("{cluster_path}/namespaces/{namespace}/pods/{}", encode_uri_component(pod)),
            None => format!("{cluster_path}/namespaces/{namespace}/pods"),
        },
        (LiveViewPage::Services, Some(namespace)) => format!("{cluster_path}/namespaces/{namespace}/services"),
        (LiveViewPage::Service, Some(namespace)) => match params.service.as_deref() {
            Some(service) => format!("{cluster_path}/namespaces/{namespace}/services/{}", encode_uri_component(service)),
            None => format!("{cluster_path}/namespaces/{namespace}/services"),
        },
        (LiveViewPage::Pods | LiveViewPage::Pod | LiveViewPage::Services | LiveViewPage::Service, None)
        | (LiveViewPage::Default | LiveViewPage::Cluster, _) => cluster_path,
    }
}
