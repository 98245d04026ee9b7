//! The user info query backing the sidebar profile item.

use std::fmt::Debug;

use async_trait::async_trait;
use pixie_types::UserInfoResponse;
use reqwest::{Method, header};
use tracing::debug;

use crate::PixieClient;
use crate::graphql::{GraphQlRequest, QueryError, parse_response};

/// API-relative path of the GraphQL endpoint.
pub const GRAPHQL_PATH: &str = "/api/graphql";

pub const USER_INFO_QUERY: &str = r#"
{
  user {
    email
    name
    picture
  }
}
"#;

/// Anything that can answer the user info query.
#[async_trait]
pub trait ProfileSource: Send + Sync + Debug {
    /// Fetches the current user's profile. Implementations must not serve
    /// cached results.
    async fn fetch_user_info(&self) -> Result<UserInfoResponse, QueryError>;
}

#[async_trait]
impl ProfileSource for PixieClient {
    async fn fetch_user_info(&self) -> Result<UserInfoResponse, QueryError> {
        // network-only: every mount asks the server again
        let response = self
            .request(Method::POST, GRAPHQL_PATH)
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::PRAGMA, "no-cache")
            .json(&GraphQlRequest::new(USER_INFO_QUERY))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "user info response");
        parse_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_selects_profile_fields() {
        let compact: String = USER_INFO_QUERY.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(compact, "{ user { email name picture } }");
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let client = PixieClient::new("http://127.0.0.1:9", "withpixie.ai").expect("client");
        let result = client.fetch_user_info().await;
        assert!(matches!(result, Err(QueryError::Transport(_))));
    }
}
