//! Minimal GraphQL request/response envelope.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Body POSTed to the GraphQL endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

impl<'a> GraphQlRequest<'a> {
    pub fn new(query: &'a str) -> Self {
        Self { query, variables: None }
    }
}

/// A single entry of the `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Standard GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// Failure modes of a GraphQL query.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("query returned errors: {}", join_messages(.0))]
    GraphQl(Vec<GraphQlError>),
    #[error("query returned no data")]
    MissingData,
}

fn join_messages(errors: &[GraphQlError]) -> String {
    errors.iter().map(|error| error.message.as_str()).collect::<Vec<_>>().join("; ")
}

/// Interprets an HTTP status and body as a GraphQL response carrying `T`.
///
/// GraphQL errors are only fatal when no data came back alongside them.
pub fn parse_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, QueryError> {
    if !status.is_success() {
        return Err(QueryError::Status {
            status,
            body: body.chars().take(200).collect(),
        });
    }

    let envelope: GraphQlResponse<T> = serde_json::from_str(body)?;
    match envelope {
        GraphQlResponse { data: Some(data), .. } => Ok(data),
        GraphQlResponse { errors, .. } if !errors.is_empty() => Err(QueryError::GraphQl(errors)),
        _ => Err(QueryError::MissingData),
    }
}

#[cfg(test)]
mod tests {
    use pixie_types::UserInfoResponse;

    use super::*;

    #[test]
    fn request_omits_absent_variables() {
        let body = serde_json::to_value(GraphQlRequest::new("{ user { email } }")).expect("serialize");
        assert_eq!(body, serde_json::json!({ "query": "{ user { email } }" }));
    }

    #[test]
    fn data_is_extracted() {
        let body = r#"{"data":{"user":{"name":"A","email":"b@x.com","picture":"p"}}}"#;
        let info: UserInfoResponse = parse_response(StatusCode::OK, body).expect("parse");
        let user = info.user.expect("user");
        assert_eq!(user.name(), "A");
        assert_eq!(user.email(), "b@x.com");
    }

    #[test]
    fn errors_without_data_fail() {
        let body = r#"{"data":null,"errors":[{"message":"unauthenticated"}]}"#;
        let error = parse_response::<UserInfoResponse>(StatusCode::OK, body).expect_err("errors");
        assert!(matches!(error, QueryError::GraphQl(ref errors) if errors.len() == 1));
        assert_eq!(error.to_string(), "query returned errors: unauthenticated");
    }

    #[test]
    fn errors_with_absent_data_fail() {
        let body = r#"{"errors":[{"message":"forbidden"},{"message":"expired"}]}"#;
        let error = parse_response::<UserInfoResponse>(StatusCode::OK, body).expect_err("errors");
        assert_eq!(error.to_string(), "query returned errors: forbidden; expired");
    }

    #[test]
    fn non_success_status_fails() {
        let error = parse_response::<UserInfoResponse>(StatusCode::UNAUTHORIZED, "denied").expect_err("status");
        assert!(matches!(error, QueryError::Status { status, .. } if status == StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn malformed_body_fails() {
        let error = parse_response::<UserInfoResponse>(StatusCode::OK, "<html>").expect_err("decode");
        assert!(matches!(error, QueryError::Decode(_)));
        let error = parse_response::<UserInfoResponse>(StatusCode::OK, "{}").expect_err("missing");
        assert!(matches!(error, QueryError::MissingData));
    }
}
