//! Pixie console API client.
//!
//! This crate provides a lightweight client for the console's GraphQL
//! endpoint. It focuses on:
//!
//! - Constructing an HTTP client with sensible defaults
//! - Discovering credentials from `PIXIE_API_KEY` or `~/.netrc`
//! - Validating the API base URL against the configured domain
//! - Running GraphQL queries and the sidebar's user info query
//!
//! The primary entry point is [`PixieClient`]. Components that only need the
//! profile depend on the [`ProfileSource`] trait so tests can substitute it.
//!
//! # Example
//!
//! ```ignore
//! use pixie_api::{PixieClient, ProfileSource};
//!
//! async fn show() -> anyhow::Result<()> {
//!     let client = PixieClient::new("https://work.withpixie.ai", "withpixie.ai")?;
//!     let info = client.fetch_user_info().await?;
//!     println!("{:?}", info.user);
//!     Ok(())
//! }
//! ```

use std::time::Duration;
use std::{env, fs};

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, RequestBuilder, Url, header};
use tracing::debug;

pub mod graphql;
pub mod user_info;

pub use graphql::{GraphQlError, GraphQlRequest, GraphQlResponse, QueryError};
pub use user_info::{GRAPHQL_PATH, ProfileSource, USER_INFO_QUERY};

/// Environment variable holding an API token.
pub const API_KEY_ENV: &str = "PIXIE_API_KEY";

/// Hostnames allowed for local development regardless of scheme.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

#[derive(Debug, Clone)]
/// Thin wrapper around a configured `reqwest::Client` for console API access.
///
/// The client pre-configures default headers and builds requests against a
/// validated base URL.
pub struct PixieClient {
    pub base_url: String,
    pub http: Client,
    pub user_agent: String,
}

impl PixieClient {
    /// Construct a [`PixieClient`] for `base_url`.
    ///
    /// Resolution order for authentication:
    /// - `PIXIE_API_KEY` environment variable
    /// - `~/.netrc` entry whose machine matches the API host
    ///
    /// Non-localhost hosts must use HTTPS and be `domain_name` or one of its
    /// subdomains.
    pub fn new(base_url: &str, domain_name: &str) -> Result<Self> {
        let parsed_base_url = validate_base_url(base_url, domain_name)?;
        let host_name = parsed_base_url.host_str().unwrap_or_default().to_string();
        let api_token = env::var(API_KEY_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .or_else(|| get_netrc_token(&host_name));

        let mut default_headers = header::HeaderMap::new();
        if let Some(api_token) = api_token {
            let authorization_header_value = format!("Bearer {}", api_token.trim());
            default_headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&authorization_header_value).context("invalid API token")?,
            );
        }
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(Duration::from_secs(30))
            .build()
            .context("build http client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            user_agent: format!("pixie-console/0.1; {}", env::consts::OS),
        })
    }

    /// Build a `reqwest::RequestBuilder` for a method and API-relative path.
    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "building request");

        self.http
            .request(method, url)
            .header(header::USER_AGENT, &self.user_agent)
    }
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS, and host must be `domain_name` or a
///   subdomain of it
pub fn validate_base_url(base: &str, domain_name: &str) -> Result<Url> {
    let parsed_base_url = Url::parse(base).map_err(|e| anyhow!("Invalid API base URL '{}': {}", base, e))?;

    let host_name = parsed_base_url
        .host_str()
        .ok_or_else(|| anyhow!("API base URL must include a host"))?;

    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(parsed_base_url);
    }

    if parsed_base_url.scheme() != "https" {
        return Err(anyhow!(
            "API base URL must use https for non-localhost hosts; got '{}://'",
            parsed_base_url.scheme()
        ));
    }

    let is_allowed_domain =
        host_name.eq_ignore_ascii_case(domain_name) || host_name.to_ascii_lowercase().ends_with(&format!(".{}", domain_name.to_ascii_lowercase()));
    if !is_allowed_domain {
        return Err(anyhow!(
            "API host '{}' is not allowed; must be '{}' or a subdomain, or localhost",
            host_name,
            domain_name
        ));
    }

    Ok(parsed_base_url)
}

/// Attempt to read an API token for `host` from the user's `~/.netrc` file.
fn get_netrc_token(host: &str) -> Option<String> {
    let home = dirs_next::home_dir()?;
    let netrc_path = home.join(".netrc");
    let content = fs::read_to_string(netrc_path).ok()?;
    parse_netrc_password(&content, host)
}

/// Small `.netrc` reader returning the password of the `machine <host>`
/// stanza.
///
/// ```text
/// machine work.withpixie.ai
///   login me@example.com
///   password <TOKEN>
/// ```
fn parse_netrc_password(content: &str, host: &str) -> Option<String> {
    let mut tokens = content.split_whitespace();
    let mut in_host_stanza = false;

    while let Some(token) = tokens.next() {
        match token {
            "machine" => {
                in_host_stanza = tokens.next().is_some_and(|machine| machine.eq_ignore_ascii_case(host));
            }
            "default" => in_host_stanza = false,
            "password" if in_host_stanza => return tokens.next().map(str::to_string),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localhost_allows_any_scheme() {
        assert!(validate_base_url("http://localhost:8080", "withpixie.ai").is_ok());
        assert!(validate_base_url("http://127.0.0.1", "withpixie.ai").is_ok());
    }

    #[test]
    fn remote_hosts_require_https_and_domain() {
        assert!(validate_base_url("https://work.withpixie.ai", "withpixie.ai").is_ok());
        assert!(validate_base_url("https://withpixie.ai", "withpixie.ai").is_ok());
        assert!(validate_base_url("http://work.withpixie.ai", "withpixie.ai").is_err());
        assert!(validate_base_url("https://evilwithpixie.ai", "withpixie.ai").is_err());
        assert!(validate_base_url("not a url", "withpixie.ai").is_err());
    }

    #[test]
    fn netrc_password_for_matching_machine() {
        let content = "machine other.host login x password nope\nmachine work.withpixie.ai\n  login me\n  password s3cr3t\n";
        assert_eq!(parse_netrc_password(content, "work.withpixie.ai"), Some("s3cr3t".to_string()));
        assert_eq!(parse_netrc_password(content, "missing.host"), None);
    }

    #[test]
    fn request_urls_are_relative_to_base() {
        let client = PixieClient::new("http://localhost:8080/", "withpixie.ai").expect("client");
        let request = client
            .request(reqwest::Method::POST, GRAPHQL_PATH)
            .build()
            .expect("build request");
        assert_eq!(request.url().as_str(), "http://localhost:8080/api/graphql");
    }
}
