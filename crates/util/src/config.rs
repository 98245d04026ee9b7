//! Console configuration for the Pixie sidebar.
//!
//! Values are merged from built-in defaults, an optional JSON file
//! (`~/.config/pixie/console.json` on most platforms), environment variables
//! and finally explicit overrides supplied by the command line.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;
use pixie_types::{ClusterContext, FeatureFlags, User};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{expand_tilde, is_truthy};

/// Environment variable allowing callers to override the config file path.
pub const CONFIG_PATH_ENV: &str = "PIXIE_CONFIG_PATH";
pub const DOMAIN_NAME_ENV: &str = "PIXIE_DOMAIN_NAME";
pub const API_BASE_ENV: &str = "PIXIE_API_BASE";
pub const USER_EMAIL_ENV: &str = "PIXIE_USER_EMAIL";
pub const ORG_NAME_ENV: &str = "PIXIE_ORG_NAME";
pub const CLUSTER_ENV: &str = "PIXIE_CLUSTER";
pub const ANNOUNCEKIT_FLAG_ENV: &str = "PIXIE_FLAG_ANNOUNCEKIT";

/// Default filename for the JSON payload.
pub const CONFIG_FILE_NAME: &str = "console.json";

pub const DEFAULT_DOMAIN_NAME: &str = "withpixie.ai";
pub const DEFAULT_ANNOUNCEKIT_WIDGET: &str = "https://announcekit.app/widgets/v2/1okO1W";

/// Error surfaced when reading the configuration fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure (for example, permissions).
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// On-disk shape of the configuration; every key is optional.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub domain_name: Option<String>,
    pub api_base: Option<String>,
    pub user: Option<User>,
    #[serde(default)]
    pub clusters: Vec<String>,
    pub selected_cluster: Option<String>,
    pub flags: Option<FeatureFlags>,
    pub announcekit_widget: Option<String>,
    pub preferred_theme: Option<String>,
}

/// Explicit values from the command line; `None` keeps the merged value.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub domain_name: Option<String>,
    pub api_base: Option<String>,
    pub user_email: Option<String>,
    pub org_name: Option<String>,
    pub clusters: Vec<String>,
    pub selected_cluster: Option<String>,
    pub announcekit: Option<bool>,
    pub theme: Option<String>,
}

/// Fully resolved console configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub domain_name: String,
    api_base: Option<String>,
    pub user: User,
    pub clusters: Vec<String>,
    pub selected_cluster: Option<String>,
    pub flags: FeatureFlags,
    pub announcekit_widget: String,
    pub preferred_theme: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            domain_name: DEFAULT_DOMAIN_NAME.to_string(),
            api_base: None,
            user: User::default(),
            clusters: Vec::new(),
            selected_cluster: None,
            flags: FeatureFlags::default(),
            announcekit_widget: DEFAULT_ANNOUNCEKIT_WIDGET.to_string(),
            preferred_theme: None,
        }
    }
}

impl ConsoleConfig {
    /// Loads defaults, the config file and the environment, in that order.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&default_config_path())
    }

    /// Same as [`ConsoleConfig::load`] with an explicit file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.merge_file(load_file(path)?);
        config.merge_env();
        debug!(path = %path.display(), domain = %config.domain_name, "loaded console config");
        Ok(config)
    }

    /// Applies command line overrides on top of the merged values.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        let ConfigOverrides {
            domain_name,
            api_base,
            user_email,
            org_name,
            clusters,
            selected_cluster,
            announcekit,
            theme,
        } = overrides;
        if let Some(domain_name) = domain_name {
            self.domain_name = domain_name;
        }
        if api_base.is_some() {
            self.api_base = api_base;
        }
        if let Some(email) = user_email {
            self.user.email = email;
        }
        if let Some(org_name) = org_name {
            self.user.org_name = org_name;
        }
        if !clusters.is_empty() {
            self.clusters = clusters;
        }
        if selected_cluster.is_some() {
            self.selected_cluster = selected_cluster;
        }
        if let Some(enabled) = announcekit {
            self.flags.announcekit = enabled;
        }
        if theme.is_some() {
            self.preferred_theme = theme;
        }
    }

    /// Base URL of the console API. Defaults to `https://work.<domain>`.
    pub fn api_base(&self) -> String {
        self.api_base
            .clone()
            .unwrap_or_else(|| format!("https://work.{}", self.domain_name))
    }

    /// External documentation site for the configured domain.
    pub fn docs_url(&self) -> String {
        format!("https://docs.{}", self.domain_name)
    }

    /// Cluster selection derived from the configured clusters. The explicit
    /// selection wins; otherwise the first configured cluster is selected.
    pub fn cluster_context(&self) -> ClusterContext {
        let selected = self
            .selected_cluster
            .clone()
            .or_else(|| self.clusters.first().cloned())
            .unwrap_or_default();
        ClusterContext::new(selected, self.clusters.clone())
    }

    fn merge_file(&mut self, file: ConfigFile) {
        let ConfigFile {
            domain_name,
            api_base,
            user,
            clusters,
            selected_cluster,
            flags,
            announcekit_widget,
            preferred_theme,
        } = file;
        if let Some(domain_name) = domain_name.filter(|value| !value.trim().is_empty()) {
            self.domain_name = domain_name.trim().to_string();
        }
        if api_base.is_some() {
            self.api_base = api_base;
        }
        if let Some(user) = user {
            self.user = user;
        }
        if !clusters.is_empty() {
            self.clusters = clusters;
        }
        if selected_cluster.is_some() {
            self.selected_cluster = selected_cluster;
        }
        if let Some(flags) = flags {
            self.flags = flags;
        }
        if let Some(widget) = announcekit_widget {
            self.announcekit_widget = widget;
        }
        if preferred_theme.is_some() {
            self.preferred_theme = preferred_theme;
        }
    }

    fn merge_env(&mut self) {
        if let Some(domain_name) = non_empty_env(DOMAIN_NAME_ENV) {
            self.domain_name = domain_name;
        }
        if let Some(api_base) = non_empty_env(API_BASE_ENV) {
            self.api_base = Some(api_base);
        }
        if let Some(email) = non_empty_env(USER_EMAIL_ENV) {
            self.user.email = email;
        }
        if let Some(org_name) = non_empty_env(ORG_NAME_ENV) {
            self.user.org_name = org_name;
        }
        if let Some(cluster) = non_empty_env(CLUSTER_ENV) {
            self.selected_cluster = Some(cluster);
        }
        if let Some(flag) = non_empty_env(ANNOUNCEKIT_FLAG_ENV) {
            self.flags.announcekit = is_truthy(&flag);
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Path of the config file, honoring [`CONFIG_PATH_ENV`].
pub fn default_config_path() -> PathBuf {
    if let Some(path) = non_empty_env(CONFIG_PATH_ENV) {
        return expand_tilde(&path);
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pixie")
        .join(CONFIG_FILE_NAME)
}

fn load_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(file) => Ok(file),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse console config; using defaults"
                );
                Ok(ConfigFile::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(error) => Err(ConfigError::Io(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ENV: [&str; 6] = [
        DOMAIN_NAME_ENV,
        API_BASE_ENV,
        USER_EMAIL_ENV,
        ORG_NAME_ENV,
        CLUSTER_ENV,
        ANNOUNCEKIT_FLAG_ENV,
    ];

    fn without_env<R>(f: impl FnOnce() -> R) -> R {
        let unset: Vec<(&str, Option<&str>)> = ALL_ENV.iter().map(|name| (*name, None)).collect();
        temp_env::with_vars(unset, f)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = without_env(|| ConsoleConfig::load_from(&dir.path().join("absent.json"))).expect("load config");
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.docs_url(), "https://docs.withpixie.ai");
        assert_eq!(config.api_base(), "https://work.withpixie.ai");
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").expect("write config");
        let config = without_env(|| ConsoleConfig::load_from(&path)).expect("load config");
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn file_values_are_merged() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"{
                "domainName": "dev.withpixie.dev",
                "user": { "email": "a@x.com", "orgName": "Acme" },
                "clusters": ["foo", "bar"],
                "flags": { "announcekit": true }
            }"#,
        )
        .expect("write config");

        let config = without_env(|| ConsoleConfig::load_from(&path)).expect("load config");
        assert_eq!(config.domain_name, "dev.withpixie.dev");
        assert_eq!(config.docs_url(), "https://docs.dev.withpixie.dev");
        assert_eq!(config.user.org_name, "Acme");
        assert!(config.flags.announcekit);
        assert_eq!(config.cluster_context().selected_cluster_name, "foo");
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "flags": { "announcekit": true }, "clusters": ["foo", "bar"] }"#).expect("write config");

        let config = temp_env::with_vars(
            [
                (ANNOUNCEKIT_FLAG_ENV, Some("false")),
                (CLUSTER_ENV, Some("bar")),
                (API_BASE_ENV, Some("http://localhost:8080")),
            ],
            || ConsoleConfig::load_from(&path),
        )
        .expect("load config");
        assert!(!config.flags.announcekit);
        assert_eq!(config.cluster_context().selected_cluster_name, "bar");
        assert_eq!(config.api_base(), "http://localhost:8080");
    }

    #[test]
    fn overrides_win_over_everything() {
        let mut config = ConsoleConfig::default();
        config.apply_overrides(ConfigOverrides {
            user_email: Some("b@x.com".into()),
            clusters: vec!["baz".into()],
            announcekit: Some(true),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.user.email, "b@x.com");
        assert!(config.flags.announcekit);
        assert_eq!(config.cluster_context().available_clusters, vec!["baz".to_string()]);
    }
}
