use std::fs::{OpenOptions, create_dir_all};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use pixie_api::PixieClient;
use pixie_tui::SidebarContext;
use pixie_util::{ConfigOverrides, ConsoleConfig, expand_tilde};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log file location.
const LOG_PATH_ENV: &str = "PIXIE_CONSOLE_LOG_PATH";

/// Pixie console sidebar in the terminal.
#[derive(Debug, Parser)]
#[command(name = "pixie", version, about)]
struct Cli {
    /// Cluster available for selection; repeat for several
    #[arg(long = "cluster", value_name = "NAME")]
    clusters: Vec<String>,
    /// Cluster selected at startup
    #[arg(long, value_name = "NAME")]
    select: Option<String>,
    /// Domain the console is served from
    #[arg(long, value_name = "DOMAIN")]
    domain: Option<String>,
    /// Base URL of the console API
    #[arg(long, value_name = "URL")]
    api_base: Option<String>,
    /// Email of the logged-in user
    #[arg(long)]
    email: Option<String>,
    /// Organization of the logged-in user
    #[arg(long)]
    org: Option<String>,
    /// Show the announcements row
    #[arg(long, value_name = "BOOL")]
    announcekit: Option<bool>,
    /// Theme id or alias (dracula, nord, ansi256, ...)
    #[arg(long)]
    theme: Option<String>,
    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            domain_name: self.domain.clone(),
            api_base: self.api_base.clone(),
            user_email: self.email.clone(),
            org_name: self.org.clone(),
            clusters: self.clusters.clone(),
            selected_cluster: self.select.clone(),
            announcekit: self.announcekit,
            theme: self.theme.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let mut config = match cli.config.as_deref() {
        Some(path) => ConsoleConfig::load_from(path)?,
        None => ConsoleConfig::load()?,
    };
    config.apply_overrides(cli.overrides());

    let api_base = config.api_base();
    let client = PixieClient::new(&api_base, &config.domain_name).with_context(|| format!("invalid API base {api_base}"))?;
    info!(%api_base, domain = %config.domain_name, "starting console sidebar");

    let context = SidebarContext::from_config(&config, Arc::new(client));
    pixie_tui::run(context, config.preferred_theme.clone()).await
}

/// Logs go to a file since the terminal belongs to the UI.
fn init_tracing() -> Result<()> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn log_path() -> PathBuf {
    if let Some(path) = std::env::var_os(LOG_PATH_ENV)
        && !path.is_empty()
    {
        return expand_tilde(&path.to_string_lossy());
    }
    dirs_next::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pixie")
        .join("console.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "pixie",
            "--cluster",
            "foo",
            "--cluster",
            "bar",
            "--select",
            "bar",
            "--email",
            "a@x.com",
            "--announcekit",
            "true",
        ])
        .expect("parse");
        let overrides = cli.overrides();
        assert_eq!(overrides.clusters, ["foo", "bar"]);
        assert_eq!(overrides.selected_cluster.as_deref(), Some("bar"));
        assert_eq!(overrides.user_email.as_deref(), Some("a@x.com"));
        assert_eq!(overrides.announcekit, Some(true));
        assert!(overrides.theme.is_none());
    }
}
