//! # Command Execution Layer
//!
//! This module translates the effects components return ([`Effect`]) into
//! imperative commands ([`Cmd`]) and executes them. It is the boundary where
//! the pure state handling of the app meets the outside world:
//! - Querying the console API for the user's profile
//! - Opening URLs with the system browser
//!
//! ## Design
//! - [`from_effects`] translates non-local effects into [`Cmd`]s.
//! - [`run_cmds`] executes them. Browser launches finish immediately; API
//!   queries are spawned and handed back as pending tasks whose
//!   [`ExecOutcome`] the runtime feeds into the update loop.

use std::sync::Arc;

use pixie_api::ProfileSource;
use pixie_types::{Effect, ExecOutcome, Msg};
use tokio::task::{JoinHandle, spawn};
use tracing::{debug, warn};

use crate::app::App;

/// Side-effectful commands executed outside of pure state updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Query the current user's profile for the given sidebar mount.
    FetchUserInfo { generation: u64 },
    /// Open a URL with the system browser.
    OpenBrowser(String),
}

/// Results of running a batch of commands.
#[derive(Debug, Default)]
pub struct CommandBatch {
    /// Outcomes available right away.
    pub immediate: Vec<ExecOutcome>,
    /// Spawned tasks still running.
    pub pending: Vec<JoinHandle<ExecOutcome>>,
}

/// Convert [`Effect`]s into [`Cmd`]s. Local effects are skipped; the runtime
/// applies those to `App` directly.
pub fn from_effects(effects: Vec<Effect>) -> Vec<Cmd> {
    effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::FetchUserInfo { generation } => Some(Cmd::FetchUserInfo { generation }),
            Effect::OpenExternal(url) => Some(Cmd::OpenBrowser(url)),
            other => {
                debug!(effect = ?other, "local effect reached the command layer");
                None
            }
        })
        .collect()
}

/// Execute commands. Must be called from within a Tokio runtime.
pub fn run_cmds(app: &App, commands: Vec<Cmd>) -> CommandBatch {
    let mut batch = CommandBatch::default();
    for command in commands {
        match command {
            Cmd::FetchUserInfo { generation } => {
                let source = Arc::clone(&app.ctx.profile_source);
                batch.pending.push(spawn(fetch_user_info(source, generation)));
            }
            Cmd::OpenBrowser(url) => batch.immediate.push(open_browser(&url)),
        }
    }
    batch
}

pub fn run_from_effects(app: &App, effects: Vec<Effect>) -> CommandBatch {
    run_cmds(app, from_effects(effects))
}

/// Runs the profile query. Failures are logged and reported as a missing
/// profile so the sidebar renders blank fields.
pub(crate) async fn fetch_user_info(source: Arc<dyn ProfileSource>, generation: u64) -> ExecOutcome {
    let profile = match source.fetch_user_info().await {
        Ok(response) => response.user,
        Err(error) => {
            warn!(%error, generation, "user info query failed");
            None
        }
    };
    ExecOutcome::Message(Msg::UserInfoLoaded { generation, profile })
}

fn open_browser(url: &str) -> ExecOutcome {
    match open::that_detached(url) {
        Ok(()) => ExecOutcome::Log(format!("Opened {url}")),
        Err(error) => {
            warn!(%error, %url, "failed to open browser");
            ExecOutcome::Log(format!("Could not open {url}: {error}"))
        }
    }
}
