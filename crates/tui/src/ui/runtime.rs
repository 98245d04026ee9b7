//! Runtime: unified event loop and input routing for the TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Drive a single event loop over input, spawned commands and a slow tick.
//! - Route input to components and execute the `Effect`s they return.
//!
//! Effect Handling
//! - Local effects (navigation, drawer, cluster, modals) are applied to `App`
//!   through the main view right away.
//! - The rest go through `cmd`: browser launches complete immediately, profile
//!   queries are spawned and their outcomes come back through
//!   `pending_execs`.
//!
//! Entry Point
//! - `run_app(context, shortcuts, preferred_theme)` is called from `lib::run`
//!   and performs setup, event processing, and teardown.
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::MouseEventKind;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::{StreamExt, stream::FuturesUnordered};
use pixie_types::{Effect, ExecOutcome, Msg};
use ratatui::{Terminal, prelude::*};
use tokio::task::JoinHandle;
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::app::{App, SidebarContext};
use crate::cmd;
use crate::shortcuts::ShortcutRegistry;
use crate::ui::components::component::Component;
use crate::ui::main_component::MainView;
use crate::ui::theme;

/// Spawn a dedicated input thread that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel.
///
/// Mouse moves are throttled to one every 16 ms.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);

    tokio::task::spawn_blocking(move || {
        let sixteen_ms = Duration::from_millis(16);
        let mut last_mouse_move = Instant::now();
        loop {
            match event::poll(sixteen_ms) {
                Ok(true) => {}
                Ok(false) => {
                    if sender.is_closed() {
                        break;
                    }
                    continue;
                }
                Err(error) => {
                    warn!("Failed to poll events: {}", error);
                    break;
                }
            }
            match event::read() {
                Ok(event) => {
                    let is_mouse_move = event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved);
                    if is_mouse_move {
                        if last_mouse_move.elapsed() < sixteen_ms {
                            continue;
                        }
                        last_mouse_move = Instant::now();
                    }
                    if let Err(error) = sender.blocking_send(event) {
                        debug!("Input receiver dropped: {}", error);
                        break;
                    }
                }
                Err(error) => {
                    warn!("Failed to read event: {}", error);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
///
/// Returns a ratatui `Terminal` backed by Crossterm for later drawing.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    // Rebuild focus just before rendering so structure changes are reflected
    app.rebuild_focus();
    if app.focus.focused().is_none() {
        main_view.restore_focus(app);
    }
    terminal.draw(|frame| {
        let area = frame.area();
        main_view.render(frame, area, app);
    })?;
    Ok(())
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, Msg::Resize(width, height)),

        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

fn handle_outcome(app: &mut App, main_view: &mut MainView, outcome: ExecOutcome) -> Vec<Effect> {
    match outcome {
        ExecOutcome::Message(msg) => main_view.handle_message(app, msg),
        ExecOutcome::Log(line) => {
            info!("{line}");
            Vec::new()
        }
    }
}

/// Applies local effects, runs the rest as commands and returns the effects
/// produced along the way.
fn process_effects(
    app: &mut App,
    main_view: &mut MainView,
    effects: Vec<Effect>,
    pending_execs: &mut FuturesUnordered<JoinHandle<ExecOutcome>>,
) -> Vec<Effect> {
    let (local, external): (Vec<Effect>, Vec<Effect>) = effects.into_iter().partition(Effect::is_local);

    let mut follow_up = Vec::new();
    for effect in local {
        follow_up.extend(main_view.apply_local_effect(app, effect));
    }

    let command_batch = cmd::run_from_effects(app, external);
    pending_execs.extend(command_batch.pending);
    for outcome in command_batch.immediate {
        follow_up.extend(handle_outcome(app, main_view, outcome));
    }
    follow_up
}

/// Entry point for the TUI runtime: sets up the terminal, spawns the event
/// producer, runs the async event loop, and performs cleanup on exit.
pub async fn run_app(context: SidebarContext, shortcuts: ShortcutRegistry, preferred_theme: Option<String>) -> Result<()> {
    let loaded_theme = theme::load(preferred_theme.as_deref());
    info!(theme = loaded_theme.definition.id, "theme selected");

    let mut app = App::new(context, shortcuts, loaded_theme);
    let mut main_view = MainView::default();

    // Input comes from a dedicated blocking thread to ensure reliability.
    let mut input_receiver = spawn_input_thread();
    let mut terminal = setup_terminal()?;

    let mut last_size: Option<(u16, u16)> = crossterm::terminal::size().ok();
    if let Some((width, height)) = last_size {
        app.update(&Msg::Resize(width, height));
    }

    let mut pending_execs: FuturesUnordered<JoinHandle<ExecOutcome>> = FuturesUnordered::new();
    let mut effects = app.mount_sidebar();

    let mut ticker = time::interval(Duration::from_millis(5000));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        while !effects.is_empty() {
            let batch = std::mem::take(&mut effects);
            effects = process_effects(&mut app, &mut main_view, batch, &mut pending_execs);
        }
        render(&mut terminal, &mut app, &mut main_view)?;

        tokio::select! {
            // Terminal input events
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; break out to shut down cleanly.
                    break;
                };
                if let Event::Key(key_event) = event
                    && key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
                        break;
                    }
                if let Event::Resize(width, height) = event {
                    last_size = Some((width, height));
                }
                effects.extend(handle_input_event(&mut app, &mut main_view, event));
            }

            Some(joined) = pending_execs.next(), if !pending_execs.is_empty() => {
                let outcome = joined.unwrap_or_else(|error| ExecOutcome::Log(format!("Execution task failed: {error}")));
                effects.extend(handle_outcome(&mut app, &mut main_view, outcome));
            }

            _ = ticker.tick() => {
                effects.extend(main_view.handle_message(&mut app, Msg::Tick));
            }

            // Handle Ctrl+C
            _ = signal::ctrl_c() => { break; }
        }

        // Fallback: detect terminal size changes even if no explicit Resize
        // event was received.
        if let Ok((width, height)) = crossterm::terminal::size()
            && last_size != Some((width, height))
        {
            last_size = Some((width, height));
            effects.extend(main_view.handle_message(&mut app, Msg::Resize(width, height)));
        }
    }

    for pending in pending_execs.iter() {
        pending.abort();
    }
    cleanup_terminal(&mut terminal)?;
    Ok(())
}
