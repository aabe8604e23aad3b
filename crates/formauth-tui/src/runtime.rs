//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! Async results (the credential exchange) are sent to an inbox channel
//! and drained once per loop iteration alongside terminal input.

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use formauth_core::auth::{AuthClient, Credentials, exchange};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Input poll timeout; also the render cadence while idle.
pub const TICK_DURATION: Duration = Duration::from_millis(100);

pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: AppState,
    client: AuthClient,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Enters TUI mode. Must be called inside a tokio runtime.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(state: AppState, client: AuthClient) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            client,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if reading input or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            if dirty {
                self.terminal
                    .draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }

            for event in self.collect_events()? {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
                dirty = true;
            }
        }

        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        let poll_duration = if events.is_empty() {
            TICK_DURATION.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= TICK_DURATION {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => self.state.should_quit = true,
            UiEffect::SpawnLogin { credentials } => self.spawn_login(credentials),
            UiEffect::Logout => {
                if let Err(err) = self.state.login.component.logout() {
                    tracing::error!("Logout failed: {err:#}");
                    self.state.status = Some(format!("Logout failed: {err:#}"));
                }
            }
        }
    }

    fn spawn_login(&self, credentials: Credentials) {
        let client = self.client.clone();
        let sessions = self.state.login.component.sessions().clone();
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let result = exchange(&client, &sessions, &credentials).await;
            let _ = tx.send(UiEvent::LoginFinished(result));
        });
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
