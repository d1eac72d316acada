//! Event loop that owns one `SearchController` for the lifetime of a mounted search UI.
//!
//! Every input (view commands, debounce timers, fetch completions) is handled one at a
//! time on the session task, so controller state never needs a lock. The view reads
//! state through a watch channel and cannot write it.

use std::sync::Arc;

use shared::domain::{PageDirection, SearchState, SearchTerm};
use thiserror::Error;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, info};

use crate::{
    controller::{ControllerEvent, ControllerSettings, SearchController},
    DirectorySearch,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("search session has shut down")]
    Closed,
}

#[derive(Debug)]
enum SessionCommand {
    SetTerm(SearchTerm),
    ChangePage(PageDirection),
    Shutdown,
}

pub struct SearchSession {
    controller: SearchController,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    events: mpsc::UnboundedReceiver<ControllerEvent>,
    state_tx: watch::Sender<SearchState>,
}

/// Cloneable front door to a running session.
#[derive(Clone)]
pub struct SearchHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    state: watch::Receiver<SearchState>,
}

impl SearchSession {
    /// Starts the session loop on the current runtime. It stops on `shutdown` or once
    /// every handle is dropped.
    pub fn spawn(
        directory: Arc<dyn DirectorySearch>,
        settings: ControllerSettings,
    ) -> (SearchHandle, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let controller = SearchController::new(directory, settings, event_tx);
        let (state_tx, state_rx) = watch::channel(controller.state().clone());

        let session = Self {
            controller,
            commands: command_rx,
            events: event_rx,
            state_tx,
        };
        let task = tokio::spawn(session.run());

        let handle = SearchHandle {
            commands: command_tx,
            state: state_rx,
        };
        (handle, task)
    }

    async fn run(mut self) {
        info!("search session started");
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(SessionCommand::SetTerm(term)) => self.controller.on_term_changed(term),
                    Some(SessionCommand::ChangePage(direction)) => {
                        self.controller.on_page_change_requested(direction)
                    }
                    Some(SessionCommand::Shutdown) | None => break,
                },
                Some(event) = self.events.recv() => self.controller.handle(event),
            }
            self.publish();
        }

        self.controller.shutdown();
        debug!(sequence = self.controller.sequence(), "search session stopped");
    }

    fn publish(&self) {
        let latest = self.controller.state();
        self.state_tx.send_if_modified(|current| {
            if *current == *latest {
                return false;
            }
            *current = latest.clone();
            true
        });
    }
}

impl SearchHandle {
    pub fn set_term(&self, term: impl Into<SearchTerm>) -> Result<(), SessionError> {
        self.send(SessionCommand::SetTerm(term.into()))
    }

    pub fn change_page(&self, direction: PageDirection) -> Result<(), SessionError> {
        self.send(SessionCommand::ChangePage(direction))
    }

    pub fn next_page(&self) -> Result<(), SessionError> {
        self.change_page(PageDirection::Next)
    }

    pub fn previous_page(&self) -> Result<(), SessionError> {
        self.change_page(PageDirection::Previous)
    }

    pub fn shutdown(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Shutdown)
    }

    /// Latest published snapshot.
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.clone()
    }

    fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .map_err(|_| SessionError::Closed)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
