//! Terminal rendition of the result view and the profile opener.

use std::{fmt::Write as _, io::Write};

use search_core::{ProfileOpener, ResultView};
use shared::domain::{SearchState, SearchStatus};
use tokio::{sync::watch, task::JoinHandle};
use tracing::warn;

const LOGIN_WIDTH: usize = 28;

pub struct TerminalView<W: Write> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ResultView for TerminalView<W> {
    fn render(&mut self, state: &SearchState) {
        let frame = render_state(state);
        if frame.is_empty() {
            return;
        }
        if let Err(error) = self.out.write_all(frame.as_bytes()).and_then(|()| self.out.flush()) {
            warn!(%error, "failed to write results");
        }
    }
}

pub fn render_state(state: &SearchState) -> String {
    let mut frame = String::new();
    match &state.status {
        SearchStatus::Idle => {}
        SearchStatus::Loading => {
            let _ = writeln!(frame, "Searching for \"{}\"...", state.term.as_str().trim());
        }
        SearchStatus::Error(message) => {
            let _ = writeln!(frame, "{message}");
        }
        SearchStatus::Empty => {
            let _ = writeln!(frame, "No results found");
        }
        SearchStatus::Success => {
            let _ = writeln!(frame, "{:>3}  {:<LOGIN_WIDTH$}  Profile", "#", "User");
            for (index, row) in state.rows.iter().enumerate() {
                let _ = writeln!(
                    frame,
                    "{:>3}  {:<LOGIN_WIDTH$}  {}",
                    index + 1,
                    row.login,
                    row.profile_url
                );
            }
            let _ = writeln!(frame, "{}", pager_line(state));
        }
    }
    frame
}

/// Previous/Next controls; a control shown in brackets is disabled.
fn pager_line(state: &SearchState) -> String {
    let previous = if state.has_previous_page() {
        ":prev"
    } else {
        "[prev]"
    };
    let next = if state.has_next_page() {
        ":next"
    } else {
        "[next]"
    };
    format!(
        "{previous}  page {} of {}  {next}",
        state.page, state.total_pages
    )
}

/// Re-renders on every published snapshot until the session ends.
pub fn spawn_renderer<V>(mut state: watch::Receiver<SearchState>, mut view: V) -> JoinHandle<()>
where
    V: ResultView + Send + 'static,
{
    tokio::spawn(async move {
        while state.changed().await.is_ok() {
            let snapshot = state.borrow_and_update().clone();
            view.render(&snapshot);
        }
    })
}

/// Opens profiles in the system browser.
pub struct SystemBrowser;

impl ProfileOpener for SystemBrowser {
    fn redirect_to_profile(&self, url: &str) {
        if let Err(error) = open::that_detached(url) {
            warn!(%url, %error, "failed to open profile");
        }
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
