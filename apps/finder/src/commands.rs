//! Input lines from the terminal, mapped onto session operations.

use search_core::{ProfileOpener, SearchHandle, SessionError};
use shared::domain::{SearchState, SearchStatus};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Full contents of the search box.
    Term(String),
    NextPage,
    PreviousPage,
    Open(usize),
    Clear,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_line(line: &str) -> InputCommand {
    let Some(command) = line.trim().strip_prefix(':') else {
        return InputCommand::Term(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("next" | "n"), None, None) => InputCommand::NextPage,
        (Some("prev" | "p"), None, None) => InputCommand::PreviousPage,
        (Some("clear" | "c"), None, None) => InputCommand::Clear,
        (Some("help" | "h"), None, None) => InputCommand::Help,
        (Some("quit" | "q"), None, None) => InputCommand::Quit,
        (Some("open" | "o"), Some(index), None) => match index.parse::<usize>() {
            Ok(index) if index >= 1 => InputCommand::Open(index),
            _ => InputCommand::Invalid(format!("not a row number: {index}")),
        },
        _ => InputCommand::Invalid(format!("unknown command: :{command}")),
    }
}

pub enum Outcome {
    Continue,
    Message(String),
    Quit,
}

pub fn dispatch(
    handle: &SearchHandle,
    opener: &dyn ProfileOpener,
    command: InputCommand,
) -> Result<Outcome, SessionError> {
    let name = match &command {
        InputCommand::Term(_) => "term",
        InputCommand::NextPage => "next_page",
        InputCommand::PreviousPage => "previous_page",
        InputCommand::Open(_) => "open",
        InputCommand::Clear => "clear",
        InputCommand::Help => "help",
        InputCommand::Quit => "quit",
        InputCommand::Invalid(_) => "invalid",
    };
    debug!(command = name, "terminal command");

    match command {
        InputCommand::Term(term) => handle.set_term(term)?,
        InputCommand::NextPage => handle.next_page()?,
        InputCommand::PreviousPage => handle.previous_page()?,
        InputCommand::Clear => handle.set_term("")?,
        InputCommand::Open(index) => {
            return Ok(match profile_url(&handle.state(), index) {
                Some(url) => {
                    opener.redirect_to_profile(url.as_str());
                    Outcome::Message(format!("opening {url}"))
                }
                None => Outcome::Message(format!("no row {index} on this page")),
            });
        }
        InputCommand::Help => return Ok(Outcome::Message(HELP.to_string())),
        InputCommand::Quit => return Ok(Outcome::Quit),
        InputCommand::Invalid(message) => return Ok(Outcome::Message(message)),
    }
    Ok(Outcome::Continue)
}

/// Profile URL of the 1-based `index` row of the current page. Rows are only
/// addressable while the table is on screen.
pub fn profile_url(state: &SearchState, index: usize) -> Option<String> {
    if state.status != SearchStatus::Success {
        return None;
    }
    let row = state.rows.get(index.checked_sub(1)?)?;
    Some(row.profile_url.clone())
}

pub const HELP: &str = "\
Type a name to search. Commands:
  :next, :n      next page
  :prev, :p      previous page
  :open N, :o N  open the profile in row N
  :clear, :c     clear the search
  :help, :h      show this help
  :quit, :q      exit";

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
