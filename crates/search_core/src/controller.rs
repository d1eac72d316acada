//! Search state machine. The controller is the only writer of `SearchState`.

use std::{sync::Arc, time::Duration};

use shared::{
    domain::{
        total_pages, PageDirection, PageNumber, SearchRequest, SearchResult, SearchState,
        SearchStatus, SearchTerm, DEFAULT_PAGE_SIZE, DEFAULT_RESULT_CAP, FETCH_ERROR_MESSAGE,
    },
    error::SearchError,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::{
    debouncer::{DebouncedTrigger, QueryDebouncer, DEFAULT_DEBOUNCE},
    DirectorySearch,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    pub debounce: Duration,
    pub page_size: u32,
    pub result_cap: u64,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            page_size: DEFAULT_PAGE_SIZE,
            result_cap: DEFAULT_RESULT_CAP,
        }
    }
}

/// Work posted back to the controller by its timer and fetch tasks.
#[derive(Debug)]
pub enum ControllerEvent {
    DebounceElapsed(DebouncedTrigger),
    SearchCompleted {
        sequence: u64,
        request: SearchRequest,
        outcome: Result<SearchResult, SearchError>,
    },
}

pub struct SearchController {
    state: SearchState,
    debouncer: QueryDebouncer,
    directory: Arc<dyn DirectorySearch>,
    events: UnboundedSender<ControllerEvent>,
    /// Identifies the latest issued request; completions carrying any other value are stale.
    sequence: u64,
    settings: ControllerSettings,
}

impl SearchController {
    pub fn new(
        directory: Arc<dyn DirectorySearch>,
        settings: ControllerSettings,
        events: UnboundedSender<ControllerEvent>,
    ) -> Self {
        Self {
            state: SearchState::default(),
            debouncer: QueryDebouncer::new(settings.debounce),
            directory,
            events,
            sequence: 0,
            settings,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn handle(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::DebounceElapsed(trigger) => self.on_debounced_trigger(trigger),
            ControllerEvent::SearchCompleted {
                sequence,
                request,
                outcome,
            } => self.on_search_completed(sequence, request, outcome),
        }
    }

    pub fn on_term_changed(&mut self, new_term: SearchTerm) {
        self.state.term = new_term;
        self.state.page = PageNumber::FIRST;
        self.state.total_pages = 0;
        // Whatever is in flight belongs to the previous term.
        self.supersede_in_flight();

        if self.state.term.is_blank() {
            self.debouncer.cancel();
            self.clear_results();
            return;
        }

        // A search is now pending; Idle is reserved for a blank term.
        self.state.status = SearchStatus::Loading;
        let events = self.events.clone();
        self.debouncer.on_input(self.state.term.clone(), move |trigger| {
            let ticket = trigger.ticket;
            if events.send(ControllerEvent::DebounceElapsed(trigger)).is_err() {
                debug!(ticket, "debounce elapsed after session ended");
            }
        });
    }

    pub fn on_debounced_trigger(&mut self, trigger: DebouncedTrigger) {
        if !self.debouncer.accept(trigger.ticket) || trigger.term != self.state.term {
            debug!(term = %trigger.term, ticket = trigger.ticket, "dropping stale debounce trigger");
            return;
        }

        if trigger.term.is_blank() {
            self.clear_results();
            return;
        }

        self.run_search(trigger.term, PageNumber::FIRST);
    }

    /// Moves one page in `direction`. Requests outside `1..=total_pages` are ignored.
    pub fn on_page_change_requested(&mut self, direction: PageDirection) {
        if self.state.term.is_blank() {
            debug!(?direction, "ignoring page change without a search term");
            return;
        }

        let Some(target) = self.state.page.step(direction, self.state.total_pages) else {
            debug!(
                ?direction,
                page = %self.state.page,
                total_pages = self.state.total_pages,
                "ignoring out-of-range page change"
            );
            return;
        };

        self.run_search(self.state.term.clone(), target);
    }

    pub fn shutdown(&mut self) {
        self.debouncer.cancel();
        self.supersede_in_flight();
    }

    fn run_search(&mut self, term: SearchTerm, page: PageNumber) {
        self.sequence += 1;
        let sequence = self.sequence;
        self.state.page = page;
        self.state.status = SearchStatus::Loading;

        let request = SearchRequest::new(term, page);
        info!(term = %request.term, page = %request.page, sequence, "issuing search");

        let directory = Arc::clone(&self.directory);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = directory.fetch_page(&request).await;
            let completed = ControllerEvent::SearchCompleted {
                sequence,
                request,
                outcome,
            };
            if events.send(completed).is_err() {
                debug!(sequence, "search completed after session ended");
            }
        });
    }

    pub fn on_search_completed(
        &mut self,
        sequence: u64,
        request: SearchRequest,
        outcome: Result<SearchResult, SearchError>,
    ) {
        if sequence != self.sequence {
            debug!(
                sequence,
                latest = self.sequence,
                term = %request.term,
                page = %request.page,
                "dropping superseded search result"
            );
            return;
        }

        match outcome {
            Ok(result) => {
                self.state.total_pages = total_pages(
                    result.total_count,
                    self.settings.page_size,
                    self.settings.result_cap,
                );
                self.state.status = if result.rows.is_empty() {
                    SearchStatus::Empty
                } else {
                    SearchStatus::Success
                };
                self.state.rows = result.rows;
            }
            Err(error) => {
                warn!(
                    kind = ?error.kind(),
                    %error,
                    term = %request.term,
                    page = %request.page,
                    "search request failed"
                );
                self.state.rows.clear();
                self.state.status = SearchStatus::Error(FETCH_ERROR_MESSAGE.to_string());
            }
        }
    }

    fn supersede_in_flight(&mut self) {
        self.sequence += 1;
    }

    fn clear_results(&mut self) {
        self.state.rows.clear();
        self.state.total_pages = 0;
        self.state.status = SearchStatus::Idle;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
