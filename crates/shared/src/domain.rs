use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(AccountId);

/// Fixed number of rows the directory returns per page.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// The directory only serves this many matches for any single query.
pub const DEFAULT_RESULT_CAP: u64 = 1000;

pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data. Please try again.";

/// User-entered search text, kept verbatim; blankness is judged on the trimmed value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for SearchTerm {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SearchTerm {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 1-based page cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageNumber(u32);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    /// Returns `None` for zero, which is not a valid page.
    pub fn new(value: u32) -> Option<Self> {
        (value >= 1).then_some(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Moves the cursor one step, or `None` when that leaves `1..=total_pages`.
    pub fn step(self, direction: PageDirection, total_pages: u32) -> Option<Self> {
        let target = i64::from(self.0) + direction.delta();
        if target < 1 || target > i64::from(total_pages) {
            return None;
        }
        u32::try_from(target).ok().map(Self)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageDirection {
    Previous,
    Next,
}

impl PageDirection {
    pub fn delta(self) -> i64 {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub term: SearchTerm,
    pub page: PageNumber,
}

impl SearchRequest {
    pub fn new(term: SearchTerm, page: PageNumber) -> Self {
        Self { term, page }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub id: AccountId,
    pub login: String,
    pub avatar_url: String,
    pub profile_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub rows: Vec<ResultRow>,
    pub total_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message", rename_all = "snake_case")]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Empty,
    Error(String),
}

/// Snapshot of one search session, as rendered by the view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub term: SearchTerm,
    pub page: PageNumber,
    pub total_pages: u32,
    pub rows: Vec<ResultRow>,
    pub status: SearchStatus,
}

impl SearchState {
    pub fn has_previous_page(&self) -> bool {
        self.page.get() > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page.get() < self.total_pages
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            SearchStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Pages needed to show `total_count` matches, bounded by what the directory will serve.
pub fn total_pages(total_count: u64, page_size: u32, result_cap: u64) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let reachable = total_count.min(result_cap);
    let pages = reachable.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
