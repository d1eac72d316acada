//! Scripted `DirectorySearch` used by the controller and session tests.

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use shared::{
    domain::{AccountId, ResultRow, SearchRequest, SearchResult, DEFAULT_PAGE_SIZE},
    error::SearchError,
};
use tokio::sync::Mutex;

use crate::DirectorySearch;

#[derive(Debug, Clone)]
enum Script {
    Matches { total: u64, delay: Duration },
    Fail(SearchError),
}

#[derive(Default)]
pub(crate) struct ScriptedDirectory {
    scripts: HashMap<String, Script>,
    calls: Mutex<Vec<SearchRequest>>,
}

impl ScriptedDirectory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_matches(mut self, term: &str, total: u64) -> Self {
        self.scripts.insert(
            term.to_string(),
            Script::Matches {
                total,
                delay: Duration::ZERO,
            },
        );
        self
    }

    pub(crate) fn with_slow_matches(mut self, term: &str, total: u64, delay: Duration) -> Self {
        self.scripts
            .insert(term.to_string(), Script::Matches { total, delay });
        self
    }

    pub(crate) fn with_failure(mut self, term: &str, error: SearchError) -> Self {
        self.scripts.insert(term.to_string(), Script::Fail(error));
        self
    }

    pub(crate) async fn calls(&self) -> Vec<SearchRequest> {
        self.calls.lock().await.clone()
    }
}

/// Rows a real directory would return for `page` of a query with `total` matches.
pub(crate) fn rows_for(term: &str, page: u32, total: u64) -> Vec<ResultRow> {
    let page_size = u64::from(DEFAULT_PAGE_SIZE);
    let start = u64::from(page.saturating_sub(1)) * page_size;
    let end = total.min(start + page_size);
    (start..end)
        .map(|index| ResultRow {
            id: AccountId(index as i64),
            login: format!("{term}-{index}"),
            avatar_url: format!("https://avatars.example/u/{index}"),
            profile_url: format!("https://github.example/{term}-{index}"),
        })
        .collect()
}

#[async_trait]
impl DirectorySearch for ScriptedDirectory {
    async fn fetch_page(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        self.calls.lock().await.push(request.clone());

        let script = self.scripts.get(request.term.as_str()).cloned();
        match script {
            Some(Script::Matches { total, delay }) => {
                tokio::time::sleep(delay).await;
                Ok(SearchResult {
                    rows: rows_for(request.term.as_str(), request.page.get(), total),
                    total_count: total,
                })
            }
            Some(Script::Fail(error)) => Err(error),
            None => Ok(SearchResult::default()),
        }
    }
}
