//! Wire shapes of the remote user search endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, ResultRow, SearchResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSearchResponse {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<UserSearchItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSearchItem {
    pub id: AccountId,
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

/// Body the service returns alongside non-success statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
}

impl From<UserSearchItem> for ResultRow {
    fn from(value: UserSearchItem) -> Self {
        Self {
            id: value.id,
            login: value.login,
            avatar_url: value.avatar_url,
            profile_url: value.html_url,
        }
    }
}

impl From<UserSearchResponse> for SearchResult {
    fn from(value: UserSearchResponse) -> Self {
        Self {
            rows: value.items.into_iter().map(ResultRow::from).collect(),
            total_count: value.total_count,
        }
    }
}
