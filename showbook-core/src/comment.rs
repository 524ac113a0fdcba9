//! Event comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ANONYMOUS: &str = "Anonymous";
pub const MAX_COMMENT_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub event_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub author_name: String,
    pub content: String,
    pub posted_at: DateTime<Utc>,
}

impl Comment {
    pub fn author(&self) -> &str {
        if self.author_name.trim().is_empty() {
            ANONYMOUS
        } else {
            &self.author_name
        }
    }
}
