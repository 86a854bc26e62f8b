use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const HISTORY_RETRIEVED_MESSAGE: &str = "History retrieved successfully.";
pub const HISTORY_UPDATED_MESSAGE: &str = "History updated successfully.";
pub const HISTORY_DELETED_MESSAGE: &str = "History deleted successfully.";

/// A history entry as submitted by the client. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateHistoryRequest {
    pub transcript: String,
    #[serde(rename = "summarizeDocs")]
    pub summarize_docs: String,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteHistoryRequest {
    pub documents: String,
}

/// Placeholder history listing; it does not reflect stored state.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub documents: String,
}

impl HistoryResponse {
    pub fn placeholder() -> Self {
        Self {
            documents: HISTORY_RETRIEVED_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
