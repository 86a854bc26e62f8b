pub mod documents;
pub mod history;

pub use documents::UploadResponse;
pub use history::{DeleteHistoryRequest, HistoryResponse, MessageResponse, UpdateHistoryRequest};
