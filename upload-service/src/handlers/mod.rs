pub mod documents;
pub mod health;
pub mod history;

pub use documents::upload_document;
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use history::{delete_history, get_history, update_history};
