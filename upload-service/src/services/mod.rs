pub mod metadata;
pub mod metrics;
pub mod storage;

pub use metadata::{MetadataStore, NoopMetadataStore};
pub use metrics::{get_metrics, init_metrics};
pub use storage::{LocalStorage, Storage};
