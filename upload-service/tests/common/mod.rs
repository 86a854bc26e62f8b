#![allow(dead_code)]

use async_trait::async_trait;
use service_core::config::Config as CoreConfig;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use upload_service::config::{ObservabilityConfig, StorageConfig, UploadConfig};
use upload_service::services::{LocalStorage, MetadataStore, Storage};
use upload_service::startup::{AppState, Application};

/// Metadata store that remembers every name it was asked to record.
#[derive(Default)]
pub struct RecordingMetadataStore {
    names: Mutex<Vec<String>>,
}

impl RecordingMetadataStore {
    pub fn recorded(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataStore for RecordingMetadataStore {
    async fn record(&self, name: &str) -> anyhow::Result<()> {
        self.names.lock().unwrap().push(name.to_string());
        Ok(())
    }
}

pub struct FailingMetadataStore(pub &'static str);

#[async_trait]
impl MetadataStore for FailingMetadataStore {
    async fn record(&self, _name: &str) -> anyhow::Result<()> {
        Err(anyhow::anyhow!(self.0))
    }
}

pub struct FailingStorage(pub &'static str);

#[async_trait]
impl Storage for FailingStorage {
    async fn upload(&self, _key: &str, _data: Vec<u8>) -> anyhow::Result<()> {
        Err(anyhow::anyhow!(self.0))
    }

    async fn is_ready(&self) -> bool {
        false
    }
}

pub fn test_config(upload_dir: &std::path::Path) -> UploadConfig {
    UploadConfig {
        common: CoreConfig { port: 0 },
        storage: StorageConfig {
            upload_dir: upload_dir.to_string_lossy().into_owned(),
        },
        observability: ObservabilityConfig {
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub metadata: Arc<RecordingMetadataStore>,
    // Keeps the temporary upload directory alive for the test's duration.
    _storage_root: TempDir,
}

impl TestApp {
    /// Local storage in a fresh temporary directory, recording metadata store.
    pub async fn spawn() -> Self {
        let storage_root = tempfile::tempdir().expect("Failed to create temp dir");
        let upload_dir = storage_root.path().join("uploads");
        let metadata = Arc::new(RecordingMetadataStore::default());

        let app = Application::build(test_config(&upload_dir), metadata.clone())
            .await
            .expect("Failed to build test application");

        Self::start(app, upload_dir, metadata, storage_root).await
    }

    /// Local storage plus a caller-chosen metadata store.
    pub async fn spawn_with_metadata(metadata: Arc<dyn MetadataStore>) -> Self {
        let storage_root = tempfile::tempdir().expect("Failed to create temp dir");
        let upload_dir = storage_root.path().join("uploads");

        let app = Application::build(test_config(&upload_dir), metadata)
            .await
            .expect("Failed to build test application");

        Self::start(
            app,
            upload_dir,
            Arc::new(RecordingMetadataStore::default()),
            storage_root,
        )
        .await
    }

    /// Caller-chosen storage with a recording metadata store.
    pub async fn spawn_with_storage(storage: Arc<dyn Storage>) -> Self {
        let storage_root = tempfile::tempdir().expect("Failed to create temp dir");
        let upload_dir = storage_root.path().join("uploads");
        let metadata = Arc::new(RecordingMetadataStore::default());

        let state = AppState {
            config: test_config(&upload_dir),
            storage,
            metadata: metadata.clone(),
        };
        let app = Application::from_state(state)
            .await
            .expect("Failed to build test application");

        Self::start(app, upload_dir, metadata, storage_root).await
    }

    async fn start(
        app: Application,
        upload_dir: PathBuf,
        metadata: Arc<RecordingMetadataStore>,
        storage_root: TempDir,
    ) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to answer the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            upload_dir,
            metadata,
            _storage_root: storage_root,
        }
    }

    pub async fn upload(&self, filename: &str, data: Vec<u8>) -> reqwest::Response {
        let form = reqwest::multipart::Form::new().part(
            "file",
            reqwest::multipart::Part::bytes(data)
                .file_name(filename.to_string())
                .mime_str("application/octet-stream")
                .unwrap(),
        );

        reqwest::Client::new()
            .post(format!("{}/upload-document", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// State backed by a local storage directory, for router-level tests.
pub async fn local_state(upload_dir: &std::path::Path) -> (AppState, Arc<RecordingMetadataStore>) {
    let metadata = Arc::new(RecordingMetadataStore::default());
    let storage = LocalStorage::new(upload_dir)
        .await
        .expect("Failed to create local storage");
    let state = AppState {
        config: test_config(upload_dir),
        storage: Arc::new(storage),
        metadata: metadata.clone(),
    };
    (state, metadata)
}

pub const BOUNDARY: &str = "upload-service-test-boundary";

/// Hand-built single-part multipart body, for filenames an HTTP client would escape.
pub fn multipart_body(field_name: &str, filename: Option<&str>, data: &[u8]) -> Vec<u8> {
    let disposition = match filename {
        Some(name) => format!("form-data; name=\"{}\"; filename=\"{}\"", field_name, name),
        None => format!("form-data; name=\"{}\"", field_name),
    };

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(format!("Content-Disposition: {}\r\n", disposition).as_bytes());
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}
