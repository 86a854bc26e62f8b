use crate::dtos::UploadResponse;
use crate::services::metrics::{record_upload_failure, record_upload_success};
use crate::startup::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use service_core::error::AppError;
use std::path::{Component, Path};

/// Multipart part that carries the uploaded file.
pub const FILE_FIELD: &str = "file";

const NO_FILE_MESSAGE: &str = "No file uploaded.";

fn no_file() -> AppError {
    AppError::MissingInput(anyhow::anyhow!(NO_FILE_MESSAGE))
}

pub async fn upload_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "Upload request is not multipart");
        no_file()
    })?;

    let (filename, data) = read_file_field(&mut multipart).await?;
    validate_filename(&filename)?;

    let size = data.len();
    tracing::info!(filename = %filename, size, "Document upload started");

    if let Err(e) = state.storage.upload(&filename, data).await {
        let detail = format!("{:#}", e);
        tracing::error!(filename = %filename, error = %detail, "Failed to store document");
        record_upload_failure("storage");
        return Err(AppError::StorageFailure(e));
    }

    // A metadata failure leaves the written file in place.
    state.metadata.record(&filename).await.map_err(|e| {
        let detail = format!("{:#}", e);
        tracing::error!(
            filename = %filename,
            error = %detail,
            "Failed to record document metadata; stored file left in place"
        );
        record_upload_failure("metadata");
        AppError::StorageFailure(e.context(format!("Failed to record metadata for {}", filename)))
    })?;

    record_upload_success();
    tracing::info!(filename = %filename, "Document upload completed successfully");

    Ok(Json(UploadResponse::uploaded(filename)))
}

/// Find the `file` part and return its filename and bytes.
///
/// A part without a filename or without content counts as no file at all,
/// as does a body in which not even a first part can be found.
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>), AppError> {
    let mut first = true;
    loop {
        let next = multipart.next_field().await;
        let field = match next {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) if first => {
                tracing::debug!(error = %e, "Multipart body holds no parts");
                return Err(no_file());
            }
            Err(e) => {
                return Err(AppError::InvalidInput(anyhow::anyhow!(
                    "Failed to read multipart field: {}",
                    e
                )))
            }
        };
        first = false;

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(no_file)?;

        let data = field.bytes().await.map_err(|e| {
            AppError::InvalidInput(anyhow::anyhow!("Failed to read file bytes: {}", e))
        })?;

        if data.is_empty() {
            return Err(no_file());
        }

        return Ok((filename, data.to_vec()));
    }

    Err(no_file())
}

/// Accept only a single plain path component so uploads stay inside the
/// upload directory.
fn validate_filename(name: &str) -> Result<(), AppError> {
    let mut components = Path::new(name).components();
    let is_plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(c)), None) if c == name
    );

    if !is_plain || name.contains(['/', '\\', '\0']) {
        return Err(AppError::InvalidInput(anyhow::anyhow!(
            "Invalid filename {:?}: must be a plain file name without path separators",
            name
        )));
    }
    Ok(())
}
