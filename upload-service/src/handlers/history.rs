//! History endpoints. History is not persisted anywhere yet, so every
//! operation answers with a fixed acknowledgement.

use crate::dtos::history::{HISTORY_DELETED_MESSAGE, HISTORY_UPDATED_MESSAGE};
use crate::dtos::{DeleteHistoryRequest, HistoryResponse, MessageResponse, UpdateHistoryRequest};
use crate::extractors::AppJson;
use axum::Json;

pub async fn get_history() -> Json<HistoryResponse> {
    Json(HistoryResponse::placeholder())
}

pub async fn update_history(
    AppJson(request): AppJson<UpdateHistoryRequest>,
) -> Json<MessageResponse> {
    tracing::debug!(
        date = %request.date,
        transcript_len = request.transcript.len(),
        summary_len = request.summarize_docs.len(),
        "History update acknowledged"
    );
    Json(MessageResponse::new(HISTORY_UPDATED_MESSAGE))
}

pub async fn delete_history(
    AppJson(request): AppJson<DeleteHistoryRequest>,
) -> Json<MessageResponse> {
    tracing::debug!(documents = %request.documents, "History deletion acknowledged");
    Json(MessageResponse::new(HISTORY_DELETED_MESSAGE))
}
