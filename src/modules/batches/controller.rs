use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{BatchView, CreateBatchDto, UpdateBatchDto};
use super::service::BatchService;

/// List batches with course, faculty and roster expanded
#[utoipa::path(
    get,
    path = "/api/batches",
    responses(
        (status = 200, description = "List of batches", body = Vec<BatchView>),
        (status = 401, description = "Missing token", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
#[instrument(skip(state))]
pub async fn get_batches(State(state): State<AppState>) -> Result<Json<Vec<BatchView>>, AppError> {
    let batches = BatchService::get_batches(&state.db).await?;
    Ok(Json(batches))
}

/// Get a batch by id
#[utoipa::path(
    get,
    path = "/api/batches/{id}",
    params(("id" = Uuid, Path, description = "Batch id")),
    responses(
        (status = 200, description = "Batch", body = BatchView),
        (status = 404, description = "Batch not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
#[instrument(skip(state))]
pub async fn get_batch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BatchView>, AppError> {
    let batch = BatchService::get_batch(&state.db, id).await?;
    Ok(Json(batch))
}

/// Create a batch
#[utoipa::path(
    post,
    path = "/api/batches",
    request_body = CreateBatchDto,
    responses(
        (status = 201, description = "Batch created", body = BatchView),
        (status = 400, description = "Batch code already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
#[instrument(skip(state, dto))]
pub async fn create_batch(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateBatchDto>,
) -> Result<(StatusCode, Json<BatchView>), AppError> {
    let batch = BatchService::create_batch(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(batch)))
}

/// Update a batch
#[utoipa::path(
    put,
    path = "/api/batches/{id}",
    params(("id" = Uuid, Path, description = "Batch id")),
    request_body = UpdateBatchDto,
    responses(
        (status = 200, description = "Batch updated", body = BatchView),
        (status = 400, description = "Batch code already exists", body = ErrorResponse),
        (status = 404, description = "Batch not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
#[instrument(skip(state, dto))]
pub async fn update_batch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateBatchDto>,
) -> Result<Json<BatchView>, AppError> {
    let batch = BatchService::update_batch(&state.db, id, dto).await?;
    Ok(Json(batch))
}

/// Delete a batch
#[utoipa::path(
    delete,
    path = "/api/batches/{id}",
    params(("id" = Uuid, Path, description = "Batch id")),
    responses(
        (status = 200, description = "Batch deleted", body = MessageResponse),
        (status = 404, description = "Batch not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
#[instrument(skip(state))]
pub async fn delete_batch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    BatchService::delete_batch(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Batch deleted successfully".to_string(),
    }))
}
