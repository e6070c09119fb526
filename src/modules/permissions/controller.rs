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

use super::model::{CreatePermissionDto, Permission, UpdatePermissionDto};
use super::service::PermissionService;

/// List the permission catalog
#[utoipa::path(
    get,
    path = "/api/permissions",
    responses(
        (status = 200, description = "List of permissions", body = Vec<Permission>),
        (status = 401, description = "Missing token", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Permissions"
)]
#[instrument(skip(state))]
pub async fn get_permissions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Permission>>, AppError> {
    let permissions = PermissionService::get_permissions(&state.db).await?;
    Ok(Json(permissions))
}

/// Get a permission by id
#[utoipa::path(
    get,
    path = "/api/permissions/{id}",
    params(("id" = Uuid, Path, description = "Permission id")),
    responses(
        (status = 200, description = "Permission", body = Permission),
        (status = 404, description = "Permission not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Permissions"
)]
#[instrument(skip(state))]
pub async fn get_permission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Permission>, AppError> {
    let permission = PermissionService::get_permission(&state.db, id).await?;
    Ok(Json(permission))
}

/// Create a permission
#[utoipa::path(
    post,
    path = "/api/permissions",
    request_body = CreatePermissionDto,
    responses(
        (status = 201, description = "Permission created", body = Permission),
        (status = 400, description = "Permission name already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Permissions"
)]
#[instrument(skip(state, dto))]
pub async fn create_permission(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreatePermissionDto>,
) -> Result<(StatusCode, Json<Permission>), AppError> {
    let permission = PermissionService::create_permission(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(permission)))
}

/// Update a permission
#[utoipa::path(
    put,
    path = "/api/permissions/{id}",
    params(("id" = Uuid, Path, description = "Permission id")),
    request_body = UpdatePermissionDto,
    responses(
        (status = 200, description = "Permission updated", body = Permission),
        (status = 400, description = "Permission name already exists", body = ErrorResponse),
        (status = 404, description = "Permission not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Permissions"
)]
#[instrument(skip(state, dto))]
pub async fn update_permission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdatePermissionDto>,
) -> Result<Json<Permission>, AppError> {
    let permission = PermissionService::update_permission(&state.db, id, dto).await?;
    Ok(Json(permission))
}

/// Delete a permission
#[utoipa::path(
    delete,
    path = "/api/permissions/{id}",
    params(("id" = Uuid, Path, description = "Permission id")),
    responses(
        (status = 200, description = "Permission deleted", body = MessageResponse),
        (status = 404, description = "Permission not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Permissions"
)]
#[instrument(skip(state))]
pub async fn delete_permission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    PermissionService::delete_permission(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Permission deleted successfully".to_string(),
    }))
}
