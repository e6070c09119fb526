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

use super::model::{CreateFacultyDto, FacultyView, UpdateFacultyDto};
use super::service::FacultyService;

/// List faculties
#[utoipa::path(
    get,
    path = "/api/faculties",
    responses(
        (status = 200, description = "List of faculties", body = Vec<FacultyView>),
        (status = 401, description = "Missing token", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Faculties"
)]
#[instrument(skip(state))]
pub async fn get_faculties(
    State(state): State<AppState>,
) -> Result<Json<Vec<FacultyView>>, AppError> {
    let faculties = FacultyService::get_faculties(&state.db).await?;
    Ok(Json(faculties))
}

/// Get a faculty by id
#[utoipa::path(
    get,
    path = "/api/faculties/{id}",
    params(("id" = Uuid, Path, description = "Faculty id")),
    responses(
        (status = 200, description = "Faculty", body = FacultyView),
        (status = 404, description = "Faculty not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Faculties"
)]
#[instrument(skip(state))]
pub async fn get_faculty(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FacultyView>, AppError> {
    let faculty = FacultyService::get_faculty(&state.db, id).await?;
    Ok(Json(faculty))
}

/// Create a faculty
#[utoipa::path(
    post,
    path = "/api/faculties",
    request_body = CreateFacultyDto,
    responses(
        (status = 201, description = "Faculty created", body = FacultyView),
        (status = 400, description = "Duplicate faculty code or email", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Faculties"
)]
#[instrument(skip(state, dto))]
pub async fn create_faculty(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateFacultyDto>,
) -> Result<(StatusCode, Json<FacultyView>), AppError> {
    let faculty = FacultyService::create_faculty(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(faculty)))
}

/// Update a faculty
#[utoipa::path(
    put,
    path = "/api/faculties/{id}",
    params(("id" = Uuid, Path, description = "Faculty id")),
    request_body = UpdateFacultyDto,
    responses(
        (status = 200, description = "Faculty updated", body = FacultyView),
        (status = 400, description = "Duplicate faculty code or email", body = ErrorResponse),
        (status = 404, description = "Faculty not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Faculties"
)]
#[instrument(skip(state, dto))]
pub async fn update_faculty(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateFacultyDto>,
) -> Result<Json<FacultyView>, AppError> {
    let faculty = FacultyService::update_faculty(&state.db, id, dto).await?;
    Ok(Json(faculty))
}

/// Delete a faculty
#[utoipa::path(
    delete,
    path = "/api/faculties/{id}",
    params(("id" = Uuid, Path, description = "Faculty id")),
    responses(
        (status = 200, description = "Faculty deleted", body = MessageResponse),
        (status = 404, description = "Faculty not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Faculties"
)]
#[instrument(skip(state))]
pub async fn delete_faculty(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    FacultyService::delete_faculty(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Faculty deleted successfully".to_string(),
    }))
}
