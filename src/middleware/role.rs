//! Role allow-list enforcement.
//!
//! The seeded roles form three access tiers, declared here as constants and
//! wired to routes in `router.rs`:
//!
//! - [`ADMIN_ONLY`]: role and permission administration, user writes
//! - [`MANAGER_UP`]: user reads, domain-resource writes
//! - [`ALL_ROLES`]: domain-resource reads
//!
//! Every check resolves the caller's role with one query per request. There
//! is no caching and no claims embedding; this is a low-traffic admin tool.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub const ADMIN_ONLY: &[&str] = &["admin"];
pub const MANAGER_UP: &[&str] = &["admin", "manager"];
pub const ALL_ROLES: &[&str] = &["admin", "manager", "user"];

/// Resolves the caller's role name. `None` when the user no longer exists or
/// its role reference dangles.
async fn lookup_role_name(db: &PgPool, user_id: Uuid) -> Result<Option<String>, AppError> {
    let role_name = sqlx::query_scalar::<_, String>(
        "SELECT r.name FROM users u JOIN roles r ON r.id = u.role_id WHERE u.id = $1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .map_err(AppError::database)?;

    Ok(role_name)
}

/// Middleware body shared by the tier helpers: authenticate, load the role,
/// reject with 403 unless it is in `allowed_roles`.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &'static [&'static str],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    let user_id = auth_user.user_id()?;

    let role_name = lookup_role_name(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::forbidden(anyhow::anyhow!("Access denied")))?;

    if !allowed_roles.contains(&role_name.as_str()) {
        return Err(AppError::forbidden(anyhow::anyhow!("Access denied")));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Admin tier: roles, permissions, user writes.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, ADMIN_ONLY).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Manager tier and above: user reads, domain writes.
pub async fn require_manager(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, MANAGER_UP).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Any seeded role: domain reads.
pub async fn require_member(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, ALL_ROLES).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
