//! Application route table.
//!
//! This is the single place mapping resources to access tiers: roles and
//! permissions sit behind the admin tier wholesale, users and the domain
//! resources split reads and writes inside their module routers, login is
//! public and the dashboard needs only a valid token.

use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::role::require_admin;
use crate::modules::auth::router::init_auth_router;
use crate::modules::batches::router::init_batches_router;
use crate::modules::courses::router::init_courses_router;
use crate::modules::dashboard::router::init_dashboard_router;
use crate::modules::faculties::router::init_faculties_router;
use crate::modules::permissions::router::init_permissions_router;
use crate::modules::roles::router::init_roles_router;
use crate::modules::students::router::init_students_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .merge(init_auth_router())
                .nest("/dashboard", init_dashboard_router())
                .nest("/users", init_users_router(state.clone()))
                .nest(
                    "/roles",
                    init_roles_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
                )
                .nest(
                    "/permissions",
                    init_permissions_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
                )
                .nest("/courses", init_courses_router(state.clone()))
                .nest("/students", init_students_router(state.clone()))
                .nest("/faculties", init_faculties_router(state.clone()))
                .nest("/batches", init_batches_router(state.clone())),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
