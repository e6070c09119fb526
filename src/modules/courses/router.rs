use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::role::{require_manager, require_member};
use crate::state::AppState;

use super::controller::{create_course, delete_course, get_course, get_courses, update_course};

pub fn init_courses_router(state: AppState) -> Router<AppState> {
    let read = Router::new()
        .route("/", get(get_courses))
        .route("/{id}", get(get_course))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_member));

    let write = Router::new()
        .route("/", post(create_course))
        .route("/{id}", put(update_course).delete(delete_course))
        .route_layer(middleware::from_fn_with_state(state, require_manager));

    read.merge(write)
}
