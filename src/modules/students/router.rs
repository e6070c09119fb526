use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::role::{require_manager, require_member};
use crate::state::AppState;

use super::controller::{create_student, delete_student, get_student, get_students, update_student};

pub fn init_students_router(state: AppState) -> Router<AppState> {
    let read = Router::new()
        .route("/", get(get_students))
        .route("/{id}", get(get_student))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_member));

    let write = Router::new()
        .route("/", post(create_student))
        .route("/{id}", put(update_student).delete(delete_student))
        .route_layer(middleware::from_fn_with_state(state, require_manager));

    read.merge(write)
}
