use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::role::{require_manager, require_member};
use crate::state::AppState;

use super::controller::{
    create_faculty, delete_faculty, get_faculties, get_faculty, update_faculty,
};

pub fn init_faculties_router(state: AppState) -> Router<AppState> {
    let read = Router::new()
        .route("/", get(get_faculties))
        .route("/{id}", get(get_faculty))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_member));

    let write = Router::new()
        .route("/", post(create_faculty))
        .route("/{id}", put(update_faculty).delete(delete_faculty))
        .route_layer(middleware::from_fn_with_state(state, require_manager));

    read.merge(write)
}
