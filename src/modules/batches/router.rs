use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::role::{require_manager, require_member};
use crate::state::AppState;

use super::controller::{create_batch, delete_batch, get_batch, get_batches, update_batch};

pub fn init_batches_router(state: AppState) -> Router<AppState> {
    let read = Router::new()
        .route("/", get(get_batches))
        .route("/{id}", get(get_batch))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_member));

    let write = Router::new()
        .route("/", post(create_batch))
        .route("/{id}", put(update_batch).delete(delete_batch))
        .route_layer(middleware::from_fn_with_state(state, require_manager));

    read.merge(write)
}
