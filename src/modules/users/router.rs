use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::{require_admin, require_manager};
use crate::state::AppState;

use super::controller::{
    create_user, delete_user, get_user, get_user_roles, get_users, update_user,
};

/// Reads are open to the manager tier, writes (and the role-option lookup for
/// the user form) to admins only.
pub fn init_users_router(state: AppState) -> Router<AppState> {
    let read = Router::new()
        .route("/", get(get_users))
        .route("/{id}", get(get_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_manager));

    let write = Router::new()
        .route("/", post(create_user))
        .route("/roles", get(get_user_roles))
        .route("/{id}", axum::routing::put(update_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    read.merge(write)
}
