use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_permission, delete_permission, get_permission, get_permissions, update_permission,
};

pub fn init_permissions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_permissions).post(create_permission))
        .route(
            "/{id}",
            get(get_permission)
                .put(update_permission)
                .delete(delete_permission),
        )
}
