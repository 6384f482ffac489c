use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::middleware::auth::authenticate;
use crate::middleware::role::{require_admin, require_delete_users, require_write_users};
use crate::modules::users::controller::{
    create_user, delete_user, get_user, get_users, update_user,
};
use crate::state::AppState;

/// Every route requires a bearer token. Create, update and delete are further
/// gated by role or permission; the gate sits on the individual method.
pub fn init_users_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user", get(get_users))
        .route(
            "/user/admin",
            post(create_user).route_layer(middleware::from_fn(require_admin)),
        )
        .route(
            "/user/{id}",
            get(get_user)
                .merge(patch(update_user).route_layer(middleware::from_fn(require_write_users)))
                .merge(put(delete_user).route_layer(middleware::from_fn(require_delete_users))),
        )
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
