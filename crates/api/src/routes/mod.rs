pub mod health;
pub mod posts;
pub mod uploads;

use axum::{middleware::from_fn_with_state, Router};
use tower_http::services::ServeDir;

use crate::middleware;
use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    let editor = Router::new()
        .merge(posts::editor_routes())
        .merge(uploads::routes())
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::auth::require_editor,
        ));

    Router::new()
        .merge(health::routes())
        .merge(posts::public_routes())
        .merge(editor)
        .nest_service(
            "/uploads",
            ServeDir::new(state.config().upload_dir.clone()),
        )
        .with_state(state)
}
