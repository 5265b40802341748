pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::enhance;
use crate::state::AppState;
use crate::storage;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_handler))
        .route("/ai-enhance", post(enhance::handle_enhance))
        .route("/save-resume", post(storage::handle_save))
        .route("/resumes", get(storage::handle_list))
        .route(
            "/resume/:id",
            get(storage::handle_get).delete(storage::handle_delete),
        )
        .with_state(state)
}
