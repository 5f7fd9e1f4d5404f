use axum::routing::{delete, get, patch};
use axum::Router;
use todolist_core::repository::Repository;

use crate::handlers;
use crate::state::AppState;

/// Build the full application router over any storage backend.
pub fn app<R: Repository + 'static>(state: AppState<R>) -> Router {
    Router::new()
        .route(
            "/tasks",
            get(handlers::list_tasks::<R>).post(handlers::create_task::<R>),
        )
        .route("/tasks/stats", get(handlers::task_statistics::<R>))
        .route(
            "/tasks/{id}",
            get(handlers::get_task::<R>)
                .patch(handlers::update_task::<R>)
                .delete(handlers::delete_task::<R>),
        )
        .route("/tasks/{id}/complete", patch(handlers::complete_task::<R>))
        .route("/categories", get(handlers::list_categories::<R>))
        .route("/categories/{id}", delete(handlers::delete_category::<R>))
        .with_state(state)
}
