use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Question Router Module
///
/// The five question-management endpoints, all nested under `/question` by
/// the caller (`create_router`) and wrapped in the auth middleware layer.
/// Every handler receives a validated `AuthUser`; ownership and role checks
/// (author-only edit, author-or-admin delete) happen inside the handlers,
/// where the target question is available.
pub fn question_routes() -> Router<AppState> {
    Router::new()
        // POST /question/create
        // Persists a new question owned by the caller; responds 201 with the
        // generated id.
        .route("/create", post(handlers::create_question))
        // GET /question/all
        // Lists every question as {id, content}, in creation order.
        .route("/all", get(handlers::get_all_questions))
        // PUT /question/edit/{question_id}
        // Replaces content in place. Author-only.
        .route("/edit/{question_id}", put(handlers::edit_question))
        // DELETE /question/delete/{question_id}
        // Permanent removal. Author or admin.
        .route("/delete/{question_id}", delete(handlers::delete_question))
        // GET /question/all/{user_id}
        // Lists the target user's questions; 404s on an unknown user.
        .route("/all/{user_id}", get(handlers::get_questions_by_user))
}
