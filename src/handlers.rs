use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{
        CreateQuestionRequest, EditQuestionRequest, Question, QuestionDetailsResponse,
        QuestionStatusResponse, RegisterUserRequest, User,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

// Status markers carried by every mutating response.
pub const STATUS_CREATED: &str = "QUESTION CREATED";
pub const STATUS_EDITED: &str = "QUESTION EDITED";
pub const STATUS_DELETED: &str = "QUESTION DELETED";

fn to_details(questions: Vec<Question>) -> Vec<QuestionDetailsResponse> {
    questions.into_iter().map(Into::into).collect()
}

// --- Handlers ---

/// create_question
///
/// [Authenticated] Persists a new question owned by the caller. The id and
/// timestamps are generated server-side; the caller only supplies content.
#[utoipa::path(
    post,
    path = "/question/create",
    request_body = CreateQuestionRequest,
    responses(
        (status = 201, description = "Question created", body = QuestionStatusResponse),
        (status = 400, description = "Empty content"),
        (status = 401, description = "Authorization failed")
    )
)]
pub async fn create_question(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<QuestionStatusResponse>), ApiError> {
    if payload.content.trim().is_empty() {
        return Err(ApiError::EmptyContent);
    }

    let question = state.repo.create_question(user_id, &payload.content).await?;

    Ok((
        StatusCode::CREATED,
        Json(QuestionStatusResponse {
            id: question.id,
            status: STATUS_CREATED.to_string(),
        }),
    ))
}

/// get_all_questions
///
/// [Authenticated] Lists every question in the system as `{id, content}`
/// pairs, in creation order. The list may be empty.
#[utoipa::path(
    get,
    path = "/question/all",
    responses(
        (status = 200, description = "All questions", body = [QuestionDetailsResponse]),
        (status = 401, description = "Authorization failed")
    )
)]
pub async fn get_all_questions(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<QuestionDetailsResponse>>, ApiError> {
    let questions = state.repo.get_all_questions().await?;
    Ok(Json(to_details(questions)))
}

/// edit_question
///
/// [Authenticated] Replaces the content of an existing question in place.
/// Only the owning author may edit; there is no admin override here. Id and
/// author survive the edit unchanged.
#[utoipa::path(
    put,
    path = "/question/edit/{question_id}",
    params(("question_id" = Uuid, Path, description = "Question ID")),
    request_body = EditQuestionRequest,
    responses(
        (status = 200, description = "Question edited", body = QuestionStatusResponse),
        (status = 403, description = "Caller is not the author"),
        (status = 404, description = "Unknown question id")
    )
)]
pub async fn edit_question(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Json(payload): Json<EditQuestionRequest>,
) -> Result<Json<QuestionStatusResponse>, ApiError> {
    // The target is resolved before the payload is validated, so an unknown
    // id reports 404 even when the replacement content is also bad.
    let question = state
        .repo
        .get_question(question_id)
        .await?
        .ok_or(ApiError::QuestionNotFound)?;

    if question.user_id != user_id {
        return Err(ApiError::PermissionDenied(
            "only the question owner can edit the question",
        ));
    }

    if payload.content.trim().is_empty() {
        return Err(ApiError::EmptyContent);
    }

    // The row can vanish between the ownership read and the update; treat
    // that the same as an unknown id.
    let updated = state
        .repo
        .update_question_content(question_id, &payload.content)
        .await?
        .ok_or(ApiError::QuestionNotFound)?;

    Ok(Json(QuestionStatusResponse {
        id: updated.id,
        status: STATUS_EDITED.to_string(),
    }))
}

/// delete_question
///
/// [Authenticated] Removes a question permanently. Allowed for the owning
/// author and for admins (moderation override).
#[utoipa::path(
    delete,
    path = "/question/delete/{question_id}",
    params(("question_id" = Uuid, Path, description = "Question ID")),
    responses(
        (status = 200, description = "Question deleted", body = QuestionStatusResponse),
        (status = 403, description = "Caller is neither the author nor an admin"),
        (status = 404, description = "Unknown question id")
    )
)]
pub async fn delete_question(
    AuthUser { id: user_id, role }: AuthUser,
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
) -> Result<Json<QuestionStatusResponse>, ApiError> {
    let question = state
        .repo
        .get_question(question_id)
        .await?
        .ok_or(ApiError::QuestionNotFound)?;

    if question.user_id != user_id && role != "admin" {
        return Err(ApiError::PermissionDenied(
            "only the question owner or an admin can delete the question",
        ));
    }

    if !state.repo.delete_question(question_id).await? {
        return Err(ApiError::QuestionNotFound);
    }

    Ok(Json(QuestionStatusResponse {
        id: question_id,
        status: STATUS_DELETED.to_string(),
    }))
}

/// get_questions_by_user
///
/// [Authenticated] Lists every question authored by the target user. The
/// target must exist; an unknown user id is distinct from a user with no
/// questions (which yields an empty list).
#[utoipa::path(
    get,
    path = "/question/all/{user_id}",
    params(("user_id" = Uuid, Path, description = "Author user ID")),
    responses(
        (status = 200, description = "The user's questions", body = [QuestionDetailsResponse]),
        (status = 404, description = "Unknown user id")
    )
)]
pub async fn get_questions_by_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<QuestionDetailsResponse>>, ApiError> {
    state
        .repo
        .get_user(user_id)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    let questions = state.repo.get_questions_by_user(user_id).await?;
    Ok(Json(to_details(questions)))
}

/// register_user
///
/// [Public] Creates a profile row with a fresh id and returns it. Token
/// issuance stays with the external identity layer; this endpoint only
/// mints the local identity questions are authored against.
#[utoipa::path(
    post,
    path = "/user/register",
    request_body = RegisterUserRequest,
    responses((status = 201, description = "Registered", body = User))
)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.repo.create_user(&payload.email, &payload.role).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
