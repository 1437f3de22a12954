use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// A user's canonical identity record, stored in the `profiles` table.
/// Referenced by `Question.user_id`; resolved during authentication.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    // The RBAC field: 'user' or 'admin'.
    pub role: String,
}

/// Question
///
/// A question record from the `questions` table. The id is generated at
/// creation and never changes; `user_id` is the owning author, assigned at
/// creation and never reassigned. Edits touch only `content` and
/// `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Question {
    pub id: Uuid,
    // FK to profiles.id (the author).
    pub user_id: Uuid,
    pub content: String,

    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

// --- Request Payloads (Input Schemas) ---

/// CreateQuestionRequest
///
/// Input payload for POST /question/create.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateQuestionRequest {
    pub content: String,
}

/// EditQuestionRequest
///
/// Input payload for PUT /question/edit/{question_id}. The replacement
/// content; id and author are never part of the payload.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct EditQuestionRequest {
    pub content: String,
}

/// RegisterUserRequest
///
/// Input payload for POST /user/register. The role defaults to 'user' when
/// omitted; 'admin' accounts are expected to be provisioned explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RegisterUserRequest {
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "user".to_string()
}

// --- Response Payloads (Output Schemas) ---

/// QuestionStatusResponse
///
/// Output for the mutating question endpoints: the affected question id and
/// a fixed status marker ("QUESTION CREATED" / "QUESTION EDITED" /
/// "QUESTION DELETED").
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct QuestionStatusResponse {
    pub id: Uuid,
    pub status: String,
}

/// QuestionDetailsResponse
///
/// List item for GET /question/all and GET /question/all/{user_id}.
/// Deliberately thin: only the id and content cross the wire.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct QuestionDetailsResponse {
    pub id: Uuid,
    pub content: String,
}

impl From<Question> for QuestionDetailsResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            content: q.content,
        }
    }
}
