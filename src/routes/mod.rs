/// Router Module Index
///
/// Organizes routing into access-segregated modules so access control is
/// applied explicitly at the module level (via axum layers) rather than
/// per handler.
///
/// Routes accessible to any client (health probe, registration).
pub mod public;

/// The question-management surface, nested under `/question` and protected
/// by the `AuthUser` extractor middleware.
pub mod questions;
