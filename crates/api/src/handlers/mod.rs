//! HTTP handlers, one module per resource.

pub mod account;
pub mod analytics;
pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod deadlines;
pub mod reports;
pub mod risk;
pub mod subjects;
pub mod timetable;

use sqlx::PgPool;
use survivor_core::error::CoreError;
use survivor_core::types::DbId;
use survivor_db::models::subject::Subject;
use survivor_db::repositories::SubjectRepo;

use crate::error::{AppError, AppResult};

/// Load one of the user's subjects, or 404 (also for another user's subject).
pub(crate) async fn ensure_subject_owned(
    pool: &PgPool,
    user_id: DbId,
    subject_id: DbId,
) -> AppResult<Subject> {
    SubjectRepo::find_for_user(pool, user_id, subject_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id: subject_id,
        }))
}
