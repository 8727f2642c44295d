use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::models::Question;
use crate::interview::session::{not_found, Interview};
use crate::models::interview::InterviewRow;

/// Inserts a fresh, unfinished interview with its opening questions.
pub async fn create_interview(
    pool: &PgPool,
    role: &str,
    level: &str,
    questions: &[Question],
) -> Result<Interview, AppError> {
    let row = sqlx::query_as::<_, InterviewRow>(
        r#"
        INSERT INTO interviews (id, role, level, questions, answers, finished)
        VALUES ($1, $2, $3, $4, '[]'::jsonb, FALSE)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(role)
    .bind(level)
    .bind(Json(questions))
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

pub async fn get_interview(pool: &PgPool, id: Uuid) -> Result<Interview, AppError> {
    sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Interview::from)
        .ok_or_else(not_found)
}

/// Loads the interview under a row lock, applies `apply`, and writes the
/// document back in the same transaction. If `apply` fails nothing is written.
pub async fn modify_interview<T, F>(pool: &PgPool, id: Uuid, apply: F) -> Result<T, AppError>
where
    F: FnOnce(&mut Interview) -> Result<T, AppError>,
{
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(not_found)?;

    let mut interview = Interview::from(row);
    let out = apply(&mut interview)?;

    sqlx::query(
        r#"
        UPDATE interviews
        SET questions = $2, answers = $3, finished = $4, summary = $5, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(Json(&interview.questions))
    .bind(Json(&interview.answers))
    .bind(interview.finished)
    .bind(interview.summary.as_ref().map(Json))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    debug!(
        "Saved interview {id}: {} questions, {} answers, finished={}",
        interview.questions.len(),
        interview.answers.len(),
        interview.finished
    );

    Ok(out)
}
