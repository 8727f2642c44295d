use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::interview::models::{AnswerRecord, InterviewSummary, Question};

#[derive(Debug, Clone, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub role: String,
    pub level: String,
    pub questions: Json<Vec<Question>>,
    pub answers: Json<Vec<AnswerRecord>>,
    pub finished: bool,
    pub summary: Option<Json<InterviewSummary>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
