use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::analytics::CursorStatistics;

/// One pointer observation captured while a question was on screen.
/// Insertion order is chronological; timestamps are not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorSample {
    pub x: f64,
    pub y: f64,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorTrack {
    pub movements: Vec<CursorSample>,
    pub total_movements: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_movement: Option<CursorSample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_movement: Option<CursorSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseTiming {
    pub response_time_ms: i64,
    pub response_time_seconds: String,
    pub selected_option: String,
    pub timestamp: String,
}

/// Totals the front-end computed for its own display. Stored verbatim;
/// the server derives its own cursor statistics independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionAnalytics {
    pub total_time_ms: i64,
    pub total_time_seconds: String,
    pub total_time_minutes: String,
    pub average_time_per_question_seconds: String,
    pub total_cursor_movements: u64,
}

/// The persisted document, one JSON file per submission. Written once at
/// submit time and never mutated. Field names are the on-disk contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub user_id: String,
    pub user_name: String,
    pub email_id: String,
    pub phone_number: String,
    pub timestamp: String,
    pub responses: IndexMap<String, String>,
    pub response_timings: IndexMap<String, ResponseTiming>,
    pub cursor_movements: IndexMap<String, CursorTrack>,
    pub total_questions: usize,
    pub answered_questions: usize,
    pub analytics: SubmissionAnalytics,
    pub cursor_statistics: CursorStatistics,
}
