use serde::{Deserialize, Serialize};

use crate::models::analytics::CursorStatistics;
use crate::models::assessment::{AssessmentRecord, ResponseTiming};

/// One row of the listing endpoint. Deliberately lightweight: no cursor
/// samples, just the headline numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub filename: String,
    pub user_id: String,
    pub user_name: String,
    pub email_id: String,
    pub timestamp: String,
    pub answered_questions: usize,
    pub total_questions: usize,
    pub total_time_minutes: String,
    pub average_time_per_question: String,
    pub total_cursor_movements: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAssessmentsResponse {
    pub count: usize,
    pub assessments: Vec<AssessmentSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skipped_files: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: String,
    pub user_name: String,
    pub email_id: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionStats {
    pub total_questions: usize,
    pub answered_questions: usize,
    pub completion_rate: String,
}

/// Server-derived timing block: totals recomputed from the stored timing
/// records, not echoed from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingBlock {
    pub total_time_ms: i64,
    pub total_time_seconds: String,
    pub total_time_minutes: String,
    pub average_time_per_question_seconds: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorActivity {
    pub total_movements: usize,
    pub has_movement_data: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDetail {
    pub question_id: String,
    pub selected_option: String,
    pub response_speed: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<ResponseTiming>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor_activity: Option<CursorActivity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub user_info: UserInfo,
    pub completion: CompletionStats,
    pub timing: TimingBlock,
    pub cursor_tracking: CursorStatistics,
    pub question_details: Vec<QuestionDetail>,
}

impl From<&AssessmentRecord> for UserInfo {
    fn from(record: &AssessmentRecord) -> Self {
        Self {
            user_id: record.user_id.clone(),
            user_name: record.user_name.clone(),
            email_id: record.email_id.clone(),
            timestamp: record.timestamp.clone(),
        }
    }
}
