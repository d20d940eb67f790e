use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::assessment::{
    AssessmentRecord, CursorTrack, ResponseTiming, SubmissionAnalytics,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssessmentSubmission {
    #[validate(length(min = 1, max = 200))]
    pub user_name: String,
    #[validate(email)]
    pub email_id: String,
    #[validate(length(min = 3, max = 32))]
    pub phone_number: String,
    pub responses: IndexMap<String, String>,
    #[serde(default)]
    pub response_timings: IndexMap<String, ResponseTiming>,
    #[serde(default)]
    pub cursor_movements: IndexMap<String, CursorTrack>,
    pub total_questions: usize,
    pub analytics: SubmissionAnalytics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAssessmentResponse {
    pub success: bool,
    pub message: String,
    pub data: AssessmentRecord,
}
