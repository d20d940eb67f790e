use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::dto::submission_dto::{AssessmentSubmission, SubmitAssessmentResponse};
use crate::error::Result;
use crate::AppState;

#[axum::debug_handler]
pub async fn submit_assessment(
    State(state): State<AppState>,
    Json(submission): Json<AssessmentSubmission>,
) -> Result<impl IntoResponse> {
    submission.validate()?;
    let (record, _path) = state.assessment_service.submit(submission).await?;
    let response = SubmitAssessmentResponse {
        success: true,
        message: "Assessment submitted successfully with tracking data".to_string(),
        data: record,
    };
    Ok((StatusCode::CREATED, Json(response)))
}
