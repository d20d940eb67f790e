use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};

use crate::dto::admin_dto::{AnalyticsResponse, ListAssessmentsResponse};
use crate::error::Result;
use crate::services::report_service::CorpusReport;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/assessments",
    responses(
        (status = 200, description = "Summaries of all stored assessments, newest first", body = Json<ListAssessmentsResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_assessments(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let listing = state.assessment_service.list_summaries().await?;
    Ok(Json(listing))
}

#[utoipa::path(
    get,
    path = "/api/analytics",
    responses(
        (status = 200, description = "Cross-record report: question difficulty, cursor engagement, user patterns", body = Json<CorpusReport>)
    )
)]
#[axum::debug_handler]
pub async fn get_corpus_analytics(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let report = state.assessment_service.corpus_report().await?;
    Ok(Json(report))
}

#[utoipa::path(
    get,
    path = "/api/assessment/{user_id}",
    params(
        ("user_id" = String, Path, description = "Derived user id (name + phone)")
    ),
    responses(
        (status = 200, description = "Most recent full record for the user"),
        (status = 404, description = "No assessment stored for this user"),
        (status = 422, description = "Stored record could not be parsed")
    )
)]
#[axum::debug_handler]
pub async fn get_assessment(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse> {
    let record = state.assessment_service.latest_record(&user_id).await?;
    Ok(Json(record))
}

#[utoipa::path(
    get,
    path = "/api/analytics/{user_id}",
    params(
        ("user_id" = String, Path, description = "Derived user id (name + phone)")
    ),
    responses(
        (status = 200, description = "Derived analytics for the user's most recent record", body = Json<AnalyticsResponse>),
        (status = 404, description = "No assessment stored for this user"),
        (status = 422, description = "Stored record could not be parsed")
    )
)]
#[axum::debug_handler]
pub async fn get_assessment_analytics(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse> {
    let analytics = state.assessment_service.analytics(&user_id).await?;
    Ok(Json(analytics))
}
