use std::path::PathBuf;

use tracing::info;

use crate::dto::admin_dto::{
    AnalyticsResponse, AssessmentSummary, CompletionStats, CursorActivity,
    ListAssessmentsResponse, QuestionDetail, TimingBlock, UserInfo,
};
use crate::dto::submission_dto::AssessmentSubmission;
use crate::error::Result;
use crate::models::analytics::ResponseSpeed;
use crate::models::assessment::AssessmentRecord;
use crate::services::analytics_service;
use crate::services::report_service::{self, CorpusReport};
use crate::store::records::RecordStore;
use crate::utils::format::{format_minutes, format_percent, format_seconds};
use crate::utils::ids::generate_user_id;
use crate::utils::time;

#[derive(Clone)]
pub struct AssessmentService {
    store: RecordStore,
}

impl AssessmentService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Assembles the persisted record from a validated submission: derives
    /// the user id, stamps it, computes cursor statistics server-side and
    /// writes the file. The stored record is returned so the response can
    /// echo exactly what was saved.
    pub async fn submit(
        &self,
        submission: AssessmentSubmission,
    ) -> Result<(AssessmentRecord, PathBuf)> {
        let user_id = generate_user_id(&submission.user_name, &submission.phone_number);
        let timestamp = time::to_rfc3339(time::now());

        let cursor_statistics = analytics_service::cursor_statistics(
            &submission.responses,
            &submission.response_timings,
            &submission.cursor_movements,
        );

        let record = AssessmentRecord {
            user_id: user_id.clone(),
            user_name: submission.user_name,
            email_id: submission.email_id,
            phone_number: submission.phone_number,
            timestamp,
            answered_questions: submission.responses.len(),
            responses: submission.responses,
            response_timings: submission.response_timings,
            cursor_movements: submission.cursor_movements,
            total_questions: submission.total_questions,
            analytics: submission.analytics,
            cursor_statistics,
        };

        let path = self.store.save(&record).await?;
        info!(
            user_id = %record.user_id,
            answered = record.answered_questions,
            total = record.total_questions,
            movements = record.cursor_statistics.total_movements_all_questions,
            path = %path.display(),
            "assessment saved"
        );
        Ok((record, path))
    }

    /// Lightweight summaries of every stored record, newest first.
    /// Corrupt files are reported by name, never fail the listing.
    pub async fn list_summaries(&self) -> Result<ListAssessmentsResponse> {
        let listing = self.store.list_all().await?;
        let mut assessments: Vec<AssessmentSummary> = listing
            .records
            .into_iter()
            .map(|(filename, record)| AssessmentSummary {
                filename,
                user_id: record.user_id,
                user_name: record.user_name,
                email_id: record.email_id,
                timestamp: record.timestamp,
                answered_questions: record.answered_questions,
                total_questions: record.total_questions,
                total_time_minutes: record.analytics.total_time_minutes,
                average_time_per_question: record.analytics.average_time_per_question_seconds,
                total_cursor_movements: record.cursor_statistics.total_movements_all_questions,
            })
            .collect();
        assessments.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(ListAssessmentsResponse {
            count: assessments.len(),
            assessments,
            skipped_files: listing.skipped,
        })
    }

    /// Cross-record report over every stored assessment: question
    /// difficulty and engagement rankings plus user-pattern buckets.
    /// Corrupt files are already excluded by the store scan.
    pub async fn corpus_report(&self) -> Result<CorpusReport> {
        let listing = self.store.list_all().await?;
        let records: Vec<AssessmentRecord> =
            listing.records.into_iter().map(|(_, record)| record).collect();
        Ok(report_service::build_report(&records))
    }

    pub async fn latest_record(&self, user_id: &str) -> Result<AssessmentRecord> {
        let (_, record) = self.store.load_latest(user_id).await?;
        Ok(record)
    }

    /// Derives the full analytics view from the user's most recent record.
    /// Cursor statistics are recomputed from the raw telemetry rather than
    /// read back, so the endpoint stays a pure function of the record.
    pub async fn analytics(&self, user_id: &str) -> Result<AnalyticsResponse> {
        let record = self.latest_record(user_id).await?;

        let ratio = analytics_service::completion_ratio(
            record.answered_questions,
            record.total_questions,
        );
        let timing_stats = analytics_service::timing_stats(
            &record.response_timings,
            record.answered_questions,
        );
        let cursor_tracking = analytics_service::cursor_statistics(
            &record.responses,
            &record.response_timings,
            &record.cursor_movements,
        );

        let question_details = record
            .responses
            .iter()
            .map(|(question_id, selected_option)| {
                let timing = record.response_timings.get(question_id).cloned();
                let response_time_ms = timing.as_ref().map(|t| t.response_time_ms).unwrap_or(0);
                let cursor_activity =
                    record.cursor_movements.get(question_id).map(|t| CursorActivity {
                        total_movements: t.movements.len(),
                        has_movement_data: !t.movements.is_empty(),
                    });
                QuestionDetail {
                    question_id: question_id.clone(),
                    selected_option: selected_option.clone(),
                    response_speed: ResponseSpeed::from_millis(response_time_ms)
                        .as_str()
                        .to_string(),
                    timing,
                    cursor_activity,
                }
            })
            .collect();

        Ok(AnalyticsResponse {
            user_info: UserInfo::from(&record),
            completion: CompletionStats {
                total_questions: record.total_questions,
                answered_questions: record.answered_questions,
                completion_rate: format_percent(ratio),
            },
            timing: TimingBlock {
                total_time_ms: timing_stats.total_time_ms,
                total_time_seconds: format_seconds(timing_stats.total_time_ms as f64),
                total_time_minutes: format_minutes(timing_stats.total_time_ms as f64),
                average_time_per_question_seconds: format_seconds(
                    timing_stats.average_time_per_question_ms,
                ),
            },
            cursor_tracking,
            question_details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::{CursorSample, CursorTrack, ResponseTiming, SubmissionAnalytics};
    use indexmap::IndexMap;

    fn submission() -> AssessmentSubmission {
        let mut responses = IndexMap::new();
        responses.insert("q1".to_string(), "agree".to_string());
        responses.insert("q2".to_string(), "disagree".to_string());

        let mut timings = IndexMap::new();
        timings.insert(
            "q1".to_string(),
            ResponseTiming {
                response_time_ms: 5000,
                response_time_seconds: "5.00".to_string(),
                selected_option: "agree".to_string(),
                timestamp: "2026-08-27T10:00:05+00:00".to_string(),
            },
        );

        let mut movements = IndexMap::new();
        movements.insert(
            "q1".to_string(),
            CursorTrack {
                movements: vec![
                    CursorSample { x: 0.0, y: 0.0, timestamp: 0 },
                    CursorSample { x: 3.0, y: 4.0, timestamp: 50 },
                ],
                total_movements: 2,
                first_movement: None,
                last_movement: None,
            },
        );

        AssessmentSubmission {
            user_name: "Jane Doe".to_string(),
            email_id: "jane@example.com".to_string(),
            phone_number: "5551234".to_string(),
            responses,
            response_timings: timings,
            cursor_movements: movements,
            total_questions: 2,
            analytics: SubmissionAnalytics {
                total_time_ms: 5000,
                total_time_seconds: "5.00".to_string(),
                total_time_minutes: "0.08".to_string(),
                average_time_per_question_seconds: "2.50".to_string(),
                total_cursor_movements: 2,
            },
        }
    }

    #[tokio::test]
    async fn submit_persists_and_derives_server_side_statistics() {
        let dir = tempfile::tempdir().unwrap();
        let service = AssessmentService::new(RecordStore::new(dir.path()));

        let (record, path) = service.submit(submission()).await.unwrap();
        assert_eq!(record.user_id, "jane_doe_5551234");
        assert_eq!(record.answered_questions, 2);
        assert_eq!(record.cursor_statistics.total_movements_all_questions, 2);
        assert!((record.cursor_statistics.movement_details["q1"].total_distance_pixels - 5.0).abs() < 1e-9);
        assert!(path.exists());

        let reloaded = service.latest_record("jane_doe_5551234").await.unwrap();
        assert_eq!(reloaded, record);
    }

    #[tokio::test]
    async fn analytics_view_reports_completion_and_speed() {
        let dir = tempfile::tempdir().unwrap();
        let service = AssessmentService::new(RecordStore::new(dir.path()));
        service.submit(submission()).await.unwrap();

        let analytics = service.analytics("jane_doe_5551234").await.unwrap();
        assert_eq!(analytics.completion.completion_rate, "100.0%");
        assert_eq!(analytics.timing.total_time_ms, 5000);
        assert_eq!(analytics.timing.average_time_per_question_seconds, "2.50");
        assert_eq!(analytics.question_details.len(), 2);
        assert_eq!(analytics.question_details[0].response_speed, "medium");
        // q2 has no timing record: degraded to zero, classified fast
        assert_eq!(analytics.question_details[1].response_speed, "fast");
        assert!(analytics.question_details[1].timing.is_none());
        assert_eq!(
            analytics.cursor_tracking.questions_with_most_movement.as_deref(),
            Some("q1")
        );
    }

    #[tokio::test]
    async fn listing_orders_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let service = AssessmentService::new(RecordStore::new(dir.path()));

        let mut first = submission();
        first.user_name = "Ann A".to_string();
        service.submit(first).await.unwrap();
        let mut second = submission();
        second.user_name = "Bob B".to_string();
        service.submit(second).await.unwrap();

        let listing = service.list_summaries().await.unwrap();
        assert_eq!(listing.count, 2);
        assert!(listing.assessments[0].timestamp >= listing.assessments[1].timestamp);
        assert!(listing.skipped_files.is_empty());
    }
}
