use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use assessment_backend::models::assessment::AssessmentRecord;
use assessment_backend::store::records::RecordStore;
use assessment_backend::AppState;

fn app(store: RecordStore) -> Router {
    let state = AppState::new(store);
    Router::new()
        .route("/api/submit", post(assessment_backend::routes::public::submit_assessment))
        .route(
            "/api/assessments",
            get(assessment_backend::routes::admin::list_assessments),
        )
        .route(
            "/api/assessment/:user_id",
            get(assessment_backend::routes::admin::get_assessment),
        )
        .route(
            "/api/analytics/:user_id",
            get(assessment_backend::routes::admin::get_assessment_analytics),
        )
        .route(
            "/api/analytics",
            get(assessment_backend::routes::admin::get_corpus_analytics),
        )
        .route("/health", get(assessment_backend::routes::health::health))
        .with_state(state)
}

fn samples_along_x(n: usize, step: f64) -> Vec<JsonValue> {
    (0..n)
        .map(|i| json!({"x": i as f64 * step, "y": 0.0, "timestamp": i as i64 * 20}))
        .collect()
}

fn submission_body() -> JsonValue {
    let q1_samples = samples_along_x(10, 5.0);
    let q2_samples: Vec<JsonValue> = (0..10)
        .map(|i| json!({"x": 100.0, "y": 100.0, "timestamp": i * 20}))
        .collect();
    json!({
        "user_name": "Alice Smith",
        "email_id": "alice@example.com",
        "phone_number": "5550001",
        "responses": {
            "q1": "agree",
            "q2": "neutral",
            "q3": "disagree"
        },
        "response_timings": {
            "q1": {
                "response_time_ms": 5000,
                "response_time_seconds": "5.00",
                "selected_option": "agree",
                "timestamp": "2026-08-27T10:00:05+00:00"
            },
            "q2": {
                "response_time_ms": 2000,
                "response_time_seconds": "2.00",
                "selected_option": "neutral",
                "timestamp": "2026-08-27T10:00:07+00:00"
            },
            "q3": {
                "response_time_ms": 1000,
                "response_time_seconds": "1.00",
                "selected_option": "disagree",
                "timestamp": "2026-08-27T10:00:08+00:00"
            }
        },
        "cursor_movements": {
            "q1": {"movements": q1_samples, "total_movements": 10},
            "q2": {"movements": q2_samples, "total_movements": 10},
            "q3": {"movements": [], "total_movements": 0}
        },
        "total_questions": 3,
        "analytics": {
            "total_time_ms": 8000,
            "total_time_seconds": "8.00",
            "total_time_minutes": "0.13",
            "average_time_per_question_seconds": "2.67",
            "total_cursor_movements": 20
        }
    })
}

async fn post_submission(app: &Router) -> JsonValue {
    let req = Request::builder()
        .method("POST")
        .uri("/api/submit")
        .header("content-type", "application/json")
        .body(Body::from(submission_body().to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn submit_flow_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(RecordStore::new(dir.path()));

    let body = post_submission(&app).await;
    assert_eq!(body["success"], json!(true));
    let data = &body["data"];
    assert_eq!(data["user_id"], json!("alice_smith_5550001"));
    assert_eq!(data["answered_questions"], json!(3));

    let stats = &data["cursor_statistics"];
    assert_eq!(stats["total_questions_tracked"], json!(3));
    assert_eq!(stats["total_movements_all_questions"], json!(20));
    // q1 and q2 tie on movement count; insertion order picks q1
    assert_eq!(stats["questions_with_most_movement"], json!("q1"));
    assert_eq!(stats["questions_with_least_movement"], json!("q3"));
    // 9 hops of 5px each along the x axis
    assert_eq!(stats["movement_details"]["q1"]["total_distance_pixels"], json!(45.0));
    assert_eq!(stats["movement_details"]["q2"]["total_distance_pixels"], json!(0.0));

    // listing
    let req = Request::builder()
        .method("GET")
        .uri("/api/assessments")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let listing: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(listing["count"], json!(1));
    assert_eq!(listing["assessments"][0]["user_id"], json!("alice_smith_5550001"));
    assert_eq!(listing["assessments"][0]["total_cursor_movements"], json!(20));

    // full record round-trips through the persisted file
    let req = Request::builder()
        .method("GET")
        .uri("/api/assessment/alice_smith_5550001")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let fetched: AssessmentRecord = serde_json::from_slice(&bytes).unwrap();
    let stored: AssessmentRecord = serde_json::from_value(data.clone()).unwrap();
    assert_eq!(fetched, stored);
}

#[tokio::test]
async fn analytics_endpoint_reports_derived_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(RecordStore::new(dir.path()));
    post_submission(&app).await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/analytics/alice_smith_5550001")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let analytics: JsonValue = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(analytics["completion"]["completion_rate"], json!("100.0%"));
    assert_eq!(analytics["timing"]["total_time_ms"], json!(8000));
    assert_eq!(
        analytics["timing"]["average_time_per_question_seconds"],
        json!("2.67")
    );
    assert_eq!(
        analytics["cursor_tracking"]["questions_with_most_movement"],
        json!("q1")
    );
    assert_eq!(
        analytics["cursor_tracking"]["questions_with_least_movement"],
        json!("q3")
    );

    let details = analytics["question_details"].as_array().unwrap();
    assert_eq!(details.len(), 3);
    assert_eq!(details[0]["question_id"], json!("q1"));
    assert_eq!(details[0]["response_speed"], json!("medium"));
    assert_eq!(details[2]["response_speed"], json!("fast"));
    assert_eq!(details[2]["cursor_activity"]["has_movement_data"], json!(false));
}

#[tokio::test]
async fn corpus_report_ranks_questions_across_records() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(RecordStore::new(dir.path()));
    post_submission(&app).await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/analytics")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let report: JsonValue = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(report["assessments_analyzed"], json!(1));
    let times = &report["response_times"];
    assert_eq!(times["overall"]["total_responses"], json!(3));
    // q1 took 5s, the longest in the corpus
    assert_eq!(times["difficulty_ranking"][0]["question_id"], json!("q1"));
    assert_eq!(times["difficulty_ranking"][0]["average_time"], json!(5.0));

    let engagement = &report["cursor_engagement"];
    assert_eq!(engagement["overall"]["total_tracked"], json!(3));
    // q1 and q2 tie at 10 movements; first-seen wins the ranking
    assert_eq!(engagement["engagement_ranking"][0]["question_id"], json!("q1"));

    let patterns = &report["user_patterns"];
    assert_eq!(patterns["total_users"], json!(1));
    let categories = &patterns["categories"];
    let categorized = categories["fast_decisive"]["count"].as_u64().unwrap()
        + categories["fast_exploratory"]["count"].as_u64().unwrap()
        + categories["slow_decisive"]["count"].as_u64().unwrap()
        + categories["slow_exploratory"]["count"].as_u64().unwrap();
    assert_eq!(categorized, 1);
}

#[tokio::test]
async fn corpus_report_is_empty_for_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(RecordStore::new(dir.path()));

    let req = Request::builder()
        .method("GET")
        .uri("/api/analytics")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let report: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(report["assessments_analyzed"], json!(0));
    assert_eq!(report["response_times"], json!(null));
    assert_eq!(report["cursor_engagement"], json!(null));
    assert_eq!(report["user_patterns"], json!(null));
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(RecordStore::new(dir.path()));

    let mut body = submission_body();
    body["email_id"] = json!("not-an-email");
    let req = Request::builder()
        .method("POST")
        .uri("/api/submit")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_record_count() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(RecordStore::new(dir.path()));
    post_submission(&app).await;

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let health: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(health["status"], json!("healthy"));
    assert_eq!(health["total_assessments"], json!(1));
}
