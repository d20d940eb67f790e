//! Aggregation over one assessment's telemetry. Everything here is a pure
//! function of its inputs: no I/O, no shared state, numeric results.
//! Display strings (percentages, seconds) are formatted at the DTO
//! boundary, not here.

use indexmap::IndexMap;

use crate::models::analytics::{CursorStatistics, QuestionAnalytics};
use crate::models::assessment::{CursorTrack, ResponseTiming};
use crate::utils::format::round2;
use crate::utils::geometry::path_distance;

/// Numeric whole-assessment timing summary.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingStats {
    pub total_time_ms: i64,
    pub average_time_per_question_ms: f64,
}

/// Summarizes one question's activity. Either input may be absent; absent
/// data degrades to zeros rather than an error.
pub fn question_analytics(
    question_id: &str,
    track: Option<&CursorTrack>,
    timing: Option<&ResponseTiming>,
) -> QuestionAnalytics {
    let movements = track.map(|t| t.movements.as_slice()).unwrap_or(&[]);
    let total_movements = movements.len();
    let total_distance = round2(path_distance(movements));
    let average_distance = if total_movements > 0 {
        round2(total_distance / total_movements as f64)
    } else {
        0.0
    };

    QuestionAnalytics {
        question_id: question_id.to_string(),
        total_movements,
        total_distance_pixels: total_distance,
        average_distance_per_movement: average_distance,
        response_time_ms: timing.map(|t| t.response_time_ms).unwrap_or(0),
    }
}

/// Combines per-question summaries into whole-assessment cursor
/// statistics. Questions are visited in the insertion order of
/// `responses`, followed by any cursor-only entries, so the most/least
/// active selection is deterministic: ties resolve to the first id seen.
pub fn cursor_statistics(
    responses: &IndexMap<String, String>,
    response_timings: &IndexMap<String, ResponseTiming>,
    cursor_movements: &IndexMap<String, CursorTrack>,
) -> CursorStatistics {
    let mut details: IndexMap<String, QuestionAnalytics> = IndexMap::new();
    for question_id in question_order(responses, cursor_movements) {
        let analytics = question_analytics(
            &question_id,
            cursor_movements.get(&question_id),
            response_timings.get(&question_id),
        );
        details.insert(question_id, analytics);
    }

    let total_movements_all: usize = details.values().map(|d| d.total_movements).sum();
    let tracked = cursor_movements.len();
    let average_movements = if tracked > 0 {
        round2(total_movements_all as f64 / tracked as f64)
    } else {
        0.0
    };

    let (most, least) = if tracked > 0 {
        most_and_least_active(&details)
    } else {
        (None, None)
    };

    CursorStatistics {
        total_questions_tracked: tracked,
        total_movements_all_questions: total_movements_all,
        average_movements_per_question: average_movements,
        questions_with_most_movement: most,
        questions_with_least_movement: least,
        movement_details: details,
    }
}

/// Sums response times over the questions that carry a timing record;
/// questions without one contribute 0.
pub fn timing_stats(
    response_timings: &IndexMap<String, ResponseTiming>,
    answered_questions: usize,
) -> TimingStats {
    let total_time_ms: i64 = response_timings.values().map(|t| t.response_time_ms).sum();
    let average = if answered_questions > 0 {
        total_time_ms as f64 / answered_questions as f64
    } else {
        0.0
    };
    TimingStats {
        total_time_ms,
        average_time_per_question_ms: average,
    }
}

/// Fraction of questions answered, 0.0 when there are no questions.
pub fn completion_ratio(answered_questions: usize, total_questions: usize) -> f64 {
    if total_questions == 0 {
        0.0
    } else {
        answered_questions as f64 / total_questions as f64
    }
}

fn question_order(
    responses: &IndexMap<String, String>,
    cursor_movements: &IndexMap<String, CursorTrack>,
) -> Vec<String> {
    let mut order: Vec<String> = responses.keys().cloned().collect();
    for question_id in cursor_movements.keys() {
        if !responses.contains_key(question_id) {
            order.push(question_id.clone());
        }
    }
    order
}

// Explicit fold with strict comparisons: the first question seen keeps the
// title on a tie.
fn most_and_least_active(
    details: &IndexMap<String, QuestionAnalytics>,
) -> (Option<String>, Option<String>) {
    let mut most: Option<(&str, usize)> = None;
    let mut least: Option<(&str, usize)> = None;
    for (question_id, analytics) in details {
        let count = analytics.total_movements;
        match most {
            Some((_, best)) if count <= best => {}
            _ => most = Some((question_id.as_str(), count)),
        }
        match least {
            Some((_, worst)) if count >= worst => {}
            _ => least = Some((question_id.as_str(), count)),
        }
    }
    (
        most.map(|(id, _)| id.to_string()),
        least.map(|(id, _)| id.to_string()),
    )
}
