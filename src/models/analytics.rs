use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Derived per-question summary. Never persisted on its own; it appears
/// inside `cursor_statistics.movement_details` and the analytics endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnalytics {
    pub question_id: String,
    pub total_movements: usize,
    pub total_distance_pixels: f64,
    pub average_distance_per_movement: f64,
    pub response_time_ms: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CursorStatistics {
    pub total_questions_tracked: usize,
    pub total_movements_all_questions: usize,
    pub average_movements_per_question: f64,
    pub questions_with_most_movement: Option<String>,
    pub questions_with_least_movement: Option<String>,
    pub movement_details: IndexMap<String, QuestionAnalytics>,
}

/// Response-latency bucket. Boundaries are closed on the medium bucket:
/// exactly 2000ms and exactly 10000ms both classify as Medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSpeed {
    Fast,
    Medium,
    Slow,
}

impl ResponseSpeed {
    pub fn from_millis(response_time_ms: i64) -> Self {
        if response_time_ms < 2000 {
            ResponseSpeed::Fast
        } else if response_time_ms <= 10000 {
            ResponseSpeed::Medium
        } else {
            ResponseSpeed::Slow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseSpeed::Fast => "fast",
            ResponseSpeed::Medium => "medium",
            ResponseSpeed::Slow => "slow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_bucket_boundaries() {
        assert_eq!(ResponseSpeed::from_millis(0), ResponseSpeed::Fast);
        assert_eq!(ResponseSpeed::from_millis(1999), ResponseSpeed::Fast);
        assert_eq!(ResponseSpeed::from_millis(2000), ResponseSpeed::Medium);
        assert_eq!(ResponseSpeed::from_millis(10000), ResponseSpeed::Medium);
        assert_eq!(ResponseSpeed::from_millis(10001), ResponseSpeed::Slow);
    }

    #[test]
    fn speed_bucket_accepts_skewed_clock_values() {
        // Negative and absurd latencies are passed through, not rejected.
        assert_eq!(ResponseSpeed::from_millis(-500), ResponseSpeed::Fast);
        assert_eq!(ResponseSpeed::from_millis(i64::MAX), ResponseSpeed::Slow);
    }
}
