//! Cross-record reporting: statistics computed over every stored
//! assessment rather than a single one. Question difficulty ranks by
//! average response time, engagement by cursor activity, and users are
//! categorized against the corpus medians. Pure functions over a record
//! slice; loading is the caller's concern.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::assessment::AssessmentRecord;
use crate::services::analytics_service;
use crate::utils::format::round2;

const RANKING_LIMIT: usize = 10;
const CATEGORY_EXAMPLE_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeOverall {
    pub total_responses: usize,
    pub average_time: f64,
    pub median_time: f64,
    pub std_dev: f64,
    pub min_time: f64,
    pub max_time: f64,
}

/// Per-question response-time distribution, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDifficulty {
    pub average_time: f64,
    pub median_time: f64,
    pub std_dev: f64,
    pub min_time: f64,
    pub max_time: f64,
    pub sample_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyEntry {
    pub question_id: String,
    #[serde(flatten)]
    pub stats: QuestionDifficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseTimeReport {
    pub overall: TimeOverall,
    pub by_question: IndexMap<String, QuestionDifficulty>,
    pub difficulty_ranking: Vec<DifficultyEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementOverall {
    pub total_tracked: usize,
    pub average_movements: f64,
    pub median_movements: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionEngagement {
    pub average_movements: f64,
    pub median_movements: f64,
    pub std_dev: f64,
    pub sample_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementEntry {
    pub question_id: String,
    #[serde(flatten)]
    pub stats: QuestionEngagement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementReport {
    pub overall: EngagementOverall,
    pub by_question: IndexMap<String, QuestionEngagement>,
    pub engagement_ranking: Vec<EngagementEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub time_median: f64,
    pub movement_median: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternCategory {
    pub count: usize,
    pub description: String,
    pub users: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternCategories {
    pub fast_decisive: PatternCategory,
    pub fast_exploratory: PatternCategory,
    pub slow_decisive: PatternCategory,
    pub slow_exploratory: PatternCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPatternsReport {
    pub total_users: usize,
    pub thresholds: Thresholds,
    pub categories: PatternCategories,
}

/// The whole cross-record report. Blocks are null when the corpus holds
/// no data for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusReport {
    pub assessments_analyzed: usize,
    pub response_times: Option<ResponseTimeReport>,
    pub cursor_engagement: Option<EngagementReport>,
    pub user_patterns: Option<UserPatternsReport>,
}

pub fn build_report(records: &[AssessmentRecord]) -> CorpusReport {
    CorpusReport {
        assessments_analyzed: records.len(),
        response_times: response_time_report(records),
        cursor_engagement: engagement_report(records),
        user_patterns: user_patterns_report(records),
    }
}

fn response_time_report(records: &[AssessmentRecord]) -> Option<ResponseTimeReport> {
    let mut all_times = Vec::new();
    let mut per_question: IndexMap<String, Vec<f64>> = IndexMap::new();
    for record in records {
        for (question_id, timing) in &record.response_timings {
            let seconds = timing.response_time_ms as f64 / 1000.0;
            all_times.push(seconds);
            per_question
                .entry(question_id.clone())
                .or_default()
                .push(seconds);
        }
    }
    if all_times.is_empty() {
        return None;
    }

    let by_question: IndexMap<String, QuestionDifficulty> = per_question
        .iter()
        .map(|(question_id, times)| {
            (
                question_id.clone(),
                QuestionDifficulty {
                    average_time: round2(mean(times)),
                    median_time: round2(median(times)),
                    std_dev: round2(std_dev(times)),
                    min_time: round2(min(times)),
                    max_time: round2(max(times)),
                    sample_size: times.len(),
                },
            )
        })
        .collect();

    let mut ranking: Vec<DifficultyEntry> = by_question
        .iter()
        .map(|(question_id, stats)| DifficultyEntry {
            question_id: question_id.clone(),
            stats: stats.clone(),
        })
        .collect();
    // stable sort keeps first-seen order on equal averages
    ranking.sort_by(|a, b| {
        b.stats
            .average_time
            .partial_cmp(&a.stats.average_time)
            .unwrap_or(Ordering::Equal)
    });
    ranking.truncate(RANKING_LIMIT);

    Some(ResponseTimeReport {
        overall: TimeOverall {
            total_responses: all_times.len(),
            average_time: round2(mean(&all_times)),
            median_time: round2(median(&all_times)),
            std_dev: round2(std_dev(&all_times)),
            min_time: round2(min(&all_times)),
            max_time: round2(max(&all_times)),
        },
        by_question,
        difficulty_ranking: ranking,
    })
}

fn engagement_report(records: &[AssessmentRecord]) -> Option<EngagementReport> {
    let mut all_counts = Vec::new();
    let mut per_question: IndexMap<String, Vec<f64>> = IndexMap::new();
    for record in records {
        for (question_id, track) in &record.cursor_movements {
            let count = track.movements.len() as f64;
            all_counts.push(count);
            per_question
                .entry(question_id.clone())
                .or_default()
                .push(count);
        }
    }
    if all_counts.is_empty() {
        return None;
    }

    let by_question: IndexMap<String, QuestionEngagement> = per_question
        .iter()
        .map(|(question_id, counts)| {
            (
                question_id.clone(),
                QuestionEngagement {
                    average_movements: round2(mean(counts)),
                    median_movements: round2(median(counts)),
                    std_dev: round2(std_dev(counts)),
                    sample_size: counts.len(),
                },
            )
        })
        .collect();

    let mut ranking: Vec<EngagementEntry> = by_question
        .iter()
        .map(|(question_id, stats)| EngagementEntry {
            question_id: question_id.clone(),
            stats: stats.clone(),
        })
        .collect();
    ranking.sort_by(|a, b| {
        b.stats
            .average_movements
            .partial_cmp(&a.stats.average_movements)
            .unwrap_or(Ordering::Equal)
    });
    ranking.truncate(RANKING_LIMIT);

    Some(EngagementReport {
        overall: EngagementOverall {
            total_tracked: all_counts.len(),
            average_movements: round2(mean(&all_counts)),
            median_movements: round2(median(&all_counts)),
            std_dev: round2(std_dev(&all_counts)),
        },
        by_question,
        engagement_ranking: ranking,
    })
}

struct UserPattern {
    user_name: String,
    avg_time_per_question: f64,
    avg_movements_per_question: f64,
}

fn user_patterns_report(records: &[AssessmentRecord]) -> Option<UserPatternsReport> {
    if records.is_empty() {
        return None;
    }

    let users: Vec<UserPattern> = records
        .iter()
        .map(|record| {
            let stats = analytics_service::timing_stats(
                &record.response_timings,
                record.answered_questions,
            );
            UserPattern {
                user_name: record.user_name.clone(),
                avg_time_per_question: round2(stats.average_time_per_question_ms / 1000.0),
                avg_movements_per_question: record
                    .cursor_statistics
                    .average_movements_per_question,
            }
        })
        .collect();

    let times: Vec<f64> = users
        .iter()
        .map(|u| u.avg_time_per_question)
        .filter(|t| *t > 0.0)
        .collect();
    let movements: Vec<f64> = users
        .iter()
        .map(|u| u.avg_movements_per_question)
        .filter(|m| *m > 0.0)
        .collect();
    let time_median = if times.is_empty() { 0.0 } else { median(&times) };
    let movement_median = if movements.is_empty() {
        0.0
    } else {
        median(&movements)
    };

    let mut fast_decisive = Vec::new();
    let mut fast_exploratory = Vec::new();
    let mut slow_decisive = Vec::new();
    let mut slow_exploratory = Vec::new();
    for user in &users {
        // users without timing data cannot be categorized
        if user.avg_time_per_question == 0.0 {
            continue;
        }
        let is_fast = user.avg_time_per_question < time_median;
        let is_low_movement = user.avg_movements_per_question < movement_median;
        let bucket = match (is_fast, is_low_movement) {
            (true, true) => &mut fast_decisive,
            (true, false) => &mut fast_exploratory,
            (false, true) => &mut slow_decisive,
            (false, false) => &mut slow_exploratory,
        };
        bucket.push(user.user_name.clone());
    }

    Some(UserPatternsReport {
        total_users: users.len(),
        thresholds: Thresholds {
            time_median: round2(time_median),
            movement_median: round2(movement_median),
        },
        categories: PatternCategories {
            fast_decisive: category(
                fast_decisive,
                "Quick decision makers with minimal hesitation",
            ),
            fast_exploratory: category(
                fast_exploratory,
                "Quick but thorough - reads all options fast",
            ),
            slow_decisive: category(slow_decisive, "Thoughtful and confident once decided"),
            slow_exploratory: category(slow_exploratory, "Careful consideration of all options"),
        },
    })
}

fn category(mut users: Vec<String>, description: &str) -> PatternCategory {
    let count = users.len();
    users.truncate(CATEGORY_EXAMPLE_LIMIT);
    PatternCategory {
        count,
        description: description.to_string(),
        users,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

// sample standard deviation (n - 1); 0 for fewer than two observations
fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
