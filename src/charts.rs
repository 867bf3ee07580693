//! Chart series derived from a score result.

use serde::Serialize;

use crate::scoring::{AnswerRecord, Question, ScoreResult};

/// Maximum value on every radar axis.
pub const RADAR_FULL_MARK: f64 = 10.0;

/// Radar axes and the divisor applied to the overall score for each.
const RADAR_AXES: [(&str, f64); 5] = [
    ("Strategy", 10.0),
    ("Speed", 12.0),
    ("Execution", 8.0),
    ("Focus", 11.0),
    ("Capability", 9.0),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPoint {
    pub subject: &'static str,
    pub value: f64,
    pub full_mark: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonPoint {
    pub name: &'static str,
    pub value: u32,
}

pub fn radar_data(score: u8) -> Vec<RadarPoint> {
    RADAR_AXES
        .iter()
        .map(|&(subject, divisor)| RadarPoint {
            subject,
            value: (score as f64 / divisor).min(RADAR_FULL_MARK),
            full_mark: RADAR_FULL_MARK,
        })
        .collect()
}

/// Industry average, the user's score, and the top performer, in display order.
pub fn comparison_data(result: &ScoreResult) -> Vec<ComparisonPoint> {
    vec![
        ComparisonPoint {
            name: "Industry Avg",
            value: result.benchmark.execution_rate,
        },
        ComparisonPoint {
            name: "Your Score",
            value: result.score as u32,
        },
        ComparisonPoint {
            name: "Top Performer",
            value: result.benchmark.top_performer,
        },
    ]
}

/// Percent of the question bank answered, rounded.
pub fn progress_percent(answers: &AnswerRecord, questions: &[Question]) -> u8 {
    if questions.is_empty() {
        return 0;
    }
    let answered = answers.answered_count(questions) as f64;
    ((answered / questions.len() as f64) * 100.0).round() as u8
}
