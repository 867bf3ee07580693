use std::collections::HashSet;

use super::benchmark::BenchmarkTable;
use super::config::{ScoringConfig, INSIGHTS_CAP, OPPORTUNITIES_CAP, RISKS_CAP};
use super::question::{Question, QuestionKind, MAX_QUESTION_WEIGHT};

/// Validate scoring rules at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig, benchmarks: &BenchmarkTable) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(w) = config.risk_max_weight {
        if !(1..=MAX_QUESTION_WEIGHT).contains(&w) {
            errors.push(format!("scoring.risk_max_weight: {} must be between 1 and 10", w));
        }
    }

    if let Some(w) = config.opportunity_min_weight {
        if !(1..=MAX_QUESTION_WEIGHT).contains(&w) {
            errors.push(format!(
                "scoring.opportunity_min_weight: {} must be between 1 and 10",
                w
            ));
        }
    }

    if config.risk_max_weight() >= config.opportunity_min_weight() {
        errors.push(format!(
            "scoring: risk_max_weight ({}) must be below opportunity_min_weight ({})",
            config.risk_max_weight(),
            config.opportunity_min_weight()
        ));
    }

    if let Some(high) = config.high_band_min {
        if high > 100 {
            errors.push(format!("scoring.high_band_min: {} must be at most 100", high));
        }
    }

    if let Some(medium) = config.medium_band_min {
        if medium > 100 {
            errors.push(format!("scoring.medium_band_min: {} must be at most 100", medium));
        }
    }

    if config.medium_band_min() >= config.high_band_min() {
        errors.push(format!(
            "scoring: medium_band_min ({}) must be below high_band_min ({})",
            config.medium_band_min(),
            config.high_band_min()
        ));
    }

    let caps = [
        ("max_insights", config.max_insights, INSIGHTS_CAP),
        ("max_risks", config.max_risks, RISKS_CAP),
        ("max_opportunities", config.max_opportunities, OPPORTUNITIES_CAP),
    ];
    for (name, value, cap) in caps {
        if let Some(v) = value {
            if v > cap {
                errors.push(format!("scoring.{}: {} must be at most {}", name, v, cap));
            }
        }
    }

    if !benchmarks.contains(config.fallback_industry()) {
        errors.push(format!(
            "scoring.fallback_industry: '{}' has no benchmark entry",
            config.fallback_industry()
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a question bank: unique ids, weights in range, unique option keys.
pub fn validate_question_bank(questions: &[Question]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for (i, question) in questions.iter().enumerate() {
        if !seen_ids.insert(question.id.as_str()) {
            errors.push(format!("questions[{}]: duplicate id '{}'", i, question.id));
        }

        if let QuestionKind::SingleChoice { options } = &question.kind {
            if options.is_empty() {
                errors.push(format!("questions[{}] ({}): no options", i, question.id));
            }

            let mut seen_keys = HashSet::new();
            for (j, option) in options.iter().enumerate() {
                if !(1..=MAX_QUESTION_WEIGHT).contains(&option.weight) {
                    errors.push(format!(
                        "questions[{}].options[{}] ({}): weight {} must be between 1 and 10",
                        i, j, option.key, option.weight
                    ));
                }
                if !seen_keys.insert(option.key.to_ascii_lowercase()) {
                    errors.push(format!(
                        "questions[{}].options[{}]: duplicate key '{}'",
                        i, j, option.key
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
