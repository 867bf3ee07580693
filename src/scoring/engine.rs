use serde::Serialize;

use super::answers::{Answer, AnswerRecord};
use super::benchmark::{BenchmarkTable, IndustryBenchmark};
use super::config::ScoringConfig;
use super::question::{find_question, BandedInsights, Question, QuestionKind, MAX_QUESTION_WEIGHT};

/// Id of the question whose chosen option selects the benchmark industry.
pub const INDUSTRY_QUESTION_ID: &str = "industry";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionContribution {
    pub section: String,     // e.g. "SPEED"
    pub description: String, // e.g. "Within 24 hours (weight 10)", "70% -> 7"
    pub points: u32,         // 0-10
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: u8,
    pub insights: Vec<String>,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
    pub benchmark: IndustryBenchmark,
    pub industry: String,
    pub breakdown: Vec<QuestionContribution>,
}

impl ScoreResult {
    /// Sum of counted points and the maximum they could have been
    pub fn totals(&self) -> (u32, u32) {
        let total = self.breakdown.iter().map(|c| c.points).sum();
        let max = self.breakdown.len() as u32 * MAX_QUESTION_WEIGHT;
        (total, max)
    }
}

/// Score an answer record with the built-in rules.
pub fn compute_score(
    answers: &AnswerRecord,
    questions: &[Question],
    benchmarks: &BenchmarkTable,
) -> ScoreResult {
    compute_score_with(answers, questions, benchmarks, &ScoringConfig::default())
}

/// Score an answer record.
///
/// Never fails: answers for unknown questions, or whose shape does not match
/// the question kind, are skipped as if unanswered.
pub fn compute_score_with(
    answers: &AnswerRecord,
    questions: &[Question],
    benchmarks: &BenchmarkTable,
    rules: &ScoringConfig,
) -> ScoreResult {
    let mut total_weight: u32 = 0;
    let mut max_weight: u32 = 0;
    let mut insights = Vec::new();
    let mut risks = Vec::new();
    let mut opportunities = Vec::new();
    let mut breakdown = Vec::new();

    for (id, answer) in answers.iter() {
        let Some(question) = find_question(questions, id) else {
            continue;
        };

        match (&question.kind, answer) {
            (QuestionKind::SingleChoice { .. }, Answer::Choice(option)) => {
                // A weight outside 1-10 is malformed: treat as unanswered
                if !(1..=MAX_QUESTION_WEIGHT).contains(&option.weight) {
                    continue;
                }
                total_weight += option.weight;
                max_weight += MAX_QUESTION_WEIGHT;

                if let Some(ref insight) = option.insight {
                    insights.push(insight.clone());
                }
                if option.weight <= rules.risk_max_weight() {
                    risks.push(format!("{}: Critical weakness identified", question.section));
                }
                if option.weight >= rules.opportunity_min_weight() {
                    opportunities.push(format!("{}: Competitive strength", question.section));
                }

                breakdown.push(QuestionContribution {
                    section: question.section.clone(),
                    description: format!("{} (weight {})", option.label, option.weight),
                    points: option.weight,
                });
            }
            (QuestionKind::PercentageSlider { insights: bands }, Answer::Percentage(value)) => {
                let points = normalize_percentage(*value);
                total_weight += points;
                max_weight += MAX_QUESTION_WEIGHT;
                insights.push(band_insight(bands, *value, rules).to_string());

                breakdown.push(QuestionContribution {
                    section: question.section.clone(),
                    description: format!("{}% -> {}", value, points),
                    points,
                });
            }
            // Shape mismatch: treat as unanswered
            _ => continue,
        }
    }

    let score = if max_weight > 0 {
        ((total_weight as f64 / max_weight as f64) * 100.0).round().min(100.0) as u8
    } else {
        0
    };

    insights.truncate(rules.max_insights());
    risks.truncate(rules.max_risks());
    opportunities.truncate(rules.max_opportunities());

    let industry = match answers.get(INDUSTRY_QUESTION_ID) {
        Some(Answer::Choice(option)) => option.key.clone(),
        _ => rules.fallback_industry().to_string(),
    };
    let benchmark = benchmarks.resolve(&industry, rules.fallback_industry());

    ScoreResult {
        score,
        insights,
        risks,
        opportunities,
        benchmark,
        industry,
        breakdown,
    }
}

/// Map a 0-100 percentage onto the 0-10 weight scale
pub fn normalize_percentage(value: u8) -> u32 {
    ((value.min(100) as f64 / 100.0) * MAX_QUESTION_WEIGHT as f64).round() as u32
}

fn band_insight<'a>(bands: &'a BandedInsights, value: u8, rules: &ScoringConfig) -> &'a str {
    if value >= rules.high_band_min() {
        &bands.high
    } else if value >= rules.medium_band_min() {
        &bands.medium
    } else {
        &bands.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::question::{default_questions, AnswerOption};

    fn choose(questions: &[Question], id: &str, key: &str) -> (String, Answer) {
        let option = find_question(questions, id)
            .and_then(|q| q.find_option(key))
            .cloned()
            .unwrap();
        (id.to_string(), Answer::Choice(option))
    }

    fn score(record: &AnswerRecord) -> ScoreResult {
        compute_score(record, &default_questions(), &BenchmarkTable::default())
    }

    #[test]
    fn test_empty_answers() {
        let result = score(&AnswerRecord::new());
        assert_eq!(result.score, 0);
        assert!(result.insights.is_empty());
        assert!(result.risks.is_empty());
        assert!(result.opportunities.is_empty());
        assert_eq!(result.industry, "tech");
        assert_eq!(result.benchmark, IndustryBenchmark::new(65, 23, 87));
    }

    #[test]
    fn test_fastest_response_scores_100() {
        let questions = default_questions();
        let record: AnswerRecord = vec![choose(&questions, "competitive_response", "24h")]
            .into_iter()
            .collect();
        let result = score(&record);
        assert_eq!(result.score, 100);
        assert_eq!(result.opportunities, vec!["SPEED: Competitive strength"]);
        assert!(result.risks.is_empty());
    }

    #[test]
    fn test_slowest_response_scores_10() {
        let questions = default_questions();
        let record: AnswerRecord = vec![choose(&questions, "competitive_response", "3m")]
            .into_iter()
            .collect();
        let result = score(&record);
        assert_eq!(result.score, 10);
        assert_eq!(result.risks, vec!["SPEED: Critical weakness identified"]);
        assert_eq!(result.insights, vec!["Fatal speed. You're already behind."]);
    }

    #[test]
    fn test_percentage_bands() {
        let cases = [
            (90, "Elite execution. You're in the top 13% of companies."),
            (80, "Elite execution. You're in the top 13% of companies."),
            (70, "Good execution, but champions achieve 87%+ success rates."),
            (60, "Good execution, but champions achieve 87%+ success rates."),
            (30, "Execution betrayal. Great strategies dying in implementation."),
        ];
        for (value, expected) in cases {
            let mut record = AnswerRecord::new();
            record.set("execution_rate", Answer::Percentage(value));
            let result = score(&record);
            assert_eq!(result.insights, vec![expected], "value {}", value);
        }
    }

    #[test]
    fn test_percentage_normalization() {
        let mut record = AnswerRecord::new();
        record.set("execution_rate", Answer::Percentage(75));
        // round(7.5) = 8 -> 80
        assert_eq!(score(&record).score, 80);

        record.set("execution_rate", Answer::Percentage(0));
        assert_eq!(score(&record).score, 0);

        record.set("execution_rate", Answer::Percentage(100));
        assert_eq!(score(&record).score, 100);
    }

    #[test]
    fn test_unknown_answer_is_ignored() {
        let questions = default_questions();
        let mut with_unknown = AnswerRecord::new();
        with_unknown.set("mystery", Answer::Percentage(100));
        let (id, a) = choose(&questions, "strategic_focus", "scattered");
        with_unknown.set(id.clone(), a.clone());

        let mut without = AnswerRecord::new();
        without.set(id, a);

        let lhs = score(&with_unknown);
        let rhs = score(&without);
        assert_eq!(lhs, rhs);
        assert_eq!(lhs.totals(), (3, 10));
    }

    #[test]
    fn test_mismatched_answer_shape_is_ignored() {
        let mut record = AnswerRecord::new();
        record.set("industry", Answer::Percentage(90));
        let result = score(&record);
        assert_eq!(result.score, 0);
        assert!(result.insights.is_empty());
        assert_eq!(result.industry, "tech");
    }

    #[test]
    fn test_out_of_range_weight_is_ignored() {
        let mut record = AnswerRecord::new();
        record.set(
            "competitive_response",
            Answer::Choice(AnswerOption::new("Instantly", "now", 50, "Too good.")),
        );
        let result = score(&record);
        assert_eq!(result.score, 0);
        assert_eq!(result.totals(), (0, 0));
        assert!(result.insights.is_empty());
        assert!(result.opportunities.is_empty());

        record.set(
            "competitive_response",
            Answer::Choice(AnswerOption::new("Never", "never", 0, "Gone.")),
        );
        let result = score(&record);
        assert_eq!(result.score, 0);
        assert_eq!(result.totals(), (0, 0));
        assert!(result.risks.is_empty());
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn test_finance_benchmark() {
        let questions = default_questions();
        let record: AnswerRecord = vec![choose(&questions, "industry", "finance")]
            .into_iter()
            .collect();
        let result = score(&record);
        assert_eq!(result.industry, "finance");
        assert_eq!(
            result.benchmark,
            IndustryBenchmark {
                execution_rate: 73,
                avg_growth: 14,
                top_performer: 91
            }
        );
    }

    #[test]
    fn test_caps_keep_first_in_answer_order() {
        let questions = default_questions();
        let record: AnswerRecord = vec![
            choose(&questions, "industry", "finance"),           // 9: opportunity
            choose(&questions, "competitive_response", "3m"),    // 1: risk
            choose(&questions, "personal_optimization", "pre5"), // 10: opportunity
            choose(&questions, "strategic_focus", "chaos"),      // 1: risk
            choose(&questions, "talent_strategy", "stagnant"),   // 3: risk
        ]
        .into_iter()
        .collect();
        let result = score(&record);

        assert_eq!(result.insights.len(), 3);
        assert_eq!(result.insights[0], "Trust and execution drive everything in finance.");
        assert_eq!(
            result.risks,
            vec![
                "SPEED: Critical weakness identified",
                "EXECUTION: Critical weakness identified"
            ]
        );
        assert_eq!(
            result.opportunities,
            vec!["BATTLEFIELD: Competitive strength", "EFFICIENCY: Competitive strength"]
        );
        // (9 + 1 + 10 + 1 + 3) / 50 = 48%
        assert_eq!(result.score, 48);
        assert_eq!(result.breakdown.len(), 5);
    }

    #[test]
    fn test_every_answer_combination_stays_in_range() {
        let questions = default_questions();
        let choice_questions: Vec<&Question> =
            questions.iter().filter(|q| !q.is_percentage()).collect();

        // Walk every combination of options across the choice questions
        let sizes: Vec<usize> = choice_questions.iter().map(|q| q.options().len()).collect();
        let total: usize = sizes.iter().product();
        assert_eq!(total, 5 * 4 * 4 * 4 * 4);

        for n in 0..total {
            let mut record = AnswerRecord::new();
            let mut rest = n;
            for (question, size) in choice_questions.iter().zip(&sizes) {
                let option = question.options()[rest % size].clone();
                rest /= size;
                record.set(question.id.clone(), Answer::Choice(option));
            }

            for rate in [0, 35, 60, 79, 100] {
                record.set("execution_rate", Answer::Percentage(rate));
                let result = score(&record);
                assert!(result.score <= 100, "combination {} rate {}", n, rate);
                assert!(result.insights.len() <= 3);
                assert!(result.risks.len() <= 2);
                assert!(result.opportunities.len() <= 2);
                assert_eq!(result.totals().1, 60);
            }
        }
    }

    #[test]
    fn test_raised_caps_are_clamped() {
        let questions = default_questions();
        let record: AnswerRecord = vec![
            choose(&questions, "competitive_response", "3m"),
            choose(&questions, "personal_optimization", "post7"),
            choose(&questions, "strategic_focus", "chaos"),
            choose(&questions, "talent_strategy", "stagnant"),
        ]
        .into_iter()
        .collect();
        let rules = ScoringConfig {
            max_insights: Some(10),
            max_risks: Some(10),
            ..ScoringConfig::default()
        };
        let result = compute_score_with(&record, &questions, &BenchmarkTable::default(), &rules);
        assert_eq!(result.risks.len(), 2);
        assert_eq!(result.insights.len(), 3);
    }

    #[test]
    fn test_custom_rules() {
        let questions = default_questions();
        let record: AnswerRecord = vec![choose(&questions, "talent_strategy", "internal")]
            .into_iter()
            .collect();
        let rules = ScoringConfig {
            risk_max_weight: Some(6),
            max_insights: Some(0),
            ..ScoringConfig::default()
        };
        let result = compute_score_with(&record, &questions, &BenchmarkTable::default(), &rules);
        assert_eq!(result.risks, vec!["CAPABILITY: Critical weakness identified"]);
        assert!(result.insights.is_empty());
    }

    #[test]
    fn test_unknown_industry_key_uses_fallback_benchmark() {
        let mut record = AnswerRecord::new();
        record.set(
            "industry",
            Answer::Choice(crate::scoring::AnswerOption::new("Retail", "retail", 5, "Shelf speed.")),
        );
        let result = score(&record);
        assert_eq!(result.industry, "retail");
        assert_eq!(result.benchmark, IndustryBenchmark::new(65, 23, 87));
    }
}
