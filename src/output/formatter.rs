use std::io::IsTerminal;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

use crate::charts::{comparison_data, radar_data, ComparisonPoint, RadarPoint};
use crate::scoring::{Question, QuestionKind, ScoreResult};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Health band used for coloring: high is good here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Mixed,
    Weak,
}

pub fn score_band(score: u8) -> ScoreBand {
    if score >= 70 {
        ScoreBand::Strong
    } else if score >= 40 {
        ScoreBand::Mixed
    } else {
        ScoreBand::Weak
    }
}

/// Text bar like "██████░░░░" for a 0-100 score
pub fn score_bar(score: u8, width: usize) -> String {
    let ratio = (score.min(100) as f64) / 100.0;
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Format an integer with thousands separators: 27000 -> "27,000"
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Greedy word wrap. Words longer than `width` are left whole.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn push_section(out: &mut Vec<String>, heading: String, items: &[String], wrap_width: Option<usize>) {
    if items.is_empty() {
        return;
    }
    out.push(String::new());
    out.push(heading);
    for item in items {
        match wrap_width {
            Some(width) if width > 10 => {
                for (i, line) in wrap_text(item, width - 4).into_iter().enumerate() {
                    let bullet = if i == 0 { "  • " } else { "    " };
                    out.push(format!("{}{}", bullet, line));
                }
            }
            _ => out.push(format!("  • {}", item)),
        }
    }
}

/// Format a score result as a human-readable report.
/// Verbose mode appends the per-question breakdown.
pub fn format_report(result: &ScoreResult, use_colors: bool, verbose: bool) -> String {
    let wrap_width = get_terminal_width();
    let mut out = Vec::new();

    let score_str = format!("{}/100", result.score);
    let bar = score_bar(result.score, 20);
    if use_colors {
        let colored_bar = match score_band(result.score) {
            ScoreBand::Strong => bar.green().to_string(),
            ScoreBand::Mixed => bar.yellow().to_string(),
            ScoreBand::Weak => bar.red().to_string(),
        };
        out.push(format!("{} {}  {}", "Business Health Score:".bold(), score_str.bold(), colored_bar));
    } else {
        out.push(format!("Business Health Score: {}  {}", score_str, bar));
    }

    let b = &result.benchmark;
    let industry_line = format!(
        "Industry: {} (avg execution {}%, top performer {}%, avg growth {}%)",
        result.industry, b.execution_rate, b.top_performer, b.avg_growth
    );
    if use_colors {
        out.push(industry_line.dimmed().to_string());
    } else {
        out.push(industry_line);
    }

    let heading = |s: &str| if use_colors { s.bold().to_string() } else { s.to_string() };

    if result.insights.is_empty() {
        out.push(String::new());
        out.push("Answer more questions to see personalized insights".to_string());
    }
    push_section(&mut out, heading("Insights:"), &result.insights, wrap_width);
    push_section(&mut out, heading("Critical Risks:"), &result.risks, wrap_width);
    push_section(&mut out, heading("Competitive Strengths:"), &result.opportunities, wrap_width);

    if verbose && !result.breakdown.is_empty() {
        out.push(String::new());
        out.push(heading("Breakdown:"));
        for c in &result.breakdown {
            out.push(format!("  {:<12} {:>2}/10  {}", c.section, c.points, c.description));
        }
        let (total, max) = result.totals();
        out.push(format!("  {:<12} {:>2}/{}", "TOTAL", total, max));
    }

    out.join("\n")
}

/// List the question bank with the values `score --answer` accepts.
pub fn format_question_list(questions: &[Question], use_colors: bool) -> String {
    let mut out = Vec::new();

    for (i, q) in questions.iter().enumerate() {
        if i > 0 {
            out.push(String::new());
        }
        let header = format!("{}. [{}] {}", i + 1, q.section, q.text);
        if use_colors {
            out.push(header.bold().to_string());
            out.push(format!("   id: {}", q.id.cyan()));
        } else {
            out.push(header);
            out.push(format!("   id: {}", q.id));
        }

        match &q.kind {
            QuestionKind::SingleChoice { options } => {
                let key_width = options.iter().map(|o| o.key.len()).max().unwrap_or(0);
                for o in options {
                    out.push(format!(
                        "   {:<width$}  {:>2}  {}",
                        o.key,
                        o.weight,
                        o.label,
                        width = key_width
                    ));
                }
            }
            QuestionKind::PercentageSlider { .. } => {
                out.push("   value: 0-100 (percent)".to_string());
            }
        }
    }

    out.join("\n")
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a ScoreResult,
    radar: Vec<RadarPoint>,
    comparison: Vec<ComparisonPoint>,
    generated_at: DateTime<Utc>,
}

/// Format a score result as pretty JSON, including chart series.
pub fn format_json(result: &ScoreResult) -> Result<String> {
    let report = JsonReport {
        result,
        radar: radar_data(result.score),
        comparison: comparison_data(result),
        generated_at: Utc::now(),
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{compute_score, default_questions, parse_assignments, BenchmarkTable};

    fn sample_result(inputs: &[&str]) -> ScoreResult {
        let questions = default_questions();
        let inputs: Vec<String> = inputs.iter().map(|s| s.to_string()).collect();
        let record = parse_assignments(&inputs, &questions).unwrap();
        compute_score(&record, &questions, &BenchmarkTable::default())
    }

    #[test]
    fn test_score_bar() {
        assert_eq!(score_bar(0, 4), "░░░░");
        assert_eq!(score_bar(50, 4), "██░░");
        assert_eq!(score_bar(100, 4), "████");
    }

    #[test]
    fn test_score_band() {
        assert_eq!(score_band(70), ScoreBand::Strong);
        assert_eq!(score_band(69), ScoreBand::Mixed);
        assert_eq!(score_band(39), ScoreBand::Weak);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(27_000), "27,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("Execution chaos. Everything is priority", 16);
        assert_eq!(lines, vec!["Execution chaos.", "Everything is", "priority"]);
    }

    #[test]
    fn test_report_empty() {
        let report = format_report(&sample_result(&[]), false, false);
        assert!(report.contains("Business Health Score: 0/100"));
        assert!(report.contains("Answer more questions"));
        assert!(!report.contains("Critical Risks:"));
    }

    #[test]
    fn test_report_sections() {
        let result = sample_result(&["industry=finance", "competitive_response=3m"]);
        let report = format_report(&result, false, false);
        assert!(report.contains("Business Health Score: 50/100"));
        assert!(report.contains("Industry: finance (avg execution 73%"));
        assert!(report.contains("Critical Risks:"));
        assert!(report.contains("SPEED: Critical weakness identified"));
        assert!(report.contains("BATTLEFIELD: Competitive strength"));
        assert!(!report.contains("Breakdown:"));
    }

    #[test]
    fn test_report_verbose_breakdown() {
        let result = sample_result(&["industry=finance", "execution_rate=70"]);
        let report = format_report(&result, false, true);
        assert!(report.contains("Breakdown:"));
        assert!(report.contains("70% -> 7"));
        assert!(report.contains("TOTAL        16/20"));
    }

    #[test]
    fn test_question_list() {
        let list = format_question_list(&default_questions(), false);
        assert!(list.contains("id: competitive_response"));
        assert!(list.contains("24h"));
        assert!(list.contains("value: 0-100"));
    }

    #[test]
    fn test_json_report() {
        let result = sample_result(&["industry=finance"]);
        let json = format_json(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["score"], 90);
        assert_eq!(value["industry"], "finance");
        assert_eq!(value["benchmark"]["executionRate"], 73);
        assert_eq!(value["radar"].as_array().unwrap().len(), 5);
        assert_eq!(value["comparison"][2]["value"], 91);
    }
}
