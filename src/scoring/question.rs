use serde::{Deserialize, Serialize};

/// Maximum weight a single question can contribute.
pub const MAX_QUESTION_WEIGHT: u32 = 10;

/// One selectable answer to a single-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub key: String,
    /// Scoring weight, 1-10
    pub weight: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
}

impl AnswerOption {
    pub fn new(label: &str, key: &str, weight: u32, insight: &str) -> Self {
        Self {
            label: label.to_string(),
            key: key.to_string(),
            weight,
            insight: Some(insight.to_string()),
        }
    }
}

/// Insight strings for a percentage question, selected by band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandedInsights {
    pub high: String,
    pub medium: String,
    pub low: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    SingleChoice { options: Vec<AnswerOption> },
    PercentageSlider { insights: BandedInsights },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub section: String,
    pub text: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    fn single(id: &str, section: &str, text: &str, options: Vec<AnswerOption>) -> Self {
        Self {
            id: id.to_string(),
            section: section.to_string(),
            text: text.to_string(),
            kind: QuestionKind::SingleChoice { options },
        }
    }

    fn percentage(id: &str, section: &str, text: &str, insights: BandedInsights) -> Self {
        Self {
            id: id.to_string(),
            section: section.to_string(),
            text: text.to_string(),
            kind: QuestionKind::PercentageSlider { insights },
        }
    }

    /// Options for single-choice questions, empty for sliders
    pub fn options(&self) -> &[AnswerOption] {
        match &self.kind {
            QuestionKind::SingleChoice { options } => options,
            QuestionKind::PercentageSlider { .. } => &[],
        }
    }

    /// Find an option by key (case-insensitive) or by exact label
    pub fn find_option(&self, needle: &str) -> Option<&AnswerOption> {
        let needle = needle.trim();
        self.options()
            .iter()
            .find(|o| o.key.eq_ignore_ascii_case(needle))
            .or_else(|| self.options().iter().find(|o| o.label == needle))
    }

    pub fn is_percentage(&self) -> bool {
        matches!(self.kind, QuestionKind::PercentageSlider { .. })
    }
}

/// Look up a question by id
pub fn find_question<'a>(questions: &'a [Question], id: &str) -> Option<&'a Question> {
    questions.iter().find(|q| q.id == id)
}

/// The built-in six-question Business MRI.
pub fn default_questions() -> Vec<Question> {
    vec![
        Question::single(
            "industry",
            "BATTLEFIELD",
            "What industry defines your battlefield?",
            vec![
                AnswerOption::new("Technology/SaaS", "tech", 8, "Tech moves fast. Your execution speed is everything."),
                AnswerOption::new("Manufacturing", "mfg", 7, "Operational excellence wins. Personal efficiency scales."),
                AnswerOption::new("Professional Services", "services", 6, "Your people are your product. Optimize them first."),
                AnswerOption::new("Healthcare", "health", 7, "Precision and speed save lives and profits."),
                AnswerOption::new("Financial Services", "finance", 9, "Trust and execution drive everything in finance."),
            ],
        ),
        Question::single(
            "competitive_response",
            "SPEED",
            "Your biggest competitor just announced a major move. How long until you respond?",
            vec![
                AnswerOption::new("Within 24 hours", "24h", 10, "Elite speed. You think like a champion."),
                AnswerOption::new("Within 1 week", "1w", 7, "Good speed, but champions move faster."),
                AnswerOption::new("Within 1 month", "1m", 4, "Too slow. Your competitors are eating your lunch."),
                AnswerOption::new("3+ months", "3m", 1, "Fatal speed. You're already behind."),
            ],
        ),
        Question::single(
            "personal_optimization",
            "EFFICIENCY",
            "What time do you wake up? (Personal efficiency drives business results)",
            vec![
                AnswerOption::new("Before 5:00 AM", "pre5", 10, "Champion mindset. Personal discipline creates business discipline."),
                AnswerOption::new("5:00 - 6:00 AM", "5to6", 8, "Good discipline. Room for optimization."),
                AnswerOption::new("6:00 - 7:00 AM", "6to7", 5, "Average. Your competitors are already working."),
                AnswerOption::new("After 7:00 AM", "post7", 2, "Behind before you start. Personal habits leak into business."),
            ],
        ),
        Question::single(
            "strategic_focus",
            "EXECUTION",
            "How many strategic priorities is your leadership team tracking?",
            vec![
                AnswerOption::new("1-3 priorities", "focused", 10, "Perfect focus. 80/20 principle in action."),
                AnswerOption::new("4-7 priorities", "manageable", 6, "Manageable but not optimal. Simplify further."),
                AnswerOption::new("8-15 priorities", "scattered", 3, "Scattered focus kills execution. Cut ruthlessly."),
                AnswerOption::new("15+ priorities", "chaos", 1, "Execution chaos. Everything is priority = nothing is priority."),
            ],
        ),
        Question::single(
            "talent_strategy",
            "CAPABILITY",
            "Your last 3 senior hires - promoted internally or recruited externally?",
            vec![
                AnswerOption::new("All promoted internally", "internal", 6, "Good loyalty, but are you upgrading capability?"),
                AnswerOption::new("Mix of internal/external", "mixed", 9, "Smart balance. Fresh thinking + cultural continuity."),
                AnswerOption::new("All recruited externally", "external", 7, "New blood, but culture integration is critical."),
                AnswerOption::new("Haven't hired in 12+ months", "stagnant", 3, "Stagnant capability. Growth requires new talent."),
            ],
        ),
        Question::percentage(
            "execution_rate",
            "RESULTS",
            "What percentage of your strategic initiatives get fully executed?",
            BandedInsights {
                high: "Elite execution. You're in the top 13% of companies.".to_string(),
                medium: "Good execution, but champions achieve 87%+ success rates.".to_string(),
                low: "Execution betrayal. Great strategies dying in implementation.".to_string(),
            },
        ),
    ]
}
