pub mod answers;
pub mod benchmark;
pub mod config;
pub mod engine;
pub mod question;
pub mod validation;

pub use answers::{parse_assignment, parse_assignments, Answer, AnswerRecord};
pub use benchmark::{BenchmarkTable, IndustryBenchmark, DEFAULT_INDUSTRY};
pub use config::ScoringConfig;
pub use engine::{compute_score, compute_score_with, QuestionContribution, ScoreResult};
pub use question::{default_questions, find_question, AnswerOption, BandedInsights, Question, QuestionKind};
pub use validation::{validate_question_bank, validate_scoring};
