//! Quiz session state owned by the view layer.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::scoring::{
    compute_score_with, Answer, AnswerRecord, BenchmarkTable, Question, QuestionKind, ScoreResult,
    ScoringConfig,
};

pub const SLIDER_DEFAULT: u8 = 50;
pub const SLIDER_STEP: u8 = 5;

/// Email captured at the end of the quiz. Kept in memory only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lead {
    pub email: String,
    pub score: u8,
    pub industry: String,
    pub submitted_at: DateTime<Utc>,
}

pub struct QuizSession {
    questions: Vec<Question>,
    benchmarks: BenchmarkTable,
    rules: ScoringConfig,
    answers: AnswerRecord,
    result: ScoreResult,
    current: usize,
    pub show_results: bool,
    pub quiz_started: bool,
    pub exit_intent_visible: bool,
    pub email: String,
    pub slider_value: u8,
    lead: Option<Lead>,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>, benchmarks: BenchmarkTable, rules: ScoringConfig) -> Self {
        let answers = AnswerRecord::new();
        let result = compute_score_with(&answers, &questions, &benchmarks, &rules);
        Self {
            questions,
            benchmarks,
            rules,
            answers,
            result,
            current: 0,
            show_results: false,
            quiz_started: false,
            exit_intent_visible: false,
            email: String::new(),
            slider_value: SLIDER_DEFAULT,
            lead: None,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn result(&self) -> &ScoreResult {
        &self.result
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// The question being asked, or None once results are showing
    pub fn current_question(&self) -> Option<&Question> {
        if self.show_results {
            return None;
        }
        self.questions.get(self.current)
    }

    pub fn progress_percent(&self) -> u8 {
        crate::charts::progress_percent(&self.answers, &self.questions)
    }

    /// Record an answer, rescore, and move on.
    ///
    /// Advances to the next question, or switches to results after the last one.
    pub fn answer(&mut self, question_id: &str, answer: Answer) {
        self.answers.set(question_id, answer);
        self.recompute();
        tracing::debug!(question_id, score = self.result.score, "answer recorded");

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.slider_value = SLIDER_DEFAULT;
        } else {
            self.show_results = true;
        }
    }

    /// Answer the current single-choice question with the option at `index`.
    pub fn choose_option(&mut self, index: usize) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        let Some(option) = question.options().get(index).cloned() else {
            return false;
        };
        let id = question.id.clone();
        self.answer(&id, Answer::Choice(option));
        true
    }

    /// Answer the current percentage question with the slider value.
    pub fn submit_slider(&mut self) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        if !matches!(question.kind, QuestionKind::PercentageSlider { .. }) {
            return false;
        }
        let id = question.id.clone();
        let value = self.slider_value;
        self.answer(&id, Answer::Percentage(value));
        true
    }

    pub fn slider_increase(&mut self) {
        self.slider_value = self.slider_value.saturating_add(SLIDER_STEP).min(100);
    }

    pub fn slider_decrease(&mut self) {
        self.slider_value = self.slider_value.saturating_sub(SLIDER_STEP);
    }

    pub fn start_quiz(&mut self) {
        self.quiz_started = true;
    }

    /// Jump straight to the results panel with whatever has been answered.
    pub fn reveal_results(&mut self) {
        self.show_results = true;
    }

    /// Show the exit-intent modal unless the quiz has already been started.
    pub fn trigger_exit_intent(&mut self) -> bool {
        if !self.quiz_started {
            self.exit_intent_visible = true;
        }
        self.exit_intent_visible
    }

    pub fn dismiss_exit_intent(&mut self) {
        self.exit_intent_visible = false;
    }

    pub fn accept_exit_intent(&mut self) {
        self.exit_intent_visible = false;
        self.start_quiz();
    }

    /// Capture the entered email. Nothing is sent anywhere.
    pub fn submit_email(&mut self) -> Result<&Lead> {
        let email = self.email.trim().to_string();
        if !is_plausible_email(&email) {
            bail!("'{}' does not look like an email address", email);
        }

        tracing::info!(industry = %self.result.industry, score = self.result.score, "lead captured");
        Ok(&*self.lead.insert(Lead {
            email,
            score: self.result.score,
            industry: self.result.industry.clone(),
            submitted_at: Utc::now(),
        }))
    }

    pub fn lead(&self) -> Option<&Lead> {
        self.lead.as_ref()
    }

    /// Start over, keeping the question bank and rules.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.current = 0;
        self.show_results = false;
        self.slider_value = SLIDER_DEFAULT;
        self.email.clear();
        self.lead = None;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.result = compute_score_with(&self.answers, &self.questions, &self.benchmarks, &self.rules);
    }
}

fn is_plausible_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !s.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::default_questions;

    fn session() -> QuizSession {
        QuizSession::new(default_questions(), BenchmarkTable::default(), ScoringConfig::default())
    }

    #[test]
    fn test_new_session_is_empty() {
        let s = session();
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.result().score, 0);
        assert_eq!(s.progress_percent(), 0);
        assert_eq!(s.current_question().unwrap().id, "industry");
    }

    #[test]
    fn test_answer_advances_and_rescores() {
        let mut s = session();
        assert!(s.choose_option(4)); // finance, weight 9
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.result().score, 90);
        assert_eq!(s.result().industry, "finance");
        assert_eq!(s.progress_percent(), 17);
    }

    #[test]
    fn test_last_answer_shows_results() {
        let mut s = session();
        for _ in 0..5 {
            assert!(s.choose_option(0));
        }
        assert_eq!(s.current_question().unwrap().id, "execution_rate");
        assert!(!s.choose_option(0)); // slider has no options

        s.slider_increase();
        s.slider_increase();
        assert_eq!(s.slider_value, 60);
        assert!(s.submit_slider());

        assert!(s.show_results);
        assert!(s.current_question().is_none());
        assert_eq!(s.progress_percent(), 100);
        // 8 + 10 + 10 + 10 + 6 + 6 = 50 / 60
        assert_eq!(s.result().score, 83);
    }

    #[test]
    fn test_slider_clamps() {
        let mut s = session();
        for _ in 0..30 {
            s.slider_increase();
        }
        assert_eq!(s.slider_value, 100);
        for _ in 0..30 {
            s.slider_decrease();
        }
        assert_eq!(s.slider_value, 0);
    }

    #[test]
    fn test_submit_slider_rejects_choice_question() {
        let mut s = session();
        assert!(!s.submit_slider());
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn test_exit_intent_only_before_start() {
        let mut s = session();
        assert!(s.trigger_exit_intent());
        s.accept_exit_intent();
        assert!(s.quiz_started);
        assert!(!s.exit_intent_visible);
        assert!(!s.trigger_exit_intent());
    }

    #[test]
    fn test_dismiss_exit_intent() {
        let mut s = session();
        s.trigger_exit_intent();
        s.dismiss_exit_intent();
        assert!(!s.exit_intent_visible);
        assert!(!s.quiz_started);
    }

    #[test]
    fn test_submit_email() {
        let mut s = session();
        s.email = "not-an-email".to_string();
        assert!(s.submit_email().is_err());
        assert!(s.lead().is_none());

        s.email = "  ceo@company.com ".to_string();
        let lead = s.submit_email().unwrap();
        assert_eq!(lead.email, "ceo@company.com");
        assert_eq!(lead.industry, "tech");
    }

    #[test]
    fn test_plausible_email() {
        assert!(is_plausible_email("a@b.co"));
        assert!(!is_plausible_email("a@b"));
        assert!(!is_plausible_email("@b.co"));
        assert!(!is_plausible_email("a@@b.co"));
        assert!(!is_plausible_email("a b@c.co"));
    }

    #[test]
    fn test_reset() {
        let mut s = session();
        s.choose_option(0);
        s.email = "x@y.z".to_string();
        s.reset();
        assert_eq!(s.current_index(), 0);
        assert!(s.answers().is_empty());
        assert_eq!(s.result().score, 0);
        assert!(s.email.is_empty());
    }
}
