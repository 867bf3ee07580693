use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::question::{find_question, AnswerOption, Question, QuestionKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Choice(AnswerOption),
    Percentage(u8),
}

/// Answers keyed by question id, kept in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerRecord {
    entries: Vec<(String, Answer)>,
}

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an answer. Re-answering a question replaces it in place.
    pub fn set(&mut self, question_id: impl Into<String>, answer: Answer) {
        let question_id = question_id.into();
        match self.entries.iter_mut().find(|(id, _)| *id == question_id) {
            Some(entry) => entry.1 = answer,
            None => self.entries.push((question_id, answer)),
        }
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.entries
            .iter()
            .find(|(id, _)| id == question_id)
            .map(|(_, a)| a)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.entries.iter().map(|(id, a)| (id.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of answers whose id matches a question in `questions`
    pub fn answered_count(&self, questions: &[Question]) -> usize {
        self.entries
            .iter()
            .filter(|(id, _)| find_question(questions, id).is_some())
            .count()
    }
}

impl<K: Into<String>> FromIterator<(K, Answer)> for AnswerRecord {
    fn from_iter<I: IntoIterator<Item = (K, Answer)>>(iter: I) -> Self {
        let mut record = AnswerRecord::new();
        for (k, a) in iter {
            record.set(k, a);
        }
        record
    }
}

/// Parse a percentage like "70" or "70%"
pub fn parse_percentage(s: &str) -> Result<u8> {
    let trimmed = s.trim();
    let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    let value: u32 = match digits.parse() {
        Ok(v) => v,
        Err(_) => bail!("'{}' is not a whole percentage", s),
    };
    if value > 100 {
        bail!("percentage {} is out of range 0-100", value);
    }
    Ok(value as u8)
}

/// Parse an `id=value` assignment against the question bank.
///
/// Single-choice values are option keys (or labels); percentage values are
/// whole numbers 0-100 with an optional `%`.
pub fn parse_assignment(s: &str, questions: &[Question]) -> Result<(String, Answer)> {
    let Some((id, value)) = s.split_once('=') else {
        bail!("expected QUESTION=VALUE, got '{}'", s);
    };
    let id = id.trim();

    let Some(question) = find_question(questions, id) else {
        let known: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        bail!("unknown question '{}' (known: {})", id, known.join(", "));
    };

    let answer = match &question.kind {
        QuestionKind::SingleChoice { options } => match question.find_option(value) {
            Some(option) => Answer::Choice(option.clone()),
            None => {
                let keys: Vec<&str> = options.iter().map(|o| o.key.as_str()).collect();
                bail!(
                    "unknown option '{}' for {} (choose one of: {})",
                    value.trim(),
                    id,
                    keys.join(", ")
                );
            }
        },
        QuestionKind::PercentageSlider { .. } => Answer::Percentage(parse_percentage(value)?),
    };

    Ok((id.to_string(), answer))
}

/// Parse every assignment, collecting all errors instead of stopping at the first.
pub fn parse_assignments(
    inputs: &[String],
    questions: &[Question],
) -> Result<AnswerRecord, Vec<String>> {
    let mut record = AnswerRecord::new();
    let mut errors = Vec::new();

    for input in inputs {
        match parse_assignment(input, questions) {
            Ok((id, answer)) => record.set(id, answer),
            Err(e) => errors.push(format!("--answer {}: {}", input, e)),
        }
    }

    if errors.is_empty() {
        Ok(record)
    } else {
        Err(errors)
    }
}
