#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::assessment::errors::AssessmentError;
use crate::assessment::models::AnswerValue;
use crate::assessment::questions::{QuestionBank, SliderPolicy};

/// Answers keyed by question index, iterated in question order.
pub type AnswerMap = BTreeMap<usize, AnswerValue>;

/// Collects one answer per question. Re-answering overwrites; no history is kept.
#[derive(Debug, Clone)]
pub struct AnswerCollector {
    bank: Arc<QuestionBank>,
    policy: SliderPolicy,
    answers: AnswerMap,
}

impl AnswerCollector {
    pub fn new(bank: Arc<QuestionBank>, policy: SliderPolicy) -> Self {
        Self {
            bank,
            policy,
            answers: AnswerMap::new(),
        }
    }

    /// Validates `value` against the question at `index` and stores it.
    /// Returns the value actually stored, which differs from the input only
    /// when a slider value was clamped.
    pub fn record_answer(
        &mut self,
        index: usize,
        value: AnswerValue,
    ) -> Result<AnswerValue, AssessmentError> {
        let question = self.bank.get(index)?;
        let stored = question.validate(index, value, self.policy)?;
        self.answers.insert(index, stored.clone());
        Ok(stored)
    }

    pub fn get(&self, index: usize) -> Option<&AnswerValue> {
        self.answers.get(&index)
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.answers.contains_key(&index)
    }

    /// True when every index in `0..question_count` has a value.
    pub fn is_complete(&self) -> bool {
        (0..self.bank.len()).all(|i| self.answers.contains_key(&i))
    }

    pub fn missing(&self) -> Vec<usize> {
        (0..self.bank.len())
            .filter(|i| !self.answers.contains_key(i))
            .collect()
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn question_count(&self) -> usize {
        self.bank.len()
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }
}
