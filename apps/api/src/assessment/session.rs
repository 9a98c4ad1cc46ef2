//! Assessment flow for one user session.
//!
//! `NotStarted -> InProgress -> Submitting -> Completed`, and `Completed`
//! returns to `NotStarted` only through an explicit retake, which discards
//! the previous result.

#![allow(dead_code)]

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::assessment::answers::{AnswerCollector, AnswerMap};
use crate::assessment::errors::AssessmentError;
use crate::assessment::models::{AnswerValue, AssessmentResult};
use crate::assessment::questions::{QuestionBank, SliderPolicy};
use crate::assessment::results::{build_result, PathChoice};
use crate::assessment::scoring::score_collector;
use crate::enrichment::EnrichedResult;
use crate::models::user::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Submitting,
    Completed,
}

impl Phase {
    /// Wire name; used for both JSON and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::NotStarted => "not_started",
            Phase::InProgress => "in_progress",
            Phase::Submitting => "submitting",
            Phase::Completed => "completed",
        }
    }
}

impl Serialize for Phase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct AssessmentSession {
    pub id: Uuid,
    pub user: UserProfile,
    collector: AnswerCollector,
    phase: Phase,
    current: usize,
    /// Bumped on every retake; enrichment for an older attempt is dropped.
    attempt: u32,
    result: Option<AssessmentResult>,
    enrichment: Option<EnrichedResult>,
    selected_path: Option<PathChoice>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Serializable snapshot of a session for the client.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub phase: Phase,
    pub attempt: u32,
    pub current_question: usize,
    pub question_count: usize,
    pub progress: u32,
    pub answers: AnswerMap,
    /// Answer shown for the current question; sliders fall back to their default.
    pub current_answer: Option<AnswerValue>,
    pub can_advance: bool,
    pub is_last_question: bool,
    pub result: Option<AssessmentResult>,
    pub enrichment: Option<EnrichedResult>,
    pub selected_path: Option<PathChoice>,
    pub updated_at: DateTime<Utc>,
}

impl AssessmentSession {
    pub fn new(user: UserProfile, bank: Arc<QuestionBank>, policy: SliderPolicy) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user,
            collector: AnswerCollector::new(bank, policy),
            phase: Phase::NotStarted,
            current: 0,
            attempt: 1,
            result: None,
            enrichment: None,
            selected_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn result(&self) -> Option<&AssessmentResult> {
        self.result.as_ref()
    }

    pub fn enrichment(&self) -> Option<&EnrichedResult> {
        self.enrichment.as_ref()
    }

    pub fn selected_path(&self) -> Option<PathChoice> {
        self.selected_path
    }

    pub fn answers(&self) -> &AnswerMap {
        self.collector.answers()
    }

    fn require(&self, phase: Phase, action: &'static str) -> Result<(), AssessmentError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(AssessmentError::InvalidTransition {
                from: self.phase,
                action,
            })
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn start(&mut self) -> Result<(), AssessmentError> {
        match self.phase {
            Phase::NotStarted => {
                self.phase = Phase::InProgress;
                self.current = 0;
                self.touch();
                Ok(())
            }
            Phase::InProgress => Ok(()),
            from => Err(AssessmentError::InvalidTransition {
                from,
                action: "start",
            }),
        }
    }

    /// Records an answer for the question on screen.
    pub fn answer(&mut self, value: AnswerValue) -> Result<AnswerValue, AssessmentError> {
        let index = self.current;
        self.answer_at(index, value)
    }

    /// Records an answer for `index`, which must be the current question or
    /// one already passed. Answering implicitly starts a fresh session.
    pub fn answer_at(
        &mut self,
        index: usize,
        value: AnswerValue,
    ) -> Result<AnswerValue, AssessmentError> {
        let starting = self.phase == Phase::NotStarted;
        if !starting {
            self.require(Phase::InProgress, "answer")?;
        }
        if index > self.current {
            return Err(AssessmentError::QuestionNotReached {
                index,
                current: self.current,
            });
        }
        // A rejected first answer leaves the session unstarted.
        let stored = self.collector.record_answer(index, value)?;
        if starting {
            self.phase = Phase::InProgress;
        }
        self.touch();
        Ok(stored)
    }

    /// Moves to the next question. The current one must be answered.
    /// Stays put on the last question; submission is a separate step.
    pub fn next(&mut self) -> Result<usize, AssessmentError> {
        self.require(Phase::InProgress, "advance")?;
        if !self.collector.is_answered(self.current) {
            return Err(AssessmentError::Incomplete {
                missing: vec![self.current],
            });
        }
        if self.current + 1 < self.collector.question_count() {
            self.current += 1;
            self.touch();
        }
        Ok(self.current)
    }

    pub fn previous(&mut self) -> Result<usize, AssessmentError> {
        self.require(Phase::InProgress, "go back")?;
        if self.current > 0 {
            self.current -= 1;
            self.touch();
        }
        Ok(self.current)
    }

    /// Enters `Submitting`. Every question must be answered.
    pub fn begin_submit(&mut self) -> Result<(), AssessmentError> {
        self.require(Phase::InProgress, "submit")?;
        if !self.collector.is_complete() {
            return Err(AssessmentError::Incomplete {
                missing: self.collector.missing(),
            });
        }
        self.phase = Phase::Submitting;
        self.touch();
        Ok(())
    }

    /// Scores the collected answers and enters `Completed`.
    /// On a scoring failure the session falls back to `InProgress`.
    pub fn finish_submit(&mut self) -> Result<&AssessmentResult, AssessmentError> {
        self.require(Phase::Submitting, "finish submission")?;
        let scores = match score_collector(&self.collector) {
            Ok(scores) => scores,
            Err(e) => {
                self.phase = Phase::InProgress;
                return Err(e);
            }
        };
        self.phase = Phase::Completed;
        self.enrichment = None;
        self.touch();
        Ok(self.result.insert(build_result(scores)))
    }

    pub fn submit(&mut self) -> Result<&AssessmentResult, AssessmentError> {
        self.begin_submit()?;
        self.finish_submit()
    }

    /// Discards answers, result, enrichment and path, and returns to `NotStarted`.
    pub fn retake(&mut self) -> Result<(), AssessmentError> {
        self.require(Phase::Completed, "retake")?;
        self.collector.clear();
        self.current = 0;
        self.result = None;
        self.enrichment = None;
        self.selected_path = None;
        self.attempt += 1;
        self.phase = Phase::NotStarted;
        self.touch();
        Ok(())
    }

    pub fn select_path(&mut self, path: PathChoice) -> Result<(), AssessmentError> {
        self.require(Phase::Completed, "select a path")?;
        self.selected_path = Some(path);
        self.touch();
        Ok(())
    }

    /// Stores an enrichment response if it belongs to the live attempt.
    /// Returns false when the response is stale and was dropped.
    pub fn attach_enrichment(&mut self, attempt: u32, enriched: EnrichedResult) -> bool {
        if attempt != self.attempt || self.phase != Phase::Completed {
            return false;
        }
        self.enrichment = Some(enriched);
        self.touch();
        true
    }

    pub fn view(&self) -> SessionView {
        let bank = self.collector.bank();
        let current_answer = self.collector.get(self.current).cloned().or_else(|| {
            bank.get(self.current)
                .ok()
                .and_then(|q| q.default_value())
        });
        SessionView {
            id: self.id,
            user_id: self.user.id,
            phase: self.phase,
            attempt: self.attempt,
            current_question: self.current,
            question_count: bank.len(),
            progress: bank.progress(self.current),
            answers: self.collector.answers().clone(),
            current_answer,
            can_advance: self.collector.is_answered(self.current),
            is_last_question: self.current + 1 == bank.len(),
            result: self.result.clone(),
            enrichment: self.enrichment.clone(),
            selected_path: self.selected_path,
            updated_at: self.updated_at,
        }
    }
}
