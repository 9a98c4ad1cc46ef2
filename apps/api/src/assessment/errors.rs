use thiserror::Error;

use crate::assessment::session::Phase;

/// Failures raised by the assessment core. None of them are fatal to the process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssessmentError {
    /// Scoring was requested before every question had an answer.
    #[error("assessment incomplete: unanswered questions {missing:?}")]
    Incomplete { missing: Vec<usize> },

    #[error("question {index} does not exist (bank has {count} questions)")]
    QuestionOutOfRange { index: usize, count: usize },

    #[error("question {index} has not been reached yet (current question is {current})")]
    QuestionNotReached { index: usize, current: usize },

    #[error("slider answer {value} for question {index} is outside {min}..={max}")]
    SliderOutOfRange {
        index: usize,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("option '{option}' is not offered by question {index}")]
    UnknownOption { index: usize, option: String },

    #[error("question {index} expects {expected}, got {got}")]
    AnswerKindMismatch {
        index: usize,
        expected: &'static str,
        got: String,
    },

    #[error("cannot {action} while assessment is {from}")]
    InvalidTransition { from: Phase, action: &'static str },
}

impl AssessmentError {
    /// True for errors caused by a malformed answer rather than flow state.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AssessmentError::QuestionOutOfRange { .. }
                | AssessmentError::QuestionNotReached { .. }
                | AssessmentError::SliderOutOfRange { .. }
                | AssessmentError::UnknownOption { .. }
                | AssessmentError::AnswerKindMismatch { .. }
        )
    }
}
