//! Question bank — the fixed, ordered list of quiz items.
//!
//! Every question carries its own scoring rule, so scores are keyed by the
//! question definition rather than by a magic position in a side table.

use std::str::FromStr;

use serde::Serialize;

use crate::assessment::errors::AssessmentError;
use crate::assessment::models::{AnswerValue, PersonalityTrait, TraitScores};

/// Points added to one trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Delta {
    pub target: PersonalityTrait,
    pub points: u32,
}

const fn delta(target: PersonalityTrait, points: u32) -> Delta {
    Delta { target, points }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChoiceOption {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(skip)]
    pub deltas: Vec<Delta>,
}

impl ChoiceOption {
    fn new(id: &str, text: &str, deltas: &[Delta]) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            emoji: None,
            deltas: deltas.to_vec(),
        }
    }

    fn with_emoji(mut self, emoji: &str) -> Self {
        self.emoji = Some(emoji.to_string());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<ChoiceOption>,
    },
    Slider {
        min: i64,
        max: i64,
        default: i64,
        labels: [String; 2],
        /// The slider value is multiplied by `factor` and added to `target`.
        #[serde(skip)]
        target: PersonalityTrait,
        #[serde(skip)]
        factor: u32,
    },
    EmojiChoice {
        options: Vec<ChoiceOption>,
    },
}

impl QuestionKind {
    fn name(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice { .. } => "multiple-choice",
            QuestionKind::Slider { .. } => "slider",
            QuestionKind::EmojiChoice { .. } => "emoji-choice",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: u32,
    #[serde(rename = "question")]
    pub prompt: String,
    pub subtitle: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// What the collector does with a slider value outside the declared range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SliderPolicy {
    #[default]
    Reject,
    Clamp,
}

impl FromStr for SliderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(SliderPolicy::Reject),
            "clamp" => Ok(SliderPolicy::Clamp),
            other => Err(format!("unknown slider policy '{other}' (expected reject|clamp)")),
        }
    }
}

impl Question {
    /// Checks `value` against this question's kind and returns the value to store.
    pub fn validate(
        &self,
        index: usize,
        value: AnswerValue,
        policy: SliderPolicy,
    ) -> Result<AnswerValue, AssessmentError> {
        match (&self.kind, value) {
            (QuestionKind::Slider { min, max, .. }, AnswerValue::Scale(v)) => {
                if (*min..=*max).contains(&v) {
                    Ok(AnswerValue::Scale(v))
                } else if policy == SliderPolicy::Clamp {
                    Ok(AnswerValue::Scale(v.clamp(*min, *max)))
                } else {
                    Err(AssessmentError::SliderOutOfRange {
                        index,
                        value: v,
                        min: *min,
                        max: *max,
                    })
                }
            }
            (
                QuestionKind::MultipleChoice { options } | QuestionKind::EmojiChoice { options },
                AnswerValue::Choice(id),
            ) => {
                if options.iter().any(|o| o.id == id) {
                    Ok(AnswerValue::Choice(id))
                } else {
                    Err(AssessmentError::UnknownOption { index, option: id })
                }
            }
            (kind, other) => Err(AssessmentError::AnswerKindMismatch {
                index,
                expected: kind.name(),
                got: other.to_string(),
            }),
        }
    }

    /// Adds this question's contribution for `value` into `scores`.
    ///
    /// Slider values are not clamped here; range checks belong to the collector.
    pub fn contribute(
        &self,
        index: usize,
        value: &AnswerValue,
        scores: &mut TraitScores,
    ) -> Result<(), AssessmentError> {
        match (&self.kind, value) {
            (
                QuestionKind::Slider {
                    min,
                    max,
                    target,
                    factor,
                    ..
                },
                AnswerValue::Scale(v),
            ) => {
                let v_u32 = u32::try_from(*v).map_err(|_| AssessmentError::SliderOutOfRange {
                    index,
                    value: *v,
                    min: *min,
                    max: *max,
                })?;
                scores.add(*target, v_u32.saturating_mul(*factor));
                Ok(())
            }
            (
                QuestionKind::MultipleChoice { options } | QuestionKind::EmojiChoice { options },
                AnswerValue::Choice(id),
            ) => {
                let option = options.iter().find(|o| &o.id == id).ok_or_else(|| {
                    AssessmentError::UnknownOption {
                        index,
                        option: id.clone(),
                    }
                })?;
                for d in &option.deltas {
                    scores.add(d.target, d.points);
                }
                Ok(())
            }
            (kind, other) => Err(AssessmentError::AnswerKindMismatch {
                index,
                expected: kind.name(),
                got: other.to_string(),
            }),
        }
    }

    /// Value a slider shows before the user touches it.
    pub fn default_value(&self) -> Option<AnswerValue> {
        match &self.kind {
            QuestionKind::Slider { default, .. } => Some(AnswerValue::Scale(*default)),
            _ => None,
        }
    }
}

/// Immutable ordered set of questions, built once at startup.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn get(&self, index: usize) -> Result<&Question, AssessmentError> {
        self.questions
            .get(index)
            .ok_or(AssessmentError::QuestionOutOfRange {
                index,
                count: self.questions.len(),
            })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Percent shown on the progress bar while `current` is on screen.
    pub fn progress(&self, current: usize) -> u32 {
        if self.questions.is_empty() {
            return 0;
        }
        let answered = (current + 1).min(self.questions.len());
        ((answered as f64 / self.questions.len() as f64) * 100.0).round() as u32
    }

    /// The five-question career assessment.
    pub fn canonical() -> Self {
        use crate::assessment::models::PersonalityTrait::*;

        let questions = vec![
            Question {
                id: 1,
                prompt: "What energizes you the most?".to_string(),
                subtitle: "Think about what activities make you feel most alive and engaged."
                    .to_string(),
                kind: QuestionKind::MultipleChoice {
                    options: vec![
                        ChoiceOption::new(
                            "a",
                            "Solving complex problems and puzzles",
                            &[delta(ProblemSolving, 25)],
                        ),
                        ChoiceOption::new(
                            "b",
                            "Leading and inspiring others",
                            &[delta(Leadership, 25)],
                        ),
                        ChoiceOption::new(
                            "c",
                            "Creating something new from scratch",
                            &[delta(Creativity, 25)],
                        ),
                        ChoiceOption::new(
                            "d",
                            "Helping people succeed and grow",
                            &[delta(Communication, 25)],
                        ),
                    ],
                },
            },
            Question {
                id: 2,
                prompt: "How comfortable are you with taking risks?".to_string(),
                subtitle: "Consider both personal and professional situations.".to_string(),
                kind: QuestionKind::Slider {
                    min: 1,
                    max: 10,
                    default: 5,
                    labels: [
                        "Very Conservative".to_string(),
                        "Very Risk-Taking".to_string(),
                    ],
                    target: RiskTaking,
                    factor: 10,
                },
            },
            Question {
                id: 3,
                prompt: "How do you feel about working in teams?".to_string(),
                subtitle: "Your honest preference for collaboration vs. independent work."
                    .to_string(),
                kind: QuestionKind::EmojiChoice {
                    options: vec![
                        ChoiceOption::new("a", "Love it!", &[delta(Communication, 25)])
                            .with_emoji("😍"),
                        ChoiceOption::new("b", "Enjoy it", &[delta(Communication, 15)])
                            .with_emoji("😊"),
                        ChoiceOption::new("c", "It's okay", &[delta(Communication, 10)])
                            .with_emoji("😐"),
                        ChoiceOption::new("d", "Prefer solo", &[delta(RiskTaking, 15)])
                            .with_emoji("😅"),
                    ],
                },
            },
            Question {
                id: 4,
                prompt: "What's your ideal work environment?".to_string(),
                subtitle: "Where do you see yourself thriving professionally?".to_string(),
                kind: QuestionKind::MultipleChoice {
                    options: vec![
                        ChoiceOption::new(
                            "a",
                            "Fast-paced startup with lots of change",
                            &[delta(RiskTaking, 20), delta(Creativity, 15)],
                        ),
                        ChoiceOption::new(
                            "b",
                            "Established corporation with clear structure",
                            &[delta(Leadership, 20), delta(ProblemSolving, 15)],
                        ),
                        ChoiceOption::new(
                            "c",
                            "Remote/flexible with autonomy",
                            &[delta(Creativity, 20), delta(RiskTaking, 10)],
                        ),
                        ChoiceOption::new(
                            "d",
                            "Research institution focused on innovation",
                            &[delta(Technical, 20), delta(Creativity, 15)],
                        ),
                    ],
                },
            },
            Question {
                id: 5,
                prompt: "What motivates you most in your career?".to_string(),
                subtitle: "Choose the factor that drives you to excel.".to_string(),
                kind: QuestionKind::MultipleChoice {
                    options: vec![
                        ChoiceOption::new(
                            "a",
                            "Financial success and stability",
                            &[delta(Leadership, 20)],
                        ),
                        ChoiceOption::new(
                            "b",
                            "Making a positive impact on society",
                            &[delta(Communication, 20)],
                        ),
                        ChoiceOption::new(
                            "c",
                            "Personal growth and learning",
                            &[delta(Technical, 20)],
                        ),
                        ChoiceOption::new(
                            "d",
                            "Recognition and leadership opportunities",
                            &[delta(Leadership, 20)],
                        ),
                    ],
                },
            },
        ];

        Self::new(questions)
    }
}
