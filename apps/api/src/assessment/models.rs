#![allow(dead_code)]

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six fixed dimensions scored by the assessment.
///
/// Declaration order is the canonical insertion order of the score mapping.
/// Ranking ties are broken by this order, so do not reorder the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalityTrait {
    Technical,
    Leadership,
    Creativity,
    Communication,
    RiskTaking,
    ProblemSolving,
}

impl PersonalityTrait {
    pub const ALL: [PersonalityTrait; 6] = [
        PersonalityTrait::Technical,
        PersonalityTrait::Leadership,
        PersonalityTrait::Creativity,
        PersonalityTrait::Communication,
        PersonalityTrait::RiskTaking,
        PersonalityTrait::ProblemSolving,
    ];

    /// Wire key, e.g. `riskTaking`.
    pub fn key(self) -> &'static str {
        match self {
            PersonalityTrait::Technical => "technical",
            PersonalityTrait::Leadership => "leadership",
            PersonalityTrait::Creativity => "creativity",
            PersonalityTrait::Communication => "communication",
            PersonalityTrait::RiskTaking => "riskTaking",
            PersonalityTrait::ProblemSolving => "problemSolving",
        }
    }

    /// Human label used in the strengths / growth areas lists.
    pub fn label(self) -> &'static str {
        match self {
            PersonalityTrait::Technical => "Technical",
            PersonalityTrait::Leadership => "Leadership",
            PersonalityTrait::Creativity => "Creativity",
            PersonalityTrait::Communication => "Communication",
            PersonalityTrait::RiskTaking => "Risk Taking",
            PersonalityTrait::ProblemSolving => "Problem Solving",
        }
    }

    fn index(self) -> usize {
        match self {
            PersonalityTrait::Technical => 0,
            PersonalityTrait::Leadership => 1,
            PersonalityTrait::Creativity => 2,
            PersonalityTrait::Communication => 3,
            PersonalityTrait::RiskTaking => 4,
            PersonalityTrait::ProblemSolving => 5,
        }
    }
}

impl fmt::Display for PersonalityTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Additive point accumulators for all six traits. Starts at zero and only grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitScores {
    pub technical: u32,
    pub leadership: u32,
    pub creativity: u32,
    pub communication: u32,
    pub risk_taking: u32,
    pub problem_solving: u32,
}

impl TraitScores {
    pub fn get(&self, t: PersonalityTrait) -> u32 {
        self.entries()[t.index()].1
    }

    pub fn add(&mut self, t: PersonalityTrait, points: u32) {
        let slot = match t {
            PersonalityTrait::Technical => &mut self.technical,
            PersonalityTrait::Leadership => &mut self.leadership,
            PersonalityTrait::Creativity => &mut self.creativity,
            PersonalityTrait::Communication => &mut self.communication,
            PersonalityTrait::RiskTaking => &mut self.risk_taking,
            PersonalityTrait::ProblemSolving => &mut self.problem_solving,
        };
        *slot = slot.saturating_add(points);
    }

    /// All scores in canonical trait order.
    pub fn entries(&self) -> [(PersonalityTrait, u32); 6] {
        [
            (PersonalityTrait::Technical, self.technical),
            (PersonalityTrait::Leadership, self.leadership),
            (PersonalityTrait::Creativity, self.creativity),
            (PersonalityTrait::Communication, self.communication),
            (PersonalityTrait::RiskTaking, self.risk_taking),
            (PersonalityTrait::ProblemSolving, self.problem_solving),
        ]
    }
}

/// A recorded answer: an option id for choice questions, a number for sliders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Scale(i64),
    Choice(String),
}

impl AnswerValue {
    pub fn choice(id: &str) -> Self {
        AnswerValue::Choice(id.to_string())
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Scale(v) => write!(f, "{v}"),
            AnswerValue::Choice(id) => write!(f, "'{id}'"),
        }
    }
}

/// Outcome of one completed attempt. Immutable once built; a retake replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub scores: TraitScores,
    pub strengths: Vec<PersonalityTrait>,
    pub weaknesses: Vec<PersonalityTrait>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_keys_serialize_camel_case() {
        let json = serde_json::to_string(&PersonalityTrait::ProblemSolving).unwrap();
        assert_eq!(json, "\"problemSolving\"");
        for t in PersonalityTrait::ALL {
            assert_eq!(serde_json::to_string(&t).unwrap(), format!("\"{}\"", t.key()));
        }
    }

    #[test]
    fn test_scores_serialize_with_trait_keys() {
        let mut scores = TraitScores::default();
        scores.add(PersonalityTrait::RiskTaking, 70);
        let value = serde_json::to_value(scores).unwrap();
        assert_eq!(value["riskTaking"], 70);
        assert_eq!(value["technical"], 0);
    }

    #[test]
    fn test_add_accumulates() {
        let mut scores = TraitScores::default();
        scores.add(PersonalityTrait::Communication, 25);
        scores.add(PersonalityTrait::Communication, 20);
        assert_eq!(scores.get(PersonalityTrait::Communication), 45);
        assert_eq!(scores.get(PersonalityTrait::Leadership), 0);
    }

    #[test]
    fn test_entries_follow_canonical_order() {
        let order: Vec<_> = TraitScores::default().entries().iter().map(|(t, _)| *t).collect();
        assert_eq!(order, PersonalityTrait::ALL.to_vec());
    }

    #[test]
    fn test_answer_value_untagged() {
        let scale: AnswerValue = serde_json::from_str("7").unwrap();
        assert_eq!(scale, AnswerValue::Scale(7));
        let choice: AnswerValue = serde_json::from_str("\"b\"").unwrap();
        assert_eq!(choice, AnswerValue::choice("b"));
    }
}
