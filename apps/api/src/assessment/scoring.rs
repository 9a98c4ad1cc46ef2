//! Trait scoring — pure, deterministic point tally over a complete answer set.

use crate::assessment::answers::{AnswerCollector, AnswerMap};
use crate::assessment::errors::AssessmentError;
use crate::assessment::models::TraitScores;
use crate::assessment::questions::QuestionBank;

/// Computes the six trait scores for `answers`.
///
/// Every question in `bank` must have an answer; a gap fails with
/// `AssessmentError::Incomplete` instead of being skipped, since a skipped
/// question silently produces a wrong profile. Answers are applied in
/// question order and only ever add points.
pub fn compute_scores(
    bank: &QuestionBank,
    answers: &AnswerMap,
) -> Result<TraitScores, AssessmentError> {
    let missing: Vec<usize> = (0..bank.len())
        .filter(|i| !answers.contains_key(i))
        .collect();
    if !missing.is_empty() {
        return Err(AssessmentError::Incomplete { missing });
    }

    let mut scores = TraitScores::default();
    for (index, question) in bank.questions().iter().enumerate() {
        if let Some(value) = answers.get(&index) {
            question.contribute(index, value, &mut scores)?;
        }
    }
    Ok(scores)
}

/// Scores whatever the collector currently holds.
pub fn score_collector(collector: &AnswerCollector) -> Result<TraitScores, AssessmentError> {
    compute_scores(collector.bank(), collector.answers())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::models::{AnswerValue, PersonalityTrait};
    use crate::assessment::results::{build_result, STRENGTH_COUNT, WEAKNESS_COUNT};

    fn answers(values: [AnswerValue; 5]) -> AnswerMap {
        values.into_iter().enumerate().collect()
    }

    fn golden_answers() -> AnswerMap {
        answers([
            AnswerValue::choice("a"),
            AnswerValue::Scale(7),
            AnswerValue::choice("a"),
            AnswerValue::choice("d"),
            AnswerValue::choice("c"),
        ])
    }

    #[test]
    fn test_golden_vector() {
        let bank = QuestionBank::canonical();
        let scores = compute_scores(&bank, &golden_answers()).unwrap();
        assert_eq!(
            scores,
            TraitScores {
                technical: 40,
                leadership: 0,
                creativity: 15,
                communication: 25,
                risk_taking: 70,
                problem_solving: 25,
            }
        );
    }

    #[test]
    fn test_deterministic() {
        let bank = QuestionBank::canonical();
        let a = compute_scores(&bank, &golden_answers()).unwrap();
        let b = compute_scores(&bank, &golden_answers()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_slider_boundaries() {
        let bank = QuestionBank::canonical();
        for (slider, expected) in [(1, 10), (10, 100)] {
            let map = answers([
                AnswerValue::choice("a"),
                AnswerValue::Scale(slider),
                AnswerValue::choice("a"),
                AnswerValue::choice("b"),
                AnswerValue::choice("a"),
            ]);
            let scores = compute_scores(&bank, &map).unwrap();
            assert_eq!(scores.get(PersonalityTrait::RiskTaking), expected);
        }
    }

    #[test]
    fn test_slider_monotonic() {
        let bank = QuestionBank::canonical();
        let mut previous = 0;
        for slider in 1..=10 {
            let map = answers([
                AnswerValue::choice("b"),
                AnswerValue::Scale(slider),
                AnswerValue::choice("d"),
                AnswerValue::choice("a"),
                AnswerValue::choice("d"),
            ]);
            let risk = compute_scores(&bank, &map)
                .unwrap()
                .get(PersonalityTrait::RiskTaking);
            assert!(risk >= previous, "risk dropped at slider {slider}");
            previous = risk;
        }
    }

    #[test]
    fn test_slider_adds_to_other_risk_contributions() {
        let bank = QuestionBank::canonical();
        let map = answers([
            AnswerValue::choice("c"),
            AnswerValue::Scale(5),
            AnswerValue::choice("d"),
            AnswerValue::choice("a"),
            AnswerValue::choice("a"),
        ]);
        let scores = compute_scores(&bank, &map).unwrap();
        // 50 from the slider, 15 from "prefer solo", 20 from the startup environment
        assert_eq!(scores.risk_taking, 85);
        assert_eq!(scores.creativity, 40);
        assert_eq!(scores.leadership, 20);
    }

    #[test]
    fn test_incomplete_fails_fast() {
        let bank = QuestionBank::canonical();
        let mut map = golden_answers();
        map.remove(&2);
        map.remove(&4);
        assert_eq!(
            compute_scores(&bank, &map).unwrap_err(),
            AssessmentError::Incomplete { missing: vec![2, 4] }
        );
    }

    #[test]
    fn test_extra_indices_ignored() {
        let bank = QuestionBank::canonical();
        let mut map = golden_answers();
        map.insert(9, AnswerValue::choice("a"));
        let scores = compute_scores(&bank, &map).unwrap();
        assert_eq!(scores.technical, 40);
    }

    /// Walks every possible answer sheet: four options on each choice
    /// question and every slider stop.
    #[test]
    fn test_every_answer_combination() {
        let bank = QuestionBank::canonical();
        let options = ["a", "b", "c", "d"];
        let mut visited = 0;

        for q0 in options {
            for q2 in options {
                for q3 in options {
                    for q4 in options {
                        let mut previous: Option<TraitScores> = None;
                        for slider in 1..=10 {
                            let map = answers([
                                AnswerValue::choice(q0),
                                AnswerValue::Scale(slider),
                                AnswerValue::choice(q2),
                                AnswerValue::choice(q3),
                                AnswerValue::choice(q4),
                            ]);
                            let scores = compute_scores(&bank, &map).unwrap();
                            assert_eq!(scores, compute_scores(&bank, &map).unwrap());

                            // total is the sum of each answer on its own
                            let mut summed = TraitScores::default();
                            for (index, value) in &map {
                                let mut alone = TraitScores::default();
                                bank.get(*index)
                                    .unwrap()
                                    .contribute(*index, value, &mut alone)
                                    .unwrap();
                                for (t, points) in alone.entries() {
                                    assert!(scores.get(t) >= points);
                                    summed.add(t, points);
                                }
                            }
                            assert_eq!(scores, summed);

                            let result = build_result(scores);
                            assert_eq!(result.strengths.len(), STRENGTH_COUNT);
                            assert_eq!(result.weaknesses.len(), WEAKNESS_COUNT);
                            assert!(result
                                .weaknesses
                                .iter()
                                .all(|w| !result.strengths.contains(w)));
                            let weakest_strength = result
                                .strengths
                                .iter()
                                .map(|t| scores.get(*t))
                                .min()
                                .unwrap();
                            assert!(result
                                .weaknesses
                                .iter()
                                .all(|w| scores.get(*w) <= weakest_strength));

                            if let Some(prev) = previous {
                                for (t, points) in scores.entries() {
                                    if t == PersonalityTrait::RiskTaking {
                                        assert!(points > prev.get(t), "slider {slider} did not raise risk");
                                    } else {
                                        assert_eq!(points, prev.get(t));
                                    }
                                }
                            }
                            previous = Some(scores);
                            visited += 1;
                        }
                    }
                }
            }
        }

        assert_eq!(visited, 4 * 4 * 4 * 4 * 10);
    }
}
