use serde::{Deserialize, Serialize};

use crate::assessment::models::{AssessmentResult, PersonalityTrait, TraitScores};

pub const STRENGTH_COUNT: usize = 3;
pub const WEAKNESS_COUNT: usize = 2;

/// Ranks `scores` into top strengths and bottom weaknesses.
///
/// Both sorts are stable, so equal scores keep canonical trait order.
/// A trait already picked as a strength is never reported as a weakness;
/// with six traits this only matters for heavily tied profiles.
pub fn derive_strengths_and_weaknesses(
    scores: &TraitScores,
) -> (Vec<PersonalityTrait>, Vec<PersonalityTrait>) {
    let mut descending = scores.entries();
    descending.sort_by(|a, b| b.1.cmp(&a.1));
    let strengths: Vec<PersonalityTrait> = descending
        .iter()
        .take(STRENGTH_COUNT)
        .map(|(t, _)| *t)
        .collect();

    let mut ascending = scores.entries();
    ascending.sort_by(|a, b| a.1.cmp(&b.1));
    let weaknesses = ascending
        .iter()
        .map(|(t, _)| *t)
        .filter(|t| !strengths.contains(t))
        .take(WEAKNESS_COUNT)
        .collect();

    (strengths, weaknesses)
}

pub fn build_result(scores: TraitScores) -> AssessmentResult {
    let (strengths, weaknesses) = derive_strengths_and_weaknesses(&scores);
    AssessmentResult {
        scores,
        strengths,
        weaknesses,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Presentation
// ────────────────────────────────────────────────────────────────────────────

/// Profile rendered when no result exists yet.
const SAMPLE_SCORES: TraitScores = TraitScores {
    technical: 89,
    leadership: 78,
    creativity: 85,
    communication: 73,
    risk_taking: 67,
    problem_solving: 92,
};

pub const RADAR_FULL_MARK: u32 = 100;

/// Chart row order and styling, as the results page lays it out.
const CHART_ROWS: &[(PersonalityTrait, &str, &str)] = &[
    (PersonalityTrait::ProblemSolving, "Problem Solving", "#3b82f6"),
    (PersonalityTrait::Leadership, "Leadership", "#f59e0b"),
    (PersonalityTrait::Creativity, "Creativity", "#10b981"),
    (PersonalityTrait::Communication, "Communication", "#06b6d4"),
    (PersonalityTrait::RiskTaking, "Risk Taking", "#8b5cf6"),
    (PersonalityTrait::Technical, "Technical Skills", "#1e40af"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathChoice {
    Career,
    Entrepreneurship,
}

impl PathChoice {
    pub fn route(self) -> &'static str {
        match self {
            PathChoice::Career => "/career-path",
            PathChoice::Entrepreneurship => "/startup-path",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RadarPoint {
    pub subject: &'static str,
    pub value: u32,
    pub full_mark: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarPoint {
    pub name: &'static str,
    pub value: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathOption {
    pub path: PathChoice,
    pub title: &'static str,
    pub description: &'static str,
    pub route: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsView {
    /// True when no result exists and the sample profile is shown instead.
    pub is_sample: bool,
    pub scores: TraitScores,
    pub radar: Vec<RadarPoint>,
    pub bars: Vec<BarPoint>,
    pub strengths: Vec<&'static str>,
    pub growth_areas: Vec<&'static str>,
    pub paths: Vec<PathOption>,
}

impl ResultsView {
    /// Builds the results page model.
    ///
    /// Default policy: a missing result renders the sample profile. A present
    /// result always renders its own numbers, including zeros.
    pub fn build(result: Option<&AssessmentResult>) -> Self {
        let (is_sample, scores, strengths, weaknesses) = match result {
            Some(r) => (false, r.scores, r.strengths.clone(), r.weaknesses.clone()),
            None => (true, SAMPLE_SCORES, Vec::new(), Vec::new()),
        };

        let radar = CHART_ROWS
            .iter()
            .map(|&(t, subject, _)| RadarPoint {
                subject,
                value: scores.get(t),
                full_mark: RADAR_FULL_MARK,
            })
            .collect();

        let bars = CHART_ROWS
            .iter()
            .map(|&(t, name, color)| BarPoint {
                name,
                value: scores.get(t),
                color,
            })
            .collect();

        Self {
            is_sample,
            scores,
            radar,
            bars,
            strengths: strengths.iter().map(|t| t.label()).collect(),
            growth_areas: weaknesses.iter().map(|t| t.label()).collect(),
            paths: path_options(),
        }
    }
}

pub fn path_options() -> Vec<PathOption> {
    vec![
        PathOption {
            path: PathChoice::Career,
            title: "Career Path",
            description: "Traditional employment with structured growth opportunities.",
            route: PathChoice::Career.route(),
        },
        PathOption {
            path: PathChoice::Entrepreneurship,
            title: "Entrepreneurship Path",
            description: "Build your own business and create your own opportunities.",
            route: PathChoice::Entrepreneurship.route(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::models::PersonalityTrait::*;

    fn golden_scores() -> TraitScores {
        TraitScores {
            technical: 40,
            leadership: 0,
            creativity: 15,
            communication: 25,
            risk_taking: 70,
            problem_solving: 25,
        }
    }

    #[test]
    fn test_golden_ranking() {
        let (strengths, weaknesses) = derive_strengths_and_weaknesses(&golden_scores());
        // communication and problemSolving tie at 25; canonical order puts communication first
        assert_eq!(strengths, vec![RiskTaking, Technical, Communication]);
        assert_eq!(weaknesses, vec![Leadership, Creativity]);
    }

    #[test]
    fn test_ranking_is_idempotent_and_pure() {
        let scores = golden_scores();
        let first = derive_strengths_and_weaknesses(&scores);
        let second = derive_strengths_and_weaknesses(&scores);
        assert_eq!(first, second);
        assert_eq!(scores, golden_scores());
    }

    #[test]
    fn test_all_ties_stay_disjoint() {
        let (strengths, weaknesses) = derive_strengths_and_weaknesses(&TraitScores::default());
        assert_eq!(strengths, vec![Technical, Leadership, Creativity]);
        assert_eq!(weaknesses, vec![Communication, RiskTaking]);
    }

    #[test]
    fn test_sizes_and_disjoint_for_distinct_scores() {
        let scores = TraitScores {
            technical: 5,
            leadership: 60,
            creativity: 10,
            communication: 45,
            risk_taking: 30,
            problem_solving: 20,
        };
        let (strengths, weaknesses) = derive_strengths_and_weaknesses(&scores);
        assert_eq!(strengths.len(), STRENGTH_COUNT);
        assert_eq!(weaknesses.len(), WEAKNESS_COUNT);
        assert!(weaknesses.iter().all(|w| !strengths.contains(w)));
        assert_eq!(weaknesses, vec![Technical, Creativity]);
    }

    #[test]
    fn test_view_without_result_uses_sample() {
        let view = ResultsView::build(None);
        assert!(view.is_sample);
        assert_eq!(view.radar[0].subject, "Problem Solving");
        assert_eq!(view.radar[0].value, 92);
        assert!(view.strengths.is_empty());
    }

    #[test]
    fn test_view_keeps_real_zero() {
        let result = build_result(golden_scores());
        let view = ResultsView::build(Some(&result));
        assert!(!view.is_sample);
        let leadership = view.bars.iter().find(|b| b.name == "Leadership").unwrap();
        assert_eq!(leadership.value, 0);
        assert_eq!(view.strengths, vec!["Risk Taking", "Technical", "Communication"]);
        assert_eq!(view.growth_areas, vec!["Leadership", "Creativity"]);
    }

    #[test]
    fn test_paths_routes() {
        let paths = path_options();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].route, "/career-path");
        assert_eq!(paths[1].route, "/startup-path");
    }
}
