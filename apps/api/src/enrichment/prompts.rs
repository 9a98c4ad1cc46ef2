// Enrichment prompt templates.

pub const ENRICHMENT_SYSTEM: &str = "\
You are a career guidance counsellor for university students. \
You receive a psychometric trait profile and a short student profile. \
Recommend realistic career directions grounded ONLY in the given scores and profile. \
You MUST respond with valid JSON only — no markdown fences, no explanations.";

pub const ENRICHMENT_PROMPT: &str = r#"Analyse this psychometric assessment result.

TRAIT SCORES (higher is stronger):
{scores}

TOP STRENGTHS: {strengths}
GROWTH AREAS: {weaknesses}

STUDENT PROFILE:
- name: {name}
- location: {location}
- skills: {skills}
- interests: {interests}

OUTPUT SCHEMA (return exactly this structure):
{
  "personality_type": "string (two to four words)",
  "career_recommendations": [{"title": "string", "reason": "string"}],
  "skill_gaps": ["string"],
  "learning_recommendations": ["string"]
}

Return at most 5 career recommendations, 4 skill gaps and 4 learning recommendations."#;
