//! Enrichment — optional AI post-processing of a finished assessment.
//!
//! Scoring never waits on this. The submit handler spawns `run_enrichment`
//! in the background; failures are logged and dropped, and the locally
//! computed result stays authoritative.

pub mod prompts;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::assessment::models::AssessmentResult;
use crate::assessment::store::SessionStore;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::user::UserProfile;

const FALLBACK_JOB_QUERY: &str = "career opportunities";

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("enrichment returned no usable analysis")]
    EmptyAnalysis,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerRecommendation {
    pub title: String,
    #[serde(default)]
    pub reason: String,
}

/// AI-derived additions to a result. Never replaces the computed scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichedResult {
    #[serde(default)]
    pub personality_type: Option<String>,
    #[serde(default)]
    pub career_recommendations: Vec<CareerRecommendation>,
    #[serde(default)]
    pub skill_gaps: Vec<String>,
    #[serde(default)]
    pub learning_recommendations: Vec<String>,
    #[serde(default)]
    pub job_search_query: String,
    #[serde(default)]
    pub backend: String,
}

impl EnrichedResult {
    fn is_empty(&self) -> bool {
        self.personality_type.as_deref().map_or(true, str::is_empty)
            && self.career_recommendations.is_empty()
            && self.skill_gaps.is_empty()
    }
}

/// External collaborator that augments a result. Swappable for fakes in tests.
#[async_trait]
pub trait Enricher: Send + Sync {
    fn backend(&self) -> &'static str;

    async fn enrich(
        &self,
        result: &AssessmentResult,
        user: &UserProfile,
    ) -> Result<EnrichedResult, EnrichmentError>;
}

/// Enrichment through the Claude API.
pub struct LlmEnricher(pub LlmClient);

#[async_trait]
impl Enricher for LlmEnricher {
    fn backend(&self) -> &'static str {
        "llm"
    }

    async fn enrich(
        &self,
        result: &AssessmentResult,
        user: &UserProfile,
    ) -> Result<EnrichedResult, EnrichmentError> {
        let prompt = build_prompt(result, user);
        let system = format!("{}\n{}", prompts::ENRICHMENT_SYSTEM, JSON_ONLY_SYSTEM);
        let mut enriched: EnrichedResult = self.0.complete_json(&prompt, &system).await?;
        if enriched.is_empty() {
            return Err(EnrichmentError::EmptyAnalysis);
        }
        enriched.job_search_query = build_job_search_query(&enriched);
        enriched.backend = self.backend().to_string();
        Ok(enriched)
    }
}

fn build_prompt(result: &AssessmentResult, user: &UserProfile) -> String {
    let scores = result
        .scores
        .entries()
        .iter()
        .map(|(t, v)| format!("- {t}: {v}"))
        .collect::<Vec<_>>()
        .join("\n");
    let join = |items: &[String]| {
        if items.is_empty() {
            "none given".to_string()
        } else {
            items.join(", ")
        }
    };
    prompts::ENRICHMENT_PROMPT
        .replace("{scores}", &scores)
        .replace("{strengths}", &trait_list(&result.strengths))
        .replace("{weaknesses}", &trait_list(&result.weaknesses))
        .replace(
            "{name}",
            if user.name.is_empty() {
                "unknown"
            } else {
                user.name.as_str()
            },
        )
        .replace("{location}", user.location.as_deref().unwrap_or("unknown"))
        .replace("{skills}", &join(&user.skills))
        .replace("{interests}", &join(&user.interests))
}

fn trait_list(traits: &[crate::assessment::models::PersonalityTrait]) -> String {
    traits
        .iter()
        .map(|t| t.key())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Query for the job search integration: up to three recommended titles
/// followed by up to two skill gaps, else the personality type, else a
/// generic query.
pub fn build_job_search_query(enriched: &EnrichedResult) -> String {
    let mut parts: Vec<&str> = enriched
        .career_recommendations
        .iter()
        .take(3)
        .map(|r| r.title.as_str())
        .collect();
    parts.extend(enriched.skill_gaps.iter().take(2).map(String::as_str));

    let query = parts.join(" ").trim().to_string();
    if !query.is_empty() {
        return query;
    }
    match enriched.personality_type.as_deref().map(str::trim) {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => FALLBACK_JOB_QUERY.to_string(),
    }
}

/// Runs enrichment for one attempt in the background and stores the outcome
/// on the session if that attempt is still current.
pub fn run_enrichment(
    store: SessionStore,
    enricher: Arc<dyn Enricher>,
    session_id: Uuid,
    attempt: u32,
    result: AssessmentResult,
    user: UserProfile,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match enricher.enrich(&result, &user).await {
            Ok(enriched) => {
                let stored = store
                    .update(session_id, |s| s.attach_enrichment(attempt, enriched))
                    .await
                    .unwrap_or(false);
                if stored {
                    info!(%session_id, attempt, backend = enricher.backend(), "enrichment attached");
                } else {
                    info!(%session_id, attempt, "enrichment discarded (session gone or retaken)");
                }
            }
            Err(e) => {
                warn!(%session_id, attempt, backend = enricher.backend(), "enrichment failed: {e}");
            }
        }
    })
}
