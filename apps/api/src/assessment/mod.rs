// Psychometric assessment: question bank, answer collection, trait scoring,
// strengths/weaknesses ranking and the per-session flow.
// Scoring is pure and synchronous; only enrichment (see crate::enrichment) is async.

pub mod answers;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod questions;
pub mod results;
pub mod scoring;
pub mod session;
pub mod store;
