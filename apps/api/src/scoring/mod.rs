// Résumé scoring: skill extraction, compatibility and score formulas, recommendation.
// Pure functions behind the `CandidateScorer` trait; the store never computes scores itself.

pub mod fit_scoring;
pub mod skills;

pub use fit_scoring::{Analysis, CandidateScorer, KeywordScorer};
