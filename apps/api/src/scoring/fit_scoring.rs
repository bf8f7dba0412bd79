//! Fit Scoring — pluggable, trait-based scorer that measures a résumé against a job posting.
//!
//! Default: `KeywordScorer` (pure-Rust, deterministic, fully testable).
//!
//! The store holds an `Arc<dyn CandidateScorer>`, chosen at startup.

use std::fmt;

use async_trait::async_trait;

use crate::models::Job;
use crate::scoring::skills::extract_skills;

const REQUIRED_WEIGHT: f64 = 70.0;
const NICE_TO_HAVE_WEIGHT: f64 = 15.0;
/// Nice-to-have coverage never divides by less than this.
const NICE_TO_HAVE_MIN_DENOMINATOR: usize = 3;
const SENIORITY_BONUS: u32 = 15;
const SENIORITY_MARKERS: [&str; 3] = ["senior", "5+", "ancien"];
const SKILL_POINTS_WITHOUT_JOB: u32 = 10;
const POSITION_MENTION_BONUS: u32 = 10;
const MAX_SCORE: u32 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Advice attached to an analyzed application, chosen by score threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    AdvanceToInterview,
    TechnicalTest,
    LowRelevance,
}

impl Recommendation {
    /// ≥80 → interview, ≥60 → technical test, otherwise low relevance.
    pub fn for_score(score: u32) -> Self {
        if score >= 80 {
            Recommendation::AdvanceToInterview
        } else if score >= 60 {
            Recommendation::TechnicalTest
        } else {
            Recommendation::LowRelevance
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::AdvanceToInterview => "Advance to interview",
            Recommendation::TechnicalTest => "Technical test required",
            Recommendation::LowRelevance => "Low relevance profile",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one analysis pass derives from a résumé.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub score: u32,
    pub skills: Vec<String>,
    /// `None` when no job is linked.
    pub compatibility_pct: Option<u32>,
    pub recommendation: Recommendation,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The scorer trait. Implement this to swap backends without touching the store
/// or the route handlers.
#[async_trait]
pub trait CandidateScorer: Send + Sync {
    async fn analyze(&self, cv_text: &str, job: Option<&Job>, position: &str) -> Analysis;

    /// Short label for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordScorer — default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Keyword scorer over the fixed skill vocabulary.
///
/// Algorithm:
/// 1. Extract vocabulary skills from the résumé text.
/// 2. With a job: 70 × required coverage + 15 × dampened nice-to-have coverage.
///    Without: 10 points per extracted skill, +10 if the position label is mentioned.
/// 3. +15 seniority bonus, cap at 100.
pub struct KeywordScorer;

#[async_trait]
impl CandidateScorer for KeywordScorer {
    async fn analyze(&self, cv_text: &str, job: Option<&Job>, position: &str) -> Analysis {
        let score = compute_score(cv_text, job, position);
        Analysis {
            score,
            skills: extract_skills(cv_text),
            compatibility_pct: compute_compatibility_pct(cv_text, job),
            recommendation: Recommendation::for_score(score),
        }
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core formulas
// ────────────────────────────────────────────────────────────────────────────

/// Share of the job's required skills found in the text, 0–100.
///
/// `None` without a job. A job with no required skills scores 0, not `None`.
pub fn compute_compatibility_pct(cv_text: &str, job: Option<&Job>) -> Option<u32> {
    let job = job?;
    if job.required_skills.is_empty() {
        return Some(0);
    }
    let detected = lowercase_all(&extract_skills(cv_text));
    let matched = count_matched(&job.required_skills, &detected);
    let pct = (matched as f64 / job.required_skills.len() as f64) * 100.0;
    Some(pct.round() as u32)
}

/// Heuristic 0–100 score for a résumé, against `job` when linked, else against
/// the free-text `position` label.
pub fn compute_score(cv_text: &str, job: Option<&Job>, position: &str) -> u32 {
    let detected = extract_skills(cv_text);
    let lower = cv_text.to_lowercase();
    let seniority = if SENIORITY_MARKERS.iter().any(|m| lower.contains(m)) {
        SENIORITY_BONUS
    } else {
        0
    };

    if let Some(job) = job {
        let detected = lowercase_all(&detected);
        let required = &job.required_skills;
        let nice = job.nice_to_have();

        let required_coverage = if required.is_empty() {
            0.0
        } else {
            count_matched(required, &detected) as f64 / required.len() as f64
        };
        let nice_coverage = if nice.is_empty() {
            0.0
        } else {
            count_matched(nice, &detected) as f64
                / nice.len().max(NICE_TO_HAVE_MIN_DENOMINATOR) as f64
        };

        let skill_score = (REQUIRED_WEIGHT * required_coverage
            + NICE_TO_HAVE_WEIGHT * nice_coverage.min(1.0))
        .round() as u32;
        return (skill_score + seniority).min(MAX_SCORE);
    }

    let skill_points = detected.len() as u32 * SKILL_POINTS_WITHOUT_JOB;
    let position_bonus = if lower.contains(&position.to_lowercase()) {
        POSITION_MENTION_BONUS
    } else {
        0
    };
    (skill_points + seniority + position_bonus).min(MAX_SCORE)
}

fn lowercase_all(skills: &[String]) -> Vec<String> {
    skills.iter().map(|s| s.to_lowercase()).collect()
}

/// Counts entries of `wanted` present in the already-lowercased `detected` list.
fn count_matched(wanted: &[String], detected: &[String]) -> usize {
    wanted
        .iter()
        .filter(|skill| detected.contains(&skill.to_lowercase()))
        .count()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
