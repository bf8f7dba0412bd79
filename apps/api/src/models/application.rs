use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::Analysis;

/// Review status of an application.
///
/// `New` → `Analyzed` happens only through analysis; `Accepted` / `Rejected` are set by a reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[serde(alias = "nouvelle")]
    New,
    #[serde(alias = "analysée")]
    Analyzed,
    #[serde(alias = "retenue")]
    Accepted,
    #[serde(alias = "rejetée")]
    Rejected,
}

impl ApplicationStatus {
    /// Whether a reviewer may set this status directly.
    pub fn is_manual(self) -> bool {
        !matches!(self, ApplicationStatus::Analyzed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub full_name: String,
    pub position: String,
    pub cv_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility_pct: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Application {
    /// Merges a fresh analysis into the record and marks it analyzed.
    pub fn apply_analysis(&mut self, analysis: Analysis) {
        self.score = Some(analysis.score);
        self.skills = Some(analysis.skills);
        self.compatibility_pct = analysis.compatibility_pct;
        self.recommendations = Some(vec![analysis.recommendation.to_string()]);
        self.status = ApplicationStatus::Analyzed;
    }
}

/// Fields a caller supplies when creating an application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub full_name: String,
    #[serde(default)]
    pub position: String,
    pub cv_text: String,
    #[serde(default)]
    pub cover_letter_text: Option<String>,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPatch {
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub cv_text: Option<String>,
    pub cover_letter_text: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub job_id: Option<String>,
    pub user_id: Option<String>,
}

impl ApplicationPatch {
    pub fn apply(self, application: &mut Application) {
        if let Some(full_name) = self.full_name {
            application.full_name = full_name;
        }
        if let Some(position) = self.position {
            application.position = position;
        }
        if let Some(cv_text) = self.cv_text {
            application.cv_text = cv_text;
        }
        if let Some(cover) = self.cover_letter_text {
            application.cover_letter_text = Some(cover);
        }
        if let Some(status) = self.status {
            application.status = status;
        }
        if let Some(job_id) = self.job_id {
            application.job_id = Some(job_id);
        }
        if let Some(user_id) = self.user_id {
            application.user_id = Some(user_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::fit_scoring::Recommendation;
    use serde_json::json;

    fn fresh() -> Application {
        Application {
            id: "a1".to_string(),
            full_name: "Jane Doe".to_string(),
            position: "Frontend".to_string(),
            cv_text: "React".to_string(),
            cover_letter_text: None,
            score: None,
            status: ApplicationStatus::New,
            skills: None,
            recommendations: None,
            job_id: None,
            compatibility_pct: None,
            user_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_legacy_status_labels_deserialize() {
        let status: ApplicationStatus = serde_json::from_value(json!("analysée")).unwrap();
        assert_eq!(status, ApplicationStatus::Analyzed);
        let status: ApplicationStatus = serde_json::from_value(json!("rejetée")).unwrap();
        assert_eq!(status, ApplicationStatus::Rejected);
        assert_eq!(
            serde_json::to_value(ApplicationStatus::Accepted).unwrap(),
            json!("accepted")
        );
    }

    #[test]
    fn test_unanalyzed_record_omits_derived_fields() {
        let value = serde_json::to_value(fresh()).unwrap();
        assert_eq!(value["status"], json!("new"));
        assert_eq!(value["cvText"], json!("React"));
        assert!(value.get("score").is_none());
        assert!(value.get("skills").is_none());
        assert!(value.get("compatibilityPct").is_none());
    }

    #[test]
    fn test_apply_analysis_sets_status_and_fields() {
        let mut application = fresh();
        application.apply_analysis(Analysis {
            score: 62,
            skills: vec!["React".to_string()],
            compatibility_pct: Some(50),
            recommendation: Recommendation::TechnicalTest,
        });
        assert_eq!(application.status, ApplicationStatus::Analyzed);
        assert_eq!(application.score, Some(62));
        assert_eq!(application.compatibility_pct, Some(50));
        assert_eq!(
            application.recommendations,
            Some(vec!["Technical test required".to_string()])
        );
    }

    #[test]
    fn test_only_analyzed_is_not_manual() {
        assert!(ApplicationStatus::New.is_manual());
        assert!(ApplicationStatus::Accepted.is_manual());
        assert!(ApplicationStatus::Rejected.is_manual());
        assert!(!ApplicationStatus::Analyzed.is_manual());
    }
}
