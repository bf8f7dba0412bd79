use std::cmp::Ordering;

use serde::de::value::StrDeserializer;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer};

use crate::models::{Application, ApplicationStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    #[serde(alias = "compat")]
    Compatibility,
    Score,
    Date,
}

/// Filters and ordering for the applications listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationQuery {
    pub job_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<ApplicationStatus>,
    /// Case-insensitive match against full name or position.
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_as_default")]
    pub sort: SortKey,
}

/// An unselected filter arrives as `status=`; read it as no filter.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            let value: StrDeserializer<'_, D::Error> = value.into_deserializer();
            T::deserialize(value).map(Some)
        }
    }
}

fn empty_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(empty_as_none(deserializer)?.unwrap_or_default())
}

impl ApplicationQuery {
    pub fn matches(&self, application: &Application) -> bool {
        if let Some(job_id) = self.job_id.as_deref().filter(|j| !j.is_empty()) {
            if application.job_id.as_deref() != Some(job_id) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if application.status != status {
                return false;
            }
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            if !application.full_name.to_lowercase().contains(&needle)
                && !application.position.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }

    /// Returns the matching applications, highest first for the chosen key.
    pub fn apply(&self, applications: &[Application]) -> Vec<Application> {
        let mut selected: Vec<Application> = applications
            .iter()
            .filter(|a| self.matches(a))
            .cloned()
            .collect();
        selected.sort_by(|a, b| self.compare(a, b));
        selected
    }

    fn compare(&self, a: &Application, b: &Application) -> Ordering {
        let newest_first = b.created_at.cmp(&a.created_at);
        match self.sort {
            SortKey::Date => newest_first,
            SortKey::Score => rank(b.score).cmp(&rank(a.score)).then(newest_first),
            SortKey::Compatibility => rank(b.compatibility_pct)
                .cmp(&rank(a.compatibility_pct))
                .then(newest_first),
        }
    }
}

/// Not-yet-analyzed sorts below any real value, including 0.
fn rank(value: Option<u32>) -> i64 {
    value.map(i64::from).unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn app(id: &str, name: &str, age_min: i64, score: Option<u32>, compat: Option<u32>) -> Application {
        Application {
            id: id.to_string(),
            full_name: name.to_string(),
            position: "Data Engineer".to_string(),
            cv_text: String::new(),
            cover_letter_text: None,
            score,
            status: if score.is_some() {
                ApplicationStatus::Analyzed
            } else {
                ApplicationStatus::New
            },
            skills: None,
            recommendations: None,
            job_id: Some(if id == "c" { "j1" } else { "j2" }.to_string()),
            compatibility_pct: compat,
            user_id: None,
            created_at: Utc::now() - Duration::minutes(age_min),
        }
    }

    fn ids(list: &[Application]) -> Vec<&str> {
        list.iter().map(|a| a.id.as_str()).collect()
    }

    fn sample() -> Vec<Application> {
        vec![
            app("a", "Jane Doe", 30, Some(85), Some(100)),
            app("b", "John Smith", 10, Some(70), Some(100)),
            app("c", "Ada Lovelace", 5, None, None),
            app("d", "Alan Turing", 1, Some(90), Some(0)),
        ]
    }

    #[test]
    fn test_default_sort_is_compatibility_then_newest() {
        let sorted = ApplicationQuery::default().apply(&sample());
        assert_eq!(ids(&sorted), vec!["b", "a", "d", "c"]);
    }

    #[test]
    fn test_sort_by_score() {
        let query = ApplicationQuery {
            sort: SortKey::Score,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&sample())), vec!["d", "a", "b", "c"]);
    }

    #[test]
    fn test_sort_by_date() {
        let query = ApplicationQuery {
            sort: SortKey::Date,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&sample())), vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn test_filters_combine() {
        let query = ApplicationQuery {
            job_id: Some("j2".to_string()),
            status: Some(ApplicationStatus::Analyzed),
            search: Some("JOHN".to_string()),
            sort: SortKey::Date,
        };
        assert_eq!(ids(&query.apply(&sample())), vec!["b"]);
    }

    #[test]
    fn test_search_matches_position_and_empty_search_matches_all() {
        let query = ApplicationQuery {
            search: Some("data eng".to_string()),
            ..Default::default()
        };
        assert_eq!(query.apply(&sample()).len(), 4);

        let query = ApplicationQuery {
            search: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(query.apply(&sample()).len(), 4);
    }

    #[test]
    fn test_query_deserializes_from_camel_case() {
        let query: ApplicationQuery = serde_json::from_value(serde_json::json!({
            "jobId": "j1",
            "status": "nouvelle",
            "sort": "compat"
        }))
        .unwrap();
        assert_eq!(query.job_id.as_deref(), Some("j1"));
        assert_eq!(query.status, Some(ApplicationStatus::New));
        assert_eq!(query.sort, SortKey::Compatibility);
    }

    #[test]
    fn test_blank_status_and_sort_mean_no_filter() {
        let query: ApplicationQuery = serde_json::from_value(serde_json::json!({
            "jobId": "",
            "status": "",
            "search": "",
            "sort": ""
        }))
        .unwrap();
        assert_eq!(query.status, None);
        assert_eq!(query.sort, SortKey::Compatibility);
        assert_eq!(query.apply(&sample()).len(), 4);
    }

    #[test]
    fn test_unknown_status_is_still_rejected() {
        let parsed = serde_json::from_value::<ApplicationQuery>(serde_json::json!({
            "status": "pending"
        }));
        assert!(parsed.is_err());
    }
}
