use serde::{Deserialize, Serialize};

/// A job posting. Skills are matched case-insensitively; list order carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub required_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nice_to_have_skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_by_user_id: Option<String>,
}

impl Job {
    pub fn nice_to_have(&self) -> &[String] {
        self.nice_to_have_skills.as_deref().unwrap_or(&[])
    }
}

/// Skills as authored: either a JSON list or a comma-separated string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SkillListInput {
    List(Vec<String>),
    Csv(String),
}

impl SkillListInput {
    pub fn into_skills(self) -> Vec<String> {
        match self {
            SkillListInput::List(items) => items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            SkillListInput::Csv(raw) => parse_skill_list(&raw),
        }
    }
}

impl Default for SkillListInput {
    fn default() -> Self {
        SkillListInput::List(Vec::new())
    }
}

/// Splits "React, TypeScript,,  Node" into ["React", "TypeScript", "Node"].
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub required_skills: SkillListInput,
    #[serde(default)]
    pub nice_to_have_skills: Option<SkillListInput>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub posted_by_user_id: Option<String>,
}

/// Partial update. `None` fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    pub title: Option<String>,
    pub required_skills: Option<SkillListInput>,
    pub nice_to_have_skills: Option<SkillListInput>,
    pub description: Option<String>,
    pub posted_by_user_id: Option<String>,
}

impl JobPatch {
    pub fn apply(self, job: &mut Job) {
        if let Some(title) = self.title {
            job.title = title;
        }
        if let Some(required) = self.required_skills {
            job.required_skills = required.into_skills();
        }
        if let Some(nice) = self.nice_to_have_skills {
            job.nice_to_have_skills = Some(nice.into_skills());
        }
        if let Some(description) = self.description {
            job.description = Some(description);
        }
        if let Some(user_id) = self.posted_by_user_id {
            job.posted_by_user_id = Some(user_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_skill_list_trims_and_drops_empties() {
        assert_eq!(
            parse_skill_list(" React, TypeScript,, ,Node "),
            vec!["React", "TypeScript", "Node"]
        );
        assert!(parse_skill_list("").is_empty());
    }

    #[test]
    fn test_new_job_accepts_csv_or_list() {
        let from_csv: NewJob = serde_json::from_value(json!({
            "title": "Data Engineer",
            "requiredSkills": "Python, SQL",
            "niceToHaveSkills": ["AWS", " "]
        }))
        .unwrap();
        assert_eq!(from_csv.required_skills.into_skills(), vec!["Python", "SQL"]);
        assert_eq!(
            from_csv.nice_to_have_skills.unwrap().into_skills(),
            vec!["AWS"]
        );
    }

    #[test]
    fn test_job_serializes_camel_case_and_omits_absent_fields() {
        let job = Job {
            id: "j1".to_string(),
            title: "Frontend".to_string(),
            required_skills: vec!["React".to_string()],
            nice_to_have_skills: None,
            description: None,
            posted_by_user_id: Some("u2".to_string()),
        };
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["requiredSkills"], json!(["React"]));
        assert_eq!(value["postedByUserId"], json!("u2"));
        assert!(value.get("niceToHaveSkills").is_none());
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut job = Job {
            id: "j1".to_string(),
            title: "Frontend".to_string(),
            required_skills: vec!["React".to_string()],
            nice_to_have_skills: Some(vec!["AWS".to_string()]),
            description: Some("UI work".to_string()),
            posted_by_user_id: None,
        };
        JobPatch {
            required_skills: Some(SkillListInput::Csv("React, SQL".to_string())),
            ..Default::default()
        }
        .apply(&mut job);

        assert_eq!(job.title, "Frontend");
        assert_eq!(job.required_skills, vec!["React", "SQL"]);
        assert_eq!(job.nice_to_have(), ["AWS".to_string()]);
        assert_eq!(job.description.as_deref(), Some("UI work"));
    }
}
