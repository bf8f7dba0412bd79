use chrono::{Duration, Utc};

use crate::models::{Application, ApplicationStatus, Job, Role, User};
use crate::store::Collections;

/// Demo data used when storage holds no snapshot yet.
///
/// The seeded applications carry the analysis the default scorer would produce for them.
pub fn demo_collections() -> Collections {
    let now = Utc::now();

    let users = vec![
        User {
            id: "u1".to_string(),
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            role: Role::Admin,
        },
        User {
            id: "u2".to_string(),
            name: "Sam Recruiter".to_string(),
            email: "sam@rh.com".to_string(),
            role: Role::Recruiter,
        },
    ];

    let jobs = vec![
        Job {
            id: "j1".to_string(),
            title: "Frontend Developer".to_string(),
            required_skills: strings(&["React", "TypeScript"]),
            nice_to_have_skills: Some(strings(&["Node", "AWS"])),
            description: Some("Build modern interfaces.".to_string()),
            posted_by_user_id: Some("u2".to_string()),
        },
        Job {
            id: "j2".to_string(),
            title: "Data Engineer".to_string(),
            required_skills: strings(&["Python", "SQL", "Docker"]),
            nice_to_have_skills: Some(strings(&["AWS"])),
            description: Some("Data pipelines and ETL.".to_string()),
            posted_by_user_id: Some("u2".to_string()),
        },
    ];

    let applications = vec![
        Application {
            id: "a1".to_string(),
            full_name: "Jane Doe".to_string(),
            position: "Frontend Developer".to_string(),
            cv_text: "React, TypeScript, 5+ years".to_string(),
            cover_letter_text: Some("Passionate about front-end work...".to_string()),
            score: Some(85),
            status: ApplicationStatus::Analyzed,
            skills: Some(strings(&["TypeScript", "React"])),
            recommendations: Some(strings(&["Advance to interview"])),
            job_id: Some("j1".to_string()),
            compatibility_pct: Some(100),
            user_id: None,
            created_at: now - Duration::hours(1),
        },
        Application {
            id: "a2".to_string(),
            full_name: "John Smith".to_string(),
            position: "Data Engineer".to_string(),
            cv_text: "Python, SQL, Docker".to_string(),
            cover_letter_text: Some("Driven by data...".to_string()),
            score: Some(70),
            status: ApplicationStatus::Analyzed,
            skills: Some(strings(&["Python", "SQL", "Docker"])),
            recommendations: Some(strings(&["Technical test required"])),
            job_id: Some("j2".to_string()),
            compatibility_pct: Some(100),
            user_id: None,
            created_at: now - Duration::seconds(30),
        },
    ];

    Collections {
        users,
        jobs,
        applications,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{CandidateScorer, KeywordScorer};

    #[tokio::test]
    async fn test_seeded_analysis_matches_scorer() {
        let demo = demo_collections();
        for application in &demo.applications {
            let job = demo
                .jobs
                .iter()
                .find(|j| Some(&j.id) == application.job_id.as_ref());
            let analysis = KeywordScorer
                .analyze(&application.cv_text, job, &application.position)
                .await;

            assert_eq!(application.score, Some(analysis.score), "{}", application.id);
            assert_eq!(application.skills.as_ref(), Some(&analysis.skills));
            assert_eq!(application.compatibility_pct, analysis.compatibility_pct);
            assert_eq!(
                application.recommendations,
                Some(vec![analysis.recommendation.to_string()])
            );
        }
    }

    #[test]
    fn test_seeded_references_resolve() {
        let demo = demo_collections();
        for job in &demo.jobs {
            let poster = job.posted_by_user_id.as_deref().unwrap();
            assert!(demo.users.iter().any(|u| u.id == poster));
        }
        for application in &demo.applications {
            let job_id = application.job_id.as_deref().unwrap();
            let job = demo.jobs.iter().find(|j| j.id == job_id).unwrap();
            assert_eq!(application.position, job.title);
        }
    }
}
