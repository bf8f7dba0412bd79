//! In-process store for users, jobs and applications.
//!
//! Every mutation updates the in-memory collections and then writes the whole snapshot
//! through the injected `StateStorage` under [`STORAGE_KEY`].

pub mod persistence;
pub mod query;
pub mod seed;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{
    Application, ApplicationPatch, ApplicationStatus, Job, JobPatch, NewApplication, NewJob,
    NewUser, User, UserPatch,
};
use crate::scoring::CandidateScorer;

pub use persistence::{FileStorage, MemoryStorage, StateStorage};
pub use query::ApplicationQuery;

/// Fixed namespace the snapshot is persisted under.
pub const STORAGE_KEY: &str = "mock-data-store";

pub const DEFAULT_ANALYZE_DELAY: Duration = Duration::from_millis(600);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The persisted shape: `{ users, jobs, applications }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub applications: Vec<Application>,
}

#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub analyze_delay: Duration,
    /// Start from demo data when storage is empty.
    pub seed_demo_data: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            analyze_delay: DEFAULT_ANALYZE_DELAY,
            seed_demo_data: true,
        }
    }
}

/// Shared handle to the store. Clones share the same state.
#[derive(Clone)]
pub struct MockStore {
    state: Arc<RwLock<Collections>>,
    storage: Arc<dyn StateStorage>,
    scorer: Arc<dyn CandidateScorer>,
    analyze_delay: Duration,
}

impl MockStore {
    /// Loads the snapshot from `storage`, falling back to demo data (or nothing).
    pub async fn open(
        storage: Arc<dyn StateStorage>,
        scorer: Arc<dyn CandidateScorer>,
        options: StoreOptions,
    ) -> Result<Self, StoreError> {
        let collections = match storage.get(STORAGE_KEY).await? {
            Some(raw) => {
                let collections: Collections = serde_json::from_str(&raw)?;
                info!(
                    "Loaded snapshot: {} users, {} jobs, {} applications",
                    collections.users.len(),
                    collections.jobs.len(),
                    collections.applications.len()
                );
                collections
            }
            None if options.seed_demo_data => {
                info!("No snapshot under '{STORAGE_KEY}', starting from demo data");
                seed::demo_collections()
            }
            None => {
                info!("No snapshot under '{STORAGE_KEY}', starting empty");
                Collections::default()
            }
        };

        Ok(Self {
            state: Arc::new(RwLock::new(collections)),
            storage,
            scorer,
            analyze_delay: options.analyze_delay,
        })
    }

    pub fn scorer_backend(&self) -> &'static str {
        self.scorer.backend()
    }

    pub async fn snapshot(&self) -> Collections {
        self.state.read().await.clone()
    }

    async fn persist(&self, collections: &Collections) -> Result<(), StoreError> {
        let raw = serde_json::to_string(collections)?;
        self.storage.set(STORAGE_KEY, &raw).await
    }

    // ────────────────────────────────────────────────────────────────────────
    // Users
    // ────────────────────────────────────────────────────────────────────────

    pub async fn users(&self) -> Vec<User> {
        self.state.read().await.users.clone()
    }

    pub async fn get_user(&self, id: &str) -> Option<User> {
        self.state
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    pub async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let user = User {
            id: new_id(),
            name: new.name,
            email: new.email,
            role: new.role,
        };
        let mut state = self.state.write().await;
        state.users.insert(0, user.clone());
        self.persist(&state).await?;
        info!("Created user {} ({:?})", user.id, user.role);
        Ok(user)
    }

    pub async fn update_user(
        &self,
        id: &str,
        patch: UserPatch,
    ) -> Result<Option<User>, StoreError> {
        let mut state = self.state.write().await;
        let Some(user) = state.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        patch.apply(user);
        let updated = user.clone();
        self.persist(&state).await?;
        Ok(Some(updated))
    }

    pub async fn delete_user(&self, id: &str) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let before = state.users.len();
        state.users.retain(|u| u.id != id);
        if state.users.len() == before {
            return Ok(false);
        }
        self.persist(&state).await?;
        info!("Deleted user {id}");
        Ok(true)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Jobs
    // ────────────────────────────────────────────────────────────────────────

    pub async fn jobs(&self) -> Vec<Job> {
        self.state.read().await.jobs.clone()
    }

    pub async fn get_job(&self, id: &str) -> Option<Job> {
        self.state
            .read()
            .await
            .jobs
            .iter()
            .find(|j| j.id == id)
            .cloned()
    }

    pub async fn create_job(&self, new: NewJob) -> Result<Job, StoreError> {
        let job = Job {
            id: new_id(),
            title: new.title,
            required_skills: new.required_skills.into_skills(),
            nice_to_have_skills: new.nice_to_have_skills.map(|n| n.into_skills()),
            description: new.description,
            posted_by_user_id: new.posted_by_user_id,
        };
        let mut state = self.state.write().await;
        state.jobs.insert(0, job.clone());
        self.persist(&state).await?;
        info!("Created job {} '{}'", job.id, job.title);
        Ok(job)
    }

    pub async fn update_job(&self, id: &str, patch: JobPatch) -> Result<Option<Job>, StoreError> {
        let mut state = self.state.write().await;
        let Some(job) = state.jobs.iter_mut().find(|j| j.id == id) else {
            return Ok(None);
        };
        patch.apply(job);
        let updated = job.clone();
        self.persist(&state).await?;
        Ok(Some(updated))
    }

    /// Removes the job and unlinks every application that pointed at it.
    /// The applications themselves are kept.
    pub async fn delete_job(&self, id: &str) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let before = state.jobs.len();
        state.jobs.retain(|j| j.id != id);
        if state.jobs.len() == before {
            return Ok(false);
        }

        let mut unlinked = 0;
        for application in state
            .applications
            .iter_mut()
            .filter(|a| a.job_id.as_deref() == Some(id))
        {
            application.job_id = None;
            unlinked += 1;
        }
        self.persist(&state).await?;
        info!("Deleted job {id}, unlinked {unlinked} application(s)");
        Ok(true)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Applications
    // ────────────────────────────────────────────────────────────────────────

    pub async fn applications(&self, query: &ApplicationQuery) -> Vec<Application> {
        query.apply(&self.state.read().await.applications)
    }

    pub async fn get_application(&self, id: &str) -> Option<Application> {
        self.state
            .read()
            .await
            .applications
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    /// Creates an unanalyzed application. A linked job, when it exists, supplies the
    /// position label.
    pub async fn create_application(
        &self,
        new: NewApplication,
    ) -> Result<Application, StoreError> {
        let mut state = self.state.write().await;

        let job_title = new
            .job_id
            .as_deref()
            .and_then(|job_id| state.jobs.iter().find(|j| j.id == job_id))
            .map(|j| j.title.clone());

        let application = Application {
            id: new_id(),
            full_name: new.full_name,
            position: job_title.unwrap_or(new.position),
            cv_text: new.cv_text,
            cover_letter_text: new.cover_letter_text,
            score: None,
            status: ApplicationStatus::New,
            skills: None,
            recommendations: None,
            job_id: new.job_id,
            compatibility_pct: None,
            user_id: new.user_id,
            created_at: Utc::now(),
        };
        state.applications.insert(0, application.clone());
        self.persist(&state).await?;
        info!(
            "Created application {} for '{}'",
            application.id, application.position
        );
        Ok(application)
    }

    pub async fn update_application(
        &self,
        id: &str,
        patch: ApplicationPatch,
    ) -> Result<Option<Application>, StoreError> {
        let mut state = self.state.write().await;
        let Some(application) = state.applications.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        patch.apply(application);
        let updated = application.clone();
        self.persist(&state).await?;
        Ok(Some(updated))
    }

    pub async fn delete_application(&self, id: &str) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let before = state.applications.len();
        state.applications.retain(|a| a.id != id);
        if state.applications.len() == before {
            return Ok(false);
        }
        self.persist(&state).await?;
        info!("Deleted application {id}");
        Ok(true)
    }

    /// Waits out the processing delay, then scores the application's current résumé
    /// against its current job and merges the result.
    ///
    /// The delay runs without holding the lock. Concurrent calls for the same id are
    /// not coordinated: whichever merges last wins. Returns `None` for an unknown id.
    pub async fn analyze(&self, id: &str) -> Result<Option<Application>, StoreError> {
        tokio::time::sleep(self.analyze_delay).await;

        let mut state = self.state.write().await;
        let Collections {
            jobs, applications, ..
        } = &mut *state;

        let Some(application) = applications.iter_mut().find(|a| a.id == id) else {
            debug!("Analyze skipped: application {id} not found");
            return Ok(None);
        };
        let job = application
            .job_id
            .as_deref()
            .and_then(|job_id| jobs.iter().find(|j| j.id == job_id));

        let analysis = self
            .scorer
            .analyze(&application.cv_text, job, &application.position)
            .await;
        debug!(
            "Analyzed application {id} with {} scorer: score={} compatibility={:?}",
            self.scorer.backend(),
            analysis.score,
            analysis.compatibility_pct
        );
        application.apply_analysis(analysis);
        let updated = application.clone();

        self.persist(&state).await?;
        Ok(Some(updated))
    }

    /// Creates an application and analyzes it straight away.
    ///
    /// Returns `None` when the record was deleted before the analysis merged.
    pub async fn submit_application(
        &self,
        new: NewApplication,
    ) -> Result<Option<Application>, StoreError> {
        let created = self.create_application(new).await?;
        let analyzed = self.analyze(&created.id).await?;
        if analyzed.is_none() {
            warn!("Application {} was deleted before its analysis completed", created.id);
        }
        Ok(analyzed)
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
