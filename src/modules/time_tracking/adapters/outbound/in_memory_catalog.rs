use crate::modules::time_tracking::core::catalog::{Job, JobCode, Project};
use crate::modules::time_tracking::core::ports::{Catalog, StoreError};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryCatalog {
    projects: RwLock<Vec<Project>>,
    jobs: RwLock<HashMap<JobCode, Job>>,
    is_offline: bool,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog the service starts with.
    pub fn seeded() -> Self {
        let projects = vec![
            project("prj-web", "Website Redesign"),
            project("prj-app", "Mobile App Development"),
            project("prj-ops", "Server Maintenance"),
        ];
        let jobs = [
            job("job-101", "JOB-101", "Frontend Development", "prj-web"),
            job("job-202", "JOB-202", "API Integration", "prj-app"),
            job("job-303", "JOB-303", "Infrastructure Upgrade", "prj-ops"),
        ];
        Self {
            projects: RwLock::new(projects),
            jobs: RwLock::new(index_by_code(jobs)),
            is_offline: false,
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn add_project(&self, project: Project) {
        self.projects.write().await.push(project);
    }

    /// Replaces any job already registered under the same code.
    pub async fn add_job(&self, job: Job) -> Result<(), StoreError> {
        let code = JobCode::parse(&job.code)
            .map_err(|e| StoreError::Backend(format!("invalid catalog job: {e}")))?;
        self.jobs.write().await.insert(code, job);
        Ok(())
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Backend("Catalog offline".into()));
        }
        Ok(())
    }
}

fn project(id: &str, name: &str) -> Project {
    Project {
        id: id.into(),
        name: name.into(),
        is_active: true,
    }
}

fn job(id: &str, code: &str, title: &str, project_id: &str) -> Job {
    Job {
        id: id.into(),
        code: code.into(),
        title: title.into(),
        project_id: project_id.into(),
        is_active: true,
    }
}

fn index_by_code(jobs: impl IntoIterator<Item = Job>) -> HashMap<JobCode, Job> {
    jobs.into_iter()
        .filter_map(|job| JobCode::parse(&job.code).ok().map(|code| (code, job)))
        .collect()
}

#[async_trait::async_trait]
impl Catalog for InMemoryCatalog {
    async fn lookup_job_by_code(&self, code: &JobCode) -> Result<Option<Job>, StoreError> {
        self.ensure_online()?;
        let jobs = self.jobs.read().await;
        Ok(jobs.get(code).filter(|j| j.is_active).cloned())
    }

    async fn lookup_active_projects(&self) -> Result<Vec<Project>, StoreError> {
        self.ensure_online()?;
        let projects = self.projects.read().await;
        Ok(projects.iter().filter(|p| p.is_active).cloned().collect())
    }

    async fn lookup_active_jobs(&self, project_id: Option<&str>) -> Result<Vec<Job>, StoreError> {
        self.ensure_online()?;
        let jobs = self.jobs.read().await;
        let mut items: Vec<Job> = jobs
            .values()
            .filter(|j| j.is_active)
            .filter(|j| project_id.is_none_or(|id| j.project_id == id))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(items)
    }
}
