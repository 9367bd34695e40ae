use std::sync::Arc;

use crate::modules::time_tracking::core::catalog::{Job, Project};
use crate::modules::time_tracking::core::ports::Catalog;
use crate::modules::time_tracking::use_cases::errors::ApplicationError;

pub struct ListCatalogHandler<TCatalog>
where
    TCatalog: Catalog + Send + Sync + 'static,
{
    catalog: Arc<TCatalog>,
}

impl<TCatalog> ListCatalogHandler<TCatalog>
where
    TCatalog: Catalog + Send + Sync + 'static,
{
    pub fn new(catalog: Arc<TCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn projects(&self) -> Result<Vec<Project>, ApplicationError> {
        Ok(self.catalog.lookup_active_projects().await?)
    }

    /// Active jobs, narrowed to one project when `project_id` is given.
    pub async fn jobs(&self, project_id: Option<&str>) -> Result<Vec<Job>, ApplicationError> {
        Ok(self.catalog.lookup_active_jobs(project_id).await?)
    }
}
