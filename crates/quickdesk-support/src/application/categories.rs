//! Category application service

use std::sync::Arc;

use chrono::Utc;

use crate::domain::aggregates::Category;
use crate::domain::value_objects::CategoryId;
use crate::ports::outbound::{CategoryRepository, RepositoryError};
use crate::{Result, SupportError};

pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Category>> {
        Ok(self.repo.list().await?)
    }

    /// New categories get a millisecond-timestamp id and no specializations.
    /// A taken id is bumped until the insert succeeds.
    pub async fn create(&self, name: &str) -> Result<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SupportError::Validation("Category name is required".into()));
        }
        let mut id = Utc::now().timestamp_millis();
        loop {
            let category = Category::new(CategoryId::new(id), name);
            match self.repo.insert(&category).await {
                Ok(()) => return Ok(category),
                Err(RepositoryError::DuplicateKey(_)) => id += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Insert the default categories when the store is empty. Returns how many were added.
    pub async fn seed_defaults(&self) -> Result<usize> {
        if self.repo.count().await? > 0 {
            return Ok(0);
        }
        let defaults = Category::defaults();
        for category in &defaults {
            self.repo.save(category).await?;
        }
        tracing::info!(count = defaults.len(), "default categories initialized");
        Ok(defaults.len())
    }
}
