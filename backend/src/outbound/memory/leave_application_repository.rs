//! `LeaveApplicationRepository` over an in-process map.

use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::UserId;
use crate::domain::leave::{LeaveApplication, LeaveApplicationId};
use crate::domain::ports::{LeaveApplicationRepository, LeaveApplicationRepositoryError};

#[derive(Debug, Default)]
pub struct InMemoryLeaveApplicationRepository {
    records: RwLock<HashMap<LeaveApplicationId, LeaveApplication>>,
}

impl InMemoryLeaveApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matching applications, newest first.
    async fn collect_where<F>(&self, predicate: F) -> Vec<LeaveApplication>
    where
        F: Fn(&LeaveApplication) -> bool,
    {
        let records = self.records.read().await;
        let mut matches: Vec<LeaveApplication> = records
            .values()
            .filter(|application| predicate(application))
            .cloned()
            .collect();
        matches.sort_by_key(|application| Reverse((application.created_at(), application.id())));
        matches
    }
}

#[async_trait]
impl LeaveApplicationRepository for InMemoryLeaveApplicationRepository {
    async fn insert(
        &self,
        application: &LeaveApplication,
    ) -> Result<(), LeaveApplicationRepositoryError> {
        let mut records = self.records.write().await;
        if records.contains_key(&application.id()) {
            return Err(LeaveApplicationRepositoryError::conflict(format!(
                "leave application {} already exists",
                application.id()
            )));
        }
        records.insert(application.id(), application.clone());
        Ok(())
    }

    async fn update(
        &self,
        application: &LeaveApplication,
    ) -> Result<(), LeaveApplicationRepositoryError> {
        let mut records = self.records.write().await;
        let slot = records.get_mut(&application.id()).ok_or_else(|| {
            LeaveApplicationRepositoryError::query(format!(
                "leave application {} no longer exists",
                application.id()
            ))
        })?;
        *slot = application.clone();
        Ok(())
    }

    async fn delete(
        &self,
        id: &LeaveApplicationId,
    ) -> Result<bool, LeaveApplicationRepositoryError> {
        Ok(self.records.write().await.remove(id).is_some())
    }

    async fn find(
        &self,
        id: &LeaveApplicationId,
    ) -> Result<Option<LeaveApplication>, LeaveApplicationRepositoryError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn list_for_applicant(
        &self,
        applicant: &UserId,
    ) -> Result<Vec<LeaveApplication>, LeaveApplicationRepositoryError> {
        Ok(self
            .collect_where(|application| application.applicant() == *applicant)
            .await)
    }

    async fn list_for_manager(
        &self,
        manager: &UserId,
    ) -> Result<Vec<LeaveApplication>, LeaveApplicationRepositoryError> {
        Ok(self
            .collect_where(|application| application.manager() == *manager)
            .await)
    }

    async fn list_for_manager_in_year(
        &self,
        manager: &UserId,
        year: i32,
    ) -> Result<Vec<LeaveApplication>, LeaveApplicationRepositoryError> {
        Ok(self
            .collect_where(|application| {
                application.manager() == *manager && application.dates().year() == year
            })
            .await)
    }
}
