use std::future::Future;
use std::sync::Arc;

use parkinglot_core::error::CoreError;
use parkinglot_core::occupancy::ReassignmentPlan;
use parkinglot_core::types::DbId;
use parkinglot_db::models::vacancy::Vacancy;
use parkinglot_db::store::Store;

use super::VACANCY;
use crate::error::{AppError, AppResult};

/// Owns every write to a vacancy's `busy` flag.
///
/// Claims go through the store's compare-and-set, so of two concurrent
/// `occupy` calls on a free vacancy exactly one succeeds.
#[derive(Clone)]
pub struct OccupancyManager {
    store: Arc<dyn Store>,
}

impl OccupancyManager {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Mark a free vacancy busy.
    ///
    /// NotFound if the vacancy does not exist, Conflict if it is already busy.
    pub async fn occupy(&self, vacancy_id: DbId) -> AppResult<Vacancy> {
        if let Some(vacancy) = self
            .store
            .compare_and_set_busy(vacancy_id, false, true)
            .await?
        {
            tracing::debug!(vacancy_id, "Vacancy occupied");
            return Ok(vacancy);
        }

        // The claim lost: tell "absent" from "taken".
        let vacancy = self
            .store
            .find_vacancy(vacancy_id)
            .await?
            .ok_or(AppError::not_found(VACANCY, vacancy_id))?;

        // A vacancy freed again since the claim still counts as taken.
        Err(CoreError::Conflict(format!("Vacancy {} is already occupied", vacancy.id)).into())
    }

    /// Mark a vacancy free. Already free or missing vacancies are left alone.
    pub async fn release(&self, vacancy_id: DbId) -> AppResult<()> {
        match self.store.set_busy(vacancy_id, false).await? {
            Some(_) => tracing::debug!(vacancy_id, "Vacancy released"),
            None => tracing::debug!(vacancy_id, "Vacancy to release no longer exists"),
        }
        Ok(())
    }

    /// Move occupancy according to `plan` around a ticket rewrite.
    ///
    /// The target is claimed before `write` runs and the original vacancy is
    /// released after it succeeds. A failed claim leaves both vacancies and
    /// the ticket untouched; a failed `write` undoes the claim.
    pub async fn reassign<T, F, Fut>(&self, plan: ReassignmentPlan, write: F) -> AppResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        if let Some(target) = plan.claim {
            self.occupy(target).await?;
        }

        let written = match write().await {
            Ok(written) => written,
            Err(err) => {
                if let Some(target) = plan.claim {
                    self.undo_claim(target, &err).await;
                }
                return Err(err);
            }
        };

        if let Some(original) = plan.release {
            self.release(original).await?;
        }
        Ok(written)
    }

    /// Compensate a vacancy claim whose ticket write failed.
    pub async fn undo_claim(&self, vacancy_id: DbId, cause: &AppError) {
        match self.release(vacancy_id).await {
            Ok(()) => tracing::warn!(
                vacancy_id,
                cause = %cause,
                "Released vacancy after failed ticket write",
            ),
            Err(err) => tracing::error!(
                vacancy_id,
                cause = %cause,
                error = %err,
                "Failed to release vacancy after failed ticket write",
            ),
        }
    }
}
