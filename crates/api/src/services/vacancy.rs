use std::sync::Arc;

use parkinglot_core::error::CoreError;
use parkinglot_core::types::DbId;
use parkinglot_db::models::vacancy::{CreateVacancy, UpdateVacancy, Vacancy};
use parkinglot_db::store::Store;
use validator::Validate;

use super::{PARKING, VACANCY};
use crate::error::{AppError, AppResult};

/// CRUD over vacancies. Never writes `busy`; see [`super::OccupancyManager`].
#[derive(Clone)]
pub struct VacancyService {
    store: Arc<dyn Store>,
}

impl VacancyService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Vacancy>> {
        Ok(self.store.list_vacancies().await?)
    }

    pub async fn get(&self, id: DbId) -> AppResult<Vacancy> {
        self.store
            .find_vacancy(id)
            .await?
            .ok_or(AppError::not_found(VACANCY, id))
    }

    /// Add a free vacancy to an existing parking lot.
    pub async fn create(&self, input: &CreateVacancy) -> AppResult<Vacancy> {
        input.validate()?;

        if self.store.find_parking(input.parking_id).await?.is_none() {
            return Err(AppError::not_found(PARKING, input.parking_id));
        }

        let vacancy = self.store.create_vacancy(input).await?;
        tracing::info!(
            vacancy_id = vacancy.id,
            parking_id = vacancy.parking_id,
            number = %vacancy.number,
            "Vacancy created",
        );
        Ok(vacancy)
    }

    /// Relabel a vacancy.
    pub async fn update(&self, input: &UpdateVacancy) -> AppResult<Vacancy> {
        input.validate()?;

        let vacancy = self
            .store
            .update_vacancy_number(input)
            .await?
            .ok_or(AppError::not_found(VACANCY, input.id))?;
        tracing::info!(vacancy_id = vacancy.id, number = %vacancy.number, "Vacancy relabelled");
        Ok(vacancy)
    }

    /// Remove a vacancy no ticket refers to.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        self.get(id).await?;

        let tickets = self.store.count_tickets_by_vacancy(id).await?;
        if tickets > 0 {
            return Err(CoreError::Conflict(format!(
                "Vacancy {id} is referenced by {tickets} ticket(s)"
            ))
            .into());
        }

        if !self.store.delete_vacancy(id).await? {
            return Err(AppError::not_found(VACANCY, id));
        }
        tracing::info!(vacancy_id = id, "Vacancy deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::services::test_support::seeded;

    #[tokio::test]
    async fn vacancy_requires_existing_parking() {
        let (store, _) = seeded().await;
        let service = VacancyService::new(store);

        let input = CreateVacancy {
            number: "B1".to_string(),
            parking_id: 55,
        };
        assert_matches!(
            service.create(&input).await,
            Err(AppError::Core(CoreError::NotFound { entity: "Parking", id: 55 }))
        );
    }

    #[tokio::test]
    async fn new_vacancy_starts_free() {
        let (store, seed) = seeded().await;
        let service = VacancyService::new(store);

        let vacancy = service
            .create(&CreateVacancy {
                number: "B1".to_string(),
                parking_id: seed.parking_id,
            })
            .await
            .unwrap();
        assert!(!vacancy.busy);
        assert_eq!(vacancy.parking_id, seed.parking_id);
    }

    #[tokio::test]
    async fn relabel_keeps_occupancy_and_parking() {
        let (store, seed) = seeded().await;
        seed.open_ticket(&store).await;
        let service = VacancyService::new(Arc::clone(&store));

        let vacancy = service
            .update(&UpdateVacancy {
                id: seed.vacancy_id,
                number: "Z9".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(vacancy.number, "Z9");
        assert!(vacancy.busy);
        assert_eq!(vacancy.parking_id, seed.parking_id);
    }

    #[tokio::test]
    async fn referenced_vacancy_cannot_be_deleted() {
        let (store, seed) = seeded().await;
        seed.open_ticket(&store).await;
        let service = VacancyService::new(store);

        assert_matches!(
            service.delete(seed.vacancy_id).await,
            Err(AppError::Core(CoreError::Conflict(_)))
        );
    }

    #[tokio::test]
    async fn blank_number_fails_validation() {
        let (store, seed) = seeded().await;
        let service = VacancyService::new(store);

        assert_matches!(
            service
                .update(&UpdateVacancy {
                    id: seed.vacancy_id,
                    number: String::new(),
                })
                .await,
            Err(AppError::Validation(_))
        );
    }
}
