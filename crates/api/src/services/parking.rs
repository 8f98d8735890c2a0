use std::sync::Arc;

use parkinglot_core::error::CoreError;
use parkinglot_core::policy::PricePropagation;
use parkinglot_core::types::DbId;
use parkinglot_db::models::parking::{CreateParking, Parking, UpdateParking};
use parkinglot_db::store::Store;
use validator::Validate;

use super::PARKING;
use crate::error::{AppError, AppResult};

/// CRUD over parking lots.
///
/// A price change reaches the lot's open tickets unless the service runs
/// with [`PricePropagation::Snapshot`].
#[derive(Clone)]
pub struct ParkingService {
    store: Arc<dyn Store>,
    propagation: PricePropagation,
}

impl ParkingService {
    pub fn new(store: Arc<dyn Store>, propagation: PricePropagation) -> Self {
        Self { store, propagation }
    }

    pub async fn list(&self) -> AppResult<Vec<Parking>> {
        Ok(self.store.list_parkings().await?)
    }

    pub async fn get(&self, id: DbId) -> AppResult<Parking> {
        self.store
            .find_parking(id)
            .await?
            .ok_or(AppError::not_found(PARKING, id))
    }

    pub async fn create(&self, input: &CreateParking) -> AppResult<Parking> {
        input.validate()?;
        let parking = self.store.create_parking(input).await?;
        tracing::info!(parking_id = parking.id, price_per_hour = %parking.price_per_hour, "Parking created");
        Ok(parking)
    }

    pub async fn update(&self, input: &UpdateParking) -> AppResult<Parking> {
        input.validate()?;

        let before = self.get(input.id).await?;
        let parking = self
            .store
            .update_parking(input)
            .await?
            .ok_or(AppError::not_found(PARKING, input.id))?;

        if parking.price_per_hour != before.price_per_hour
            && self.propagation == PricePropagation::OpenTickets
        {
            let repriced = match self
                .store
                .reprice_pending_tickets(parking.id, parking.price_per_hour)
                .await
            {
                Ok(repriced) => repriced,
                Err(err) => {
                    tracing::warn!(
                        parking_id = parking.id,
                        new_price = %parking.price_per_hour,
                        old_price = %before.price_per_hour,
                        error = %err,
                        "Parking price saved but open tickets keep the old rate",
                    );
                    return Err(err.into());
                }
            };
            tracing::info!(
                parking_id = parking.id,
                price_per_hour = %parking.price_per_hour,
                repriced,
                "Parking price propagated to open tickets",
            );
        } else {
            tracing::info!(parking_id = parking.id, "Parking updated");
        }

        Ok(parking)
    }

    /// Remove a parking lot that has no vacancies left.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        self.get(id).await?;

        let vacancies = self.store.count_vacancies_by_parking(id).await?;
        if vacancies > 0 {
            return Err(CoreError::Conflict(format!(
                "Parking {id} still has {vacancies} vacancy(ies)"
            ))
            .into());
        }

        if !self.store.delete_parking(id).await? {
            return Err(AppError::not_found(PARKING, id));
        }
        tracing::info!(parking_id = id, "Parking deleted");
        Ok(())
    }
}
