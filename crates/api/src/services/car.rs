use std::sync::Arc;

use parkinglot_core::error::CoreError;
use parkinglot_core::types::DbId;
use parkinglot_db::models::car::{Car, CreateCar, UpdateCar};
use parkinglot_db::store::Store;
use validator::Validate;

use super::CAR;
use crate::error::{AppError, AppResult};

/// CRUD over cars, with plate uniqueness and reference checks.
#[derive(Clone)]
pub struct CarService {
    store: Arc<dyn Store>,
}

impl CarService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Car>> {
        Ok(self.store.list_cars().await?)
    }

    pub async fn get(&self, id: DbId) -> AppResult<Car> {
        self.store
            .find_car(id)
            .await?
            .ok_or(AppError::not_found(CAR, id))
    }

    /// Register a car. A plate already on file is a conflict.
    pub async fn create(&self, input: &CreateCar) -> AppResult<Car> {
        input.validate()?;

        if self.store.find_car_by_plate(&input.plate).await?.is_some() {
            return Err(duplicate_plate(&input.plate));
        }

        let car = self.store.create_car(input).await?;
        tracing::info!(car_id = car.id, plate = %car.plate, "Car registered");
        Ok(car)
    }

    /// Replace every field of an existing car.
    pub async fn update(&self, input: &UpdateCar) -> AppResult<Car> {
        input.validate()?;

        if let Some(other) = self.store.find_car_by_plate(&input.plate).await? {
            if other.id != input.id {
                return Err(duplicate_plate(&input.plate));
            }
        }

        let car = self
            .store
            .update_car(input)
            .await?
            .ok_or(AppError::not_found(CAR, input.id))?;
        tracing::info!(car_id = car.id, "Car updated");
        Ok(car)
    }

    /// Remove a car that no ticket refers to.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        self.get(id).await?;

        let tickets = self.store.count_tickets_by_car(id).await?;
        if tickets > 0 {
            return Err(CoreError::Conflict(format!(
                "Car {id} is referenced by {tickets} ticket(s)"
            ))
            .into());
        }

        if !self.store.delete_car(id).await? {
            return Err(AppError::not_found(CAR, id));
        }
        tracing::info!(car_id = id, "Car deleted");
        Ok(())
    }
}

fn duplicate_plate(plate: &str) -> AppError {
    CoreError::Conflict(format!("A car with plate {plate} is already registered")).into()
}
