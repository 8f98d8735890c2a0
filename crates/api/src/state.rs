use std::sync::Arc;

use parkinglot_db::store::Store;

use crate::config::ServerConfig;
use crate::services::{
    CarService, OccupancyManager, ParkingService, TicketLifecycle, VacancyService,
};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (every service holds the store behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend shared by every service.
    pub store: Arc<dyn Store>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    pub cars: CarService,
    pub parkings: ParkingService,
    pub vacancies: VacancyService,
    pub tickets: TicketLifecycle,
}

impl AppState {
    /// Wire every service to `store` using the policies in `config`.
    pub fn new(store: Arc<dyn Store>, config: ServerConfig) -> Self {
        let occupancy = OccupancyManager::new(Arc::clone(&store));

        Self {
            cars: CarService::new(Arc::clone(&store)),
            parkings: ParkingService::new(Arc::clone(&store), config.price_propagation),
            vacancies: VacancyService::new(Arc::clone(&store)),
            tickets: TicketLifecycle::new(
                Arc::clone(&store),
                occupancy,
                config.reassignment_policy,
            ),
            store,
            config: Arc::new(config),
        }
    }
}
