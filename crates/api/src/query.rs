//! Shared query parameter types for API handlers.

use parkinglot_core::types::DbId;
use serde::Deserialize;

/// `?id=` parameter used by every delete endpoint.
#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: DbId,
}
