//! Ticket entity model and DTOs.

use parkinglot_core::billing;
use parkinglot_core::error::CoreError;
use parkinglot_core::ticket::TicketStatus;
use parkinglot_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tickets` table.
///
/// The amount owed is derived on demand via [`Ticket::paid_value`].
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: DbId,
    pub entry: Timestamp,
    pub exit: Option<Timestamp>,
    pub price_per_hour_of_parking: Decimal,
    #[sqlx(rename = "status_id", try_from = "i16")]
    pub status: TicketStatus,
    pub car_id: DbId,
    pub vacancy_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Ticket {
    /// Amount owed as of `now`; frozen once the ticket has an exit time.
    pub fn paid_value(&self, now: Timestamp) -> Result<Decimal, CoreError> {
        billing::paid_value(self.entry, self.exit, self.price_per_hour_of_parking, now)
    }
}

/// DTO for opening a ticket.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicket {
    pub car_id: DbId,
    pub vacancy_id: DbId,
}

/// Insert payload assembled by the ticket service once all lookups succeed.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub entry: Timestamp,
    pub price_per_hour_of_parking: Decimal,
    pub car_id: DbId,
    pub vacancy_id: DbId,
}

/// DTO for editing a ticket's entry time and vacancy. The id travels in the body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicket {
    pub id: DbId,
    pub entry: Timestamp,
    pub vacancy_id: DbId,
}

/// DTO for checking a ticket out.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessTicket {
    pub ticket_id: DbId,
    pub exit: Timestamp,
}
