//! Ticket status and the transitions allowed between them.
//!
//! A ticket starts `Pending` when its car takes a vacancy and becomes
//! `Processed` exactly once, at checkout. There is no way back.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Status ID type matching the SMALLINT `status_id` column.
pub type StatusId = i16;

/// Ticket lifecycle status. Discriminants match the `ticket_statuses` seed rows.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TicketStatus {
    Pending = 1,
    Processed = 2,
}

impl TicketStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Map a database status ID back onto the enum.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(Self::Pending),
            2 => Some(Self::Processed),
            _ => None,
        }
    }

    pub fn is_pending(self) -> bool {
        self == Self::Pending
    }
}

impl From<TicketStatus> for StatusId {
    fn from(value: TicketStatus) -> Self {
        value as StatusId
    }
}

impl TryFrom<StatusId> for TicketStatus {
    type Error = CoreError;

    fn try_from(id: StatusId) -> Result<Self, Self::Error> {
        Self::from_id(id)
            .ok_or_else(|| CoreError::Internal(format!("Unknown ticket status id {id}")))
    }
}

/// A ticket may only be processed while it is still pending.
pub fn ensure_processable(ticket_id: DbId, status: TicketStatus) -> Result<(), CoreError> {
    match status {
        TicketStatus::Pending => Ok(()),
        TicketStatus::Processed => Err(CoreError::Conflict(format!(
            "Ticket {ticket_id} has already been processed"
        ))),
    }
}

/// A ticket may only be deleted once it has been processed.
pub fn ensure_deletable(ticket_id: DbId, status: TicketStatus) -> Result<(), CoreError> {
    match status {
        TicketStatus::Processed => Ok(()),
        TicketStatus::Pending => Err(CoreError::Conflict(format!(
            "Ticket {ticket_id} has not been processed yet"
        ))),
    }
}

/// The checkout time cannot precede the entry time.
pub fn validate_exit(entry: Timestamp, exit: Timestamp) -> Result<(), CoreError> {
    if exit < entry {
        return Err(CoreError::Validation(format!(
            "Exit {exit} is earlier than entry {entry}"
        )));
    }
    Ok(())
}
