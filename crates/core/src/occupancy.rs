//! Vacancy occupancy rules.
//!
//! Invariant: a vacancy is busy if and only if exactly one pending ticket
//! points at it. These functions decide what must change; the API services
//! apply the decision through the store's compare-and-swap primitive.

use crate::error::CoreError;
use crate::policy::ReassignmentPolicy;
use crate::ticket::TicketStatus;
use crate::types::DbId;

/// A vacancy can only be claimed while it is free.
pub fn ensure_free(vacancy_id: DbId, busy: bool) -> Result<(), CoreError> {
    if busy {
        return Err(CoreError::Conflict(format!(
            "Vacancy {vacancy_id} is already occupied"
        )));
    }
    Ok(())
}

/// Occupancy changes needed when a ticket moves between vacancies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReassignmentPlan {
    /// Vacancy to mark busy before the ticket is updated.
    pub claim: Option<DbId>,
    /// Vacancy to mark free after the ticket is updated.
    pub release: Option<DbId>,
}

impl ReassignmentPlan {
    pub fn is_noop(&self) -> bool {
        self.claim.is_none() && self.release.is_none()
    }
}

/// Work out which vacancies change state when a ticket is moved from
/// `current` to `target`.
///
/// Processed tickets no longer hold a vacancy, so editing them never touches
/// occupancy.
pub fn plan_reassignment(
    policy: ReassignmentPolicy,
    status: TicketStatus,
    current: DbId,
    target: DbId,
) -> ReassignmentPlan {
    if current == target || !status.is_pending() {
        return ReassignmentPlan::default();
    }

    let claim = match policy {
        ReassignmentPolicy::ClaimTarget => Some(target),
        ReassignmentPolicy::ReleaseOnly => None,
    };

    ReassignmentPlan {
        claim,
        release: Some(current),
    }
}
