//! Switches for the two places where the checkout rules deliberately depart
//! from the legacy behaviour.
//!
//! Both default to the corrected behaviour. The legacy variants exist so an
//! operator can reproduce historical billing exactly.

use std::fmt;
use std::str::FromStr;

/// What happens to the target vacancy when a pending ticket is moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReassignmentPolicy {
    /// Claim the target vacancy, then release the original one.
    #[default]
    ClaimTarget,
    /// Only release the original vacancy. The target is left free even
    /// though a pending ticket now points at it (legacy behaviour).
    ReleaseOnly,
}

/// What happens to open tickets when a parking's hourly price changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PricePropagation {
    /// Pending tickets of the parking are billed at the new rate.
    #[default]
    OpenTickets,
    /// Tickets keep the rate captured when they were opened (legacy no-op).
    Snapshot,
}

impl FromStr for ReassignmentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claim_target" => Ok(Self::ClaimTarget),
            "release_only" => Ok(Self::ReleaseOnly),
            other => Err(format!(
                "Invalid reassignment policy '{other}'. Must be one of: claim_target, release_only"
            )),
        }
    }
}

impl fmt::Display for ReassignmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClaimTarget => f.write_str("claim_target"),
            Self::ReleaseOnly => f.write_str("release_only"),
        }
    }
}

impl FromStr for PricePropagation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open_tickets" => Ok(Self::OpenTickets),
            "snapshot" => Ok(Self::Snapshot),
            other => Err(format!(
                "Invalid price propagation '{other}'. Must be one of: open_tickets, snapshot"
            )),
        }
    }
}

impl fmt::Display for PricePropagation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenTickets => f.write_str("open_tickets"),
            Self::Snapshot => f.write_str("snapshot"),
        }
    }
}
