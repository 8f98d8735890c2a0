//! Parking fee computation.
//!
//! A ticket's paid value is never stored. It is derived from the entry time,
//! the exit time (or "now" while the ticket is still open) and the hourly rate
//! captured on the ticket:
//!
//! ```text
//! round_2(elapsed_minutes * (price_per_hour / 60))
//! ```
//!
//! Rounding uses banker's rounding (midpoint to even), which is the default
//! behaviour of [`Decimal::round_dp`].

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Number of decimal places a paid value is rounded to.
pub const PAID_VALUE_SCALE: u32 = 2;

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);
const MILLIS_PER_MINUTE: Decimal = Decimal::from_parts(60_000, 0, 0, false, 0);

/// Minutes elapsed between `entry` and `until`, with millisecond precision.
///
/// Negative spans (an entry edited into the future) count as zero.
pub fn elapsed_minutes(entry: Timestamp, until: Timestamp) -> Decimal {
    let millis = (until - entry).num_milliseconds().max(0);
    Decimal::from(millis) / MILLIS_PER_MINUTE
}

/// Amount owed for a ticket.
///
/// `now` is used as the effective exit while `exit` is `None`, so an open
/// ticket yields a running total and a closed ticket a frozen one.
///
/// Fails with [`CoreError::Internal`] if the amount does not fit a
/// [`Decimal`].
pub fn paid_value(
    entry: Timestamp,
    exit: Option<Timestamp>,
    price_per_hour: Decimal,
    now: Timestamp,
) -> Result<Decimal, CoreError> {
    let until = exit.unwrap_or(now);
    let per_minute = price_per_hour / MINUTES_PER_HOUR;
    elapsed_minutes(entry, until)
        .checked_mul(per_minute)
        .map(|value| value.round_dp(PAID_VALUE_SCALE))
        .ok_or_else(|| {
            CoreError::Internal(format!(
                "paid value overflows at {price_per_hour}/h from {entry} to {until}"
            ))
        })
}
