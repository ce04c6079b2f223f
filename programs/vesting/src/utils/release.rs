//! Cliff-then-linear release math.
//! - before `cliff_time`: nothing is unlocked
//! - from `end_time` on: everything is unlocked
//! - in between: `floor(total * (now - start) / (end - start))`, widened to u128
//!
//! Rounding is toward zero, so the last fractional units only unlock at `end_time`.

use crate::error::VestingError;

/// Amount unlocked at `now`, released or not.
pub fn unlocked(
    total_amount: u64,
    start_time: i64,
    cliff_time: i64,
    end_time: i64,
    now: i64,
) -> Result<u64, VestingError> {
    if now < cliff_time {
        return Ok(0);
    }
    if now >= end_time {
        return Ok(total_amount);
    }

    // i128 so that extreme timestamps cannot wrap before widening.
    let elapsed = u128::try_from(i128::from(now) - i128::from(start_time))
        .map_err(|_| VestingError::Overflow)?;
    let duration = u128::try_from(i128::from(end_time) - i128::from(start_time))
        .map_err(|_| VestingError::Overflow)?;

    let v = (total_amount as u128)
        .checked_mul(elapsed)
        .ok_or(VestingError::Overflow)?
        .checked_div(duration)
        .ok_or(VestingError::Overflow)?;
    u64::try_from(v).map_err(|_| VestingError::Overflow)
}

/// Unlocked minus already released, never negative.
pub fn claimable(
    total_amount: u64,
    released_amount: u64,
    start_time: i64,
    cliff_time: i64,
    end_time: i64,
    now: i64,
) -> Result<u64, VestingError> {
    let u = unlocked(total_amount, start_time, cliff_time, end_time, now)?;
    Ok(u.saturating_sub(released_amount))
}
