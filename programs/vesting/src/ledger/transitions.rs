//! Create / Deposit / Claim as check-then-settle pairs.
//!
//! `begin_*` runs every check against committed state and returns the amount to move;
//! it never mutates. `finish_*` is applied only after the token movement, to the
//! schedule the caller will commit. A failing `finish_*` must abort the whole request.

use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::guard::{self, Caller, VaultView};
use crate::state::{ScheduleStatus, VestingSchedule};
use crate::utils::address;

type TransitionResult<T> = core::result::Result<T, VestingError>;

/// Immutable schedule parameters supplied at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VestingTerms {
    pub seed: u64,
    pub total_amount: u64,
    pub start_time: i64,
    pub cliff_time: i64,
    pub end_time: i64,
}

impl VestingTerms {
    pub fn validate(&self) -> TransitionResult<()> {
        if self.total_amount == 0 {
            return Err(VestingError::InvalidAmount);
        }
        let ordered = self.start_time <= self.cliff_time
            && self.cliff_time <= self.end_time
            && self.start_time < self.end_time;
        if !ordered {
            return Err(VestingError::InvalidTimeRange);
        }
        Ok(())
    }
}

/// A committed schedule together with where it lives.
#[derive(Clone, Copy, Debug)]
pub struct Target<'a> {
    pub program_id: &'a Pubkey,
    pub address: &'a Pubkey,
    pub schedule: &'a VestingSchedule,
}

impl Target<'_> {
    fn require_address(&self) -> TransitionResult<()> {
        let s = self.schedule;
        address::require_schedule_address(
            self.program_id,
            self.address,
            s.bump,
            &s.beneficiary,
            &s.mint,
            s.seed,
        )
    }

    fn check_vault(&self, vault: &VaultView, token_program: &Pubkey) -> TransitionResult<()> {
        let expected = address::derive_vault_address(self.address, &self.schedule.mint, token_program);
        guard::check_vault(self.address, self.schedule, vault, &expected)
    }
}

/// Build the schedule that Create commits at `address`.
pub fn open_schedule(
    program_id: &Pubkey,
    caller: &Caller,
    beneficiary: &Pubkey,
    mint: &Pubkey,
    terms: &VestingTerms,
    schedule_address: &Pubkey,
    bump: u8,
) -> TransitionResult<VestingSchedule> {
    guard::authorize_create(caller, beneficiary)?;
    terms.validate()?;
    address::require_schedule_address(program_id, schedule_address, bump, beneficiary, mint, terms.seed)?;

    Ok(VestingSchedule {
        admin: caller.key,
        beneficiary: *beneficiary,
        mint: *mint,
        total_amount: terms.total_amount,
        released_amount: 0,
        start_time: terms.start_time,
        cliff_time: terms.cliff_time,
        end_time: terms.end_time,
        seed: terms.seed,
        bump,
        status: ScheduleStatus::Created,
    })
}

/// Checks for Deposit; returns the amount the admin must move into the vault.
/// `vault` is `None` when the vault account does not exist yet.
pub fn begin_deposit(
    target: &Target<'_>,
    caller: &Caller,
    mint: &Pubkey,
    vault: Option<&VaultView>,
    token_program: &Pubkey,
) -> TransitionResult<u64> {
    target.require_address()?;
    if let Some(v) = vault {
        target.check_vault(v, token_program)?;
    }

    // Funding is single-shot whoever asks.
    let vault_balance = vault.map_or(0, |v| v.amount);
    if target.schedule.is_funded() || vault_balance != 0 {
        return Err(VestingError::AlreadyFunded);
    }

    guard::authorize_deposit(target.schedule, caller, mint)?;
    Ok(target.schedule.total_amount)
}

/// Record funding once the vault balance after the transfer is known.
pub fn finish_deposit(schedule: &mut VestingSchedule, vault_balance: u64) -> TransitionResult<()> {
    if vault_balance != schedule.total_amount {
        return Err(VestingError::DepositAmountMismatch);
    }
    schedule.status = ScheduleStatus::Funded;
    Ok(())
}

/// Checks for Claim; returns the amount newly vested at `now`.
pub fn begin_claim(
    target: &Target<'_>,
    caller: &Caller,
    mint: &Pubkey,
    vault: Option<&VaultView>,
    token_program: &Pubkey,
    now: i64,
) -> TransitionResult<u64> {
    target.require_address()?;
    guard::authorize_claim(target.schedule, caller, mint)?;

    let vault = match vault {
        Some(v) if v.amount > 0 && target.schedule.is_funded() => v,
        _ => return Err(VestingError::NotFunded),
    };
    target.check_vault(vault, token_program)?;

    let claimable = target.schedule.claimable(now)?;
    if claimable == 0 {
        return Err(VestingError::NothingToClaim);
    }
    // Conservation: the vault always backs what is still owed.
    if claimable > vault.amount {
        return Err(VestingError::Overflow);
    }
    Ok(claimable)
}

/// Record a payout of `amount`, given the vault balance before and after the transfer.
///
/// Anyone can send tokens to the vault, so only the drop is checked exactly; the balance
/// left behind only has to cover what is still owed.
pub fn finish_claim(
    schedule: &mut VestingSchedule,
    amount: u64,
    vault_before: u64,
    vault_after: u64,
) -> TransitionResult<()> {
    let released = schedule
        .released_amount
        .checked_add(amount)
        .ok_or(VestingError::Overflow)?;
    let remaining = schedule
        .total_amount
        .checked_sub(released)
        .ok_or(VestingError::Overflow)?;
    let paid = vault_before
        .checked_sub(vault_after)
        .ok_or(VestingError::Overflow)?;
    if paid != amount || vault_after < remaining {
        return Err(VestingError::Overflow);
    }
    schedule.released_amount = released;
    schedule.status = if released == schedule.total_amount {
        ScheduleStatus::FullyReleased
    } else {
        ScheduleStatus::PartiallyReleased
    };
    Ok(())
}
