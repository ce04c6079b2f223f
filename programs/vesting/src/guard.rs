//! Authorization predicates. Callers are only ever compared against fields
//! already committed in the schedule; every mismatch rejects the request.

use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::VestingSchedule;

type GuardResult = core::result::Result<(), VestingError>;

/// Identity submitting a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Caller {
    pub key: Pubkey,
    pub is_signer: bool,
}

impl Caller {
    pub fn signer(key: Pubkey) -> Self {
        Self { key, is_signer: true }
    }

    pub fn unsigned(key: Pubkey) -> Self {
        Self {
            key,
            is_signer: false,
        }
    }
}

/// The fields of a token account the guard cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VaultView {
    pub address: Pubkey,
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

pub fn authorize_create(caller: &Caller, beneficiary: &Pubkey) -> GuardResult {
    if !caller.is_signer {
        return Err(VestingError::UnauthorizedAdmin);
    }
    if *beneficiary == Pubkey::default() {
        return Err(VestingError::AddressMismatch);
    }
    Ok(())
}

pub fn authorize_deposit(schedule: &VestingSchedule, caller: &Caller, mint: &Pubkey) -> GuardResult {
    if !caller.is_signer || caller.key != schedule.admin {
        return Err(VestingError::UnauthorizedAdmin);
    }
    if *mint != schedule.mint {
        return Err(VestingError::MintMismatch);
    }
    Ok(())
}

pub fn authorize_claim(schedule: &VestingSchedule, caller: &Caller, mint: &Pubkey) -> GuardResult {
    if !caller.is_signer || caller.key != schedule.beneficiary {
        return Err(VestingError::UnauthorizedBeneficiary);
    }
    if *mint != schedule.mint {
        return Err(VestingError::MintMismatch);
    }
    Ok(())
}

/// The vault must be the expected ATA, owned by the schedule PDA and holding the schedule mint.
pub fn check_vault(
    schedule_address: &Pubkey,
    schedule: &VestingSchedule,
    vault: &VaultView,
    expected_address: &Pubkey,
) -> GuardResult {
    if vault.address != *expected_address || vault.owner != *schedule_address {
        return Err(VestingError::AddressMismatch);
    }
    if vault.mint != schedule.mint {
        return Err(VestingError::MintMismatch);
    }
    Ok(())
}
