//! Program-derived addressing.
//! - schedule: PDA of `[b"vesting", beneficiary, mint, seed_le]` under this program
//! - vault: associated token account of the schedule for `(mint, token_program)`
//!
//! Both addresses are off-curve, so no private key can sign for them; only the
//! program moves vault funds, via `invoke_signed` with `ScheduleSeeds`.

use anchor_lang::prelude::*;

use crate::constants::VESTING_SEED;
use crate::error::VestingError;

pub fn derive_schedule_address(
    program_id: &Pubkey,
    beneficiary: &Pubkey,
    mint: &Pubkey,
    seed: u64,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            VESTING_SEED,
            beneficiary.as_ref(),
            mint.as_ref(),
            &seed.to_le_bytes(),
        ],
        program_id,
    )
}

/// Recompute the schedule address from its seeds and recorded bump.
pub fn is_schedule_address(
    program_id: &Pubkey,
    address: &Pubkey,
    bump: u8,
    beneficiary: &Pubkey,
    mint: &Pubkey,
    seed: u64,
) -> bool {
    let seeds = ScheduleSeeds::new(beneficiary, mint, seed, bump);
    match Pubkey::create_program_address(&seeds.as_slices(), program_id) {
        Ok(derived) => derived == *address,
        Err(_) => false,
    }
}

pub fn require_schedule_address(
    program_id: &Pubkey,
    address: &Pubkey,
    bump: u8,
    beneficiary: &Pubkey,
    mint: &Pubkey,
    seed: u64,
) -> core::result::Result<(), VestingError> {
    if is_schedule_address(program_id, address, bump, beneficiary, mint, seed) {
        Ok(())
    } else {
        Err(VestingError::AddressMismatch)
    }
}

/// ATA derivation: PDA(owner, token_program_id, mint) under the associated token program.
pub fn derive_vault_address(schedule: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
    associated_address(schedule, mint, token_program)
}

/// Associated token account of any wallet; used for admin and beneficiary holdings.
pub fn associated_address(owner: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
    let (ata, _) = Pubkey::find_program_address(
        &[owner.as_ref(), token_program.as_ref(), mint.as_ref()],
        &anchor_spl::associated_token::ID,
    );
    ata
}

/// Owned copies of the schedule signer seeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleSeeds {
    beneficiary: [u8; 32],
    mint: [u8; 32],
    seed: [u8; 8],
    bump: [u8; 1],
}

impl ScheduleSeeds {
    pub fn new(beneficiary: &Pubkey, mint: &Pubkey, seed: u64, bump: u8) -> Self {
        Self {
            beneficiary: beneficiary.to_bytes(),
            mint: mint.to_bytes(),
            seed: seed.to_le_bytes(),
            bump: [bump],
        }
    }

    pub fn as_slices(&self) -> [&[u8]; 5] {
        [
            VESTING_SEED,
            &self.beneficiary,
            &self.mint,
            &self.seed,
            &self.bump,
        ]
    }
}
