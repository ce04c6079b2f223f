use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::utils::address::ScheduleSeeds;
use crate::utils::release;

/// Funding and release progress of a schedule.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleStatus {
    /// Created, vault not yet funded.
    Created,
    /// Vault holds `total_amount`, nothing claimed.
    Funded,
    PartiallyReleased,
    /// Terminal.
    FullyReleased,
}

/// Vesting schedule PDA, seeded by `[b"vesting", beneficiary, mint, seed]`.
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct VestingSchedule {
    /// Creator; the only identity allowed to fund the vault.
    pub admin: Pubkey,
    /// Identity entitled to released tokens.
    pub beneficiary: Pubkey,
    /// Token mint held by the vault.
    pub mint: Pubkey,
    /// Amount vested over the whole schedule.
    pub total_amount: u64,
    /// Amount already paid out to the beneficiary.
    pub released_amount: u64,
    /// Linear release origin (unix seconds).
    pub start_time: i64,
    /// Nothing unlocks before this timestamp.
    pub cliff_time: i64,
    /// Everything is unlocked from this timestamp on.
    pub end_time: i64,
    /// Disambiguates several schedules for one beneficiary and mint.
    pub seed: u64,
    /// Canonical PDA bump.
    pub bump: u8,
    pub status: ScheduleStatus,
}

impl VestingSchedule {
    pub fn unlocked(&self, now: i64) -> core::result::Result<u64, VestingError> {
        release::unlocked(
            self.total_amount,
            self.start_time,
            self.cliff_time,
            self.end_time,
            now,
        )
    }

    /// Unlocked but not yet released at `now`.
    pub fn claimable(&self, now: i64) -> core::result::Result<u64, VestingError> {
        release::claimable(
            self.total_amount,
            self.released_amount,
            self.start_time,
            self.cliff_time,
            self.end_time,
            now,
        )
    }

    /// Tokens still owed to the beneficiary; equals the vault balance once funded.
    pub fn remaining(&self) -> u64 {
        self.total_amount.saturating_sub(self.released_amount)
    }

    pub fn is_funded(&self) -> bool {
        self.status != ScheduleStatus::Created
    }

    pub fn is_terminal(&self) -> bool {
        self.status == ScheduleStatus::FullyReleased
    }

    pub fn signer_seeds(&self) -> ScheduleSeeds {
        ScheduleSeeds::new(&self.beneficiary, &self.mint, self.seed, self.bump)
    }
}
