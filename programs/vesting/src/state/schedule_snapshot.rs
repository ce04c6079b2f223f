use anchor_lang::prelude::*;

use super::{ScheduleStatus, VestingSchedule};
use crate::error::VestingError;
use crate::utils::release;

/// Read-only view returned by `read_schedule`. `claimable_at` is for display;
/// `claim` always recomputes on chain.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScheduleSnapshot {
    pub address: Pubkey,
    pub vault: Pubkey,
    pub admin: Pubkey,
    pub beneficiary: Pubkey,
    pub mint: Pubkey,
    pub total_amount: u64,
    pub released_amount: u64,
    pub start_time: i64,
    pub cliff_time: i64,
    pub end_time: i64,
    pub seed: u64,
    pub bump: u8,
    pub status: ScheduleStatus,
    pub vault_balance: u64,
}

impl ScheduleSnapshot {
    pub fn new(
        address: Pubkey,
        schedule: &VestingSchedule,
        vault: Pubkey,
        vault_balance: u64,
    ) -> Self {
        Self {
            address,
            vault,
            admin: schedule.admin,
            beneficiary: schedule.beneficiary,
            mint: schedule.mint,
            total_amount: schedule.total_amount,
            released_amount: schedule.released_amount,
            start_time: schedule.start_time,
            cliff_time: schedule.cliff_time,
            end_time: schedule.end_time,
            seed: schedule.seed,
            bump: schedule.bump,
            status: schedule.status,
            vault_balance,
        }
    }

    pub fn claimable_at(&self, now: i64) -> core::result::Result<u64, VestingError> {
        release::claimable(
            self.total_amount,
            self.released_amount,
            self.start_time,
            self.cliff_time,
            self.end_time,
            now,
        )
    }
}
