use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod guard;
pub mod instructions;
pub mod ledger;
pub mod state;
pub mod utils;

use instructions::*;
use state::ScheduleSnapshot;

declare_id!("EKcT1sLiMVZfDpgwQbinmxVw7bPSuKW5TNktSdmWoHup");

#[program]
pub mod vesting_escrow {
    use super::*;

    pub fn create_vesting(
        ctx: Context<CreateVesting>,
        seed: u64,
        total_amount: u64,
        start_time: i64,
        cliff_time: i64,
        end_time: i64,
    ) -> Result<()> {
        instructions::create_vesting::create_vesting(
            ctx,
            seed,
            total_amount,
            start_time,
            cliff_time,
            end_time,
        )
    }

    pub fn deposit(ctx: Context<Deposit>) -> Result<()> {
        instructions::deposit::deposit(ctx)
    }

    pub fn claim(ctx: Context<Claim>) -> Result<u64> {
        instructions::claim::claim(ctx)
    }

    pub fn read_schedule(ctx: Context<ReadSchedule>) -> Result<ScheduleSnapshot> {
        instructions::read_schedule::read_schedule(ctx)
    }
}
