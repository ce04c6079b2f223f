use anchor_lang::prelude::*;
use anchor_spl::token_interface::{TokenAccount, TokenInterface};

use crate::error::VestingError;
use crate::state::{ScheduleSnapshot, VestingSchedule};
use crate::utils::address;

/// Snapshot for dashboards, returned through return data.
pub fn read_schedule(ctx: Context<ReadSchedule>) -> Result<ScheduleSnapshot> {
    let st = &ctx.accounts.vesting_schedule;
    let schedule_key = st.key();
    address::require_schedule_address(
        &crate::ID,
        &schedule_key,
        st.bump,
        &st.beneficiary,
        &st.mint,
        st.seed,
    )?;

    let vault = &ctx.accounts.vault;
    let expected =
        address::derive_vault_address(&schedule_key, &st.mint, &ctx.accounts.token_program.key());
    require_keys_eq!(vault.key(), expected, VestingError::AddressMismatch);

    Ok(ScheduleSnapshot::new(schedule_key, st, vault.key(), vault.amount))
}

#[derive(Accounts)]
pub struct ReadSchedule<'info> {
    pub vesting_schedule: Account<'info, VestingSchedule>,

    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}
