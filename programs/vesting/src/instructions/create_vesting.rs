use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use super::caller;
use crate::constants::{ANCHOR_DISCRIMINATOR, VESTING_SEED};
use crate::ledger::{self, VestingTerms};
use crate::state::VestingSchedule;

pub fn create_vesting(
    ctx: Context<CreateVesting>,
    seed: u64,
    total_amount: u64,
    start_time: i64,
    cliff_time: i64,
    end_time: i64,
) -> Result<()> {
    let terms = VestingTerms {
        seed,
        total_amount,
        start_time,
        cliff_time,
        end_time,
    };
    let admin = &ctx.accounts.admin;
    let schedule_key = ctx.accounts.vesting_schedule.key();

    // Init has already run; any rejection below reverts it with the rest of the transaction.
    let schedule = ledger::open_schedule(
        &crate::ID,
        &caller(admin),
        &ctx.accounts.beneficiary.key(),
        &ctx.accounts.mint.key(),
        &terms,
        &schedule_key,
        ctx.bumps.vesting_schedule,
    )?;
    ctx.accounts.vesting_schedule.set_inner(schedule);

    let st = &ctx.accounts.vesting_schedule;
    msg!(
        "Vesting created: beneficiary={}, mint={}, amount={}, seed={}",
        st.beneficiary,
        st.mint,
        st.total_amount,
        st.seed,
    );
    emit!(VestingCreated {
        schedule: schedule_key,
        admin: st.admin,
        beneficiary: st.beneficiary,
        mint: st.mint,
        vault: ctx.accounts.vault.key(),
        seed: st.seed,
        total_amount: st.total_amount,
        start_time: st.start_time,
        cliff_time: st.cliff_time,
        end_time: st.end_time,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(seed: u64)]
pub struct CreateVesting<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    /// CHECK: only its key is recorded; the beneficiary does not sign at creation.
    pub beneficiary: UncheckedAccount<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = admin,
        space = ANCHOR_DISCRIMINATOR + VestingSchedule::INIT_SPACE,
        seeds = [
            VESTING_SEED,
            beneficiary.key().as_ref(),
            mint.key().as_ref(),
            &seed.to_le_bytes(),
        ],
        bump,
    )]
    pub vesting_schedule: Account<'info, VestingSchedule>,

    #[account(
        init,
        payer = admin,
        associated_token::mint = mint,
        associated_token::authority = vesting_schedule,
        associated_token::token_program = token_program,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

#[event]
pub struct VestingCreated {
    pub schedule: Pubkey,
    pub admin: Pubkey,
    pub beneficiary: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub seed: u64,
    pub total_amount: u64,
    pub start_time: i64,
    pub cliff_time: i64,
    pub end_time: i64,
}
