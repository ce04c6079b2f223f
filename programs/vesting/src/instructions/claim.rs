use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use super::{caller, vault_view};
use crate::ledger::{self, Target};
use crate::state::VestingSchedule;

pub fn claim(ctx: Context<Claim>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let schedule_key = ctx.accounts.vesting_schedule.key();
    let beneficiary = &ctx.accounts.beneficiary;

    let amount = ledger::begin_claim(
        &Target {
            program_id: &crate::ID,
            address: &schedule_key,
            schedule: &ctx.accounts.vesting_schedule,
        },
        &caller(beneficiary),
        &ctx.accounts.mint.key(),
        Some(&vault_view(&ctx.accounts.vault)),
        &ctx.accounts.token_program.key(),
        now,
    )?;

    let vault_before = ctx.accounts.vault.amount;

    // Copy the seeds out before the schedule is borrowed mutably.
    let seeds = ctx.accounts.vesting_schedule.signer_seeds();
    let seed_slices = seeds.as_slices();
    let signer_seeds: &[&[&[u8]]] = &[&seed_slices[..]];

    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.vault.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.beneficiary_token_account.to_account_info(),
                authority: ctx.accounts.vesting_schedule.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        ctx.accounts.mint.decimals,
    )?;

    ctx.accounts.vault.reload()?;
    let vault_after = ctx.accounts.vault.amount;
    let st = &mut ctx.accounts.vesting_schedule;
    ledger::finish_claim(st, amount, vault_before, vault_after)?;

    msg!(
        "Claimed {} tokens. Total released: {}/{}",
        amount,
        st.released_amount,
        st.total_amount,
    );
    emit!(TokensClaimed {
        schedule: schedule_key,
        beneficiary: st.beneficiary,
        amount,
        released_amount: st.released_amount,
        remaining: st.remaining(),
        timestamp: now,
    });

    Ok(amount)
}

#[derive(Accounts)]
pub struct Claim<'info> {
    #[account(mut)]
    pub beneficiary: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub vesting_schedule: Account<'info, VestingSchedule>,

    #[account(mut)]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = beneficiary,
        associated_token::mint = mint,
        associated_token::authority = beneficiary,
        associated_token::token_program = token_program,
    )]
    pub beneficiary_token_account: InterfaceAccount<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

#[event]
pub struct TokensClaimed {
    pub schedule: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub released_amount: u64,
    pub remaining: u64,
    pub timestamp: i64,
}
