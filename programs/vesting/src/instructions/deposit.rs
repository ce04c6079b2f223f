use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};

use super::{caller, vault_view};
use crate::ledger::{self, Target};
use crate::state::VestingSchedule;

pub fn deposit(ctx: Context<Deposit>) -> Result<()> {
    let schedule_key = ctx.accounts.vesting_schedule.key();
    let admin = &ctx.accounts.admin;

    let amount = ledger::begin_deposit(
        &Target {
            program_id: &crate::ID,
            address: &schedule_key,
            schedule: &ctx.accounts.vesting_schedule,
        },
        &caller(admin),
        &ctx.accounts.mint.key(),
        Some(&vault_view(&ctx.accounts.vault)),
        &ctx.accounts.token_program.key(),
    )?;

    token_interface::transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.admin_token_account.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.admin.to_account_info(),
            },
        ),
        amount,
        ctx.accounts.mint.decimals,
    )?;

    // Transfer-fee mints deliver less than was sent.
    ctx.accounts.vault.reload()?;
    let vault_balance = ctx.accounts.vault.amount;
    ledger::finish_deposit(&mut ctx.accounts.vesting_schedule, vault_balance)?;

    msg!("Deposited {} tokens into vault for vesting {}", amount, schedule_key);
    emit!(VestingFunded {
        schedule: schedule_key,
        admin: ctx.accounts.admin.key(),
        amount,
        vault_balance,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub vesting_schedule: Account<'info, VestingSchedule>,

    #[account(mut)]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub admin_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[event]
pub struct VestingFunded {
    pub schedule: Pubkey,
    pub admin: Pubkey,
    pub amount: u64,
    pub vault_balance: u64,
}
