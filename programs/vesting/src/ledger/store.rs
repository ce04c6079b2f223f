//! In-process ledger: schedules plus the token holdings they touch.
//!
//! Every request works on copies and commits them only once all checks pass, so a
//! rejected request leaves the ledger unchanged. Mutations take `&mut self`, which
//! serializes requests the way the runtime's account write locks do on chain.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use super::transitions::{self, Target, VestingTerms};
use crate::error::VestingError;
use crate::guard::{Caller, VaultView};
use crate::state::{ScheduleSnapshot, VestingSchedule};
use crate::utils::address;

type LedgerResult<T> = core::result::Result<T, VestingError>;

/// A token account as the ledger tracks it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenHolding {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VestingLedger {
    program_id: Pubkey,
    token_program: Pubkey,
    schedules: BTreeMap<Pubkey, VestingSchedule>,
    holdings: BTreeMap<Pubkey, TokenHolding>,
}

impl VestingLedger {
    pub fn new(program_id: Pubkey) -> Self {
        Self::with_token_program(program_id, anchor_spl::token::ID)
    }

    pub fn with_token_program(program_id: Pubkey, token_program: Pubkey) -> Self {
        Self {
            program_id,
            token_program,
            schedules: BTreeMap::new(),
            holdings: BTreeMap::new(),
        }
    }

    /// Credit `amount` of `mint` to the associated account of `owner`, creating it if needed.
    /// Stands in for the external token program's mint-to.
    pub fn issue(&mut self, owner: &Pubkey, mint: &Pubkey, amount: u64) -> LedgerResult<Pubkey> {
        let key = address::associated_address(owner, mint, &self.token_program);
        let held = self.balance(owner, mint);
        let amount = held.checked_add(amount).ok_or(VestingError::Overflow)?;
        self.holdings.insert(
            key,
            TokenHolding {
                owner: *owner,
                mint: *mint,
                amount,
            },
        );
        Ok(key)
    }

    /// Balance of the associated account of `owner` for `mint`; 0 if it does not exist.
    pub fn balance(&self, owner: &Pubkey, mint: &Pubkey) -> u64 {
        let key = address::associated_address(owner, mint, &self.token_program);
        self.holdings.get(&key).map_or(0, |h| h.amount)
    }

    pub fn holding(&self, key: &Pubkey) -> Option<&TokenHolding> {
        self.holdings.get(key)
    }

    pub fn schedule(&self, address: &Pubkey) -> Option<&VestingSchedule> {
        self.schedules.get(address)
    }

    pub fn vault_address(&self, schedule_address: &Pubkey, mint: &Pubkey) -> Pubkey {
        address::derive_vault_address(schedule_address, mint, &self.token_program)
    }

    /// Create a schedule for `beneficiary` funded later by `caller`; returns its address.
    pub fn create(
        &mut self,
        caller: &Caller,
        beneficiary: &Pubkey,
        mint: &Pubkey,
        terms: &VestingTerms,
    ) -> LedgerResult<Pubkey> {
        let (schedule_address, bump) =
            address::derive_schedule_address(&self.program_id, beneficiary, mint, terms.seed);
        let schedule = transitions::open_schedule(
            &self.program_id,
            caller,
            beneficiary,
            mint,
            terms,
            &schedule_address,
            bump,
        )?;

        // Each address is initialized at most once.
        if self.schedules.contains_key(&schedule_address) {
            return Err(VestingError::AddressMismatch);
        }
        let vault_address = self.vault_address(&schedule_address, mint);
        let vault = match self.holdings.get(&vault_address) {
            Some(existing) => *existing,
            None => TokenHolding {
                owner: schedule_address,
                mint: *mint,
                amount: 0,
            },
        };

        self.schedules.insert(schedule_address, schedule);
        self.holdings.insert(vault_address, vault);
        msg!(
            "Vesting created: schedule={}, beneficiary={}, amount={}",
            schedule_address,
            beneficiary,
            terms.total_amount
        );
        Ok(schedule_address)
    }

    /// Move `total_amount` from the admin's associated account into the vault.
    pub fn deposit(
        &mut self,
        caller: &Caller,
        schedule_address: &Pubkey,
        mint: &Pubkey,
    ) -> LedgerResult<()> {
        let schedule = self
            .schedules
            .get(schedule_address)
            .ok_or(VestingError::AddressMismatch)?;
        let vault_address = self.vault_address(schedule_address, &schedule.mint);
        let vault = self.vault_view(&vault_address);

        let target = Target {
            program_id: &self.program_id,
            address: schedule_address,
            schedule,
        };
        let amount = transitions::begin_deposit(
            &target,
            caller,
            mint,
            vault.as_ref(),
            &self.token_program,
        )?;

        let source_address = address::associated_address(&caller.key, mint, &self.token_program);
        let mut source = self
            .holdings
            .get(&source_address)
            .copied()
            .ok_or(VestingError::DepositAmountMismatch)?;
        source.amount = source
            .amount
            .checked_sub(amount)
            .ok_or(VestingError::DepositAmountMismatch)?;

        let mut vault = self.holdings.get(&vault_address).copied().unwrap_or(TokenHolding {
            owner: *schedule_address,
            mint: schedule.mint,
            amount: 0,
        });
        vault.amount = vault
            .amount
            .checked_add(amount)
            .ok_or(VestingError::Overflow)?;

        let mut next = schedule.clone();
        transitions::finish_deposit(&mut next, vault.amount)?;

        self.holdings.insert(source_address, source);
        self.holdings.insert(vault_address, vault);
        self.schedules.insert(*schedule_address, next);
        msg!("Deposited {} into vault {}", amount, vault_address);
        Ok(())
    }

    /// Pay everything vested by `now` and not yet released; returns the amount paid.
    pub fn claim(
        &mut self,
        caller: &Caller,
        schedule_address: &Pubkey,
        mint: &Pubkey,
        now: i64,
    ) -> LedgerResult<u64> {
        let schedule = self
            .schedules
            .get(schedule_address)
            .ok_or(VestingError::AddressMismatch)?;
        let vault_address = self.vault_address(schedule_address, &schedule.mint);
        let vault = self.vault_view(&vault_address);

        let target = Target {
            program_id: &self.program_id,
            address: schedule_address,
            schedule,
        };
        let amount = transitions::begin_claim(
            &target,
            caller,
            mint,
            vault.as_ref(),
            &self.token_program,
            now,
        )?;

        let mut vault = self
            .holdings
            .get(&vault_address)
            .copied()
            .ok_or(VestingError::NotFunded)?;
        let vault_before = vault.amount;
        vault.amount = vault
            .amount
            .checked_sub(amount)
            .ok_or(VestingError::Overflow)?;

        let dest_address =
            address::associated_address(&schedule.beneficiary, &schedule.mint, &self.token_program);
        let mut dest = self.holdings.get(&dest_address).copied().unwrap_or(TokenHolding {
            owner: schedule.beneficiary,
            mint: schedule.mint,
            amount: 0,
        });
        dest.amount = dest
            .amount
            .checked_add(amount)
            .ok_or(VestingError::Overflow)?;

        let mut next = schedule.clone();
        transitions::finish_claim(&mut next, amount, vault_before, vault.amount)?;

        msg!(
            "Claimed {} tokens. Total released: {}/{}",
            amount,
            next.released_amount,
            next.total_amount
        );
        self.holdings.insert(vault_address, vault);
        self.holdings.insert(dest_address, dest);
        self.schedules.insert(*schedule_address, next);
        Ok(amount)
    }

    pub fn read_schedule(&self, schedule_address: &Pubkey) -> LedgerResult<ScheduleSnapshot> {
        let schedule = self
            .schedules
            .get(schedule_address)
            .ok_or(VestingError::AddressMismatch)?;
        let vault_address = self.vault_address(schedule_address, &schedule.mint);
        let vault_balance = self.holdings.get(&vault_address).map_or(0, |h| h.amount);
        Ok(ScheduleSnapshot::new(
            *schedule_address,
            schedule,
            vault_address,
            vault_balance,
        ))
    }

    /// Schedules where `key` is the admin or the beneficiary, in address order.
    pub fn schedules_for<'a>(
        &'a self,
        key: &'a Pubkey,
    ) -> impl Iterator<Item = (&'a Pubkey, &'a VestingSchedule)> + 'a {
        self.schedules
            .iter()
            .filter(move |(_, s)| s.admin == *key || s.beneficiary == *key)
    }

    fn vault_view(&self, vault_address: &Pubkey) -> Option<VaultView> {
        self.holdings.get(vault_address).map(|h| VaultView {
            address: *vault_address,
            owner: h.owner,
            mint: h.mint,
            amount: h.amount,
        })
    }
}
