pub mod claim;
pub mod create_vesting;
pub mod deposit;
pub mod read_schedule;

pub use claim::*;
pub use create_vesting::*;
pub use deposit::*;
pub use read_schedule::*;

use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;

use crate::guard::{Caller, VaultView};

pub(crate) fn vault_view(vault: &InterfaceAccount<'_, TokenAccount>) -> VaultView {
    VaultView {
        address: vault.key(),
        owner: vault.owner,
        mint: vault.mint,
        amount: vault.amount,
    }
}

pub(crate) fn caller(signer: &Signer<'_>) -> Caller {
    Caller {
        key: signer.key(),
        is_signer: signer.is_signer,
    }
}
