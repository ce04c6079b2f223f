use anchor_lang::error::ERROR_CODE_OFFSET;
use anchor_lang::prelude::*;

/// Rejection reasons for the vesting escrow. Codes are assigned from 6000 in
/// declaration order and must stay stable for clients.
#[error_code]
#[derive(PartialEq, Eq)]
pub enum VestingError {
    #[msg("Invalid time range: must satisfy start <= cliff <= end and start < end")]
    InvalidTimeRange,

    #[msg("Invalid amount: total_amount must be greater than 0")]
    InvalidAmount,

    #[msg("Unauthorized: admin signature required")]
    UnauthorizedAdmin,

    #[msg("Unauthorized: beneficiary signature required")]
    UnauthorizedBeneficiary,

    #[msg("Already funded: vault already holds tokens")]
    AlreadyFunded,

    #[msg("Not funded: vault must be funded before claiming")]
    NotFunded,

    #[msg("Nothing to claim: no newly vested tokens")]
    NothingToClaim,

    #[msg("Mint mismatch: token mint does not match schedule")]
    MintMismatch,

    #[msg("Deposit amount mismatch: vault must receive exactly total_amount")]
    DepositAmountMismatch,

    #[msg("Math overflow")]
    Overflow,

    #[msg("Address mismatch: account is not the derived address")]
    AddressMismatch,
}

/// How a caller should treat a rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad inputs; safe to retry once corrected.
    Validation,
    /// Wrong caller or wrong state; needs a different signer or more elapsed time.
    Authorization,
    /// Unreachable for well-formed requests.
    Defensive,
}

impl VestingError {
    /// Every variant, indexed by `code() - 6000`. Kept in sync by hand; the
    /// `all_lists_every_variant` test fails to compile when a variant is added.
    pub const ALL: [VestingError; 11] = [
        VestingError::InvalidTimeRange,
        VestingError::InvalidAmount,
        VestingError::UnauthorizedAdmin,
        VestingError::UnauthorizedBeneficiary,
        VestingError::AlreadyFunded,
        VestingError::NotFunded,
        VestingError::NothingToClaim,
        VestingError::MintMismatch,
        VestingError::DepositAmountMismatch,
        VestingError::Overflow,
        VestingError::AddressMismatch,
    ];

    pub fn code(self) -> u32 {
        ERROR_CODE_OFFSET + self as u32
    }

    /// Decode a custom program error code returned by the runtime.
    pub fn from_code(code: u32) -> Option<VestingError> {
        let idx = code.checked_sub(ERROR_CODE_OFFSET)?;
        Self::ALL.get(idx as usize).copied()
    }

    pub fn class(self) -> ErrorClass {
        match self {
            VestingError::InvalidTimeRange
            | VestingError::InvalidAmount
            | VestingError::MintMismatch
            | VestingError::DepositAmountMismatch => ErrorClass::Validation,
            VestingError::UnauthorizedAdmin
            | VestingError::UnauthorizedBeneficiary
            | VestingError::AlreadyFunded
            | VestingError::NotFunded
            | VestingError::NothingToClaim => ErrorClass::Authorization,
            VestingError::Overflow | VestingError::AddressMismatch => ErrorClass::Defensive,
        }
    }

    pub fn is_retryable(self) -> bool {
        self.class() == ErrorClass::Validation
    }
}
