//! Vesting state machine.
//!
//! `transitions` is the per-request rule set shared by the instruction handlers
//! and by `store::VestingLedger`, the in-process ledger used for previews and tests.

pub mod store;
pub mod transitions;

pub use store::*;
pub use transitions::*;
