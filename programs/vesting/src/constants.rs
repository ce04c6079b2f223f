//! Program-wide constants.

/// Domain-separation tag for schedule PDAs.
pub const VESTING_SEED: &[u8] = b"vesting";

/// Anchor account discriminator prefix.
pub const ANCHOR_DISCRIMINATOR: usize = 8;
