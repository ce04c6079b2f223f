pub mod schedule_snapshot;
pub mod vesting_schedule;

pub use schedule_snapshot::*;
pub use vesting_schedule::*;
