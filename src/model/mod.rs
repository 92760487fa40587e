pub mod applied;
pub mod calculation;
pub mod deduction;
pub mod export;
pub mod profile;
pub mod time_entry;

pub use applied::AppliedDeductions;
pub use deduction::{AppliesTo, Deduction, DeductionKind, DeductionRole};
pub use profile::{ClientRate, DistributionKind, HourlyRate, Profile, ProfitDistribution};
pub use time_entry::TimeEntry;
