pub mod breakdown;
pub mod format;

pub use breakdown::{Breakdown, LocationBreakdown, UserBreakdown, UserMap};
pub use format::format_breakdown_csv;
