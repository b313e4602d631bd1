//! Aggregated views over the catalog and the assignment history.

mod insights;
mod summary;
pub mod views;

pub use summary::{history_by_day, PlacementReport, PotentialTally};
pub use views::{
    CapacityLevel, DailyPlacementEntry, PlacementReportSummary, PotentialShareEntry,
    StaffingInsights, VacancyOverviewEntry,
};

pub(crate) use insights::generate_insights;
