use chrono::NaiveDate;
use serde::Serialize;

use crate::placement::domain::{Communication, Potential};

#[derive(Debug, Clone, Serialize)]
pub struct VacancyOverviewEntry {
    pub process: String,
    pub potential: Potential,
    pub communication: Communication,
    pub vacancy: u32,
}

/// Share of the catalog recruiting for one potential, with the open capacity
/// still available there.
#[derive(Debug, Clone, Serialize)]
pub struct PotentialShareEntry {
    pub potential: Potential,
    pub processes: usize,
    pub open_slots: u64,
    pub share_pct: f32,
}

/// One day of allocation activity. `failed` counts attempts that found no
/// open process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPlacementEntry {
    pub date: NaiveDate,
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacementReportSummary {
    pub total_processes: usize,
    pub open_processes: usize,
    pub open_slots: u64,
    pub placements: usize,
    pub placed: usize,
    pub unplaced: usize,
    pub vacancy_overview: Vec<VacancyOverviewEntry>,
    pub potential_distribution: Vec<PotentialShareEntry>,
    pub daily_history: Vec<DailyPlacementEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityLevel {
    Ample,
    Tight,
    Exhausted,
}

impl CapacityLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ample => "Ample",
            Self::Tight => "Tight",
            Self::Exhausted => "Exhausted",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StaffingInsights {
    pub capacity_level: CapacityLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deepest_pool: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depleted_potentials: Vec<&'static str>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
}
