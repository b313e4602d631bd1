use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use super::views::{
    DailyPlacementEntry, PlacementReportSummary, PotentialShareEntry, StaffingInsights,
    VacancyOverviewEntry,
};
use crate::placement::domain::{Assignment, Potential, Process};

#[derive(Debug, Default, Clone)]
pub struct PotentialTally {
    pub processes: usize,
    pub open_slots: u64,
}

/// Aggregates computed from one snapshot of the catalog and the assignment
/// history.
#[derive(Debug, Default)]
pub struct PlacementReport {
    pub processes: Vec<Process>,
    pub by_potential: HashMap<Potential, PotentialTally>,
    pub daily_history: Vec<DailyPlacementEntry>,
    pub placed: usize,
    pub unplaced: usize,
}

impl PlacementReport {
    pub fn build(catalog: &[Process], assignments: &[Assignment]) -> Self {
        let mut by_potential: HashMap<Potential, PotentialTally> = HashMap::new();
        for process in catalog {
            let tally = by_potential.entry(process.potential).or_default();
            tally.processes += 1;
            tally.open_slots += u64::from(process.vacancy);
        }

        let placed = assignments
            .iter()
            .filter(|assignment| assignment.succeeded())
            .count();

        Self {
            processes: catalog.to_vec(),
            by_potential,
            daily_history: history_by_day(assignments),
            placed,
            unplaced: assignments.len() - placed,
        }
    }

    pub fn summary(&self) -> PlacementReportSummary {
        let mut vacancy_overview: Vec<VacancyOverviewEntry> = self
            .processes
            .iter()
            .map(|process| VacancyOverviewEntry {
                process: process.name.clone(),
                potential: process.potential,
                communication: process.communication,
                vacancy: process.vacancy,
            })
            .collect();
        vacancy_overview.sort_by(|a, b| {
            b.vacancy
                .cmp(&a.vacancy)
                .then_with(|| a.process.cmp(&b.process))
        });

        let potential_distribution = Potential::ordered()
            .into_iter()
            .filter_map(|potential| {
                self.by_potential.get(&potential).map(|tally| PotentialShareEntry {
                    potential,
                    processes: tally.processes,
                    open_slots: tally.open_slots,
                    share_pct: share_pct(tally.processes, self.processes.len()),
                })
            })
            .collect();

        PlacementReportSummary {
            total_processes: self.processes.len(),
            open_processes: self
                .processes
                .iter()
                .filter(|process| process.has_open_slots())
                .count(),
            open_slots: self
                .processes
                .iter()
                .map(|process| u64::from(process.vacancy))
                .sum(),
            placements: self.placed + self.unplaced,
            placed: self.placed,
            unplaced: self.unplaced,
            vacancy_overview,
            potential_distribution,
            daily_history: self.daily_history.clone(),
        }
    }
}

impl PlacementReportSummary {
    pub fn insights(&self) -> StaffingInsights {
        super::generate_insights(self)
    }
}

/// Group allocation attempts by UTC calendar day, newest day first.
pub fn history_by_day(assignments: &[Assignment]) -> Vec<DailyPlacementEntry> {
    let mut days: BTreeMap<NaiveDate, DailyPlacementEntry> = BTreeMap::new();
    for assignment in assignments {
        let date = assignment.assigned_at.date_naive();
        let entry = days.entry(date).or_insert_with(|| DailyPlacementEntry {
            date,
            total: 0,
            successful: 0,
            failed: 0,
        });
        entry.total += 1;
        if assignment.succeeded() {
            entry.successful += 1;
        } else {
            entry.failed += 1;
        }
    }
    days.into_values().rev().collect()
}

// Rounded to one decimal place, matching the catalog share charts.
fn share_pct(count: usize, total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    ((count as f32 / total as f32) * 1000.0).round() / 10.0
}
