use super::views::{CapacityLevel, PlacementReportSummary, StaffingInsights};

pub(crate) fn generate_insights(summary: &PlacementReportSummary) -> StaffingInsights {
    let depleted_potentials: Vec<&'static str> = summary
        .potential_distribution
        .iter()
        .filter(|entry| entry.open_slots == 0)
        .map(|entry| entry.potential.label())
        .collect();

    let capacity_level = if summary.open_slots == 0 {
        CapacityLevel::Exhausted
    } else if !depleted_potentials.is_empty()
        || summary.open_processes * 2 < summary.total_processes
    {
        CapacityLevel::Tight
    } else {
        CapacityLevel::Ample
    };

    let deepest_pool = summary
        .vacancy_overview
        .iter()
        .filter(|entry| entry.vacancy > 0)
        .max_by(|a, b| {
            a.vacancy
                .cmp(&b.vacancy)
                .then_with(|| b.process.cmp(&a.process))
        })
        .map(|entry| entry.process.clone());

    let mut observations = Vec::new();
    if summary.total_processes > 0 {
        observations.push(format!(
            "{} of {} processes still have open slots ({} total)",
            summary.open_processes, summary.total_processes, summary.open_slots
        ));
    }
    if !depleted_potentials.is_empty() {
        observations.push(format!(
            "no open slots remain for: {}",
            depleted_potentials.join(", ")
        ));
    }
    if let Some(entry) = summary
        .vacancy_overview
        .iter()
        .find(|entry| Some(&entry.process) == deepest_pool.as_ref())
    {
        observations.push(format!(
            "deepest pool is {} with {} open slots",
            entry.process, entry.vacancy
        ));
    }
    if summary.placements > 0 {
        observations.push(format!(
            "{} of {} allocation attempts found a process",
            summary.placed, summary.placements
        ));
    }

    StaffingInsights {
        capacity_level,
        deepest_pool,
        depleted_potentials,
        observations,
    }
}
