use serde::Serialize;

use super::domain::{Communication, Potential, Process};

/// Two-pass candidate selection.
///
/// The first pass keeps processes matching both attributes with at least one
/// open slot. When that yields nothing, the fallback pass relaxes the
/// communication requirement; potential is never relaxed. Results are ranked
/// deepest capacity first so allocation drains the widest pools before the
/// scarce ones.
pub fn find_matching_processes(
    catalog: &[Process],
    potential: Potential,
    communication: Communication,
) -> Vec<Process> {
    let mut matches: Vec<Process> = catalog
        .iter()
        .filter(|process| {
            process.potential == potential
                && process.communication == communication
                && process.has_open_slots()
        })
        .cloned()
        .collect();

    if matches.is_empty() {
        matches = catalog
            .iter()
            .filter(|process| process.potential == potential && process.has_open_slots())
            .cloned()
            .collect();
    }

    rank_by_capacity(&mut matches);
    matches
}

fn rank_by_capacity(processes: &mut [Process]) {
    processes.sort_by(|a, b| {
        b.vacancy
            .cmp(&a.vacancy)
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// A process scored against an employee profile for advisory listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessSuggestion {
    pub process: Process,
    pub relevance: u8,
}

/// Advisory ranking for operators: every open process sharing at least one
/// attribute with the profile, scored 2 points for the potential and 1 for
/// the communication tier. Ties break on capacity, then name.
pub fn rank_suggestions(
    catalog: &[Process],
    potential: Potential,
    communication: Communication,
) -> Vec<ProcessSuggestion> {
    let mut suggestions: Vec<ProcessSuggestion> = catalog
        .iter()
        .filter(|process| {
            process.has_open_slots()
                && (process.potential == potential || process.communication == communication)
        })
        .map(|process| {
            let mut relevance = 0;
            if process.potential == potential {
                relevance += 2;
            }
            if process.communication == communication {
                relevance += 1;
            }
            ProcessSuggestion {
                process: process.clone(),
                relevance,
            }
        })
        .collect();

    suggestions.sort_by(|a, b| {
        b.relevance
            .cmp(&a.relevance)
            .then_with(|| b.process.vacancy.cmp(&a.process.vacancy))
            .then_with(|| a.process.name.cmp(&b.process.name))
    });
    suggestions
}

/// Attribute filter for catalog listings. `None` leaves that axis open.
pub fn filter_catalog(
    catalog: &[Process],
    potential: Option<Potential>,
    communication: Option<Communication>,
) -> Vec<Process> {
    catalog
        .iter()
        .filter(|process| potential.map_or(true, |wanted| process.potential == wanted))
        .filter(|process| communication.map_or(true, |wanted| process.communication == wanted))
        .cloned()
        .collect()
}
