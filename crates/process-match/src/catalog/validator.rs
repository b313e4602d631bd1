use std::collections::HashSet;

use super::parser::{RawCatalogRow, COMMUNICATION_COLUMN, POTENTIAL_COLUMN};
use super::CatalogImportError;
use crate::placement::domain::{Communication, Potential, Process};

/// Check every raw row against the catalog rules and build the typed rows.
///
/// Checks run over the whole file before the first error is raised, in a
/// fixed order: vacancy values must be whole numbers, then potential and
/// communication must come from their closed sets, then names must be
/// unique. Each error carries every offending value, deduplicated, so one
/// import round-trip surfaces everything wrong with a column. Negative
/// vacancies are clamped to zero rather than rejected.
pub(crate) fn validate_rows(rows: Vec<RawCatalogRow>) -> Result<Vec<Process>, CatalogImportError> {
    let mut invalid_vacancies = Vec::new();
    let mut invalid_potentials = Vec::new();
    let mut invalid_communications = Vec::new();
    let mut parsed = Vec::with_capacity(rows.len());

    for row in &rows {
        let vacancy = row.vacancy.trim().parse::<i64>();
        let potential = Potential::parse(&row.potential);
        let communication = Communication::parse(&row.communication);

        if vacancy.is_err() {
            push_unique(&mut invalid_vacancies, row.vacancy.trim());
        }
        if potential.is_none() {
            push_unique(&mut invalid_potentials, row.potential.trim());
        }
        if communication.is_none() {
            push_unique(&mut invalid_communications, row.communication.trim());
        }

        if let (Ok(vacancy), Some(potential), Some(communication)) =
            (vacancy, potential, communication)
        {
            parsed.push(Process {
                name: row.name.trim().to_string(),
                potential,
                communication,
                vacancy: vacancy.clamp(0, i64::from(u32::MAX)) as u32,
            });
        }
    }

    if !invalid_vacancies.is_empty() {
        return Err(CatalogImportError::InvalidVacancy(invalid_vacancies));
    }
    if !invalid_potentials.is_empty() {
        return Err(CatalogImportError::UnknownValues {
            column: POTENTIAL_COLUMN,
            invalid: invalid_potentials,
            valid: Potential::ordered()
                .iter()
                .map(|value| value.label())
                .collect(),
        });
    }
    if !invalid_communications.is_empty() {
        return Err(CatalogImportError::UnknownValues {
            column: COMMUNICATION_COLUMN,
            invalid: invalid_communications,
            valid: Communication::ordered()
                .iter()
                .map(|value| value.label())
                .collect(),
        });
    }

    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for process in &parsed {
        if !seen.insert(process.name.as_str()) {
            push_unique(&mut duplicates, &process.name);
        }
    }
    if !duplicates.is_empty() {
        return Err(CatalogImportError::DuplicateNames(duplicates));
    }

    Ok(parsed)
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}
