use std::io::Read;

use csv::StringRecord;

use super::CatalogImportError;

pub(crate) const NAME_COLUMN: &str = "name";
pub(crate) const POTENTIAL_COLUMN: &str = "potential";
pub(crate) const COMMUNICATION_COLUMN: &str = "communication";
pub(crate) const VACANCY_COLUMN: &str = "vacancy";

/// One catalog row with every field still raw. Validation happens after the
/// whole file parses so errors can report all offending values at once.
#[derive(Debug)]
pub(crate) struct RawCatalogRow {
    pub(crate) name: String,
    pub(crate) potential: String,
    pub(crate) communication: String,
    pub(crate) vacancy: String,
}

// Header matching is case-insensitive. Older exports spell the name column
// `Process_Name`; both forms stay accepted.
fn canonical_column(header: &str) -> Option<&'static str> {
    match header.trim().to_ascii_lowercase().as_str() {
        "name" | "process_name" => Some(NAME_COLUMN),
        "potential" => Some(POTENTIAL_COLUMN),
        "communication" => Some(COMMUNICATION_COLUMN),
        "vacancy" => Some(VACANCY_COLUMN),
        _ => None,
    }
}

struct ColumnLayout {
    name: usize,
    potential: usize,
    communication: usize,
    vacancy: usize,
}

fn resolve_layout(headers: &StringRecord) -> Result<ColumnLayout, CatalogImportError> {
    let mut name = None;
    let mut potential = None;
    let mut communication = None;
    let mut vacancy = None;

    for (index, header) in headers.iter().enumerate() {
        match canonical_column(header) {
            Some(NAME_COLUMN) if name.is_none() => name = Some(index),
            Some(POTENTIAL_COLUMN) if potential.is_none() => potential = Some(index),
            Some(COMMUNICATION_COLUMN) if communication.is_none() => communication = Some(index),
            Some(VACANCY_COLUMN) if vacancy.is_none() => vacancy = Some(index),
            _ => {}
        }
    }

    if let (Some(name), Some(potential), Some(communication), Some(vacancy)) =
        (name, potential, communication, vacancy)
    {
        return Ok(ColumnLayout {
            name,
            potential,
            communication,
            vacancy,
        });
    }

    let mut missing = Vec::new();
    if name.is_none() {
        missing.push(NAME_COLUMN.to_string());
    }
    if potential.is_none() {
        missing.push(POTENTIAL_COLUMN.to_string());
    }
    if communication.is_none() {
        missing.push(COMMUNICATION_COLUMN.to_string());
    }
    if vacancy.is_none() {
        missing.push(VACANCY_COLUMN.to_string());
    }
    Err(CatalogImportError::MissingColumns(missing))
}

/// Parse catalog CSV into raw rows, resolving header aliases first so a
/// malformed file fails with the full list of missing columns.
pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RawCatalogRow>, CatalogImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let layout = resolve_layout(&headers)?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(RawCatalogRow {
            name: field(&record, layout.name),
            potential: field(&record, layout.potential),
            communication: field(&record, layout.communication),
            vacancy: field(&record, layout.vacancy),
        });
    }
    Ok(rows)
}

fn field(record: &StringRecord, index: usize) -> String {
    record.get(index).unwrap_or_default().to_string()
}
