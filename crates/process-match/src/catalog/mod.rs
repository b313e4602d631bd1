//! CSV import and export for the process catalog.
//!
//! Import runs in two stages: [`parser`] resolves header aliases and lifts
//! raw rows, then [`validator`] enforces the column rules and produces typed
//! [`Process`] rows. A [`Catalog`] can only be obtained through that
//! pipeline, so everything downstream can trust its contents.

mod export;
mod parser;
mod validator;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::placement::domain::Process;

pub use export::export_csv;

/// A validated process table, ready to install into a placement store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    processes: Vec<Process>,
}

impl Catalog {
    pub(crate) fn new(processes: Vec<Process>) -> Self {
        Self { processes }
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn into_processes(self) -> Vec<Process> {
        self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn total_open_slots(&self) -> u64 {
        self.processes
            .iter()
            .map(|process| u64::from(process.vacancy))
            .sum()
    }
}

/// Entry point for loading catalog CSV exports.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Catalog, CatalogImportError> {
        let rows = parser::parse_rows(reader)?;
        let processes = validator::validate_rows(rows)?;
        Ok(Catalog::new(processes))
    }
}

fn join_quoted(values: &[String]) -> String {
    values
        .iter()
        .map(|value| format!("'{value}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error raised while importing or exporting catalog CSV.
#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("vacancy must contain whole numbers; offending values: {}", join_quoted(.0))]
    InvalidVacancy(Vec<String>),
    #[error("invalid {column} values {}; expected one of: {}", join_quoted(.invalid), .valid.join(", "))]
    UnknownValues {
        column: &'static str,
        invalid: Vec<String>,
        valid: Vec<&'static str>,
    },
    #[error("duplicate process names: {}", join_quoted(.0))]
    DuplicateNames(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::domain::{Communication, Potential};
    use std::io::Cursor;

    #[test]
    fn import_trims_fields_and_clamps_negative_vacancy() {
        let csv = concat!(
            "name,potential,communication,vacancy\n",
            "  Inbound Service , Service , Good ,5\n",
            "Credit Desk,Sales,Excellent,-3\n",
        );
        let catalog = CatalogImporter::from_reader(Cursor::new(csv)).expect("catalog imports");

        assert_eq!(catalog.len(), 2);
        let first = &catalog.processes()[0];
        assert_eq!(first.name, "Inbound Service");
        assert_eq!(first.potential, Potential::Service);
        assert_eq!(first.communication, Communication::Good);
        assert_eq!(first.vacancy, 5);
        assert_eq!(catalog.processes()[1].vacancy, 0, "negative clamps to zero");
    }

    #[test]
    fn import_accepts_legacy_header_spellings() {
        let csv =
            "Process_Name,Potential,Communication,Vacancy\nOutbound Sales,Sales,Very Good,2\n";
        let catalog = CatalogImporter::from_reader(Cursor::new(csv)).expect("legacy headers parse");

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.processes()[0].name, "Outbound Sales");
        assert_eq!(
            catalog.processes()[0].communication,
            Communication::VeryGood
        );
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let csv = "name,vacancy\nInbound Service,5\n";
        let error =
            CatalogImporter::from_reader(Cursor::new(csv)).expect_err("schema is incomplete");

        match error {
            CatalogImportError::MissingColumns(columns) => {
                assert_eq!(columns, vec!["potential", "communication"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error =
            CatalogImporter::from_path("definitely-missing-catalog.csv").expect_err("no such file");
        assert!(matches!(error, CatalogImportError::Io(_)));
    }
}
