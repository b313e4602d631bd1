use std::io;

use super::parser::{COMMUNICATION_COLUMN, NAME_COLUMN, POTENTIAL_COLUMN, VACANCY_COLUMN};
use super::CatalogImportError;
use crate::placement::domain::Process;

/// Serialize processes back to canonical CSV, ready for download and
/// re-import. Headers always use the lowercase canonical spellings, and an
/// empty catalog still produces the header row so the output stays
/// importable.
pub fn export_csv(processes: &[Process]) -> Result<Vec<u8>, CatalogImportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if processes.is_empty() {
        writer.write_record([
            NAME_COLUMN,
            POTENTIAL_COLUMN,
            COMMUNICATION_COLUMN,
            VACANCY_COLUMN,
        ])?;
    }
    for process in processes {
        writer.serialize(process)?;
    }

    writer
        .into_inner()
        .map_err(|error| CatalogImportError::Io(io::Error::new(io::ErrorKind::Other, error)))
}
