use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{StudentCandidate, StudentDraft};
use super::validation::{normalize, ValidationRejected};

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row {
        row: usize,
        reason: ValidationRejected,
    },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::Row { row, reason } => {
                write!(f, "roster row {} rejected: {}", row, reason)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::Row { reason, .. } => Some(reason),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    course: Option<String>,
    #[serde(default)]
    mark: Option<String>,
}

/// Reads a `name,course,mark` CSV into submission candidates.
///
/// Rows go through the same normalization as form input. Row numbers in errors are 1-based and
/// exclude the header.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<StudentCandidate>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<StudentCandidate>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut candidates = Vec::new();
        for (index, row) in csv_reader.deserialize::<RosterRow>().enumerate() {
            let row = row?;
            let draft = StudentDraft {
                name: row.name,
                course: row.course,
                mark: row.mark,
            };
            let candidate = normalize(&draft).map_err(|reason| RosterImportError::Row {
                row: index + 1,
                reason,
            })?;
            candidates.push(candidate);
        }

        Ok(candidates)
    }
}
