//! Student records: validation, grade bands, and the collection store served over HTTP.

pub mod domain;
pub mod grade;
pub mod import;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;
pub mod stats;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{Mark, StudentCandidate, StudentDraft, StudentId, StudentRecord};
pub use grade::{classify_grade, GradeBand};
pub use import::{RosterImportError, RosterImporter};
pub use memory::InMemoryStudentRepository;
pub use repository::{RepositoryError, StudentRepository};
pub use router::student_router;
pub use service::{candidate_from_payload, PayloadRejected, StudentService, StudentServiceError};
pub use stats::MarkStats;
pub use validation::{clamp_mark, normalize, ValidationRejected};
