use super::domain::{Mark, StudentCandidate, StudentDraft};

/// Raised when a draft cannot become a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationRejected {
    #[error("name must not be blank")]
    BlankName,
    #[error("course must not be blank")]
    BlankCourse,
}

/// Turn raw form input into a submission candidate.
///
/// Name and course are trimmed and must be non-empty. The mark never causes a rejection: missing,
/// blank or non-numeric input becomes zero, and anything else is clamped into `[0, 100]`.
pub fn normalize(draft: &StudentDraft) -> Result<StudentCandidate, ValidationRejected> {
    let name = trimmed(draft.name.as_deref());
    if name.is_empty() {
        return Err(ValidationRejected::BlankName);
    }

    let course = trimmed(draft.course.as_deref());
    if course.is_empty() {
        return Err(ValidationRejected::BlankCourse);
    }

    Ok(StudentCandidate {
        name: name.to_string(),
        course: course.to_string(),
        mark: clamp_mark(draft.mark.as_deref().unwrap_or_default()),
    })
}

/// Parse-or-zero followed by a clamp into `[0, 100]`.
pub fn clamp_mark(raw: &str) -> Mark {
    let parsed = raw.trim().parse::<f64>().unwrap_or(0.0);
    Mark::clamped(parsed)
}

fn trimmed(value: Option<&str>) -> &str {
    value.map(str::trim).unwrap_or_default()
}
