use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned identifier for a persisted student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub u64);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mark guaranteed to sit inside the closed interval `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Mark(u8);

impl Mark {
    pub const MIN: Mark = Mark(0);
    pub const MAX: Mark = Mark(100);

    /// Returns `None` when the value falls outside `[0, 100]`.
    pub fn new(value: i64) -> Option<Self> {
        if (0..=100).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    /// Clamp an arbitrary number into range; NaN counts as zero.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::MIN;
        }
        let bounded = value.clamp(0.0, 100.0).round();
        Self(bounded as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Mark {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Mark::new(raw).ok_or_else(|| {
            serde::de::Error::custom(format!("mark {raw} is outside the range 0..=100"))
        })
    }
}

/// Raw form input exactly as the user typed it. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: Option<String>,
    pub course: Option<String>,
    pub mark: Option<String>,
}

impl StudentDraft {
    pub fn new(name: impl Into<String>, course: impl Into<String>, mark: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            course: Some(course.into()),
            mark: Some(mark.into()),
        }
    }

    /// Seed an edit form from an existing record.
    pub fn from_record(record: &StudentRecord) -> Self {
        Self::new(
            record.name.clone(),
            record.course.clone(),
            record.mark.to_string(),
        )
    }
}

/// Trimmed, clamped payload ready to be submitted to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentCandidate {
    pub name: String,
    pub course: String,
    pub mark: Mark,
}

/// A student as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    pub course: String,
    pub mark: Mark,
}

impl StudentRecord {
    pub fn from_candidate(id: StudentId, candidate: StudentCandidate) -> Self {
        Self {
            id,
            name: candidate.name,
            course: candidate.course,
            mark: candidate.mark,
        }
    }
}
