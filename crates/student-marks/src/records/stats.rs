use serde::{Deserialize, Serialize};

use super::domain::{Mark, StudentRecord};

/// Aggregate view over every mark in the collection.
///
/// An empty collection reports a zero count and leaves the other figures unset. Missing keys
/// deserialize the same way, so a bare `{}` reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkStats {
    pub count: usize,
    pub average: Option<f64>,
    pub min: Option<Mark>,
    pub max: Option<Mark>,
}

impl MarkStats {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a StudentRecord>,
    {
        let mut count = 0usize;
        let mut total = 0u64;
        let mut min: Option<Mark> = None;
        let mut max: Option<Mark> = None;

        for record in records {
            count += 1;
            total += u64::from(record.mark.value());
            min = Some(min.map_or(record.mark, |current| current.min(record.mark)));
            max = Some(max.map_or(record.mark, |current| current.max(record.mark)));
        }

        let average = (count > 0).then(|| total as f64 / count as f64);

        Self {
            count,
            average,
            min,
            max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::domain::StudentId;

    fn record(id: u64, mark: i64) -> StudentRecord {
        StudentRecord {
            id: StudentId(id),
            name: format!("Student {id}"),
            course: "COMP1531".to_string(),
            mark: Mark::new(mark).expect("mark in range"),
        }
    }

    #[test]
    fn empty_collection_has_no_figures() {
        let stats = MarkStats::from_records(std::iter::empty());
        assert_eq!(stats.count, 0);
        assert!(stats.average.is_none());
        assert!(stats.min.is_none());
        assert!(stats.max.is_none());
    }

    #[test]
    fn aggregates_marks() {
        let records = vec![record(1, 40), record(2, 95), record(3, 72)];
        let stats = MarkStats::from_records(&records);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min.map(Mark::value), Some(40));
        assert_eq!(stats.max.map(Mark::value), Some(95));
        let average = stats.average.expect("average present");
        assert!((average - 69.0).abs() < f64::EPSILON);
    }

    #[test]
    fn serializes_null_figures_for_empty_collection() {
        let stats = MarkStats::from_records(std::iter::empty());
        let payload = serde_json::to_value(stats).expect("serializes");
        assert_eq!(
            payload,
            serde_json::json!({ "count": 0, "average": null, "min": null, "max": null })
        );
    }

    #[test]
    fn bare_object_reads_as_empty() {
        let stats: MarkStats = serde_json::from_str("{}").expect("deserializes");
        assert_eq!(stats, MarkStats::default());
    }
}
