use crate::records::{StudentId, StudentRecord};

/// Ordered, id-unique list of students owned by a single view.
///
/// Writes go through `append`, `replace` and `remove`; an id never appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentRoster {
    records: Vec<StudentRecord>,
}

impl StudentRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly loaded collection. Later duplicates of an id win.
    pub fn replace_all(&mut self, records: Vec<StudentRecord>) {
        self.records.clear();
        for record in records {
            self.append(record);
        }
    }

    /// Add a newly created record, replacing in place if the id is already present.
    pub fn append(&mut self, record: StudentRecord) {
        if !self.replace(record.clone()) {
            self.records.push(record);
        }
    }

    /// Replace the record sharing this id. Returns `false` when the id is unknown.
    pub fn replace(&mut self, record: StudentRecord) -> bool {
        match self.position(record.id) {
            Some(index) => {
                self.records[index] = record;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: StudentId) -> Option<StudentRecord> {
        self.position(id).map(|index| self.records.remove(index))
    }

    pub fn get(&self, id: StudentId) -> Option<&StudentRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: StudentId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Mark;

    fn record(id: u64, name: &str) -> StudentRecord {
        StudentRecord {
            id: StudentId(id),
            name: name.to_string(),
            course: "COMP1531".to_string(),
            mark: Mark::new(60).expect("mark in range"),
        }
    }

    #[test]
    fn append_keeps_ids_unique() {
        let mut roster = StudentRoster::new();
        roster.append(record(1, "Ada"));
        roster.append(record(2, "Bo"));
        roster.append(record(1, "Ada L"));

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.records()[0].name, "Ada L");
        assert_eq!(roster.records()[1].name, "Bo");
    }

    #[test]
    fn replace_is_by_id_and_never_appends() {
        let mut roster = StudentRoster::new();
        roster.append(record(1, "Ada"));

        assert!(!roster.replace(record(7, "Ghost")));
        assert_eq!(roster.len(), 1);
        assert!(roster.replace(record(1, "Ada Lovelace")));
        assert_eq!(
            roster.get(StudentId(1)).map(|r| r.name.as_str()),
            Some("Ada Lovelace")
        );
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut roster = StudentRoster::new();
        roster.replace_all(vec![record(1, "Ada"), record(2, "Bo"), record(3, "Cy")]);

        let removed = roster.remove(StudentId(2)).expect("present");
        assert_eq!(removed.name, "Bo");
        assert!(roster.remove(StudentId(2)).is_none());
        let names: Vec<&str> = roster.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Cy"]);
    }

    #[test]
    fn replace_all_collapses_duplicate_ids() {
        let mut roster = StudentRoster::new();
        roster.replace_all(vec![record(1, "Ada"), record(1, "Ada again")]);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.records()[0].name, "Ada again");
    }
}
