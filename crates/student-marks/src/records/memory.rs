use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{StudentCandidate, StudentId, StudentRecord};
use super::repository::{RepositoryError, StudentRepository};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<StudentId, StudentRecord>,
    last_id: u64,
}

/// Process-local repository; ids start at one and are never reused.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStudentRepository {
    table: Arc<Mutex<Table>>,
}

impl InMemoryStudentRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Table>, RepositoryError> {
        self.table
            .lock()
            .map_err(|_| RepositoryError::Unavailable("student table lock poisoned".to_string()))
    }
}

impl StudentRepository for InMemoryStudentRepository {
    fn insert(&self, candidate: StudentCandidate) -> Result<StudentRecord, RepositoryError> {
        let mut table = self.lock()?;
        table.last_id += 1;
        let record = StudentRecord::from_candidate(StudentId(table.last_id), candidate);
        table.rows.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(
        &self,
        id: StudentId,
        candidate: StudentCandidate,
    ) -> Result<StudentRecord, RepositoryError> {
        let mut table = self.lock()?;
        let slot = table
            .rows
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound(id))?;
        *slot = StudentRecord::from_candidate(id, candidate);
        Ok(slot.clone())
    }

    fn fetch(&self, id: StudentId) -> Result<Option<StudentRecord>, RepositoryError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    fn delete(&self, id: StudentId) -> Result<StudentRecord, RepositoryError> {
        self.lock()?
            .rows
            .remove(&id)
            .ok_or(RepositoryError::NotFound(id))
    }

    fn all(&self) -> Result<Vec<StudentRecord>, RepositoryError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::domain::Mark;

    fn candidate(name: &str, mark: i64) -> StudentCandidate {
        StudentCandidate {
            name: name.to_string(),
            course: "COMP1531".to_string(),
            mark: Mark::new(mark).expect("mark in range"),
        }
    }

    #[test]
    fn ids_are_sequential_and_not_reused() {
        let repository = InMemoryStudentRepository::default();
        let first = repository.insert(candidate("Ada", 90)).expect("insert");
        let second = repository.insert(candidate("Bo", 60)).expect("insert");
        assert_eq!(first.id, StudentId(1));
        assert_eq!(second.id, StudentId(2));

        repository.delete(second.id).expect("delete");
        let third = repository.insert(candidate("Cy", 70)).expect("insert");
        assert_eq!(third.id, StudentId(3));
    }

    #[test]
    fn update_replaces_fields_in_place() {
        let repository = InMemoryStudentRepository::default();
        let record = repository.insert(candidate("Ada", 90)).expect("insert");
        let updated = repository
            .update(record.id, candidate("Ada L", 55))
            .expect("update");
        assert_eq!(updated.id, record.id);
        assert_eq!(updated.name, "Ada L");
        assert_eq!(repository.all().expect("all"), vec![updated]);
    }

    #[test]
    fn missing_ids_report_not_found() {
        let repository = InMemoryStudentRepository::default();
        assert!(matches!(
            repository.update(StudentId(9), candidate("Ada", 1)),
            Err(RepositoryError::NotFound(StudentId(9)))
        ));
        assert!(matches!(
            repository.delete(StudentId(9)),
            Err(RepositoryError::NotFound(StudentId(9)))
        ));
        assert!(repository.fetch(StudentId(9)).expect("fetch").is_none());
    }

    #[test]
    fn all_is_ordered_by_id() {
        let repository = InMemoryStudentRepository::default();
        for name in ["Ada", "Bo", "Cy"] {
            repository.insert(candidate(name, 50)).expect("insert");
        }
        let ids: Vec<u64> = repository
            .all()
            .expect("all")
            .into_iter()
            .map(|record| record.id.0)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
