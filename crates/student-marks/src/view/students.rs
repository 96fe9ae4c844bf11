use crate::client::{ClientError, CollectionClient};
use crate::records::{normalize, StudentDraft, StudentId, StudentRecord};

use super::roster::StudentRoster;

/// Client-side view of the collection.
///
/// Results are applied only once the remote call has settled. A failed call leaves the roster as
/// it was and records the user-facing message. A draft that fails validation is dropped before
/// anything in the view changes.
#[derive(Debug)]
pub struct StudentsView {
    client: CollectionClient,
    roster: StudentRoster,
    error: Option<String>,
    loading: bool,
    editing: Option<StudentId>,
}

impl StudentsView {
    pub fn new(client: CollectionClient) -> Self {
        Self::with_roster(client, StudentRoster::new())
    }

    pub fn with_roster(client: CollectionClient, roster: StudentRoster) -> Self {
        Self {
            client,
            roster,
            error: None,
            loading: false,
            editing: None,
        }
    }

    pub fn roster(&self) -> &StudentRoster {
        &self.roster
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn editing(&self) -> Option<StudentId> {
        self.editing
    }

    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        self.error = None;
        let result = self.client.list().await;
        self.loading = false;

        let records = self.settle(result)?;
        self.roster.replace_all(records);
        Ok(())
    }

    pub async fn create(&mut self, draft: &StudentDraft) -> Result<StudentRecord, ClientError> {
        let candidate = normalize(draft)?;
        self.error = None;
        let result = self.client.create(&candidate).await;
        let created = self.settle(result)?;
        self.roster.append(created.clone());
        Ok(created)
    }

    /// Select a record for editing and return a form pre-filled with its values.
    pub fn begin_edit(&mut self, id: StudentId) -> Option<StudentDraft> {
        let draft = self.roster.get(id).map(StudentDraft::from_record)?;
        self.editing = Some(id);
        Some(draft)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub async fn update(
        &mut self,
        id: StudentId,
        draft: &StudentDraft,
    ) -> Result<StudentRecord, ClientError> {
        let candidate = normalize(draft)?;
        self.error = None;
        let result = self.client.update(id, &candidate).await;
        let updated = self.settle(result)?;
        self.roster.replace(updated.clone());
        self.editing = None;
        Ok(updated)
    }

    pub async fn delete(&mut self, id: StudentId) -> Result<(), ClientError> {
        self.error = None;
        let result = self.client.delete(id).await;
        self.settle(result)?;
        self.roster.remove(id);
        if self.editing == Some(id) {
            self.editing = None;
        }
        Ok(())
    }

    fn settle<T>(&mut self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if let Err(err) = &result {
            self.error = Some(err.to_string());
        }
        result
    }
}
