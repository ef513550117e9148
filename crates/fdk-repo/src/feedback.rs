//! CRUD operations over the `feedbacks` collection.

use anyhow::Result;
use chrono::{DateTime, Utc};
use fdk_core::{AppError, Sentiment};
use fdk_store::{StoragePort, keys};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// A single feedback record as persisted in the `feedbacks` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// ULID, unique within the collection.
    pub id: String,
    pub employee_id: String,
    pub manager_id: String,
    /// Markdown text.
    pub strengths: String,
    /// Markdown text.
    pub improvements: String,
    pub sentiment: Sentiment,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

/// Employee comment attached to a feedback record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

/// Input for [`FeedbackRepository::create`]. Identifier, timestamps and
/// defaults are assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub employee_id: String,
    pub manager_id: String,
    pub strengths: String,
    pub improvements: String,
    pub sentiment: Sentiment,
    pub tags: Vec<String>,
}

impl NewFeedback {
    /// Required-field check, performed before any write.
    fn validate(&self) -> Result<()> {
        if self.employee_id.trim().is_empty() {
            return Err(AppError::MissingField("employee_id").into());
        }
        if self.manager_id.trim().is_empty() {
            return Err(AppError::MissingField("manager_id").into());
        }
        if self.strengths.trim().is_empty() {
            return Err(AppError::MissingField("strengths").into());
        }
        if self.improvements.trim().is_empty() {
            return Err(AppError::MissingField("improvements").into());
        }
        Ok(())
    }
}

/// Partial update for [`FeedbackRepository::update`]: only the set fields
/// are merged into the stored record.
#[derive(Debug, Clone, Default)]
pub struct FeedbackPatch {
    pub employee_id: Option<String>,
    pub strengths: Option<String>,
    pub improvements: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub tags: Option<Vec<String>>,
    pub acknowledged: Option<bool>,
}

impl FeedbackPatch {
    fn apply(self, record: &mut FeedbackRecord) {
        if let Some(employee_id) = self.employee_id {
            record.employee_id = employee_id;
        }
        if let Some(strengths) = self.strengths {
            record.strengths = strengths;
        }
        if let Some(improvements) = self.improvements {
            record.improvements = improvements;
        }
        if let Some(sentiment) = self.sentiment {
            record.sentiment = sentiment;
        }
        if let Some(tags) = self.tags {
            record.tags = tags;
        }
        if let Some(acknowledged) = self.acknowledged {
            record.acknowledged = acknowledged;
        }
    }
}

/// Repository over the `feedbacks` collection.
///
/// Operating on an identifier that does not exist is a no-op signalled
/// through `Option`/`bool` return values, never an error. When an operation
/// finds nothing to change, the stored collection is left untouched.
pub struct FeedbackRepository<'a> {
    store: &'a dyn StoragePort,
}

impl<'a> FeedbackRepository<'a> {
    pub fn new(store: &'a dyn StoragePort) -> Self {
        Self { store }
    }

    /// Create a feedback record: assigns a fresh ULID, stamps creation
    /// time, defaults `acknowledged=false` and empty comments.
    pub fn create(&self, new: NewFeedback) -> Result<FeedbackRecord> {
        new.validate()?;

        let mut records = self.load_all()?;
        let record = FeedbackRecord {
            id: fresh_id(&records),
            employee_id: new.employee_id,
            manager_id: new.manager_id,
            strengths: new.strengths,
            improvements: new.improvements,
            sentiment: new.sentiment,
            tags: new.tags,
            acknowledged: false,
            comments: Vec::new(),
            created_at: Utc::now(),
        };

        records.push(record.clone());
        self.persist(&records)?;
        Ok(record)
    }

    /// The full stored collection, in insertion order.
    pub fn list_all(&self) -> Result<Vec<FeedbackRecord>> {
        self.load_all()
    }

    /// Records authored by a manager (exact match, no pagination).
    pub fn list_by_manager(&self, manager_id: &str) -> Result<Vec<FeedbackRecord>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|r| r.manager_id == manager_id)
            .collect())
    }

    /// Records received by an employee (exact match, no pagination).
    pub fn list_by_employee(&self, employee_id: &str) -> Result<Vec<FeedbackRecord>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|r| r.employee_id == employee_id)
            .collect())
    }

    /// Shallow-merge `patch` into the matching record. Returns the updated
    /// record, or `None` (nothing persisted) if the id is absent.
    pub fn update(&self, id: &str, patch: FeedbackPatch) -> Result<Option<FeedbackRecord>> {
        let mut records = self.load_all()?;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        patch.apply(record);
        let updated = record.clone();
        self.persist(&records)?;
        Ok(Some(updated))
    }

    /// Remove the matching record. Returns `false` if the id was absent.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.load_all()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }

        self.persist(&records)?;
        Ok(true)
    }

    /// Flip the acknowledged flag on the matching record.
    pub fn toggle_acknowledge(&self, id: &str) -> Result<Option<FeedbackRecord>> {
        let mut records = self.load_all()?;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        record.acknowledged = !record.acknowledged;
        let updated = record.clone();
        self.persist(&records)?;
        Ok(Some(updated))
    }

    /// Append a stamped comment to the matching record's comment sequence.
    pub fn append_comment(
        &self,
        id: &str,
        text: &str,
        author_id: &str,
    ) -> Result<Option<FeedbackRecord>> {
        if text.trim().is_empty() {
            return Err(AppError::MissingField("text").into());
        }

        let mut records = self.load_all()?;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        record.comments.push(Comment {
            text: text.to_string(),
            author_id: author_id.to_string(),
            created_at: Utc::now(),
        });
        let updated = record.clone();
        self.persist(&records)?;
        Ok(Some(updated))
    }

    /// Replace every record authored by `manager_id` with `slice`, leaving
    /// all other managers' records intact.
    ///
    /// The full collection is reloaded first and partitioned; a scoped
    /// writer can therefore never persist a subset that drops records
    /// outside its own visibility. Records in `slice` must actually belong
    /// to the named manager.
    pub fn replace_manager_slice(
        &self,
        manager_id: &str,
        slice: Vec<FeedbackRecord>,
    ) -> Result<()> {
        if let Some(stray) = slice.iter().find(|r| r.manager_id != manager_id) {
            anyhow::bail!(
                "Record '{}' belongs to manager '{}', not '{}'",
                stray.id,
                stray.manager_id,
                manager_id
            );
        }

        let mut records: Vec<FeedbackRecord> = self
            .load_all()?
            .into_iter()
            .filter(|r| r.manager_id != manager_id)
            .collect();
        records.extend(slice);
        self.persist(&records)
    }

    fn load_all(&self) -> Result<Vec<FeedbackRecord>> {
        fdk_store::load_collection(self.store, keys::FEEDBACKS)
    }

    fn persist(&self, records: &[FeedbackRecord]) -> Result<()> {
        fdk_store::save_collection(self.store, keys::FEEDBACKS, records)
    }
}

/// Draw a ULID that does not collide with an existing identifier.
fn fresh_id(records: &[FeedbackRecord]) -> String {
    loop {
        let id = Ulid::new().to_string();
        if !records.iter().any(|r| r.id == id) {
            return id;
        }
    }
}

#[cfg(test)]
#[path = "feedback_tests.rs"]
mod tests;
