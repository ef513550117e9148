//! Append-only collections: anonymous feedback and feedback requests.
//!
//! The UI only ever appends to these and re-reads them for display; there
//! is no update or delete surface.

use anyhow::Result;
use chrono::{DateTime, Utc};
use fdk_core::{AppError, Sentiment};
use fdk_store::{StoragePort, keys};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymousFeedback {
    pub id: String,
    pub to_employee: String,
    pub strengths: String,
    pub improvements: String,
    pub sentiment: Sentiment,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub id: String,
    pub to_manager: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAnonymousFeedback {
    pub to_employee: String,
    pub strengths: String,
    pub improvements: String,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone)]
pub struct NewFeedbackRequest {
    pub to_manager: String,
    pub message: String,
}

pub struct InboxRepository<'a> {
    store: &'a dyn StoragePort,
}

impl<'a> InboxRepository<'a> {
    pub fn new(store: &'a dyn StoragePort) -> Self {
        Self { store }
    }

    /// Append an anonymous feedback entry.
    pub fn submit_anonymous(&self, new: NewAnonymousFeedback) -> Result<AnonymousFeedback> {
        if new.strengths.trim().is_empty() {
            return Err(AppError::MissingField("strengths").into());
        }
        if new.improvements.trim().is_empty() {
            return Err(AppError::MissingField("improvements").into());
        }

        let mut entries: Vec<AnonymousFeedback> =
            fdk_store::load_collection(self.store, keys::ANONYMOUS_FEEDBACKS)?;
        let entry = AnonymousFeedback {
            id: Ulid::new().to_string(),
            to_employee: new.to_employee,
            strengths: new.strengths,
            improvements: new.improvements,
            sentiment: new.sentiment,
            created_at: Utc::now(),
        };
        entries.push(entry.clone());
        fdk_store::save_collection(self.store, keys::ANONYMOUS_FEEDBACKS, &entries)?;
        Ok(entry)
    }

    /// Append a feedback request addressed to a manager.
    pub fn submit_request(&self, new: NewFeedbackRequest) -> Result<FeedbackRequest> {
        if new.to_manager.trim().is_empty() {
            return Err(AppError::MissingField("to_manager").into());
        }
        if new.message.trim().is_empty() {
            return Err(AppError::MissingField("message").into());
        }

        let mut entries: Vec<FeedbackRequest> =
            fdk_store::load_collection(self.store, keys::FEEDBACK_REQUESTS)?;
        let entry = FeedbackRequest {
            id: Ulid::new().to_string(),
            to_manager: new.to_manager,
            message: new.message,
            created_at: Utc::now(),
        };
        entries.push(entry.clone());
        fdk_store::save_collection(self.store, keys::FEEDBACK_REQUESTS, &entries)?;
        Ok(entry)
    }

    pub fn list_anonymous(&self) -> Result<Vec<AnonymousFeedback>> {
        fdk_store::load_collection(self.store, keys::ANONYMOUS_FEEDBACKS)
    }

    pub fn list_requests(&self) -> Result<Vec<FeedbackRequest>> {
        fdk_store::load_collection(self.store, keys::FEEDBACK_REQUESTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdk_store::MemStore;

    fn anon(to_employee: &str) -> NewAnonymousFeedback {
        NewAnonymousFeedback {
            to_employee: to_employee.to_string(),
            strengths: "Clear communicator".to_string(),
            improvements: "More reviews".to_string(),
            sentiment: Sentiment::Neutral,
        }
    }

    #[test]
    fn test_submit_anonymous_then_list() {
        let store = MemStore::new();
        let inbox = InboxRepository::new(&store);

        let entry = inbox.submit_anonymous(anon("E1")).unwrap();
        assert_eq!(inbox.list_anonymous().unwrap(), vec![entry]);
    }

    #[test]
    fn test_anonymous_entries_keep_submission_order() {
        let store = MemStore::new();
        let inbox = InboxRepository::new(&store);

        inbox.submit_anonymous(anon("E1")).unwrap();
        inbox.submit_anonymous(anon("E2")).unwrap();

        let listed = inbox.list_anonymous().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].to_employee, "E1");
        assert_eq!(listed[1].to_employee, "E2");
    }

    #[test]
    fn test_anonymous_requires_strengths_and_improvements() {
        let store = MemStore::new();
        let inbox = InboxRepository::new(&store);

        let mut missing = anon("E1");
        missing.strengths = "  ".to_string();
        assert!(inbox.submit_anonymous(missing).is_err());
        assert!(inbox.list_anonymous().unwrap().is_empty());
    }

    #[test]
    fn test_submit_request_then_list() {
        let store = MemStore::new();
        let inbox = InboxRepository::new(&store);

        let entry = inbox
            .submit_request(NewFeedbackRequest {
                to_manager: "M1".to_string(),
                message: "Could I get feedback on the Q3 launch?".to_string(),
            })
            .unwrap();

        let listed = inbox.list_requests().unwrap();
        assert_eq!(listed, vec![entry]);
    }

    #[test]
    fn test_request_requires_all_fields() {
        let store = MemStore::new();
        let inbox = InboxRepository::new(&store);

        let result = inbox.submit_request(NewFeedbackRequest {
            to_manager: String::new(),
            message: "hello".to_string(),
        });
        assert!(result.is_err());

        let result = inbox.submit_request(NewFeedbackRequest {
            to_manager: "M1".to_string(),
            message: "   ".to_string(),
        });
        assert!(result.is_err());
        assert!(inbox.list_requests().unwrap().is_empty());
    }

    #[test]
    fn test_collections_are_separate() {
        let store = MemStore::new();
        let inbox = InboxRepository::new(&store);

        inbox.submit_anonymous(anon("E1")).unwrap();
        assert!(inbox.list_requests().unwrap().is_empty());
    }
}
