//! Repositories over the durable feedback collections.
//!
//! Every write is a full read-modify-write cycle against the injected
//! [`fdk_store::StoragePort`]: load the whole collection, touch only the
//! targeted records, persist the whole collection back. There is no
//! concurrency control; two writers racing on a save resolve to
//! last-writer-wins.

pub mod feedback;
pub mod inbox;

pub use feedback::{
    Comment, FeedbackPatch, FeedbackRecord, FeedbackRepository, NewFeedback,
};
pub use inbox::{
    AnonymousFeedback, FeedbackRequest, InboxRepository, NewAnonymousFeedback, NewFeedbackRequest,
};
