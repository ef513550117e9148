//! Feedback request and anonymous feedback commands (employee views).

use anyhow::Result;
use fdk_core::{Role, Sentiment};
use fdk_repo::{InboxRepository, NewAnonymousFeedback, NewFeedbackRequest};
use fdk_session::SessionContext;
use fdk_store::StoragePort;

use crate::guard::require_view;

pub fn request(
    store: &dyn StoragePort,
    session: &SessionContext<'_>,
    to_manager: String,
    message: String,
) -> Result<()> {
    require_view(session.current(), &[Role::Employee], "request feedback")?;

    let inbox = InboxRepository::new(store);
    let entry = inbox.submit_request(NewFeedbackRequest {
        to_manager,
        message,
    })?;

    println!(
        "Feedback request '{}' saved for manager '{}'",
        entry.id, entry.to_manager
    );
    Ok(())
}

pub fn anonymous(
    store: &dyn StoragePort,
    session: &SessionContext<'_>,
    to_employee: String,
    strengths: String,
    improvements: String,
    sentiment: Sentiment,
) -> Result<()> {
    require_view(session.current(), &[Role::Employee], "anonymous feedback")?;

    let inbox = InboxRepository::new(store);
    let entry = inbox.submit_anonymous(NewAnonymousFeedback {
        to_employee,
        strengths,
        improvements,
        sentiment,
    })?;

    let total = inbox.list_anonymous()?.len();
    println!("Anonymous feedback '{}' submitted ({total} stored)", entry.id);
    Ok(())
}
