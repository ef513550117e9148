//! Feedback record commands, role-gated per view.
//!
//! Manager-scoped writes that rewrite the authored slice go through
//! `replace_manager_slice`, so other managers' records are always merged
//! back untouched. Employee writes target single records by id.

use anyhow::Result;
use fdk_core::{AppError, OutputFormat, Role};
use fdk_repo::{FeedbackPatch, FeedbackRecord, FeedbackRepository, NewFeedback};
use fdk_session::{Identity, SessionContext};
use fdk_store::StoragePort;

use crate::cli::{FeedbackCommands, parse_tags};
use crate::guard::require_view;

pub fn dispatch(
    cmd: FeedbackCommands,
    store: &dyn StoragePort,
    session: &SessionContext<'_>,
    format: &OutputFormat,
) -> Result<()> {
    let repo = FeedbackRepository::new(store);

    match cmd {
        FeedbackCommands::Create {
            employee,
            strengths,
            improvements,
            sentiment,
            tags,
        } => {
            require_view(session.current(), &[Role::Manager], "feedback create")?;
            let identity = current_identity(session)?;

            let record = repo.create(NewFeedback {
                employee_id: employee,
                manager_id: identity.id.clone(),
                strengths,
                improvements,
                sentiment,
                tags: parse_tags(tags.as_deref()),
            })?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
                OutputFormat::Text => {
                    println!("Created feedback '{}' for '{}'", record.id, record.employee_id)
                }
            }
            Ok(())
        }

        FeedbackCommands::History => {
            require_view(session.current(), &[Role::Manager], "feedback history")?;
            let identity = current_identity(session)?;
            render_records(&repo.list_by_manager(&identity.id)?, format)
        }

        FeedbackCommands::Inbox => {
            require_view(session.current(), &[Role::Employee], "feedback inbox")?;
            let identity = current_identity(session)?;
            render_records(&repo.list_by_employee(&identity.id)?, format)
        }

        FeedbackCommands::Update {
            id,
            employee,
            strengths,
            improvements,
            sentiment,
            tags,
        } => {
            require_view(session.current(), &[Role::Manager], "feedback update")?;
            let identity = current_identity(session)?;

            // Managers can only edit records they authored
            let owns = repo
                .list_by_manager(&identity.id)?
                .iter()
                .any(|r| r.id == id);
            if !owns {
                println!("No feedback with id '{id}' in your history.");
                return Ok(());
            }

            let patch = FeedbackPatch {
                employee_id: employee,
                strengths,
                improvements,
                sentiment,
                tags: tags.as_deref().map(|t| parse_tags(Some(t))),
                acknowledged: None,
            };

            match repo.update(&id, patch)? {
                Some(record) => render_records(std::slice::from_ref(&record), format)?,
                None => println!("No feedback with id '{id}' in your history."),
            }
            Ok(())
        }

        FeedbackCommands::Delete { id } => {
            require_view(session.current(), &[Role::Manager], "feedback delete")?;
            let identity = current_identity(session)?;

            let mut slice = repo.list_by_manager(&identity.id)?;
            let before = slice.len();
            slice.retain(|r| r.id != id);
            if slice.len() == before {
                println!("No feedback with id '{id}' in your history.");
                return Ok(());
            }

            repo.replace_manager_slice(&identity.id, slice)?;
            println!("Deleted feedback '{id}'");
            Ok(())
        }

        FeedbackCommands::Ack { id } => {
            require_view(session.current(), &[Role::Employee], "acknowledge feedback")?;

            match repo.toggle_acknowledge(&id)? {
                Some(record) => println!(
                    "Feedback '{}' acknowledged: {}",
                    record.id, record.acknowledged
                ),
                None => println!("No feedback with id '{id}'."),
            }
            Ok(())
        }

        FeedbackCommands::Comment { id, text } => {
            require_view(session.current(), &[Role::Employee], "comment on feedback")?;
            let identity = current_identity(session)?;

            match repo.append_comment(&id, &text, &identity.id)? {
                Some(record) => println!(
                    "Comment added to '{}' ({} total)",
                    record.id,
                    record.comments.len()
                ),
                None => println!("No feedback with id '{id}'."),
            }
            Ok(())
        }
    }
}

fn current_identity<'s>(session: &'s SessionContext<'_>) -> Result<&'s Identity> {
    session
        .identity()
        .ok_or_else(|| AppError::NotLoggedIn.into())
}

fn render_records(records: &[FeedbackRecord], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Text => {
            if records.is_empty() {
                println!("No feedback records.");
                return Ok(());
            }
            for record in records {
                println!(
                    "{}  [{}]  employee:{}  manager:{}  {}",
                    record.id,
                    record.sentiment,
                    record.employee_id,
                    record.manager_id,
                    record.created_at.format("%Y-%m-%d %H:%M")
                );
                println!("  strengths:    {}", record.strengths);
                println!("  improvements: {}", record.improvements);
                if !record.tags.is_empty() {
                    println!("  tags:         {}", record.tags.join(", "));
                }
                println!(
                    "  acknowledged: {}  comments: {}",
                    record.acknowledged,
                    record.comments.len()
                );
            }
        }
    }
    Ok(())
}
