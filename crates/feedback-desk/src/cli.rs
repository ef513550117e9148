use clap::{Parser, Subcommand};
use fdk_core::{OutputFormat, Role, Sentiment};

#[derive(Parser)]
#[command(name = "fdk")]
#[command(about = "Feedback Desk: role-gated employee feedback")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in against the remote auth endpoint
    Login {
        /// Account id (emp_id)
        emp_id: String,

        /// Role to log in as (manager, employee)
        #[arg(long, value_enum)]
        role: Role,

        /// Password; prompted on stdin if omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Register a new account
    Signup {
        /// Full name
        #[arg(long)]
        name: String,

        /// Account id (emp_id)
        #[arg(long)]
        emp_id: String,

        /// Role to register as (manager, employee)
        #[arg(long, value_enum)]
        role: Role,

        /// Department name
        #[arg(long)]
        department: String,

        /// Password; prompted on stdin if omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Log out and clear the stored session
    Logout,

    /// Show the current session identity
    Whoami,

    /// Create, list and manage feedback records
    Feedback {
        #[command(subcommand)]
        cmd: FeedbackCommands,
    },

    /// Ask a manager for feedback (employee only)
    Request {
        /// Manager id or email the request is addressed to
        to_manager: String,

        /// Message body
        message: String,
    },

    /// Submit anonymous feedback (employee only)
    Anon {
        /// Employee the feedback is about
        #[arg(long)]
        to_employee: String,

        /// What is going well (markdown)
        #[arg(long)]
        strengths: String,

        /// What could improve (markdown)
        #[arg(long)]
        improvements: String,

        /// Overall sentiment
        #[arg(long, value_enum, default_value = "positive")]
        sentiment: Sentiment,
    },
}

#[derive(Subcommand)]
pub enum FeedbackCommands {
    /// Create a feedback record for an employee (manager only)
    Create {
        /// Employee the feedback is for
        #[arg(long)]
        employee: String,

        /// What is going well (markdown)
        #[arg(long)]
        strengths: String,

        /// What could improve (markdown)
        #[arg(long)]
        improvements: String,

        /// Overall sentiment
        #[arg(long, value_enum, default_value = "positive")]
        sentiment: Sentiment,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// List feedback you authored (manager only)
    History,

    /// List feedback you received (employee only)
    Inbox,

    /// Update fields on a feedback record you authored (manager only)
    Update {
        /// Record identifier
        id: String,

        #[arg(long)]
        employee: Option<String>,

        #[arg(long)]
        strengths: Option<String>,

        #[arg(long)]
        improvements: Option<String>,

        #[arg(long, value_enum)]
        sentiment: Option<Sentiment>,

        /// Comma-separated tags (replaces the existing set)
        #[arg(long)]
        tags: Option<String>,
    },

    /// Delete a feedback record you authored (manager only)
    Delete {
        /// Record identifier
        id: String,
    },

    /// Toggle acknowledgement on a feedback you received (employee only)
    Ack {
        /// Record identifier
        id: String,
    },

    /// Comment on a feedback you received (employee only)
    Comment {
        /// Record identifier
        id: String,

        /// Comment text
        text: String,
    },
}

/// Split a comma-separated tag list, dropping blanks.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags_none() {
        assert!(parse_tags(None).is_empty());
    }

    #[test]
    fn test_parse_tags_trims_and_drops_blanks() {
        assert_eq!(
            parse_tags(Some("growth, communication,,  q3 ")),
            vec!["growth".to_string(), "communication".to_string(), "q3".to_string()]
        );
    }

    #[test]
    fn test_cli_parses_feedback_create() {
        let cli = Cli::try_parse_from([
            "fdk",
            "feedback",
            "create",
            "--employee",
            "E1",
            "--strengths",
            "Good",
            "--improvements",
            "None",
            "--sentiment",
            "neutral",
        ])
        .unwrap();

        match cli.command {
            Commands::Feedback {
                cmd: FeedbackCommands::Create {
                    employee, sentiment, ..
                },
            } => {
                assert_eq!(employee, "E1");
                assert_eq!(sentiment, Sentiment::Neutral);
            }
            _ => panic!("Expected feedback create"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_role() {
        let result = Cli::try_parse_from(["fdk", "login", "E1", "--role", "admin"]);
        assert!(result.is_err());
    }
}
