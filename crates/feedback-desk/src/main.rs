use anyhow::Result;
use clap::Parser;
use fdk_session::SessionContext;
use fdk_store::FileStore;

mod auth_cmds;
mod cli;
mod config;
mod feedback_cmds;
mod guard;
mod inbox_cmds;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (output to stderr, initialize only once)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    let config = config::Config::load()?;
    tracing::debug!(base_url = %config.api.base_url, "Config loaded");

    let store = match &config.state_dir {
        Some(dir) => FileStore::with_base_dir(dir.clone()),
        None => FileStore::open()?,
    };
    let mut session = SessionContext::hydrate(&store)?;

    match cli.command {
        Commands::Login {
            emp_id,
            role,
            password,
        } => auth_cmds::login(&config, &mut session, &emp_id, role, password).await,

        Commands::Signup {
            name,
            emp_id,
            role,
            department,
            password,
        } => auth_cmds::signup(&config, &session, name, emp_id, role, department, password).await,

        Commands::Logout => auth_cmds::logout(&mut session),

        Commands::Whoami => auth_cmds::whoami(&session, &cli.format),

        Commands::Feedback { cmd } => feedback_cmds::dispatch(cmd, &store, &session, &cli.format),

        Commands::Request {
            to_manager,
            message,
        } => inbox_cmds::request(&store, &session, to_manager, message),

        Commands::Anon {
            to_employee,
            strengths,
            improvements,
            sentiment,
        } => inbox_cmds::anonymous(&store, &session, to_employee, strengths, improvements, sentiment),
    }
}
