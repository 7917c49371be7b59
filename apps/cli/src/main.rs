mod args;
mod commands;

use crate::args::{Cli, Command};
use crate::commands::Session;
use anyhow::Context;
use clap::Parser;
use shub::kernel::config::load_app_config;
use shub_logger::Logger;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_app_config(cli.config.as_deref())
        .context("Critical: Configuration is malformed")?;
    let _logger = Logger::from_config(env!("CARGO_BIN_NAME"), &config.logging)?;

    let now = cli.now.unwrap_or_else(|| chrono::Utc::now().timestamp());
    let session = Session::new(config, now);

    match &cli.command {
        Command::Check { feature, subject, require } => {
            commands::check(&session, feature, subject, *require)
        },
        Command::Features { subject } => commands::features(&session, subject),
        Command::Plans => commands::plans(&session),
        Command::Status { user } => commands::status(&session, user),
        Command::Overdue { user } => commands::overdue(&session, user),
        Command::Analytics { user, from, to } => commands::analytics(&session, user, *from, *to),
    }
}
