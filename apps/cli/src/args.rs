//! # CLI Argument Definitions

use clap::{Args, Parser, Subcommand};
use shub::domain::role::Role;
use std::path::PathBuf;
use strum::IntoEnumIterator;

#[derive(Debug, Parser)]
#[command(name = "studyhub")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Feature access checks and subscription status for StudyHub users")]
pub(crate) struct Cli {
    /// Config file (TOML, JSON or YAML). Defaults to `studyhub.*` in the working directory
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Evaluate at this UNIX time instead of the current time
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub(crate) now: Option<i64>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Decide whether a user or role may use a feature
    Check {
        /// Feature identifier, e.g. `live_sessions`
        feature: String,

        #[command(flatten)]
        subject: Subject,

        /// Fail with the denial reason instead of printing a denied result
        #[arg(long)]
        require: bool,
    },
    /// List the features a user or role can use
    Features {
        #[command(flatten)]
        subject: Subject,
    },
    /// List the plans currently offered
    Plans,
    /// Show a user's resolved subscription status
    Status {
        #[arg(short, long)]
        user: String,
    },
    /// List active subscriptions past their end date, most overdue first (admins only)
    Overdue {
        /// Admin user id the report is run as
        #[arg(short, long)]
        user: String,
    },
    /// Summarize subscriptions created in a time range (admins only)
    Analytics {
        /// Admin user id the report is run as
        #[arg(short, long)]
        user: String,

        /// Range start, UNIX seconds. Defaults to the beginning of time
        #[arg(long, default_value_t = 0)]
        from: i64,

        /// Range end, UNIX seconds. Defaults to now
        #[arg(long)]
        to: Option<i64>,
    },
}

/// Who the question is about: a configured user, or a bare role with no subscription.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub(crate) struct Subject {
    /// User id from the `users` config section
    #[arg(short, long)]
    pub(crate) user: Option<String>,

    /// Role to evaluate without a subscription
    #[arg(short, long, value_parser = parse_role)]
    pub(crate) role: Option<Role>,
}

fn parse_role(value: &str) -> Result<Role, String> {
    let value = value.trim();
    Role::iter().find(|role| role.as_ref().eq_ignore_ascii_case(value)).ok_or_else(|| {
        let known: Vec<String> = Role::iter().map(|role| role.to_string()).collect();
        format!("unknown role '{value}' (expected one of: {})", known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!(parse_role("Tutor"), Ok(Role::Tutor));
        assert_eq!(parse_role(" admin "), Ok(Role::Admin));
        let err = parse_role("dean").unwrap_err();
        assert!(err.contains("admin, lecturer, tutor, student"));
    }

    #[test]
    fn user_and_role_are_exclusive() {
        let args = ["studyhub", "check", "notes", "--user", "u1", "--role", "tutor"];
        assert!(Cli::try_parse_from(args).is_err());

        let parsed = Cli::try_parse_from(["studyhub", "features"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn analytics_range_defaults() {
        let cli = Cli::try_parse_from(["studyhub", "analytics", "--user", "adm-1"]).unwrap();
        assert!(matches!(cli.command, Command::Analytics { from: 0, to: None, .. }));

        let overdue = Cli::try_parse_from(["studyhub", "overdue"]);
        assert!(overdue.is_err());
    }

    #[test]
    fn global_options_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["studyhub", "plans", "--now", "42", "--config", "a.toml"])
            .unwrap();
        assert_eq!(cli.now, Some(42));
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("a.toml")));
        assert!(matches!(cli.command, Command::Plans));
    }
}
