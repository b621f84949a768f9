use rust_decimal::Decimal;
use std::{env, path::PathBuf, str::FromStr};
use thiserror::Error;
use tripsplit_domain::{Money, ParticipantId};

pub const USAGE: &str =
    "Usage: tripsplit <snapshot.json> [expenses|poker|all] [--mark-paid FROM TO [AMOUNT]]...";
const SNAPSHOT_ENV: &str = "TRIPSPLIT_SNAPSHOT";
const MARK_PAID_FLAG: &str = "--mark-paid";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Report {
    Expenses,
    Poker,
    #[default]
    All,
}

impl FromStr for Report {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "expenses" => Ok(Self::Expenses),
            "poker" => Ok(Self::Poker),
            "all" => Ok(Self::All),
            _ => Err(()),
        }
    }
}

/// A `--mark-paid FROM TO [AMOUNT]` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkPaid {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Option<Money>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no snapshot given and {env} is not set\n{usage}", env = SNAPSHOT_ENV, usage = USAGE)]
    MissingSnapshot,
    #[error("unknown report '{0}'\n{usage}", usage = USAGE)]
    UnknownReport(String),
    #[error("unexpected argument '{0}'\n{usage}", usage = USAGE)]
    UnexpectedArgument(String),
    #[error("{flag} needs FROM and TO\n{usage}", flag = MARK_PAID_FLAG, usage = USAGE)]
    IncompleteMarkPaid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub snapshot: PathBuf,
    pub report: Report,
    pub mark_paid: Vec<MarkPaid>,
}

impl CliConfig {
    /// Reads `.env`, `TRIPSPLIT_SNAPSHOT` and the process arguments.
    pub fn from_env_and_args() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::parse(env::args().skip(1), env::var(SNAPSHOT_ENV).ok())
    }

    /// A snapshot path on the command line wins over `env_snapshot`.
    pub fn parse(
        args: impl IntoIterator<Item = String>,
        env_snapshot: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut positionals = Vec::new();
        let mut mark_paid = Vec::new();
        let mut args = args.into_iter().peekable();

        while let Some(arg) = args.next() {
            if arg == MARK_PAID_FLAG {
                let (Some(from), Some(to)) = (args.next(), args.next()) else {
                    return Err(ConfigError::IncompleteMarkPaid);
                };
                let amount = args
                    .peek()
                    .and_then(|next| Decimal::from_str(next).ok())
                    .map(Money::from_decimal);
                if amount.is_some() {
                    args.next();
                }
                mark_paid.push(MarkPaid {
                    from: from.into(),
                    to: to.into(),
                    amount,
                });
            } else if arg.starts_with("--") {
                return Err(ConfigError::UnexpectedArgument(arg));
            } else {
                positionals.push(arg);
            }
        }

        let mut positionals = positionals.into_iter();
        let (snapshot, report) = match (positionals.next(), positionals.next()) {
            (Some(first), None) if env_snapshot.is_some() && first.parse::<Report>().is_ok() => {
                (env_snapshot, Some(first))
            }
            (Some(first), report) => (Some(first), report),
            (None, _) => (env_snapshot, None),
        };
        if let Some(extra) = positionals.next() {
            return Err(ConfigError::UnexpectedArgument(extra));
        }

        let snapshot = snapshot.ok_or(ConfigError::MissingSnapshot)?;
        let report = match report {
            Some(raw) => raw
                .parse()
                .map_err(|()| ConfigError::UnknownReport(raw))?,
            None => Report::default(),
        };

        Ok(Self {
            snapshot: PathBuf::from(snapshot),
            report,
            mark_paid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| (*arg).to_owned()).collect()
    }

    #[rstest]
    #[case::path_only(&["trip.json"], None, "trip.json", Report::All)]
    #[case::path_and_report(&["trip.json", "poker"], None, "trip.json", Report::Poker)]
    #[case::env_path(&[], Some("env.json"), "env.json", Report::All)]
    #[case::env_path_with_report(&["expenses"], Some("env.json"), "env.json", Report::Expenses)]
    #[case::argument_wins_over_env(&["trip.json"], Some("env.json"), "trip.json", Report::All)]
    fn parse_resolves_snapshot_and_report(
        #[case] raw: &[&str],
        #[case] env_snapshot: Option<&str>,
        #[case] expected_path: &str,
        #[case] expected_report: Report,
    ) {
        let config =
            CliConfig::parse(args(raw), env_snapshot.map(str::to_owned)).expect("config");

        assert_eq!(config.snapshot, PathBuf::from(expected_path));
        assert_eq!(config.report, expected_report);
        assert!(config.mark_paid.is_empty());
    }

    #[test]
    fn mark_paid_accepts_optional_amount() {
        let config = CliConfig::parse(
            args(&[
                "trip.json",
                "--mark-paid",
                "b",
                "a",
                "40.5",
                "--mark-paid",
                "c",
                "a",
                "expenses",
            ]),
            None,
        )
        .expect("config");

        assert_eq!(config.report, Report::Expenses);
        assert_eq!(
            config.mark_paid,
            vec![
                MarkPaid {
                    from: "b".into(),
                    to: "a".into(),
                    amount: Some(Money::new(405, 1)),
                },
                MarkPaid {
                    from: "c".into(),
                    to: "a".into(),
                    amount: None,
                },
            ]
        );
    }

    #[test]
    fn error_messages_name_the_argument_and_show_usage() {
        assert_eq!(
            ConfigError::UnknownReport("golf".to_owned()).to_string(),
            format!("unknown report 'golf'\n{USAGE}")
        );
        assert_eq!(
            ConfigError::UnexpectedArgument("--verbose".to_owned()).to_string(),
            format!("unexpected argument '--verbose'\n{USAGE}")
        );
        assert_eq!(
            ConfigError::MissingSnapshot.to_string(),
            format!("no snapshot given and TRIPSPLIT_SNAPSHOT is not set\n{USAGE}")
        );
        assert_eq!(
            ConfigError::IncompleteMarkPaid.to_string(),
            format!("--mark-paid needs FROM and TO\n{USAGE}")
        );
    }

    #[rstest]
    #[case::nothing(&[], ConfigError::MissingSnapshot)]
    #[case::unknown_report(&["trip.json", "golf"], ConfigError::UnknownReport("golf".to_owned()))]
    #[case::extra_positional(
        &["trip.json", "poker", "more"],
        ConfigError::UnexpectedArgument("more".to_owned())
    )]
    #[case::unknown_flag(&["trip.json", "--verbose"], ConfigError::UnexpectedArgument("--verbose".to_owned()))]
    #[case::incomplete_mark(&["trip.json", "--mark-paid", "b"], ConfigError::IncompleteMarkPaid)]
    fn parse_rejects_bad_arguments(#[case] raw: &[&str], #[case] expected: ConfigError) {
        assert_eq!(CliConfig::parse(args(raw), None), Err(expected));
    }
}
