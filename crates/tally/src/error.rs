use std::path::PathBuf;

use tally_core::LedgerError;
use tally_saga::{CommandError, HistoryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read scenario '{path}'")]
    ScenarioRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario '{path}'")]
    ScenarioParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to set up accounts")]
    Ledger(#[from] LedgerError),

    #[error("unknown account '{0}'")]
    UnknownAccount(String),

    #[error("'{0}' is a history action and cannot be part of a composite")]
    NotACommand(&'static str),

    #[error("invalid command")]
    Command(#[from] CommandError),

    #[error("history action failed")]
    History(#[from] HistoryError),

    #[error("step {index} failed")]
    Step {
        index: usize,
        #[source]
        source: Box<CliError>,
    },

    #[error("failed to serialize status report")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::CliError;

    #[test]
    fn scenario_read_error_includes_path() {
        let err = CliError::ScenarioRead {
            path: PathBuf::from("/tmp/missing.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "test"),
        };

        assert!(err.to_string().contains("/tmp/missing.toml"));
    }

    #[test]
    fn step_error_chains_to_cause() {
        let err = CliError::Step {
            index: 3,
            source: Box::new(CliError::UnknownAccount("nobody".to_string())),
        };

        let source = std::error::Error::source(&err).map(ToString::to_string);

        assert_eq!(err.to_string(), "step 3 failed");
        assert_eq!(source.as_deref(), Some("unknown account 'nobody'"));
    }

    #[test]
    fn ledger_error_converts_via_from() {
        let err: CliError = tally_core::LedgerError::DuplicateAccount("a".to_string()).into();

        assert!(matches!(err, CliError::Ledger(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn not_a_command_message_names_kind() {
        let err = CliError::NotACommand("undo");

        assert!(err.to_string().starts_with("'undo'"));
    }
}
