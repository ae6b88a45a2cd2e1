mod formatter;
mod json;
mod plain;

use clap::ValueEnum;

pub(crate) use formatter::StatusFormatter;
pub(crate) use json::JsonFormatter;
pub(crate) use plain::PlainTextFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable account lines
    Plain,
    /// One JSON object per status report
    Json,
}

impl OutputFormat {
    pub(crate) fn formatter(self) -> Box<dyn StatusFormatter> {
        match self {
            Self::Plain => Box::new(PlainTextFormatter),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}
