use super::StatusFormatter;
use crate::error::Result;
use crate::session::{StatusReport, StepEffect};

/// Emits each status report as a single line of JSON; steps are silent.
pub(crate) struct JsonFormatter;

impl StatusFormatter for JsonFormatter {
    fn format_step(&self, _effect: &StepEffect) -> Option<String> {
        None
    }

    fn format_status(&self, report: &StatusReport) -> Result<String> {
        let mut line = serde_json::to_string(report)?;
        line.push('\n');
        Ok(line)
    }
}
