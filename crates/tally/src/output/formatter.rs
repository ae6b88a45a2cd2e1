use crate::error::Result;
use crate::session::{StatusReport, StepEffect};

pub(crate) trait StatusFormatter {
    /// Line describing a step, or `None` if the format does not report steps.
    fn format_step(&self, effect: &StepEffect) -> Option<String>;

    fn format_status(&self, report: &StatusReport) -> Result<String>;
}
