use tracing::debug;

use super::{Echo, RunArgs, play};
use crate::error::Result;
use crate::output::OutputFormat;
use crate::scenario::Scenario;

pub(crate) fn run(args: RunArgs, format: OutputFormat) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    debug!(
        path = %args.scenario.display(),
        accounts = scenario.accounts.len(),
        steps = scenario.steps.len(),
        "loaded scenario"
    );

    play(&scenario, format.formatter().as_ref(), Echo::Final)
}
