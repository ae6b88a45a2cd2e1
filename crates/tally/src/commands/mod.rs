mod demo;
mod run;

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::error::{CliError, Result};
use crate::output::{OutputFormat, StatusFormatter};
use crate::scenario::{Scenario, Step};
use crate::session::{Session, StepEffect};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Play a scenario file and print the final account status
    Run(RunArgs),
    /// Play the built-in banking demo, printing status after every step
    Demo,
}

#[derive(Args)]
pub(crate) struct RunArgs {
    /// Path to the scenario TOML file
    pub scenario: PathBuf,
}

impl Commands {
    pub(crate) fn execute(self, format: OutputFormat) -> Result<()> {
        match self {
            Self::Run(args) => run::run(args, format),
            Self::Demo => demo::run(format),
        }
    }
}

/// When a player prints the status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Echo {
    /// Only on `print` steps and once at the end.
    Final,
    /// Before the first step and after every step.
    EveryStep,
}

fn play(scenario: &Scenario, formatter: &dyn StatusFormatter, echo: Echo) -> Result<()> {
    let mut session = Session::open(scenario)?;

    if echo == Echo::EveryStep {
        print!("{}", formatter.format_status(&session.report())?);
    }

    for (index, step) in scenario.steps.iter().enumerate() {
        let effect = apply_step(&mut session, index, step)?;

        if let Some(line) = formatter.format_step(&effect) {
            println!("{line}");
        }
        if echo == Echo::EveryStep || effect == StepEffect::Print {
            print!("{}", formatter.format_status(&session.report())?);
        }
    }

    if echo == Echo::Final {
        print!("{}", formatter.format_status(&session.report())?);
    }
    Ok(())
}

fn apply_step(session: &mut Session, index: usize, step: &Step) -> Result<StepEffect> {
    session.apply(step).map_err(|source| CliError::Step {
        index: index + 1,
        source: Box::new(source),
    })
}
