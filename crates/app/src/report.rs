//! Plain-text rendering of a suite run.

use std::fmt;

use gorest_check_domain::{StepOutcome, StepReport, SuiteReport};

/// Displays a [`SuiteReport`] as one line per step plus a totals line.
pub struct Summary<'a>(pub &'a SuiteReport);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "{}", report.suite_name)?;
        for step in &report.steps {
            write_step(f, step)?;
        }
        write!(
            f,
            "{} steps: {} passed, {} failed, {} skipped ({:.0}%) in {} ms",
            report.total,
            report.passed,
            report.failed,
            report.skipped,
            report.pass_rate(),
            report.duration_ms
        )
    }
}

fn write_step(f: &mut fmt::Formatter<'_>, step: &StepReport) -> fmt::Result {
    write!(f, "  {}  {}", step.outcome.label(), step.name)?;
    if let Some(status) = step.status {
        write!(f, " [{status}]")?;
    }
    match &step.outcome {
        StepOutcome::Passed => writeln!(f, " {} ms", step.duration_ms),
        StepOutcome::Skipped { reason } => writeln!(f, ": {reason}"),
        StepOutcome::Failed { reasons } => {
            writeln!(f)?;
            if let Some(request) = &step.request {
                writeln!(f, "        {request}")?;
            }
            for reason in reasons {
                writeln!(f, "        - {reason}")?;
            }
            Ok(())
        }
    }
}
