//! Runner: requirement gating and command execution for one invocation.

use crate::command::{Command, Context};
use crate::requirements::{RequirementEvaluator, RequirementFactory, RequirementsError, Resolved};
use crate::terminal::Ui;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded,
    UsageFailed,
    RequirementFailed,
    CommandFailed,
}

/// Result of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub requirements_passed: bool,
    pub outcome: RunOutcome,
}

impl RunResult {
    fn failed_before_run(outcome: RunOutcome) -> Self {
        Self {
            requirements_passed: false,
            outcome,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.outcome == RunOutcome::Succeeded
    }

    pub fn exit_code(&self) -> i32 {
        if self.succeeded() {
            0
        } else {
            1
        }
    }
}

pub struct Runner {
    ui: Arc<dyn Ui>,
    factory: RequirementFactory,
}

impl Runner {
    pub fn new(ui: Arc<dyn Ui>) -> Self {
        Self {
            ui,
            factory: RequirementFactory::new(),
        }
    }

    /// Parse the arguments following the verb, then run.
    pub async fn run_args(
        &self,
        command: &dyn Command,
        args: &[String],
        evaluator: &dyn RequirementEvaluator,
    ) -> RunResult {
        match Context::parse(command.metadata(), args) {
            Ok(ctx) => self.run(command, &ctx, evaluator).await,
            Err(usage) => {
                debug!(command = command.metadata().name, error = %usage, "Argument parsing failed");
                self.ui.failed_with_usage(command.metadata(), &usage.message);
                RunResult::failed_before_run(RunOutcome::UsageFailed)
            }
        }
    }

    /// Evaluate the command's requirements in order, stopping at the first
    /// failure, then run the command body.
    pub async fn run(
        &self,
        command: &dyn Command,
        ctx: &Context,
        evaluator: &dyn RequirementEvaluator,
    ) -> RunResult {
        let metadata = command.metadata();
        debug!(
            command = ctx.command_name(),
            args = ctx.args().len(),
            "Building requirements"
        );
        let requirements = match self.factory.new_requirements(command, ctx) {
            Ok(requirements) => requirements,
            Err(RequirementsError::Usage(usage)) => {
                debug!(command = metadata.name, error = %usage, "Usage error");
                self.ui.failed_with_usage(metadata, &usage.message);
                return RunResult::failed_before_run(RunOutcome::UsageFailed);
            }
            Err(order) => {
                warn!(command = metadata.name, error = %order, "Invalid requirement list");
                self.ui.failed(&order.to_string());
                return RunResult::failed_before_run(RunOutcome::RequirementFailed);
            }
        };

        let mut resolved = Resolved::default();
        for requirement in &requirements {
            match evaluator.evaluate(requirement, &resolved).await {
                Ok(resolution) => resolved.record(resolution),
                Err(failure) => {
                    info!(
                        command = metadata.name,
                        requirement = %requirement,
                        reason = %failure,
                        "Requirement failed"
                    );
                    self.ui.failed(&failure.message);
                    return RunResult::failed_before_run(RunOutcome::RequirementFailed);
                }
            }
        }

        debug!(command = metadata.name, "Requirements passed");
        let outcome = match command.run(ctx, &resolved).await {
            Ok(()) => RunOutcome::Succeeded,
            Err(err) => {
                info!(command = metadata.name, error = %err, "Command failed");
                self.ui.failed(&err.to_string());
                RunOutcome::CommandFailed
            }
        };
        RunResult {
            requirements_passed: true,
            outcome,
        }
    }
}
