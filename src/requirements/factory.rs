//! Builds the ordered requirement list for one invocation.

use crate::command::{Command, CommandMetadata, Context};
use crate::error::UsageError;
use crate::requirements::Requirement;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequirementsError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// A command declared its requirements in an order that cannot be evaluated.
    #[error("Requirement '{requirement}' of command '{command}' must come after {missing}")]
    Order {
        command: String,
        requirement: String,
        missing: &'static str,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RequirementFactory;

impl RequirementFactory {
    pub fn new() -> Self {
        Self
    }

    /// Flag rules first, then the command's own list, then ordering.
    pub fn new_requirements(
        &self,
        command: &dyn Command,
        ctx: &Context,
    ) -> Result<Vec<Requirement>, RequirementsError> {
        let metadata = command.metadata();
        validate_flags(metadata, ctx)?;
        let requirements = command.requirements(ctx)?;
        validate_order(metadata.name, &requirements)?;
        Ok(requirements)
    }
}

/// Exclusive groups and companion pairs declared in the metadata.
pub fn validate_flags(metadata: &CommandMetadata, ctx: &Context) -> Result<(), UsageError> {
    for group in metadata.exclusive {
        let mut set: Vec<&str> = group.iter().copied().filter(|f| ctx.is_set(f)).collect();
        if set.len() > 1 {
            set.sort_unstable();
            let names: Vec<String> = set.iter().map(|f| metadata.flag_display(f)).collect();
            return Err(UsageError::new(format!(
                "The following arguments cannot be used together: {}",
                names.join(", ")
            )));
        }
    }
    for (flag, companion) in metadata.together {
        if ctx.is_set(flag) && !ctx.is_set(companion) {
            return Err(UsageError::new(format!(
                "'{}' and '{}' must be used together.",
                metadata.flag_display(companion),
                metadata.flag_display(flag)
            )));
        }
    }
    Ok(())
}

fn validate_order(command: &str, requirements: &[Requirement]) -> Result<(), RequirementsError> {
    let login_at = requirements.iter().position(|r| *r == Requirement::Login);
    for (index, requirement) in requirements.iter().enumerate() {
        let earlier = &requirements[..index];
        let missing = match requirement {
            Requirement::SpaceExists(_) if !earlier.iter().any(Requirement::provides_organization) => {
                Some("an organization requirement")
            }
            Requirement::ApplicationExists(_) if !earlier.iter().any(Requirement::provides_space) => {
                Some("a space requirement")
            }
            r if r.is_remote() && login_at.is_some_and(|at| at > index) => Some("login"),
            _ => None,
        };
        if let Some(missing) = missing {
            return Err(RequirementsError::Order {
                command: command.to_string(),
                requirement: requirement.to_string(),
                missing,
            });
        }
    }
    Ok(())
}
