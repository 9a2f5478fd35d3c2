//! User-facing verbs.
//!
//! Each command owns its static metadata, declares its requirements and
//! reports through the `Ui` it was built with.

pub mod api_endpoint;
pub mod application;
pub mod logout;
pub mod organization;
pub mod space;
pub mod target;

pub use api_endpoint::ApiEndpoint;
pub use application::{Apps, Events, Push};
pub use logout::Logout;
pub use organization::{CreateOrg, Orgs};
pub use space::{CreateSpace, DeleteSpace, Spaces};
pub use target::Target;

use crate::command::Context;
use crate::config::{ConfigRepository, Configuration};
use crate::error::{CommandError, UsageError};

/// Reject any positional argument.
pub(crate) fn no_arguments(ctx: &Context) -> Result<(), UsageError> {
    if ctx.args().is_empty() {
        Ok(())
    } else {
        Err(UsageError::arity())
    }
}

pub(crate) fn load_config(config: &dyn ConfigRepository) -> Result<Configuration, CommandError> {
    Ok(config.load()?)
}

/// Rows for `Ui::display_table`, header first.
pub(crate) fn table<I>(header: &[&str], rows: I) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = Vec<String>>,
{
    std::iter::once(header.iter().map(|h| h.to_string()).collect())
        .chain(rows)
        .collect()
}
