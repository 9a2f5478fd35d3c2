//! Organization commands.

pub mod create_org;
pub mod orgs;

pub use create_org::CreateOrg;
pub use orgs::Orgs;
