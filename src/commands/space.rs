//! Space commands. All of them operate inside the targeted organization.

pub mod create_space;
pub mod delete_space;
pub mod spaces;

pub use create_space::CreateSpace;
pub use delete_space::DeleteSpace;
pub use spaces::Spaces;
