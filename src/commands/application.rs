//! Application commands. All of them operate inside the targeted space.

pub mod apps;
pub mod events;
pub mod push;

pub use apps::Apps;
pub use events::Events;
pub use push::Push;
