//! Route handlers.

pub mod groups;
pub mod nodes;
pub mod users;
