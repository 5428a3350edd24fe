//! Data models shared across store access and API handlers.

pub mod session;
pub mod suggestion;
