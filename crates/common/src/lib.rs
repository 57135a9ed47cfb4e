//! Shared types for the pizzaria order flow.

mod types;

pub use types::SessionId;
