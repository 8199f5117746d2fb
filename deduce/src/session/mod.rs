//! Session-scoped search orchestration.

pub mod manager;
pub mod store;

pub use manager::{parse_limit, SessionManager};
pub use store::{Session, SessionStore, SessionSummary, SharedSession};
