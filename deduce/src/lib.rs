//! Session-scoped deduction search.
//!
//! Clients open a session with a size limit, feed it rules in display
//! notation and ask for search passes. Each session owns a private
//! [`DeductionEngine`]; the session keeps the display form of every rule the
//! engine knows, so duplicates are filtered no matter how they were spelled.
//!
//! The HTTP gateway lives behind the `server` feature.

pub mod config;
pub mod engine;
pub mod error;
#[cfg(feature = "server")]
pub mod gateway;
pub mod persistence;
pub mod session;

pub use config::DeduceConfig;
pub use engine::{DeductionEngine, EngineError, EngineFactory, ForwardEngine, ForwardEngineFactory};
pub use error::{DeduceError, DeduceResult};
pub use persistence::{SessionSnapshot, SnapshotStore, SnapshotTask};
pub use session::{parse_limit, SessionManager, SessionSummary};
