//! Window-cleaning round manager library modules.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Request tracing middleware.
pub use middleware::Trace;
