pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;
pub mod logging;

pub use crate::core::errors::BackofficeError;
pub use crate::core::models::{ActivityLogRecord, NotificationSnapshot, TargetId};
pub use crate::core::services::{ActivityRecorder, NotificationCenter, RefreshHandle};
pub use crate::infrastructure::backend::in_memory::InMemoryBackend;
pub use crate::infrastructure::backend::{Backend, Filter, FilterOp};
pub use crate::infrastructure::badges::BadgeSink;
pub use crate::infrastructure::badges::in_memory::{BadgeState, InMemoryBadges};
pub use crate::infrastructure::ip::IpResolver;
pub use crate::infrastructure::ip::fixed::FixedIpResolver;
pub use crate::infrastructure::ip::http::HttpIpResolver;
pub use crate::infrastructure::session::SessionStore;
pub use crate::infrastructure::session::in_memory::InMemorySession;

#[cfg(test)]
mod tests; // Include integration tests
