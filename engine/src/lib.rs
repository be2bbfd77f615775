/*!
 * Scheduling Engine Library
 * Reactive CPU scheduler for discrete-event simulations
 */

pub mod core;
pub mod monitoring;
pub mod replay;
pub mod scheduler;

// Re-exports
pub use crate::core::config::SchedulerConfig;
pub use crate::core::data_structures::{Comparator, OrderedQueue};
pub use crate::core::errors::{ConfigError, EngineError, SchedulerError};
pub use crate::core::types::{CoreId, JobNumber, Priority, SchedulerResult, Time};
pub use monitoring::init_tracing;
pub use replay::{Event, Outcome, Report, Script};
pub use scheduler::{Job, Policy, Scheduler, SchedulerStats};
