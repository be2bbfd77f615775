/*!
 * Core Module
 * Fundamental engine types, configuration and error handling
 */

pub mod config;
pub mod data_structures;
pub mod errors;
pub mod types;

// Re-export for convenience
pub use config::SchedulerConfig;
pub use data_structures::{Comparator, OrderedQueue};
pub use errors::*;
pub use types::*;
