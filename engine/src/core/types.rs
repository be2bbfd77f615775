/*!
 * Core Types
 * Common types used across the engine
 */

/// Caller-assigned, globally unique job identifier
pub type JobNumber = u32;

/// Zero-based core index
pub type CoreId = usize;

/// Simulation time, supplied and advanced by the caller
pub type Time = i64;

/// Job priority (lower value is more urgent)
pub type Priority = i32;

/// Common result type for scheduler operations
pub type SchedulerResult<T> = Result<T, super::errors::SchedulerError>;
