/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{CoreId, JobNumber, Time};
use miette::Diagnostic;
use serde::Serialize;
use std::collections::TryReserveError;
use thiserror::Error;

/// Scheduler contract violations and resource failures
///
/// Every entry point validates its arguments before touching any state, so a
/// returned error always leaves the scheduler exactly as it was.
#[derive(Error, Debug, Clone, Serialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Core {core} out of range (scheduler has {cores} cores)")]
    #[diagnostic(
        code(scheduler::invalid_core_index),
        help("Core ids are zero-based and must be below the configured core count.")
    )]
    InvalidCoreIndex { core: CoreId, cores: usize },

    #[error("Core count must be positive")]
    #[diagnostic(
        code(scheduler::invalid_core_count),
        help("Start the scheduler with at least one core.")
    )]
    InvalidCoreCount,

    #[error("Unknown scheduling policy '{0}'")]
    #[diagnostic(
        code(scheduler::unknown_policy),
        help("Valid policies: fcfs, sjf, psjf, pri, ppri, rr.")
    )]
    UnknownPolicy(String),

    #[error("Scheduler is not running")]
    #[diagnostic(
        code(scheduler::not_initialized),
        help("Call startup() first. A scheduler cannot be used after clean_up().")
    )]
    NotInitialized,

    #[error("Scheduler already started")]
    #[diagnostic(
        code(scheduler::double_initialization),
        help("startup() may only be called once per scheduler instance.")
    )]
    DoubleInitialization,

    #[error("Allocation failed: {0}")]
    #[diagnostic(
        code(scheduler::allocation_failed),
        help("The system is out of memory for scheduler bookkeeping.")
    )]
    AllocationFailed(String),

    #[error("Job {job} has non-positive running time {running_time}")]
    #[diagnostic(
        code(scheduler::invalid_running_time),
        help("Every job must demand at least one unit of service.")
    )]
    InvalidRunningTime { job: JobNumber, running_time: Time },

    #[error("Job {0} was already submitted")]
    #[diagnostic(
        code(scheduler::duplicate_job),
        help("Job numbers must be unique for the lifetime of a scheduler instance.")
    )]
    DuplicateJob(JobNumber),

    #[error("Time {time} is earlier than the last event at {last}")]
    #[diagnostic(
        code(scheduler::time_went_backwards),
        help("Events must be delivered in non-decreasing time order.")
    )]
    TimeWentBackwards { time: Time, last: Time },

    #[error("Core {0} has no running job")]
    #[diagnostic(
        code(scheduler::core_idle),
        help("Only a busy core can report a finished job.")
    )]
    CoreIdle(CoreId),

    #[error("Core {core} is running job {expected}, not job {found}")]
    #[diagnostic(
        code(scheduler::job_mismatch),
        help("The finished job number must match the job dispatched on that core.")
    )]
    JobMismatch {
        core: CoreId,
        expected: JobNumber,
        found: JobNumber,
    },

    #[error("Quantum expiry is undefined under the {0} policy")]
    #[diagnostic(
        code(scheduler::quantum_requires_round_robin),
        help("Quantum expirations are only delivered when the policy is rr.")
    )]
    QuantumRequiresRoundRobin(String),

    #[error("Timing arithmetic for job {job} at t={time} overflows")]
    #[diagnostic(
        code(scheduler::time_overflow),
        help("Event times must stay within a range where their differences and totals fit in 64 bits.")
    )]
    TimeOverflow { job: JobNumber, time: Time },
}

impl From<TryReserveError> for SchedulerError {
    fn from(err: TryReserveError) -> Self {
        SchedulerError::AllocationFailed(err.to_string())
    }
}

/// Configuration and script loading errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    #[diagnostic(
        code(config::io),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON: {0}")]
    #[diagnostic(
        code(config::json),
        help("Scripts hold a config object and an events array of arrival, finished and quantum_expired entries.")
    )]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for {var}: '{value}'")]
    #[diagnostic(
        code(config::env),
        help("SCHED_CORES takes a positive integer, SCHED_POLICY a policy name.")
    )]
    Env { var: &'static str, value: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),
}

/// Unified engine error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum EngineError {
    #[error("Scheduler error: {0}")]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("Config error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}
