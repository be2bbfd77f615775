/*!
 * Scheduler Statistics
 * Running totals for completed jobs and scheduling counters
 */

use super::entry::Job;
use super::policy::Policy;
use super::Scheduler;
use crate::core::errors::SchedulerError;
use crate::core::types::{SchedulerResult, Time};
use serde::Serialize;

/// Accumulated per-job timing totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct Accumulator {
    total_waiting: Time,
    total_turnaround: Time,
    total_response: Time,
    completed: u64,
}

impl Accumulator {
    /// Totals with a job that finished at `end` folded in
    ///
    /// Waiting and turnaround always accumulate. Response time and the
    /// completed count only cover jobs that were actually started. Leaves
    /// `self` alone, so an overflow is reported before anything changes.
    pub fn with_job(&self, job: &Job, end: Time) -> SchedulerResult<Self> {
        let overflow = || SchedulerError::TimeOverflow {
            job: job.job_number,
            time: end,
        };
        let turnaround = job.turnaround_at(end)?;
        let waiting = turnaround.checked_sub(job.running_time).ok_or_else(overflow)?;

        let mut next = *self;
        next.total_waiting = next.total_waiting.checked_add(waiting).ok_or_else(overflow)?;
        next.total_turnaround = next
            .total_turnaround
            .checked_add(turnaround)
            .ok_or_else(overflow)?;

        if job.started {
            if let Some(response) = job.response_time()? {
                next.total_response = next
                    .total_response
                    .checked_add(response)
                    .ok_or_else(overflow)?;
            }
            next.completed += 1;
        }
        Ok(next)
    }

    #[inline]
    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn average_waiting(&self) -> f64 {
        self.average(self.total_waiting)
    }

    pub fn average_turnaround(&self) -> f64 {
        self.average(self.total_turnaround)
    }

    pub fn average_response(&self) -> f64 {
        self.average(self.total_response)
    }

    fn average(&self, total: Time) -> f64 {
        if self.completed == 0 {
            0.0
        } else {
            total as f64 / self.completed as f64
        }
    }
}

/// Event counters maintained alongside the timing totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct Counters {
    pub dispatches: u64,
    pub preemptions: u64,
    pub quantum_expirations: u64,
}

/// Point-in-time scheduler statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchedulerStats {
    pub policy: Policy,
    pub cores: usize,
    pub busy_cores: usize,
    pub queued_jobs: usize,
    pub completed_jobs: u64,
    pub dispatches: u64,
    pub preemptions: u64,
    pub quantum_expirations: u64,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub average_response_time: f64,
}

impl Scheduler {
    /// Average waiting time over completed jobs, 0 if none completed
    pub fn average_waiting_time(&self) -> SchedulerResult<f64> {
        Ok(self.state()?.totals.average_waiting())
    }

    /// Average turnaround time over completed jobs, 0 if none completed
    pub fn average_turnaround_time(&self) -> SchedulerResult<f64> {
        Ok(self.state()?.totals.average_turnaround())
    }

    /// Average response time over completed jobs, 0 if none completed
    pub fn average_response_time(&self) -> SchedulerResult<f64> {
        Ok(self.state()?.totals.average_response())
    }

    /// Snapshot of counters and averages
    pub fn stats(&self) -> SchedulerResult<SchedulerStats> {
        let state = self.state()?;
        Ok(SchedulerStats {
            policy: state.policy,
            cores: state.cores.len(),
            busy_cores: state.busy_cores(),
            queued_jobs: state.queue.len(),
            completed_jobs: state.totals.completed(),
            dispatches: state.counters.dispatches,
            preemptions: state.counters.preemptions,
            quantum_expirations: state.counters.quantum_expirations,
            average_waiting_time: state.totals.average_waiting(),
            average_turnaround_time: state.totals.average_turnaround(),
            average_response_time: state.totals.average_response(),
        })
    }
}
