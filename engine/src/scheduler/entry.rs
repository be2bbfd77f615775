/*!
 * Scheduler Entry Types
 * Jobs and per-core slots tracked by the scheduler
 */

use crate::core::errors::SchedulerError;
use crate::core::types::{JobNumber, Priority, SchedulerResult, Time};
use serde::Serialize;

/// A job known to the scheduler, from arrival until completion
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub job_number: JobNumber,
    pub arrival_time: Time,
    pub running_time: Time,
    /// Service still owed; only charged when the job leaves a core unfinished
    pub remaining_time: Time,
    pub priority: Priority,
    /// First dispatch time, set exactly once
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
    pub started: bool,
    /// Most recent time the job was placed on a core
    pub last_dispatch: Option<Time>,
}

impl Job {
    pub fn new(
        job_number: JobNumber,
        arrival_time: Time,
        running_time: Time,
        priority: Priority,
    ) -> Self {
        Self {
            job_number,
            arrival_time,
            running_time,
            remaining_time: running_time,
            priority,
            start_time: None,
            end_time: None,
            started: false,
            last_dispatch: None,
        }
    }

    /// Record a dispatch at `time`; the first one fixes the start time
    pub fn dispatch(&mut self, time: Time) {
        if self.start_time.is_none() {
            self.start_time = Some(time);
            self.started = true;
        }
        self.last_dispatch = Some(time);
    }

    /// Service still owed if the job were stopped at `now`
    pub fn remaining_at(&self, now: Time) -> SchedulerResult<Time> {
        match self.last_dispatch {
            Some(dispatched) => now
                .checked_sub(dispatched)
                .and_then(|served| self.remaining_time.checked_sub(served))
                .ok_or_else(|| self.overflow(now)),
            None => Ok(self.remaining_time),
        }
    }

    /// Take the job off its core, leaving `remaining` service owed
    ///
    /// `remaining` comes from [`remaining_at`](Self::remaining_at), computed
    /// before any scheduler state changes.
    pub fn suspend(&mut self, remaining: Time) {
        self.remaining_time = remaining;
        self.last_dispatch = None;
    }

    /// Time between arrival and `end`
    pub fn turnaround_at(&self, end: Time) -> SchedulerResult<Time> {
        end.checked_sub(self.arrival_time).ok_or_else(|| self.overflow(end))
    }

    /// Time between arrival and first dispatch, if the job ever ran
    pub fn response_time(&self) -> SchedulerResult<Option<Time>> {
        self.start_time
            .map(|start| start.checked_sub(self.arrival_time).ok_or_else(|| self.overflow(start)))
            .transpose()
    }

    #[inline]
    fn overflow(&self, time: Time) -> SchedulerError {
        SchedulerError::TimeOverflow {
            job: self.job_number,
            time,
        }
    }
}

impl PartialEq for Job {
    fn eq(&self, other: &Self) -> bool {
        self.job_number == other.job_number
    }
}

impl Eq for Job {}

/// One simulated core: idle, or running exactly one job
#[derive(Debug, Clone, Default)]
pub(super) struct Core {
    pub job: Option<Job>,
}

impl Core {
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.job.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_time_set_once() {
        let mut job = Job::new(1, 0, 10, 0);
        assert!(!job.started);
        assert_eq!(job.response_time(), Ok(None));

        job.dispatch(3);
        job.suspend(job.remaining_at(5).unwrap());
        job.dispatch(9);

        assert!(job.started);
        assert_eq!(job.start_time, Some(3));
        assert_eq!(job.last_dispatch, Some(9));
        assert_eq!(job.response_time(), Ok(Some(3)));
    }

    #[test]
    fn test_remaining_uses_last_dispatch() {
        let mut job = Job::new(1, 0, 10, 0);
        job.dispatch(0);
        assert_eq!(job.remaining_at(4), Ok(6));
        job.suspend(6);
        assert_eq!(job.remaining_at(7), Ok(6));

        job.dispatch(7);
        assert_eq!(job.remaining_at(9), Ok(4));
        job.suspend(4);
        assert_eq!(job.last_dispatch, None);
    }

    #[test]
    fn test_extreme_times_overflow() {
        let mut job = Job::new(3, i64::MIN, 10, 0);
        job.dispatch(i64::MIN);

        let overflow = Err(SchedulerError::TimeOverflow {
            job: 3,
            time: i64::MAX,
        });
        assert_eq!(job.remaining_at(i64::MAX), overflow);
        assert_eq!(job.turnaround_at(i64::MAX), overflow);
        assert_eq!(job.response_time(), Ok(Some(0)));
        assert_eq!(job.turnaround_at(0), Err(SchedulerError::TimeOverflow { job: 3, time: 0 }));
        assert_eq!(job.turnaround_at(-1), Ok(i64::MAX));
    }

    #[test]
    fn test_identity_by_job_number() {
        let a = Job::new(7, 0, 5, 1);
        let b = Job::new(7, 3, 1, 9);
        assert_eq!(a, b);
        assert_ne!(a, Job::new(8, 0, 5, 1));
    }
}
