/*!
 * Scheduler Core Operations
 * Arrival, completion, quantum expiry and teardown
 */

use super::entry::Job;
use super::policy::Policy;
use super::{Lifecycle, Scheduler, State};
use crate::core::errors::SchedulerError;
use crate::core::types::{CoreId, JobNumber, Priority, SchedulerResult, Time};
use log::{debug, info, log_enabled, Level};

impl Scheduler {
    /// A job arrives at `time`
    ///
    /// Returns the core the job should run on from now, or `None` when it
    /// was queued. On a preemptive policy the returned core may have been
    /// running another job, which goes back to the queue.
    pub fn new_job(
        &mut self,
        job_number: JobNumber,
        time: Time,
        running_time: Time,
        priority: Priority,
    ) -> SchedulerResult<Option<CoreId>> {
        let state = self.state_mut()?;
        state.check_time(time)?;
        if running_time <= 0 {
            return Err(SchedulerError::InvalidRunningTime {
                job: job_number,
                running_time,
            });
        }
        if state.submitted.contains(&job_number) {
            return Err(SchedulerError::DuplicateJob(job_number));
        }

        // Reserve and decide up front so nothing below can fail halfway through
        state.submitted.try_reserve(1)?;
        state.queue.reserve(1)?;
        let mut job = Job::new(job_number, time, running_time, priority);
        let idle = state.first_idle_core();
        let preemption = match idle {
            Some(_) => None,
            None => state.preemption_target(&job, time)?,
        };

        state.last_time = Some(time);
        state.submitted.insert(job_number);

        if let Some(core) = idle {
            job.dispatch(time);
            state.cores[core].job = Some(job);
            state.counters.dispatches += 1;
            debug!(
                "Job {} arrived at t={} and runs on idle core {}",
                job_number, time, core
            );
            state.log_queue();
            return Ok(Some(core));
        }

        if let Some((core, owed)) = preemption {
            job.dispatch(time);
            if let Some(mut victim) = state.cores[core].job.replace(job) {
                victim.suspend(owed);
                debug!(
                    "Job {} preempts job {} on core {} at t={} (victim owes {})",
                    job_number, victim.job_number, core, time, owed
                );
                state.queue.offer(victim)?;
            }
            state.counters.preemptions += 1;
            state.counters.dispatches += 1;
            state.log_queue();
            return Ok(Some(core));
        }

        let position = state.queue.offer(job)?;
        debug!(
            "Job {} arrived at t={} and waits at queue position {}",
            job_number, time, position
        );
        state.log_queue();
        Ok(None)
    }

    /// The job running on `core` completed at `time`
    ///
    /// Returns the job now dispatched on `core`, or `None` if it goes idle.
    pub fn job_finished(
        &mut self,
        core: CoreId,
        job_number: JobNumber,
        time: Time,
    ) -> SchedulerResult<Option<JobNumber>> {
        let state = self.state_mut()?;
        state.check_core(core)?;
        state.check_time(time)?;
        let totals = match &state.cores[core].job {
            None => return Err(SchedulerError::CoreIdle(core)),
            Some(running) if running.job_number != job_number => {
                return Err(SchedulerError::JobMismatch {
                    core,
                    expected: running.job_number,
                    found: job_number,
                });
            }
            Some(running) => state.totals.with_job(running, time)?,
        };

        state.last_time = Some(time);
        state.totals = totals;
        if let Some(mut finished) = state.cores[core].job.take() {
            finished.end_time = Some(time);
            debug!(
                "Job {} finished on core {} at t={} (arrived at t={})",
                job_number, core, time, finished.arrival_time
            );
        }

        let next = state.dispatch_next(core, time);
        state.log_queue();
        Ok(next)
    }

    /// The round-robin quantum on `core` expired at `time`
    ///
    /// The running job, if any, goes to the back of the queue and the head
    /// of the queue takes the core. With nothing else waiting that is the
    /// same job again.
    pub fn quantum_expired(
        &mut self,
        core: CoreId,
        time: Time,
    ) -> SchedulerResult<Option<JobNumber>> {
        let state = self.state_mut()?;
        state.check_core(core)?;
        state.check_time(time)?;
        if state.policy != Policy::Rr {
            return Err(SchedulerError::QuantumRequiresRoundRobin(
                state.policy.to_string(),
            ));
        }
        state.queue.reserve(1)?;
        let owed = state.cores[core]
            .job
            .as_ref()
            .map(|job| job.remaining_at(time))
            .transpose()?;

        state.last_time = Some(time);
        if let (Some(mut expired), Some(owed)) = (state.cores[core].job.take(), owed) {
            expired.suspend(owed);
            debug!(
                "Quantum expired for job {} on core {} at t={}",
                expired.job_number, core, time
            );
            state.queue.offer(expired)?;
            state.counters.quantum_expirations += 1;
        }

        let next = state.dispatch_next(core, time);
        state.log_queue();
        Ok(next)
    }

    /// Release every outstanding job and the cores
    ///
    /// The instance is shut down afterwards; every later call fails with
    /// [`SchedulerError::NotInitialized`].
    pub fn clean_up(&mut self) -> SchedulerResult<()> {
        let state = match std::mem::replace(&mut self.lifecycle, Lifecycle::ShutDown) {
            Lifecycle::Running(state) => state,
            other => {
                self.lifecycle = other;
                return Err(SchedulerError::NotInitialized);
            }
        };

        info!(
            "Scheduler shutting down: {} running and {} queued jobs released, {} completed",
            state.busy_cores(),
            state.queue.len(),
            state.totals.completed()
        );
        drop(state);
        Ok(())
    }
}

impl State {
    /// First core, in index order, whose job `arriving` may displace,
    /// with the service that job would still owe at `now`
    ///
    /// Deliberately not the best victim overall: the scan stops at the
    /// lowest-indexed eligible core.
    fn preemption_target(
        &self,
        arriving: &Job,
        now: Time,
    ) -> SchedulerResult<Option<(CoreId, Time)>> {
        if !self.policy.is_preemptive() {
            return Ok(None);
        }
        for (core, slot) in self.cores.iter().enumerate() {
            if let Some(running) = &slot.job {
                if self.policy.should_preempt(arriving, running, now)? {
                    return Ok(Some((core, running.remaining_at(now)?)));
                }
            }
        }
        Ok(None)
    }

    /// Move the queue head onto the idle `core`
    fn dispatch_next(&mut self, core: CoreId, time: Time) -> Option<JobNumber> {
        let mut next = self.queue.poll()?;
        next.dispatch(time);
        let job_number = next.job_number;
        self.cores[core].job = Some(next);
        self.counters.dispatches += 1;
        debug!("Job {} dispatched on core {} at t={}", job_number, core, time);
        Some(job_number)
    }

    fn log_queue(&self) {
        if log_enabled!(Level::Debug) {
            debug!("Queue: {}", self.queue_view());
        }
    }
}
