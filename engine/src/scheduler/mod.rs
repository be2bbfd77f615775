/*!
 * CPU Scheduler
 * Reactive multi-core scheduler with pluggable policies and preemption
 */

use crate::core::config::SchedulerConfig;
use crate::core::data_structures::OrderedQueue;
use crate::core::errors::SchedulerError;
use crate::core::types::{CoreId, JobNumber, SchedulerResult, Time};
use ahash::AHashSet;
use log::info;

mod entry;
mod operations;
mod policy;
mod stats;
mod view;

pub use entry::Job;
pub use policy::Policy;
pub use stats::SchedulerStats;

use entry::Core;
use stats::{Accumulator, Counters};

/// Lifecycle of a scheduler instance
#[derive(Debug)]
enum Lifecycle {
    Uninitialized,
    Running(State),
    ShutDown,
}

/// Everything a started scheduler owns
#[derive(Debug)]
struct State {
    policy: Policy,
    cores: Vec<Core>,
    queue: OrderedQueue<Job, Policy>,
    totals: Accumulator,
    counters: Counters,
    // Every job number ever submitted to this instance, completed jobs
    // included: one entry per arrival for the instance's lifetime, the price
    // of rejecting a number reused after its job finished
    submitted: AHashSet<JobNumber>,
    last_time: Option<Time>,
}

impl State {
    fn new(cores: usize, policy: Policy) -> SchedulerResult<Self> {
        if cores == 0 {
            return Err(SchedulerError::InvalidCoreCount);
        }

        let mut slots = Vec::new();
        slots.try_reserve_exact(cores)?;
        slots.resize_with(cores, Core::default);

        Ok(Self {
            policy,
            cores: slots,
            queue: OrderedQueue::new(policy),
            totals: Accumulator::default(),
            counters: Counters::default(),
            submitted: AHashSet::new(),
            last_time: None,
        })
    }

    fn check_core(&self, core: CoreId) -> SchedulerResult<()> {
        if core < self.cores.len() {
            Ok(())
        } else {
            Err(SchedulerError::InvalidCoreIndex {
                core,
                cores: self.cores.len(),
            })
        }
    }

    fn check_time(&self, time: Time) -> SchedulerResult<()> {
        match self.last_time {
            Some(last) if time < last => Err(SchedulerError::TimeWentBackwards { time, last }),
            _ => Ok(()),
        }
    }

    #[inline]
    fn first_idle_core(&self) -> Option<CoreId> {
        self.cores.iter().position(Core::is_idle)
    }

    #[inline]
    fn busy_cores(&self) -> usize {
        self.cores.iter().filter(|core| !core.is_idle()).count()
    }
}

/// CPU scheduler
///
/// One instance per simulation. The driver calls [`startup`](Self::startup)
/// once, then delivers arrivals, completions and quantum expirations in
/// non-decreasing time order, and finally calls
/// [`clean_up`](Self::clean_up). Calls outside that protocol fail with a
/// [`SchedulerError`] and leave the instance untouched.
#[derive(Debug)]
pub struct Scheduler {
    lifecycle: Lifecycle,
}

impl Scheduler {
    /// Create a scheduler that still needs [`startup`](Self::startup)
    pub fn new() -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    /// Create and start a scheduler in one step
    pub fn with_policy(cores: usize, policy: Policy) -> SchedulerResult<Self> {
        let mut scheduler = Self::new();
        scheduler.startup(cores, policy)?;
        Ok(scheduler)
    }

    /// Create and start a scheduler from configuration
    pub fn from_config(config: &SchedulerConfig) -> SchedulerResult<Self> {
        Self::with_policy(config.cores, config.policy)
    }

    /// Allocate `cores` idle cores and an empty queue ordered by `policy`
    pub fn startup(&mut self, cores: usize, policy: Policy) -> SchedulerResult<()> {
        if !matches!(self.lifecycle, Lifecycle::Uninitialized) {
            return Err(SchedulerError::DoubleInitialization);
        }

        self.lifecycle = Lifecycle::Running(State::new(cores, policy)?);
        info!(
            "Scheduler started: cores={}, policy={}, preemptive={}",
            cores,
            policy,
            policy.is_preemptive()
        );
        Ok(())
    }

    fn state(&self) -> SchedulerResult<&State> {
        match &self.lifecycle {
            Lifecycle::Running(state) => Ok(state),
            _ => Err(SchedulerError::NotInitialized),
        }
    }

    fn state_mut(&mut self) -> SchedulerResult<&mut State> {
        match &mut self.lifecycle {
            Lifecycle::Running(state) => Ok(state),
            _ => Err(SchedulerError::NotInitialized),
        }
    }

    /// Whether the scheduler is between `startup` and `clean_up`
    pub fn is_running(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Running(_))
    }

    pub fn policy(&self) -> SchedulerResult<Policy> {
        Ok(self.state()?.policy)
    }

    /// Total number of cores
    pub fn cores(&self) -> SchedulerResult<usize> {
        Ok(self.state()?.cores.len())
    }

    /// Number of cores currently running a job
    pub fn busy_cores(&self) -> SchedulerResult<usize> {
        Ok(self.state()?.busy_cores())
    }

    /// Number of jobs waiting in the queue
    pub fn queue_len(&self) -> SchedulerResult<usize> {
        Ok(self.state()?.queue.len())
    }

    /// Job currently running on `core`, if any
    pub fn running_job(&self, core: CoreId) -> SchedulerResult<Option<&Job>> {
        let state = self.state()?;
        state.check_core(core)?;
        Ok(state.cores[core].job.as_ref())
    }

    /// Waiting jobs in dispatch order
    pub fn queued_jobs(&self) -> SchedulerResult<impl Iterator<Item = &Job> + '_> {
        Ok(self.state()?.queue.iter())
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_allocates_idle_cores() {
        let scheduler = Scheduler::with_policy(4, Policy::Sjf).unwrap();
        assert!(scheduler.is_running());
        assert_eq!(scheduler.cores().unwrap(), 4);
        assert_eq!(scheduler.busy_cores().unwrap(), 0);
        assert_eq!(scheduler.queue_len().unwrap(), 0);
        assert_eq!(scheduler.policy().unwrap(), Policy::Sjf);
        for core in 0..4 {
            assert!(scheduler.running_job(core).unwrap().is_none());
        }
    }

    #[test]
    fn test_calls_before_startup_fail() {
        let mut scheduler = Scheduler::new();
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.cores(), Err(SchedulerError::NotInitialized));
        assert_eq!(
            scheduler.new_job(1, 0, 5, 0),
            Err(SchedulerError::NotInitialized)
        );
        assert_eq!(
            scheduler.average_waiting_time(),
            Err(SchedulerError::NotInitialized)
        );
    }

    #[test]
    fn test_double_startup_rejected() {
        let mut scheduler = Scheduler::with_policy(1, Policy::Fcfs).unwrap();
        assert_eq!(
            scheduler.startup(2, Policy::Rr),
            Err(SchedulerError::DoubleInitialization)
        );
        // Configuration from the first startup survives
        assert_eq!(scheduler.cores().unwrap(), 1);
        assert_eq!(scheduler.policy().unwrap(), Policy::Fcfs);
    }

    #[test]
    fn test_zero_cores_rejected() {
        let mut scheduler = Scheduler::new();
        assert_eq!(
            scheduler.startup(0, Policy::Fcfs),
            Err(SchedulerError::InvalidCoreCount)
        );
        assert!(!scheduler.is_running());
        // A failed startup does not consume the one allowed initialization
        assert!(scheduler.startup(1, Policy::Fcfs).is_ok());
    }

    #[test]
    fn test_out_of_range_core() {
        let scheduler = Scheduler::with_policy(2, Policy::Rr).unwrap();
        assert_eq!(
            scheduler.running_job(2).unwrap_err(),
            SchedulerError::InvalidCoreIndex { core: 2, cores: 2 }
        );
    }

    #[test]
    fn test_from_config() {
        let config = SchedulerConfig::new(3, Policy::Ppri);
        let scheduler = Scheduler::from_config(&config).unwrap();
        assert_eq!(scheduler.cores().unwrap(), 3);
        assert_eq!(scheduler.policy().unwrap(), Policy::Ppri);
    }
}
