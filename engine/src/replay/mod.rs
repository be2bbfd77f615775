/*!
 * Replay
 * Apply a caller-ordered script of calls to a scheduler and collect decisions
 */

mod script;

pub use script::{Event, Script};

use crate::core::errors::SchedulerError;
use crate::core::types::{CoreId, JobNumber, SchedulerResult};
use crate::monitoring::span_replay;
use crate::scheduler::{Scheduler, SchedulerStats};
use log::warn;
use serde::Serialize;

/// What the scheduler decided in response to one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Outcome {
    /// Arrival placed on a core, possibly preempting its job
    Scheduled { core: CoreId },
    /// Arrival waits in the queue
    Queued,
    /// Core took the next job from the queue
    Dispatched { job: JobNumber },
    /// Core has nothing to run
    Idle,
}

/// Event, outcome and resulting queue view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub event: Event,
    pub outcome: Outcome,
    pub queue: String,
}

/// Result of a full replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub decisions: Vec<Decision>,
    pub stats: SchedulerStats,
}

/// Deliver one event to `scheduler`
pub fn apply(scheduler: &mut Scheduler, event: &Event) -> SchedulerResult<Outcome> {
    let outcome = match *event {
        Event::Arrival {
            job,
            time,
            running_time,
            priority,
        } => match scheduler.new_job(job, time, running_time, priority)? {
            Some(core) => Outcome::Scheduled { core },
            None => Outcome::Queued,
        },
        Event::Finished { core, job, time } => scheduler
            .job_finished(core, job, time)?
            .map_or(Outcome::Idle, |job| Outcome::Dispatched { job }),
        Event::QuantumExpired { core, time } => scheduler
            .quantum_expired(core, time)?
            .map_or(Outcome::Idle, |job| Outcome::Dispatched { job }),
    };
    Ok(outcome)
}

impl Script {
    /// Run every event on a fresh scheduler, stopping at the first rejected call
    pub fn run(&self, source: &str) -> Result<Report, SchedulerError> {
        let span = span_replay(source, self.events.len());
        let _entered = span.enter();

        let mut scheduler = Scheduler::from_config(&self.config)?;
        let mut decisions = Vec::with_capacity(self.events.len());

        for (index, event) in self.events.iter().enumerate() {
            let outcome = apply(&mut scheduler, event).map_err(|err| {
                warn!("Event {} ({:?}) rejected: {}", index, event, err);
                span.record_applied(index);
                err
            })?;
            decisions.push(Decision {
                event: *event,
                outcome,
                queue: scheduler.show_queue()?,
            });
        }
        span.record_applied(self.events.len());

        let stats = scheduler.stats()?;
        scheduler.clean_up()?;
        Ok(Report { decisions, stats })
    }
}
