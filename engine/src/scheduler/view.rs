/*!
 * Queue View
 * Human-readable dump of outstanding jobs in scheduling order
 */

use super::entry::Job;
use super::{Scheduler, State};
use crate::core::types::{CoreId, SchedulerResult};

impl Scheduler {
    /// Every outstanding job in scheduling order, as `job(core)`
    ///
    /// Waiting jobs show core `-1`. Running jobs are ranked among the
    /// waiting ones by the active policy, e.g. `2(-1) 4(0) 1(-1)` for a
    /// priority scheduler running job 4 with job 2 more urgent and job 1
    /// less urgent.
    pub fn show_queue(&self) -> SchedulerResult<String> {
        Ok(self.state()?.queue_view())
    }
}

impl State {
    pub(super) fn queue_view(&self) -> String {
        let mut entries: Vec<(&Job, Option<CoreId>)> = self
            .cores
            .iter()
            .enumerate()
            .filter_map(|(core, slot)| slot.job.as_ref().map(|job| (job, Some(core))))
            .chain(self.queue.iter().map(|job| (job, None)))
            .collect();

        // Stable: ties keep running jobs ahead, then queue order
        entries.sort_by(|a, b| self.policy.compare(a.0, b.0));

        entries
            .iter()
            .map(|(job, core)| format!("{}({})", job.job_number, core.map_or(-1, |c| c as i64)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use crate::scheduler::{Policy, Scheduler};

    #[test]
    fn test_running_job_ranked_among_waiting() {
        let mut s = Scheduler::with_policy(1, Policy::Pri).unwrap();
        s.new_job(4, 0, 10, 5).unwrap();
        s.new_job(2, 1, 10, 1).unwrap();
        s.new_job(1, 2, 10, 9).unwrap();
        assert_eq!(s.show_queue().unwrap(), "2(-1) 4(0) 1(-1)");
    }

    #[test]
    fn test_round_robin_view_lists_running_first() {
        let mut s = Scheduler::with_policy(2, Policy::Rr).unwrap();
        s.new_job(1, 0, 3, 0).unwrap();
        s.new_job(2, 0, 3, 0).unwrap();
        s.new_job(3, 1, 3, 0).unwrap();
        assert_eq!(s.show_queue().unwrap(), "1(0) 2(1) 3(-1)");
    }

    #[test]
    fn test_empty_view() {
        let s = Scheduler::with_policy(1, Policy::Fcfs).unwrap();
        assert_eq!(s.show_queue().unwrap(), "");
    }
}
