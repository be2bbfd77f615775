/*!
 * Scheduling Policies
 * Ordering rules and preemption predicates for each policy
 */

use super::entry::Job;
use crate::core::data_structures::Comparator;
use crate::core::errors::SchedulerError;
use crate::core::types::{SchedulerResult, Time};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Scheduling policy
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Policy {
    /// First come, first served
    #[default]
    Fcfs,
    /// Shortest job first
    Sjf,
    /// Preemptive shortest job first
    Psjf,
    /// Fixed priority
    Pri,
    /// Preemptive fixed priority
    Ppri,
    /// Round-robin, driven by external quantum expirations
    Rr,
}

impl Policy {
    pub const ALL: [Policy; 6] = [
        Self::Fcfs,
        Self::Sjf,
        Self::Psjf,
        Self::Pri,
        Self::Ppri,
        Self::Rr,
    ];

    /// Convert to string representation
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Psjf => "psjf",
            Self::Pri => "pri",
            Self::Ppri => "ppri",
            Self::Rr => "rr",
        }
    }

    /// Whether an arrival may displace a running job
    #[inline]
    pub const fn is_preemptive(&self) -> bool {
        matches!(self, Self::Psjf | Self::Ppri)
    }

    /// Order two jobs for the ready queue
    pub fn compare(&self, a: &Job, b: &Job) -> Ordering {
        match self {
            Self::Fcfs => a.arrival_time.cmp(&b.arrival_time),
            Self::Sjf | Self::Psjf => a.running_time.cmp(&b.running_time),
            Self::Pri | Self::Ppri => a
                .priority
                .cmp(&b.priority)
                .then_with(|| a.arrival_time.cmp(&b.arrival_time)),
            Self::Rr => Ordering::Equal,
        }
    }

    /// Whether `arriving` should take the core `running` occupies at `now`
    ///
    /// Only strict improvements preempt. PSJF weighs the newcomer's full
    /// demand against what the running job still owes at this instant.
    pub fn should_preempt(
        &self,
        arriving: &Job,
        running: &Job,
        now: Time,
    ) -> SchedulerResult<bool> {
        Ok(match self {
            Self::Ppri => arriving.priority < running.priority,
            Self::Psjf => arriving.running_time < running.remaining_at(now)?,
            Self::Fcfs | Self::Sjf | Self::Pri | Self::Rr => false,
        })
    }
}

impl Comparator<Job> for Policy {
    #[inline]
    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        Policy::compare(self, a, b)
    }
}

impl FromStr for Policy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fcfs" | "first_come_first_served" | "fifo" => Ok(Self::Fcfs),
            "sjf" | "shortest_job_first" => Ok(Self::Sjf),
            "psjf" | "preemptive_shortest_job_first" => Ok(Self::Psjf),
            "pri" | "priority" => Ok(Self::Pri),
            "ppri" | "preemptive_priority" => Ok(Self::Ppri),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::Rr),
            _ => Err(SchedulerError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Policy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
