/*!
 * Replay Script
 * JSON description of a time-ordered sequence of scheduler calls
 */

use crate::core::config::SchedulerConfig;
use crate::core::errors::ConfigError;
use crate::core::types::{CoreId, JobNumber, Priority, Time};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One scheduler call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Arrival {
        job: JobNumber,
        time: Time,
        running_time: Time,
        #[serde(default)]
        priority: Priority,
    },
    Finished {
        core: CoreId,
        job: JobNumber,
        time: Time,
    },
    QuantumExpired {
        core: CoreId,
        time: Time,
    },
}

impl Event {
    pub fn time(&self) -> Time {
        match *self {
            Event::Arrival { time, .. }
            | Event::Finished { time, .. }
            | Event::QuantumExpired { time, .. } => time,
        }
    }
}

/// Scheduler configuration plus the calls to replay against it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: SchedulerConfig,
    pub events: Vec<Event>,
}

impl Script {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let script: Self = serde_json::from_str(json)?;
        script.config.validate()?;
        Ok(script)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
