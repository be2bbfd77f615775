/*!
 * Scheduler Configuration
 * Core count and policy, loaded from JSON with environment overrides
 *
 * Environment variables:
 * - SCHED_CORES: number of simulated cores
 * - SCHED_POLICY: fcfs, sjf, psjf, pri, ppri or rr
 */

use super::errors::{ConfigError, SchedulerError};
use crate::scheduler::Policy;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_CORES: &str = "SCHED_CORES";
pub const ENV_POLICY: &str = "SCHED_POLICY";

/// Scheduler startup parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub cores: usize,
    pub policy: Policy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            cores: 1,
            policy: Policy::Fcfs,
        }
    }
}

impl SchedulerConfig {
    pub fn new(cores: usize, policy: Policy) -> Self {
        Self { cores, policy }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Override fields from `SCHED_CORES` / `SCHED_POLICY` when set
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(
            std::env::var(ENV_CORES).ok(),
            std::env::var(ENV_POLICY).ok(),
        )
    }

    fn apply_overrides(
        mut self,
        cores: Option<String>,
        policy: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = cores {
            self.cores = value.trim().parse().map_err(|_| ConfigError::Env {
                var: ENV_CORES,
                value: value.clone(),
            })?;
        }
        if let Some(value) = policy {
            self.policy = value.trim().parse().map_err(|_| ConfigError::Env {
                var: ENV_POLICY,
                value: value.clone(),
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.cores == 0 {
            return Err(SchedulerError::InvalidCoreCount);
        }
        Ok(())
    }
}
