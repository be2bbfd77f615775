/*!
 * Scheduler Replay - Main Entry Point
 *
 * Replays a JSON script of scheduler calls and prints one JSON line per
 * decision followed by the final statistics.
 *
 * Usage: sched-replay <script.json>
 */

use sched_engine::{init_tracing, ConfigError, EngineError, Script};
use tracing::info;

fn main() -> miette::Result<()> {
    init_tracing();

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| miette::miette!("usage: sched-replay <script.json>"))?;

    let mut script = Script::from_file(&path).map_err(EngineError::from)?;
    script.config = script.config.apply_env().map_err(EngineError::from)?;

    info!(
        path = %path,
        cores = script.config.cores,
        policy = %script.config.policy,
        events = script.events.len(),
        "Replaying scheduler script"
    );

    let report = script.run(&path).map_err(EngineError::from)?;

    for decision in &report.decisions {
        let line = serde_json::to_string(decision)
            .map_err(ConfigError::from)
            .map_err(EngineError::from)?;
        println!("{}", line);
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&report.stats)
            .map_err(ConfigError::from)
            .map_err(EngineError::from)?
    );

    info!(
        completed = report.stats.completed_jobs,
        avg_waiting = report.stats.average_waiting_time,
        avg_turnaround = report.stats.average_turnaround_time,
        avg_response = report.stats.average_response_time,
        "Replay complete"
    );
    Ok(())
}
