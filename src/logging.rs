use std::env;

use log::LevelFilter;

/// Environment variable holding the log level (`error`, `warn`, `info`, `debug`, `trace`).
pub const LEVEL_VAR: &str = "SHIFT_PLANNER_LOG";

pub fn level_from_env() -> LevelFilter {
    env::var(LEVEL_VAR)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Sends `log` records to stderr with a timestamp, keeping stdout for the report.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} | {:5} | {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}
