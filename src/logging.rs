//! Logger setup.
//!
//! Log records go to stderr through [`fern`], prefixed with a local timestamp, the level and the
//! target module.

use std::sync::Mutex;

use log::LevelFilter;

/// Environment variable that overrides the configured log level.
pub const LOG_ENV_VAR: &str = "GLSTART_LOG";

static INITIALIZED: Mutex<bool> = Mutex::new(false);

/// Parses a level name such as `"info"` or `"off"`, case insensitively.
pub fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.trim()
        .parse::<LevelFilter>()
        .map_err(|_| format!("Unknown log level '{s}'"))
}

/// Picks the log level, preferring [`LOG_ENV_VAR`] over the configured level and `info` when
/// neither is given.
pub fn resolve_level(configured: Option<&str>) -> Result<LevelFilter, String> {
    let from_env = std::env::var(LOG_ENV_VAR).ok();
    pick_level(from_env.as_deref(), configured)
}

/// Level precedence: `from_env`, then `configured`, then `info`. An invalid name is an error
/// rather than a fall through to the next source.
pub fn pick_level(from_env: Option<&str>, configured: Option<&str>) -> Result<LevelFilter, String> {
    match (from_env, configured) {
        (Some(level), _) => parse_level(level).map_err(|e| format!("{e} in {LOG_ENV_VAR}")),
        (None, Some(level)) => parse_level(level),
        (None, None) => Ok(LevelFilter::Info),
    }
}

/// Installs the global logger. Calls after the first successful one do nothing.
pub fn init(level: LevelFilter) -> Result<(), String> {
    let mut initialized = INITIALIZED.lock().map_err(|e| e.to_string())?;
    if *initialized {
        return Ok(());
    }

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .map_err(|e| format!("Could not install logger: {e}"))?;
    *initialized = true;

    log::debug!("Logging initialized at level {level}");
    Ok(())
}
