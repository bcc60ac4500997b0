use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use log::{LevelFilter, info};

use crate::EPOCH;
use crate::config::FpvizConfig;

pub mod cli;

/// Environment variable selecting the log level (`off`, `error`, `warn`, `info`, `debug` or `trace`)
pub const LOG_LEVEL_VAR: &str = "FPVIZ_LOG";
/// Environment variable pointing to a JSON [`FpvizConfig`] file
pub const CONFIG_VAR: &str = "FPVIZ_CONFIG";

pub fn read_config(path: &Path) -> Result<FpvizConfig> {
    let file = File::open(path)
        .with_context(|| format!("could not open config file: {}", path.display()))?;
    let reader = BufReader::new(file);
    let config: FpvizConfig = serde_json::from_reader(reader)
        .with_context(|| format!("incorrect config file format: {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Loads the config file named by [`CONFIG_VAR`], or the defaults if it is not set.
pub fn config_from_env() -> Result<FpvizConfig> {
    match env::var_os(CONFIG_VAR) {
        Some(path) => read_config(Path::new(&path)),
        None => Ok(FpvizConfig::default()),
    }
}

/// Log level named by [`LOG_LEVEL_VAR`], [`LevelFilter::Info`] if it is not set.
pub fn log_level_from_env() -> Result<LevelFilter> {
    match env::var(LOG_LEVEL_VAR) {
        Ok(level) => LevelFilter::from_str(level.trim())
            .ok()
            .with_context(|| format!("invalid {LOG_LEVEL_VAR} value: {level:?}")),
        Err(_) => Ok(LevelFilter::Info),
    }
}

/// Logs to stderr, stdout is reserved for the result of the run.
pub fn init_logger(level_filter: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            let handle = std::thread::current();
            let thread_name = handle.name().unwrap_or("-");

            let duration = EPOCH.elapsed();
            let sec = duration.as_secs() % 60;
            let min = (duration.as_secs() / 60) % 60;
            let hours = (duration.as_secs() / 60) / 60;

            let prefix = format!(
                "[{}] [{:0>2}:{:0>2}:{:0>2}] <{}>",
                record.level(),
                hours,
                min,
                sec,
                thread_name,
            );

            out.finish(format_args!("{prefix:<27}{message}"))
        })
        .level(level_filter)
        .chain(std::io::stderr())
        .apply()
        .context("could not initialize logger")?;
    info!("[MAIN] time: {}", jiff::Timestamp::now());
    Ok(())
}
