pub mod make_span;

use std::ffi::OsStr;
use std::path::Path;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
pub use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{
    filter::ParseError, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

// keeps the non-blocking file writer flushing for the lifetime of the process
static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// Logging and tracing level in the env logger format.
    pub level: String,
    pub service_name: String,
    pub exporter: Exporter,
    /// The path to the file to write logs to. Rotated daily.
    pub file_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            service_name: "organic_storefront".to_string(),
            exporter: Exporter::default(),
            file_path: "logs/telemetry.log".to_string(),
        }
    }
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub enum Exporter {
    #[default]
    Stdout,
    File,
    FileAndStdout,
}

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid log directive: {0}")]
    InvalidLogDirective(#[from] ParseError),
    #[error("Subscriber error: {0}")]
    Subscriber(#[from] TryInitError),
    #[error("File IO error: {0}")]
    FileIO(#[from] std::io::Error),
}

/// Installs the global subscriber. `log` records are bridged into it.
///
/// # Errors
/// If the level directive is invalid, the log directory cannot be created, or
/// a global subscriber is already set.
pub fn init_telemetry(config: &Config) -> Result<(), TelemetryError> {
    let stdout_layer = matches!(config.exporter, Exporter::Stdout | Exporter::FileAndStdout)
        .then(|| {
            env_filter(config).map(|filter| {
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(filter)
            })
        })
        .transpose()?;

    let file_layer = matches!(config.exporter, Exporter::File | Exporter::FileAndStdout)
        .then(|| build_file_layer(config))
        .transpose()?;

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;
    log_panics::init();

    tracing::info!(
        service = %config.service_name,
        exporter = ?config.exporter,
        "telemetry initialized"
    );
    Ok(())
}

fn build_file_layer<S>(config: &Config) -> Result<impl Layer<S>, TelemetryError>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let (dir, name) = split_log_path(&config.file_path);
    std::fs::create_dir_all(dir)?;

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name));
    let _ = FILE_GUARD.set(guard);

    Ok(tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(env_filter(config)?))
}

fn split_log_path(file_path: &str) -> (&Path, &OsStr) {
    let path = Path::new(file_path);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .unwrap_or_else(|| OsStr::new("telemetry.log"));
    (dir, name)
}

fn env_filter(config: &Config) -> Result<EnvFilter, TelemetryError> {
    let filter = EnvFilter::builder()
        .parse(&config.level)?
        .add_directive("hyper=off".parse()?)
        .add_directive("h2=off".parse()?)
        .add_directive("reqwest=warn".parse()?);
    Ok(filter)
}
