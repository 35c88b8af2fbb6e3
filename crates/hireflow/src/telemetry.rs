use crate::config::{AppEnvironment, TelemetryConfig};
use std::env;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    Directives { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Directives { value, .. } => {
                write!(f, "invalid log filter directives '{value}'")
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Directives { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the configured
/// level; production output is compact and plain, everything else keeps ANSI
/// and event targets for local debugging.
pub fn init(environment: AppEnvironment, config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let directives = resolve_directives(env::var(EnvFilter::DEFAULT_ENV).ok(), config);
    let filter = parse_directives(&directives)?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match environment {
        AppEnvironment::Production => builder
            .compact()
            .with_ansi(false)
            .with_target(false)
            .try_init(),
        AppEnvironment::Development | AppEnvironment::Test => {
            builder.with_target(true).try_init()
        }
    }
    .map_err(TelemetryError::Subscriber)
}

fn resolve_directives(env_override: Option<String>, config: &TelemetryConfig) -> String {
    env_override
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| config.log_level.clone())
}

fn parse_directives(directives: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directives).map_err(|source| TelemetryError::Directives {
        value: directives.to_string(),
        source,
    })
}
