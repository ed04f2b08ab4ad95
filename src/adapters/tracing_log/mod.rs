// Tracing log adapter - Subscriber setup for structured logging

use tracing::Subscriber;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Build the filter: `RUST_LOG` wins over the configured level
pub fn build_filter(settings: &LoggingSettings) -> EnvFilter {
    filter_from(settings, std::env::var("RUST_LOG").ok().as_deref())
}

fn filter_from(settings: &LoggingSettings, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(&settings.level))
}

/// Subscriber writing to stderr, as JSON when configured
pub fn build_subscriber(settings: &LoggingSettings) -> Box<dyn Subscriber + Send + Sync> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(settings))
        .with_writer(std::io::stderr)
        .with_target(false);

    if settings.json {
        Box::new(builder.json().finish())
    } else {
        Box::new(builder.finish())
    }
}

/// Install the global subscriber; later calls are no-ops
pub fn init_logging(settings: &LoggingSettings) {
    let _ = build_subscriber(settings).try_init();
}
