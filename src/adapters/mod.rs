// Adapters - External system implementations

pub mod console_alert;
pub mod http_service;
pub mod memory_service;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use console_alert::ConsoleAlert;
pub use http_service::HttpService;
pub use memory_service::InMemoryService;
pub use toml_config::TomlConfigAdapter;
pub use tracing_log::{build_subscriber, init_logging};
