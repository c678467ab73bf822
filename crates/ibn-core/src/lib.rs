//! IBN Core
//!
//! Coordination layer for the commissioning tool: configuration, feature
//! area registration, wizard navigation and the protocol download.

mod commissioning;
mod config;
mod error;
mod features;

pub use commissioning::{Commissioning, InstallationData, ProtocolDownloader};
pub use config::Config;
pub use error::CoreError;
pub use features::{FeatureArea, FeatureRegistry};

// Re-export core components
pub use ibn_protocol::{
    ChannelNotifier, DownloadOutcome, Notification, Notifier, ProtocolError, ProtocolId,
    Severity, TracingNotifier,
};
pub use ibn_wizard::{ViewEvent, WizardCoordinator, WizardError, WizardState};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging at `info` unless `RUST_LOG` says otherwise
pub fn init_logging() {
    init_logging_with_level("info");
}

pub fn init_logging_with_level(default_level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
