//! # edu_core
//!
//! Shared building blocks for the EduPilot crates.
//!
//! - **Notifications**: user-visible toasts emitted by the wizard and the
//!   content generator, delivered through the [`Notifier`] trait
//! - **Configuration**: [`EduConfig`], loaded from TOML, with the simulated
//!   latencies used by the mock services

pub mod config;
pub mod error;
pub mod notify;

pub use config::{EduConfig, OutputConfig, OutputFormat, SimulationConfig};
pub use error::{ConfigError, ConfigResult};
pub use notify::{
    Notification, NotificationLevel, Notifier, RecordingNotifier, TracingNotifier,
};
