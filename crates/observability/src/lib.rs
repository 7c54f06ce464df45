//! localchat observability - tracing setup for the localchat binaries.
//!
//! Console logging through `tracing-subscriber`, with optional OpenTelemetry
//! export over OTLP when an endpoint is configured.
//!
//! ```no_run
//! use localchat_observability::{init, ObservabilityConfig};
//!
//! let config = ObservabilityConfig::new("localchat")
//!     .with_log_level("debug")
//!     .with_stderr(true);
//! init(config)?;
//!
//! tracing::info!("ready");
//! # Ok::<(), localchat_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` or `SERVICE_NAME` - Service name
//! - `OTEL_SERVICE_VERSION` or `SERVICE_VERSION` - Service version
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint
//! - `OTEL_LOG_LEVEL` or `RUST_LOG` - Log level filter

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, shutdown};
pub use self::tracing::{record_duration, record_error};
