//! Maton gateway integrations.
//!
//! [`GatewayClient`] sends authenticated JSON requests to the gateway and
//! turns failures into typed [`Error`]s. [`sheets`] and [`slack`] build the
//! two integrations on top of it.

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod sheets;
pub mod slack;

pub use crate::client::{GatewayClient, Method};
pub use crate::config::{ApiKey, Config, ConfigError, GatewayConfig, LoggingConfig};
pub use crate::error::{Error, Result};
pub use crate::sheets::{create_btc_dashboard, DashboardStep};
pub use crate::slack::{post_message, PostedMessage};
