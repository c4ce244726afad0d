//! AutoCare - composition root
//!
//! Reads configuration, installs logging, opens the single database handle
//! and wires stores, repositories and state holders together.

mod app;
mod config;
mod telemetry;

pub use app::App;
pub use config::{AppConfig, LogFormat, DEFAULT_DB_PATH};
pub use telemetry::init_tracing;
