pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{default_config_path, resolve_config};
pub use wiring::{wire_app, TryItOnApp, WiringError};
