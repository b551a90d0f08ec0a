//! Adapters owned by the composition root.

pub mod console_events;

pub use console_events::ConsoleEventPort;
