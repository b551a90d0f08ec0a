//! # tryiton
//!
//! Composition root for the TryItOn client: tracing and configuration
//! bootstrap, dependency wiring, the console notification adapter and the CLI.

pub mod adapters;
pub mod bootstrap;
pub mod cli;
