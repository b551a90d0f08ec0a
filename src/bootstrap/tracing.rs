//! Tracing configuration for TryItOn
//! TryItOn 的 tracing 配置
//!
//! Installs the global `tracing-subscriber` registry: an env-filter for level
//! control and one fmt layer on stderr. stdout stays reserved for the
//! notifications and listings the CLI prints.
//!
//! 安装全局 `tracing-subscriber`：env-filter 控制级别，fmt 层输出到 stderr；
//! stdout 只留给 CLI 打印的通知和列表。
//!
//! ## Format / 格式
//!
//! "2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message"

use std::io;

use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// - **Development**: debug level for the app crates
/// - **Production**: info level
/// - HTTP stack internals are held at warn in both
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    vec![
        if is_dev { "debug" } else { "info" }.to_string(),
        "hyper=warn".to_string(),
        "hyper_util=warn".to_string(),
        "reqwest=warn".to_string(),
        "rustls=warn".to_string(),
        if is_dev { "ti_infra=debug" } else { "ti_infra=info" }.to_string(),
    ]
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` overrides the default directives.
///
/// ## Errors
///
/// Returns `Err` if a global subscriber is already registered.
pub fn init_tracing_subscriber() -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development());
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives.join(",")));

    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(io::stderr);

    registry().with(env_filter).with(stderr_layer).try_init()?;

    Ok(())
}
