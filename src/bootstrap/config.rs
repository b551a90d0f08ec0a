//! # Configuration Resolution / 配置解析
//!
//! Picks which configuration file to load and applies the base URL override.
//! 选择要加载的配置文件，并应用 base URL 覆盖。
//!
//! ## Order / 优先级
//!
//! 1. Explicit path (`--config` or `$TRYITON_CONFIG`) / 显式路径
//! 2. Per-user file, if it exists / 用户配置文件（存在时）
//! 3. Built-in defaults / 内置默认值
//!
//! `--base-url` / `$TRYITON_BASE_URL` replace the base URL of whichever config
//! was chosen. / 无论选中哪个配置，都会被替换其 base URL。

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use ti_core::AppConfig;
use ti_infra::load_config;

const APP_DIR: &str = "tryiton";
const CONFIG_FILE: &str = "config.toml";

/// `<config dir>/tryiton/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Resolve the effective configuration.
///
/// An explicit path must exist; the default path is skipped when absent.
pub fn resolve_config(
    explicit_path: Option<&Path>,
    default_path: Option<&Path>,
    base_url_override: Option<&str>,
) -> anyhow::Result<AppConfig> {
    let config = match (explicit_path, default_path) {
        (Some(path), _) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        (None, Some(path)) if path.exists() => load_config(path)?,
        _ => {
            debug!("no config file found, using defaults");
            AppConfig::with_defaults()
        }
    };

    let config = match base_url_override {
        Some(base_url) if !base_url.trim().is_empty() => config.with_base_url(base_url.trim()),
        _ => config,
    };

    info!(base_url = %config.base_url, "configuration resolved");
    Ok(config)
}
