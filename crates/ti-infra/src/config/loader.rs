//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - Read TOML configuration files / 读取 TOML 配置文件
//! - Parse TOML into the AppConfig DTO / 将 TOML 解析为 AppConfig DTO
//! - Report I/O and parsing errors with context / 带上下文报告 I/O 与解析错误
//!
//! ## Prohibited / 禁止事项
//!
//! **No validation logic / 禁止验证逻辑.** Accept whatever is in the file;
//! keys that are absent take the DTO defaults.
//! 文件内容原样接受，缺失的键使用 DTO 默认值。

use std::path::Path;

use anyhow::Context;
use ti_core::AppConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read or its content is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}
