//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - Define configuration data structures / 定义配置数据结构
//! - Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! **No validation logic / 禁止验证逻辑.** A missing key maps to its default;
//! a malformed base URL is accepted here and surfaces as `NetworkUnreachable`
//! when used.
//! 缺失的键取默认值；格式错误的 base URL 在此照单全收，使用时表现为 `NetworkUnreachable`。

/// Default backend host (a local Flask development server).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
/// Upper bound for one request, including the slow 3D reconstruction.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Multipart field the upload endpoint reads the file from.
pub const DEFAULT_UPLOAD_FIELD: &str = "file";

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base host every endpoint path is appended to.
    pub base_url: String,

    /// Per-request timeout; a hung stage fails as `NetworkUnreachable` after this.
    /// Zero disables the bound.
    pub request_timeout_secs: u64,

    pub connect_timeout_secs: u64,

    /// Name of the multipart file field sent to `/upload`.
    pub upload_field_name: String,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// Missing keys take their defaults; present keys are taken as-is.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = Self::with_defaults();
        let server = toml_value.get("server");
        let upload = toml_value.get("upload");

        Ok(Self {
            base_url: server
                .and_then(|s| s.get("base_url"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or(defaults.base_url),
            request_timeout_secs: server
                .and_then(|s| s.get("request_timeout_secs"))
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
                .unwrap_or(defaults.request_timeout_secs),
            connect_timeout_secs: server
                .and_then(|s| s.get("connect_timeout_secs"))
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
                .unwrap_or(defaults.connect_timeout_secs),
            upload_field_name: upload
                .and_then(|u| u.get("field_name"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or(defaults.upload_field_name),
        })
    }

    /// Configuration used when no file is present.
    pub fn with_defaults() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            upload_field_name: DEFAULT_UPLOAD_FIELD.to_string(),
        }
    }

    /// Returns a copy with the base URL replaced.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}
