//! 设置文件模块
//!
//! # 设计思路
//!
//! 允许用户通过 JSON 设置文件覆盖 `CodecConfig` 的资源上限。
//! 所有字段均可省略，省略即沿用默认值；未知字段直接报错，避免拼写错误被静默忽略。
//!
//! # 实现思路
//!
//! - 路径优先取命令行 `--config`，其次取环境变量 `RAWPIXEL_CONFIG`。
//! - 两者都没有时返回默认配置。
//! - 所有可能失败的操作均返回 `Result`，不使用 `expect()` / `unwrap()`。

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::CodecConfig;
use crate::error::AppError;

/// 设置文件路径的环境变量名。
pub const CONFIG_ENV_VAR: &str = "RAWPIXEL_CONFIG";

/// 设置文件内容。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecSettings {
    pub max_file_size: Option<u64>,
    pub max_decoded_pixels: Option<u64>,
    pub max_raw_bytes: Option<u64>,
}

impl CodecSettings {
    /// 将设置叠加到配置上。
    pub fn apply_to(&self, config: &mut CodecConfig) {
        if let Some(v) = self.max_file_size {
            config.max_file_size = v;
        }
        if let Some(v) = self.max_decoded_pixels {
            config.max_decoded_pixels = v;
        }
        if let Some(v) = self.max_raw_bytes {
            config.max_raw_bytes = v;
        }
    }
}

/// 决定实际使用的设置文件路径。
pub fn settings_file_path(explicit: Option<&Path>) -> Option<PathBuf> {
    resolve_settings_path(explicit, std::env::var_os(CONFIG_ENV_VAR))
}

/// `--config` 优先；否则取环境变量的值，空值视为未设置。
fn resolve_settings_path(explicit: Option<&Path>, env_value: Option<OsString>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    env_value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// 解析设置文本。
pub fn parse_settings(content: &str) -> Result<CodecSettings, AppError> {
    serde_json::from_str::<CodecSettings>(content)
        .map_err(|e| AppError::Settings(format!("解析设置文件失败: {}", e)))
}

/// 加载设置并生成最终配置。
pub fn load_config(explicit: Option<&Path>) -> Result<CodecConfig, AppError> {
    let mut config = CodecConfig::default();

    let Some(path) = settings_file_path(explicit) else {
        return Ok(config);
    };

    let content = fs::read_to_string(&path)
        .map_err(|e| AppError::Settings(format!("读取设置文件 '{}' 失败: {}", path.display(), e)))?;
    let settings = parse_settings(&content)?;
    settings.apply_to(&mut config);

    log::debug!("⚙️ 已加载设置文件: {} {:?}", path.display(), settings);

    Ok(config)
}
