//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `CodecConfig`，保证运行时行为可观测、可调整、可测试。
//! 导出格式（base64 / binary）与导出布局（bare / headed）作为高层语义，
//! 由命令行字符串解析而来。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的限制。
//! - `ExportFormat` / `ExportLayout` 负责字符串解析与反向输出。
//! - `validate` 拒绝为 0 的限制值，避免所有操作都被误判为超限。

use super::CodecError;

/// 编解码配置。
///
/// 字段覆盖了读取、解码与重建三个阶段的资源上限。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// 读取任意输入文件时允许的最大体积（字节）。
    pub max_file_size: u64,
    /// 解码源图片时允许的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 重建时允许的原始缓冲区上限（字节）。
    pub max_raw_bytes: u64,
}

/// 默认像素上限：约 1.2 亿像素，覆盖常见中画幅相机输出。
const DEFAULT_MAX_PIXELS: u64 = 120_000_000;

impl Default for CodecConfig {
    fn default() -> Self {
        let max_raw_bytes = DEFAULT_MAX_PIXELS * 3;
        Self {
            // Base64 导出比原始字节大 4/3，需能容纳最大原始缓冲区的文本形式
            max_file_size: (max_raw_bytes / 3 + 1) * 4,
            max_decoded_pixels: DEFAULT_MAX_PIXELS,
            max_raw_bytes,
        }
    }
}

impl CodecConfig {
    pub(crate) fn validate(&self) -> Result<(), CodecError> {
        if self.max_file_size == 0 {
            return Err(CodecError::InvalidInput("max_file_size 必须大于 0".to_string()));
        }
        if self.max_decoded_pixels == 0 {
            return Err(CodecError::InvalidInput(
                "max_decoded_pixels 必须大于 0".to_string(),
            ));
        }
        if self.max_raw_bytes == 0 {
            return Err(CodecError::InvalidInput("max_raw_bytes 必须大于 0".to_string()));
        }
        Ok(())
    }
}

/// 导出文件格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// 标准 Base64 文本文件。
    #[default]
    Base64,
    /// 原始字节文件。
    Binary,
}

impl ExportFormat {
    /// 从外部字符串解析格式。
    ///
    /// # 示例
    /// ```rust
    /// use raw_pixel_codec::codec::ExportFormat;
    ///
    /// let f = ExportFormat::from_str("BIN")?;
    /// assert_eq!(f.as_str(), "binary");
    /// # Ok::<(), raw_pixel_codec::codec::CodecError>(())
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(format: &str) -> Result<Self, CodecError> {
        match format.trim().to_lowercase().as_str() {
            "base64" | "b64" | "text" => Ok(Self::Base64),
            "binary" | "bin" | "raw" => Ok(Self::Binary),
            other => Err(CodecError::InvalidInput(format!(
                "未知导出格式：{}（可选：base64 / binary）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::Binary => "binary",
        }
    }

    /// 默认文件扩展名（与原工具的 `*.txt` / `*.bin` 对话框过滤器一致）。
    pub fn default_extension(self) -> &'static str {
        match self {
            Self::Base64 => "txt",
            Self::Binary => "bin",
        }
    }
}

/// 导出布局：是否在原始像素前写入尺寸头。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportLayout {
    /// 无头部，与既有导出文件逐字节兼容。
    #[default]
    Bare,
    /// 12 字节 `RPX1` 尺寸头 + 原始像素。
    Headed,
}

impl ExportLayout {
    pub fn from_header_flag(with_header: bool) -> Self {
        if with_header { Self::Headed } else { Self::Bare }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bare => "bare",
            Self::Headed => "headed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parse_accepts_aliases() {
        assert_eq!(ExportFormat::from_str(" Base64 ").unwrap(), ExportFormat::Base64);
        assert_eq!(ExportFormat::from_str("text").unwrap(), ExportFormat::Base64);
        assert_eq!(ExportFormat::from_str("raw").unwrap(), ExportFormat::Binary);
    }

    #[test]
    fn format_parse_rejects_unknown() {
        assert!(matches!(
            ExportFormat::from_str("hex"),
            Err(CodecError::InvalidInput(_))
        ));
    }

    #[test]
    fn default_config_is_valid_and_zero_limits_are_not() {
        assert!(CodecConfig::default().validate().is_ok());

        let mut config = CodecConfig::default();
        config.max_raw_bytes = 0;
        assert!(matches!(config.validate(), Err(CodecError::InvalidInput(_))));
    }

    #[test]
    fn default_limits_admit_base64_of_largest_raw_buffer() {
        let config = CodecConfig::default();
        let largest_text = config.max_raw_bytes.div_ceil(3) * 4;

        assert!(config.max_file_size >= largest_text);
        assert!(config.max_decoded_pixels >= 8000 * 6000);
    }

    #[test]
    fn layout_from_flag() {
        assert_eq!(ExportLayout::from_header_flag(false), ExportLayout::Bare);
        assert_eq!(ExportLayout::from_header_flag(true).as_str(), "headed");
    }
}
