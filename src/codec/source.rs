//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“外部输入”和“流水线中间结果”解耦：
//! - `Dimensions` 表示用户在带外给出的宽高
//! - `RawBuffer` 表示无头部、行优先的 RGB 字节
//! - `LoadedFile` 表示已读取但未解析的文件字节
//! - `ImageSummary` / `ExportReport` / `Reconstruction` 表示各操作的返回值

use std::path::PathBuf;

use image::RgbImage;
use serde::Serialize;

use super::CodecError;

/// 每像素字节数（固定 RGB8）。
pub const BYTES_PER_PIXEL: u64 = 3;

/// 重建所需的宽高描述。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// 构造并校验宽高均为正数。
    pub fn new(width: u32, height: u32) -> Result<Self, CodecError> {
        if width == 0 || height == 0 {
            return Err(CodecError::InvalidInput(format!(
                "宽高必须为正整数：{}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    /// 从用户输入的文本解析宽高。
    ///
    /// 空白、非数字、0 或负数均返回 `InvalidInput`。
    ///
    /// # 示例
    /// ```rust
    /// use raw_pixel_codec::codec::Dimensions;
    ///
    /// let dims = Dimensions::parse(" 400 ", "297")?;
    /// assert_eq!(dims.expected_len()?, 400 * 297 * 3);
    /// # Ok::<(), raw_pixel_codec::codec::CodecError>(())
    /// ```
    pub fn parse(width_text: &str, height_text: &str) -> Result<Self, CodecError> {
        let width = Self::parse_side("宽度", width_text)?;
        let height = Self::parse_side("高度", height_text)?;
        Self::new(width, height)
    }

    fn parse_side(label: &str, text: &str) -> Result<u32, CodecError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CodecError::InvalidInput(format!("请输入{}", label)));
        }

        let value: i64 = trimmed
            .parse()
            .map_err(|e| CodecError::InvalidInput(format!("{}不是整数：{:?}（{}）", label, trimmed, e)))?;

        if value <= 0 {
            return Err(CodecError::InvalidInput(format!(
                "{}必须为正整数：{}",
                label, value
            )));
        }

        u32::try_from(value)
            .map_err(|_| CodecError::InvalidInput(format!("{}超出范围：{}", label, value)))
    }

    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// 期望的原始缓冲区长度 `width * height * 3`。
    pub fn expected_len(self) -> Result<u64, CodecError> {
        self.pixel_count()
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or_else(|| CodecError::ResourceLimit("图片尺寸导致字节数溢出".to_string()))
    }
}

/// 行优先、无填充的 RGB 字节。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBuffer {
    bytes: Vec<u8>,
}

impl RawBuffer {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// 加载阶段输出：原始字节与来源标识。
pub(crate) struct LoadedFile {
    pub(crate) bytes: Vec<u8>,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: &'static str,
}

/// 源图片概要（原工具的“Pixel Count”栏）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSummary {
    pub width: u32,
    pub height: u32,
    pub pixel_count: u64,
    /// 识别到的源格式，如 `png` / `jpeg`。
    pub format: String,
    /// 导出后原始缓冲区长度。
    pub raw_len: u64,
}

/// 导出结果。
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub summary: ImageSummary,
    pub output: PathBuf,
    pub format: &'static str,
    pub layout: &'static str,
    pub bytes_written: u64,
}

/// 重建结果，由调用方持有并决定如何展示。
#[derive(Debug, Clone)]
pub struct Reconstruction {
    pub image: RgbImage,
    pub dimensions: Dimensions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_padded_numbers() {
        let dims = Dimensions::parse(" 2 ", "3\n").expect("parse failed");
        assert_eq!(dims, Dimensions { width: 2, height: 3 });
        assert_eq!(dims.expected_len().unwrap(), 18);
    }

    #[test]
    fn parse_rejects_bad_entries() {
        for (w, h) in [("", "3"), ("abc", "3"), ("0", "3"), ("3", "-1"), ("2.5", "3"), ("5000000000", "1")] {
            assert!(
                matches!(Dimensions::parse(w, h), Err(CodecError::InvalidInput(_))),
                "expected InvalidInput for {w:?}x{h:?}"
            );
        }
    }

    #[test]
    fn expected_len_reports_overflow_instead_of_wrapping() {
        let dims = Dimensions::new(u32::MAX, u32::MAX).unwrap();
        assert!(matches!(
            dims.expected_len(),
            Err(CodecError::ResourceLimit(_))
        ));
    }
}
