//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `RawPixelCodec` 只负责流程编排与配置管理，不与任何界面框架绑定。
//! 每个用户动作对应一个方法：
//! 1. `inspect`：读取源图片并给出像素数
//! 2. `export`：源图片 → 原始 RGB 字节 →（可选尺寸头）→（可选 Base64）→ 文件
//! 3. `reconstruct`：文件 → 原始字节 + 宽高 → 图像（返回给调用方持有）
//! 4. `save_image`：把重建结果另存为标准图片文件
//!
//! ## 实现思路
//!
//! - 配置按值持有，没有全局单例，也没有“当前显示图片”之类的隐式状态。
//! - 需要用户输入的宽高在任何文件 I/O 之前完成校验。
//! - 记录 `load/decode/encode/write/total` 阶段耗时，便于诊断。

use std::path::Path;
use std::time::Instant;

use image::RgbImage;

use super::source::{ExportReport, ImageSummary, Reconstruction};
use super::{
    header, loader, pipeline, text, writer, CodecConfig, CodecError, Dimensions, ExportFormat,
    ExportLayout,
};

/// 原始像素编解码器。
#[derive(Debug, Clone)]
pub struct RawPixelCodec {
    config: CodecConfig,
}

impl RawPixelCodec {
    /// 根据配置创建编解码器。
    ///
    /// # 示例
    /// ```rust
    /// use raw_pixel_codec::codec::{CodecConfig, RawPixelCodec};
    ///
    /// let codec = RawPixelCodec::new(CodecConfig::default())?;
    /// assert_eq!(codec.config().max_decoded_pixels, 120_000_000);
    /// # Ok::<(), raw_pixel_codec::codec::CodecError>(())
    /// ```
    pub fn new(config: CodecConfig) -> Result<Self, CodecError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// 读取源图片并返回尺寸与像素数。
    pub fn inspect(&self, image_path: &Path) -> Result<ImageSummary, CodecError> {
        let started = Instant::now();

        let loaded = loader::load_image_file(image_path, &self.config)?;
        let decoded = pipeline::decode_image(&loaded.bytes, &self.config)?;
        let summary = pipeline::summarize(&decoded.image, decoded.format)?;

        log::info!(
            "🔎 图片信息 - 来源: {} 尺寸: {}x{} 像素数: {} 耗时: {}ms",
            loaded.source_hint,
            summary.width,
            summary.height,
            summary.pixel_count,
            started.elapsed().as_millis()
        );

        Ok(summary)
    }

    /// 导出源图片的原始像素。
    pub fn export(
        &self,
        image_path: &Path,
        output_path: &Path,
        format: ExportFormat,
        layout: ExportLayout,
    ) -> Result<ExportReport, CodecError> {
        let total_start = Instant::now();

        let load_start = Instant::now();
        let loaded = loader::load_image_file(image_path, &self.config)?;
        let load_ms = load_start.elapsed().as_millis();

        let decode_start = Instant::now();
        let decoded = pipeline::decode_image(&loaded.bytes, &self.config)?;
        let summary = pipeline::summarize(&decoded.image, decoded.format)?;
        let decode_ms = decode_start.elapsed().as_millis();

        let encode_start = Instant::now();
        let raw = pipeline::encode_raw(&decoded.image);
        if raw.as_bytes().len() as u64 != summary.raw_len {
            return Err(CodecError::Decode("转换后像素数据长度异常".to_string()));
        }

        let payload = match layout {
            ExportLayout::Bare => raw.into_bytes(),
            ExportLayout::Headed => {
                let dims = Dimensions::new(summary.width, summary.height)?;
                header::prepend_header(dims, raw.as_bytes())
            }
        };
        let contents = match format {
            ExportFormat::Binary => payload,
            ExportFormat::Base64 => text::text_encode(&payload).into_bytes(),
        };
        let encode_ms = encode_start.elapsed().as_millis();

        let write_start = Instant::now();
        let bytes_written = writer::write_atomic(output_path, &contents)?;
        let write_ms = write_start.elapsed().as_millis();

        log::info!(
            "✅ 导出完成 - 格式: {} 布局: {} 尺寸: {}x{} 输出: {} ({} 字节)",
            format.as_str(),
            layout.as_str(),
            summary.width,
            summary.height,
            output_path.display(),
            bytes_written
        );
        log::debug!(
            "⏱️ 导出阶段耗时 load={}ms decode={}ms encode={}ms write={}ms total={}ms",
            load_ms,
            decode_ms,
            encode_ms,
            write_ms,
            total_start.elapsed().as_millis()
        );

        Ok(ExportReport {
            summary,
            output: output_path.to_path_buf(),
            format: format.as_str(),
            layout: layout.as_str(),
            bytes_written,
        })
    }

    /// 从导出文件重建图像。
    ///
    /// `Bare` 布局必须提供 `dimensions`，缺失时在读取文件之前就返回 `InvalidInput`。
    /// `Headed` 布局以尺寸头为准；若同时提供了不一致的宽高，返回 `InvalidInput`。
    pub fn reconstruct(
        &self,
        data_path: &Path,
        format: ExportFormat,
        layout: ExportLayout,
        dimensions: Option<Dimensions>,
    ) -> Result<Reconstruction, CodecError> {
        let total_start = Instant::now();

        if layout == ExportLayout::Bare && dimensions.is_none() {
            return Err(CodecError::InvalidInput(
                "无头部数据不记录尺寸，请同时提供宽度和高度".to_string(),
            ));
        }
        if let Some(dims) = dimensions {
            let expected = dims.expected_len()?;
            if expected > self.config.max_raw_bytes {
                return Err(CodecError::ResourceLimit(format!(
                    "重建尺寸过大：{} 字节（限制：{} 字节）",
                    expected, self.config.max_raw_bytes
                )));
            }
        }

        let load_start = Instant::now();
        let loaded = match format {
            ExportFormat::Base64 => loader::load_base64_export(data_path, &self.config)?,
            ExportFormat::Binary => loader::load_binary_export(data_path, &self.config)?,
        };
        let load_ms = load_start.elapsed().as_millis();

        let decode_start = Instant::now();
        let (dims, payload) = match layout {
            ExportLayout::Bare => {
                let dims = dimensions.ok_or_else(|| {
                    CodecError::InvalidInput("缺少宽度和高度".to_string())
                })?;
                (dims, loaded.bytes.as_slice())
            }
            ExportLayout::Headed => {
                let (header_dims, payload) = header::split_header(&loaded.bytes)?;
                if let Some(user_dims) = dimensions {
                    if user_dims != header_dims {
                        return Err(CodecError::InvalidInput(format!(
                            "输入尺寸 {}x{} 与文件头 {}x{} 不一致",
                            user_dims.width, user_dims.height, header_dims.width, header_dims.height
                        )));
                    }
                }
                (header_dims, payload)
            }
        };

        let image = pipeline::decode_raw(payload, dims.width, dims.height)?;
        let decode_ms = decode_start.elapsed().as_millis();

        log::info!(
            "✅ 图片重建成功 - 来源: {} 尺寸: {}x{}",
            loaded.source_hint,
            dims.width,
            dims.height
        );
        log::debug!(
            "⏱️ 重建阶段耗时 load={}ms decode={}ms total={}ms",
            load_ms,
            decode_ms,
            total_start.elapsed().as_millis()
        );

        Ok(Reconstruction {
            image,
            dimensions: dims,
        })
    }

    /// 将图像另存为标准图片文件，格式由扩展名决定。
    pub fn save_image(&self, image: &RgbImage, output_path: &Path) -> Result<u64, CodecError> {
        let started = Instant::now();
        let written = writer::save_image_atomic(output_path, image)?;

        log::info!(
            "💾 重建图片已保存 - 路径: {} ({} 字节, {}ms)",
            output_path.display(),
            written,
            started.elapsed().as_millis()
        );

        Ok(written)
    }
}
