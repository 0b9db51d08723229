//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 统一处理源图片与导出数据文件的读取，并在“尽可能早”的阶段执行输入校验。
//! 目标是尽快失败，减少不必要内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! - 文件：存在性 + metadata 体积限制 + 读取。
//! - 源图片：`infer` 识别出非图片签名时提前拒绝，未识别时交给解码器。
//! - Base64 文本：按估算解码体积提前拒绝超限输入。

use std::path::Path;

use super::source::LoadedFile;
use super::text;
use super::{CodecConfig, CodecError};

/// 读取源图片文件字节，并校验签名确实是图片。
pub(crate) fn load_image_file(path: &Path, config: &CodecConfig) -> Result<LoadedFile, CodecError> {
    log::info!("📁 开始读取源图片 - 路径: {}", path.display());

    let bytes = read_with_limit(path, config.max_file_size)?;
    validate_image_signature(&bytes)?;

    Ok(LoadedFile {
        bytes,
        source_hint: "image",
    })
}

/// 读取二进制导出文件。
pub(crate) fn load_binary_export(path: &Path, config: &CodecConfig) -> Result<LoadedFile, CodecError> {
    log::info!("📦 开始读取二进制数据 - 路径: {}", path.display());

    let bytes = read_with_limit(path, config.max_file_size)?;

    Ok(LoadedFile {
        bytes,
        source_hint: "binary",
    })
}

/// 读取 Base64 文本导出文件并解码。
pub(crate) fn load_base64_export(path: &Path, config: &CodecConfig) -> Result<LoadedFile, CodecError> {
    log::info!("📝 开始读取 Base64 数据 - 路径: {}", path.display());

    let raw = read_with_limit(path, config.max_file_size)?;
    let content = String::from_utf8(raw)
        .map_err(|e| CodecError::Format(format!("Base64 文件不是有效 UTF-8 文本：{}", e)))?;

    let estimated_len = text::estimate_decoded_upper_bound_len(&content)?;
    // 头部最多 12 字节，估算值只用于粗筛
    if estimated_len > config.max_raw_bytes.saturating_add(16) {
        return Err(CodecError::ResourceLimit(format!(
            "Base64 预计解码体积过大：{:.2} MB（限制：{:.2} MB）",
            estimated_len as f64 / 1024.0 / 1024.0,
            config.max_raw_bytes as f64 / 1024.0 / 1024.0
        )));
    }

    let bytes = text::text_decode(&content)?;

    Ok(LoadedFile {
        bytes,
        source_hint: "base64",
    })
}

fn read_with_limit(path: &Path, max_file_size: u64) -> Result<Vec<u8>, CodecError> {
    if !path.exists() {
        return Err(CodecError::FileSystem(format!("文件不存在：{}", path.display())));
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| CodecError::FileSystem(format!("无法读取文件信息：{}", e)))?;

    if !metadata.is_file() {
        return Err(CodecError::FileSystem(format!("不是普通文件：{}", path.display())));
    }

    if metadata.len() > max_file_size {
        return Err(CodecError::ResourceLimit(format!(
            "文件过大：{:.2} MB（限制：{:.2} MB）",
            metadata.len() as f64 / 1024.0 / 1024.0,
            max_file_size as f64 / 1024.0 / 1024.0
        )));
    }

    std::fs::read(path).map_err(|e| CodecError::FileSystem(format!("无法读取文件：{}", e)))
}

/// 校验文件签名不是已知的非图片类型。
///
/// `infer` 无法识别的签名（如 PNM）交给 `image::guess_format` 决定。
fn validate_image_signature(bytes: &[u8]) -> Result<(), CodecError> {
    let Some(kind) = infer::get(bytes) else {
        log::debug!("🔍 签名未识别，交由解码器判断格式");
        return Ok(());
    };

    if kind.matcher_type() != infer::MatcherType::Image {
        return Err(CodecError::Decode(format!(
            "文件签名不是图片类型：{}",
            kind.mime_type()
        )));
    }

    Ok(())
}
