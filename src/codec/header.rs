//! # 尺寸头模块
//!
//! 可选的 12 字节头部：`RPX1` + 宽（u32 LE）+ 高（u32 LE）。
//! 仅在 `ExportLayout::Headed` 下读写；无头部数据从不做头部嗅探。

use super::{CodecError, Dimensions};

pub const HEADER_MAGIC: &[u8; 4] = b"RPX1";
pub const HEADER_LEN: usize = 12;

/// 在原始像素前写入尺寸头。
pub(crate) fn prepend_header(dimensions: Dimensions, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(HEADER_MAGIC);
    out.extend_from_slice(&dimensions.width.to_le_bytes());
    out.extend_from_slice(&dimensions.height.to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// 拆分尺寸头与像素负载。
pub(crate) fn split_header(bytes: &[u8]) -> Result<(Dimensions, &[u8]), CodecError> {
    if bytes.len() < HEADER_LEN || &bytes[..4] != HEADER_MAGIC {
        return Err(CodecError::Format(
            "缺少 RPX1 尺寸头（该文件可能是无头部导出）".to_string(),
        ));
    }

    let width = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let height = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
    let dimensions = Dimensions::new(width, height)
        .map_err(|_| CodecError::Format(format!("尺寸头数值无效：{}x{}", width, height)))?;

    Ok((dimensions, &bytes[HEADER_LEN..]))
}
