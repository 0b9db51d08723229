//! # 文本编码模块
//!
//! 标准 Base64（RFC 4648 字母表，`=` 填充）。编码与解码互为逆运算，
//! 解码仅去除首尾空白，其余一律严格校验。

use base64::{Engine as _, engine::general_purpose};

use super::CodecError;

/// 将任意字节编码为标准 Base64 文本。
///
/// # 示例
/// ```rust
/// use raw_pixel_codec::codec::text_encode;
///
/// assert_eq!(text_encode(&[255, 0, 0]), "/wAA");
/// assert_eq!(text_encode(&[]), "");
/// ```
pub fn text_encode(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// 解码标准 Base64 文本。
///
/// 非法字符或填充错误返回 `CodecError::Format`。
pub fn text_decode(text: &str) -> Result<Vec<u8>, CodecError> {
    general_purpose::STANDARD
        .decode(text.trim())
        .map_err(|e| CodecError::Format(format!("Base64 解码失败：{}", e)))
}

/// 按 Base64 长度估算解码后字节数上限。
///
/// 用于在真正解码前按体积限制快速拒绝。
pub(crate) fn estimate_decoded_upper_bound_len(text: &str) -> Result<u64, CodecError> {
    let len = text.trim().len() as u64;
    let groups = len
        .checked_add(3)
        .ok_or_else(|| CodecError::ResourceLimit("Base64 输入长度溢出".to_string()))?
        / 4;

    groups
        .checked_mul(3)
        .ok_or_else(|| CodecError::ResourceLimit("Base64 解码体积估算溢出".to_string()))
}
