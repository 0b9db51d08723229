//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，命令行层所有操作统一返回 `Result<T, AppError>`。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `CodecError` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串，供 `--json` 输出。
//! - `code()` / `stage()` 向下透传编解码错误的稳定标识。

use serde::Serialize;

use crate::codec::CodecError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 编解码链路错误（读取 / 解码 / 重建 / 写出）
    #[error("{0}")]
    Codec(#[from] CodecError),

    /// 设置文件不可用
    #[error("设置错误: {0}")]
    Settings(String),

    /// 结果无法渲染为输出文本
    #[error("输出渲染失败: {0}")]
    Output(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Codec(err) => err.code(),
            Self::Settings(_) => "settings",
            Self::Output(_) => "output",
        }
    }

    pub fn stage(&self) -> &'static str {
        match self {
            Self::Codec(err) => err.stage(),
            Self::Settings(_) => "startup",
            Self::Output(_) => "render",
        }
    }
}

/// 将错误序列化为人类可读的字符串。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_error_passes_through_code_and_message() {
        let err = AppError::from(CodecError::InvalidInput("宽度为空".to_string()));

        assert_eq!(err.code(), "invalid_input");
        assert_eq!(err.stage(), "input");
        assert_eq!(err.to_string(), "输入无效：宽度为空");
    }

    #[test]
    fn serializes_as_plain_string() {
        let err = AppError::Settings("坏文件".to_string());
        let json = serde_json::to_string(&err).unwrap();

        assert_eq!(json, "\"设置错误: 坏文件\"");
    }

    #[test]
    fn output_failure_is_not_reported_as_settings() {
        let err = AppError::Output("key must be a string".to_string());

        assert_eq!(err.code(), "output");
        assert_eq!(err.stage(), "render");
    }
}
