//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载像素编解码链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! `code()` / `stage()` 给出稳定的机器可读标识，供命令行 `--json` 输出使用。

/// 像素编解码统一错误类型。
///
/// 该类型会在命令层被上转为 `AppError`，或直接转换为 `CommandError` 输出。
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("解码错误：{0}")]
    Decode(String),

    #[error("格式错误：{0}")]
    Format(String),

    /// 原始缓冲区长度与 `width * height * 3` 不一致。
    #[error("尺寸不匹配：按输入尺寸应为 {expected} 字节，实际为 {actual} 字节")]
    DimensionMismatch { expected: u64, actual: u64 },

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("输入无效：{0}")]
    InvalidInput(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),
}

impl CodecError {
    /// 稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode",
            Self::Format(_) => "format",
            Self::DimensionMismatch { .. } => "dimension_mismatch",
            Self::FileSystem(_) => "io",
            Self::InvalidInput(_) => "invalid_input",
            Self::ResourceLimit(_) => "resource_limit",
        }
    }

    /// 错误所属阶段。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "input",
            Self::FileSystem(_) => "io",
            Self::Decode(_) | Self::ResourceLimit(_) => "decode",
            Self::Format(_) | Self::DimensionMismatch { .. } => "reconstruct",
        }
    }
}
