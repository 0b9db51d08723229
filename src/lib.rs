//! # 原始像素工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 命令行 rawpixel (clap)                    │
//! │        info ── export ── reconstruct                     │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ Result<Outcome, AppError>
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            库 (Rust)                             │
//! │                                                          │
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  ├─ settings ─── JSON 设置文件 → CodecConfig             │
//! │  ├─ cli ──────── 参数适配 + 文本/JSON 输出               │
//! │  └─ codec ────── 原始像素编解码                          │
//! │      ├─ pipeline  图片 ⇄ RGB 原始字节                    │
//! │      ├─ text      标准 Base64                            │
//! │      ├─ header    可选 RPX1 尺寸头                       │
//! │      ├─ loader    读取 + 体积/签名校验                   │
//! │      └─ writer    原子写出                               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError` |
//! | [`codec`] | 导出原始 RGB 字节、Base64 编解码、按宽高重建图片 |
//! | [`settings`] | 设置文件的定位、解析与叠加 |
//! | [`cli`] | 命令行参数定义、执行与输出渲染 |
//!
//! ## 导出文件不记录尺寸
//!
//! 默认导出格式（Base64 文本或原始二进制）只包含像素字节，没有任何头部，
//! 重建时必须由用户重新输入原图宽高。`--with-header` 可选写入 `RPX1` 尺寸头。

pub mod cli;
pub mod codec;
pub mod error;
pub mod settings;
