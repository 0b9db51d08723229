//! # 原始像素编解码模块（codec）
//!
//! ## 设计思路
//!
//! 该模块将“源图片加载 → 解码 → RGB 原始字节 → 文本编码 → 写出”以及反向的
//! “读入 → 文本解码 → 按宽高重建”按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `pipeline`：纯函数，解码源图片、`encode_raw` / `decode_raw`
//! - `text`：纯函数，标准 Base64 编解码
//! - `header`：可选的 `RPX1` 尺寸头
//! - `loader`：文件读取与体积、签名校验
//! - `writer`：临时文件 + rename 的原子写出
//! - `handler`：按用户动作编排整条链路
//! - `config/error/source`：配置、错误、数据模型
//!
//! ## 调用链
//!
//! ```text
//! 命令行参数
//!    ↓
//! cli.rs（参数适配 + 输出）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（读取 + 体积/签名校验）
//!    ├─ pipeline.rs / text.rs / header.rs（纯变换）
//!    └─ writer.rs（原子写出）
//!    ↓
//! 返回 CodecError 给调用方
//! ```

mod config;
mod error;
mod handler;
mod header;
mod loader;
mod pipeline;
mod source;
mod text;
mod writer;

pub use config::{CodecConfig, ExportFormat, ExportLayout};
pub use error::CodecError;
pub use handler::RawPixelCodec;
pub use header::{HEADER_LEN, HEADER_MAGIC};
pub use pipeline::{decode_image, decode_raw, encode_raw, pixel_count, summarize, DecodedImage};
pub use source::{
    Dimensions, ExportReport, ImageSummary, RawBuffer, Reconstruction, BYTES_PER_PIXEL,
};
pub use text::{text_decode, text_encode};
