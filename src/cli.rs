//! # 命令行适配层
//!
//! ## 设计思路
//!
//! 命令层仅做参数接收与结果输出，不承载业务逻辑。
//! 它扮演原图形界面中“选择文件 / 保存文件 / 显示图片”的外部协作者：
//! - 输入路径参数 = 打开文件对话框
//! - `--output` = 保存文件对话框
//! - 打印概要（以及可选保存）= 显示重建结果
//!
//! 宽高等用户输入在读取任何文件（包括设置文件）之前完成校验。

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::codec::{
    CodecError, Dimensions, ExportFormat, ExportLayout, ExportReport, ImageSummary, RawPixelCodec,
};
use crate::error::AppError;
use crate::settings;

#[derive(Parser, Debug)]
#[command(name = "rawpixel")]
#[command(about = "Export raw RGB pixel bytes from images and rebuild images from them")]
pub struct Cli {
    /// JSON settings file (falls back to $RAWPIXEL_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show dimensions and pixel count of an image
    Info {
        /// Source image (PNG/JPEG/...)
        image: PathBuf,
    },
    /// Export the raw RGB bytes of an image as Base64 text or binary
    Export {
        /// Source image (PNG/JPEG/...)
        image: PathBuf,

        /// Output file (defaults to IMAGE with .txt / .bin)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        data: DataArgs,
    },
    /// Rebuild an image from exported raw data
    Reconstruct {
        /// Exported data file
        data_file: PathBuf,

        /// Image width in pixels
        #[arg(long)]
        width: Option<String>,

        /// Image height in pixels
        #[arg(long)]
        height: Option<String>,

        /// Save the rebuilt image (format chosen by extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        data: DataArgs,
    },
}

#[derive(Args, Debug)]
pub struct DataArgs {
    /// Data format: base64 or binary
    #[arg(short, long, default_value = "base64")]
    pub format: String,

    /// Prefix the data with an RPX1 width/height header
    #[arg(long)]
    pub with_header: bool,
}

/// 出错时 `--json` 输出的结构。
#[derive(Debug, Clone, Serialize)]
pub struct CommandError {
    pub code: &'static str,
    pub stage: &'static str,
    pub message: String,
}

impl From<&AppError> for CommandError {
    fn from(error: &AppError) -> Self {
        Self {
            code: error.code(),
            stage: error.stage(),
            message: error.to_string(),
        }
    }
}

/// 重建结果的输出视图。
#[derive(Debug, Clone, Serialize)]
pub struct ReconstructReport {
    pub width: u32,
    pub height: u32,
    pub pixel_count: u64,
    pub raw_len: u64,
    pub saved_to: Option<PathBuf>,
    pub bytes_written: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Info(ImageSummary),
    Export(ExportReport),
    Reconstruct(ReconstructReport),
}

/// 执行一条命令。
pub fn execute(cli: &Cli) -> Result<Outcome, AppError> {
    match &cli.command {
        Command::Info { image } => {
            let codec = build_codec(cli.config.as_deref())?;
            Ok(Outcome::Info(codec.inspect(image)?))
        }
        Command::Export {
            image,
            output,
            data,
        } => {
            let format = ExportFormat::from_str(&data.format)?;
            let layout = ExportLayout::from_header_flag(data.with_header);

            let output = output
                .clone()
                .unwrap_or_else(|| default_export_path(image, format));

            let codec = build_codec(cli.config.as_deref())?;
            Ok(Outcome::Export(codec.export(image, &output, format, layout)?))
        }
        Command::Reconstruct {
            data_file,
            width,
            height,
            output,
            data,
        } => {
            let format = ExportFormat::from_str(&data.format)?;
            let layout = ExportLayout::from_header_flag(data.with_header);
            let dimensions = parse_dimensions(width.as_deref(), height.as_deref(), layout)?;

            let codec = build_codec(cli.config.as_deref())?;
            let rebuilt = codec.reconstruct(data_file, format, layout, dimensions)?;

            let bytes_written = match output {
                Some(path) => Some(codec.save_image(&rebuilt.image, path)?),
                None => None,
            };

            Ok(Outcome::Reconstruct(ReconstructReport {
                width: rebuilt.dimensions.width,
                height: rebuilt.dimensions.height,
                pixel_count: rebuilt.dimensions.pixel_count(),
                raw_len: rebuilt.image.as_raw().len() as u64,
                saved_to: output.clone(),
                bytes_written,
            }))
        }
    }
}

fn build_codec(config_path: Option<&Path>) -> Result<RawPixelCodec, AppError> {
    let config = settings::load_config(config_path)?;
    Ok(RawPixelCodec::new(config)?)
}

/// 未指定 `-o` 时的导出路径：源图片换成格式对应的扩展名。
pub fn default_export_path(image: &Path, format: ExportFormat) -> PathBuf {
    image.with_extension(format.default_extension())
}

/// 解析宽高参数。
///
/// 无头部布局必须两者齐全；带头部布局允许全部省略，但不允许只给一个。
pub fn parse_dimensions(
    width: Option<&str>,
    height: Option<&str>,
    layout: ExportLayout,
) -> Result<Option<Dimensions>, CodecError> {
    match (width, height) {
        (Some(w), Some(h)) => Dimensions::parse(w, h).map(Some),
        (None, None) if layout == ExportLayout::Headed => Ok(None),
        (None, None) => Err(CodecError::InvalidInput(
            "请同时输入宽度和高度".to_string(),
        )),
        (Some(_), None) => Err(CodecError::InvalidInput("请输入高度".to_string())),
        (None, Some(_)) => Err(CodecError::InvalidInput("请输入宽度".to_string())),
    }
}

/// 将结果渲染为文本或 JSON。
pub fn render(outcome: &Outcome, json: bool) -> Result<String, AppError> {
    if json {
        return serde_json::to_string_pretty(outcome)
            .map_err(|e| AppError::Output(format!("序列化 JSON 失败: {}", e)));
    }

    let text = match outcome {
        Outcome::Info(summary) => format!(
            "尺寸: {}x{}\n像素数: {}\n格式: {}\n原始字节: {}",
            summary.width, summary.height, summary.pixel_count, summary.format, summary.raw_len
        ),
        Outcome::Export(report) => format!(
            "已导出 {}x{}（{} 像素）→ {}\n格式: {} 布局: {} 写入: {} 字节\n重建时请记下宽高：--width {} --height {}",
            report.summary.width,
            report.summary.height,
            report.summary.pixel_count,
            report.output.display(),
            report.format,
            report.layout,
            report.bytes_written,
            report.summary.width,
            report.summary.height
        ),
        Outcome::Reconstruct(report) => {
            let mut text = format!(
                "重建成功: {}x{}（{} 像素，{} 字节）",
                report.width, report.height, report.pixel_count, report.raw_len
            );
            if let (Some(path), Some(bytes)) = (&report.saved_to, report.bytes_written) {
                text.push_str(&format!("\n已保存: {}（{} 字节）", path.display(), bytes));
            }
            text
        }
    };

    Ok(text)
}

/// 将错误渲染为文本或 JSON。
pub fn render_error(error: &AppError, json: bool) -> String {
    if json {
        let payload = CommandError::from(error);
        if let Ok(text) = serde_json::to_string_pretty(&payload) {
            return text;
        }
    }
    format!("错误[{}]: {}", error.code(), error)
}
