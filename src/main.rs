//! # 原始像素工具 — 命令行入口
//!
//! 本文件仅负责日志初始化、参数解析与退出码。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::process::ExitCode;

use clap::Parser;
use raw_pixel_codec::cli::{self, Cli};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();
    log::debug!("parsed arguments: {:?}", args);

    let rendered = cli::execute(&args).and_then(|outcome| cli::render(&outcome, args.json));

    match rendered {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("命令执行失败: {err}");
            eprintln!("{}", cli::render_error(&err, args.json));
            ExitCode::FAILURE
        }
    }
}
