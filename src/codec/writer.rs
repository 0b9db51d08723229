//! # 输出写入模块
//!
//! ## 设计思路
//!
//! 所有输出先写入同目录下的 `<文件名>.partial`，完整写入后再 `rename` 覆盖目标。
//! 任何一步失败都删除临时文件，已有的目标文件保持原样。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};

use super::CodecError;

/// 原子写入字节。
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<u64, CodecError> {
    write_atomic_with(path, |writer| {
        writer
            .write_all(bytes)
            .map_err(|e| CodecError::FileSystem(format!("写入失败：{}", e)))
    })?;
    Ok(bytes.len() as u64)
}

/// 按扩展名选择格式，把图像原子写入文件。
pub(crate) fn save_image_atomic(path: &Path, image: &RgbImage) -> Result<u64, CodecError> {
    let format = ImageFormat::from_path(path)
        .map_err(|e| CodecError::Format(format!("无法根据扩展名确定图片格式：{}", e)))?;

    if !format.can_write() {
        return Err(CodecError::Format(format!(
            "不支持写入该图片格式：{:?}",
            format
        )));
    }

    write_atomic_with(path, |writer| {
        image
            .write_to(writer, format)
            .map_err(|e| CodecError::Format(format!("图片编码失败：{}", e)))
    })?;

    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| CodecError::FileSystem(format!("无法读取输出文件信息：{}", e)))
}

fn write_atomic_with<F>(path: &Path, write: F) -> Result<(), CodecError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), CodecError>,
{
    let partial = partial_path(path)?;

    let result = (|| {
        let file = File::create(&partial)
            .map_err(|e| CodecError::FileSystem(format!("无法创建输出文件：{}", e)))?;
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;

        let file = writer
            .into_inner()
            .map_err(|e| CodecError::FileSystem(format!("写入失败：{}", e.error())))?;
        file.sync_all()
            .map_err(|e| CodecError::FileSystem(format!("落盘失败：{}", e)))?;
        drop(file);

        std::fs::rename(&partial, path)
            .map_err(|e| CodecError::FileSystem(format!("无法替换输出文件：{}", e)))
    })();

    if result.is_err() && partial.exists() {
        if let Err(err) = std::fs::remove_file(&partial) {
            log::warn!("⚠️ 清理临时文件失败 {}: {}", partial.display(), err);
        }
    }

    result
}

fn partial_path(path: &Path) -> Result<PathBuf, CodecError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| CodecError::FileSystem(format!("输出路径缺少文件名：{}", path.display())))?;

    let mut partial_name = file_name.to_os_string();
    partial_name.push(".partial");
    Ok(path.with_file_name(partial_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock error")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("raw-pixel-writer-test-{nanos}"));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn write_atomic_replaces_target_and_leaves_no_partial() {
        let dir = unique_temp_dir();
        let path = dir.join("out.bin");
        std::fs::write(&path, b"old").expect("write fixture");

        let written = write_atomic(&path, &[1, 2, 3, 4]).expect("write failed");

        assert_eq!(written, 4);
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3, 4]);
        assert!(!dir.join("out.bin.partial").exists());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn unknown_extension_keeps_existing_file() {
        let dir = unique_temp_dir();
        let path = dir.join("picture.unknownext");
        std::fs::write(&path, b"keep me").expect("write fixture");

        let image = RgbImage::from_pixel(1, 1, Rgb([1, 2, 3]));
        let result = save_image_atomic(&path, &image);

        assert!(matches!(result, Err(CodecError::Format(_))));
        assert_eq!(std::fs::read(&path).unwrap(), b"keep me");
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn save_png_round_trips_pixels() {
        let dir = unique_temp_dir();
        let path = dir.join("red.png");
        let image = RgbImage::from_pixel(2, 2, Rgb([255, 0, 0]));

        save_image_atomic(&path, &image).expect("save failed");

        let reloaded = image::open(&path).expect("reopen failed").to_rgb8();
        assert_eq!(reloaded, image);
        let _ = std::fs::remove_dir_all(dir);
    }
}
