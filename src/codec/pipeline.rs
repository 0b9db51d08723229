//! # 解码与变换流水线模块
//!
//! ## 设计思路
//!
//! 将“文件字节 → 图像 → RGB 原始字节”以及反向的“原始字节 + 宽高 → 图像”
//! 集中管理，并在关键节点增加资源上限控制。
//! 优先做尺寸检查，再进行完整解码，降低恶意输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 1. 猜测格式并读取 header 尺寸
//! 2. 按像素上限快速拒绝
//! 3. 完整解码
//! 4. 统一转换 RGB8，并校验字节长度一致性
//!
//! 这里的函数都不做文件 I/O。

use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader, RgbImage};
use std::io::Cursor;

use super::source::{ImageSummary, RawBuffer};
use super::{CodecConfig, CodecError, Dimensions};

/// 源图片解码结果。
pub struct DecodedImage {
    pub image: DynamicImage,
    pub format: ImageFormat,
}

/// 将图片文件字节解码为图像。
pub fn decode_image(bytes: &[u8], config: &CodecConfig) -> Result<DecodedImage, CodecError> {
    let format = image::guess_format(bytes)
        .map_err(|e| CodecError::Decode(format!("不支持的图片格式：{}", e)))?;

    let (header_width, header_height) = inspect_dimensions_from_memory(bytes)?;
    validate_pixel_limits(config, header_width, header_height)?;

    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| CodecError::Decode(format!("图片解码失败：{}", e)))?;

    let (width, height) = image.dimensions();
    validate_pixel_limits(config, width, height)?;

    Ok(DecodedImage { image, format })
}

/// 仅通过内存中的图片头信息读取宽高。
fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), CodecError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CodecError::Decode(format!("无法识别图片格式：{}", e)))?;

    reader
        .into_dimensions()
        .map_err(|e| CodecError::Decode(format!("无法读取图片尺寸：{}", e)))
}

fn validate_pixel_limits(config: &CodecConfig, width: u32, height: u32) -> Result<(), CodecError> {
    let pixels = u64::from(width) * u64::from(height);

    if pixels > config.max_decoded_pixels {
        return Err(CodecError::ResourceLimit(format!(
            "图片像素过大：{} 像素（限制：{} 像素）",
            pixels, config.max_decoded_pixels
        )));
    }

    Ok(())
}

/// 像素总数（`width * height`）。
pub fn pixel_count(image: &DynamicImage) -> u64 {
    let (width, height) = image.dimensions();
    u64::from(width) * u64::from(height)
}

/// 生成图片概要。
pub fn summarize(image: &DynamicImage, format: ImageFormat) -> Result<ImageSummary, CodecError> {
    let (width, height) = image.dimensions();
    let raw_len = Dimensions::new(width, height)?.expected_len()?;

    Ok(ImageSummary {
        width,
        height,
        pixel_count: pixel_count(image),
        format: format
            .extensions_str()
            .first()
            .copied()
            .unwrap_or("unknown")
            .to_string(),
        raw_len,
    })
}

/// 将图像转换为行优先 RGB 原始字节。
///
/// 非 RGB8 来源（灰度、带 alpha、16 位）先转换为 RGB8，alpha 被丢弃。
pub fn encode_raw(image: &DynamicImage) -> RawBuffer {
    let rgb = match image {
        DynamicImage::ImageRgb8(rgb) => rgb.clone(),
        other => other.to_rgb8(),
    };
    RawBuffer::new(rgb.into_raw())
}

/// 以给定宽高把原始字节还原为图像。
///
/// 长度必须恰好为 `width * height * 3`，否则返回 `DimensionMismatch`，
/// 不做截断或补齐。宽高是否“合理”不做判断。
/// 期望长度超出 u64 时按 `u64::MAX` 计，同样报告 `DimensionMismatch`。
///
/// # 示例
/// ```rust
/// use raw_pixel_codec::codec::decode_raw;
///
/// let image = decode_raw(&[255, 0, 0].repeat(4), 2, 2)?;
/// assert_eq!(image.dimensions(), (2, 2));
/// # Ok::<(), raw_pixel_codec::codec::CodecError>(())
/// ```
pub fn decode_raw(bytes: &[u8], width: u32, height: u32) -> Result<RgbImage, CodecError> {
    let dimensions = Dimensions::new(width, height)?;
    let expected = dimensions.expected_len().unwrap_or(u64::MAX);
    let actual = bytes.len() as u64;

    if actual != expected {
        return Err(CodecError::DimensionMismatch { expected, actual });
    }

    RgbImage::from_raw(width, height, bytes.to_vec())
        .ok_or_else(|| CodecError::DimensionMismatch { expected, actual })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba};
    use proptest::prelude::*;

    fn create_png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            let r = (x % 255) as u8;
            let g = (y % 255) as u8;
            let b = ((x + y) % 255) as u8;
            Rgb([r, g, b])
        });

        let mut cursor = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut cursor, ImageFormat::Png)
            .expect("failed to encode test image");
        cursor.into_inner()
    }

    #[test]
    fn red_square_encodes_to_twelve_bytes() {
        let img = RgbImage::from_pixel(2, 2, Rgb([255, 0, 0]));
        let raw = encode_raw(&DynamicImage::ImageRgb8(img));

        assert_eq!(raw.as_bytes().len(), 12);
        assert_eq!(raw.as_bytes(), [255u8, 0, 0].repeat(4).as_slice());
    }

    #[test]
    fn raw_is_row_major_top_to_bottom() {
        let img = ImageBuffer::from_fn(2, 2, |x, y| Rgb([x as u8, y as u8, 7]));
        let raw = encode_raw(&DynamicImage::ImageRgb8(img));

        assert_eq!(
            raw.as_bytes(),
            &[0, 0, 7, 1, 0, 7, 0, 1, 7, 1, 1, 7]
        );
    }

    #[test]
    fn rgba_source_drops_alpha() {
        let img = ImageBuffer::from_pixel(3, 1, Rgba([10u8, 20, 30, 40]));
        let raw = encode_raw(&DynamicImage::ImageRgba8(img));

        assert_eq!(raw.as_bytes(), [10u8, 20, 30].repeat(3).as_slice());
    }

    #[test]
    fn decode_raw_rejects_length_mismatch() {
        let result = decode_raw(&[0u8; 11], 2, 2);

        assert!(matches!(
            result,
            Err(CodecError::DimensionMismatch { expected: 12, actual: 11 })
        ));
    }

    #[test]
    fn decode_raw_overflowing_geometry_is_still_a_mismatch() {
        let result = decode_raw(&[0u8; 12], u32::MAX, u32::MAX);

        assert!(matches!(
            result,
            Err(CodecError::DimensionMismatch { expected: u64::MAX, actual: 12 })
        ));
    }

    #[test]
    fn decode_image_accepts_large_camera_geometry_under_default_limits() {
        let config = CodecConfig::default();

        assert!(validate_pixel_limits(&config, 8000, 6000).is_ok());
        assert!(validate_pixel_limits(&config, 12_000, 9_000).is_ok());
    }

    #[test]
    fn decode_image_reads_ppm() {
        let mut ppm = b"P6\n2 2\n255\n".to_vec();
        ppm.extend_from_slice(&[255u8, 0, 0].repeat(4));

        let decoded = decode_image(&ppm, &CodecConfig::default()).expect("decode failed");
        assert_eq!(encode_raw(&decoded.image).as_bytes(), ppm[11..].to_vec().as_slice());
    }

    #[test]
    fn decode_raw_rejects_zero_side() {
        assert!(matches!(decode_raw(&[], 0, 4), Err(CodecError::InvalidInput(_))));
    }

    #[test]
    fn swapped_dimensions_succeed_but_scramble() {
        let img = ImageBuffer::from_fn(3, 2, |x, y| Rgb([x as u8, y as u8, 0]));
        let raw = encode_raw(&DynamicImage::ImageRgb8(img.clone()));

        let swapped = decode_raw(raw.as_bytes(), 2, 3).expect("same length must be accepted");

        assert_eq!(swapped.dimensions(), (2, 3));
        assert_eq!(swapped.as_raw(), img.as_raw());
        assert_ne!(swapped.get_pixel(0, 1), img.get_pixel(0, 1));
    }

    #[test]
    fn decode_image_reads_png_and_summarizes() {
        let png = create_png_bytes(40, 30);
        let decoded = decode_image(&png, &CodecConfig::default()).expect("decode failed");
        let summary = summarize(&decoded.image, decoded.format).unwrap();

        assert_eq!(summary.pixel_count, 1200);
        assert_eq!(summary.raw_len, 3600);
        assert_eq!(summary.format, "png");
    }

    #[test]
    fn decode_image_rejects_too_many_pixels() {
        let mut config = CodecConfig::default();
        config.max_decoded_pixels = 100;

        let png = create_png_bytes(20, 20);
        assert!(matches!(
            decode_image(&png, &config),
            Err(CodecError::ResourceLimit(_))
        ));
    }

    #[test]
    fn decode_image_rejects_garbage() {
        let result = decode_image(b"definitely not an image", &CodecConfig::default());
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }

    proptest! {
        #[test]
        fn raw_round_trip_is_identity(
            width in 1u32..16,
            height in 1u32..16,
            seed in any::<u8>(),
        ) {
            let img = ImageBuffer::from_fn(width, height, |x, y| {
                Rgb([seed.wrapping_add(x as u8), seed ^ (y as u8), (x * y) as u8])
            });
            let raw = encode_raw(&DynamicImage::ImageRgb8(img));

            let rebuilt = decode_raw(raw.as_bytes(), width, height).unwrap();
            prop_assert_eq!(rebuilt.as_raw().as_slice(), raw.as_bytes());
        }

        #[test]
        fn any_wrong_length_is_a_mismatch(
            width in 1u32..32,
            height in 1u32..32,
            len in 0usize..4096,
        ) {
            let expected = (width * height * 3) as usize;
            prop_assume!(len != expected);

            let result = decode_raw(&vec![0u8; len], width, height);
            let is_mismatch = matches!(result, Err(CodecError::DimensionMismatch { .. }));
            prop_assert!(is_mismatch);
        }
    }
}
