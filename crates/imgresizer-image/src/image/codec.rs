// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Codec boundary — content sniffing, decoding and per-format encoding on
// top of the `image` crate. Everything here works on in-memory bytes; the
// processor owns the filesystem side.

use std::io::Cursor;

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::{DynamicImage, Frame, ImageDecoder, ImageFormat, ImageReader, ImageResult};
use imgresizer_core::error::{ResizerError, Result};
use imgresizer_core::types::{ImageType, Quality};
use tracing::debug;

/// Map a supported type onto the codec library's format tag.
pub fn codec_format(image_type: ImageType) -> ImageFormat {
    match image_type {
        ImageType::Jpeg => ImageFormat::Jpeg,
        ImageType::Png => ImageFormat::Png,
        ImageType::Gif => ImageFormat::Gif,
    }
}

/// Map a codec format back onto a supported type.
pub fn image_type_of(format: ImageFormat) -> Option<ImageType> {
    match format {
        ImageFormat::Jpeg => Some(ImageType::Jpeg),
        ImageFormat::Png => Some(ImageType::Png),
        ImageFormat::Gif => Some(ImageType::Gif),
        _ => None,
    }
}

/// Identify the encoding of `data` from its magic bytes.
///
/// Unknown data and recognised-but-unsupported formats both fail with
/// `UnsupportedFormat`.
pub fn sniff(data: &[u8]) -> Result<ImageType> {
    let format = image::guess_format(data).map_err(|_| {
        ResizerError::UnsupportedFormat("content is not a recognised image".into())
    })?;
    let image_type = image_type_of(format)
        .ok_or_else(|| ResizerError::UnsupportedFormat(format!("{format:?}")))?;
    debug!(format = image_type.mime_type(), "Sniffed image format");
    Ok(image_type)
}

/// Fail with `DecodeBackendUnavailable` when the codec for `image_type` was
/// compiled out of the `image` build.
pub fn ensure_decoder(image_type: ImageType) -> Result<()> {
    if codec_format(image_type).reading_enabled() {
        Ok(())
    } else {
        Err(ResizerError::DecodeBackendUnavailable(
            image_type.mime_type().into(),
        ))
    }
}

/// Same as [`ensure_decoder`] for the encoding direction.
pub fn ensure_encoder(image_type: ImageType) -> Result<()> {
    if codec_format(image_type).writing_enabled() {
        Ok(())
    } else {
        Err(ResizerError::DecodeBackendUnavailable(
            image_type.mime_type().into(),
        ))
    }
}

/// A decoded image plus whatever EXIF block the container carried.
pub struct Decoded {
    pub image: DynamicImage,
    /// Raw EXIF payload. Kept for callers; never applied to the pixels.
    pub exif: Option<Vec<u8>>,
}

/// Decode `data` as `image_type`.
pub fn decode(data: &[u8], image_type: ImageType) -> ImageResult<Decoded> {
    let mut decoder =
        ImageReader::with_format(Cursor::new(data), codec_format(image_type)).into_decoder()?;
    // A broken EXIF block must not fail the load.
    let exif = decoder.exif_metadata().ok().flatten();
    let image = DynamicImage::from_decoder(decoder)?;
    Ok(Decoded { image, exif })
}

/// Encode `image` as `image_type`, returning the file contents.
///
/// - JPEG uses `quality` directly (0 is raised to the encoder minimum of 1)
///   and drops any alpha channel.
/// - PNG is lossless and keeps the buffer's own colour type, alpha included.
/// - GIF maps `quality` onto the quantiser speed.
pub fn encode(image: &DynamicImage, image_type: ImageType, quality: Quality) -> ImageResult<Vec<u8>> {
    let mut buffer = Vec::new();
    match image_type {
        ImageType::Jpeg => {
            let encoder =
                JpegEncoder::new_with_quality(Cursor::new(&mut buffer), quality.get().max(1));
            image.to_rgb8().write_with_encoder(encoder)?;
        }
        ImageType::Png => {
            let encoder = PngEncoder::new_with_quality(
                Cursor::new(&mut buffer),
                CompressionType::Default,
                PngFilterType::Adaptive,
            );
            image.write_with_encoder(encoder)?;
        }
        ImageType::Gif => {
            // The trailer is written when the encoder drops.
            let mut encoder = GifEncoder::new_with_speed(&mut buffer, gif_speed(quality));
            encoder.encode_frame(Frame::new(image.to_rgba8()))?;
        }
    }
    Ok(buffer)
}

/// Quantiser speed for a quality: 100 maps to 1 (best), 0 to 30 (fastest).
pub fn gif_speed(quality: Quality) -> i32 {
    30 - i32::from(quality.get()) * 29 / i32::from(Quality::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(8, 4, |x, y| {
            Rgba([(x * 30) as u8, (y * 60) as u8, 128, 255])
        }))
    }

    #[test]
    fn sniff_recognises_encoded_output() {
        for ty in ImageType::ALL {
            let bytes = encode(&sample(), ty, Quality::DEFAULT).unwrap();
            assert_eq!(sniff(&bytes).unwrap(), ty);
        }
    }

    #[test]
    fn sniff_rejects_text() {
        let err = sniff(b"just some notes, not a picture").unwrap_err();
        assert!(matches!(err, ResizerError::UnsupportedFormat(_)));
    }

    #[test]
    fn sniff_rejects_known_but_unsupported_format() {
        // BMP magic followed by padding.
        let mut bmp = b"BM".to_vec();
        bmp.extend_from_slice(&[0u8; 64]);
        match sniff(&bmp).unwrap_err() {
            ResizerError::UnsupportedFormat(detail) => assert_eq!(detail, "Bmp"),
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn decode_returns_dimensions() {
        let bytes = encode(&sample(), ImageType::Png, Quality::DEFAULT).unwrap();
        let decoded = decode(&bytes, ImageType::Png).unwrap();
        assert_eq!((decoded.image.width(), decoded.image.height()), (8, 4));
        assert!(decoded.exif.is_none());
    }

    #[test]
    fn decode_rejects_truncated_data() {
        let bytes = encode(&sample(), ImageType::Png, Quality::DEFAULT).unwrap();
        assert!(decode(&bytes[..20], ImageType::Png).is_err());
    }

    #[test]
    fn gif_speed_spans_encoder_range() {
        assert_eq!(gif_speed(Quality::new(100).unwrap()), 1);
        assert_eq!(gif_speed(Quality::new(0).unwrap()), 30);
        assert_eq!(gif_speed(Quality::DEFAULT), 9);
    }

    #[test]
    fn default_build_has_all_codecs() {
        for ty in ImageType::ALL {
            assert!(ensure_decoder(ty).is_ok());
            assert!(ensure_encoder(ty).is_ok());
        }
    }
}
