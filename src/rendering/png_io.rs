//! PNG decoding for uploads and encoding for exports.

use std::io::Cursor;
use std::path::Path;

use halftone_engine::{HalftoneEngine, SourceImage};

use crate::error::RenderError;
use crate::models::UploadLimits;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Read a PNG from disk, enforcing `limits` before decoding.
pub fn read_png(path: &Path, limits: &UploadLimits) -> Result<SourceImage, RenderError> {
    let size = std::fs::metadata(path)?.len();
    limits.check_file_size(size)?;
    let bytes = std::fs::read(path)?;
    decode_png(&bytes, limits)
}

/// Decode any PNG (palette, grey, 16-bit, with or without alpha) to RGBA8.
///
/// The header is checked against `limits` before the pixel buffer is
/// allocated.
pub fn decode_png(bytes: &[u8], limits: &UploadLimits) -> Result<SourceImage, RenderError> {
    limits.check_file_size(bytes.len() as u64)?;
    if !bytes.starts_with(&PNG_SIGNATURE) {
        return Err(RenderError::UnsupportedFormat);
    }

    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    limits.check_dimensions(width, height)?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    buf.truncate(frame.buffer_size());

    let mut rgba: Vec<u8> = match frame.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        png::ColorType::Indexed => {
            return Err(RenderError::PngDecode(
                "palette was not expanded".to_string(),
            ))
        }
    };

    // Fully transparent pixels carry no color
    for px in rgba.chunks_exact_mut(4).filter(|px| px[3] == 0) {
        px[..3].fill(0);
    }

    tracing::debug!(width, height, color = ?frame.color_type, "Decoded PNG");
    Ok(SourceImage::new(width, height, rgba)?)
}

/// Encode straight-alpha RGBA8 pixels as a PNG.
pub fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgba)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Re-compress with oxipng, keeping the input if optimization fails.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    let options = oxipng::Options {
        strip: oxipng::StripChunks::Safe,
        optimize_alpha: false,
        ..Default::default()
    };
    match oxipng::optimize_from_memory(&png_bytes, &options) {
        Ok(optimized) => {
            tracing::debug!(
                before = png_bytes.len(),
                after = optimized.len(),
                "Optimized PNG"
            );
            optimized
        }
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping original");
            png_bytes
        }
    }
}

/// Flatten the engine's layers and encode them as PNG.
pub fn export_png(engine: &HalftoneEngine, optimize: bool) -> Result<Vec<u8>, RenderError> {
    let rgba = engine.export_rgba().ok_or(RenderError::EmptyCanvas)?;
    let image = engine.image();
    let png_bytes = encode_png(image.width(), image.height(), &rgba)?;
    Ok(if optimize {
        optimize_png(png_bytes)
    } else {
        png_bytes
    })
}
