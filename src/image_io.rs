// src/image_io.rs

//! PNG loading and saving for pixel surfaces.
//!
//! Every decoded image is normalized to 8-bit RGBA: palettes and low bit
//! depths are expanded, 16-bit channels are stripped to 8 bits, opaque
//! formats get alpha 255 and grayscale is replicated into all three color
//! channels.

use crate::color::Color;
use crate::error::{RenderError, Result};
use crate::surface::PixelSurface;
use log::{debug, info};
use std::path::Path;

/// Decodes a PNG image held in memory.
pub fn load_image_mem(bytes: &[u8]) -> Result<PixelSurface> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;

    let too_large = || RenderError::ResourceExhausted {
        width: i32::MAX,
        height: i32::MAX,
    };
    let width = i32::try_from(info.width).map_err(|_| too_large())?;
    let height = i32::try_from(info.height).map_err(|_| too_large())?;

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(RenderError::UnsupportedFormat(
                "indexed image was not expanded".to_string(),
            ))
        }
    };
    if info.bit_depth != png::BitDepth::Eight {
        return Err(RenderError::UnsupportedFormat(format!(
            "unsupported bit depth {:?} after expansion",
            info.bit_depth
        )));
    }

    let row_bytes = width as usize * channels;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for row in buf.chunks(info.line_size).take(height as usize) {
        pixels.extend(row[..row_bytes].chunks_exact(channels).map(|px| match px {
            [v] => Color::rgb(*v, *v, *v),
            [v, a] => Color::rgba(*v, *v, *v, *a),
            [r, g, b] => Color::rgb(*r, *g, *b),
            [r, g, b, a] => Color::rgba(*r, *g, *b, *a),
            _ => Color::TRANSPARENT,
        }));
    }

    debug!(
        "Decoded {}x{} PNG ({:?}, {} bytes)",
        width,
        height,
        info.color_type,
        bytes.len()
    );
    PixelSurface::from_pixels(width, height, pixels)
}

/// Reads and decodes a PNG file.
pub fn load_image_file<P: AsRef<Path>>(path: P) -> Result<PixelSurface> {
    let bytes = std::fs::read(path.as_ref())?;
    load_image_mem(&bytes)
}

/// Encodes a surface as an 8-bit RGBA PNG.
pub fn encode_png(surface: &PixelSurface) -> Result<Vec<u8>> {
    let data: Vec<u8> = surface
        .pixels()
        .iter()
        .flat_map(|c| c.to_bytes())
        .collect();

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, surface.width() as u32, surface.height() as u32);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
        writer.finish()?;
    }
    Ok(out)
}

/// Writes a surface to `path` as a PNG file.
pub fn save_image<P: AsRef<Path>>(surface: &PixelSurface, path: P) -> Result<()> {
    let bytes = encode_png(surface)?;
    std::fs::write(path.as_ref(), &bytes)?;
    info!(
        "Saved {}x{} image to {}",
        surface.width(),
        surface.height(),
        path.as_ref().display()
    );
    Ok(())
}

/// Copies a surface with every pixel made fully opaque, which is what the
/// window shows.
pub fn screenshot(surface: &PixelSurface) -> PixelSurface {
    let mut shot = surface.clone();
    for px in shot.pixels_mut() {
        px.a = 0xff;
    }
    shot
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn encode_raw(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
            writer.finish().unwrap();
        }
        out
    }

    fn sample_surface() -> PixelSurface {
        let mut s = PixelSurface::new(3, 2).unwrap();
        s.set(0, 0, Color::RED);
        s.set(1, 0, Color::rgba(10, 20, 30, 40));
        s.set(2, 1, Color::rgba(1, 2, 3, 0));
        s
    }

    #[test]
    fn png_round_trip_preserves_pixels() {
        let s = sample_surface();
        let bytes = encode_png(&s).unwrap();
        assert_eq!(load_image_mem(&bytes).unwrap(), s);
    }

    #[test]
    fn rgb_gets_opaque_alpha() {
        let bytes = encode_raw(2, 1, png::ColorType::Rgb, &[1, 2, 3, 4, 5, 6]);
        let img = load_image_mem(&bytes).unwrap();
        assert_eq!(img.get(0, 0), Some(Color::rgb(1, 2, 3)));
        assert_eq!(img.get(1, 0), Some(Color::rgb(4, 5, 6)));
    }

    #[test]
    fn grayscale_is_expanded() {
        let bytes = encode_raw(1, 1, png::ColorType::GrayscaleAlpha, &[77, 128]);
        let img = load_image_mem(&bytes).unwrap();
        assert_eq!(img.get(0, 0), Some(Color::rgba(77, 77, 77, 128)));

        let bytes = encode_raw(1, 1, png::ColorType::Grayscale, &[200]);
        let img = load_image_mem(&bytes).unwrap();
        assert_eq!(img.get(0, 0), Some(Color::rgb(200, 200, 200)));
    }

    #[test]
    fn malformed_bytes_are_a_decode_error() {
        assert!(matches!(
            load_image_mem(b"definitely not a png"),
            Err(RenderError::Decode(_))
        ));
        assert!(matches!(load_image_mem(&[]), Err(RenderError::Decode(_))));

        let mut truncated = encode_png(&sample_surface()).unwrap();
        truncated.truncate(truncated.len() / 2);
        assert!(matches!(load_image_mem(&truncated), Err(RenderError::Decode(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load_image_file("/nonexistent/blink/cat.png"),
            Err(RenderError::Io(_))
        ));
    }

    #[test]
    fn save_then_load_file() {
        let path = std::env::temp_dir().join(format!("blink-image-io-{}.png", std::process::id()));
        let s = sample_surface();
        save_image(&s, &path).unwrap();
        let loaded = load_image_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, s);
    }

    #[test]
    fn screenshot_forces_opaque_alpha() {
        let shot = screenshot(&sample_surface());
        assert!(shot.pixels().iter().all(|p| p.a == 0xff));
        assert_eq!(shot.get(1, 0), Some(Color::rgb(10, 20, 30)));
        assert_eq!(shot.get(1, 1), Some(Color::BLACK));
    }
}
