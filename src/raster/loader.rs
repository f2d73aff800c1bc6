/// Raster loader
///
/// Turns an uploaded image into an RGBA pixel buffer. Decoding sits behind the
/// `ImageDecoder` trait so the heuristics run the same against the `image`
/// crate, an in-memory test decoder, or anything else that yields RGBA.

use image::{DynamicImage, ImageDecoder as _, ImageReader, Rgba, RgbaImage};
use std::io::Cursor;
use tracing::debug;

use super::data_url::decode_data_url;
use crate::color::Rgb;
use crate::error::DecodeError;

/// Decoded image as a packed RGBA buffer (4 bytes per pixel, row-major)
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Raster {
    /// Wrap an RGBA buffer
    ///
    /// A zero-area image or a buffer of the wrong length has nothing to draw
    /// on, which is a context failure rather than a load failure.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, DecodeError> {
        let pixels = width as usize * height as usize;
        if pixels == 0 {
            return Err(DecodeError::Context(format!("empty image {}x{}", width, height)));
        }
        if rgba.len() != pixels * 4 {
            return Err(DecodeError::Context(format!(
                "buffer holds {} bytes, expected {} for {}x{}",
                rgba.len(),
                pixels * 4,
                width,
                height
            )));
        }
        Ok(Self { width, height, rgba })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels (never zero)
    pub fn pixel_count(&self) -> usize {
        self.rgba.len() / 4
    }

    /// Pixel at a linear index, if in bounds
    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        let start = index.checked_mul(4)?;
        let quad: [u8; 4] = self.rgba.get(start..start.checked_add(4)?)?.try_into().ok()?;
        Some(Rgb::from_rgba(quad))
    }

    /// (x, y) position of a linear index
    pub fn position(&self, index: usize) -> (usize, usize) {
        let w = self.width as usize;
        (index % w, index / w)
    }
}

/// Capability to decode image bytes into a raster
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<Raster, DecodeError>;
}

/// Decoder backed by the `image` crate (PNG, JPEG, GIF, WebP, BMP, ...)
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Raster, DecodeError> {
        let mut decoder = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| DecodeError::Load(e.to_string()))?
            .into_decoder()
            .map_err(|e| DecodeError::Load(e.to_string()))?;
        // Missing or unreadable EXIF leaves the image as stored
        let orientation = decoder.orientation().ok();

        let mut img = DynamicImage::from_decoder(decoder)
            .map_err(|e| DecodeError::Load(e.to_string()))?;
        if let Some(orientation) = orientation {
            img.apply_orientation(orientation);
        }

        let mut rgba = img.to_rgba8();
        clear_transparent(&mut rgba);
        Raster::from_rgba(rgba.width(), rgba.height(), rgba.into_raw())
    }
}

/// Fully transparent pixels read back as transparent black, like a canvas
fn clear_transparent(rgba: &mut RgbaImage) {
    for px in rgba.pixels_mut().filter(|px| px[3] == 0) {
        *px = Rgba([0, 0, 0, 0]);
    }
}

/// Load a raster from a data URL (blocking)
pub fn load_raster(decoder: &dyn ImageDecoder, data_url: &str) -> Result<Raster, DecodeError> {
    let bytes = decode_data_url(data_url)?;
    let raster = decoder.decode(&bytes)?;

    debug!(
        width = raster.width(),
        height = raster.height(),
        "decoded image ({} pixels)",
        raster.pixel_count()
    );

    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::data_url::encode_data_url;
    use crate::testutil;

    #[test]
    fn test_raster_rejects_empty_and_mismatched_buffers() {
        assert!(matches!(Raster::from_rgba(0, 10, vec![]), Err(DecodeError::Context(_))));
        assert!(matches!(Raster::from_rgba(2, 2, vec![0; 15]), Err(DecodeError::Context(_))));
    }

    #[test]
    fn test_pixel_and_position() {
        let mut rgba = vec![0u8; 3 * 2 * 4];
        rgba[4 * 4..4 * 4 + 4].copy_from_slice(&[10, 20, 30, 255]);
        let raster = Raster::from_rgba(3, 2, rgba).unwrap();

        assert_eq!(raster.pixel_count(), 6);
        assert_eq!(raster.pixel(4), Some(Rgb::new(10, 20, 30)));
        assert_eq!(raster.position(4), (1, 1));
        assert_eq!(raster.pixel(6), None);
    }

    #[test]
    fn test_load_png_data_url() {
        let url = testutil::solid_data_url(8, 4, [40, 80, 120]);
        let raster = load_raster(&ImageCrateDecoder, &url).unwrap();

        assert_eq!((raster.width(), raster.height()), (8, 4));
        assert_eq!(raster.pixel(31), Some(Rgb::new(40, 80, 120)));
    }

    #[test]
    fn test_transparent_pixels_read_as_black() {
        let mut img = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 0]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 128]));

        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        let url = encode_data_url(&bytes, "image/png");
        let raster = load_raster(&ImageCrateDecoder, &url).unwrap();

        assert_eq!(raster.pixel(0), Some(Rgb::new(0, 0, 0)));
        assert_eq!(raster.pixel(1), Some(Rgb::new(255, 255, 255)));
        assert_eq!(raster.pixel(64 * 64 - 1), Some(Rgb::new(0, 0, 0)));
    }

    /// JPEG with an APP1 segment carrying a single big-endian orientation tag
    fn jpeg_with_orientation(img: &RgbaImage, orientation: u8) -> Vec<u8> {
        let mut jpeg = Vec::new();
        DynamicImage::ImageRgba8(img.clone())
            .to_rgb8()
            .write_to(&mut Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
            .unwrap();

        let mut exif = b"Exif\0\0MM\0\x2a\0\0\0\x08\0\x01".to_vec();
        exif.extend_from_slice(&[0x01, 0x12, 0, 3, 0, 0, 0, 1, 0, orientation, 0, 0]);
        exif.extend_from_slice(&[0, 0, 0, 0]);

        let mut app1 = vec![0xFF, 0xE1];
        app1.extend_from_slice(&(exif.len() as u16 + 2).to_be_bytes());
        app1.extend_from_slice(&exif);

        // right after the SOI marker
        jpeg.splice(2..2, app1);
        jpeg
    }

    #[test]
    fn test_exif_orientation_is_applied() {
        let img = RgbaImage::from_pixel(48, 16, Rgba([255, 255, 255, 255]));

        let upright = encode_data_url(&jpeg_with_orientation(&img, 1), "image/jpeg");
        let raster = load_raster(&ImageCrateDecoder, &upright).unwrap();
        assert_eq!((raster.width(), raster.height()), (48, 16));

        // 6: rotate 90 degrees clockwise
        let rotated = encode_data_url(&jpeg_with_orientation(&img, 6), "image/jpeg");
        let raster = load_raster(&ImageCrateDecoder, &rotated).unwrap();
        assert_eq!((raster.width(), raster.height()), (16, 48));
    }

    #[test]
    fn test_load_garbage_is_load_failure() {
        let url = encode_data_url(b"definitely not an image", "image/png");
        assert!(matches!(load_raster(&ImageCrateDecoder, &url), Err(DecodeError::Load(_))));
    }
}
