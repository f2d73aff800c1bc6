//! Synthetic image fixtures shared by the unit tests

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

use crate::raster::data_url::encode_data_url;
use crate::raster::Raster;

pub fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

/// White chart paper with black gridlines every 10 px and a zig-zag trace
pub fn ecg_chart(width: u32, height: u32) -> RgbImage {
    let mut img = solid(width, height, [255, 255, 255]);
    let ink = Rgb([0, 0, 0]);

    for y in (0..height).step_by(10) {
        for x in 0..width {
            img.put_pixel(x, y, ink);
        }
    }
    for x in (0..width).step_by(10) {
        for y in 0..height {
            img.put_pixel(x, y, ink);
        }
    }

    let base = (height / 2).saturating_sub(10);
    let mut prev: Option<u32> = None;
    for x in 0..width {
        let tri = ((x % 20) as i64 - 10).unsigned_abs() as u32 * 2;
        let y = (base + tri).min(height - 1);
        let (lo, hi) = match prev {
            Some(p) => (p.min(y), p.max(y)),
            None => (y, y),
        };
        for yy in lo..=hi {
            img.put_pixel(x, yy, ink);
        }
        prev = Some(y);
    }

    img
}

pub fn png_bytes(img: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img.clone())
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("PNG encoding of an in-memory image");
    bytes
}

pub fn png_data_url(img: &RgbImage) -> String {
    encode_data_url(&png_bytes(img), "image/png")
}

pub fn solid_data_url(width: u32, height: u32, color: [u8; 3]) -> String {
    png_data_url(&solid(width, height, color))
}

pub fn raster_from(img: &RgbImage) -> Raster {
    let rgba = DynamicImage::ImageRgb8(img.clone()).to_rgba8();
    Raster::from_rgba(rgba.width(), rgba.height(), rgba.into_raw()).expect("non-empty fixture")
}
