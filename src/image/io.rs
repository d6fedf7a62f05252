//! I/O helpers for grayscale images, detection overlays and JSON.
//!
//! - `load_grayscale_image`: read a PNG/JPEG/etc. into an owned 8-bit gray buffer.
//! - `save_grayscale_u8`: write any 8-bit view (including a window patch) to a PNG.
//! - `save_annotated`: draw bounding boxes over the input and write an RGB image.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageU8, ImageView};
use crate::types::BoundingBox;
use image::{GrayImage, Luma, Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned 8-bit grayscale buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given tightly packed bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            stride: width,
            data,
        }
    }

    /// Copy a (possibly strided) view into an owned buffer.
    pub fn from_view(view: &ImageU8<'_>) -> Self {
        let mut data = Vec::with_capacity(view.w * view.h);
        for row in view.rows() {
            data.extend_from_slice(row);
        }
        Self::new(view.w, view.h, data)
    }

    pub fn from_gray_image(img: GrayImage) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;
        Self::new(width, height, img.into_raw())
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.stride,
            data: &self.data,
        }
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    Ok(GrayImageU8::from_gray_image(img))
}

/// Save an 8-bit grayscale view to a PNG.
pub fn save_grayscale_u8(view: &ImageU8<'_>, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(view.w as u32, view.h as u32);
    for (y, row) in view.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            out.put_pixel(x as u32, y as u32, Luma([px]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Outline `rect` on an RGB image, clipping to the image extents.
pub fn draw_rectangle(img: &mut RgbImage, rect: &BoundingBox, color: Rgb<u8>) {
    let (w, h) = (img.width() as usize, img.height() as usize);
    if w == 0 || h == 0 {
        return;
    }
    let r = rect.clip(w - 1, h - 1);
    let (x0, y0, x1, y1) = (r.x0 as u32, r.y0 as u32, r.x1 as u32, r.y1 as u32);
    for x in x0..=x1 {
        img.put_pixel(x, y0, color);
        img.put_pixel(x, y1, color);
    }
    for y in y0..=y1 {
        img.put_pixel(x0, y, color);
        img.put_pixel(x1, y, color);
    }
}

/// Write the grayscale input as RGB with every box outlined in green.
pub fn save_annotated(
    gray: &ImageU8<'_>,
    boxes: &[BoundingBox],
    path: &Path,
) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = RgbImage::new(gray.w as u32, gray.h as u32);
    for (y, row) in gray.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            out.put_pixel(x as u32, y as u32, Rgb([px, px, px]));
        }
    }
    for b in boxes {
        draw_rectangle(&mut out, b, Rgb([0, 255, 0]));
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
