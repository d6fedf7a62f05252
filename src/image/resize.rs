//! Bicubic resampling used to build the scale levels.
use super::io::GrayImageU8;
use super::{ImageU8, ImageView};
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};

/// Resize a grayscale view to `new_w × new_h` with a Catmull-Rom (cubic)
/// kernel.
pub fn resize_u8(src: &ImageU8<'_>, new_w: usize, new_h: usize) -> GrayImageU8 {
    if new_w == src.w && new_h == src.h {
        return GrayImageU8::from_view(src);
    }
    let mut tmp = GrayImage::new(src.w as u32, src.h as u32);
    for (y, row) in src.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            tmp.put_pixel(x as u32, y as u32, Luma([px]));
        }
    }
    let out = imageops::resize(&tmp, new_w as u32, new_h as u32, FilterType::CatmullRom);
    GrayImageU8::from_gray_image(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_size_is_a_copy() {
        let buf: Vec<u8> = (0..12).collect();
        let img = ImageU8::packed(4, 3, &buf);
        let out = resize_u8(&img, 4, 3);
        assert_eq!(out.into_raw(), buf);
    }

    #[test]
    fn downscale_produces_requested_size() {
        let buf = vec![128u8; 100 * 60];
        let img = ImageU8::packed(100, 60, &buf);
        let out = resize_u8(&img, 50, 30);
        assert_eq!((out.width(), out.height()), (50, 30));
        assert!(out
            .as_view()
            .rows()
            .all(|r| r.iter().all(|&v| v.abs_diff(128) <= 1)));
    }
}
