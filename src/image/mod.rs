pub mod f32;
pub mod io;
pub mod resize;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::io::{
    draw_rectangle, load_grayscale_image, save_annotated, save_grayscale_u8, write_json_file,
    GrayImageU8,
};
pub use self::resize::resize_u8;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
