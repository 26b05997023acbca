//! Loading source images and fitting them onto square icon canvases.

use crate::error::{Error, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageError, ImageFormat, ImageReader, RgbaImage};
use std::io;
use std::path::Path;

//===========================================================================//

/// The formats accepted for source images.
const DECODABLE_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Gif,
    ImageFormat::Tga,
];

/// The filter used to scale a square canvas to its icon size.
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

//===========================================================================//

/// Loads and decodes the image at `path`.  The format is detected from the
/// file contents, falling back to the file extension.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let reader = match ImageReader::open(path) {
        Ok(reader) => reader,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Err(Error::MissingFile(path.to_path_buf()));
        }
        Err(error) => return Err(Error::Io(error)),
    };
    let reader = reader.with_guessed_format()?;
    match reader.format() {
        Some(format) if DECODABLE_FORMATS.contains(&format) => {}
        _ => return Err(Error::UnsupportedFormat),
    }
    let image = reader.decode().map_err(|error| match error {
        ImageError::Unsupported(_) => Error::UnsupportedFormat,
        ImageError::IoError(error)
            if error.kind() != io::ErrorKind::UnexpectedEof =>
        {
            Error::Io(error)
        }
        error => Error::CorruptImage {
            path: path.to_path_buf(),
            detail: error.to_string(),
        },
    })?;
    log::debug!(
        "Loaded {}x{} image from {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(image)
}

/// Copies `image` onto a transparent square canvas whose side is the
/// larger of its two dimensions, centering it along the shorter one.
pub fn square_canvas(image: &DynamicImage) -> RgbaImage {
    let (width, height) = (image.width(), image.height());
    let side = width.max(height);
    let offset_x = if height > width { (height - width) / 2 } else { 0 };
    let offset_y = if width > height { (width - height) / 2 } else { 0 };
    let mut canvas = RgbaImage::new(side, side);
    imageops::replace(
        &mut canvas,
        &image.to_rgba8(),
        offset_x as i64,
        offset_y as i64,
    );
    canvas
}

/// Letterboxes `image` onto a square canvas and scales it to exactly
/// `size` by `size` pixels.
pub fn letterbox(image: &DynamicImage, size: u32) -> RgbaImage {
    let canvas = square_canvas(image);
    if canvas.width() == size {
        return canvas;
    }
    imageops::resize(&canvas, size, size, RESIZE_FILTER)
}

//===========================================================================//


//===========================================================================//
