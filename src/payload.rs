use image::RgbaImage;
use std::io::{self, Write};

//===========================================================================//

/// The bits-per-pixel of every payload written by [`encode_png`].
pub(crate) const PNG_BITS_PER_PIXEL: u16 = 32;

//===========================================================================//

/// Encodes an RGBA image as an 8-bit-per-channel PNG, for embedding in an
/// ICO file.  Returns an error if the image can't be encoded.
pub fn encode_png(image: &RgbaImage) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    write_png(image, &mut data)?;
    Ok(data)
}

fn write_png<W: Write>(image: &RgbaImage, writer: W) -> io::Result<()> {
    match write_png_enc(image, writer) {
        Ok(()) => Ok(()),
        Err(png::EncodingError::IoError(error)) => Err(error),
        Err(png::EncodingError::Format(error)) => {
            invalid_input!("PNG format error: {}", error);
        }
        Err(png::EncodingError::LimitsExceeded) => {
            invalid_input!("PNG limits exceeded");
        }
        Err(png::EncodingError::Parameter(error)) => {
            invalid_input!("PNG parameter error: {}", error);
        }
    }
}

fn write_png_enc<W: Write>(
    image: &RgbaImage,
    writer: W,
) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()
}

//===========================================================================//


//===========================================================================//
