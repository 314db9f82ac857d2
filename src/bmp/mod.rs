//! BMP decode pipeline (internal).
//!
//! Use top-level [`crate::decode`], [`crate::decode_config`] or [`crate::DecodeRequest`].

mod decode;
mod utils;

use crate::error::BitmapError;
use crate::image::{DecodedImage, ImageConfig};
use crate::limits::{Limits, output_bytes};
use crate::pixel::ColorModel;
use crate::source::ByteSource;
use decode::{BmpCompression, DecodeState, RowFormat};
use enough::Stop;

/// Read dimensions and color model. Palette and pixel bytes are never read.
pub(crate) fn decode_config<S: ByteSource + ?Sized>(
    source: &mut S,
) -> Result<ImageConfig, BitmapError> {
    let mut dec = DecodeState::new(source);
    dec.read_headers(true)?;

    Ok(ImageConfig {
        width: dec.width,
        height: dec.height,
        bit_depth: dec.bit_depth,
        color_model: if dec.has_dst_palette {
            ColorModel::Indexed
        } else {
            ColorModel::Truecolor
        },
    })
}

/// Decode a whole image.
pub(crate) fn decode<S: ByteSource + ?Sized>(
    source: &mut S,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodedImage, BitmapError> {
    let mut dec = DecodeState::new(source);
    dec.read_headers(false)?;

    if dec.compression != BmpCompression::Rgb {
        return Err(BitmapError::unsupported(alloc::format!(
            "compression or image type {}",
            dec.compression_code()
        )));
    }
    let format = RowFormat::from_bit_depth(dec.bit_depth).ok_or_else(|| {
        BitmapError::unsupported(alloc::format!("bit count {}", dec.bit_depth))
    })?;

    if dec.src_palette_entries() > 0 {
        dec.read_palette()?;
    }

    let model = if dec.has_dst_palette {
        ColorModel::Indexed
    } else {
        ColorModel::Truecolor
    };
    let out_bytes = output_bytes(dec.width, dec.height, model)?;
    if let Some(limits) = limits {
        limits.check_output(dec.width, dec.height, out_bytes)?;
    }
    stop.check()?;
    let mut image = dec.allocate_image()?;

    dec.skip_gap()?;
    dec.read_rows(format, &mut image, stop)?;
    Ok(image)
}
