//! # bmpdecode
//!
//! Streaming decoder for uncompressed Windows BMP images.
//!
//! Reads from any forward-only [`ByteSource`]: an in-memory `&[u8]`, or with the
//! `std` feature any [`std::io::Read`] wrapped in [`ReadSource`]. The decoder never
//! seeks and never reads past the last pixel row.
//!
//! ## Supported Files
//!
//! - 14-byte file header followed by the 40-byte `BITMAPINFOHEADER`
//! - 1, 4 and 8 bits per pixel, paletted → [`DecodedImage::Paletted`]
//! - 24 bits per pixel → [`DecodedImage::DirectColor`] (RGBA, alpha 255)
//! - Bottom-up (positive height) and top-down (negative height) row order
//! - Gaps between the palette and the pixel data
//!
//! ## Non-Goals
//!
//! - RLE4/RLE8 compression and V4/V5/OS2 headers (rejected with
//!   [`BitmapError::Unsupported`])
//! - Encoding
//!
//! ## Usage
//!
//! ```no_run
//! use bmpdecode::{DecodedImage, Unstoppable};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! // Probe without decoding
//! let config = bmpdecode::decode_config(&mut &data[..])?;
//! println!("{}x{} {:?}", config.width, config.height, config.color_model);
//!
//! match bmpdecode::decode(&mut &data[..], Unstoppable)? {
//!     DecodedImage::Paletted(img) => println!("{} colors", img.palette().len()),
//!     DecodedImage::DirectColor(img) => println!("{} bytes", img.pixels().len()),
//! }
//! # Ok::<(), bmpdecode::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bmp;
mod error;
mod image;
mod limits;
mod pixel;
mod source;

pub mod format;

mod decode;

// Re-exports
pub use decode::{DecodeRequest, decode, decode_config};
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use image::{DecodedImage, ImageConfig, PalettedImage, RgbaImage};
pub use limits::Limits;
pub use pixel::{ColorModel, PaletteEntry};
#[cfg(feature = "std")]
pub use source::ReadSource;
pub use source::ByteSource;
