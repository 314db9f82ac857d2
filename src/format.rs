//! Format detection table.
//!
//! A registry of decoders keyed on magic byte patterns. `?` in a pattern
//! matches any byte.

use enough::Unstoppable;

use crate::error::BitmapError;
use crate::image::{DecodedImage, ImageConfig};
use crate::source::ByteSource;

pub type DecodeFn = fn(&mut dyn ByteSource) -> Result<DecodedImage, BitmapError>;
pub type DecodeConfigFn = fn(&mut dyn ByteSource) -> Result<ImageConfig, BitmapError>;

/// One registered image format.
#[derive(Clone, Copy, Debug)]
pub struct FormatRegistration {
    pub name: &'static str,
    pub magic: &'static [u8],
    pub decode: DecodeFn,
    pub decode_config: DecodeConfigFn,
}

impl FormatRegistration {
    /// Whether `prefix` starts with this format's magic pattern.
    pub fn matches(&self, prefix: &[u8]) -> bool {
        prefix.len() >= self.magic.len()
            && self
                .magic
                .iter()
                .zip(prefix)
                .all(|(&m, &b)| m == b'?' || m == b)
    }
}

fn decode_bmp_dyn(source: &mut dyn ByteSource) -> Result<DecodedImage, BitmapError> {
    crate::decode(source, Unstoppable)
}

fn decode_bmp_config_dyn(source: &mut dyn ByteSource) -> Result<ImageConfig, BitmapError> {
    crate::decode_config(source)
}

/// BMP: `BM`, 4-byte file size, then the two reserved 16-bit fields, both zero.
pub const BMP: FormatRegistration = FormatRegistration {
    name: "bmp",
    magic: b"BM????\x00\x00\x00\x00",
    decode: decode_bmp_dyn,
    decode_config: decode_bmp_config_dyn,
};

/// All formats this crate registers.
pub static FORMATS: &[FormatRegistration] = &[BMP];

/// Find the registered format whose magic matches the start of `prefix`.
pub fn sniff(prefix: &[u8]) -> Option<&'static FormatRegistration> {
    FORMATS.iter().find(|f| f.matches(prefix))
}
