use enough::Stop;

use crate::error::BitmapError;
use crate::image::{DecodedImage, ImageConfig};
use crate::limits::Limits;
use crate::source::ByteSource;

/// Builder for a single decode call over a byte source.
///
/// ```no_run
/// use bmpdecode::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let image = DecodeRequest::new(&mut &data[..])
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// # Ok::<(), bmpdecode::BitmapError>(())
/// ```
pub struct DecodeRequest<'a, S: ByteSource + ?Sized> {
    source: &'a mut S,
    limits: Option<&'a Limits>,
}

impl<'a, S: ByteSource + ?Sized> DecodeRequest<'a, S> {
    pub fn new(source: &'a mut S) -> Self {
        Self {
            source,
            limits: None,
        }
    }

    /// Check dimensions and output size against `limits` before allocating.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Read only dimensions and color model.
    pub fn config(self) -> Result<ImageConfig, BitmapError> {
        crate::bmp::decode_config(self.source)
    }

    /// Decode the full image.
    pub fn decode(self, stop: impl Stop) -> Result<DecodedImage, BitmapError> {
        crate::bmp::decode(self.source, self.limits, &stop)
    }
}

/// Read a BMP's dimensions and color model without decoding pixel data.
///
/// Only the file header and the first 16 bytes of the info header are
/// interpreted; compression and palette fields are not validated.
pub fn decode_config<S: ByteSource + ?Sized>(source: &mut S) -> Result<ImageConfig, BitmapError> {
    DecodeRequest::new(source).config()
}

/// Decode a BMP image with no resource limits.
pub fn decode<S: ByteSource + ?Sized>(
    source: &mut S,
    stop: impl Stop,
) -> Result<DecodedImage, BitmapError> {
    DecodeRequest::new(source).decode(stop)
}
