use crate::error::BitmapError;
use crate::pixel::ColorModel;

/// Caller-imposed bounds on what a decode may allocate.
///
/// All fields default to `None` (no limit). Checked after the headers are parsed
/// and before any output buffer exists.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the decoded buffer in bytes.
    pub max_memory_bytes: Option<u64>,
}

/// Size of the decoded buffer for a `width` x `height` image in `model`.
///
/// Overflow of the address space is `DimensionsTooLarge`, independent of any limits.
pub(crate) fn output_bytes(
    width: u32,
    height: u32,
    model: ColorModel,
) -> Result<usize, BitmapError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(model.bytes_per_pixel()))
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}

fn exceeded(what: &str, value: u64, max: u64) -> BitmapError {
    BitmapError::LimitExceeded(alloc::format!("{what} {value} exceeds limit {max}"))
}

impl Limits {
    /// Check dimensions and the decoded buffer size against every set bound.
    pub(crate) fn check_output(
        &self,
        width: u32,
        height: u32,
        out_bytes: usize,
    ) -> Result<(), BitmapError> {
        let pixels = u64::from(width) * u64::from(height);
        let checks = [
            ("width", u64::from(width), self.max_width),
            ("height", u64::from(height), self.max_height),
            ("pixel count", pixels, self.max_pixels),
            ("output size", out_bytes as u64, self.max_memory_bytes),
        ];
        for (what, value, max) in checks {
            if let Some(max) = max
                && value > max
            {
                return Err(exceeded(what, value, max));
            }
        }
        Ok(())
    }
}
