use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    /// The input is not a well-formed BMP file of the supported variant.
    #[error("bmp: invalid format: {0}")]
    InvalidFormat(String),

    /// The input is plausible but uses a BMP feature this decoder does not implement.
    #[error("bmp: unsupported feature: {0}")]
    Unsupported(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),

    /// Error from an underlying [`std::io::Read`] source, passed through unchanged.
    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BitmapError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        BitmapError::InvalidFormat(msg.into())
    }

    pub(crate) fn unsupported(msg: impl Into<String>) -> Self {
        BitmapError::Unsupported(msg.into())
    }
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
