use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::BitmapError;
use crate::pixel::{ColorModel, PaletteEntry};

/// Zero-filled buffer of `len` bytes, or `DimensionsTooLarge` if the allocator refuses.
pub(crate) fn try_zeroed(len: usize, width: u32, height: u32) -> Result<Vec<u8>, BitmapError> {
    let mut buf = Vec::new();
    if buf.try_reserve_exact(len).is_err() {
        return Err(BitmapError::DimensionsTooLarge { width, height });
    }
    buf.resize(len, 0);
    Ok(buf)
}

/// Dimensions and color model, read without touching palette or pixel bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageConfig {
    pub width: u32,
    pub height: u32,
    /// Bits per pixel as declared in the header. Not validated in config-only reads.
    pub bit_depth: u16,
    pub color_model: ColorModel,
}

/// A decoded BMP image.
///
/// 1-, 4- and 8-bit files decode to [`DecodedImage::Paletted`]; 24-bit files decode
/// to [`DecodedImage::DirectColor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodedImage {
    Paletted(PalettedImage),
    DirectColor(RgbaImage),
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        match self {
            Self::Paletted(img) => img.width,
            Self::DirectColor(img) => img.width,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Paletted(img) => img.height,
            Self::DirectColor(img) => img.height,
        }
    }

    pub fn color_model(&self) -> ColorModel {
        match self {
            Self::Paletted(_) => ColorModel::Indexed,
            Self::DirectColor(_) => ColorModel::Truecolor,
        }
    }

    /// Expand to an RGBA image. Paletted images are looked up through their palette;
    /// direct-color images are cloned.
    pub fn to_rgba8(&self) -> RgbaImage {
        match self {
            Self::Paletted(img) => img.to_rgba8(),
            Self::DirectColor(img) => img.clone(),
        }
    }

    pub fn into_rgba8(self) -> RgbaImage {
        match self {
            Self::Paletted(img) => img.to_rgba8(),
            Self::DirectColor(img) => img,
        }
    }
}

/// Index-per-pixel image with an RGBA palette.
///
/// Every stored index is strictly less than `palette().len()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PalettedImage {
    pub width: u32,
    pub height: u32,
    stride: usize,
    indices: Vec<u8>,
    palette: Vec<PaletteEntry>,
}

impl PalettedImage {
    pub(crate) fn new(
        width: u32,
        height: u32,
        palette: Vec<PaletteEntry>,
    ) -> Result<Self, BitmapError> {
        let stride = width as usize;
        let len = stride
            .checked_mul(height as usize)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            stride,
            indices: try_zeroed(len, width, height)?,
            palette,
        })
    }

    /// Distance in bytes between the starts of consecutive rows (>= width).
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Palette index bytes, row-major with [`Self::stride`] bytes per row.
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn palette(&self) -> &[PaletteEntry] {
        &self.palette
    }

    /// Indices of row `y` (top row is 0).
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.indices[start..start + self.width as usize]
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        &mut self.indices[start..start + self.width as usize]
    }

    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        self.row(y)[x as usize]
    }

    pub fn color_at(&self, x: u32, y: u32) -> PaletteEntry {
        self.palette[usize::from(self.index_at(x, y))]
    }

    pub fn into_parts(self) -> (Vec<u8>, Vec<PaletteEntry>) {
        (self.indices, self.palette)
    }

    pub fn to_rgba8(&self) -> RgbaImage {
        let mut pixels = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        for y in 0..self.height {
            for &idx in self.row(y) {
                pixels.extend_from_slice(&self.palette[usize::from(idx)].to_rgba());
            }
        }
        RgbaImage {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Zero-copy 2D view of the index bytes.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, u8> {
        imgref::ImgRef::new_stride(
            &self.indices,
            self.width as usize,
            self.height as usize,
            self.stride,
        )
    }
}

/// Direct-color image, 4 bytes per pixel in R, G, B, A order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pixels: Vec<u8>,
}

impl RgbaImage {
    pub(crate) fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            pixels: try_zeroed(len, width, height)?,
        })
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Bytes of row `y` (top row is 0).
    pub fn row(&self, y: u32) -> &[u8] {
        let len = self.width as usize * 4;
        let start = y as usize * len;
        &self.pixels[start..start + len]
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let len = self.width as usize * 4;
        let start = y * len;
        &mut self.pixels[start..start + len]
    }

    pub fn pixel_at(&self, x: u32, y: u32) -> [u8; 4] {
        let off = x as usize * 4;
        let row = self.row(y);
        [row[off], row[off + 1], row[off + 2], row[off + 3]]
    }

    /// Reinterpret pixel data as typed RGBA pixels.
    #[cfg(feature = "rgb")]
    pub fn as_pixels(&self) -> &[rgb::RGBA8] {
        self.pixels.as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of RGBA pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::RGBA8> {
        imgref::ImgRef::new(
            self.as_pixels(),
            self.width as usize,
            self.height as usize,
        )
    }
}
