/// Color model of a decoded image.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorModel {
    /// One palette index byte per pixel, colors in a separate palette.
    Indexed,
    /// 4 channels, 8-bit RGBA. Alpha is always 255.
    Truecolor,
}

impl ColorModel {
    /// Bytes per pixel in the decoded buffer for this model.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Indexed => 1,
            Self::Truecolor => 4,
        }
    }
}

/// One entry of a decoded palette, always opaque.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct PaletteEntry {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl PaletteEntry {
    /// Build an opaque entry from a stored `B, G, R, reserved` quad.
    ///
    /// The reserved byte is ignored.
    #[inline]
    pub(crate) fn from_bgrx(quad: &[u8]) -> Self {
        Self {
            red: quad[2],
            green: quad[1],
            blue: quad[0],
            alpha: 255,
        }
    }

    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

#[cfg(feature = "rgb")]
impl From<PaletteEntry> for rgb::RGBA8 {
    fn from(e: PaletteEntry) -> Self {
        rgb::RGBA8::new(e.red, e.green, e.blue, e.alpha)
    }
}
