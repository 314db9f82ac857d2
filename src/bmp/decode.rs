//! BMP decoder for the canonical 40-byte info header.
//!
//! Stages run strictly in order over a forward-only byte source:
//! headers, palette, gap, rows. Each stage fills in more of [`DecodeState`].

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;
use log::{debug, trace};

use super::utils::{expand_1bit, expand_4bit, le_i32, le_u16, le_u32};
use crate::error::BitmapError;
use crate::image::{DecodedImage, PalettedImage, RgbaImage, try_zeroed};
use crate::pixel::PaletteEntry;
use crate::source::ByteSource;

const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;
const BITFIELDS_SEGMENT_SIZE: u32 = 12;
const PALETTE_ENTRY_SIZE: usize = 4;
/// Upper bound on the declared colors-used field.
const MAX_COLORS_USED: u32 = 10_000;
const MAX_DST_PALETTE: usize = 256;

// ── Compression enum ────────────────────────────────────────────────

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub(crate) enum BmpCompression {
    Rgb,
    Rle8,
    Rle4,
    Bitfields,
}

impl BmpCompression {
    fn from_u32(num: u32) -> Option<Self> {
        match num {
            0 => Some(Self::Rgb),
            1 => Some(Self::Rle8),
            2 => Some(Self::Rle4),
            3 => Some(Self::Bitfields),
            _ => None,
        }
    }

    fn code(self) -> u32 {
        match self {
            Self::Rgb => 0,
            Self::Rle8 => 1,
            Self::Rle4 => 2,
            Self::Bitfields => 3,
        }
    }
}

// ── Row formats ─────────────────────────────────────────────────────

/// Pixel encodings the row decoder understands.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub(crate) enum RowFormat {
    OneBit,
    FourBit,
    EightBit,
    TwentyFourBit,
}

impl RowFormat {
    pub(crate) fn from_bit_depth(depth: u16) -> Option<Self> {
        match depth {
            1 => Some(Self::OneBit),
            4 => Some(Self::FourBit),
            8 => Some(Self::EightBit),
            24 => Some(Self::TwentyFourBit),
            _ => None,
        }
    }

    /// Decode one stored row into one output row.
    ///
    /// For indexed formats `dst` holds one index per pixel and every index is
    /// checked against `palette_len`. For 24-bit `dst` is RGBA.
    pub(crate) fn decode_row(
        self,
        src: &[u8],
        dst: &mut [u8],
        palette_len: usize,
    ) -> Result<(), BitmapError> {
        match self {
            Self::OneBit => {
                expand_1bit(src, dst);
                check_indices(dst, palette_len)
            }
            Self::FourBit => {
                expand_4bit(src, dst);
                check_indices(dst, palette_len)
            }
            Self::EightBit => {
                let width = dst.len();
                dst.copy_from_slice(&src[..width]);
                check_indices(dst, palette_len)
            }
            Self::TwentyFourBit => {
                for (bgr, rgba) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
                    rgba.copy_from_slice(&[bgr[2], bgr[1], bgr[0], 255]);
                }
                Ok(())
            }
        }
    }
}

fn check_indices(indices: &[u8], palette_len: usize) -> Result<(), BitmapError> {
    match indices.iter().find(|&&v| usize::from(v) >= palette_len) {
        Some(&v) => Err(BitmapError::format(alloc::format!(
            "palette index out of range ({v} >= {palette_len})"
        ))),
        None => Ok(()),
    }
}

/// Bytes in one stored row: `width * depth` bits rounded up to a multiple of 32.
pub(crate) fn row_stride(width: u32, bit_depth: u16) -> Option<usize> {
    let bits = u64::from(width).checked_mul(u64::from(bit_depth))?;
    let stride = bits.div_ceil(32) * 4;
    usize::try_from(stride).ok()
}

// ── Decoder state ───────────────────────────────────────────────────

/// Everything learned about one file during a single decode call.
pub(crate) struct DecodeState<'s, S: ByteSource + ?Sized> {
    bytes: &'s mut S,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) top_down: bool,
    pub(crate) bit_depth: u16,
    pub(crate) compression: BmpCompression,
    header_size: u32,
    pixel_data_offset: u32,
    bitfields_size: u32,
    src_palette_entries: usize,
    pub(crate) has_dst_palette: bool,
    dst_palette: Vec<PaletteEntry>,
}

impl<'s, S: ByteSource + ?Sized> DecodeState<'s, S> {
    pub(crate) fn new(bytes: &'s mut S) -> Self {
        Self {
            bytes,
            width: 0,
            height: 0,
            top_down: false,
            bit_depth: 0,
            compression: BmpCompression::Rgb,
            header_size: 0,
            pixel_data_offset: 0,
            bitfields_size: 0,
            src_palette_entries: 0,
            has_dst_palette: false,
            dst_palette: Vec::new(),
        }
    }

    /// Read the file header and the info header.
    ///
    /// With `config_only` parsing stops after the bit depth: compression and
    /// colors-used are neither read from the buffer nor validated.
    pub(crate) fn read_headers(&mut self, config_only: bool) -> Result<(), BitmapError> {
        let mut fh = [0u8; (FILE_HEADER_SIZE + 4) as usize];

        // Signature alone first, so a non-BMP stream is rejected after two bytes.
        self.bytes.read_exact(&mut fh[..2])?;
        if &fh[..2] != b"BM" {
            return Err(BitmapError::format("not a BMP file"));
        }
        self.bytes.read_exact(&mut fh[2..])?;

        self.pixel_data_offset = le_u32(&fh, 10);
        self.header_size = le_u32(&fh, 14);

        if self.header_size != INFO_HEADER_SIZE {
            return Err(BitmapError::unsupported(alloc::format!(
                "BMP version (header size {})",
                self.header_size
            )));
        }

        // Offsets below are relative to the start of the info header; the size
        // field itself occupies the first 4 bytes and was already read.
        let mut h = [0u8; INFO_HEADER_SIZE as usize];
        self.bytes.read_exact(&mut h[4..])?;
        self.decode_info_header(&h, config_only)?;

        self.has_dst_palette = (1..=8).contains(&self.bit_depth);

        trace!(
            "bmp header: {}x{} depth={} top_down={} compression={:?} palette_entries={} offset={}",
            self.width,
            self.height,
            self.bit_depth,
            self.top_down,
            self.compression,
            self.src_palette_entries,
            self.pixel_data_offset
        );
        Ok(())
    }

    fn decode_info_header(&mut self, h: &[u8], config_only: bool) -> Result<(), BitmapError> {
        let width = le_i32(h, 4);
        if width < 1 {
            return Err(BitmapError::format(alloc::format!("bad width {width}")));
        }
        self.width = width as u32;

        let height = le_i32(h, 8);
        if height < 0 {
            self.top_down = true;
        }
        // unsigned_abs keeps i32::MIN representable as 2^31.
        self.height = height.unsigned_abs();
        if self.height < 1 {
            return Err(BitmapError::format(alloc::format!("bad height {height}")));
        }

        self.bit_depth = le_u16(h, 14);
        if config_only {
            return Ok(());
        }

        let code = le_u32(h, 16);
        self.compression = BmpCompression::from_u32(code).ok_or_else(|| {
            BitmapError::unsupported(alloc::format!("compression or image type {code}"))
        })?;
        if self.compression == BmpCompression::Bitfields && self.header_size == INFO_HEADER_SIZE {
            self.bitfields_size = BITFIELDS_SEGMENT_SIZE;
        }

        let colors_used = le_u32(h, 32);
        if colors_used > MAX_COLORS_USED {
            return Err(BitmapError::format(alloc::format!(
                "bad palette size {colors_used}"
            )));
        }

        self.src_palette_entries = if (1..=8).contains(&self.bit_depth) && colors_used == 0 {
            1usize << self.bit_depth
        } else {
            colors_used as usize
        };
        Ok(())
    }

    /// Consume the stored palette and build the destination palette.
    ///
    /// Images without a destination palette still have their palette bytes
    /// consumed so the stream stays positioned correctly.
    pub(crate) fn read_palette(&mut self) -> Result<(), BitmapError> {
        let mut raw = vec![0u8; self.src_palette_entries * PALETTE_ENTRY_SIZE];
        self.bytes.read_exact(&mut raw)?;

        if !self.has_dst_palette {
            debug!(
                "bmp: discarding {} palette entries of a {}-bit image",
                self.src_palette_entries, self.bit_depth
            );
            self.dst_palette.clear();
            return Ok(());
        }

        let entries = self.src_palette_entries.min(MAX_DST_PALETTE);
        self.dst_palette = raw
            .chunks_exact(PALETTE_ENTRY_SIZE)
            .take(entries)
            .map(PaletteEntry::from_bgrx)
            .collect();
        trace!("bmp palette: {} entries", self.dst_palette.len());
        Ok(())
    }

    /// Offset the pixel data would start at if there were no gap.
    fn computed_offset(&self) -> u64 {
        u64::from(FILE_HEADER_SIZE)
            + u64::from(self.header_size)
            + u64::from(self.bitfields_size)
            + (self.src_palette_entries * PALETTE_ENTRY_SIZE) as u64
    }

    /// Skip any padding between the palette and the declared pixel data offset.
    pub(crate) fn skip_gap(&mut self) -> Result<(), BitmapError> {
        let current = self.computed_offset();
        let declared = u64::from(self.pixel_data_offset);

        if current > declared {
            return Err(BitmapError::format("bad pixel-data-offset field"));
        }
        if current < declared {
            trace!("bmp: skipping {} gap bytes", declared - current);
            self.bytes.skip(declared - current)?;
        }
        Ok(())
    }

    /// Allocate the output image for the representation fixed by the headers.
    pub(crate) fn allocate_image(&mut self) -> Result<DecodedImage, BitmapError> {
        if self.has_dst_palette {
            let palette = core::mem::take(&mut self.dst_palette);
            let image = PalettedImage::new(self.width, self.height, palette)?;
            Ok(DecodedImage::Paletted(image))
        } else {
            let image = RgbaImage::new(self.width, self.height)?;
            Ok(DecodedImage::DirectColor(image))
        }
    }

    /// Read `height` rows and decode each into its output row.
    pub(crate) fn read_rows(
        &mut self,
        format: RowFormat,
        image: &mut DecodedImage,
        stop: &dyn Stop,
    ) -> Result<(), BitmapError> {
        let stride = row_stride(self.width, self.bit_depth).ok_or(
            BitmapError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            },
        )?;
        let mut row = try_zeroed(stride, self.width, self.height)?;
        let height = self.height as usize;

        for src_row in 0..height {
            if src_row % 16 == 0 {
                stop.check()?;
            }
            let dst_row = if self.top_down {
                src_row
            } else {
                height - 1 - src_row
            };

            self.bytes.read_exact(&mut row)?;
            match image {
                DecodedImage::Paletted(img) => {
                    let palette_len = img.palette().len();
                    format.decode_row(&row, img.row_mut(dst_row), palette_len)?;
                }
                DecodedImage::DirectColor(img) => {
                    format.decode_row(&row, img.row_mut(dst_row), 0)?;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn src_palette_entries(&self) -> usize {
        self.src_palette_entries
    }

    pub(crate) fn compression_code(&self) -> u32 {
        self.compression.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_32_bit_aligned() {
        assert_eq!(row_stride(1, 1), Some(4));
        assert_eq!(row_stride(33, 1), Some(8));
        assert_eq!(row_stride(3, 4), Some(4));
        assert_eq!(row_stride(9, 4), Some(8));
        assert_eq!(row_stride(5, 8), Some(8));
        assert_eq!(row_stride(2, 24), Some(8));
        assert_eq!(row_stride(4, 24), Some(12));
    }

    #[test]
    fn eight_bit_row_rejects_index_past_palette() {
        let mut dst = [0u8; 3];
        let err = RowFormat::EightBit
            .decode_row(&[0, 1, 2, 0], &mut dst, 2)
            .unwrap_err();
        match err {
            BitmapError::InvalidFormat(msg) => assert!(msg.contains("palette index out of range")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn twenty_four_bit_row_swizzles_and_sets_alpha() {
        let mut dst = [0u8; 8];
        RowFormat::TwentyFourBit
            .decode_row(&[1, 2, 3, 4, 5, 6, 0, 0], &mut dst, 0)
            .unwrap();
        assert_eq!(dst, [3, 2, 1, 255, 6, 5, 4, 255]);
    }

    #[test]
    fn four_bit_row_uses_high_nibble_first() {
        let mut dst = [0u8; 3];
        RowFormat::FourBit
            .decode_row(&[0x10, 0x20, 0, 0], &mut dst, 16)
            .unwrap();
        assert_eq!(dst, [1, 0, 2]);
    }

    #[test]
    fn unsupported_depths_have_no_row_format() {
        for depth in [0u16, 2, 16, 32] {
            assert_eq!(RowFormat::from_bit_depth(depth), None);
        }
    }
}
