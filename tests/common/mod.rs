//! In-memory BMP file builder for tests.

#![allow(dead_code)]

/// Builds a BMP with a 40-byte info header. Fields can be set to invalid values
/// to exercise error paths.
#[derive(Clone, Debug)]
pub struct BmpBuilder {
    pub width: i32,
    pub height: i32,
    pub bit_depth: u16,
    pub compression: u32,
    pub colors_used: u32,
    pub header_size: u32,
    /// Stored palette entries, `[B, G, R, reserved]`.
    pub palette: Vec<[u8; 4]>,
    pub gap: usize,
    /// Replaces the computed pixel data offset.
    pub offset_override: Option<u32>,
    /// Stored rows in file order, unpadded; padding is added by `build`.
    pub rows: Vec<Vec<u8>>,
}

impl BmpBuilder {
    pub fn new(width: i32, height: i32, bit_depth: u16) -> Self {
        Self {
            width,
            height,
            bit_depth,
            compression: 0,
            colors_used: 0,
            header_size: 40,
            palette: Vec::new(),
            gap: 0,
            offset_override: None,
            rows: Vec::new(),
        }
    }

    pub fn palette(mut self, palette: Vec<[u8; 4]>) -> Self {
        self.palette = palette;
        self
    }

    pub fn rows(mut self, rows: Vec<Vec<u8>>) -> Self {
        self.rows = rows;
        self
    }

    pub fn stride(&self) -> usize {
        (self.width.unsigned_abs() as usize * self.bit_depth as usize).div_ceil(32) * 4
    }

    pub fn build(&self) -> Vec<u8> {
        let bitfields = if self.compression == 3 { 12 } else { 0 };
        let offset = self.offset_override.unwrap_or(
            (14 + 40 + bitfields + self.palette.len() * 4 + self.gap) as u32,
        );

        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&0u32.to_le_bytes()); // file size, patched below
        out.extend_from_slice(&0u32.to_le_bytes()); // reserved
        out.extend_from_slice(&offset.to_le_bytes());

        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // planes
        out.extend_from_slice(&self.bit_depth.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // image size
        out.extend_from_slice(&2835u32.to_le_bytes()); // x pixels per meter
        out.extend_from_slice(&2835u32.to_le_bytes()); // y pixels per meter
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // important colors
        assert_eq!(out.len(), 54);

        if bitfields > 0 {
            for mask in [0x00ff_0000u32, 0x0000_ff00, 0x0000_00ff] {
                out.extend_from_slice(&mask.to_le_bytes());
            }
        }
        for entry in &self.palette {
            out.extend_from_slice(entry);
        }
        out.resize(out.len() + self.gap, 0xAA);

        let stride = self.stride();
        for row in &self.rows {
            let mut padded = row.clone();
            padded.resize(stride, 0);
            out.extend_from_slice(&padded);
        }

        let len = out.len() as u32;
        out[2..6].copy_from_slice(&len.to_le_bytes());
        out
    }
}

/// `n` opaque gray entries, entry `i` has all channels equal to `i * 16`.
pub fn gray_palette(n: usize) -> Vec<[u8; 4]> {
    (0..n)
        .map(|i| {
            let v = (i * 16) as u8;
            [v, v, v, 0]
        })
        .collect()
}

/// Deterministic pseudo-random bytes.
pub fn noise_pattern(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}
