//! Little-endian field access and sub-byte index unpacking.

#[inline]
pub(crate) fn le_u16(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

#[inline]
pub(crate) fn le_u32(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

#[inline]
pub(crate) fn le_i32(b: &[u8], at: usize) -> i32 {
    le_u32(b, at) as i32
}

/// Unpack 1-bit palette indices, most significant bit first.
///
/// Fills all of `out`; `input` must hold at least `ceil(out.len() / 8)` bytes.
/// Trailing bits of the last input byte are ignored.
pub(crate) fn expand_1bit(input: &[u8], out: &mut [u8]) {
    let mut in_iter = input.iter();
    let mut out_iter = out.chunks_exact_mut(8);

    (&mut out_iter)
        .zip(&mut in_iter)
        .for_each(|(out_vals, &in_val)| {
            for (pos, v) in out_vals.iter_mut().enumerate() {
                *v = (in_val >> (7 - pos)) & 0x01;
            }
        });

    if let Some(&in_val) = in_iter.next() {
        for (pos, v) in out_iter.into_remainder().iter_mut().enumerate() {
            *v = (in_val >> (7 - pos)) & 0x01;
        }
    }
}

/// Unpack 4-bit palette indices, high nibble first.
///
/// Fills all of `out`; `input` must hold at least `ceil(out.len() / 2)` bytes.
pub(crate) fn expand_4bit(input: &[u8], out: &mut [u8]) {
    let mut in_iter = input.iter();
    let mut out_iter = out.chunks_exact_mut(2);

    (&mut out_iter)
        .zip(&mut in_iter)
        .for_each(|(out_vals, &in_val)| {
            out_vals[0] = in_val >> 4;
            out_vals[1] = in_val & 0x0f;
        });

    if let Some(&in_val) = in_iter.next()
        && let Some(last) = out_iter.into_remainder().first_mut()
    {
        *last = in_val >> 4;
    }
}
