//! Sweep tests: many widths, heights and depths with noise pixel data.

mod common;

use bmpdecode::*;
use common::{BmpBuilder, gray_palette, noise_pattern};

/// Straightforward per-pixel reading of a stored row, for comparison.
fn reference_index(row: &[u8], depth: u16, x: usize) -> u8 {
    match depth {
        1 => (row[x / 8] >> (7 - x % 8)) & 1,
        4 => {
            if x % 2 == 0 {
                row[x / 2] >> 4
            } else {
                row[x / 2] & 0x0f
            }
        }
        8 => row[x],
        _ => unreachable!(),
    }
}

fn noise_file(width: i32, height: i32, depth: u16, seed: u32) -> (Vec<u8>, Vec<Vec<u8>>) {
    let builder = BmpBuilder::new(width, height, depth);
    let stride = builder.stride();
    let rows: Vec<Vec<u8>> = (0..height.unsigned_abs())
        .map(|y| noise_pattern(stride, seed ^ (y + 1).wrapping_mul(0x9E37_79B9)))
        .collect();
    let palette = if depth <= 8 {
        gray_palette(1 << depth)
    } else {
        Vec::new()
    };
    let data = builder.palette(palette).rows(rows.clone()).build();
    (data, rows)
}

#[test]
fn indexed_sweep_matches_reference() {
    for depth in [1u16, 4, 8] {
        for width in 1..=19 {
            for height in [1, 2, 7] {
                let (data, rows) = noise_file(width, height, depth, 0xDEAD_BEEF);
                let DecodedImage::Paletted(img) = decode(&mut &data[..], Unstoppable).unwrap()
                else {
                    panic!("depth {depth} must be paletted");
                };
                assert_eq!(img.palette().len(), 1 << depth);

                for (k, stored) in rows.iter().enumerate() {
                    let y = height as usize - 1 - k;
                    for x in 0..width as usize {
                        assert_eq!(
                            img.index_at(x as u32, y as u32),
                            reference_index(stored, depth, x),
                            "depth {depth} {width}x{height} at ({x},{y})"
                        );
                    }
                }
                assert!(
                    img.indices()
                        .iter()
                        .all(|&i| usize::from(i) < img.palette().len())
                );
            }
        }
    }
}

#[test]
fn truecolor_sweep_matches_reference() {
    for width in 1..=9 {
        for height in [1, 3, -3] {
            let (data, rows) = noise_file(width, height, 24, 0xCAFE_BABE);
            let img = decode(&mut &data[..], Unstoppable).unwrap().into_rgba8();
            let h = height.unsigned_abs() as usize;

            for (k, stored) in rows.iter().enumerate() {
                let y = if height < 0 { k } else { h - 1 - k };
                for x in 0..width as usize {
                    let bgr = &stored[x * 3..x * 3 + 3];
                    assert_eq!(
                        img.pixel_at(x as u32, y as u32),
                        [bgr[2], bgr[1], bgr[0], 255],
                        "{width}x{height} at ({x},{y})"
                    );
                }
            }
        }
    }
}

#[test]
fn config_agrees_with_decode() {
    for (depth, model) in [
        (1u16, ColorModel::Indexed),
        (4, ColorModel::Indexed),
        (8, ColorModel::Indexed),
        (24, ColorModel::Truecolor),
    ] {
        for (width, height) in [(1, 1), (13, -4), (32, 9)] {
            let (data, _) = noise_file(width, height, depth, 42);
            let config = decode_config(&mut &data[..]).unwrap();
            let image = decode(&mut &data[..], Unstoppable).unwrap();
            assert_eq!(config.width, image.width());
            assert_eq!(config.height, image.height());
            assert_eq!(config.bit_depth, depth);
            assert_eq!(config.color_model, model);
            assert_eq!(image.color_model(), model);
        }
    }
}

#[test]
fn paletted_expands_through_palette() {
    let (data, _) = noise_file(6, 3, 4, 7);
    let image = decode(&mut &data[..], Unstoppable).unwrap();
    let DecodedImage::Paletted(ref indexed) = image else {
        panic!("expected paletted");
    };
    let rgba = image.to_rgba8();
    for y in 0..3 {
        for x in 0..6 {
            assert_eq!(rgba.pixel_at(x, y), indexed.color_at(x, y).to_rgba());
        }
    }
}

#[test]
fn truncated_files_never_panic() {
    let (data, _) = noise_file(5, 4, 4, 99);
    for len in 0..data.len() {
        let prefix = &data[..len];
        assert!(decode(&mut &prefix[..], Unstoppable).is_err(), "len {len}");
        // Config reads exactly the 54 header bytes.
        assert_eq!(decode_config(&mut &prefix[..]).is_ok(), len >= 54, "len {len}");
    }
}
