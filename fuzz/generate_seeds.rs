#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(offset: u32, width: i32, height: i32, bpp: u16, colors_used: u32) -> Vec<u8> {
    let mut bmp = vec![0u8; 54];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&bpp.to_le_bytes());
    bmp[46..50].copy_from_slice(&colors_used.to_le_bytes());
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x1 24-bit
    let mut bmp = header(54, 1, 1, 24, 0);
    bmp.extend_from_slice(&[0xff, 0x00, 0x00, 0x00]);
    fs::write(format!("{dir}/rgb24_1x1.bmp"), bmp).unwrap();

    // 9x2 1-bit, top-down, default palette
    let mut bmp = header(62, 9, -2, 1, 0);
    bmp.extend_from_slice(&[0, 0, 0, 0, 255, 255, 255, 0]);
    bmp.extend_from_slice(&[0xaa, 0x80, 0, 0, 0x55, 0x00, 0, 0]);
    fs::write(format!("{dir}/pal1_9x2.bmp"), bmp).unwrap();

    // 3x1 4-bit with a 2-entry palette and a gap
    let mut bmp = header(70, 3, 1, 4, 2);
    bmp.extend_from_slice(&[10, 20, 30, 0, 40, 50, 60, 0]);
    bmp.extend_from_slice(&[0; 8]);
    bmp.extend_from_slice(&[0x01, 0x00, 0, 0]);
    fs::write(format!("{dir}/pal4_gap.bmp"), bmp).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/header_only.bin"), header(54, 4, 4, 8, 0)).unwrap();

    println!("Generated seed corpus in {dir}/");
}
