//! TGA decoder regression test
//!
//! Tests read_tga for uncompressed, RLE, grayscale and 16-bpp streams,
//! row-order handling, and the failure modes for unsupported or short
//! input.

use uvmask_io::{IoError, TgaWriteOptions, read_tga, read_tga_header, write_tga};
use uvmask_test::RegParams;
use uvmask_test::fixtures::tga_stream;

#[test]
fn tga_reg() {
    let mut rp = RegParams::new("tga");

    // Test 1: 2x2 32-bpp top-down, BGRA in file order
    let body = [
        10, 20, 30, 40, //
        50, 60, 70, 80, //
        90, 100, 110, 120, //
        130, 140, 150, 160,
    ];
    let data = tga_stream(2, 2, 2, 32, 0x20, &body);
    let raster = read_tga(&data).expect("decode 32-bpp");
    let expected: Vec<u8> = vec![
        30, 20, 10, 40, //
        70, 60, 50, 80, //
        110, 100, 90, 120, //
        150, 140, 130, 160,
    ];
    rp.compare_bytes(&expected, raster.pixels());

    // Test 2: RLE repeat packet 0x83 (4 pixels) of one BGR triple
    let data = tga_stream(10, 2, 2, 24, 0x20, &[0x83, 5, 6, 7]);
    let raster = read_tga(&data).expect("decode RLE");
    for (_, _, px) in raster.iter_pixels() {
        rp.compare_bytes(&[7, 6, 5, 255], &px);
    }

    // Test 3: bottom-up rows are flipped
    let body = [1, 1, 1, 2, 2, 2];
    let data = tga_stream(2, 1, 2, 24, 0x00, &body);
    let raster = read_tga(&data).expect("decode bottom-up");
    rp.compare_bytes(&[2, 2, 2, 255], &raster.get_rgba(0, 0).unwrap_or_default());
    rp.compare_bytes(&[1, 1, 1, 255], &raster.get_rgba(0, 1).unwrap_or_default());

    // Test 4: grayscale type 3
    let data = tga_stream(3, 3, 1, 8, 0x20, &[0, 128, 255]);
    let raster = read_tga(&data).expect("decode grayscale");
    rp.compare_bytes(&[128, 128, 128, 255], &raster.get_rgba(1, 0).unwrap_or_default());

    // Test 5: 16-bpp, pure red with alpha bit, then pure blue without
    let red: u16 = 0x8000 | (0x1F << 10);
    let blue: u16 = 0x1F;
    let mut body = red.to_le_bytes().to_vec();
    body.extend_from_slice(&blue.to_le_bytes());
    let data = tga_stream(2, 2, 1, 16, 0x20, &body);
    let raster = read_tga(&data).expect("decode 16-bpp");
    rp.compare_bytes(&[248, 0, 0, 255], &raster.get_rgba(0, 0).unwrap_or_default());
    rp.compare_bytes(&[0, 0, 248, 0], &raster.get_rgba(1, 0).unwrap_or_default());

    // Test 6: RLE mixing a raw packet and a repeat packet across rows
    let body = [0x01, 1, 2, 3, 4, 5, 6, 0x81, 9, 9, 9];
    let data = tga_stream(10, 2, 2, 24, 0x20, &body);
    let raster = read_tga(&data).expect("decode mixed RLE");
    rp.compare_bytes(&[6, 5, 4, 255], &raster.get_rgba(1, 0).unwrap_or_default());
    rp.compare_bytes(&[9, 9, 9, 255], &raster.get_rgba(1, 1).unwrap_or_default());

    // Test 7: unsupported image type (color-mapped)
    let data = tga_stream(1, 1, 1, 8, 0, &[0]);
    rp.check(
        matches!(read_tga(&data), Err(IoError::UnsupportedFormat(_))),
        "type 1 is unsupported",
    );

    // Test 8: short pixel data
    let data = tga_stream(2, 2, 2, 24, 0x20, &[0; 9]);
    rp.check(
        matches!(
            read_tga(&data),
            Err(IoError::Truncated {
                expected: 4,
                decoded: 3
            })
        ),
        "truncated raw data",
    );
    let data = tga_stream(10, 4, 1, 24, 0x20, &[0x81, 1, 2, 3]);
    rp.check(
        matches!(
            read_tga(&data),
            Err(IoError::Truncated {
                expected: 4,
                decoded: 2
            })
        ),
        "truncated RLE data",
    );

    // Test 9: header probe and re-encoding
    let header = read_tga_header(&tga_stream(10, 300, 200, 32, 0x28, &[])).expect("probe");
    rp.compare_values(300.0, header.width as f64, 0.0);
    rp.compare_values(200.0, header.height as f64, 0.0);
    rp.check(header.is_top_down(), "descriptor 0x28 is top-down");

    let source = read_tga(&tga_stream(2, 2, 2, 32, 0x20, &[
        1, 2, 3, 255, 1, 2, 3, 255, 1, 2, 3, 255, 4, 5, 6, 0,
    ]))
    .expect("decode source");
    for rle in [false, true] {
        let mut encoded = Vec::new();
        write_tga(&source, &mut encoded, &TgaWriteOptions::default().with_rle(rle))
            .expect("encode");
        let decoded = read_tga(&encoded).expect("decode encoded");
        rp.compare_raster(&source, &decoded);
    }

    assert!(rp.cleanup(), "tga regression test failed");
}
