//! Image I/O regression test
//!
//! Tests format detection, in-memory decode dispatch and file
//! write/read for both supported formats.

use uvmask_core::{Color, RasterBuffer};
use uvmask_io::{
    ImageFormat, detect_format, read_image, read_image_header, read_image_mem, write_image,
    write_image_mem,
};
use uvmask_test::RegParams;
use uvmask_test::fixtures::quadrant_mask;

fn sample_raster() -> RasterBuffer {
    let mut raster = RasterBuffer::new_filled(6, 4, Color::rgba(20, 40, 60, 255)).unwrap();
    raster.fill_rect(1, 1, 2, 2, Color::RED);
    raster.set_rgba(5, 3, [0, 0, 0, 0]).unwrap();
    raster
}

#[test]
fn imageio_reg() {
    let mut rp = RegParams::new("imageio");
    let raster = sample_raster();

    // Test 1: in-memory encode/decode through detection
    for format in [ImageFormat::Tga, ImageFormat::Png] {
        let bytes = write_image_mem(&raster, format).expect("encode");
        let back = read_image_mem(&bytes).expect("decode");
        rp.compare_raster(&raster, &back);
    }

    // Test 2: files on disk, format detected from content
    let dir = std::env::temp_dir().join(format!("uvmask_imageio_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let mask = quadrant_mask(8, 8).expect("mask");
    for format in [ImageFormat::Tga, ImageFormat::Png] {
        let path = dir.join(format!("mask.{}", format.extension()));
        write_image(&mask, &path, format).expect("write");
        rp.check(
            detect_format(&path).ok() == Some(format),
            "detected format matches written format",
        );
        let header = read_image_header(&path).expect("header");
        rp.compare_values(8.0, header.width as f64, 0.0);
        let back = read_image(&path).expect("read");
        rp.compare_values(16.0, back.count_on() as f64, 0.0);
        rp.compare_raster(&mask, &back);
    }
    let _ = std::fs::remove_dir_all(&dir);

    // Test 3: unknown content is rejected
    rp.check(read_image_mem(b"not an image at all").is_err(), "garbage rejected");

    assert!(rp.cleanup(), "imageio regression test failed");
}
