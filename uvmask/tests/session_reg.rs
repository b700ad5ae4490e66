//! UV session regression test
//!
//! Runs the whole pipeline on the two-island fixture: parse, segment,
//! island masks, outline, PNG export and simplified-island grouping.

use uvmask::io::{ImageFormat, read_image_mem, write_image_mem};
use uvmask::{Color, OutlineOptions, ParseOptions, SegmentOptions, SimplifyOptions, UvSession};
use uvmask_test::RegParams;
use uvmask_test::fixtures::two_islands_obj;

#[test]
fn session_reg() {
    let mut rp = RegParams::new("session");
    let session = UvSession::from_obj(
        &two_islands_obj(),
        &ParseOptions::default(),
        &SegmentOptions::default(),
        64,
        64,
    )
    .expect("session");

    // Test 1: islands and face lookups
    rp.compare_values(2.0, session.islands().len() as f64, 0.0);
    rp.check(
        session.island_for_face(3).map(|i| i.faces.clone()) == Some(vec![2, 3]),
        "island of face 3",
    );

    // Test 2: island masks cover the island rectangles
    let left = session.island_mask(0).expect("mask").expect("left island");
    let right = session.island_mask(2).expect("mask").expect("right island");
    rp.compare_values(1152.0, left.count_on() as f64, 0.0);
    rp.compare_values(1152.0, right.count_on() as f64, 0.0);

    // Test 3: outline of both islands
    let outline = session.outline(&OutlineOptions::default()).expect("outline");
    rp.compare_values(8.0, outline.boundary_edges as f64, 0.0);

    // Test 4: masks survive a PNG round trip unchanged
    let png = write_image_mem(&left, ImageFormat::Png).expect("encode");
    let decoded = read_image_mem(&png).expect("decode");
    rp.compare_raster(&left, &decoded);

    // Sheet with both islands filled; the gap between them is 8 pixels
    let mut sheet = left.clone();
    for (x, y, px) in right.iter_pixels() {
        if px[3] > 0 {
            sheet.set_rgba_unchecked(x, y, Color::GREEN.to_rgba());
        }
    }

    // Test 5: a small closing keeps the islands apart
    let narrow = SimplifyOptions::default().with_closing_radius(2);
    let regions = session.simplify(&sheet, &narrow).expect("simplify");
    rp.compare_values(2.0, regions.labels.component_count() as f64, 0.0);
    let found = session.simplified_island_in(2, &regions).expect("found");
    rp.check(found.region == Some(2), "right region");
    rp.check(found.faces == vec![2, 3], "right faces");

    // Test 6: the default closing merges them into one region
    let found = session
        .simplified_island_for_face(0, &sheet, &SimplifyOptions::default())
        .expect("simplify")
        .expect("found");
    rp.check(found.region == Some(1), "merged region");
    rp.check(found.faces == vec![0, 1, 2, 3], "all faces");

    rp.check(session.simplified_island_in(9, &regions).is_none(), "unknown face");

    assert!(rp.cleanup(), "session regression test failed");
}
