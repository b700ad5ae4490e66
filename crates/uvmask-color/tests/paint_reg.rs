//! Mask painting regression test
//!
//! Paints masks on a canvas, saves them into a library and composites
//! them; the magic wand selects a flat area of a texture.

use uvmask_color::{MaskCanvas, MaskLibrary};
use uvmask_core::Color;
use uvmask_test::RegParams;
use uvmask_test::fixtures::solid_raster;

#[test]
fn paint_reg() {
    let mut rp = RegParams::new("paint");
    let mut library = MaskLibrary::new(16, 16).expect("library");
    let mut canvas = MaskCanvas::new(16, 16).expect("canvas");

    // Test 1: first mask is a rectangle in the first palette color
    let entry = library.next_mask_color();
    rp.check(entry.color == Color::RED, "first palette color");
    canvas.start_mask(entry.color);
    canvas.fill_rect(0, 0, 8, 16);
    rp.compare_values(128.0, canvas.raster().count_on() as f64, 0.0);
    let index = library
        .save_mask("body", canvas.color(), canvas.raster().clone())
        .expect("save");
    rp.compare_values(0.0, index as f64, 0.0);

    // Test 2: second mask painted with the magic wand
    let mut texture = solid_raster(16, 16, Color::rgb(90, 90, 90)).expect("texture");
    texture.fill_rect(10, 4, 4, 6, Color::rgb(200, 180, 20));
    let entry = library.next_mask_color();
    rp.check(entry.name == "Green - Magazine", "second palette entry");
    canvas.start_mask(entry.color);
    let painted = canvas.magic_wand(&texture, 11, 5, 30).expect("wand");
    rp.compare_values(24.0, painted as f64, 0.0);
    rp.check(canvas.magic_wand(&texture, 16, 0, 30).is_err(), "seed outside");
    library
        .save_mask("magazine", canvas.color(), canvas.raster().clone())
        .expect("save");

    // Test 3: the eraser leaves a transparent hole
    canvas.erase_circle(12, 7, 2);
    rp.compare_bytes(&[0, 0, 0, 0], &canvas.raster().get_rgba(12, 7).unwrap_or_default());

    // Test 4: the composite draws saved masks in order over black
    // Each saved canvas is opaque, so the later mask covers the earlier one
    let combined = library.combined().expect("combined");
    rp.show_mask("combined", &combined);
    rp.compare_bytes(&[0, 0, 0, 255], &combined.get_rgba(2, 2).unwrap_or_default());
    rp.compare_bytes(&[0, 255, 0, 255], &combined.get_rgba(11, 5).unwrap_or_default());

    // Test 5: a loaded mask restores image and color
    let body = library.saved(0).expect("saved").clone();
    canvas.load(&body).expect("load");
    rp.check(canvas.color() == Color::RED, "restored color");
    rp.compare_raster(&body.image, canvas.raster());

    // Test 6: a brush stroke and a lasso polygon
    let mut canvas = MaskCanvas::new(16, 16).expect("canvas");
    canvas.set_color(Color::BLUE);
    canvas.stroke_polyline(&[(2, 12), (13, 12)], 3);
    rp.check(canvas.raster().is_on(7, 11) && canvas.raster().is_on(7, 13), "brush width");
    rp.check(!canvas.raster().is_on(7, 14), "brush edge");
    canvas.fill_polygon(&[(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0)]);
    rp.check(canvas.raster().is_on(5, 5) && !canvas.raster().is_on(8, 5), "lasso square");

    // Test 7: brushes far larger than the canvas clip to it
    let mut canvas = MaskCanvas::new(8, 8).expect("canvas");
    canvas.erase_circle(4, 4, 100_000);
    rp.check(
        canvas.raster().iter_pixels().all(|(_, _, px)| px == [0, 0, 0, 0]),
        "giant eraser clears the canvas",
    );
    canvas.set_color(Color::GREEN);
    canvas.stroke_polyline(&[(0, 0), (7, 7)], u32::MAX);
    rp.compare_values(64.0, canvas.raster().count_on() as f64, 0.0);

    assert!(rp.cleanup(), "paint regression test failed");
}
