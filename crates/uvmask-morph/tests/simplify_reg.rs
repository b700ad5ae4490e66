//! UV sheet simplification regression test
//!
//! Two parallel lines three rows apart merge into one solid region under
//! closing; the outline traces that region and overlays onto the sheet.

use uvmask_core::{Color, RasterBuffer};
use uvmask_morph::{SimplifyOptions, binarize_sheet, overlay_outline, simplify_sheet};
use uvmask_test::RegParams;

#[test]
fn simplify_reg() {
    let mut rp = RegParams::new("simplify");

    let mut sheet = RasterBuffer::new(32, 32).expect("sheet");
    sheet.fill_rect(6, 10, 20, 1, Color::GREEN);
    sheet.fill_rect(6, 13, 20, 1, Color::GREEN);
    // Faint and translucent strokes are not part of the sheet
    sheet.fill_rect(6, 20, 20, 1, Color::rgb(40, 40, 40));
    sheet.fill_rect(6, 24, 20, 1, Color::GREEN.with_alpha(90));

    // Test 1: binarization keeps the two visible lines
    let drawn = binarize_sheet(&sheet).expect("binarize");
    rp.compare_values(40.0, drawn.count_on() as f64, 0.0);

    // Test 2: closing merges them into a 20x4 block
    let options = SimplifyOptions::default().with_closing_radius(2);
    let simplified = simplify_sheet(&sheet, &options).expect("simplify");
    rp.show_mask("closed sheet", &simplified.closed);
    rp.compare_values(80.0, simplified.closed.count_on() as f64, 0.0);
    rp.check(simplified.closed.is_on(15, 11), "rows between lines filled");

    // Test 3: outline is the block perimeter
    rp.compare_values(44.0, simplified.outline.count_on() as f64, 0.0);
    rp.check(!simplified.outline.is_on(15, 11), "interior not outline");

    // Test 4: overlay paints the outline over the source sheet
    let overlay = overlay_outline(&sheet, &simplified.outline, Color::CYAN).expect("overlay");
    rp.compare_bytes(
        &Color::CYAN.to_rgba(),
        &overlay.get_rgba(6, 10).unwrap_or_default(),
    );
    rp.compare_bytes(&[0, 0, 0, 0], &overlay.get_rgba(0, 0).unwrap_or_default());
    rp.compare_bytes(
        &Color::rgb(40, 40, 40).to_rgba(),
        &overlay.get_rgba(10, 20).unwrap_or_default(),
    );

    assert!(rp.cleanup(), "simplify regression test failed");
}
