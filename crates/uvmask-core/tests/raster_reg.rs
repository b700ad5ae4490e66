//! Raster regression test
//!
//! Tests RasterBuffer construction and binary interpretation, the line,
//! rectangle and disc primitives, Coverage unions and work caps.

use uvmask_core::{
    Color, Coverage, Error, OFF, ON, ProcessLimits, Progress, ProgressGate, RasterBuffer,
};
use uvmask_test::RegParams;

#[test]
fn raster_reg() {
    let mut rp = RegParams::new("raster");

    // Test 1: construction
    let buf = RasterBuffer::new(3, 2).unwrap();
    rp.compare_values(24.0, buf.pixels().len() as f64, 0.0);
    rp.compare_values(0.0, buf.count_on() as f64, 0.0);
    rp.check(buf.get_rgba(3, 0).is_none(), "out of bounds read");
    rp.check(
        matches!(
            RasterBuffer::new(0, 4),
            Err(Error::InvalidDimension { width: 0, height: 4 })
        ),
        "zero width rejected",
    );
    rp.check(
        matches!(
            RasterBuffer::from_rgba(2, 2, vec![0; 15]),
            Err(Error::BufferLength { expected: 16, actual: 15, .. })
        ),
        "short buffer rejected",
    );

    // Test 2: boolean maps
    let map = [true, false, true, false, false, true];
    let mask = RasterBuffer::from_on_map(3, 2, &map).unwrap();
    rp.compare_values(3.0, mask.count_on() as f64, 0.0);
    rp.check(mask.get_rgba(0, 0) == Some(ON), "on pixel");
    rp.check(mask.get_rgba(1, 0) == Some(OFF), "off pixel");
    rp.check(mask.on_map() == map, "on map round trip");
    rp.check(
        mask.require_same_size(&RasterBuffer::new(2, 3).unwrap()).is_err(),
        "size mismatch",
    );

    // Test 3: vertical flip
    let mut column = RasterBuffer::new(1, 3).unwrap();
    column.set_rgba(0, 0, Color::RED.to_rgba()).unwrap();
    column.set_rgba(0, 2, Color::BLUE.to_rgba()).unwrap();
    column.flip_vertical();
    rp.check(column.get_rgba(0, 0) == Some(Color::BLUE.to_rgba()), "flipped top");
    rp.check(column.get_rgba(0, 2) == Some(Color::RED.to_rgba()), "flipped bottom");

    // Test 4: primitives clip to the raster
    let mut canvas = RasterBuffer::new(5, 5).unwrap();
    canvas.render_line(0, 0, 4, 0, 1, Color::WHITE);
    rp.compare_values(5.0, canvas.count_on() as f64, 0.0);
    canvas.render_line(-3, 4, 8, 4, 1, Color::WHITE);
    rp.compare_values(10.0, canvas.count_on() as f64, 0.0);
    canvas.fill(Color::TRANSPARENT);
    canvas.fill_circle(2, 2, 1, Color::WHITE);
    rp.compare_values(9.0, canvas.count_on() as f64, 0.0);
    canvas.fill_rect(3, 3, 10, 10, Color::WHITE);
    rp.compare_values(12.0, canvas.count_on() as f64, 0.0);

    // Test 5: coverage unions overlapping triangles
    let mut coverage = Coverage::new(8, 8);
    coverage.add_triangle([(0.0, 0.0), (8.0, 0.0), (0.0, 8.0)]);
    rp.compare_values(28.0, coverage.count() as f64, 0.0);
    coverage.add_triangle([(8.0, 0.0), (8.0, 8.0), (0.0, 8.0)]);
    rp.compare_values(64.0, coverage.count() as f64, 0.0);
    coverage.add_polygon(&[(0.0, 0.0), (f32::NAN, 1.0), (1.0, 1.0)]);
    rp.compare_values(64.0, coverage.count() as f64, 0.0);
    let mut painted = RasterBuffer::new(8, 8).unwrap();
    coverage.paint(&mut painted, Color::GREEN);
    rp.compare_values(64.0, painted.count_on() as f64, 0.0);

    // Test 6: caps and progress polling
    let limits = ProcessLimits::default().with_max_items(3).with_check_interval(2);
    let (n, truncation) = limits.cap(10);
    rp.compare_values(3.0, n as f64, 0.0);
    rp.compare_values(7.0, truncation.map_or(0, |t| t.skipped()) as f64, 0.0);
    rp.check(limits.cap(2).1.is_none(), "no truncation under cap");

    let mut seen = Vec::new();
    let mut cb = |p: &Progress| {
        seen.push(p.current);
        p.current < 4
    };
    let mut gate = ProgressGate::new("raster_reg", 6, &limits, Some(&mut cb));
    let ticks: Vec<bool> = (1..=6).map(|i| gate.tick(i)).collect();
    rp.check(
        ticks == [true, true, true, false, true, false],
        "gate polls on interval",
    );
    rp.check(seen == [2, 4, 6], "callback sees interval multiples");

    assert!(rp.cleanup(), "raster regression test failed");
}
