//! Regression test parameters and comparisons

use uvmask_core::RasterBuffer;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare results and record failures (default)
    #[default]
    Compare,
    /// Compare, and also print mask renderings for inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the index of the current comparison and every
/// failure seen so far.
pub struct RegParams {
    /// Name of the test (e.g., "island")
    pub test_name: String,
    /// Current comparison index (incremented before each comparison)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Create regression test parameters, reading the mode from the
    /// environment.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current comparison index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Compare two rasters for exact equality of size and pixels
    pub fn compare_raster(&mut self, expected: &RasterBuffer, actual: &RasterBuffer) -> bool {
        self.index += 1;

        if !expected.same_size(actual) {
            let msg = format!(
                "Failure in {}_reg: raster comparison for index {} - size {}x{} vs {}x{}",
                self.test_name,
                self.index,
                expected.width(),
                expected.height(),
                actual.width(),
                actual.height()
            );
            return self.fail(msg);
        }

        let mismatch = expected
            .iter_pixels()
            .zip(actual.iter_pixels())
            .find(|(a, b)| a.2 != b.2);
        if let Some(((x, y, want), (_, _, got))) = mismatch {
            let msg = format!(
                "Failure in {}_reg: raster comparison for index {} - pixel ({}, {}) expected {:?}, got {:?}",
                self.test_name, self.index, x, y, want, got
            );
            return self.fail(msg);
        }

        true
    }

    /// Compare two byte sequences
    pub fn compare_bytes(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.index += 1;

        if expected != actual {
            let first = expected
                .iter()
                .zip(actual)
                .position(|(a, b)| a != b)
                .unwrap_or(expected.len().min(actual.len()));
            let msg = format!(
                "Failure in {}_reg: byte comparison for index {}\n\
                 sizes: {} vs {}, first difference at offset {}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len(),
                first
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Record a boolean check with a description
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if condition {
            true
        } else {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.fail(msg)
        }
    }

    /// Print an ASCII rendering of a mask in display mode
    ///
    /// `#` marks on pixels, `.` off pixels. Does nothing in compare mode.
    pub fn show_mask(&self, title: &str, mask: &RasterBuffer) {
        if !self.display() {
            return;
        }
        eprintln!("{} ({}x{}):", title, mask.width(), mask.height());
        for y in 0..mask.height() {
            let row: String = (0..mask.width())
                .map(|x| if mask.is_on(x, y) { '#' } else { '.' })
                .collect();
            eprintln!("  {}", row);
        }
    }

    /// Report results
    ///
    /// Returns `true` if every comparison passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all comparisons have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uvmask_core::Color;

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_raster_reports_pixel() {
        let a = RasterBuffer::new_filled(2, 2, Color::RED).unwrap();
        let mut b = a.clone();
        let mut rp = RegParams::new("test");
        assert!(rp.compare_raster(&a, &b));
        b.set_rgba(1, 1, [0, 0, 0, 0]).unwrap();
        assert!(!rp.compare_raster(&a, &b));
        assert!(rp.failures()[0].contains("pixel (1, 1)"));
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_bytes_length_difference() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_bytes(&[1, 2, 3], &[1, 2]));
        assert!(rp.failures()[0].contains("offset 2"));
    }
}
