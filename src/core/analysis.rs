// UniAIMS - core/analysis.rs
//
// Chart data for the analysis views: attribute histograms with cumulative
// percentages, correlation regression lines, violin profiles for image and
// task comparison, and the shared image-selection state.
//
// All input data is mock; values are generated from seeds so a given
// selection always produces the same chart.

use crate::util::constants::{REGRESSION_STEPS, VIOLIN_STEPS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// Particle attributes offered by the attribute and correlation pickers.
pub const PARTICLE_ATTRIBUTES: &[&str] = &[
    "Area",
    "Perimeter",
    "Diameter",
    "Major Axis",
    "Minor Axis",
    "Aspect Ratio",
    "Sphericity",
    "Circularity",
    "Form Factor AR",
    "Smoothness",
];

/// Attributes offered by the comparison views.
pub const COMPARISON_ATTRIBUTES: &[&str] = &[
    "Area",
    "Perimeter",
    "Diameter",
    "Major Axis",
    "Minor Axis",
    "Aspect Ratio",
    "Roundness",
    "Solidity",
];

/// Baseline bin counts every histogram is jittered from.
const BASE_HISTOGRAM: &[(&str, u32)] = &[
    ("0-2", 450),
    ("2-4", 1250),
    ("4-6", 820),
    ("6-8", 350),
    ("8-10", 180),
    (">10", 90),
];

/// Stable seed for any hashable selection.
///
/// Hashed with BLAKE3 and little-endian integers, so a selection maps to the
/// same seed on every platform and toolchain.
pub fn seed_for<H: Hash + ?Sized>(value: &H) -> u64 {
    let mut hasher = SeedHasher(blake3::Hasher::new());
    value.hash(&mut hasher);
    hasher.finish()
}

struct SeedHasher(blake3::Hasher);

impl Hasher for SeedHasher {
    fn finish(&self) -> u64 {
        let hash = self.0.finalize();
        let mut first = [0u8; 8];
        first.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(first)
    }

    fn write(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    fn write_u16(&mut self, i: u16) {
        self.write(&i.to_le_bytes());
    }

    fn write_u32(&mut self, i: u32) {
        self.write(&i.to_le_bytes());
    }

    fn write_u64(&mut self, i: u64) {
        self.write(&i.to_le_bytes());
    }

    fn write_usize(&mut self, i: usize) {
        self.write_u64(i as u64);
    }
}

// =============================================================================
// Histogram
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YAxisMode {
    #[default]
    Count,
    Percentage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Histogram,
    Violin,
}

/// X-axis binning controls shown in the chart settings panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinSettings {
    pub start: f64,
    pub end: f64,
    pub bin_size: f64,
}

impl Default for BinSettings {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 12.0,
            bin_size: 2.0,
        }
    }
}

impl BinSettings {
    /// Number of bins the settings describe (at least one).
    pub fn bin_count(&self) -> usize {
        if self.bin_size <= 0.0 || self.end <= self.start {
            return 1;
        }
        ((self.end - self.start) / self.bin_size).ceil().max(1.0) as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub range: String,
    pub count: u32,
    /// Share of the total in percent.
    pub percentage: f64,
    /// Running share up to and including this bin, in percent.
    pub cumulative: f64,
}

impl HistogramBin {
    pub fn value(&self, mode: YAxisMode) -> f64 {
        match mode {
            YAxisMode::Count => f64::from(self.count),
            YAxisMode::Percentage => self.percentage,
        }
    }
}

/// Build histogram bins from `(label, count)` pairs, adding percentage and
/// cumulative percentage columns.
pub fn histogram_from_counts(counts: &[(String, u32)]) -> Vec<HistogramBin> {
    let total: u64 = counts.iter().map(|(_, c)| u64::from(*c)).sum();
    let mut accumulated: u64 = 0;
    counts
        .iter()
        .map(|(range, count)| {
            accumulated += u64::from(*count);
            let (percentage, cumulative) = if total == 0 {
                (0.0, 0.0)
            } else {
                (
                    f64::from(*count) / total as f64 * 100.0,
                    accumulated as f64 / total as f64 * 100.0,
                )
            };
            HistogramBin {
                range: range.clone(),
                count: *count,
                percentage,
                cumulative,
            }
        })
        .collect()
}

/// The mock attribute histogram: the baseline bins, each scaled by a
/// factor in `[0.8, 1.2)` drawn from `seed`.
pub fn mock_histogram(seed: u64) -> Vec<HistogramBin> {
    let mut rng = StdRng::seed_from_u64(seed);
    let counts: Vec<(String, u32)> = BASE_HISTOGRAM
        .iter()
        .map(|(range, count)| {
            let factor: f64 = rng.random_range(0.8..1.2);
            (range.to_string(), (f64::from(*count) * factor).floor() as u32)
        })
        .collect();
    histogram_from_counts(&counts)
}

// =============================================================================
// Correlation
// =============================================================================

/// Least-squares fit `y = slope * x + intercept`.
///
/// Returns `None` for fewer than two points or when all x values coincide.
pub fn linear_regression(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for &(x, y) in points {
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }
    let denom = n * sum_xx - sum_x * sum_x;
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    Some((slope, intercept))
}

/// Evenly spaced points along the regression line across the x range of `points`.
pub fn regression_line(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let Some((slope, intercept)) = linear_regression(points) else {
        return Vec::new();
    };
    let min_x = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let step = (max_x - min_x) / REGRESSION_STEPS as f64;
    (0..=REGRESSION_STEPS)
        .map(|i| {
            let x = min_x + i as f64 * step;
            (x, slope * x + intercept)
        })
        .collect()
}

/// Mock scatter data: x in [2, 12), y in [0.5, 1.0).
pub fn mock_scatter(count: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| (rng.random_range(2.0..12.0), rng.random_range(0.5..1.0)))
        .collect()
}

/// Apply the log-scale toggles to a point, dropping non-positive values.
pub fn log_transform(point: (f64, f64), log_x: bool, log_y: bool) -> Option<(f64, f64)> {
    let x = if log_x {
        (point.0 > 0.0).then(|| point.0.log10())?
    } else {
        point.0
    };
    let y = if log_y {
        (point.1 > 0.0).then(|| point.1.log10())?
    } else {
        point.1
    };
    Some((x, y))
}

// =============================================================================
// Violin profiles
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ViolinProfile {
    pub id: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Relative half-width at evenly spaced steps from `min` to `max`, in `[0, 1]`.
    pub density: Vec<f64>,
}

/// Mock distribution shape for one image or task: mean in [5, 9), spread
/// in [2, 4), bell-shaped density.
pub fn violin_profile(id: &str) -> ViolinProfile {
    let mut rng = StdRng::seed_from_u64(seed_for(id));
    let mean: f64 = 5.0 + rng.random_range(0.0..4.0);
    let spread: f64 = 2.0 + rng.random_range(0.0..2.0);
    let last = (VIOLIN_STEPS - 1) as f64;
    let density = (0..VIOLIN_STEPS)
        .map(|i| {
            let x = i as f64 / last;
            (-((x - 0.5) * 4.0).powi(2)).exp()
        })
        .collect();
    ViolinProfile {
        id: id.to_string(),
        mean,
        min: (mean - spread).max(0.0),
        max: mean + spread,
        density,
    }
}

// =============================================================================
// Training curves
// =============================================================================

/// One epoch of the fine-tuning monitor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochMetrics {
    pub epoch: u32,
    pub loss: f64,
    /// Validation accuracy as a fraction.
    pub accuracy: f64,
}

/// Mock convergence curves: loss decays from about 2.5 towards a floor of
/// 0.1, accuracy rises from 0.6 and is capped at 0.98.
pub fn training_curve(epochs: u32, seed: u64) -> Vec<EpochMetrics> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..epochs)
        .map(|i| {
            let t = f64::from(i);
            let loss = (2.5 * (-0.2 * t).exp() + rng.random_range(0.0..0.2)).max(0.1);
            let accuracy =
                (0.6 + 0.4 * (1.0 - (-0.2 * t).exp()) + rng.random_range(0.0..0.05)).min(0.98);
            EpochMetrics {
                epoch: i + 1,
                loss,
                accuracy,
            }
        })
        .collect()
}

// =============================================================================
// Image selection
// =============================================================================

/// Which images of a fixed list participate in a chart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageSelection {
    available: Vec<String>,
    selected: BTreeSet<String>,
}

impl ImageSelection {
    /// All of `available` selected.
    pub fn all_of(available: Vec<String>) -> Self {
        let selected = available.iter().cloned().collect();
        Self {
            available,
            selected,
        }
    }

    /// Only the first `n` of `available` selected.
    pub fn first_n(available: Vec<String>, n: usize) -> Self {
        let selected = available.iter().take(n).cloned().collect();
        Self {
            available,
            selected,
        }
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn is_all_selected(&self) -> bool {
        self.selected.len() == self.available.len()
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.available.iter().any(|a| a == id) {
            return;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Select everything, or nothing if everything is already selected.
    pub fn toggle_all(&mut self) {
        if self.is_all_selected() {
            self.selected.clear();
        } else {
            self.selected = self.available.iter().cloned().collect();
        }
    }

    /// Selected ids in the order of the available list.
    pub fn selected(&self) -> Vec<&str> {
        self.available
            .iter()
            .filter(|a| self.selected.contains(*a))
            .map(String::as_str)
            .collect()
    }

    /// Seed derived from the selection so charts regenerate when it changes.
    pub fn seed(&self, extra: &str) -> u64 {
        seed_for(&(extra, self.selected()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_for_is_fixed_blake3() {
        let digest = blake3::hash(b"T-1029\xff");
        let expected = u64::from_le_bytes(digest.as_bytes()[..8].try_into().unwrap());
        assert_eq!(seed_for("T-1029"), expected);
        assert_eq!(seed_for(&(3usize, 7u32)), seed_for(&(3usize, 7u32)));
        assert_ne!(seed_for("T-1029"), seed_for("T-1030"));
    }

    #[test]
    fn test_training_curve_bounds() {
        let curve = training_curve(20, 7);
        assert_eq!(curve.len(), 20);
        assert_eq!(curve[0].epoch, 1);
        assert!(curve.iter().all(|m| m.loss >= 0.1 && m.accuracy <= 0.98));
        assert!(curve[19].loss < curve[0].loss);
        assert_eq!(curve, training_curve(20, 7));
    }

    #[test]
    fn test_histogram_percentages_sum_to_100() {
        let bins = mock_histogram(3);
        assert_eq!(bins.len(), BASE_HISTOGRAM.len());
        let total: f64 = bins.iter().map(|b| b.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
        let last = bins.last().unwrap();
        assert!((last.cumulative - 100.0).abs() < 1e-9);
        assert!(bins.windows(2).all(|w| w[0].cumulative <= w[1].cumulative));
    }

    #[test]
    fn test_histogram_jitter_stays_within_20_percent() {
        let bins = mock_histogram(99);
        for (bin, (_, base)) in bins.iter().zip(BASE_HISTOGRAM) {
            let base = f64::from(*base);
            let count = f64::from(bin.count);
            assert!(count >= (base * 0.8).floor() && count <= base * 1.2);
        }
    }

    #[test]
    fn test_histogram_of_zero_counts() {
        let bins = histogram_from_counts(&[("a".to_string(), 0), ("b".to_string(), 0)]);
        assert!(bins.iter().all(|b| b.percentage == 0.0 && b.cumulative == 0.0));
    }

    #[test]
    fn test_regression_exact_line() {
        let points = [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)];
        let (slope, intercept) = linear_regression(&points).unwrap();
        assert!((slope - 2.0).abs() < 1e-9);
        assert!((intercept - 1.0).abs() < 1e-9);

        let line = regression_line(&points);
        assert_eq!(line.len(), REGRESSION_STEPS + 1);
        assert!((line[0].0 - 0.0).abs() < 1e-9);
        assert!((line[REGRESSION_STEPS].1 - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_regression_degenerate_inputs() {
        assert!(linear_regression(&[]).is_none());
        assert!(linear_regression(&[(1.0, 1.0)]).is_none());
        assert!(linear_regression(&[(2.0, 1.0), (2.0, 5.0)]).is_none());
        assert!(regression_line(&[(1.0, 1.0)]).is_empty());
    }

    #[test]
    fn test_log_transform_drops_non_positive() {
        assert_eq!(log_transform((10.0, 0.5), true, false), Some((1.0, 0.5)));
        assert_eq!(log_transform((0.0, 0.5), true, false), None);
        assert_eq!(log_transform((0.0, -1.0), false, false), Some((0.0, -1.0)));
    }

    #[test]
    fn test_violin_profile_shape() {
        let v = violin_profile("Img_001.tif");
        assert_eq!(v.density.len(), VIOLIN_STEPS);
        assert!(v.min >= 0.0 && v.min < v.mean && v.mean < v.max);
        assert!(v.density.iter().all(|d| (0.0..=1.0).contains(d)));
        assert_eq!(v, violin_profile("Img_001.tif"));
    }

    #[test]
    fn test_image_selection_toggles() {
        let ids: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let mut sel = ImageSelection::first_n(ids, 2);
        assert_eq!(sel.selected(), vec!["a", "b"]);
        sel.toggle("c");
        assert!(sel.is_all_selected());
        sel.toggle_all();
        assert!(sel.selected().is_empty());
        sel.toggle_all();
        assert!(sel.is_all_selected());
        sel.toggle("zzz");
        assert_eq!(sel.selected().len(), 3);
        sel.toggle("b");
        assert_eq!(sel.selected(), vec!["a", "c"]);
    }

    #[test]
    fn test_bin_count() {
        assert_eq!(BinSettings::default().bin_count(), 6);
        let bad = BinSettings {
            start: 5.0,
            end: 1.0,
            bin_size: 1.0,
        };
        assert_eq!(bad.bin_count(), 1);
    }
}
