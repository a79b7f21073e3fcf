// File: crates/perfchart-core/src/axis.rs
// Summary: Axis model with labels, autoscaled ranges and "nice" tick placement.

/// Fraction of the data span added on each side when autoscaling.
pub const AUTOSCALE_MARGIN: f64 = 0.05;

/// Upper bound on the number of ticks per axis.
pub const MAX_TICKS: usize = 9;

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: Option<String>,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn new(label: Option<String>, min: f64, max: f64) -> Self {
        Self { label, min, max }
    }

    /// Fit the finite values with a margin on both sides. Non-finite values are ignored.
    pub fn autoscale(label: Option<String>, values: impl IntoIterator<Item = f64>) -> Self {
        let (lo, hi) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if !lo.is_finite() {
            return Self::new(label, -AUTOSCALE_MARGIN, 1.0 + AUTOSCALE_MARGIN);
        }
        let (lo, hi) = widen_degenerate(lo, hi);
        let m = (hi - lo) * AUTOSCALE_MARGIN;
        Self::new(label, lo - m, hi + m)
    }

    /// Width of the range; never zero, so `fraction` stays finite.
    pub fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            span
        } else {
            f64::MIN_POSITIVE
        }
    }

    /// Position of `v` along the axis: 0.0 at `min`, 1.0 at `max`.
    #[inline]
    pub fn fraction(&self, v: f64) -> f64 {
        (v - self.min) / self.span()
    }

    pub fn tick_step(&self) -> f64 {
        nice_step(self.max - self.min, MAX_TICKS)
    }

    /// Tick values inside `[min, max]`, multiples of `tick_step()`.
    pub fn ticks(&self) -> Vec<f64> {
        let step = self.tick_step();
        let first = (self.min / step).ceil() as i64;
        let last = (self.max / step).floor() as i64;
        (first..=last)
            .map(|k| k as f64 * step)
            // -0.0 prints as "-0"
            .map(|v| if v == 0.0 { 0.0 } else { v })
            .collect()
    }

    pub fn tick_labels(&self) -> Vec<(f64, String)> {
        let decimals = decimals_for(self.tick_step());
        self.ticks()
            .into_iter()
            .map(|v| (v, format!("{v:.decimals$}")))
            .collect()
    }
}

/// Below this span, `lo..hi` is indistinguishable from a single value.
fn rounding_tolerance(lo: f64, hi: f64) -> f64 {
    lo.abs().max(hi.abs()) * f64::EPSILON * 4.0
}

fn widen_degenerate(lo: f64, hi: f64) -> (f64, f64) {
    if hi - lo > rounding_tolerance(lo, hi) {
        return (lo, hi);
    }
    let half = if lo == 0.0 { 0.5 } else { lo.abs() * AUTOSCALE_MARGIN };
    (lo - half, hi + half)
}

/// Smallest step from {1, 2, 2.5, 5} x 10^k giving at most `max_ticks` ticks over `span`.
pub fn nice_step(span: f64, max_ticks: usize) -> f64 {
    let span = span.abs();
    if span == 0.0 || !span.is_finite() {
        return 1.0;
    }
    let raw = span / (max_ticks.max(2) - 1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    for mult in [1.0, 2.0, 2.5, 5.0, 10.0] {
        let step = mult * mag;
        if span / step <= (max_ticks - 1) as f64 + 1e-9 {
            return step;
        }
    }
    10.0 * mag
}

/// Decimal places needed to print multiples of `step` exactly.
fn decimals_for(step: f64) -> usize {
    let mut decimals = 0usize;
    let mut scaled = step;
    while decimals < 20 && (scaled - scaled.round()).abs() > 1e-9 * scaled.abs().max(1.0) {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 {
        return vec![start, end];
    }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autoscale_adds_margins() {
        let a = Axis::autoscale(None, [10.0, 100.0]);
        assert!((a.min - 5.5).abs() < 1e-9);
        assert!((a.max - 104.5).abs() < 1e-9);
    }

    #[test]
    fn autoscale_ignores_non_finite_and_widens_flat_data() {
        let a = Axis::autoscale(None, [f64::NAN, 3.0, f64::INFINITY, 3.0]);
        assert!(a.min < 3.0 && a.max > 3.0);
        let z = Axis::autoscale(None, [0.0]);
        assert!((z.min + 0.55).abs() < 1e-9 && (z.max - 0.55).abs() < 1e-9);
        let empty = Axis::autoscale(None, std::iter::empty());
        assert!(empty.min < 0.0 && empty.max > 1.0);
    }

    #[test]
    fn ticks_for_probability_axis() {
        let a = Axis::new(None, 5.5, 104.5);
        assert_eq!(a.ticks(), vec![20.0, 40.0, 60.0, 80.0, 100.0]);
        let labels: Vec<String> = a.tick_labels().into_iter().map(|(_, s)| s).collect();
        assert_eq!(labels, vec!["20", "40", "60", "80", "100"]);
    }

    #[test]
    fn fractional_steps_get_decimals() {
        let a = Axis::new(None, 0.0, 1.0);
        assert!((a.tick_step() - 0.2).abs() < 1e-12);
        let labels: Vec<String> = a.tick_labels().into_iter().map(|(_, s)| s).collect();
        assert_eq!(labels.first().map(String::as_str), Some("0.0"));
        assert_eq!(labels.last().map(String::as_str), Some("1.0"));
        assert_eq!(decimals_for(0.25), 2);
        assert_eq!(decimals_for(5.0), 0);
    }

    #[test]
    fn tick_count_is_bounded() {
        for span in [0.37, 1.0, 7.0, 13.0, 99.0, 1234.5, 1e6] {
            let a = Axis::new(None, 0.0, span);
            let n = a.ticks().len();
            assert!((2..=MAX_TICKS).contains(&n), "span {span}: {n} ticks");
        }
    }

    #[test]
    fn tiny_magnitudes_keep_their_shape() {
        let a = Axis::autoscale(None, [1e-14, 2e-14, 4e-14]);
        assert!((a.min - 0.85e-14).abs() < 1e-20, "min {}", a.min);
        assert!((a.max - 4.15e-14).abs() < 1e-20, "max {}", a.max);
        assert!((a.fraction(4e-14) - 3.15 / 3.3).abs() < 1e-9);
        assert!((a.fraction(1e-14) - 0.15 / 3.3).abs() < 1e-9);

        let ticks = a.ticks();
        assert!((2..=MAX_TICKS).contains(&ticks.len()), "ticks {ticks:?}");
        assert!(ticks.iter().all(|t| *t >= a.min && *t <= a.max));
        let labels: Vec<String> = a.tick_labels().into_iter().map(|(_, s)| s).collect();
        assert!(labels.windows(2).all(|w| w[0] != w[1]), "labels {labels:?}");
    }

    #[test]
    fn flat_data_widens_relative_to_magnitude() {
        let a = Axis::autoscale(None, [3e-14, 3e-14]);
        assert!(a.min < 3e-14 && a.max > 3e-14);
        assert!(a.max - a.min < 1e-14);
        assert!((a.fraction(3e-14) - 0.5).abs() < 1e-9);

        // Adjacent large values are one value, not a range.
        let big = Axis::autoscale(None, [1e20, 1e20 + 1e4]);
        assert!((big.fraction(1e20) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn linspace_includes_endpoints() {
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
    }
}
