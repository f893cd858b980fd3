use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::bins::Bin;
use crate::hist::Histogram;

/// Default number of decimal places shown in the labels.
pub const DEFAULT_PRECISION: usize = 2;

/// Upper bound for the number of decimal places shown in the labels.
pub const MAX_PRECISION: usize = 12;

/// Values this large are always shown in the scientific notation.
const FIXED_LIMIT: f64 = 1e15;

/// Upper bound for the number of fractional digits of the mantissa in the scientific notation,
/// enough to tell apart any two different `f64` values.
const MAX_DIGITS: usize = 16;

/// A labeled bar of the histogram, the unit of the data passed to a bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Human-readable range of the bin.
    pub label: String,
    /// The count of the values in the bin.
    pub count: u64,
}

impl Histogram {
    /// Turn the bins into labeled bars, ordered the same way as the bins. The labels are unique.
    ///
    /// The label has the `"{start}—{end}"` form, where:
    /// * the first bin starts at the smallest value,
    /// * the other bins start at their rounded start plus one unit of the last shown decimal place,
    ///   so they don't repeat the end of the previous bin,
    /// * the last bin ends at the largest value,
    /// * negative ends are wrapped in parentheses.
    ///
    /// The values are shown with two decimal places, or more if the bins are too narrow
    /// for the labels to be unique (see [`Histogram::precision`]). When no such precision exists,
    /// the bounds are shown in the scientific notation with as many digits as needed. If even
    /// the exact bounds repeat, because the bins are narrower than the spacing of `f64` values,
    /// the labels are prefixed with the bin number, e.g. `"#3 1.0000000000000000e16—1.0000000000000000e16"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use normhist::{Bar, Histogram};
    ///
    /// let hist = Histogram::new(&[-4.0, -3.0, -2.5, 0.0], 2).unwrap();
    /// assert_eq!(
    ///     hist.bars(),
    ///     vec![
    ///         Bar { label: String::from("-4.00—(-2.00)"), count: 3 },
    ///         Bar { label: String::from("-1.99—0.00"), count: 1 },
    ///     ]
    /// );
    ///
    /// let hist = Histogram::new(&[1e20, 3e20], 2).unwrap();
    /// assert_eq!(hist.bars()[1].label, "2.00e20—3.00e20");
    /// ```
    pub fn bars(&self) -> Vec<Bar> {
        if self.bins.is_empty() {
            return Vec::new();
        }
        if let Some(precision) = self.precision() {
            let bars = self.fixed_bars(precision);
            if all_unique(&bars) {
                return bars;
            }
        }
        (DEFAULT_PRECISION..=MAX_DIGITS)
            .map(|digits| self.scientific_bars(digits))
            .find(|bars| all_unique(bars))
            .unwrap_or_else(|| self.numbered_bars())
    }

    /// The number of decimal places used in the labels.
    ///
    /// It is the smallest number, starting with [`DEFAULT_PRECISION`] and not larger than [`MAX_PRECISION`],
    /// for which the width of the bins covers at least two units of the last decimal place.
    /// It is `None` when there is no such number, or the values are too large to be shown
    /// with decimal places, the labels use the scientific notation then.
    ///
    /// # Examples
    ///
    /// ```
    /// use normhist::Histogram;
    ///
    /// let hist = Histogram::new(&[0.0, 1.0], 10).unwrap();
    /// assert_eq!(hist.precision(), Some(2));
    ///
    /// let hist = Histogram::new(&[0.0, 1.0], 1000).unwrap();
    /// assert_eq!(hist.precision(), Some(4));
    ///
    /// let hist = Histogram::new(&[0.0, 1e-12], 10).unwrap();
    /// assert_eq!(hist.precision(), None);
    /// ```
    pub fn precision(&self) -> Option<usize> {
        if self.min.abs().max(self.max.abs()) >= FIXED_LIMIT {
            return None;
        }
        if self.is_degenerate() {
            return Some(DEFAULT_PRECISION);
        }
        (DEFAULT_PRECISION..=MAX_PRECISION).find(|p| 2.0 * unit(*p) <= self.bin_size)
    }

    /// Label the bins using the `label` function of the bin index and the bin.
    fn labeled<F>(&self, label: F) -> Vec<Bar>
    where
        F: Fn(usize, &Bin) -> String,
    {
        self.iter()
            .enumerate()
            .map(|(index, bin)| Bar {
                label: label(index, bin),
                count: bin.count,
            })
            .collect()
    }

    /// Bounds with `precision` decimal places.
    fn fixed_bars(&self, precision: usize) -> Vec<Bar> {
        let nudge = unit(precision);
        let last = self.len().saturating_sub(1);
        self.labeled(|index, bin| {
            let start = if index == 0 {
                self.min
            } else {
                round(bin.start, precision) + nudge
            };
            let end = if index == last {
                self.max
            } else {
                round(bin.end, precision)
            };
            format!(
                "{}—{}",
                fixed(start, precision),
                bracketed(end, |x| fixed(x, precision))
            )
        })
    }

    /// Exact bounds in the scientific notation with `digits` fractional digits.
    fn scientific_bars(&self, digits: usize) -> Vec<Bar> {
        let last = self.len().saturating_sub(1);
        self.labeled(|index, bin| {
            let start = if index == 0 { self.min } else { bin.start };
            let end = if index == last { self.max } else { bin.end };
            format!(
                "{}—{}",
                scientific(start, digits),
                bracketed(end, |x| scientific(x, digits))
            )
        })
    }

    /// Scientific labels prefixed with the bin number counting from one.
    fn numbered_bars(&self) -> Vec<Bar> {
        self.scientific_bars(MAX_DIGITS)
            .into_iter()
            .enumerate()
            .map(|(index, bar)| Bar {
                label: format!("#{} {}", index + 1, bar.label),
                count: bar.count,
            })
            .collect()
    }
}

fn all_unique(bars: &[Bar]) -> bool {
    let labels: HashSet<&str> = bars.iter().map(|bar| bar.label.as_str()).collect();
    labels.len() == bars.len()
}

/// The value of one unit at the `precision`-th decimal place.
#[inline]
fn unit(precision: usize) -> f64 {
    10f64.powi(-(precision as i32))
}

/// Round half up (towards positive infinity) to `precision` decimal places.
///
/// Values too large to be scaled have no decimal places, they are returned unchanged.
#[inline]
fn round(value: f64, precision: usize) -> f64 {
    let scale = 10f64.powi(precision as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    // adding zero turns -0.0 into 0.0
    (scaled + 0.5).floor() / scale + 0.0
}

/// Format the `value` with exactly `precision` decimal places.
#[inline]
fn fixed(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value + 0.0)
}

/// Format the `value` in the scientific notation with `digits` fractional digits of the mantissa.
#[inline]
fn scientific(value: f64, digits: usize) -> String {
    format!("{:.*e}", digits, value + 0.0)
}

/// Format the `value`, wrapping negative values in parentheses.
#[inline]
fn bracketed<F>(value: f64, format: F) -> String
where
    F: Fn(f64) -> String,
{
    if value < 0.0 {
        format!("({})", format(value))
    } else {
        format(value)
    }
}
