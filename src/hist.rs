use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::bins::{sum_counts, Bin};

#[derive(Debug, Clone)]
pub enum HistogramError {
    Empty,
    ZeroBins,
    NotANumber(f64),
    RangeOverflow,
    Malformed(String),
}

impl fmt::Display for HistogramError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use HistogramError::*;
        match self {
            Empty => write!(f, "no data to bin"),
            ZeroBins => write!(f, "the number of bins needs to be positive"),
            NotANumber(value) => write!(f, "{} is not a number", value),
            RangeOverflow => write!(f, "the range of the data is too wide"),
            Malformed(reason) => write!(f, "malformed histogram: {}", reason),
        }
    }
}

impl Error for HistogramError {}

impl PartialEq for HistogramError {
    fn eq(&self, other: &Self) -> bool {
        use HistogramError::*;
        matches!(
            (self, other),
            (Empty, Empty)
                | (ZeroBins, ZeroBins)
                | (NotANumber(_), NotANumber(_))
                | (RangeOverflow, RangeOverflow)
                | (Malformed(_), Malformed(_))
        )
    }
}

/// Histogram with equal-width bins spanning the observed range of the data.
///
/// The histogram is computed from scratch by [`Histogram::new`], it never gets updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Contiguous [`Bin`]s sorted by their `start`.
    pub(crate) bins: Vec<Bin>,
    /// Smallest observed value.
    pub(crate) min: f64,
    /// Largest observed value.
    pub(crate) max: f64,
    /// Width of every bin, zero when all the values were the same.
    pub(crate) bin_size: f64,
}

impl Histogram {
    /// Partition the `data` into `number_of_bins` equal-width bins covering `[min(data), max(data)]`
    /// and count the values falling into each of them.
    ///
    /// The value equal to the maximum always lands in the last bin. When all the values are the same,
    /// or the range is too narrow to be split into bins of non-zero width, the histogram has a single
    /// bin holding all of them, regardless of `number_of_bins`.
    ///
    /// # Errors
    ///
    /// * The `data` is empty.
    /// * The `number_of_bins` is zero.
    /// * Some of the values are `f64::NAN` or infinite.
    /// * The distance between the smallest and largest values overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use normhist::Histogram;
    ///
    /// let data: Vec<f64> = (1..=10).map(|x| x as f64).collect();
    /// let hist = Histogram::new(&data, 2).unwrap();
    ///
    /// let bins: Vec<(f64, f64, u64)> = hist.iter().map(|bin| bin.into()).collect();
    /// assert_eq!(bins, vec![(1.0, 5.5, 5), (5.5, 10.0, 5)]);
    /// ```
    pub fn new(data: &[f64], number_of_bins: usize) -> Result<Self, HistogramError> {
        if number_of_bins == 0 {
            return Err(HistogramError::ZeroBins);
        }
        if let Some(value) = data.iter().find(|x| !x.is_finite()) {
            return Err(HistogramError::NotANumber(*value));
        }
        let (min, max) = match min_max(data) {
            Some(bounds) => bounds,
            None => return Err(HistogramError::Empty),
        };

        let range = max - min;
        if !range.is_finite() {
            return Err(HistogramError::RangeOverflow);
        }
        let bin_size = range / number_of_bins as f64;
        if bin_size == 0.0 {
            let mut bin = Bin::new(min, max);
            bin.count = data.len() as u64;
            return Ok(Histogram {
                bins: vec![bin],
                min,
                max,
                bin_size: 0.0,
            });
        }

        let mut bins: Vec<Bin> = (0..number_of_bins)
            .map(|i| Bin::new(min + i as f64 * bin_size, min + (i + 1) as f64 * bin_size))
            .collect();
        // the arithmetic end may miss the maximum by a rounding error
        if let Some(last) = bins.last_mut() {
            last.end = max;
        }

        for value in data {
            let index = ((value - min) / bin_size).floor() as usize;
            // values at the maximum compute to one past the last bin
            bins[index.min(number_of_bins - 1)].count += 1;
        }

        tracing::debug!(number_of_bins, min, max, bin_size, "binned {} values", data.len());

        Ok(Histogram {
            bins,
            min,
            max,
            bin_size,
        })
    }

    /// The bins sorted in ascending order.
    #[inline]
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Create an iterator over the bins.
    pub fn iter(&self) -> impl Iterator<Item = &Bin> {
        self.bins.iter()
    }

    /// The number of bins.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// The total count of all the values in the histogram.
    ///
    /// # Examples
    ///
    /// ```
    /// use normhist::Histogram;
    ///
    /// let hist = Histogram::new(&[0.5, 0.1, 0.3, 0.9], 3).unwrap();
    /// assert_eq!(hist.count(), 4);
    /// ```
    #[inline]
    pub fn count(&self) -> u64 {
        sum_counts(&self.bins)
    }

    /// The largest count among the bins.
    pub fn max_count(&self) -> u64 {
        self.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    /// Smallest observed value.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest observed value.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Width of the bins.
    #[inline]
    pub fn bin_size(&self) -> f64 {
        self.bin_size
    }

    /// Returns `true` if the range of the values had zero width and the histogram was collapsed to a single bin.
    ///
    /// # Examples
    ///
    /// ```
    /// use normhist::Histogram;
    ///
    /// let hist = Histogram::new(&[1.0, 1.0, 1.0, 1.0], 4).unwrap();
    /// assert!(hist.is_degenerate());
    /// assert_eq!(hist.len(), 1);
    /// assert_eq!(hist.count(), 4);
    /// ```
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.bin_size == 0.0
    }

    /// Check that the bins are laid out the way [`Histogram::new`] lays them out: at least one bin,
    /// contiguous, starting at `min` and ending at `max`, and only a single bin when `bin_size` is zero.
    ///
    /// Used for histograms that were not built from data, e.g. read from a file.
    pub(crate) fn validate(&self) -> Result<(), HistogramError> {
        use HistogramError::*;

        let (first, last) = match (self.bins.first(), self.bins.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(Empty),
        };
        if let Some(value) = [self.min, self.max, self.bin_size]
            .into_iter()
            .find(|x| !x.is_finite())
        {
            return Err(NotANumber(value));
        }
        if let Some(bin) = self.iter().find(|bin| !bin.is_valid()) {
            return Err(Malformed(format!(
                "[{}, {}] is not a valid interval",
                bin.start, bin.end
            )));
        }
        if first.start != self.min || last.end != self.max {
            return Err(Malformed(format!(
                "the bins do not span from {} to {}",
                self.min, self.max
            )));
        }
        if self.bins.windows(2).any(|pair| pair[0].end != pair[1].start) {
            return Err(Malformed(String::from("the bins are not contiguous")));
        }
        if self.bin_size < 0.0 || (self.bin_size == 0.0 && self.len() > 1) {
            return Err(Malformed(format!(
                "{} bins of size {}",
                self.len(),
                self.bin_size
            )));
        }
        Ok(())
    }
}

/// Smallest and largest values of the `data`, `None` if it is empty.
fn min_max(data: &[f64]) -> Option<(f64, f64)> {
    let first = *data.first()?;
    Some(
        data.iter()
            .fold((first, first), |(lo, hi), x| (lo.min(*x), hi.max(*x))),
    )
}

#[cfg(test)]
mod tests {
    use super::{Histogram, HistogramError};
    use crate::bins::Bin;
    use crate::sample::generate_seeded;
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn one_to_ten() -> Vec<f64> {
        (1..=10).map(|x| x as f64).collect()
    }

    #[test_case(vec![], 10, HistogramError::Empty ; "empty")]
    #[test_case(vec![1.0, 2.0], 0, HistogramError::ZeroBins ; "zero bins")]
    #[test_case(vec![], 0, HistogramError::ZeroBins ; "empty and zero bins")]
    #[test_case(vec![1.0, f64::NAN], 2, HistogramError::NotANumber(f64::NAN) ; "NaN")]
    #[test_case(vec![f64::INFINITY], 2, HistogramError::NotANumber(f64::INFINITY) ; "infinity")]
    #[test_case(vec![-f64::MAX, f64::MAX], 2, HistogramError::RangeOverflow ; "overflow")]
    fn invalid(data: Vec<f64>, number_of_bins: usize, expected: HistogramError) {
        assert_eq!(Histogram::new(&data, number_of_bins), Err(expected));
    }

    #[test]
    fn two_bins() {
        let hist = Histogram::new(&one_to_ten(), 2).unwrap();
        assert_eq!(
            hist,
            Histogram {
                bins: vec![
                    Bin {
                        start: 1.0,
                        end: 5.5,
                        count: 5
                    },
                    Bin {
                        start: 5.5,
                        end: 10.0,
                        count: 5
                    },
                ],
                min: 1.0,
                max: 10.0,
                bin_size: 4.5,
            }
        );
    }

    #[test_case(vec![3.0, -1.0, 2.5] ; "few")]
    #[test_case(one_to_ten() ; "integers")]
    #[test_case(generate_seeded(1000, 5) ; "normal")]
    fn single_bin(data: Vec<f64>) {
        let hist = Histogram::new(&data, 1).unwrap();
        assert_eq!(hist.len(), 1);
        let bin = hist.bins()[0];
        assert_eq!(bin.start, hist.min());
        assert_eq!(bin.end, hist.max());
        assert_eq!(bin.count, data.len() as u64);
    }

    #[test]
    fn maximum_is_counted() {
        // (10 - 0) / 0.1 computes to 100, one past the last bin
        let data = vec![0.0, 10.0];
        let hist = Histogram::new(&data, 100).unwrap();
        assert_eq!(hist.count(), 2);
        assert_eq!(hist.bins()[0].count, 1);
        assert_eq!(hist.bins()[99].count, 1);
        assert_eq!(hist.bins()[99].end, 10.0);
    }

    #[test_case(vec![1.0, 1.0, 1.0, 1.0], 4 ; "four ones")]
    #[test_case(vec![-2.5], 1 ; "single value")]
    #[test_case(vec![0.0; 10], 1000 ; "many bins")]
    fn degenerate(data: Vec<f64>, number_of_bins: usize) {
        let hist = Histogram::new(&data, number_of_bins).unwrap();
        assert!(hist.is_degenerate());
        assert_eq!(hist.len(), 1);
        assert_eq!(hist.count(), data.len() as u64);
        assert_eq!(hist.bin_size(), 0.0);
        assert_eq!(hist.min(), hist.max());
    }

    #[test_case(vec![0.0, 5e-324], 10 ; "smallest subnormal")]
    #[test_case(vec![5e-324, 0.0, 1e-323], 1000 ; "few subnormals")]
    fn too_narrow_to_split(data: Vec<f64>, number_of_bins: usize) {
        let hist = Histogram::new(&data, number_of_bins).unwrap();
        assert!(hist.is_degenerate());
        assert_eq!(hist.len(), 1);
        assert_eq!(hist.count(), data.len() as u64);
        assert!(hist.min() < hist.max());
        let bin = hist.bins()[0];
        assert_eq!((bin.start, bin.end), (hist.min(), hist.max()));
        assert_eq!(hist.validate(), Ok(()));
    }

    #[test_case(vec![1.0, 1.0], 3 ; "degenerate")]
    #[test_case(one_to_ten(), 4 ; "integers")]
    #[test_case(generate_seeded(10_000, 3), 1000 ; "normal")]
    fn built_histograms_are_valid(data: Vec<f64>, number_of_bins: usize) {
        assert_eq!(Histogram::new(&data, number_of_bins).unwrap().validate(), Ok(()));
    }

    #[test]
    fn malformed() {
        let valid = Histogram::new(&one_to_ten(), 2).unwrap();

        let mut hist = valid.clone();
        hist.bins.clear();
        assert_eq!(hist.validate(), Err(HistogramError::Empty));

        let mut hist = valid.clone();
        hist.bins[1].start = 6.0;
        assert_eq!(
            hist.validate(),
            Err(HistogramError::Malformed(String::new()))
        );

        let mut hist = valid.clone();
        hist.max = 11.0;
        assert_eq!(
            hist.validate(),
            Err(HistogramError::Malformed(String::new()))
        );

        let mut hist = valid.clone();
        hist.bins[0].end = f64::NAN;
        assert_eq!(
            hist.validate(),
            Err(HistogramError::Malformed(String::new()))
        );

        let mut hist = valid.clone();
        hist.bin_size = 0.0;
        assert_eq!(
            hist.validate(),
            Err(HistogramError::Malformed(String::new()))
        );

        let mut hist = valid;
        hist.min = f64::NEG_INFINITY;
        assert_eq!(
            hist.validate(),
            Err(HistogramError::NotANumber(f64::NAN))
        );
    }

    #[test_case(1 ; "one")]
    #[test_case(7 ; "seven")]
    #[test_case(100 ; "hundred")]
    #[test_case(1000 ; "thousand")]
    fn normal_samples(number_of_bins: usize) {
        let data = generate_seeded(50_000, 42);
        let hist = Histogram::new(&data, number_of_bins).unwrap();

        assert_eq!(hist.len(), number_of_bins);
        assert_eq!(hist.count(), data.len() as u64);
        assert!(!hist.is_degenerate());

        let bins = hist.bins();
        assert_eq!(bins.first().unwrap().start, hist.min());
        assert_eq!(bins.last().unwrap().end, hist.max());
        for pair in bins.windows(2) {
            // contiguous and sorted
            assert_eq!(pair[0].end, pair[1].start);
            assert!(pair[0].start < pair[1].start);
        }
        for bin in bins {
            assert_relative_eq!(bin.width(), hist.bin_size(), max_relative = 1e-6);
        }
    }

    #[test]
    fn counts_agree_with_intervals() {
        let data = generate_seeded(5_000, 11);
        let hist = Histogram::new(&data, 20).unwrap();
        let last = hist.len() - 1;
        for (index, bin) in hist.iter().enumerate() {
            let expected = data
                .iter()
                .filter(|x| bin.contains(**x, index == last))
                .count() as u64;
            // floating point may move values lying exactly at the boundaries
            assert!(bin.count.abs_diff(expected) <= 1);
        }
    }

    #[test]
    fn idempotent() {
        let data = generate_seeded(1000, 1);
        assert_eq!(Histogram::new(&data, 13), Histogram::new(&data, 13));
    }

    #[test]
    fn rebinning_starts_over() {
        let data = one_to_ten();
        let five = Histogram::new(&data, 5).unwrap();
        let _ = Histogram::new(&data, 3).unwrap();
        assert_eq!(Histogram::new(&data, 5).unwrap(), five);
        assert_eq!(
            five.iter().map(|bin| bin.count).collect::<Vec<u64>>(),
            vec![2, 2, 2, 2, 2]
        );
        assert_eq!(five.max_count(), 2);
    }
}
