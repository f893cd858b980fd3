use serde::{Deserialize, Serialize};

/// Bin of a [`Histogram`](crate::hist::Histogram).
///
/// A bin covers the half-open interval `[start, end)`, except for the last bin of a histogram
/// that is closed, `[start, end]`, so it includes the largest value. The bounds are not rounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Bin {
    /// Lower bound of the interval.
    pub start: f64,
    /// Upper bound of the interval.
    pub end: f64,
    /// The count of the values that fell into the bin.
    pub count: u64,
}

impl Bin {
    /// Initialize an empty bin for the interval from `start` to `end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use normhist::Bin;
    ///
    /// let bin = Bin::new(-1.0, 1.0);
    /// assert_eq!(bin.count, 0);
    /// assert_eq!(bin.width(), 2.0);
    /// ```
    #[inline]
    pub fn new(start: f64, end: f64) -> Self {
        Bin {
            start,
            end,
            count: 0,
        }
    }

    /// Returns `true` if both bounds are numbers and `start` is not larger than `end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use normhist::Bin;
    ///
    /// assert!(Bin::new(0.0, 0.0).is_valid());
    /// assert!(!Bin::new(1.0, 0.0).is_valid());
    /// assert!(!Bin::new(f64::NAN, 0.0).is_valid());
    /// ```
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start <= self.end
    }

    /// Width of the interval.
    #[inline]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Check if the `value` falls into the bin. Pass `closed = true` for the last bin of a histogram.
    ///
    /// # Examples
    ///
    /// ```
    /// use normhist::Bin;
    ///
    /// let bin = Bin::new(0.0, 1.0);
    /// assert!(bin.contains(0.0, false));
    /// assert!(!bin.contains(1.0, false));
    /// assert!(bin.contains(1.0, true));
    /// ```
    #[inline]
    pub fn contains(&self, value: f64, closed: bool) -> bool {
        if closed {
            self.start <= value && value <= self.end
        } else {
            self.start <= value && value < self.end
        }
    }
}

impl From<&Bin> for (f64, f64, u64) {
    /// Convert `Bin` to a `(start, end, count)` tuple.
    fn from(bin: &Bin) -> Self {
        (bin.start, bin.end, bin.count)
    }
}

/// Sum the counts of all the bins.
#[inline]
pub(crate) fn sum_counts(bins: &[Bin]) -> u64 {
    bins.iter().fold(0, |acc, x| acc + x.count)
}
