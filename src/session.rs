use crate::hist::{Histogram, HistogramError};
use crate::parse::parse_bin_count;
use crate::sample::{generate_random, generate_seeded};

/// The number of samples generated for a session by default.
pub const DEFAULT_SAMPLES: usize = 50_000;

/// The number of bins shown by default.
pub const DEFAULT_BINS: usize = 100;

/// Samples shared by all the histograms drawn during a session.
///
/// The samples are generated once and never change, every histogram is computed from them from scratch.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    samples: Vec<f64>,
}

impl Session {
    /// Start a session with the given `samples`.
    pub fn new(samples: Vec<f64>) -> Self {
        Session { samples }
    }

    /// Start a session with `n` standard normal samples. When `seed` is given, the samples are reproducible.
    ///
    /// # Examples
    ///
    /// ```
    /// use normhist::Session;
    ///
    /// let session = Session::generate(1000, Some(42));
    /// assert_eq!(session.samples().len(), 1000);
    /// assert_eq!(session, Session::generate(1000, Some(42)));
    /// ```
    pub fn generate(n: usize, seed: Option<u64>) -> Self {
        let samples = match seed {
            Some(seed) => generate_seeded(n, seed),
            None => generate_random(n),
        };
        Session::new(samples)
    }

    /// The samples of the session.
    #[inline]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Bin the samples into `number_of_bins` bins, see [`Histogram::new`].
    #[inline]
    pub fn histogram(&self, number_of_bins: usize) -> Result<Histogram, HistogramError> {
        Histogram::new(&self.samples, number_of_bins)
    }

    /// Handle the number of bins typed by the user.
    ///
    /// Returns the new histogram, or `None` if the `input` is not a valid number of bins,
    /// or the samples cannot be binned. Invalid input is ignored, nothing needs to be redrawn then.
    ///
    /// # Examples
    ///
    /// ```
    /// use normhist::Session;
    ///
    /// let session = Session::generate(1000, Some(42));
    /// assert_eq!(session.rebin("20").map(|h| h.len()), Some(20));
    /// assert!(session.rebin("2000").is_none());
    /// assert!(session.rebin("abc").is_none());
    /// ```
    pub fn rebin(&self, input: &str) -> Option<Histogram> {
        let number_of_bins = match parse_bin_count(input) {
            Ok(n) => n,
            Err(err) => {
                tracing::debug!("ignoring the number of bins: {}", err);
                return None;
            }
        };
        match self.histogram(number_of_bins) {
            Ok(hist) => Some(hist),
            Err(err) => {
                tracing::debug!("cannot bin the samples: {}", err);
                None
            }
        }
    }
}

impl Default for Session {
    /// Session with [`DEFAULT_SAMPLES`] random samples.
    fn default() -> Self {
        Session::generate(DEFAULT_SAMPLES, None)
    }
}

impl From<Vec<f64>> for Session {
    fn from(samples: Vec<f64>) -> Self {
        Session::new(samples)
    }
}
