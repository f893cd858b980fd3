mod bins;
mod hist;
mod label;
pub mod parse;
pub mod sample;
mod serde;
mod session;
pub mod stats;

pub use self::bins::Bin;
pub use self::hist::{Histogram, HistogramError};
pub use self::label::{Bar, DEFAULT_PRECISION, MAX_PRECISION};
pub use self::parse::{BinCountError, MAX_BINS, MIN_BINS};
pub use self::sample::PolarNormal;
pub use self::session::{Session, DEFAULT_BINS, DEFAULT_SAMPLES};
