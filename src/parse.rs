use std::error::Error;
use std::fmt;

/// The smallest accepted number of bins.
pub const MIN_BINS: usize = 1;

/// The largest accepted number of bins.
pub const MAX_BINS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinCountError {
    Failed(String),
    OutOfRange(i64),
    Missing,
}

impl fmt::Display for BinCountError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use BinCountError::*;
        match self {
            Failed(input) => write!(f, "{} is not an integer", input),
            OutOfRange(value) => write!(
                f,
                "{} is not between {} and {}",
                value, MIN_BINS, MAX_BINS
            ),
            Missing => write!(f, "nothing to read"),
        }
    }
}

impl Error for BinCountError {}

/// Parse the number of bins typed by the user.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// It will throw error when:
/// * the input is blank,
/// * it is not an integer (decimals like `"10.5"` are rejected as well),
/// * the integer is outside of the `MIN_BINS..=MAX_BINS` range.
///
/// # Examples
///
/// ```
/// use normhist::parse::{parse_bin_count, BinCountError};
///
/// assert_eq!(parse_bin_count(" 25\n"), Ok(25));
/// assert_eq!(parse_bin_count("0"), Err(BinCountError::OutOfRange(0)));
/// ```
pub fn parse_bin_count(input: &str) -> Result<usize, BinCountError> {
    let field = input.trim();
    if field.is_empty() {
        return Err(BinCountError::Missing);
    }
    let value: i64 = field
        .parse()
        .map_err(|_| BinCountError::Failed(field.to_owned()))?;
    match usize::try_from(value) {
        Ok(count) if (MIN_BINS..=MAX_BINS).contains(&count) => Ok(count),
        _ => Err(BinCountError::OutOfRange(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_bin_count, BinCountError};
    use test_case::test_case;

    #[test_case("1", 1 ; "lower bound")]
    #[test_case("100", 100 ; "default")]
    #[test_case("1000", 1000 ; "upper bound")]
    #[test_case("  42 \n", 42 ; "whitespace")]
    #[test_case("+7", 7 ; "plus sign")]
    fn parse_ok(input: &str, expected: usize) {
        assert_eq!(parse_bin_count(input), Ok(expected));
    }

    #[test]
    fn parse_err() {
        assert_eq!(parse_bin_count(""), Err(BinCountError::Missing));
        assert_eq!(parse_bin_count(" \t"), Err(BinCountError::Missing));
        assert_eq!(parse_bin_count("0"), Err(BinCountError::OutOfRange(0)));
        assert_eq!(parse_bin_count("-5"), Err(BinCountError::OutOfRange(-5)));
        assert_eq!(
            parse_bin_count("1001"),
            Err(BinCountError::OutOfRange(1001))
        );
        assert_eq!(
            parse_bin_count("10.5"),
            Err(BinCountError::Failed(String::from("10.5")))
        );
        assert_eq!(
            parse_bin_count("12abc"),
            Err(BinCountError::Failed(String::from("12abc")))
        );
        assert_eq!(
            parse_bin_count("99999999999999999999"),
            Err(BinCountError::Failed(String::from("99999999999999999999")))
        );
    }

    #[test]
    fn display() {
        assert_eq!(
            BinCountError::OutOfRange(0).to_string(),
            "0 is not between 1 and 1000"
        );
        assert_eq!(
            BinCountError::Failed(String::from("x")).to_string(),
            "x is not an integer"
        );
    }
}
