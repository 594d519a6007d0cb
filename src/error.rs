use core::fmt;

/// Outcome of a numeric operation that did not produce a value.
///
/// Mathematical errors are detected synchronously and leave the would-be
/// output untouched. `Interrupted` is a cooperative halt, not a failure:
/// it is reported whenever the [`Interrupt`](crate::Interrupt) flag is
/// observed inside a long-running loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The interrupt flag was raised while the operation was running.
    Interrupted,
    /// Division (or modulus) by zero.
    DivideByZero,
    /// A negative value where a non-negative one is required.
    Negative,
    /// A fractional value where an integer is required.
    NonInteger,
    /// The result would not fit in the native width or cell-count limit.
    Overflow,
}

pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::Interrupted => "interrupted",
            Error::DivideByZero => "divide by zero",
            Error::Negative => "negative number",
            Error::NonInteger => "non-integer number",
            Error::Overflow => "number overflow",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// An error which can be returned when parsing a [`BigDec`](crate::BigDec).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBigDecError {
    kind: BigDecErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BigDecErrorKind {
    Empty,
    InvalidDigit,
    InvalidBase,
}

impl ParseBigDecError {
    pub(crate) fn empty() -> Self {
        ParseBigDecError {
            kind: BigDecErrorKind::Empty,
        }
    }

    pub(crate) fn invalid() -> Self {
        ParseBigDecError {
            kind: BigDecErrorKind::InvalidDigit,
        }
    }

    pub(crate) fn invalid_base() -> Self {
        ParseBigDecError {
            kind: BigDecErrorKind::InvalidBase,
        }
    }
}

impl fmt::Display for ParseBigDecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            BigDecErrorKind::Empty => "cannot parse decimal from empty string",
            BigDecErrorKind::InvalidDigit => "invalid digit found in string",
            BigDecErrorKind::InvalidBase => "base must be in 2..=36",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseBigDecError {}
