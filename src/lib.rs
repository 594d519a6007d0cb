//! Arbitrary-precision signed fixed-point decimal arithmetic, in the shape
//! a POSIX `bc`/`dc` interpreter needs it.
//!
//! Values are stored as little-endian arrays of base-`10^9` cells with an
//! explicit decimal scale, so decimal parsing and printing are exact. The
//! operation set is the calculator core: add, subtract, multiply
//! (schoolbook and Karatsuba), divide with per-place quotient estimation,
//! remainder, divmod, integer power, modular exponentiation, Newton square
//! root, and radix conversion on both ends.
//!
//! Every operation takes the result scale explicitly and an [`Interrupt`]
//! handle that its inner loops poll, so a host REPL can cancel long
//! computations from a signal handler:
//!
//! ```
//! use num_bigdec::{BigDec, Interrupt};
//!
//! let int = Interrupt::new();
//! let a: BigDec = "1".parse().unwrap();
//! let b: BigDec = "3".parse().unwrap();
//! let q = a.div(&b, 30, &int).unwrap();
//! assert_eq!(q.to_string(), "0.333333333333333333333333333333");
//! ```
//!
//! The usual operator traits are also implemented as scale-free
//! conveniences (`+`/`-`/`*` exact, `/`/`%` at the wider operand scale),
//! along with [`num_traits::Num`], [`num_traits::Signed`], and the
//! primitive conversions:
//!
//! ```
//! use num_bigdec::BigDec;
//!
//! let x: BigDec = "2.5".parse().unwrap();
//! let y: BigDec = "0.5".parse().unwrap();
//! assert_eq!((&x * &y).to_string(), "1.25");
//! assert_eq!((&x / &y).to_string(), "5.0");
//! ```
//!
//! Printing goes through a [`LineWriter`], which owns the output column
//! counter and wraps long lines with a backslash continuation exactly like
//! bc. Base conversion covers single-character digits through base 16,
//! space-separated digit groups beyond, scientific and engineering
//! exponent forms, and dc's raw byte stream.
//!
//! ## Features
//!
//! - `std` (default): `std::error::Error` impls.
//! - `rand`: the [`RandBigDec`] sampling trait.
//! - `serde`: string-form `Serialize`/`Deserialize`.
//! - `zeroize`: wiping of the digit buffer.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod algorithms;
mod bigdec;
mod bigrand;
mod digit;
mod error;
mod interrupt;

pub use crate::bigdec::print::{CharSink, LineWriter};
pub use crate::bigdec::BigDec;
#[cfg(feature = "rand")]
pub use crate::bigrand::RandBigDec;
pub use crate::digit::{
    BigDigit, Digit, BASE_DIGS, BASE_POW, DEF_SIZE, KARATSUBA_LEN, MAX_CELLS, POW10,
};
pub use crate::error::{Error, ParseBigDecError, Result};
pub use crate::interrupt::Interrupt;
