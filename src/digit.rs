//! The cell type of [`BigDec`](crate::BigDec) and its radix constants.
//!
//! A number is a little-endian array of *cells*, each holding one digit in
//! base `BASE_POW = 10^BASE_DIGS`. Cells are signed so that subtraction can
//! leave a transient negative value before the borrow pass normalizes it;
//! products and carries are accumulated in the unsigned [`BigDigit`] width.

use num_integer::Integer;

use crate::{Error, Result};

/// One base-`10^9` cell. Negative only transiently inside `sub_arrays`.
pub type Digit = i32;

/// The native width used for per-cell products, carries, and the
/// `bigdig` integer conversions (`bc`'s `unsigned long`).
pub type BigDigit = u64;

/// Decimal digits per cell.
pub const BASE_DIGS: usize = 9;

/// The cell radix, `10^BASE_DIGS`.
pub const BASE_POW: BigDigit = 1_000_000_000;

/// Default cell capacity of a freshly created number.
pub const DEF_SIZE: usize = 16;

/// Operand length (in cells) below which schoolbook multiplication wins
/// over Karatsuba recursion.
pub const KARATSUBA_LEN: usize = 32;

/// Hard cap on cell counts; shifts past this report [`Error::Overflow`].
pub const MAX_CELLS: usize = usize::MAX / core::mem::size_of::<Digit>();

/// `10^i` for `i in 0..=BASE_DIGS`.
pub const POW10: [BigDigit; BASE_DIGS + 1] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/// Number of fractional cells needed to hold `scale` decimal digits.
#[inline]
pub(crate) fn rdx_from_scale(scale: usize) -> usize {
    Integer::div_ceil(&scale, &BASE_DIGS)
}

/// Splits a decimal place count into whole cells and leftover digits.
#[inline]
pub(crate) fn cells_and_digits(places: usize) -> (usize, usize) {
    Integer::div_rem(&places, &BASE_DIGS)
}

/// Decimal digit count of `v`, with `dec_len(0) == 1`.
#[inline]
pub(crate) fn dec_len(mut v: BigDigit) -> usize {
    let mut len = 1;
    while v >= 10 {
        v /= 10;
        len += 1;
    }
    len
}

/// Checked size addition; the growable-buffer helper of the host VM.
#[inline]
pub(crate) fn grow_size(a: usize, b: usize) -> Result<usize> {
    a.checked_add(b).ok_or(Error::Overflow)
}
