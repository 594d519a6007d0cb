//! The arbitrary-precision signed fixed-point decimal type.

use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use num_traits::{FromPrimitive, Num, One, Signed, ToPrimitive, Zero};
use smallvec::SmallVec;

use crate::digit::{dec_len, rdx_from_scale, BigDigit, Digit, BASE_DIGS, BASE_POW, DEF_SIZE};
use crate::{Error, Interrupt, ParseBigDecError, Result};

pub(crate) mod addition;
pub(crate) mod division;
pub(crate) mod multiplication;
pub(crate) mod parse;
pub(crate) mod power;
pub(crate) mod print;
pub(crate) mod shift;
pub(crate) mod sqrt;
pub(crate) mod subtraction;

#[cfg(feature = "serde")]
mod serde;
#[cfg(feature = "zeroize")]
mod zeroize;

/// Backing storage for the cell array. The inline capacity doubles as the
/// default allocation size, so small constants never touch the heap.
pub(crate) type DigitVec = SmallVec<[Digit; DEF_SIZE]>;

/// An arbitrary-precision signed decimal number.
///
/// The value is `(-1)^neg * Σ digits[i] * BASE_POW^(i - rdx)`, stored
/// least-significant cell first. `scale` counts the fractional *decimal*
/// digits the value carries; `rdx` is the derived fractional *cell* count
/// `ceil(scale / 9)`. When the two disagree, the low `9*rdx - scale`
/// decimal digits of cell 0 are zero.
///
/// Invariants on every value returned from a public operation:
///
/// 1. the top cell is nonzero (no leading-zero cells);
/// 2. `digits.len() >= rdx` whenever the number is nonzero;
/// 3. every cell is in `[0, BASE_POW)`;
/// 4. `neg` is `false` when the number is zero;
/// 5. `rdx == rdx_from_scale(scale)`.
///
/// The canonical zero has an empty cell array (but may carry a scale).
#[derive(Debug, Clone)]
pub struct BigDec {
    pub(crate) digits: DigitVec,
    pub(crate) rdx: usize,
    pub(crate) scale: usize,
    pub(crate) neg: bool,
}

impl Default for BigDec {
    fn default() -> Self {
        Self::zero()
    }
}

impl BigDec {
    /// The canonical zero, with scale 0.
    pub fn zero() -> Self {
        BigDec {
            digits: DigitVec::new(),
            rdx: 0,
            scale: 0,
            neg: false,
        }
    }

    /// The integer one.
    pub fn one() -> Self {
        let mut digits = DigitVec::new();
        digits.push(1);
        BigDec {
            digits,
            rdx: 0,
            scale: 0,
            neg: false,
        }
    }

    /// A zero whose cell buffer can hold `req` cells without reallocating.
    pub fn with_capacity(req: usize) -> Self {
        BigDec {
            digits: DigitVec::with_capacity(req.max(DEF_SIZE)),
            rdx: 0,
            scale: 0,
            neg: false,
        }
    }

    /// Builds a number from raw cells. The pad digits of cell 0 are masked
    /// to keep `scale` honest and the result is cleaned.
    pub(crate) fn from_parts(mut digits: DigitVec, scale: usize, neg: bool) -> Self {
        let rdx = rdx_from_scale(scale);
        let pad = rdx * BASE_DIGS - scale;
        if pad != 0 {
            if let Some(low) = digits.first_mut() {
                let mask = POW10_DIGIT[pad];
                *low -= *low % mask;
            }
        }
        let mut n = BigDec {
            digits,
            rdx,
            scale,
            neg,
        };
        n.clean();
        n
    }

    /// Grows the cell buffer to at least `req` cells of capacity, as
    /// computed by the `*_req` sizers in [`algorithms`](crate::algorithms).
    pub fn expand(&mut self, req: usize) {
        let req = req.max(DEF_SIZE);
        if req > self.digits.capacity() {
            self.digits.reserve(req - self.digits.len());
        }
    }

    /// Resets to zero at the given scale, keeping the allocation.
    pub fn set_to_zero(&mut self, scale: usize) {
        self.digits.clear();
        self.neg = false;
        self.scale = scale;
        self.rdx = rdx_from_scale(scale);
    }

    /// Number of active cells.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.digits.len()
    }

    /// Number of integer (non-fractional) cells.
    #[inline]
    pub(crate) fn int_cells(&self) -> usize {
        if self.digits.is_empty() {
            0
        } else {
            self.digits.len() - self.rdx
        }
    }

    /// Count of decimal digits in the integer part, leading zeros excluded.
    pub fn int_digits(&self) -> usize {
        let ic = self.int_cells();
        if ic == 0 {
            0
        } else {
            (ic - 1) * BASE_DIGS + dec_len(self.digits[self.digits.len() - 1] as BigDigit)
        }
    }

    /// The number of fractional decimal digits this value carries.
    #[inline]
    pub fn scale(&self) -> usize {
        self.scale
    }

    /// The number of fractional cells, `ceil(scale / 9)`.
    #[inline]
    pub fn rdx(&self) -> usize {
        self.rdx
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Exactly the integer one; `1.0` at a nonzero scale does not count,
    /// which keeps the multiplication and power shortcuts scale-exact.
    #[inline]
    pub(crate) fn is_one(&self) -> bool {
        self.digits.len() == 1 && self.rdx == 0 && self.digits[0] == 1
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.neg
    }

    /// Sign of the value relative to zero.
    pub fn cmp_zero(&self) -> Ordering {
        if self.digits.is_empty() {
            Ordering::Equal
        } else if self.neg {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Trims leading-zero cells, normalizes the sign of zero, and restores
    /// `len >= rdx` so the fractional window stays addressable.
    pub(crate) fn clean(&mut self) {
        while self
            .digits
            .last()
            .map_or(false, |&d| d == 0)
        {
            self.digits.pop();
        }
        if self.digits.is_empty() {
            self.neg = false;
        } else if self.digits.len() < self.rdx {
            self.digits.resize(self.rdx, 0);
        }
    }

    /// Converts a non-negative integer value to the native width.
    ///
    /// The fractional part, if any, is ignored (truncation toward zero).
    /// Reports `Negative` for negative input and `Overflow` when the
    /// integer part does not fit.
    pub fn to_bigdig(&self) -> Result<BigDigit> {
        if self.neg {
            return Err(Error::Negative);
        }
        let mut r: BigDigit = 0;
        for i in (self.rdx..self.digits.len()).rev() {
            let prev = r.checked_mul(BASE_POW).ok_or(Error::Overflow)?;
            r = prev
                .checked_add(self.digits[i] as BigDigit)
                .ok_or(Error::Overflow)?;
        }
        Ok(r)
    }

    /// Builds an integer from the native width.
    pub fn from_bigdig(mut val: BigDigit) -> Self {
        let mut digits = DigitVec::new();
        while val != 0 {
            digits.push((val % BASE_POW) as Digit);
            val /= BASE_POW;
        }
        BigDec {
            digits,
            rdx: 0,
            scale: 0,
            neg: false,
        }
    }

    /// Magnitude copy of `a` plus the integer value of `b`, for the shift
    /// and scale operations that take their amount as a number.
    pub(crate) fn intop(&self, b: &BigDec) -> Result<(BigDec, BigDigit)> {
        if b.rdx != 0 {
            return Err(Error::NonInteger);
        }
        let val = b.to_bigdig()?;
        Ok((self.clone(), val))
    }

    /// Interruptible three-way comparison.
    pub fn checked_cmp(&self, other: &BigDec, int: &Interrupt) -> Result<Ordering> {
        Ok(self.cmp_raw(other, Some(int))?.cmp(&0))
    }

    /// Signed comparison returning the cell distance of the first
    /// difference, which the square-root oracle reads as a convergence
    /// measure. Zero operands, sign mismatches, and unequal integer widths
    /// resolve before any cell is touched.
    pub(crate) fn cmp_raw(&self, other: &BigDec, int: Option<&Interrupt>) -> Result<isize> {
        if core::ptr::eq(self, other) {
            return Ok(0);
        }
        if self.is_zero() {
            return Ok(match other.cmp_zero() {
                Ordering::Equal => 0,
                Ordering::Less => 1,
                Ordering::Greater => -1,
            });
        }
        if other.is_zero() {
            return Ok(if self.neg { -1 } else { 1 });
        }

        let mut neg = false;
        if self.neg {
            if other.neg {
                neg = true;
            } else {
                return Ok(-1);
            }
        } else if other.neg {
            return Ok(1);
        }

        self.cmp_mag_inner(other, neg, int)
    }

    /// Magnitude comparison, ignoring both signs. Zero still compares
    /// below any nonzero magnitude.
    pub(crate) fn cmp_mag(&self, other: &BigDec, int: Option<&Interrupt>) -> Result<isize> {
        if core::ptr::eq(self, other) {
            return Ok(0);
        }
        if self.is_zero() {
            return Ok(if other.is_zero() { 0 } else { -1 });
        }
        if other.is_zero() {
            return Ok(1);
        }
        self.cmp_mag_inner(other, false, int)
    }

    fn cmp_mag_inner(
        &self,
        other: &BigDec,
        neg: bool,
        int: Option<&Interrupt>,
    ) -> Result<isize> {
        let a_int = self.int_cells();
        let b_int = other.int_cells();
        let int_diff = a_int as isize - b_int as isize;
        if int_diff != 0 {
            return Ok(if neg { -int_diff } else { int_diff });
        }

        let a_max = self.rdx > other.rdx;
        let (max_num, min_num, min_rdx, diff) = if a_max {
            (
                &self.digits[self.rdx - other.rdx..],
                &other.digits[..],
                other.rdx,
                self.rdx - other.rdx,
            )
        } else {
            (
                &other.digits[other.rdx - self.rdx..],
                &self.digits[..],
                self.rdx,
                other.rdx - self.rdx,
            )
        };

        let flip = if a_max == neg { -1 } else { 1 };
        let cmp = cmp_cells(max_num, min_num, b_int + min_rdx, int)?;
        if cmp != 0 {
            return Ok(cmp * flip);
        }

        // The overlap is equal; any nonzero low cell of the wider-fraction
        // operand tips the balance.
        let full_max = if a_max {
            &self.digits[..]
        } else {
            &other.digits[..]
        };
        for i in (0..diff).rev() {
            crate::interrupt::poll(int)?;
            if full_max[i] != 0 {
                return Ok(flip);
            }
        }
        Ok(0)
    }

    /// Magnitude with the sign cleared.
    pub fn abs(&self) -> BigDec {
        let mut r = self.clone();
        r.neg = false;
        r
    }

    /// Canonical fractional representation: cells with the low all-zero
    /// fractional cells stripped, and the effective rdx. Numerically equal
    /// values share this form regardless of their scale.
    fn canonical_cells(&self) -> (&[Digit], usize) {
        let strip = self.digits[..self.rdx]
            .iter()
            .take_while(|&&d| d == 0)
            .count();
        (&self.digits[strip..], self.rdx - strip)
    }
}

/// `10^i` as a cell value, for pad masking.
pub(crate) const POW10_DIGIT: [Digit; BASE_DIGS + 1] = [
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

/// Compares the top `len` cells of two equal-significance windows,
/// returning `±(i + 1)` where `i` is the offset of the first differing
/// cell, or 0 when the windows agree.
pub fn cmp_cells(
    a: &[Digit],
    b: &[Digit],
    len: usize,
    int: Option<&Interrupt>,
) -> Result<isize> {
    for i in (0..len).rev() {
        crate::interrupt::poll(int)?;
        let c = a[i] - b[i];
        if c != 0 {
            let mag = (i + 1) as isize;
            return Ok(if c < 0 { -mag } else { mag });
        }
    }
    Ok(0)
}

// --- comparison and hashing traits ---

impl PartialEq for BigDec {
    fn eq(&self, other: &BigDec) -> bool {
        match self.cmp_raw(other, None) {
            Ok(c) => c == 0,
            Err(_) => unreachable!("comparison without an interrupt handle"),
        }
    }
}

impl Eq for BigDec {}

impl PartialOrd for BigDec {
    fn partial_cmp(&self, other: &BigDec) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigDec {
    fn cmp(&self, other: &BigDec) -> Ordering {
        match self.cmp_raw(other, None) {
            Ok(c) => c.cmp(&0),
            Err(_) => unreachable!("comparison without an interrupt handle"),
        }
    }
}

impl Hash for BigDec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (cells, rdx) = if self.is_zero() {
            (&[][..], 0)
        } else {
            self.canonical_cells()
        };
        self.neg.hash(state);
        rdx.hash(state);
        cells.hash(state);
    }
}

// --- conversions ---

impl From<u64> for BigDec {
    fn from(val: u64) -> Self {
        BigDec::from_bigdig(val)
    }
}

impl From<i64> for BigDec {
    fn from(val: i64) -> Self {
        let mut n = BigDec::from_bigdig(val.unsigned_abs());
        n.neg = val < 0 && !n.is_zero();
        n
    }
}

impl FromStr for BigDec {
    type Err = ParseBigDecError;

    fn from_str(s: &str) -> core::result::Result<BigDec, ParseBigDecError> {
        BigDec::from_str_radix(s, 10)
    }
}

impl fmt::Display for BigDec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_radix(10))
    }
}

// --- operator traits ---
//
// The operators are scale-free conveniences over the scale-taking methods:
// `+`/`-`/`*` are exact, `/` and `%` run at `max(a.scale, b.scale)`. No
// interrupt handle is threaded through, so the only failure left is a zero
// divisor, which panics like it does for the primitive integers.

macro_rules! forward_binop {
    (impl $imp:ident, $method:ident) => {
        impl $imp<BigDec> for BigDec {
            type Output = BigDec;

            #[inline]
            fn $method(self, other: BigDec) -> BigDec {
                $imp::$method(&self, &other)
            }
        }

        impl $imp<&BigDec> for BigDec {
            type Output = BigDec;

            #[inline]
            fn $method(self, other: &BigDec) -> BigDec {
                $imp::$method(&self, other)
            }
        }

        impl $imp<BigDec> for &BigDec {
            type Output = BigDec;

            #[inline]
            fn $method(self, other: BigDec) -> BigDec {
                $imp::$method(self, &other)
            }
        }
    };
}

use core::ops::{Add, Div, Mul, Neg, Rem, Sub};

fn infallible(r: Result<BigDec>) -> BigDec {
    match r {
        Ok(n) => n,
        Err(_) => unreachable!("operation without an interrupt handle"),
    }
}

impl Add<&BigDec> for &BigDec {
    type Output = BigDec;

    fn add(self, other: &BigDec) -> BigDec {
        infallible(self.add(other, 0, &Interrupt::new()))
    }
}

impl Sub<&BigDec> for &BigDec {
    type Output = BigDec;

    fn sub(self, other: &BigDec) -> BigDec {
        infallible(self.sub(other, 0, &Interrupt::new()))
    }
}

impl Mul<&BigDec> for &BigDec {
    type Output = BigDec;

    fn mul(self, other: &BigDec) -> BigDec {
        let scale = self.scale + other.scale;
        infallible(self.mul(other, scale, &Interrupt::new()))
    }
}

impl Div<&BigDec> for &BigDec {
    type Output = BigDec;

    fn div(self, other: &BigDec) -> BigDec {
        let scale = self.scale.max(other.scale);
        match self.div(other, scale, &Interrupt::new()) {
            Ok(n) => n,
            Err(e) => panic!("division failed: {}", e),
        }
    }
}

impl Rem<&BigDec> for &BigDec {
    type Output = BigDec;

    fn rem(self, other: &BigDec) -> BigDec {
        let scale = self.scale.max(other.scale);
        match self.rem(other, scale, &Interrupt::new()) {
            Ok(n) => n,
            Err(e) => panic!("remainder failed: {}", e),
        }
    }
}

forward_binop!(impl Add, add);
forward_binop!(impl Sub, sub);
forward_binop!(impl Mul, mul);
forward_binop!(impl Div, div);
forward_binop!(impl Rem, rem);

impl Neg for BigDec {
    type Output = BigDec;

    fn neg(mut self) -> BigDec {
        if !self.is_zero() {
            self.neg = !self.neg;
        }
        self
    }
}

impl Neg for &BigDec {
    type Output = BigDec;

    fn neg(self) -> BigDec {
        -self.clone()
    }
}

// --- num-traits ---

impl Zero for BigDec {
    fn zero() -> BigDec {
        BigDec::zero()
    }

    fn is_zero(&self) -> bool {
        BigDec::is_zero(self)
    }
}

impl One for BigDec {
    fn one() -> BigDec {
        BigDec::one()
    }
}

impl Num for BigDec {
    type FromStrRadixErr = ParseBigDecError;

    fn from_str_radix(s: &str, radix: u32) -> core::result::Result<BigDec, ParseBigDecError> {
        BigDec::from_str_radix(s, radix as u64)
    }
}

impl Signed for BigDec {
    fn abs(&self) -> BigDec {
        BigDec::abs(self)
    }

    fn abs_sub(&self, other: &BigDec) -> BigDec {
        if self <= other {
            Zero::zero()
        } else {
            self - other
        }
    }

    fn signum(&self) -> BigDec {
        match self.cmp_zero() {
            Ordering::Greater => One::one(),
            Ordering::Equal => Zero::zero(),
            Ordering::Less => -BigDec::one(),
        }
    }

    fn is_positive(&self) -> bool {
        self.cmp_zero() == Ordering::Greater
    }

    fn is_negative(&self) -> bool {
        self.neg
    }
}

impl FromPrimitive for BigDec {
    fn from_i64(n: i64) -> Option<BigDec> {
        Some(BigDec::from(n))
    }

    fn from_u64(n: u64) -> Option<BigDec> {
        Some(BigDec::from(n))
    }
}

impl ToPrimitive for BigDec {
    fn to_i64(&self) -> Option<i64> {
        let mag = self.abs().to_bigdig().ok()?;
        if self.neg {
            if mag > i64::MIN.unsigned_abs() {
                None
            } else {
                Some((mag as i64).wrapping_neg())
            }
        } else {
            i64::try_from(mag).ok()
        }
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_bigdig().ok()
    }
}

impl BigDec {
    /// Renders the value in the given base, without line wrapping. See
    /// [`print`](Self::print) for the wrapping printer.
    pub fn to_string_radix(&self, base: u64) -> String {
        let mut out = String::new();
        {
            let mut w = crate::LineWriter::unwrapped(&mut out);
            match self.print(base, false, &mut w, &Interrupt::new()) {
                Ok(()) => {}
                Err(_) => unreachable!("printing without an interrupt handle"),
            }
        }
        out
    }
}
