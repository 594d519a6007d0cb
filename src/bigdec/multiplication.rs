//! Multiplication: single-cell fast path, schoolbook columns, and
//! Karatsuba recursion over integer cell arrays.

use smallvec::smallvec;

use crate::digit::{grow_size, rdx_from_scale, BigDigit, Digit, BASE_DIGS, BASE_POW, KARATSUBA_LEN};
use crate::interrupt::poll;
use crate::{BigDec, Interrupt, Result};

use super::addition::sum_arrays;
use super::subtraction::diff_arrays;
use super::DigitVec;

/// Chooses how a Karatsuba sub-product lands in the output buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftAddOp {
    Add,
    Sub,
}

/// Adds or subtracts `a` into the window of `n` starting `shift` cells up.
pub fn shift_add_sub(
    n: &mut [Digit],
    a: &[Digit],
    shift: usize,
    op: ShiftAddOp,
    int: Option<&Interrupt>,
) -> Result<()> {
    debug_assert!(n.len() >= shift + a.len());
    match op {
        ShiftAddOp::Add => sum_arrays(&mut n[shift..], a, int),
        ShiftAddOp::Sub => diff_arrays(&mut n[shift..], a, int),
    }
}

/// Multiplies a cell array by a native digit (at most `BASE_POW`).
pub(crate) fn mul_cells_digit(
    cells: &[Digit],
    d: BigDigit,
    int: Option<&Interrupt>,
) -> Result<DigitVec> {
    debug_assert!(d <= BASE_POW);
    let mut out = DigitVec::with_capacity(cells.len() + 2);
    let mut carry: BigDigit = 0;
    for &c in cells {
        poll(int)?;
        let v = c as BigDigit * d + carry;
        out.push((v % BASE_POW) as Digit);
        carry = v / BASE_POW;
    }
    while carry != 0 {
        out.push((carry % BASE_POW) as Digit);
        carry /= BASE_POW;
    }
    Ok(out)
}

/// Cuts an integer into low and high parts at cell `idx`.
fn split(n: &BigDec, idx: usize) -> (BigDec, BigDec) {
    debug_assert_eq!(n.rdx, 0);
    if idx < n.len() {
        let lo = BigDec::from_parts(DigitVec::from_slice(&n.digits[..idx]), 0, false);
        let hi = BigDec::from_parts(DigitVec::from_slice(&n.digits[idx..]), 0, false);
        (lo, hi)
    } else {
        (n.clone(), BigDec::zero())
    }
}

/// Column-wise schoolbook product of two integers, with the carry folded
/// into the next column's opening sum.
pub(crate) fn schoolbook(a: &BigDec, b: &BigDec, int: &Interrupt) -> Result<BigDec> {
    debug_assert!(a.rdx == 0 && b.rdx == 0);
    let alen = a.len();
    let blen = b.len();
    let clen = grow_size(alen, blen)?;
    let mut c: DigitVec = smallvec![0; clen + 1];

    let mut sum: BigDigit = 0;
    let mut carry: BigDigit = 0;
    for i in 0..clen {
        int.check()?;
        let mut j = (i + 1).saturating_sub(blen);
        let mut k = i - j;
        while j < alen && k < blen {
            sum += a.digits[j] as BigDigit * b.digits[k] as BigDigit;
            if sum >= BASE_POW {
                carry += sum / BASE_POW;
                sum %= BASE_POW;
            }
            j += 1;
            if k == 0 {
                break;
            }
            k -= 1;
        }
        c[i] = sum as Digit;
        sum = carry;
        carry = 0;
    }
    if sum != 0 {
        debug_assert!(sum < BASE_POW);
        c[clen] = sum as Digit;
    }

    Ok(BigDec::from_parts(c, 0, false))
}

/// Karatsuba product of two integers. Splits at half the wider operand,
/// places the three sub-products into one output buffer with
/// [`shift_add_sub`], and recurses through [`BigDec::mul`] so the
/// normalization path runs between levels.
pub(crate) fn karatsuba(a: &BigDec, b: &BigDec, int: &Interrupt) -> Result<BigDec> {
    int.check()?;
    if a.is_zero() || b.is_zero() {
        return Ok(BigDec::zero());
    }
    if a.is_one() {
        return Ok(b.clone());
    }
    if b.is_one() {
        return Ok(a.clone());
    }
    if a.len() + b.len() < KARATSUBA_LEN
        || a.len() < KARATSUBA_LEN
        || b.len() < KARATSUBA_LEN
    {
        return schoolbook(a, b, int);
    }

    let max = a.len().max(b.len());
    let max2 = (max + 1) / 2;
    let (l1, h1) = split(a, max2);
    let (l2, h2) = split(b, max2);

    let m1 = h1.sub(&l1, 0, int)?;
    let m2 = l2.sub(&h2, 0, int)?;

    let mut c: DigitVec = smallvec![0; 2 * max + 1];

    if !h1.is_zero() && !h2.is_zero() {
        let z2 = h1.mul(&h2, 0, int)?;
        shift_add_sub(&mut c, &z2.digits, max2 * 2, ShiftAddOp::Add, Some(int))?;
        shift_add_sub(&mut c, &z2.digits, max2, ShiftAddOp::Add, Some(int))?;
    }
    if !l1.is_zero() && !l2.is_zero() {
        let z0 = l1.mul(&l2, 0, int)?;
        shift_add_sub(&mut c, &z0.digits, max2, ShiftAddOp::Add, Some(int))?;
        shift_add_sub(&mut c, &z0.digits, 0, ShiftAddOp::Add, Some(int))?;
    }
    if !m1.is_zero() && !m2.is_zero() {
        let z1 = m1.mul(&m2, 0, int)?;
        let op = if m1.is_negative() != m2.is_negative() {
            ShiftAddOp::Sub
        } else {
            ShiftAddOp::Add
        };
        shift_add_sub(&mut c, &z1.digits, max2, op, Some(int))?;
    }

    Ok(BigDec::from_parts(c, 0, false))
}

/// Capacity request for a product at the given scale.
pub fn mul_req(a: &BigDec, b: &BigDec, scale: usize) -> usize {
    let rdx = a.rdx + b.rdx;
    let frac = rdx_from_scale(scale).max(rdx).max(1) + 1;
    a.int_cells() + b.int_cells() + frac
}

impl BigDec {
    /// `self * b`, retired to `min(self.scale + b.scale, max(scale,
    /// self.scale, b.scale))` fractional digits per the POSIX bc rule.
    pub fn mul(&self, b: &BigDec, scale: usize, int: &Interrupt) -> Result<BigDec> {
        let rscale = grow_size(self.scale, b.scale)?;
        let scale_eff = rscale.min(scale.max(self.scale).max(b.scale));

        if self.is_zero() || b.is_zero() {
            let mut c = BigDec::zero();
            c.set_to_zero(scale_eff);
            return Ok(c);
        }

        // A one-cell integer operand needs no alignment at all.
        for (small, other) in [(self, b), (b, self)] {
            if small.rdx == 0 && small.len() == 1 {
                let digits =
                    mul_cells_digit(&other.digits, small.digits[0] as BigDigit, Some(int))?;
                let mut c = BigDec {
                    digits,
                    rdx: other.rdx,
                    scale: other.scale,
                    neg: false,
                };
                c.clean();
                c.retire_mul(scale_eff, self.neg, b.neg);
                return Ok(c);
            }
        }

        let mut cpa = self.abs();
        let mut cpb = b.abs();
        cpa.shift_left(cpa.rdx * BASE_DIGS)?;
        cpb.shift_left(cpb.rdx * BASE_DIGS)?;

        let azero = strip_low_zeros(&mut cpa);
        let bzero = strip_low_zeros(&mut cpb);

        let mut c = karatsuba(&cpa, &cpb, int)?;

        let zeros = grow_size(azero, bzero)?;
        if zeros > 0 && !c.is_zero() {
            c.digits.insert_many(0, core::iter::repeat(0).take(zeros));
        }
        c.shift_right((self.rdx + b.rdx) * BASE_DIGS)?;
        c.retire_mul(scale_eff, self.neg, b.neg);
        Ok(c)
    }
}

/// Drops all-zero low cells, returning how many came off.
fn strip_low_zeros(n: &mut BigDec) -> usize {
    debug_assert_eq!(n.rdx, 0);
    let zeros = n.digits.iter().take_while(|&&d| d == 0).count();
    if zeros > 0 {
        n.digits.drain(..zeros);
    }
    zeros
}
