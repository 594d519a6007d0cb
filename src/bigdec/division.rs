//! Long division with per-place quotient estimation, plus the derived
//! remainder and divmod operations.
//!
//! The dividend is rebased so the quotient comes out cell-aligned at
//! `rdx_from_scale(scale)` fractional cells, then retired down to the
//! requested scale. Each quotient cell is estimated from the window's two
//! leading digits against the divisor's one, then refined downward a
//! decimal order of magnitude at a time.

use smallvec::smallvec;

use crate::digit::{
    dec_len, grow_size, rdx_from_scale, BigDigit, Digit, BASE_DIGS, BASE_POW, POW10,
};
use crate::{BigDec, Error, Interrupt, Result};

use super::addition::sum_arrays;
use super::multiplication::mul_cells_digit;
use super::subtraction::diff_arrays;
use super::{cmp_cells, DigitVec};

/// Compares a remainder window (one cell wider than the divisor) against
/// the divisor.
fn div_cmp(n: &[Digit], b: &[Digit], int: Option<&Interrupt>) -> Result<isize> {
    let len = b.len();
    if n[len] != 0 {
        return Ok(1);
    }
    cmp_cells(n, b, len, int)
}

/// Rebases the dividend cells: `shift >= 0` prepends that many zero cells,
/// `shift < 0` drops low cells (exact for the truncated quotient). The
/// result is padded up to `min_len` cells; the pad count is returned so the
/// caller can fold it into the quotient's radix.
fn prepare_dividend(a: &BigDec, shift: isize, min_len: usize) -> (DigitVec, usize) {
    let mut cp = a.digits.clone();
    if shift >= 0 {
        cp.insert_many(0, core::iter::repeat(0).take(shift as usize));
    } else {
        let drop = (-shift) as usize;
        if drop >= cp.len() {
            cp.clear();
        } else {
            cp.drain(..drop);
        }
    }
    let mut extra = 0;
    if cp.len() < min_len {
        extra = min_len - cp.len();
        cp.insert_many(0, core::iter::repeat(0).take(extra));
    }
    (cp, extra)
}

/// Schoolbook short division by a single cell.
fn div_cells_digit(cp: &[Digit], d: BigDigit, int: &Interrupt) -> Result<DigitVec> {
    let mut q: DigitVec = smallvec![0; cp.len()];
    let mut rem: BigDigit = 0;
    for i in (0..cp.len()).rev() {
        int.check()?;
        let cur = rem * BASE_POW + cp[i] as BigDigit;
        q[i] = (cur / d) as Digit;
        rem = cur % d;
    }
    Ok(q)
}

/// One quotient cell per window position, most significant first. `cp`
/// carries an extra zero top cell so every window can read `n[len]`.
fn d_long(cp: &mut [Digit], b: &[Digit], int: &Interrupt) -> Result<DigitVec> {
    let len = b.len();
    debug_assert!(cp.len() > len);
    let end = cp.len() - len;
    let divisor = b[len - 1] as BigDigit;
    let mut quot: DigitVec = smallvec![0; end];

    for i in (0..end).rev() {
        int.check()?;
        let n = &mut cp[i..i + len + 1];
        let cmp = div_cmp(n, b, Some(int))?;
        if cmp == 0 {
            quot[i] = 1;
            diff_arrays(n, b, Some(int))?;
        } else if cmp > 0 {
            let dividend = n[len] as BigDigit * BASE_POW + n[len - 1] as BigDigit;
            let mut q = (dividend / divisor + 1).min(BASE_POW);
            let mut pw = POW10[dec_len(q) - 1];

            let mut cpb = mul_cells_digit(b, q, Some(int))?;
            cpb.resize(len + 1, 0);
            let mut sub = mul_cells_digit(b, pw, Some(int))?;
            sub.resize(len + 1, 0);

            // Walk q down a power of ten at a time. Entering each pass q
            // is not below the true digit; leaving it, not above by more
            // than the pass's power.
            loop {
                let mut stepped = false;
                while q >= pw && cmp_cells(n, &cpb, len + 1, Some(int))? < 0 {
                    diff_arrays(&mut cpb, &sub, Some(int))?;
                    q -= pw;
                    stepped = true;
                }
                if pw == 1 {
                    break;
                }
                if stepped && cmp_cells(n, &cpb, len + 1, Some(int))? >= 0 {
                    sum_arrays(&mut cpb, &sub, Some(int))?;
                    q += pw;
                }
                pw /= 10;
                sub = mul_cells_digit(b, pw, Some(int))?;
                sub.resize(len + 1, 0);
            }

            diff_arrays(n, &cpb, Some(int))?;
            quot[i] = q as Digit;
        }
    }
    Ok(quot)
}

impl BigDec {
    /// `self / b`, truncated toward zero at `scale` fractional digits.
    pub fn div(&self, b: &BigDec, scale: usize, int: &Interrupt) -> Result<BigDec> {
        if b.is_zero() {
            return Err(Error::DivideByZero);
        }
        if self.is_zero() {
            let mut c = BigDec::zero();
            c.set_to_zero(scale);
            return Ok(c);
        }
        if b.is_one() {
            let mut c = self.clone();
            c.retire_mul(scale, self.neg, b.neg);
            return Ok(c);
        }

        let rdx_q = rdx_from_scale(scale);

        if b.rdx == 0 && b.len() == 1 {
            let shift = rdx_q as isize - self.rdx as isize;
            let (cp, extra) = prepare_dividend(self, shift, 1);
            let crdx = rdx_q + extra;
            let digits = div_cells_digit(&cp, b.digits[0] as BigDigit, int)?;
            return Ok(retire_quotient(digits, crdx, scale, self.neg, b.neg));
        }

        let bz = b.digits.iter().take_while(|&&d| d == 0).count();
        let bcells = &b.digits[bz..];
        let shift = (b.rdx + rdx_q) as isize - (self.rdx + bz) as isize;
        let (mut cp, extra) = prepare_dividend(self, shift, bcells.len());
        let crdx = rdx_q + extra;
        cp.push(0);
        let digits = d_long(&mut cp, bcells, int)?;
        Ok(retire_quotient(digits, crdx, scale, self.neg, b.neg))
    }

    /// `1 / self` at the given scale.
    pub(crate) fn inv(&self, scale: usize, int: &Interrupt) -> Result<BigDec> {
        BigDec::one().div(self, scale, int)
    }

    /// `self mod b` with `sign(result) == sign(self)` and the bc scale
    /// rule `ts = max(scale + b.scale, self.scale)`.
    pub fn rem(&self, b: &BigDec, scale: usize, int: &Interrupt) -> Result<BigDec> {
        let ts = grow_size(scale, b.scale)?.max(self.scale);
        self.quot_rem(b, scale, ts, int).map(|(_, d)| d)
    }

    /// Quotient and remainder in one pass.
    pub fn divmod(&self, b: &BigDec, scale: usize, int: &Interrupt) -> Result<(BigDec, BigDec)> {
        let ts = grow_size(scale, b.scale)?.max(self.scale);
        self.quot_rem(b, scale, ts, int)
    }

    fn quot_rem(
        &self,
        b: &BigDec,
        scale: usize,
        ts: usize,
        int: &Interrupt,
    ) -> Result<(BigDec, BigDec)> {
        if b.is_zero() {
            return Err(Error::DivideByZero);
        }
        if self.is_zero() {
            let mut c = BigDec::zero();
            c.set_to_zero(ts);
            let mut d = BigDec::zero();
            d.set_to_zero(ts);
            return Ok((c, d));
        }

        let c = self.div(b, scale, int)?;
        let mscale = if scale != 0 { ts } else { 0 };
        let temp = c.mul(b, mscale, int)?;
        let mut d = self.sub(&temp, mscale, int)?;

        if ts > d.scale && !d.is_zero() {
            d.extend(ts - d.scale);
        }
        // retire_mul would impose the quotient's sign; the remainder keeps
        // the dividend's.
        let neg = d.neg;
        d.retire_mul(ts, self.neg, b.neg);
        d.neg = neg && !d.is_zero();

        Ok((c, d))
    }
}

fn retire_quotient(digits: DigitVec, crdx: usize, scale: usize, neg1: bool, neg2: bool) -> BigDec {
    let mut c = BigDec {
        digits,
        rdx: crdx,
        scale: crdx * BASE_DIGS,
        neg: false,
    };
    c.clean();
    c.retire_mul(scale, neg1, neg2);
    c
}
