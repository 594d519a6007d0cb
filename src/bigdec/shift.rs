//! Decimal-place shifts and scale alignment.
//!
//! Shifting by a multiple of `BASE_DIGS` moves the radix point across whole
//! cells and never touches cell contents. The leftover sub-cell amount
//! re-digits the array: every cell is split at the sub-position and the
//! spilled low part carried into its neighbor.

use crate::digit::{
    cells_and_digits, grow_size, rdx_from_scale, BigDigit, Digit, BASE_DIGS, BASE_POW, MAX_CELLS,
};
use crate::{BigDec, Error, Interrupt, Result};

use super::{DigitVec, POW10_DIGIT};

/// Multiplies the raw cell array by `10^k`, `0 < k < BASE_DIGS`, pushing a
/// carry cell if one spills out the top.
pub(crate) fn shift_digits_up(digits: &mut DigitVec, k: usize) {
    debug_assert!(k > 0 && k < BASE_DIGS);
    let keep = (BASE_POW / POW10_DIGIT[k] as BigDigit) as Digit;
    let mut carry: Digit = 0;
    for d in digits.iter_mut() {
        let c = *d;
        *d = (c % keep) * POW10_DIGIT[k] + carry;
        carry = c / keep;
    }
    if carry != 0 {
        digits.push(carry);
    }
}

/// Divides the raw cell array by `10^k`, `0 < k < BASE_DIGS`. The dropped
/// low digits must be zero (the shift is exact by construction: only pad
/// digits are ever shifted out).
pub(crate) fn shift_digits_down(digits: &mut DigitVec, k: usize) {
    debug_assert!(k > 0 && k < BASE_DIGS);
    let keep = POW10_DIGIT[k];
    let up = (BASE_POW / keep as BigDigit) as Digit;
    let mut rem: Digit = 0;
    for d in digits.iter_mut().rev() {
        let c = *d;
        *d = c / keep + rem * up;
        rem = c % keep;
    }
    debug_assert_eq!(rem, 0);
}

impl BigDec {
    /// Adds `places` fractional decimal digits of zero; the value is
    /// unchanged. Only whole cells ever need inserting, since the new scale
    /// shares the digit grid with the old one.
    pub(crate) fn extend(&mut self, places: usize) {
        if places == 0 {
            return;
        }
        let scale = self.scale + places;
        let rdx = rdx_from_scale(scale);
        let grow = rdx - self.rdx;
        if grow > 0 && !self.digits.is_empty() {
            self.digits.insert_many(0, core::iter::repeat(0).take(grow));
        }
        self.scale = scale;
        self.rdx = rdx;
    }

    /// Drops `places` fractional decimal digits (truncation toward zero).
    /// Whole cells fall off the bottom; a partial cell is masked in place.
    pub(crate) fn truncate_scale(&mut self, places: usize) {
        debug_assert!(places <= self.scale);
        if places == 0 {
            return;
        }
        let scale = self.scale - places;
        let rdx = rdx_from_scale(scale);
        let drop = self.rdx - rdx;
        if !self.digits.is_empty() {
            if drop >= self.digits.len() {
                self.digits.clear();
            } else if drop > 0 {
                self.digits.drain(..drop);
            }
            let pad = rdx * BASE_DIGS - scale;
            if pad != 0 {
                if let Some(low) = self.digits.first_mut() {
                    *low -= *low % POW10_DIGIT[pad];
                }
            }
        }
        self.scale = scale;
        self.rdx = rdx;
        self.clean();
    }

    /// Multiplies by `10^places`.
    pub(crate) fn shift_left(&mut self, places: usize) -> Result<()> {
        if places == 0 {
            return Ok(());
        }
        if places > self.scale {
            let cells = rdx_from_scale(places - self.scale);
            if grow_size(cells, self.digits.len())? > MAX_CELLS {
                return Err(Error::Overflow);
            }
        }
        if self.digits.is_empty() {
            self.scale -= self.scale.min(places);
            self.rdx = rdx_from_scale(self.scale);
            return Ok(());
        }

        let scale = self.scale - self.scale.min(places);
        let rdx = rdx_from_scale(scale);
        // How far the digit string moves relative to the cell grid; in
        // [-8, ..) with the negative range bounded by one cell.
        let delta =
            (rdx * BASE_DIGS) as isize - (self.rdx * BASE_DIGS) as isize + places as isize;
        if delta >= 0 {
            let (cells, sub) = cells_and_digits(delta as usize);
            if cells > 0 {
                self.digits
                    .insert_many(0, core::iter::repeat(0).take(cells));
            }
            if sub > 0 {
                shift_digits_up(&mut self.digits, sub);
            }
        } else {
            shift_digits_down(&mut self.digits, (-delta) as usize);
        }
        self.scale = scale;
        self.rdx = rdx;
        self.clean();
        Ok(())
    }

    /// Divides by `10^places`, growing the scale by `places`.
    pub(crate) fn shift_right(&mut self, places: usize) -> Result<()> {
        if places == 0 {
            return Ok(());
        }
        let scale = grow_size(self.scale, places)?;
        let rdx = rdx_from_scale(scale);
        if self.digits.is_empty() {
            self.scale = scale;
            self.rdx = rdx;
            return Ok(());
        }
        if rdx > MAX_CELLS {
            return Err(Error::Overflow);
        }

        let delta = (rdx * BASE_DIGS) as isize
            - (self.rdx * BASE_DIGS) as isize
            - places as isize;
        debug_assert!((-(BASE_DIGS as isize)..BASE_DIGS as isize).contains(&delta));
        if delta > 0 {
            shift_digits_up(&mut self.digits, delta as usize);
        } else if delta < 0 {
            shift_digits_down(&mut self.digits, (-delta) as usize);
        }
        self.scale = scale;
        self.rdx = rdx;
        // The radix point may now sit above the old top cell.
        if self.digits.len() < rdx {
            self.digits.resize(rdx, 0);
        }
        self.clean();
        Ok(())
    }

    /// Brings a multiplication or division result to the requested scale
    /// and fixes the sign from the operand signs.
    pub(crate) fn retire_mul(&mut self, scale: usize, neg1: bool, neg2: bool) {
        if self.scale < scale {
            self.extend(scale - self.scale);
        } else {
            self.truncate_scale(self.scale - scale);
        }
        self.clean();
        if !self.digits.is_empty() {
            self.neg = neg1 != neg2;
        }
    }

    /// Sets the result's scale to the integer value of `b`, extending or
    /// truncating `self`'s digits.
    pub fn places(&self, b: &BigDec, _int: &Interrupt) -> Result<BigDec> {
        let (mut c, val) = self.intop(b)?;
        let val = usize::try_from(val).map_err(|_| Error::Overflow)?;
        if val < c.scale {
            c.truncate_scale(c.scale - val);
        } else if val > c.scale {
            c.extend(val - c.scale);
        }
        Ok(c)
    }

    /// Shifts left by the integer value of `b` decimal places.
    pub fn lshift(&self, b: &BigDec, _int: &Interrupt) -> Result<BigDec> {
        let (mut c, val) = self.intop(b)?;
        let val = usize::try_from(val).map_err(|_| Error::Overflow)?;
        c.shift_left(val)?;
        Ok(c)
    }

    /// Shifts right by the integer value of `b` decimal places.
    pub fn rshift(&self, b: &BigDec, _int: &Interrupt) -> Result<BigDec> {
        let (mut c, val) = self.intop(b)?;
        if c.is_zero() {
            return Ok(c);
        }
        let val = usize::try_from(val).map_err(|_| Error::Overflow)?;
        c.shift_right(val)?;
        Ok(c)
    }
}

/// Capacity request for the shift family, sized from the shifted operand.
pub fn shift_req(a: &BigDec, b: &BigDec, _scale: usize) -> usize {
    let places = b.to_bigdig().unwrap_or(0) as usize;
    a.len() + rdx_from_scale(places) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn dec(s: &str) -> BigDec {
        s.parse().unwrap()
    }

    #[test]
    fn sub_cell_shift_round_trip() {
        let mut v = DigitVec::from_slice(&[123_456_789, 987_654_321]);
        shift_digits_up(&mut v, 4);
        assert_eq!(v.as_slice(), &[567_890_000, 543_211_234, 9_876]);
        shift_digits_down(&mut v, 4);
        assert_eq!(v.as_slice(), &[123_456_789, 987_654_321, 0]);
    }

    #[test]
    fn shift_left_moves_the_point() {
        let cases = [
            ("1.5", 1, "15"),
            ("1.5", 3, "1500"),
            ("0.000000001", 9, "1"),
            ("12.3456", 2, "1234.56"),
            ("0.5", 20, "50000000000000000000"),
            ("0", 5, "0"),
        ];
        for (s, places, want) in cases {
            let mut n = dec(s);
            n.shift_left(places).unwrap();
            assert_eq!(n.to_string(), want, "{} << {}", s, places);
        }
    }

    #[test]
    fn shift_right_moves_the_point() {
        let cases = [
            ("15", 1, "1.5"),
            ("1", 9, "0.000000001"),
            ("1", 10, "0.0000000001"),
            ("1234.56", 2, "12.3456"),
            ("7", 20, "0.00000000000000000007"),
        ];
        for (s, places, want) in cases {
            let mut n = dec(s);
            n.shift_right(places).unwrap();
            assert_eq!(n.to_string(), want, "{} >> {}", s, places);
        }
    }

    #[test]
    fn shift_round_trips_exactly() {
        for s in ["123456789123456789.987654321", "0.07", "42"] {
            for places in [1usize, 4, 9, 13, 27] {
                let mut n = dec(s);
                n.shift_right(places).unwrap();
                n.shift_left(places).unwrap();
                assert_eq!(n, dec(s), "{} by {}", s, places);
            }
        }
    }

    #[test]
    fn extend_preserves_value_and_grows_scale() {
        let mut n = dec("3.5");
        n.extend(11);
        assert_eq!(n.scale(), 12);
        assert_eq!(n.to_string(), "3.500000000000");
        assert_eq!(n, dec("3.5"));
    }

    #[test]
    fn truncate_drops_digits() {
        let mut n = dec("3.14159265358979");
        n.truncate_scale(9);
        assert_eq!(n.to_string(), "3.14159");

        let mut n = dec("-0.000001234");
        n.truncate_scale(9);
        assert_eq!(n.to_string(), "0");
        assert!(!n.is_negative());
    }

    #[test]
    fn shift_left_overflow_is_reported() {
        let b = BigDec::from(u64::MAX);
        let a = dec("1.5");
        assert_eq!(a.lshift(&b, &Interrupt::new()), Err(Error::Overflow));
    }

    #[test]
    fn lshift_rshift_places_ops() {
        let int = Interrupt::new();
        let n = dec("12.345");
        assert_eq!(n.lshift(&dec("2"), &int).unwrap().to_string(), "1234.5");
        assert_eq!(n.rshift(&dec("2"), &int).unwrap().to_string(), "0.12345");
        assert_eq!(n.places(&dec("1"), &int).unwrap().to_string(), "12.3");
        assert_eq!(
            n.places(&dec("6"), &int).unwrap().to_string(),
            "12.345000"
        );
        assert_eq!(n.lshift(&dec("1.5"), &int), Err(Error::NonInteger));
        assert_eq!(n.rshift(&dec("-2"), &int), Err(Error::Negative));
    }
}
