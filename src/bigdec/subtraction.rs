//! Magnitude subtraction.

use crate::digit::{Digit, BASE_POW};
use crate::interrupt::poll;
use crate::{BigDec, Interrupt, Result};

/// `a[i] <- a[i] - b[i]` with the borrow pushed upward by adding the radix
/// back and decrementing the next cell. The caller guarantees the window
/// of `a` is at least as large in magnitude as `b`.
pub fn diff_arrays(a: &mut [Digit], b: &[Digit], int: Option<&Interrupt>) -> Result<()> {
    let len = b.len();
    debug_assert!(a.len() >= len);
    for i in 0..len {
        poll(int)?;
        a[i] -= b[i];
        let mut j = 0;
        while a[i + j] < 0 {
            poll(int)?;
            debug_assert!(a[i + j] >= -(BASE_POW as Digit));
            a[i + j] += BASE_POW as Digit;
            j += 1;
            a[i + j] -= 1;
        }
    }
    Ok(())
}

/// Magnitude subtraction: `|bigger| - |smaller|` with the sign chosen from
/// which operand dominates and whether the caller is subtracting.
pub(crate) fn mag_sub(a: &BigDec, b: &BigDec, sub: bool, int: &Interrupt) -> Result<BigDec> {
    if a.is_zero() {
        let mut c = b.clone();
        if sub && !c.is_zero() {
            c.neg = !c.neg;
        }
        return Ok(c);
    }
    if b.is_zero() {
        return Ok(a.clone());
    }

    let cmp = a.cmp_mag(b, Some(int))?;
    if cmp == 0 {
        let mut c = BigDec::zero();
        c.set_to_zero(a.scale.max(b.scale));
        return Ok(c);
    }

    let (minuend, subtrahend, neg) = if cmp > 0 {
        (a, b, a.neg)
    } else {
        (b, a, b.neg != sub)
    };

    let mut c = minuend.clone();
    c.neg = neg;
    if c.scale < subtrahend.scale {
        c.extend(subtrahend.scale - c.scale);
    }
    let start = c.rdx - subtrahend.rdx;
    diff_arrays(&mut c.digits[start..], &subtrahend.digits, Some(int))?;
    c.clean();
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use alloc::string::ToString;

    fn dec(s: &str) -> BigDec {
        s.parse().unwrap()
    }

    fn sub(a: &str, b: &str) -> alloc::string::String {
        let int = Interrupt::new();
        dec(a).sub(&dec(b), 0, &int).unwrap().to_string()
    }

    #[test]
    fn borrows_ripple_across_cells() {
        assert_eq!(sub("1000000000", "1"), "999999999");
        assert_eq!(sub("1000000000000000000", "1"), "999999999999999999");
        assert_eq!(sub("1", "0.999999999999999999"), "0.000000000000000001");
    }

    #[test]
    fn magnitude_chooses_the_sign() {
        assert_eq!(sub("5", "3"), "2");
        assert_eq!(sub("3", "5"), "-2");
        assert_eq!(sub("-5", "-3"), "-2");
        assert_eq!(sub("-3", "-5"), "2");
        assert_eq!(sub("-5", "3"), "-8");
        assert_eq!(sub("5", "-3"), "8");
    }

    #[test]
    fn equal_magnitudes_zero_at_the_wider_scale() {
        let int = Interrupt::new();
        let d = dec("2.5000").sub(&dec("2.5"), 0, &int).unwrap();
        assert!(d.is_zero());
        assert_eq!(d.scale(), 4);
        assert!(!d.is_negative());
    }

    #[test]
    fn fraction_extension_before_subtract() {
        assert_eq!(sub("10", "0.0000000001"), "9.9999999999");
        assert_eq!(sub("1.5", "0.25"), "1.25");
    }

    #[test]
    fn interrupted_subtraction() {
        let int = Interrupt::new();
        int.raise();
        let a = dec("98765432109876543210");
        assert_eq!(a.sub(&dec("1"), 0, &int), Err(Error::Interrupted));
    }
}
