//! Magnitude addition and the signed add/sub dispatch.

use crate::digit::{Digit, BASE_POW};
use crate::interrupt::poll;
use crate::{BigDec, Interrupt, Result};

/// Reduces `sum` into one cell and returns the outgoing carry.
#[inline]
fn add_digit(cell: &mut Digit, sum: u32, carry: u32) -> u32 {
    let d = sum + carry;
    *cell = (d % BASE_POW as u32) as Digit;
    d / BASE_POW as u32
}

/// `a[i] <- (a[i] + b[i] + carry) mod BASE_POW` over `b.len()` cells, with
/// the final carry propagated into the tail of `a`. The caller guarantees
/// `a` is long enough for the carry to come to rest.
pub fn sum_arrays(a: &mut [Digit], b: &[Digit], int: Option<&Interrupt>) -> Result<()> {
    let len = b.len();
    debug_assert!(a.len() >= len);
    let mut carry = 0u32;
    for i in 0..len {
        poll(int)?;
        let sum = a[i] as u32 + b[i] as u32;
        carry = add_digit(&mut a[i], sum, carry);
    }
    let mut i = len;
    while carry != 0 {
        poll(int)?;
        debug_assert!(i < a.len());
        let cur = a[i] as u32;
        carry = add_digit(&mut a[i], cur, carry);
        i += 1;
    }
    Ok(())
}

/// Magnitude addition: `|a| + |b|` with `c` taking `a`'s sign (flipped by
/// the caller when the dispatch demands it). Zero operands short-circuit.
pub(crate) fn mag_add(a: &BigDec, b: &BigDec, sub: bool, int: &Interrupt) -> Result<BigDec> {
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

    let mut c = BigDec::with_capacity(add_req(a, b, 0));
    c.neg = a.neg;
    c.rdx = a.rdx.max(b.rdx);
    c.scale = a.scale.max(b.scale);
    let min_rdx = a.rdx.min(b.rdx);

    // The wider fraction's tail has nothing to pair with; copy it through.
    let (tail, diff, a_lo, b_lo) = if a.rdx > b.rdx {
        let diff = a.rdx - b.rdx;
        (&a.digits, diff, &a.digits[diff..], &b.digits[..])
    } else {
        let diff = b.rdx - a.rdx;
        (&b.digits, diff, &a.digits[..], &b.digits[diff..])
    };
    c.digits.extend_from_slice(&tail[..diff]);

    let a_int = a.int_cells();
    let b_int = b.int_cells();
    let (longer, max_int) = if a_int > b_int {
        (a_lo, a_int)
    } else {
        (b_lo, b_int)
    };
    let min_int = a_int.min(b_int);

    let mut carry = 0u32;
    for i in 0..min_rdx + min_int {
        poll(Some(int))?;
        let sum = a_lo[i] as u32 + b_lo[i] as u32;
        let mut cell = 0;
        carry = add_digit(&mut cell, sum, carry);
        c.digits.push(cell);
    }
    for i in min_rdx + min_int..max_int + min_rdx {
        poll(Some(int))?;
        let mut cell = 0;
        carry = add_digit(&mut cell, longer[i] as u32, carry);
        c.digits.push(cell);
    }
    if carry != 0 {
        c.digits.push(carry as Digit);
    }

    c.clean();
    Ok(c)
}

/// Capacity request for addition and subtraction results.
pub fn add_req(a: &BigDec, b: &BigDec, _scale: usize) -> usize {
    a.rdx.max(b.rdx) + a.int_cells().max(b.int_cells()) + 1
}

impl BigDec {
    /// `self + b`. The scale argument is unused (sums are exact per the
    /// POSIX bc rules) but kept for the uniform binary signature.
    pub fn add(&self, b: &BigDec, _scale: usize, int: &Interrupt) -> Result<BigDec> {
        if self.neg == b.neg {
            mag_add(self, b, false, int)
        } else {
            super::subtraction::mag_sub(self, b, false, int)
        }
    }

    /// `self - b`; exact, like [`add`](Self::add).
    pub fn sub(&self, b: &BigDec, _scale: usize, int: &Interrupt) -> Result<BigDec> {
        if self.neg == b.neg {
            super::subtraction::mag_sub(self, b, true, int)
        } else {
            mag_add(self, b, true, int)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use alloc::string::ToString;

    fn dec(s: &str) -> BigDec {
        s.parse().unwrap()
    }

    fn add(a: &str, b: &str) -> alloc::string::String {
        let int = Interrupt::new();
        dec(a).add(&dec(b), 0, &int).unwrap().to_string()
    }

    #[test]
    fn carries_ripple_across_cells() {
        assert_eq!(add("999999999", "1"), "1000000000");
        assert_eq!(add("999999999999999999", "1"), "1000000000000000000");
        assert_eq!(add("1", "999999999999999999"), "1000000000000000000");
    }

    #[test]
    fn fraction_tails_are_aligned() {
        assert_eq!(add("1.5", "2.25"), "3.75");
        assert_eq!(add("0.000000001", "0.999999999"), "1.000000000");
        assert_eq!(add("10.0000000001", "5"), "15.0000000001");
        assert_eq!(add("0.5", "0.00000000000000000005"), "0.50000000000000000005");
    }

    #[test]
    fn signs_dispatch_to_magnitude_ops() {
        assert_eq!(add("5", "-3"), "2");
        assert_eq!(add("-5", "3"), "-2");
        assert_eq!(add("-5", "-3"), "-8");
        assert_eq!(add("3", "-5"), "-2");
        assert_eq!(add("-2.5", "2.5"), "0");
    }

    #[test]
    fn zero_operands_short_circuit() {
        assert_eq!(add("0", "17.25"), "17.25");
        assert_eq!(add("17.25", "0"), "17.25");
        let int = Interrupt::new();
        assert_eq!(
            dec("0").sub(&dec("17.25"), 0, &int).unwrap().to_string(),
            "-17.25"
        );
    }

    #[test]
    fn interrupted_before_first_cell() {
        let int = Interrupt::new();
        int.raise();
        let a = dec("123456789123456789");
        assert_eq!(a.add(&a, 0, &int), Err(Error::Interrupted));
    }

    #[cfg(feature = "rand")]
    mod randomized {
        use super::*;
        use crate::bigrand::RandBigDec;
        use rand::SeedableRng;
        use rand_xorshift::XorShiftRng;

        #[test]
        fn commutative_and_associative() {
            let mut rng = XorShiftRng::from_seed([1u8; 16]);
            let int = Interrupt::new();
            for _ in 0..200 {
                let a = rng.gen_bigdec(5, 12);
                let b = rng.gen_bigdec(3, 30);
                let c = rng.gen_bigdec(4, 0);

                let ab = a.add(&b, 0, &int).unwrap();
                let ba = b.add(&a, 0, &int).unwrap();
                assert_eq!(ab, ba);

                let l = ab.add(&c, 0, &int).unwrap();
                let r = a.add(&b.add(&c, 0, &int).unwrap(), 0, &int).unwrap();
                assert_eq!(l, r);
            }
        }

        #[test]
        fn sub_inverts_add() {
            let mut rng = XorShiftRng::from_seed([1u8; 16]);
            let int = Interrupt::new();
            for _ in 0..200 {
                let a = rng.gen_bigdec(5, 14);
                let b = rng.gen_bigdec(5, 7);
                let sum = a.add(&b, 0, &int).unwrap();
                assert_eq!(sum.sub(&b, 0, &int).unwrap(), a);
            }
        }
    }
}
