//! Integer exponentiation by squaring, and modular exponentiation.

use crate::digit::grow_size;
use crate::{BigDec, Error, Interrupt, Result};

/// Capacity request for a power result. Generous; the true bound depends
/// on the data.
pub fn pow_req(a: &BigDec, b: &BigDec, _scale: usize) -> usize {
    a.len() + b.len() + 1
}

impl BigDec {
    /// `self ^ b` for integer `b`, at `min(self.scale * |b|, max(scale,
    /// self.scale))` fractional digits; a negative exponent inverts the
    /// result at the requested scale.
    pub fn pow(&self, b: &BigDec, scale: usize, int: &Interrupt) -> Result<BigDec> {
        if b.rdx != 0 {
            return Err(Error::NonInteger);
        }
        if b.is_zero() {
            return Ok(BigDec::one());
        }
        if self.is_zero() {
            let mut c = BigDec::zero();
            c.set_to_zero(scale);
            return Ok(c);
        }
        if b.is_one() {
            return if b.neg {
                self.inv(scale, int)
            } else {
                Ok(self.clone())
            };
        }

        let neg = b.neg;
        let mut pow = b.abs().to_bigdig()?;

        let mut copy = self.clone();
        let scale = if neg {
            scale
        } else {
            let full = self.scale.saturating_mul(usize::try_from(pow).unwrap_or(usize::MAX));
            full.min(scale.max(self.scale))
        };

        // Squaring doubles the working scale; each product into the result
        // accumulates it.
        let mut powrdx = self.scale;
        while pow & 1 == 0 {
            int.check()?;
            powrdx = grow_size(powrdx, powrdx)?;
            copy = copy.mul(&copy, powrdx, int)?;
            pow >>= 1;
        }

        let mut c = copy.clone();
        let mut resrdx = powrdx;
        pow >>= 1;

        while pow != 0 {
            int.check()?;
            powrdx = grow_size(powrdx, powrdx)?;
            copy = copy.mul(&copy, powrdx, int)?;
            if pow & 1 == 1 {
                resrdx = grow_size(resrdx, powrdx)?;
                c = c.mul(&copy, resrdx, int)?;
            }
            pow >>= 1;
        }

        if neg {
            c = c.inv(scale, int)?;
        }
        if c.scale > scale {
            c.truncate_scale(c.scale - scale);
        }
        if c.is_zero() {
            c.set_to_zero(scale);
        }
        Ok(c)
    }

    /// `self ^ b mod m` for integer operands, by square-and-multiply with
    /// reduction after every product.
    pub fn modexp(&self, b: &BigDec, m: &BigDec, int: &Interrupt) -> Result<BigDec> {
        if m.is_zero() {
            return Err(Error::DivideByZero);
        }
        if b.neg {
            return Err(Error::Negative);
        }
        if self.rdx != 0 || b.rdx != 0 || m.rdx != 0 {
            return Err(Error::NonInteger);
        }

        let two = BigDec::from_bigdig(2);
        let mut d = BigDec::one();
        let mut base = self.rem(m, 0, int)?;
        let mut exp = b.clone();

        while !exp.is_zero() {
            int.check()?;
            let (q, parity) = exp.divmod(&two, 0, int)?;
            exp = q;
            if parity.is_one() {
                d = d.mul(&base, 0, int)?.rem(m, 0, int)?;
            }
            base = base.mul(&base, 0, int)?.rem(m, 0, int)?;
        }
        Ok(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};

    fn dec(s: &str) -> BigDec {
        s.parse().unwrap()
    }

    fn pow(a: &str, b: &str, scale: usize) -> String {
        let int = Interrupt::new();
        dec(a).pow(&dec(b), scale, &int).unwrap().to_string()
    }

    #[test]
    fn two_to_the_hundred() {
        assert_eq!(pow("2", "100", 0), "1267650600228229401496703205376");
    }

    #[test]
    fn small_powers() {
        assert_eq!(pow("7", "0", 0), "1");
        assert_eq!(pow("0", "5", 3), "0");
        assert_eq!(pow("5", "1", 0), "5");
        assert_eq!(pow("-2", "3", 0), "-8");
        assert_eq!(pow("-2", "2", 0), "4");
        assert_eq!(pow("10", "9", 0), "1000000000");
        assert_eq!(pow("10", "18", 0), "1000000000000000000");
    }

    #[test]
    fn fractional_base_scale_rule() {
        // min(a.scale * b, max(scale, a.scale))
        assert_eq!(pow("0.5", "3", 1), "0.1");
        assert_eq!(pow("0.5", "3", 5), "0.125");
        assert_eq!(pow("1.5", "2", 2), "2.25");
    }

    #[test]
    fn negative_exponents_invert() {
        assert_eq!(pow("2", "-2", 2), "0.25");
        assert_eq!(pow("2", "-2", 5), "0.25000");
        assert_eq!(pow("4", "-1", 3), "0.250");
        assert_eq!(pow("3", "-2", 4), "0.1111");
    }

    #[test]
    fn fractional_exponent_is_rejected() {
        let int = Interrupt::new();
        assert_eq!(dec("2").pow(&dec("1.5"), 0, &int), Err(Error::NonInteger));
    }

    #[test]
    fn modexp_vectors() {
        let int = Interrupt::new();
        let r = dec("4").modexp(&dec("13"), &dec("497"), &int).unwrap();
        assert_eq!(r.to_string(), "445");

        let r = dec("2").modexp(&dec("10"), &dec("1000"), &int).unwrap();
        assert_eq!(r.to_string(), "24");

        let r = dec("5").modexp(&dec("0"), &dec("7"), &int).unwrap();
        assert_eq!(r.to_string(), "1");
    }

    #[test]
    fn modexp_error_taxonomy() {
        let int = Interrupt::new();
        let a = dec("3");
        assert_eq!(
            a.modexp(&dec("4"), &BigDec::zero(), &int),
            Err(Error::DivideByZero)
        );
        assert_eq!(a.modexp(&dec("-4"), &dec("7"), &int), Err(Error::Negative));
        assert_eq!(
            a.modexp(&dec("4.5"), &dec("7"), &int),
            Err(Error::NonInteger)
        );
        assert_eq!(
            dec("3.5").modexp(&dec("4"), &dec("7"), &int),
            Err(Error::NonInteger)
        );
    }

    #[cfg(feature = "rand")]
    mod randomized {
        use super::*;
        use crate::bigrand::RandBigDec;
        use num_traits::Zero;
        use rand::{Rng, SeedableRng};
        use rand_xorshift::XorShiftRng;

        #[test]
        fn pow_matches_repeated_multiplication() {
            let mut rng = XorShiftRng::from_seed([1u8; 16]);
            let int = Interrupt::new();
            for _ in 0..50 {
                let a = rng.gen_bigdec(1, 0);
                let k: u64 = rng.random_range(2..9);
                let b = BigDec::from(k);
                let want = (0..k - 1).try_fold(a.clone(), |acc, _| acc.mul(&a, 0, &int));
                assert_eq!(a.pow(&b, 0, &int).unwrap(), want.unwrap());
            }
        }

        #[test]
        fn modexp_matches_pow_then_rem() {
            let mut rng = XorShiftRng::from_seed([1u8; 16]);
            let int = Interrupt::new();
            for _ in 0..50 {
                let a = rng.gen_bigdec(1, 0).abs();
                let k: u64 = rng.random_range(1..30);
                let m = rng.gen_bigdec(1, 0).abs();
                if m.is_zero() {
                    continue;
                }
                let b = BigDec::from(k);
                let fast = a.modexp(&b, &m, &int).unwrap();
                let slow = a.pow(&b, 0, &int).unwrap().rem(&m, 0, &int).unwrap();
                assert_eq!(fast, slow, "{}^{} mod {}", a, k, m);
            }
        }
    }
}
