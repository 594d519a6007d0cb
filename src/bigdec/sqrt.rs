//! Square root by Newton iteration, `x' = (x + a/x) / 2`.

use smallvec::smallvec;

use crate::digit::{rdx_from_scale, BASE_DIGS};
use crate::{BigDec, Error, Interrupt, Result};

impl BigDec {
    /// Truncated square root at `max(scale, self.scale)` fractional
    /// digits.
    ///
    /// The iteration runs at a working scale well past the target and
    /// stops when two successive approximations compare equal and agree
    /// through the full working width. A stagnation counter watches for
    /// truncation-induced oscillation between two neighbors and widens the
    /// working scale to break the cycle.
    pub fn sqrt(&self, scale: usize, int: &Interrupt) -> Result<BigDec> {
        if self.neg {
            return Err(Error::Negative);
        }
        if self.is_zero() {
            let mut b = BigDec::zero();
            b.set_to_zero(scale);
            return Ok(b);
        }
        let target = scale.max(self.scale);
        if self.is_one() {
            let mut b = BigDec::one();
            b.extend(scale);
            return Ok(b);
        }

        let mut resscale = (target + BASE_DIGS) * 2;

        // First estimate: half the integer width, seeded 2 or 6 by parity.
        // Low for some inputs, but the iteration recovers in one step.
        let mut x0 = BigDec::one();
        let ic = self.int_cells();
        if ic > 0 {
            x0.digits[0] = if ic & 1 == 1 { 2 } else { 6 };
            let cells = (ic + 1) / 2;
            x0.digits
                .insert_many(0, core::iter::repeat(0).take(cells - 1));
        }

        let len = x0.int_cells() + rdx_from_scale(resscale) - 1;
        let half = BigDec::from_parts(smallvec![500_000_000], 1, false);

        let mut cmp: isize = 1;
        let mut cmp1 = isize::MAX;
        let mut cmp2 = isize::MAX;
        let mut digs: usize = 0;
        let mut digs1: usize = 0;
        let mut times = 0u32;

        while cmp != 0 || digs < len {
            int.check()?;
            debug_assert!(!x0.is_zero());

            let f = self.div(&x0, resscale, int)?;
            let fprime = x0.add(&f, resscale, int)?;
            let x1 = fprime.mul(&half, resscale, int)?;

            cmp = x1.cmp_raw(&x0, Some(int))?;
            digs = x1.len().saturating_sub(cmp.unsigned_abs());

            if cmp == cmp2 && digs == digs1 {
                times += 1;
            } else {
                times = 0;
            }
            if times > 2 {
                resscale += 1;
            }

            cmp2 = cmp1;
            cmp1 = cmp;
            digs1 = digs;
            x0 = x1;
        }

        let mut b = x0;
        if b.scale > target {
            b.truncate_scale(b.scale - target);
        }
        Ok(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};

    fn dec(s: &str) -> BigDec {
        s.parse().unwrap()
    }

    fn sqrt(a: &str, scale: usize) -> String {
        let int = Interrupt::new();
        dec(a).sqrt(scale, &int).unwrap().to_string()
    }

    #[test]
    fn sqrt_of_two_to_fifty_places() {
        assert_eq!(
            sqrt("2", 50),
            "1.41421356237309504880168872420969807856967187537694"
        );
    }

    #[test]
    fn perfect_squares() {
        assert_eq!(sqrt("0", 0), "0");
        assert_eq!(sqrt("1", 0), "1");
        assert_eq!(sqrt("1", 3), "1.000");
        assert_eq!(sqrt("4", 0), "2");
        assert_eq!(sqrt("144", 0), "12");
        assert_eq!(sqrt("10000000000000000", 0), "100000000");
        assert_eq!(sqrt("0.25", 2), "0.50");
    }

    #[test]
    fn result_scale_is_max_of_request_and_operand() {
        assert_eq!(sqrt("4.00", 0), "2.00");
        assert_eq!(sqrt("2", 5), "1.41421");
        assert_eq!(sqrt("16", 1), "4.0");
    }

    #[test]
    fn truncates_rather_than_rounds() {
        // sqrt(3) = 1.7320508075688772935...
        assert_eq!(sqrt("3", 10), "1.7320508075");
    }

    #[test]
    fn negative_input_is_rejected() {
        let int = Interrupt::new();
        assert_eq!(dec("-1").sqrt(10, &int), Err(Error::Negative));
        assert_eq!(dec("-0.0001").sqrt(10, &int), Err(Error::Negative));
    }

    #[test]
    fn interrupted_iteration() {
        let int = Interrupt::new();
        int.raise();
        assert_eq!(dec("2").sqrt(50, &int), Err(Error::Interrupted));
    }

    #[cfg(feature = "rand")]
    mod randomized {
        use super::*;
        use crate::bigrand::RandBigDec;
        use num_traits::Zero;
        use rand::SeedableRng;
        use rand_xorshift::XorShiftRng;

        #[test]
        fn square_round_trip_for_integers() {
            let mut rng = XorShiftRng::from_seed([1u8; 16]);
            let int = Interrupt::new();
            for _ in 0..40 {
                let x = rng.gen_bigdec(2, 0).abs();
                if x.is_zero() {
                    continue;
                }
                let sq = x.mul(&x, 0, &int).unwrap();
                assert_eq!(sq.sqrt(0, &int).unwrap(), x, "sqrt({})", sq);
            }
        }

        #[test]
        fn result_squared_does_not_overshoot() {
            let mut rng = XorShiftRng::from_seed([1u8; 16]);
            let int = Interrupt::new();
            for _ in 0..25 {
                let a = rng.gen_bigdec(2, 6).abs();
                if a.is_zero() {
                    continue;
                }
                let r = a.sqrt(20, &int).unwrap();
                // r is the truncated root: r^2 <= a < (r + ulp)^2.
                let r2 = r.mul(&r, 40, &int).unwrap();
                assert!(r2 <= a, "sqrt({}) = {}", a, r);
                let ulp = dec("0.00000000000000000001");
                let up = r.add(&ulp, 0, &int).unwrap();
                let up2 = up.mul(&up, 40, &int).unwrap();
                assert!(up2 > a, "sqrt({}) = {}", a, r);
            }
        }
    }
}
