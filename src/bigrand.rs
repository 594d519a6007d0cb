//! Randomization of big decimals
#![cfg(feature = "rand")]
#![cfg_attr(docsrs, doc(cfg(feature = "rand")))]

use rand::prelude::*;

use crate::bigdec::DigitVec;
use crate::digit::{rdx_from_scale, Digit, BASE_POW};
use crate::BigDec;

/// A trait for sampling random big decimals.
///
/// The `rand` feature must be enabled to use this. See crate-level documentation for details.
pub trait RandBigDec {
    /// Generate a random [`BigDec`] spanning up to `cells` cells with the
    /// given decimal scale. The sign is random; the value may be zero.
    fn gen_bigdec(&mut self, cells: usize, scale: usize) -> BigDec;

    /// Generate a random non-negative [`BigDec`] less than the given
    /// bound, at the bound's scale. Fails when the bound is not positive.
    fn gen_bigdec_below(&mut self, bound: &BigDec) -> BigDec;
}

impl<R: Rng + ?Sized> RandBigDec for R {
    fn gen_bigdec(&mut self, cells: usize, scale: usize) -> BigDec {
        let len = cells.max(rdx_from_scale(scale));
        let mut digits = DigitVec::with_capacity(len);
        for _ in 0..len {
            digits.push(self.random_range(0..BASE_POW as Digit));
        }
        let neg = self.random();
        BigDec::from_parts(digits, scale, neg)
    }

    fn gen_bigdec_below(&mut self, bound: &BigDec) -> BigDec {
        assert_eq!(bound.cmp_zero(), core::cmp::Ordering::Greater);
        loop {
            let n = self.gen_bigdec(bound.len(), bound.scale()).abs();
            if n < *bound {
                return n;
            }
        }
    }
}
