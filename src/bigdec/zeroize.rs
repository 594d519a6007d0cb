#![cfg(feature = "zeroize")]

use zeroize::Zeroize;

use super::BigDec;

impl Zeroize for BigDec {
    fn zeroize(&mut self) {
        self.digits.as_mut_slice().zeroize();
        self.digits.clear();
        self.rdx.zeroize();
        self.scale.zeroize();
        self.neg.zeroize();
    }
}
