//! String to number conversion, decimal and base-generic.

use smallvec::smallvec;

use crate::digit::{rdx_from_scale, BigDigit, Digit, BASE_DIGS};
use crate::{BigDec, Interrupt, ParseBigDecError, Result};

use super::{DigitVec, POW10_DIGIT};

/// Single-character digit value, uppercase letters counting from ten and
/// clamped to the base (so `F` in base 12 reads as 11, the way bc's lexer
/// hands characters through).
fn parse_char(c: u8, base: u64) -> BigDigit {
    if c.is_ascii_uppercase() {
        let v = (c - b'A') as BigDigit + 10;
        if v >= base {
            base - 1
        } else {
            v
        }
    } else {
        (c - b'0') as BigDigit
    }
}

/// The bc lexer only ever produces digits, uppercase letters, and at most
/// one radix point.
fn str_valid(s: &str) -> bool {
    let mut radix = false;
    for c in s.bytes() {
        if c == b'.' {
            if radix {
                return false;
            }
            radix = true;
            continue;
        }
        if !(c.is_ascii_digit() || c.is_ascii_uppercase()) {
            return false;
        }
    }
    true
}

/// Direct decimal conversion: one pass locating the point, one pass
/// accumulating digits into cells from the low end.
fn parse_decimal(s: &str) -> BigDec {
    let bytes = s.as_bytes();
    let mut start = 0;
    while start < bytes.len() && bytes[start] == b'0' {
        start += 1;
    }
    let val = &bytes[start..];

    let point = val.iter().position(|&c| c == b'.');
    let scale = match point {
        Some(p) => val.len() - p - 1,
        None => 0,
    };
    let rdx = rdx_from_scale(scale);
    let pad = rdx * BASE_DIGS - scale;

    if val.iter().all(|&c| c == b'0' || c == b'.') {
        return BigDec {
            digits: DigitVec::new(),
            rdx,
            scale,
            neg: false,
        };
    }

    let ndigits = val.len() - usize::from(point.is_some());
    let mut digits: DigitVec = smallvec![0; rdx_from_scale(pad + ndigits)];

    let mut pos = pad;
    for &c in val.iter().rev() {
        if c == b'.' {
            continue;
        }
        // An uppercase letter in a decimal literal saturates to 9.
        let d = if c.is_ascii_uppercase() {
            9
        } else {
            (c - b'0') as Digit
        };
        digits[pos / BASE_DIGS] += d * POW10_DIGIT[pos % BASE_DIGS];
        pos += 1;
    }

    let mut n = BigDec {
        digits,
        rdx,
        scale,
        neg: false,
    };
    n.clean();
    n
}

/// Base-generic conversion, driven by the number core itself: the integer
/// part folds as `n = n*base + v`, the fractional part accumulates a
/// numerator and a `base^k` denominator and divides once at the end.
fn parse_base(s: &str, base: u64, int: &Interrupt) -> Result<BigDec> {
    let bytes = s.as_bytes();
    if bytes.iter().all(|&c| c == b'0' || c == b'.') {
        return Ok(BigDec::zero());
    }

    let base_num = BigDec::from_bigdig(base);
    let mut n = BigDec::zero();

    let mut i = 0;
    while i < bytes.len() && bytes[i] != b'.' {
        let v = parse_char(bytes[i], base);
        n = n.mul(&base_num, 0, int)?;
        n = n.add(&BigDec::from_bigdig(v), 0, int)?;
        i += 1;
    }
    if i == bytes.len() {
        return Ok(n);
    }

    let mut result = BigDec::zero();
    let mut mult = BigDec::one();
    let mut digs = 0usize;
    for &c in &bytes[i + 1..] {
        int.check()?;
        let v = parse_char(c, base);
        result = result.mul(&base_num, 0, int)?;
        result = result.add(&BigDec::from_bigdig(v), 0, int)?;
        mult = mult.mul(&base_num, 0, int)?;
        digs += 1;
    }

    // mult grew from one by factors of base, so this cannot divide by
    // zero. Work at twice the digit count, then settle on it exactly.
    result = result.div(&mult, digs * 2, int)?;
    n = n.add(&result, digs, int)?;
    if n.is_zero() {
        return Ok(BigDec::zero());
    }
    if n.scale < digs {
        n.extend(digs - n.scale);
    } else if n.scale > digs {
        n.truncate_scale(n.scale - digs);
    }
    Ok(n)
}

impl BigDec {
    /// Converts lexer output in the given base (2 through 36). Base 10
    /// takes the direct path; everything else goes through the generic
    /// accumulator. Input is trusted the way the interpreter's lexer
    /// guarantees it: digits, uppercase letters, one optional point.
    pub fn parse(s: &str, base: u64, int: &Interrupt) -> Result<BigDec> {
        debug_assert!(str_valid(s));
        debug_assert!((2..=36).contains(&base));
        if base == 10 {
            Ok(parse_decimal(s))
        } else {
            parse_base(s, base, int)
        }
    }

    /// dc's single-letter digit: `A` is 10, `Z` is 35, ordinary digits are
    /// themselves.
    pub fn from_letter(c: char) -> BigDec {
        debug_assert!(c.is_ascii_digit() || c.is_ascii_uppercase());
        BigDec::from_bigdig(parse_char(c as u8, 36))
    }

    /// Validating parser backing [`FromStr`](core::str::FromStr) and
    /// [`Num::from_str_radix`](num_traits::Num::from_str_radix): accepts
    /// an optional leading `-`, lowercase digits, and rejects characters
    /// whose value does not fit the base.
    pub fn from_str_radix(
        s: &str,
        base: u64,
    ) -> core::result::Result<BigDec, ParseBigDecError> {
        if !(2..=36).contains(&base) {
            return Err(ParseBigDecError::invalid_base());
        }
        let (neg, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if rest.is_empty() || rest == "." {
            return Err(ParseBigDecError::empty());
        }

        let mut radix = false;
        for c in rest.chars() {
            if c == '.' {
                if radix {
                    return Err(ParseBigDecError::invalid());
                }
                radix = true;
                continue;
            }
            let v = c.to_digit(36).ok_or_else(ParseBigDecError::invalid)?;
            if u64::from(v) >= base {
                return Err(ParseBigDecError::invalid());
            }
        }

        let upper: alloc::string::String = rest.chars().map(|c| c.to_ascii_uppercase()).collect();
        match BigDec::parse(&upper, base, &Interrupt::new()) {
            Ok(mut n) => {
                if neg && !n.is_zero() {
                    n.neg = true;
                }
                Ok(n)
            }
            Err(_) => unreachable!("parsing without an interrupt handle"),
        }
    }
}
