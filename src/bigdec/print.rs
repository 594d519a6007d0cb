//! Number to character-sink conversion.
//!
//! All output funnels through a [`LineWriter`], which owns the column
//! counter and breaks long lines with a backslash-newline the way bc does.
//! The per-digit renderers come in three shapes: one character per digit
//! (bases through 16), space-separated decimal groups (larger bases), and
//! raw bytes (dc's stream printer).

use alloc::vec::Vec;

use crate::digit::{dec_len, BigDigit, BASE_DIGS, POW10};
use crate::{BigDec, Interrupt, Result};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Largest base printed with one character per digit.
const MAX_POSIX_IBASE: u64 = 16;

/// Byte-at-a-time output target.
pub trait CharSink {
    fn put_char(&mut self, c: u8);
}

impl CharSink for alloc::string::String {
    fn put_char(&mut self, c: u8) {
        self.push(c as char);
    }
}

impl CharSink for Vec<u8> {
    fn put_char(&mut self, c: u8) {
        self.push(c);
    }
}

impl<S: CharSink + ?Sized> CharSink for &mut S {
    fn put_char(&mut self, c: u8) {
        (**self).put_char(c);
    }
}

/// Wraps a sink with bc's line discipline: when the column count reaches
/// `line_len - 1`, a `\` and newline go out and the count resets.
pub struct LineWriter<S> {
    sink: S,
    nchars: usize,
    line_len: usize,
}

impl<S: CharSink> LineWriter<S> {
    /// The bc default of 70 columns.
    pub fn new(sink: S) -> Self {
        Self::with_line_len(sink, 70)
    }

    pub fn with_line_len(sink: S, line_len: usize) -> Self {
        LineWriter {
            sink,
            nchars: 0,
            line_len,
        }
    }

    /// No wrapping; for `Display` and string conversions.
    pub(crate) fn unwrapped(sink: S) -> Self {
        Self::with_line_len(sink, usize::MAX)
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Wrap-checked write of one payload character.
    fn putc(&mut self, c: u8) {
        if self.nchars >= self.line_len - 1 {
            self.sink.put_char(b'\\');
            self.sink.put_char(b'\n');
            self.nchars = 0;
        }
        self.sink.put_char(c);
        self.nchars += 1;
    }

    /// Unchecked write; the sign and trailing newline bypass wrapping.
    fn put_raw(&mut self, c: u8) {
        self.sink.put_char(c);
    }

    fn finish_line(&mut self) {
        self.sink.put_char(b'\n');
        self.nchars = 0;
    }
}

/// The three digit renderers of §print: single character, space-separated
/// decimal group, raw byte.
#[derive(Debug, Clone, Copy)]
enum DigitWriter {
    Hex,
    Digits,
    Char,
}

impl DigitWriter {
    fn write<S: CharSink>(self, w: &mut LineWriter<S>, dig: BigDigit, width: usize, radix: bool) {
        match self {
            DigitWriter::Hex => {
                if radix {
                    w.putc(b'.');
                }
                w.putc(HEX_DIGITS[dig as usize]);
            }
            DigitWriter::Digits => {
                w.putc(if radix { b'.' } else { b' ' });
                let mut pow: BigDigit = 1;
                for _ in 1..width {
                    pow *= 10;
                }
                let mut n = dig;
                for _ in 0..width {
                    let d = n / pow;
                    n -= d * pow;
                    w.putc(b'0' + d as u8);
                    pow /= 10;
                }
            }
            DigitWriter::Char => {
                w.put_raw(dig as u8);
                w.nchars += 1;
            }
        }
    }
}

impl BigDec {
    /// Prints in the given base: 10 directly, 0 and 1 in exponent
    /// notation, anything else through the base-conversion printer. A
    /// trailing newline resets the sink's column count.
    pub fn print<S: CharSink>(
        &self,
        base: u64,
        newline: bool,
        w: &mut LineWriter<S>,
        int: &Interrupt,
    ) -> Result<()> {
        if self.is_zero() {
            DigitWriter::Hex.write(w, 0, 1, false);
        } else if base == 10 {
            self.print_decimal(w, int)?;
        } else if base == 0 || base == 1 {
            self.print_exponent(base == 0, w, int)?;
        } else {
            self.print_base(base, w, int)?;
        }
        if newline {
            w.finish_line();
        }
        Ok(())
    }

    /// Base-10 printer: cells are unpacked to digits top-down, the radix
    /// point lands between the integer and fractional cells, and exactly
    /// `scale` fractional digits come out.
    fn print_decimal<S: CharSink>(&self, w: &mut LineWriter<S>, int: &Interrupt) -> Result<()> {
        if self.neg {
            w.put_raw(b'-');
            w.nchars += 1;
        }

        let len = self.len();
        if self.int_cells() == 0 {
            w.putc(b'0');
        } else {
            for i in (self.rdx..len).rev() {
                int.check()?;
                let cell = self.digits[i] as BigDigit;
                let width = if i == len - 1 {
                    dec_len(cell)
                } else {
                    BASE_DIGS
                };
                for j in (0..width).rev() {
                    let d = (cell / POW10[j]) % 10;
                    w.putc(b'0' + d as u8);
                }
            }
        }

        if self.scale > 0 {
            w.putc(b'.');
            let mut remaining = self.scale;
            'cells: for i in (0..self.rdx).rev() {
                int.check()?;
                let cell = self.digits.get(i).copied().unwrap_or(0) as BigDigit;
                for j in (0..BASE_DIGS).rev() {
                    if remaining == 0 {
                        break 'cells;
                    }
                    let d = (cell / POW10[j]) % 10;
                    w.putc(b'0' + d as u8);
                    remaining -= 1;
                }
            }
            // A zero value still owes its scale in zeros.
            for _ in 0..remaining {
                w.putc(b'0');
            }
        }
        Ok(())
    }

    /// Arbitrary-base printer: the integer part divides down with the
    /// remainders pushed on a stack, the fraction multiplies up one output
    /// digit at a time.
    fn print_base<S: CharSink>(
        &self,
        base: u64,
        w: &mut LineWriter<S>,
        int: &Interrupt,
    ) -> Result<()> {
        if self.neg {
            w.put_raw(b'-');
            w.nchars += 1;
        }
        let (width, writer) = if base <= MAX_POSIX_IBASE {
            (1, DigitWriter::Hex)
        } else {
            (dec_len(base - 1), DigitWriter::Digits)
        };
        print_num(&self.abs(), base, width, writer, w, int)
    }

    /// Scientific (`1.23e5`) or engineering (`123e3`) notation.
    fn print_exponent<S: CharSink>(
        &self,
        eng: bool,
        w: &mut LineWriter<S>,
        int: &Interrupt,
    ) -> Result<()> {
        let neg_exp = self.len() <= self.rdx;
        let mut temp = self.clone();
        let mut places;

        if neg_exp {
            places = self.leading_fraction_zeros() + 1;
            let m = places % 3;
            if eng && m != 0 {
                places += 3 - m;
            }
            temp.shift_left(places)?;
        } else {
            places = self.int_digits() - 1;
            if eng {
                places -= places % 3;
            }
            temp.shift_right(places)?;
        }

        temp.print_decimal(w, int)?;
        w.putc(b'e');

        if places == 0 {
            DigitWriter::Hex.write(w, 0, 1, false);
            return Ok(());
        }
        if neg_exp {
            w.putc(b'-');
        }
        BigDec::from_bigdig(places as BigDigit).print_decimal(w, int)
    }

    /// dc's stream printer: each digit in the base as one raw byte.
    pub fn stream<S: CharSink>(
        &self,
        base: u64,
        w: &mut LineWriter<S>,
        int: &Interrupt,
    ) -> Result<()> {
        print_num(&self.abs(), base, 1, DigitWriter::Char, w, int)
    }

    /// Distance from the radix point to the first significant fractional
    /// digit, for a value below one.
    fn leading_fraction_zeros(&self) -> usize {
        for i in (0..self.rdx).rev() {
            let cell = self.digits.get(i).copied().unwrap_or(0);
            if cell != 0 {
                let in_cell = BASE_DIGS - dec_len(cell as BigDigit);
                return (self.rdx - 1 - i) * BASE_DIGS + in_cell;
            }
        }
        self.rdx * BASE_DIGS
    }
}

fn print_num<S: CharSink>(
    n: &BigDec,
    base: u64,
    width: usize,
    writer: DigitWriter,
    w: &mut LineWriter<S>,
    int: &Interrupt,
) -> Result<()> {
    if n.is_zero() {
        writer.write(w, 0, width, false);
        return Ok(());
    }

    let base_num = BigDec::from_bigdig(base);
    let mut intp = n.clone();
    intp.truncate_scale(intp.scale);
    let mut fracp = n.sub(&intp, 0, int)?;

    let mut stack: Vec<BigDigit> = Vec::new();
    while !intp.is_zero() {
        int.check()?;
        let (q, dig) = intp.divmod(&base_num, 0, int)?;
        intp = q;
        stack.push(dig.to_bigdig()?);
    }
    for &dig in stack.iter().rev() {
        int.check()?;
        writer.write(w, dig, width, false);
    }

    if n.rdx == 0 {
        return Ok(());
    }

    // Emit fraction digits until base^k outgrows the stored cells.
    let mut frac_len = BigDec::one();
    let mut radix = true;
    while frac_len.len() <= n.rdx {
        int.check()?;
        fracp = fracp.mul(&base_num, n.scale, int)?;
        let dig = fracp.to_bigdig()?;
        fracp = fracp.sub(&BigDec::from_bigdig(dig), 0, int)?;
        writer.write(w, dig, width, radix);
        frac_len = frac_len.mul(&base_num, 0, int)?;
        radix = false;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};

    fn dec(s: &str) -> BigDec {
        s.parse().unwrap()
    }

    fn print_wrapped(n: &BigDec, base: u64, line_len: usize) -> String {
        let mut w = LineWriter::with_line_len(String::new(), line_len);
        n.print(base, false, &mut w, &Interrupt::new()).unwrap();
        w.into_inner()
    }

    #[test]
    fn decimal_round_trip() {
        for s in [
            "0",
            "3.14159265358979323846",
            "-42",
            "0.5",
            "1000000000",
            "0.000000000000000001",
            "123456789123456789.000000001",
            "-0.0000000001",
        ] {
            assert_eq!(dec(s).to_string(), s, "{}", s);
        }
    }

    #[test]
    fn pure_fractions_keep_a_leading_zero() {
        assert_eq!(dec("0.333").to_string(), "0.333");
        assert_eq!(dec("-0.5").to_string(), "-0.5");
    }

    #[test]
    fn trailing_scale_zeros_are_printed() {
        let int = Interrupt::new();
        let n = dec("1.5").mul(&dec("2"), 1, &int).unwrap();
        assert_eq!(n.to_string(), "3.0");
    }

    #[test]
    fn hex_printing() {
        assert_eq!(dec("255").to_string_radix(16), "FF");
        assert_eq!(dec("4096").to_string_radix(16), "1000");
        assert_eq!(dec("-26").to_string_radix(16), "-1A");
        assert_eq!(dec("0").to_string_radix(16), "0");
    }

    #[test]
    fn hex_with_fraction_matches_bc() {
        let n = dec("12345.67890000000000000000");
        assert_eq!(
            n.to_string_radix(16),
            "3039.ADCC63F141205BC01A36E2EB"
        );
    }

    #[test]
    fn binary_printing() {
        assert_eq!(dec("5").to_string_radix(2), "101");
        // 0.5 at one fractional cell emits 30 binary digits.
        let s = dec("0.5").to_string_radix(2);
        assert!(s.starts_with(".1"));
        assert!(s[2..].bytes().all(|b| b == b'0'));
    }

    #[test]
    fn large_bases_use_digit_groups() {
        // 1 * 100 + 23, two-wide groups.
        assert_eq!(dec("123").to_string_radix(100), " 01 23");
        assert_eq!(dec("9999").to_string_radix(100), " 99 99");
    }

    #[test]
    fn line_wrapping_emits_backslash_continuations() {
        let nines: String = "9".repeat(100);
        let out = print_wrapped(&dec(&nines), 10, 70);
        let mut want = String::new();
        want.push_str(&"9".repeat(69));
        want.push_str("\\\n");
        want.push_str(&"9".repeat(31));
        assert_eq!(out, want);
    }

    #[test]
    fn newline_terminates_and_resets() {
        let mut w = LineWriter::new(String::new());
        dec("7").print(10, true, &mut w, &Interrupt::new()).unwrap();
        assert_eq!(w.into_inner(), "7\n");
    }

    #[test]
    fn exponent_notation() {
        // Base 1 selects plain scientific form.
        assert_eq!(print_wrapped(&dec("12345.6789"), 1, 70), "1.23456789e4");
        assert_eq!(print_wrapped(&dec("0.00123"), 1, 70), "1.23e-3");
        assert_eq!(print_wrapped(&dec("5"), 1, 70), "5e0");
        assert_eq!(print_wrapped(&dec("0.5"), 1, 70), "5e-1");
        // Base 0 selects engineering form: exponents in multiples of three.
        assert_eq!(print_wrapped(&dec("12345.6789"), 0, 70), "12.3456789e3");
        assert_eq!(print_wrapped(&dec("0.00123"), 0, 70), "1.23e-3");
        assert_eq!(print_wrapped(&dec("0.0123"), 0, 70), "12.3e-3");
    }

    #[test]
    fn stream_emits_raw_bytes() {
        let mut w = LineWriter::unwrapped(Vec::new());
        dec("72")
            .stream(256, &mut w, &Interrupt::new())
            .unwrap();
        assert_eq!(w.into_inner(), alloc::vec![72u8]);

        let mut w = LineWriter::unwrapped(Vec::new());
        dec("25185")
            .stream(256, &mut w, &Interrupt::new())
            .unwrap();
        // 25185 = 98*256 + 97 -> "ba"
        assert_eq!(w.into_inner(), alloc::vec![98u8, 97]);
    }

    #[test]
    fn print_round_trips_through_parse() {
        let int = Interrupt::new();
        for base in 2..=16u64 {
            for s in ["0", "1", "255", "4095.9375", "0.0625", "1000000007"] {
                let n = dec(s);
                let text = n.abs().to_string_radix(base);
                let back = BigDec::parse(&text, base, &int).unwrap();
                // Fractions may print more digits than stored; parsing
                // them back cannot drift by more than one stored ulp.
                let diff = back.sub(&n.abs(), 0, &int).unwrap().abs();
                let tol = BigDec::parse("0.0001", 10, &int).unwrap();
                assert!(diff < tol, "base {} {} -> {} -> {}", base, s, text, back);
            }
        }
    }
}
