//!
//! Canonical Number Text
//!
//! Renders a number the way ECMAScript's `Number.prototype.toString()` does
//! with radix 10. Two numeric literals are the same literal exactly when this
//! text is the same, and a string literal equals a number when its bytes are
//! this text.
//!
//! Rendering never touches the heap: digits go into a fixed stack buffer of
//! `MAX_CHARS_IN_STRINGIFIED_NUMBER` bytes.
//!
//! Special values:
//! - `NaN` renders as `NaN`
//! - both `0.0` and `-0.0` render as `0`
//! - infinities render as `Infinity` and `-Infinity`
//! - magnitudes outside `[1e-6, 1e21)` use exponent form: `1e+21`, `1.5e-7`
//!

use smallvec::SmallVec;
use std::fmt::{self, Write};

pub const MAX_CHARS_IN_STRINGIFIED_NUMBER: usize = 64;

#[derive(Clone, Copy)]
pub struct NumberText {
    buf: [u8; MAX_CHARS_IN_STRINGIFIED_NUMBER],
    len: usize,
}

impl NumberText {
    /// Panics if the text does not fit the buffer. The rendering rules bound
    /// the width well below the capacity, so that only happens on a broken
    /// formatter.
    pub fn new(num: f64) -> Self {
        let mut text = Self::empty();
        if text.render(num).is_err() {
            panic!(
                "number text for {:?} exceeds {} chars",
                num, MAX_CHARS_IN_STRINGIFIED_NUMBER
            );
        }
        text
    }

    fn empty() -> Self {
        Self {
            buf: [0; MAX_CHARS_IN_STRINGIFIED_NUMBER],
            len: 0,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(self.as_bytes()).expect("number text is ascii")
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn push(&mut self, bytes: &[u8]) -> fmt::Result {
        let end = self.len + bytes.len();
        if end > MAX_CHARS_IN_STRINGIFIED_NUMBER {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }

    fn push_zeros(&mut self, count: usize) -> fmt::Result {
        for _ in 0..count {
            self.push(b"0")?;
        }
        Ok(())
    }

    fn render(&mut self, num: f64) -> fmt::Result {
        if num.is_nan() {
            return self.push(b"NaN");
        }
        if num == 0.0 {
            return self.push(b"0");
        }
        if num.is_infinite() {
            let text: &[u8] = if num > 0.0 { b"Infinity" } else { b"-Infinity" };
            return self.push(text);
        }
        if num < 0.0 {
            self.push(b"-")?;
        }

        // `{:e}` gives the shortest digit count that round-trips, but on a tie
        // between two such strings it may pick the upper one. Re-rendering at
        // that precision yields the one nearest the exact value, ties to even.
        let mut shortest = Self::empty();
        write!(shortest, "{:e}", num.abs())?;
        let precision = shortest
            .as_bytes()
            .iter()
            .take_while(|&&b| b != b'e')
            .filter(|b| b.is_ascii_digit())
            .count()
            .saturating_sub(1);

        let mut sci = Self::empty();
        write!(sci, "{:.*e}", precision, num.abs())?;
        let (mantissa, exponent) = sci.as_str().split_once('e').ok_or(fmt::Error)?;
        let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;
        let digits: SmallVec<[u8; 24]> = mantissa.bytes().filter(|&b| b != b'.').collect();

        let k = digits.len() as i32;
        let n = exponent + 1;

        if k <= n && n <= 21 {
            self.push(&digits)?;
            self.push_zeros((n - k) as usize)
        } else if 0 < n && n <= 21 {
            let (int, frac) = digits.split_at(n as usize);
            self.push(int)?;
            self.push(b".")?;
            self.push(frac)
        } else if -6 < n && n <= 0 {
            self.push(b"0.")?;
            self.push_zeros((-n) as usize)?;
            self.push(&digits)
        } else {
            self.push(&digits[..1])?;
            if k > 1 {
                self.push(b".")?;
                self.push(&digits[1..])?;
            }
            self.push(if n - 1 >= 0 { b"e+" } else { b"e-" })?;
            write!(self, "{}", (n - 1).unsigned_abs())
        }
    }
}

impl fmt::Write for NumberText {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push(s.as_bytes())
    }
}

impl PartialEq for NumberText {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for NumberText {}

impl fmt::Debug for NumberText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NumberText({:?})", self.as_str())
    }
}

impl fmt::Display for NumberText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
