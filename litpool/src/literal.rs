//!
//! Literal Values
//!
//! A `Literal` is the compact form of a constant found in script source: a
//! number, a string borrowed from the source buffer, or an id into the
//! well-known string catalog. It is built once when the scanner finds the
//! constant and compared many times afterwards while the literal pool
//! deduplicates entries.
//!
//! Canonical construction:
//! - Text that matches a catalog entry byte for byte always becomes `Magic`
//! - Any other text becomes `Str`, a borrowed view plus a suffix hash
//! - Numbers are stored as-is
//!
//! Equality is defined on the logical value, not on the representation:
//! - `Unknown` only equals `Unknown`
//! - Numbers compare through their canonical text (see `number`), so `0`
//!   and `-0` are the same literal and `NaN` equals itself
//! - A string equals a number when its bytes are the number's text
//! - `Str` and `Magic` compare by bytes, whatever side holds which form
//!
//! `Literal` does not own its text. A `Literal<'a>` can only be built from
//! data that lives for `'a`, so the borrow checker enforces that the source
//! buffer outlives every comparison.
//!
//! Preconditions (violations panic):
//! - `to_text` is only defined for `Str` and `Magic`
//! - `from_text_with_len` needs `len` within the text and on a char boundary
//! - `from_cstr` needs UTF-8 data
//!

use std::ffi::CStr;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::catalog::{self, MagicStringId};
use crate::number::NumberText;
use crate::strings::{LpString, SuffixHash};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralKind {
    Unknown,
    Number,
    String,
    MagicString,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LiteralKind::Unknown => "unknown",
            LiteralKind::Number => "number",
            LiteralKind::String => "string",
            LiteralKind::MagicString => "magic",
        };
        f.pad(name)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Literal<'a> {
    Unknown,
    Number(f64),
    Str(LpString<'a>),
    Magic(MagicStringId),
}

impl<'a> Literal<'a> {
    pub const fn empty() -> Self {
        Literal::Unknown
    }

    pub const fn from_number(num: f64) -> Self {
        Literal::Number(num)
    }

    /// Picks the catalog form when the text is a well-known string.
    pub fn from_text(text: &'a str) -> Self {
        match catalog::find(text) {
            Some(id) => Literal::Magic(id),
            None => Literal::Str(LpString::new(text)),
        }
    }

    /// Builds a literal from the first `len` bytes of `text`.
    pub fn from_text_with_len(text: &'a str, len: usize) -> Self {
        match text.get(..len) {
            Some(prefix) => Self::from_text(prefix),
            None => panic!(
                "literal length {} is out of range or not on a char boundary of {:?}",
                len, text
            ),
        }
    }

    /// Builds a literal from nul-terminated data, measuring it first.
    pub fn from_cstr(text: &'a CStr) -> Self {
        match text.to_str() {
            Ok(text) => Self::from_text(text),
            Err(e) => panic!("literal text is not valid UTF-8: {}", e),
        }
    }

    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::Unknown => LiteralKind::Unknown,
            Literal::Number(_) => LiteralKind::Number,
            Literal::Str(_) => LiteralKind::String,
            Literal::Magic(_) => LiteralKind::MagicString,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Literal::Str(_) | Literal::Magic(_))
    }

    /// Tag-agnostic equality: true when both denote the same logical value.
    pub fn equals(&self, other: &Literal<'a>) -> bool {
        match (self, other) {
            (Literal::Unknown, Literal::Unknown) => true,
            (Literal::Unknown, _) | (_, Literal::Unknown) => false,
            (Literal::Str(a), Literal::Str(b)) => a == b,
            (Literal::Magic(a), Literal::Magic(b)) => a == b,
            (Literal::Str(s), Literal::Magic(id)) | (Literal::Magic(id), Literal::Str(s)) => {
                s.eq_str(id.as_str())
            }
            (Literal::Number(a), Literal::Number(b)) => NumberText::new(*a) == NumberText::new(*b),
            (Literal::Number(num), lit) | (lit, Literal::Number(num)) => {
                lit.equals_str(NumberText::new(*num).as_str())
            }
        }
    }

    /// Strict equality: same tag and same logical value.
    pub fn equals_type(&self, other: &Literal<'a>) -> bool {
        self.kind() == other.kind() && self.equals(other)
    }

    /// Compares against raw text without wrapping it in a literal first.
    pub fn equals_str(&self, text: &str) -> bool {
        match self {
            Literal::Unknown => false,
            Literal::Str(s) => s.eq_str(text),
            Literal::Magic(id) => id.as_str() == text,
            Literal::Number(num) => NumberText::new(*num).as_str() == text,
        }
    }

    pub fn equals_num(&self, num: f64) -> bool {
        self.equals_str(NumberText::new(num).as_str())
    }

    /// Like `equals_str`, but only string literals can match.
    pub fn equals_type_str(&self, text: &str) -> bool {
        self.is_string() && self.equals_str(text)
    }

    /// Like `equals_num`, but only number literals can match.
    pub fn equals_type_num(&self, num: f64) -> bool {
        matches!(self, Literal::Number(_)) && self.equals_num(num)
    }

    /// Suffix hash of the logical text. Different hashes mean different
    /// literals; equal hashes prove nothing.
    pub fn suffix_hash(&self) -> Option<SuffixHash> {
        match self {
            Literal::Unknown => None,
            Literal::Str(s) => Some(s.hash()),
            Literal::Magic(id) => Some(SuffixHash::of(id.as_str().as_bytes())),
            Literal::Number(num) => Some(SuffixHash::of(NumberText::new(*num).as_bytes())),
        }
    }

    /// Text of a string literal. Panics for `Number` and `Unknown`.
    pub fn to_text(&self) -> &'a str {
        match self {
            Literal::Str(s) => s.as_str(),
            Literal::Magic(id) => id.as_str(),
            other => panic!("to_text called on a {} literal", other.kind()),
        }
    }
}

impl Default for Literal<'_> {
    fn default() -> Self {
        Literal::Unknown
    }
}

impl PartialEq for Literal<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Literal<'_> {}

// Hashes the logical text so that every representation of a value lands in
// the same bucket.
impl Hash for Literal<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Literal::Unknown => state.write_u8(0),
            Literal::Number(num) => {
                state.write_u8(1);
                NumberText::new(*num).as_bytes().hash(state);
            }
            Literal::Str(s) => {
                state.write_u8(1);
                s.as_str().as_bytes().hash(state);
            }
            Literal::Magic(id) => {
                state.write_u8(1);
                id.as_str().as_bytes().hash(state);
            }
        }
    }
}

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Unknown => f.write_str("<unknown>"),
            Literal::Number(num) => write!(f, "{}", NumberText::new(*num)),
            Literal::Str(s) => f.write_str(s.as_str()),
            Literal::Magic(id) => f.write_str(id.as_str()),
        }
    }
}

impl From<f64> for Literal<'_> {
    fn from(num: f64) -> Self {
        Literal::from_number(num)
    }
}

impl<'a> From<&'a str> for Literal<'a> {
    fn from(text: &'a str) -> Self {
        Literal::from_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(lit: &Literal<'_>) -> u64 {
        let mut hasher = DefaultHasher::new();
        lit.hash(&mut hasher);
        hasher.finish()
    }

    fn length_id() -> MagicStringId {
        MagicStringId::new(3).unwrap()
    }

    #[test]
    fn test_catalog_text_becomes_magic() {
        let lit = Literal::from_text("length");
        assert!(matches!(lit, Literal::Magic(id) if id == length_id()));
        assert_eq!(lit.kind(), LiteralKind::MagicString);
    }

    #[test]
    fn test_other_text_stays_borrowed() {
        let source = String::from("lengthy");
        let lit = Literal::from_text(&source);
        match lit {
            Literal::Str(s) => {
                assert_eq!(s.as_str(), "lengthy");
                assert!(std::ptr::eq(s.as_str().as_ptr(), source.as_ptr()));
            }
            other => panic!("expected a borrowed string, got {:?}", other),
        }
    }

    #[test]
    fn test_from_text_with_len_takes_prefix() {
        let lit = Literal::from_text_with_len("lengthy", 6);
        assert!(matches!(lit, Literal::Magic(id) if id == length_id()));

        let empty = Literal::from_text_with_len("abc", 0);
        assert!(matches!(empty, Literal::Magic(id) if id.is_empty()));
    }

    #[test]
    fn test_from_cstr_measures_length() {
        let lit = Literal::from_cstr(c"prototype");
        assert!(matches!(lit, Literal::Magic(_)));
        assert_eq!(lit.to_text(), "prototype");

        let lit = Literal::from_cstr(c"widget");
        assert_eq!(lit.kind(), LiteralKind::String);
        assert_eq!(lit.to_text(), "widget");
    }

    #[test]
    fn test_construction_is_deterministic() {
        let a = Literal::from_text("frobnicate");
        let b = Literal::from_text("frobnicate");
        assert_eq!(a.kind(), b.kind());
        assert!(a.equals_type(&b));
        assert_eq!(a.suffix_hash(), b.suffix_hash());
    }

    #[test]
    fn test_magic_against_str() {
        let magic = Literal::Magic(length_id());
        assert!(magic.equals(&Literal::from_text("length")));
        assert!(!magic.equals(&Literal::from_text("Length")));

        // A hand-built Str with catalog text still compares by value.
        let raw = Literal::Str(LpString::new("length"));
        assert!(magic.equals(&raw));
        assert!(raw.equals(&magic));
        assert!(!raw.equals_type(&magic));
    }

    #[test]
    fn test_number_against_text() {
        assert!(Literal::from_number(42.0).equals(&Literal::from_text("42")));
        assert!(Literal::from_text("42").equals(&Literal::from_number(42.0)));
        assert!(Literal::from_text("0").equals(&Literal::from_number(0.0)));
        assert!(!Literal::from_text("42.0").equals(&Literal::from_number(42.0)));
    }

    #[test]
    fn test_negative_zero_renders_as_zero() {
        assert!(Literal::from_number(-0.0).equals(&Literal::from_number(0.0)));
        assert!(!Literal::from_text("-0").equals(&Literal::from_number(0.0)));
        assert!(Literal::from_text("0").equals(&Literal::from_number(-0.0)));
    }

    #[test]
    fn test_nan_equals_itself_and_its_text() {
        let nan = Literal::from_number(f64::NAN);
        assert!(nan.equals(&nan));
        assert!(nan.equals(&Literal::from_text("NaN")));
        assert!(Literal::from_text("NaN").equals(&nan));
    }

    #[test]
    fn test_unknown() {
        assert!(Literal::empty().equals(&Literal::empty()));
        assert!(!Literal::empty().equals(&Literal::from_number(0.0)));
        assert!(!Literal::from_number(0.0).equals(&Literal::empty()));
        assert!(!Literal::empty().equals(&Literal::from_text("")));
        assert!(!Literal::empty().equals_str(""));
        assert!(Literal::empty().suffix_hash().is_none());
    }

    #[test]
    fn test_strict_entry_points() {
        let num = Literal::from_number(7.0);
        let text = Literal::from_text("7");

        assert!(num.equals(&text));
        assert!(!num.equals_type(&text));

        assert!(num.equals_str("7"));
        assert!(!num.equals_type_str("7"));
        assert!(text.equals_type_str("7"));

        assert!(text.equals_num(7.0));
        assert!(!text.equals_type_num(7.0));
        assert!(num.equals_type_num(7.0));
        assert!(Literal::from_text("length").equals_type_str("length"));
    }

    #[test]
    fn test_equivalence_relation() {
        let source = String::from("length 42 x NaN");
        let lits = [
            Literal::empty(),
            Literal::from_number(0.0),
            Literal::from_number(-0.0),
            Literal::from_number(42.0),
            Literal::from_number(f64::NAN),
            Literal::from_number(1e21),
            Literal::from_text("0"),
            Literal::from_text("-0"),
            Literal::from_text(&source[7..9]),
            Literal::from_text(&source[0..6]),
            Literal::Str(LpString::new(&source[0..6])),
            Literal::from_text(&source[10..11]),
            Literal::from_text(&source[12..15]),
            Literal::from_text("1e+21"),
            Literal::from_text(""),
        ];

        for a in &lits {
            assert!(a.equals(a), "reflexive: {:?}", a);
            for b in &lits {
                assert_eq!(a.equals(b), b.equals(a), "symmetric: {:?} {:?}", a, b);
                if a.equals(b) {
                    assert_eq!(hash_of(a), hash_of(b), "hash: {:?} {:?}", a, b);
                    assert_eq!(a.suffix_hash(), b.suffix_hash());
                }
                for c in &lits {
                    if a.equals(b) && b.equals(c) {
                        assert!(a.equals(c), "transitive: {:?} {:?} {:?}", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_unequal_suffix_hash_means_unequal() {
        let words = ["alpha", "beta", "gamma", "length", "12", "NaN", "", "delta"];
        let lits: Vec<Literal<'_>> = words
            .iter()
            .map(|w| Literal::from_text(w))
            .chain([Literal::from_number(12.0), Literal::from_number(f64::NAN)])
            .collect();

        for a in &lits {
            for b in &lits {
                if a.suffix_hash() != b.suffix_hash() {
                    assert!(!a.equals(b), "{:?} {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_to_text() {
        assert_eq!(Literal::from_text("length").to_text(), "length");
        assert_eq!(Literal::from_text("gadget").to_text(), "gadget");
    }

    #[test]
    #[should_panic(expected = "to_text called on a number literal")]
    fn test_to_text_on_number_panics() {
        Literal::from_number(1.0).to_text();
    }

    #[test]
    #[should_panic(expected = "to_text called on a unknown literal")]
    fn test_to_text_on_unknown_panics() {
        Literal::empty().to_text();
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_from_text_with_len_out_of_range_panics() {
        Literal::from_text_with_len("abc", 4);
    }

    #[test]
    #[should_panic(expected = "not on a char boundary")]
    fn test_from_text_with_len_inside_char_panics() {
        Literal::from_text_with_len("é", 1);
    }

    #[test]
    #[should_panic(expected = "not valid UTF-8")]
    fn test_from_cstr_invalid_utf8_panics() {
        Literal::from_cstr(c"\xff");
    }

    #[test]
    fn test_tied_number_equals_its_text() {
        let num = Literal::from_number(2069008760419448.25);
        assert!(num.equals(&Literal::from_text("2069008760419448.2")));
        assert!(!num.equals(&Literal::from_text("2069008760419448.3")));
    }

    #[test]
    fn test_display() {
        assert_eq!(Literal::from_number(1.5).to_string(), "1.5");
        assert_eq!(Literal::from_text("length").to_string(), "length");
        assert_eq!(Literal::empty().to_string(), "<unknown>");
    }
}
