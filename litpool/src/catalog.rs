//!
//! Well-Known String Catalog
//!
//! A fixed table of strings that show up in almost every script: type
//! names, property names of the built-in objects, `length`, `prototype` and
//! friends. A literal whose text matches an entry is stored as a small id
//! instead of a borrowed string, so the table doubles as a zero-cost intern
//! pool for the most common names.
//!
//! The table is immutable for the whole process. The length index is built
//! on first use and never written again.
//!

use smallvec::SmallVec;
use std::fmt;
use std::sync::LazyLock;

pub const MAGIC_STRINGS: &[&str] = &[
    "",
    "undefined",
    "null",
    "length",
    "false",
    "true",
    "boolean",
    "number",
    "string",
    "object",
    "function",
    "arguments",
    "eval",
    "global",
    "Object",
    "Function",
    "Array",
    "String",
    "Boolean",
    "Number",
    "Date",
    "RegExp",
    "Error",
    "EvalError",
    "RangeError",
    "ReferenceError",
    "SyntaxError",
    "TypeError",
    "URIError",
    "Math",
    "JSON",
    "prototype",
    "constructor",
    "caller",
    "callee",
    "name",
    "message",
    "value",
    "get",
    "set",
    "writable",
    "enumerable",
    "configurable",
    "toString",
    "valueOf",
    "toLocaleString",
    "hasOwnProperty",
    "isPrototypeOf",
    "propertyIsEnumerable",
    "apply",
    "call",
    "bind",
    "push",
    "pop",
    "concat",
    "join",
    "reverse",
    "shift",
    "unshift",
    "slice",
    "splice",
    "sort",
    "indexOf",
    "lastIndexOf",
    "every",
    "some",
    "forEach",
    "map",
    "filter",
    "reduce",
    "reduceRight",
    "charAt",
    "charCodeAt",
    "fromCharCode",
    "substring",
    "split",
    "replace",
    "search",
    "match",
    "trim",
    "toLowerCase",
    "toUpperCase",
    "NaN",
    "Infinity",
    "parseInt",
    "parseFloat",
    "isNaN",
    "isFinite",
    "source",
    "lastIndex",
    "index",
    "input",
    "abs",
    "floor",
    "ceil",
    "round",
    "max",
    "min",
    "random",
    "sqrt",
    "PI",
    "now",
    "parse",
    "stringify",
    "keys",
    "create",
    "defineProperty",
    "freeze",
    "isArray",
];

static LENGTH_INDEX: LazyLock<Vec<SmallVec<[MagicStringId; 8]>>> = LazyLock::new(|| {
    let longest = MAGIC_STRINGS.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut index = vec![SmallVec::new(); longest + 1];
    for id in MagicStringId::iter() {
        index[id.len()].push(id);
    }
    index
});

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MagicStringId(u16);

impl MagicStringId {
    pub const COUNT: usize = MAGIC_STRINGS.len();

    /// Returns the id at `index`, or `None` past the end of the table.
    pub fn new(index: u16) -> Option<Self> {
        if (index as usize) < Self::COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    pub fn index(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn as_str(self) -> &'static str {
        MAGIC_STRINGS[self.0 as usize]
    }

    #[inline]
    pub fn len(self) -> usize {
        self.as_str().len()
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    pub fn iter() -> impl Iterator<Item = MagicStringId> {
        (0..Self::COUNT as u16).map(MagicStringId)
    }

    /// Ids whose text is exactly `len` bytes long, in table order.
    pub fn with_length(len: usize) -> &'static [MagicStringId] {
        LENGTH_INDEX.get(len).map(|ids| ids.as_slice()).unwrap_or(&[])
    }
}

impl fmt::Debug for MagicStringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}({:?})", self.0, self.as_str())
    }
}

impl fmt::Display for MagicStringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Linear scan over the table: length first, then bytes.
pub fn find(text: &str) -> Option<MagicStringId> {
    let len = text.len();
    MagicStringId::iter().find(|id| id.len() == len && id.as_str().as_bytes() == text.as_bytes())
}
