//!
//! Literal Pool
//!
//! Collects the literals of a compilation unit, storing each logical value
//! once. Interning a literal returns the index of an existing entry whenever
//! one is equal to it, whatever its representation: the string `"42"` and
//! the number `42` share a slot, and so do a borrowed `"length"` and the
//! catalog id for `length`.
//!
//! Lookup goes through `Literal`'s `Hash`/`Eq`, which work on the logical
//! text, so it is a single hash probe rather than a linear scan.
//!
//! Entries are kept in insertion order; an index stays valid for the
//! lifetime of the pool.
//!

use indexmap::IndexSet;
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

use crate::literal::{Literal, LiteralKind};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LiteralIndex(u32);

impl LiteralIndex {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for LiteralIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lit#{}", self.0)
    }
}

impl fmt::Display for LiteralIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Literals offered to the pool.
    pub interned: usize,
    /// Literals that matched an existing entry.
    pub hits: usize,
}

/// Report row for one pool entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolEntry {
    pub index: LiteralIndex,
    pub kind: LiteralKind,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct LiteralPool<'a> {
    entries: IndexSet<Literal<'a>>,
    stats: PoolStats,
}

impl<'a> LiteralPool<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexSet::with_capacity(capacity),
            stats: PoolStats::default(),
        }
    }

    /// Returns the slot of `literal`, adding it if no equal entry exists.
    /// The first representation interned for a value is the one kept.
    ///
    /// Panics on `Literal::Unknown`, which never names a pool entry.
    pub fn intern(&mut self, literal: Literal<'a>) -> LiteralIndex {
        assert!(
            !matches!(literal, Literal::Unknown),
            "cannot intern an unknown literal"
        );
        self.stats.interned += 1;

        let (index, inserted) = self.entries.insert_full(literal);
        if inserted {
            trace!(index, kind = %literal.kind(), text = %literal, "new pool entry");
        } else {
            self.stats.hits += 1;
        }
        LiteralIndex(index as u32)
    }

    pub fn intern_str(&mut self, text: &'a str) -> LiteralIndex {
        self.intern(Literal::from_text(text))
    }

    pub fn intern_num(&mut self, num: f64) -> LiteralIndex {
        self.intern(Literal::from_number(num))
    }

    pub fn find(&self, literal: &Literal<'a>) -> Option<LiteralIndex> {
        self.entries.get_index_of(literal).map(|i| LiteralIndex(i as u32))
    }

    pub fn get(&self, index: LiteralIndex) -> Option<&Literal<'a>> {
        self.entries.get_index(index.as_usize())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    pub fn iter(&self) -> impl Iterator<Item = (LiteralIndex, &Literal<'a>)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, lit)| (LiteralIndex(i as u32), lit))
    }

    pub fn entries(&self) -> Vec<PoolEntry> {
        debug!(
            entries = self.entries.len(),
            interned = self.stats.interned,
            hits = self.stats.hits,
            "building pool report"
        );
        self.iter()
            .map(|(index, lit)| PoolEntry {
                index,
                kind: lit.kind(),
                text: lit.to_string(),
            })
            .collect()
    }
}
