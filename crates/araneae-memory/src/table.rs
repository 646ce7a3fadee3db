//! Single-writer atom table.
//! 单写者原子表。

use std::fmt;
use std::iter::Enumerate;
use std::slice;
use std::sync::Arc;

use rustc_hash::{FxBuildHasher, FxHashMap};
use tracing::{debug, trace};

use crate::{Atom, AtomError, SharedAtomTable, TableConfig, TableId};

/// Identity for the entry about to be appended to a table of length `len`.
///
/// # Panics
///
/// Panics when the `u32` identity space is exhausted. Callers invoke this
/// before touching either map, so the table is left intact.
pub(crate) fn next_index(len: usize) -> u32 {
    match u32::try_from(len) {
        Ok(index) => index,
        Err(_) => panic!("atom table exhausted its identity space ({len} atoms)"),
    }
}

/// A table mapping labels to unique atoms, written by one owner at a time.
/// 将标签映射到唯一原子的表，同一时间只有一个所有者写入。
///
/// Identities are handed out densely from 0 in the order labels are first
/// seen and are never reused. Any number of readers may share `&AtomTable`
/// across threads; `intern` needs `&mut self`, so no reader can observe a
/// write in progress. Use `SharedAtomTable` when several threads must intern.
pub struct AtomTable {
    table: TableId,
    forward: FxHashMap<Arc<str>, u32>,
    backward: Vec<Arc<str>>,
    // Carried over to `SharedAtomTable` by `into_shared`.
    shard_amount: Option<usize>,
}

impl AtomTable {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let table = TableId::fresh();
        debug!(%table, capacity, "created atom table");

        AtomTable {
            table,
            forward: FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            backward: Vec::with_capacity(capacity),
            shard_amount: None,
        }
    }

    /// Build a table sized by `config`.
    ///
    /// An invalid shard amount is dropped here rather than failing, since
    /// this table has no shards; it only matters after `into_shared`.
    pub fn from_config(config: &TableConfig) -> Self {
        let mut table = Self::with_capacity(config.initial_capacity);
        match config.validate() {
            Ok(()) => table.shard_amount = config.shard_amount,
            Err(e) => debug!(table = %table.table, error = %e, "ignoring shard amount"),
        }
        table
    }

    /// Rebuild a table from labels already ordered by identity.
    pub(crate) fn from_parts(
        table: TableId,
        backward: Vec<Arc<str>>,
        shard_amount: Option<usize>,
    ) -> Self {
        let mut forward = FxHashMap::with_capacity_and_hasher(backward.len(), FxBuildHasher);
        for (index, label) in backward.iter().enumerate() {
            forward.insert(Arc::clone(label), index as u32);
        }
        debug_assert_eq!(forward.len(), backward.len());

        AtomTable {
            table,
            forward,
            backward,
            shard_amount,
        }
    }

    /// The tag stamped into every atom this table issues.
    pub fn id(&self) -> TableId {
        self.table
    }

    /// Shard count the table will use once shared.
    pub fn shard_amount(&self) -> Option<usize> {
        self.shard_amount
    }

    /// Intern a label and return its atom.
    /// 驻留一个标签并返回其原子。
    ///
    /// Returns the existing atom when the label has been seen before,
    /// otherwise assigns the next identity. Labels are compared byte for
    /// byte; the empty string is a label like any other.
    pub fn intern(&mut self, label: &str) -> Atom {
        if let Some(&index) = self.forward.get(label) {
            return Atom::new(self.table, index);
        }

        let index = next_index(self.backward.len());
        let label: Arc<str> = Arc::from(label);
        trace!(table = %self.table, index, %label, "interned atom");
        self.backward.push(Arc::clone(&label));
        self.forward.insert(label, index);

        Atom::new(self.table, index)
    }

    /// Get the label for an atom.
    /// 获取原子的标签。
    pub fn resolve(&self, atom: Atom) -> Result<&str, AtomError> {
        if atom.table() == self.table {
            if let Some(label) = self.backward.get(atom.as_usize()) {
                return Ok(&**label);
            }
        }

        Err(AtomError::out_of_range(atom, self.table, self.size()))
    }

    /// The atom with identity `index`, if this table has issued it.
    pub fn atom_at(&self, index: u32) -> Result<Atom, AtomError> {
        let atom = Atom::new(self.table, index);
        if atom.as_usize() < self.size() {
            Ok(atom)
        } else {
            Err(AtomError::out_of_range(atom, self.table, self.size()))
        }
    }

    /// Look a label up without interning it.
    pub fn get(&self, label: &str) -> Option<Atom> {
        self.forward
            .get(label)
            .map(|&index| Atom::new(self.table, index))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.forward.contains_key(label)
    }

    /// Number of distinct atoms interned so far.
    pub fn size(&self) -> usize {
        self.backward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backward.is_empty()
    }

    /// Iterate over all atoms in identity order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            table: self.table,
            inner: self.backward.iter().enumerate(),
        }
    }

    /// Hand the table over to concurrent writers.
    /// 将表交给并发写者。
    ///
    /// The table tag is kept, so atoms issued before the conversion resolve
    /// in the shared table.
    pub fn into_shared(self) -> SharedAtomTable {
        debug!(table = %self.table, size = self.size(), "sharing atom table");
        SharedAtomTable::from_parts(self.table, self.backward, self.shard_amount)
    }
}

impl Default for AtomTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AtomTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomTable")
            .field("id", &self.table)
            .field("size", &self.size())
            .field("atoms", &DebugEntries(self))
            .finish()
    }
}

struct DebugEntries<'a>(&'a AtomTable);

impl fmt::Debug for DebugEntries<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(atom, label)| (atom.index(), label)))
            .finish()
    }
}

impl<S: AsRef<str>> Extend<S> for AtomTable {
    fn extend<I: IntoIterator<Item = S>>(&mut self, labels: I) {
        for label in labels {
            self.intern(label.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for AtomTable {
    fn from_iter<I: IntoIterator<Item = S>>(labels: I) -> Self {
        let mut table = AtomTable::new();
        table.extend(labels);
        table
    }
}

impl<'a> IntoIterator for &'a AtomTable {
    type Item = (Atom, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the atoms of an `AtomTable`, in identity order.
pub struct Iter<'a> {
    table: TableId,
    inner: Enumerate<slice::Iter<'a, Arc<str>>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (Atom, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(index, label)| (Atom::new(self.table, index as u32), &**label))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}
