//! Atom handles and table tags.
//! 原子句柄与表标签。

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};

use crate::{AtomError, AtomTable, SharedAtomTable};

static NEXT_TABLE_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique tag identifying one atom table.
/// 标识一个原子表的进程内唯一标签。
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(NonZeroU32);

impl TableId {
    /// Allocate a fresh tag.
    ///
    /// # Panics
    ///
    /// Panics once `u32::MAX` tables have been created in this process.
    pub(crate) fn fresh() -> Self {
        let raw = NEXT_TABLE_ID
            .fetch_update(AtomicOrdering::Relaxed, AtomicOrdering::Relaxed, |id| {
                id.checked_add(1)
            })
            .unwrap_or_else(|_| panic!("exhausted atom table tags"));

        match NonZeroU32::new(raw) {
            Some(id) => TableId(id),
            None => unreachable!("table tags start at 1"),
        }
    }

    pub fn as_u32(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableId({})", self.0)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An interned label.
/// 驻留的标签。
///
/// Atoms are only created by `AtomTable` and `SharedAtomTable`. Equality,
/// ordering and hashing look at the index alone, so comparing two atoms is a
/// single integer comparison. The table tag is a non-owning back-reference
/// used to reject atoms handed to the wrong table.
///
/// Comparing atoms from two different tables is a caller bug and panics in
/// debug builds.
#[derive(Clone, Copy)]
pub struct Atom {
    table: TableId,
    index: u32,
}

impl Atom {
    pub(crate) fn new(table: TableId, index: u32) -> Self {
        Atom { table, index }
    }

    /// The identity of this atom within its table.
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn as_usize(self) -> usize {
        self.index as usize
    }

    /// The tag of the table that issued this atom.
    pub fn table(self) -> TableId {
        self.table
    }

    /// Look up the canonical label of this atom in `table`.
    /// 在 `table` 中查找此原子的规范标签。
    pub fn label(self, table: &AtomTable) -> Result<&str, AtomError> {
        table.resolve(self)
    }

    /// Look up the canonical label of this atom in a shared table.
    pub fn label_in(self, table: &SharedAtomTable) -> Result<Arc<str>, AtomError> {
        table.resolve(self)
    }

    #[inline]
    fn check_same_table(self, other: Atom) {
        debug_assert_eq!(
            self.table, other.table,
            "compared atoms from different tables"
        );
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.check_same_table(*other);
        self.index == other.index
    }
}

impl Eq for Atom {}

impl PartialOrd for Atom {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Atoms order by creation.
impl Ord for Atom {
    fn cmp(&self, other: &Self) -> Ordering {
        self.check_same_table(*other);
        self.index.cmp(&other.index)
    }
}

impl Hash for Atom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({})", self.index)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}
