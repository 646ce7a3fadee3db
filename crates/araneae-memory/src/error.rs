//! Error types for atom tables.
//! 原子表的错误类型。

use crate::{Atom, TableId};
use thiserror::Error;
use tracing::debug;

/// Errors raised when looking atoms up in a table.
#[derive(Debug, Clone, Error)]
pub enum AtomError {
    /// The atom was not issued by this table: it carries another table's tag,
    /// or its index is past the end of the table.
    #[error("atom {atom} is out of range for table {table} with {size} atoms")]
    OutOfRange {
        atom: Atom,
        table: TableId,
        size: usize,
    },
}

impl AtomError {
    pub(crate) fn out_of_range(atom: Atom, table: TableId, size: usize) -> Self {
        debug!(%atom, atom_table = %atom.table(), %table, size, "atom out of range");
        AtomError::OutOfRange { atom, table, size }
    }
}

/// Compares the atom's tag and index directly, so errors produced by
/// cross-table lookups can be compared without tripping the atom check.
impl PartialEq for AtomError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                AtomError::OutOfRange { atom, table, size },
                AtomError::OutOfRange {
                    atom: other_atom,
                    table: other_table,
                    size: other_size,
                },
            ) => {
                atom.table() == other_atom.table()
                    && atom.index() == other_atom.index()
                    && table == other_table
                    && size == other_size
            }
        }
    }
}

impl Eq for AtomError {}

/// Errors that can occur while loading a table configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid shard amount {0}: must be a power of two greater than 1")]
    InvalidShardAmount(usize),
}
