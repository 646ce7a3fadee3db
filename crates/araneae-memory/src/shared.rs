//! Atom table for concurrent writers.
//! 支持并发写者的原子表。

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;
use tracing::{debug, trace};

use crate::table::next_index;
use crate::{Atom, AtomError, AtomTable, ConfigError, TableConfig, TableId};

/// A table mapping labels to unique atoms that any number of threads may
/// intern into at once.
/// 可由任意数量线程同时驻留的原子表。
///
/// The forward map is sharded. A label that is already present is found
/// under a shard read lock only. A new label takes its shard's write lock
/// through the entry API, so two threads racing on the same unseen label
/// are serialized and the loser observes the winner's atom. The identity is
/// assigned while that shard lock is held, under the `backward` write lock.
///
/// Locks are always taken shard first, then `backward`.
pub struct SharedAtomTable {
    table: TableId,
    forward: Forward,
    backward: RwLock<Vec<Arc<str>>>,
    shard_amount: Option<usize>,
}

impl SharedAtomTable {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let table = TableId::fresh();
        debug!(%table, capacity, "created shared atom table");

        SharedAtomTable {
            table,
            forward: new_forward(capacity, None),
            backward: RwLock::new(Vec::with_capacity(capacity)),
            shard_amount: None,
        }
    }

    pub fn from_config(config: &TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let table = TableId::fresh();
        let capacity = config.initial_capacity;
        debug!(%table, capacity, shards = ?config.shard_amount, "created shared atom table");

        Ok(SharedAtomTable {
            table,
            forward: new_forward(capacity, config.shard_amount),
            backward: RwLock::new(Vec::with_capacity(capacity)),
            shard_amount: config.shard_amount,
        })
    }

    /// Rebuild a table from labels already ordered by identity.
    pub(crate) fn from_parts(
        table: TableId,
        backward: Vec<Arc<str>>,
        shard_amount: Option<usize>,
    ) -> Self {
        let forward = new_forward(backward.len(), shard_amount);
        for (index, label) in backward.iter().enumerate() {
            forward.insert(Arc::clone(label), index as u32);
        }

        SharedAtomTable {
            table,
            forward,
            backward: RwLock::new(backward),
            shard_amount,
        }
    }

    /// The tag stamped into every atom this table issues.
    pub fn id(&self) -> TableId {
        self.table
    }

    /// Shard count requested from the configuration, if any.
    pub fn shard_amount(&self) -> Option<usize> {
        self.shard_amount
    }

    /// Intern a label and return its atom.
    /// 驻留一个标签并返回其原子。
    pub fn intern(&self, label: &str) -> Atom {
        // Bind the index so the shard read guard is released before `entry`.
        let existing = self.forward.get(label).map(|entry| *entry.value());
        if let Some(index) = existing {
            return Atom::new(self.table, index);
        }

        let index = match self.forward.entry(Arc::from(label)) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let mut backward = self.backward.write();
                let index = next_index(backward.len());
                backward.push(Arc::clone(entry.key()));
                drop(backward);

                trace!(table = %self.table, index, label, "interned atom");
                entry.insert(index);
                index
            }
        };

        Atom::new(self.table, index)
    }

    /// Get the label for an atom.
    /// 获取原子的标签。
    pub fn resolve(&self, atom: Atom) -> Result<Arc<str>, AtomError> {
        let backward = self.backward.read();
        if atom.table() == self.table {
            if let Some(label) = backward.get(atom.as_usize()) {
                return Ok(Arc::clone(label));
            }
        }

        Err(AtomError::out_of_range(atom, self.table, backward.len()))
    }

    /// Look a label up without interning it.
    pub fn get(&self, label: &str) -> Option<Atom> {
        self.forward
            .get(label)
            .map(|entry| Atom::new(self.table, *entry.value()))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.forward.contains_key(label)
    }

    /// Number of distinct atoms interned so far.
    pub fn size(&self) -> usize {
        self.backward.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Snapshot of every label, in identity order.
    pub fn labels(&self) -> Vec<Arc<str>> {
        self.backward.read().clone()
    }

    /// Freeze the table into single-writer form once concurrent loading is
    /// done. Atoms issued by this table stay valid in the result.
    /// 并发加载完成后将表冻结为单写者形式。
    pub fn into_table(self) -> AtomTable {
        let backward = self.backward.into_inner();
        debug!(table = %self.table, size = backward.len(), "freezing shared atom table");
        AtomTable::from_parts(self.table, backward, self.shard_amount)
    }
}

type Forward = DashMap<Arc<str>, u32, FxBuildHasher>;

fn new_forward(capacity: usize, shard_amount: Option<usize>) -> Forward {
    match shard_amount {
        Some(shards) => {
            DashMap::with_capacity_and_hasher_and_shard_amount(capacity, FxBuildHasher, shards)
        }
        None => DashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
    }
}

impl Default for SharedAtomTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharedAtomTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backward = self.backward.read();
        f.debug_struct("SharedAtomTable")
            .field("id", &self.table)
            .field("size", &backward.len())
            .field("atoms", &*backward)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_and_backward_agree_after_race() {
        let table = SharedAtomTable::new();
        std::thread::scope(|s| {
            for worker in 0..4 {
                let table = &table;
                s.spawn(move || {
                    for i in 0..200 {
                        table.intern(&format!("label-{}", (i + worker * 50) % 300));
                    }
                });
            }
        });

        let backward = table.backward.read();
        assert_eq!(table.forward.len(), backward.len());
        for (index, label) in backward.iter().enumerate() {
            assert_eq!(*table.forward.get(label).unwrap(), index as u32);
        }
    }

    #[test]
    fn test_from_config_rejects_bad_shard_amount() {
        let config = TableConfig {
            initial_capacity: 16,
            shard_amount: Some(6),
        };
        assert!(matches!(
            SharedAtomTable::from_config(&config),
            Err(ConfigError::InvalidShardAmount(6))
        ));
    }
}
