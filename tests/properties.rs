//! Property tests for interning invariants.

use std::collections::HashSet;

use araneae_memory::{AtomTable, SharedAtomTable};
use proptest::prelude::*;

fn label_lists() -> impl Strategy<Value = Vec<String>> {
    // Small labels over ASCII (control characters included) plus a couple of
    // multi-byte characters, so generated lists repeat labels often.
    prop::collection::vec("[\\x00-\\x7f\u{e9}\u{fffd}]{0,3}", 0..64)
}

proptest! {
    /// Property: equal labels intern to the same atom
    #[test]
    fn prop_uniqueness(labels in label_lists()) {
        let mut table = AtomTable::new();
        let atoms: Vec<_> = labels.iter().map(|label| table.intern(label)).collect();

        for (label, atom) in labels.iter().zip(&atoms) {
            prop_assert_eq!(table.intern(label), *atom);
        }
    }

    /// Property: distinct labels intern to distinct atoms
    #[test]
    fn prop_distinctness(labels in label_lists()) {
        let mut table = AtomTable::new();
        for a in &labels {
            for b in &labels {
                let same_atom = table.intern(a) == table.intern(b);
                prop_assert_eq!(same_atom, a == b);
            }
        }
    }

    /// Property: resolve(intern(label)) == label
    #[test]
    fn prop_round_trip(labels in label_lists()) {
        let mut table = AtomTable::new();
        for label in &labels {
            let atom = table.intern(label);
            prop_assert_eq!(table.resolve(atom), Ok(label.as_str()));
        }
    }

    /// Property: size counts distinct labels and identities are dense
    #[test]
    fn prop_dense_identities(labels in label_lists()) {
        let table: AtomTable = labels.iter().collect();
        let distinct: HashSet<&String> = labels.iter().collect();

        prop_assert_eq!(table.size(), distinct.len());
        for (position, (atom, _)) in table.iter().enumerate() {
            prop_assert_eq!(atom.as_usize(), position);
        }
    }

    /// Property: both tables assign the same identities to the same sequence
    #[test]
    fn prop_tables_agree(labels in label_lists()) {
        let mut table = AtomTable::new();
        let shared = SharedAtomTable::new();

        for label in &labels {
            prop_assert_eq!(table.intern(label).index(), shared.intern(label).index());
        }
        prop_assert_eq!(table.size(), shared.size());
    }
}
