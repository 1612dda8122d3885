//! Property-based laws for `OrderedSet`.
//!
//! 1. Contents always equal the sorted, deduplicated input.
//! 2. `to_vec` is independent of insertion order.
//! 3. `with` / `without` never disturb the source set.
//! 4. `contains` agrees with a reference `BTreeSet`.

use std::collections::BTreeSet;

use fdl_select::OrderedSet;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(u16),
    Remove(u16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u16..64).prop_map(Op::Insert),
        (0u16..64).prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn matches_reference_set(ops in proptest::collection::vec(op(), 0..200)) {
        let mut set: OrderedSet<u16> = OrderedSet::new();
        let mut reference = BTreeSet::new();
        for op in ops {
            match op {
                Op::Insert(x) => prop_assert_eq!(set.insert(x), reference.insert(x)),
                Op::Remove(x) => prop_assert_eq!(set.remove(&x), reference.remove(&x)),
            }
        }
        let expected: Vec<u16> = reference.iter().copied().collect();
        prop_assert_eq!(set.to_vec(), expected);
        for x in 0u16..64 {
            prop_assert_eq!(set.contains(&x), reference.contains(&x));
        }
    }

    #[test]
    fn order_is_independent_of_history(values in proptest::collection::vec(0u16..500, 0..80)) {
        let forward: OrderedSet<u16> = values.iter().copied().collect();
        let backward: OrderedSet<u16> = values.iter().rev().copied().collect();
        prop_assert_eq!(forward.to_vec(), backward.to_vec());
        prop_assert!(forward.as_slice().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn persistent_edits_leave_source_alone(
        values in proptest::collection::vec(0u16..100, 0..40),
        x in 0u16..100,
    ) {
        let base: OrderedSet<u16> = values.into_iter().collect();
        let before = base.to_vec();

        let added = base.with(x);
        let removed = base.without(&x);

        prop_assert_eq!(base.to_vec(), before);
        prop_assert!(added.contains(&x));
        prop_assert!(!removed.contains(&x));
        prop_assert_eq!(added.len(), base.len() + usize::from(!base.contains(&x)));
    }
}
