//! Position-independent identity for list items.
//!
//! Rows are keyed by what an item *is*, not where it currently sits, so a
//! search that reorders the sequence leaves surviving rows untouched.

use std::fmt::Debug;
use std::hash::Hash;

/// Extracts a stable key from an item.
///
/// Must be total and collision-free across distinct records of one
/// sequence. Keys must not depend on the item's index.
///
/// Closures implement this directly:
///
/// ```
/// use fdl_window::ItemIdentity;
///
/// let by_id = |font: &(String, u32)| font.0.clone();
/// assert_eq!(by_id.identity_of(&("inter".to_string(), 400)), "inter");
/// ```
pub trait ItemIdentity<T: ?Sized> {
    /// The key type. `Debug` is used when reporting collisions.
    type Key: Clone + Eq + Hash + Debug;

    fn identity_of(&self, item: &T) -> Self::Key;
}

impl<T, K, F> ItemIdentity<T> for F
where
    T: ?Sized,
    F: Fn(&T) -> K,
    K: Clone + Eq + Hash + Debug,
{
    type Key = K;

    fn identity_of(&self, item: &T) -> K {
        self(item)
    }
}

/// Identity for items that are their own key (ids, interned names).
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfKeyed;

impl<T> ItemIdentity<T> for SelfKeyed
where
    T: Clone + Eq + Hash + Debug,
{
    type Key = T;

    fn identity_of(&self, item: &T) -> T {
        item.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row {
        id: &'static str,
        rank: usize,
    }

    #[test]
    fn closure_identity_ignores_position() {
        let by_id = |row: &Row| row.id;
        let a = Row { id: "inter", rank: 0 };
        let b = Row { id: "inter", rank: 9 };
        assert_eq!(by_id.identity_of(&a), by_id.identity_of(&b));
        assert_ne!(a.rank, b.rank);
    }

    #[test]
    fn self_keyed() {
        assert_eq!(SelfKeyed.identity_of(&42u32), 42);
        assert_eq!(SelfKeyed.identity_of(&"roboto".to_string()), "roboto");
    }
}
