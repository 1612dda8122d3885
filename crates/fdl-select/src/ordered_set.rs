#![forbid(unsafe_code)]

//! Sorted, duplicate-free, copy-on-write set.
//!
//! # Design
//!
//! [`OrderedSet<T, C>`] keeps its members in a sorted `Vec` behind an
//! `Arc`. Cloning is O(1) and shares storage; the first write through a
//! shared handle copies the vector (`Arc::make_mut`). Selection state is
//! therefore replaced rather than mutated under an observer: whoever holds
//! the previous set keeps seeing exactly the members it had.
//!
//! # Invariants
//!
//! 1. Members are sorted by the comparator and pairwise distinct under it.
//! 2. Iteration order depends only on the member set, never on insertion
//!    history.
//! 3. Snapshots ([`OrderedSet::to_vec`]) are independent of the set.
//!
//! # Performance
//!
//! | Operation      | Complexity                  |
//! |----------------|-----------------------------|
//! | `contains()`   | O(log n)                    |
//! | `insert()`     | O(n) (shift, plus copy if shared) |
//! | `remove()`     | O(n)                        |
//! | `clone()`      | O(1)                        |

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Total order over set members.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The member type's own [`Ord`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Adapts a closure into a [`Comparator`].
#[derive(Clone, Copy)]
pub struct CompareBy<F>(pub F);

impl<T: ?Sized, F> Comparator<T> for CompareBy<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}

impl<F> fmt::Debug for CompareBy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompareBy(..)")
    }
}

/// Sorted set with shared, copy-on-write storage.
#[derive(Clone)]
pub struct OrderedSet<T, C = Natural> {
    items: Arc<Vec<T>>,
    comparator: C,
}

impl<T, C: Default> Default for OrderedSet<T, C> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            comparator: C::default(),
        }
    }
}

impl<T: Clone + Ord> OrderedSet<T> {
    /// Empty set in natural order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T, C> OrderedSet<T, C>
where
    T: Clone,
    C: Comparator<T>,
{
    /// Empty set ordered by `comparator`.
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            items: Arc::new(Vec::new()),
            comparator,
        }
    }

    /// Build from arbitrary values; duplicates collapse to one member.
    pub fn from_values(values: impl IntoIterator<Item = T>, comparator: C) -> Self {
        let mut items: Vec<T> = values.into_iter().collect();
        items.sort_by(|a, b| comparator.compare(a, b));
        items.dedup_by(|a, b| comparator.compare(a, b) == Ordering::Equal);
        Self {
            items: Arc::new(items),
            comparator,
        }
    }

    fn search(&self, item: &T) -> Result<usize, usize> {
        self.items
            .binary_search_by(|probe| self.comparator.compare(probe, item))
    }

    /// Add a member. Returns `false` (and changes nothing) if present.
    #[doc(alias = "add")]
    pub fn insert(&mut self, item: T) -> bool {
        match self.search(&item) {
            Ok(_) => false,
            Err(pos) => {
                Arc::make_mut(&mut self.items).insert(pos, item);
                true
            }
        }
    }

    /// Drop a member. Returns `false` (and changes nothing) if absent.
    #[doc(alias = "delete")]
    pub fn remove(&mut self, item: &T) -> bool {
        match self.search(item) {
            Ok(pos) => {
                Arc::make_mut(&mut self.items).remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    #[doc(alias = "has")]
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.search(item).is_ok()
    }

    /// A new set with `item` added; `self` is untouched.
    #[must_use]
    pub fn with(&self, item: T) -> Self
    where
        C: Clone,
    {
        let mut next = self.clone();
        next.insert(item);
        next
    }

    /// A new set without `item`; `self` is untouched.
    #[must_use]
    pub fn without(&self, item: &T) -> Self
    where
        C: Clone,
    {
        let mut next = self.clone();
        next.remove(item);
        next
    }

    /// [`with`](Self::with) or [`without`](Self::without), as a checkbox would.
    #[must_use]
    pub fn toggled(&self, item: T, checked: bool) -> Self
    where
        C: Clone,
    {
        if checked {
            self.with(item)
        } else {
            self.without(&item)
        }
    }

    pub fn clear(&mut self) {
        self.items = Arc::new(Vec::new());
    }
}

impl<T, C> OrderedSet<T, C> {
    /// Independent sorted snapshot.
    #[doc(alias = "to_array")]
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.as_ref().clone()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[doc(alias = "size")]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Whether both handles still share one storage allocation.
    #[must_use]
    pub fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl<T: PartialEq, C> PartialEq for OrderedSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq, C> Eq for OrderedSet<T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for OrderedSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}

impl<T, C> FromIterator<T> for OrderedSet<T, C>
where
    T: Clone,
    C: Comparator<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter, C::default())
    }
}

impl<T, C> Extend<T> for OrderedSet<T, C>
where
    T: Clone,
    C: Comparator<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<'a, T, C> IntoIterator for &'a OrderedSet<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize, C> serde::Serialize for OrderedSet<T, C> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::Deserialize<'de> for OrderedSet<T, C>
where
    T: serde::Deserialize<'de> + Clone,
    C: Comparator<T> + Default,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Ok(Self::from_values(items, C::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_sorted_and_unique() {
        let mut set = OrderedSet::new();
        assert!(set.insert("700"));
        assert!(set.insert("400"));
        assert!(!set.insert("700"));
        assert_eq!(set.to_vec(), vec!["400", "700"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut set: OrderedSet<u32> = [3, 1, 2].into_iter().collect();
        assert!(!set.remove(&9));
        assert_eq!(set.to_vec(), vec![1, 2, 3]);
        assert!(set.remove(&2));
        assert!(!set.contains(&2));
        assert_eq!(set.to_vec(), vec![1, 3]);
    }

    #[test]
    fn from_values_dedups() {
        let set: OrderedSet<&str> = ["b", "a", "b", "c", "a"].into_iter().collect();
        assert_eq!(set.as_slice(), &["a", "b", "c"]);
    }

    #[test]
    fn snapshot_is_independent() {
        let set: OrderedSet<u8> = [1, 2].into_iter().collect();
        let mut snap = set.to_vec();
        snap.push(9);
        snap[0] = 42;
        assert_eq!(set.to_vec(), vec![1, 2]);
    }

    #[test]
    fn with_leaves_original_untouched() {
        let base: OrderedSet<u8> = [1, 3].into_iter().collect();
        let grown = base.with(2);
        assert_eq!(base.to_vec(), vec![1, 3]);
        assert_eq!(grown.to_vec(), vec![1, 2, 3]);
        assert!(!base.shares_storage(&grown));
    }

    #[test]
    fn noop_edits_keep_sharing_storage() {
        let base: OrderedSet<u8> = [1, 3].into_iter().collect();
        assert!(base.with(3).shares_storage(&base));
        assert!(base.without(&7).shares_storage(&base));
    }

    #[test]
    fn clone_then_write_copies() {
        let a: OrderedSet<u8> = [5].into_iter().collect();
        let mut b = a.clone();
        assert!(a.shares_storage(&b));
        b.insert(6);
        assert!(!a.shares_storage(&b));
        assert_eq!(a.to_vec(), vec![5]);
    }

    #[test]
    fn toggled_follows_checkbox() {
        let set: OrderedSet<&str> = OrderedSet::new();
        let on = set.toggled("italic", true);
        assert!(on.contains(&"italic"));
        let off = on.toggled("italic", false);
        assert!(off.is_empty());
    }

    #[test]
    fn custom_comparator() {
        let mut set = OrderedSet::with_comparator(CompareBy(|a: &i32, b: &i32| b.cmp(a)));
        set.extend([1, 5, 3, 5]);
        assert_eq!(set.to_vec(), vec![5, 3, 1]);
        assert!(set.contains(&3));
    }

    #[test]
    fn order_independent_of_history() {
        let mut a = OrderedSet::new();
        for x in ["normal", "italic", "oblique"] {
            a.insert(x);
        }
        let mut b = OrderedSet::new();
        for x in ["oblique", "normal", "italic", "normal"] {
            b.insert(x);
        }
        assert_eq!(a, b);
        assert_eq!(a.to_vec(), b.to_vec());
    }

    #[test]
    fn clear_empties() {
        let mut set: OrderedSet<u8> = [1, 2].into_iter().collect();
        let keep = set.clone();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(keep.len(), 2);
    }

    #[test]
    fn debug_renders_as_set() {
        let set: OrderedSet<u8> = [2, 1].into_iter().collect();
        assert_eq!(format!("{set:?}"), "{1, 2}");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_sorts_on_load() {
        let set: OrderedSet<String> = serde_json::from_str(r#"["b","a","b"]"#).unwrap();
        assert_eq!(set.to_vec(), vec!["a", "b"]);
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["a","b"]"#);
    }
}
