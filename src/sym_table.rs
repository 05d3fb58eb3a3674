//! SymTable: a string-keyed table over a singly linked chain of bindings.

use crate::binding::{Binding, Link};
use core::fmt;
use core::iter::FusedIterator;
use slotmap::{DefaultKey, SlotMap};

/// Symbol table mapping owned string keys to borrowed values.
///
/// Bindings are chained head-to-tail with the most recently inserted
/// binding at the head. Every lookup walks the chain, so all keyed
/// operations are O(n). The table owns a copy of each key; values are only
/// borrowed for `'v` and are never copied, dropped or mutated by the table.
pub struct SymTable<'v, V: ?Sized> {
    head: Option<Link>,
    bindings: SlotMap<DefaultKey, Binding<'v, V>>, // arena owning every binding in the chain
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InsertError {
    #[error("key is already bound in the table")]
    DuplicateKey,
}

impl<'v, V: ?Sized> SymTable<'v, V> {
    pub fn new() -> Self {
        Self {
            head: None,
            bindings: SlotMap::with_key(),
        }
    }

    /// Creates an empty table with room for `capacity` bindings before the
    /// arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            head: None,
            bindings: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Releases the table and every key it owns. `None` is a no-op.
    ///
    /// Dropping the table does the same; this exists for callers holding an
    /// optional table.
    pub fn free(table: Option<Self>) {
        drop(table);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Binds `key` to `value` unless `key` is already bound.
    ///
    /// Returns `true` when a new binding was created. On a duplicate the
    /// table is unchanged and the existing value stays bound.
    pub fn put(&mut self, key: &str, value: &'v V) -> bool {
        self.insert(key, value).is_ok()
    }

    /// Like [`put`](Self::put), reporting a duplicate as an error.
    pub fn insert(&mut self, key: &str, value: &'v V) -> Result<(), InsertError> {
        if self.contains(key) {
            return Err(InsertError::DuplicateKey);
        }
        // New bindings go in front of the current head.
        let binding = Binding::new(key, value, self.head);
        let k = self.bindings.insert(binding);
        self.head = Some(Link::new(k));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&'v V> {
        self.find(key).map(|link| self.binding(link).value())
    }

    /// Unbinds `key`. Returns `false` if it was not bound.
    pub fn remove(&mut self, key: &str) -> bool {
        self.take(key).is_some()
    }

    /// Unbinds `key` and hands back the value reference it held.
    pub fn take(&mut self, key: &str) -> Option<&'v V> {
        let mut prev: Option<Link> = None;
        let mut cursor = self.head;
        while let Some(link) = cursor {
            let (matched, next) = {
                let b = self.binding(link);
                (b.matches(key), b.next())
            };
            if !matched {
                prev = Some(link);
                cursor = next;
                continue;
            }

            // Splice the match out before releasing its slot.
            match prev {
                None => self.head = next,
                Some(p) => self.binding_mut(p).set_next(next),
            }
            let removed = self
                .bindings
                .remove(link.raw())
                .expect("linked binding is live");
            return Some(removed.value());
        }
        None
    }

    /// Calls `visitor` once per binding, head to tail, threading `extra`
    /// through every call.
    ///
    /// Traversal order is the reverse of insertion order. The visitor gets
    /// the value by shared reference; mutate its contents through interior
    /// mutability. The table itself stays borrowed for the whole walk.
    pub fn map<C, F>(&self, mut visitor: F, extra: &mut C)
    where
        C: ?Sized,
        F: FnMut(&str, &'v V, &mut C),
    {
        for (key, value) in self.iter() {
            visitor(key, value, &mut *extra);
        }
    }

    /// [`map`](Self::map) without a context argument.
    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&str, &'v V),
    {
        self.map(|k, v, _: &mut ()| visitor(k, v), &mut ());
    }

    /// Iterates `(key, value)` pairs head to tail.
    pub fn iter(&self) -> Iter<'_, 'v, V> {
        Iter {
            bindings: &self.bindings,
            cursor: self.head,
            remaining: self.bindings.len(),
        }
    }

    pub fn keys(&self) -> Keys<'_, 'v, V> {
        Keys { it: self.iter() }
    }

    /// Drops every binding; the table stays usable.
    pub fn clear(&mut self) {
        self.head = None;
        self.bindings.clear();
    }

    fn find(&self, key: &str) -> Option<Link> {
        let mut cursor = self.head;
        while let Some(link) = cursor {
            let b = self.binding(link);
            if b.matches(key) {
                return Some(link);
            }
            cursor = b.next();
        }
        None
    }

    // A dangling link means the chain is corrupt; indexing panics.
    fn binding(&self, link: Link) -> &Binding<'v, V> {
        &self.bindings[link.raw()]
    }

    fn binding_mut(&mut self, link: Link) -> &mut Binding<'v, V> {
        &mut self.bindings[link.raw()]
    }

    /// Walks the chain and asserts it covers the arena exactly once.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut seen = std::collections::HashSet::new();
        let mut cursor = self.head;
        while let Some(link) = cursor {
            assert!(seen.insert(link), "cycle in binding chain");
            assert!(seen.len() <= self.bindings.len(), "chain longer than arena");
            let b = self.binding(link);
            cursor = b.next();
        }
        assert_eq!(seen.len(), self.len(), "unreachable bindings in arena");
        assert_eq!(self.is_empty(), self.len() == 0);

        let keys: std::collections::HashSet<&str> = self.keys().collect();
        assert_eq!(keys.len(), self.len(), "duplicate key in chain");
    }
}

impl<'v, V: ?Sized> Default for SymTable<'v, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'v, V> fmt::Debug for SymTable<'v, V>
where
    V: ?Sized + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, 'v, V: ?Sized> IntoIterator for &'a SymTable<'v, V> {
    type Item = (&'a str, &'v V);
    type IntoIter = Iter<'a, 'v, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Head-to-tail iterator over the bindings of a `SymTable`.
pub struct Iter<'a, 'v, V: ?Sized> {
    bindings: &'a SlotMap<DefaultKey, Binding<'v, V>>,
    cursor: Option<Link>,
    remaining: usize,
}

impl<'a, 'v, V: ?Sized> Iterator for Iter<'a, 'v, V> {
    type Item = (&'a str, &'v V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let link = self.cursor?;
        let bindings: &'a SlotMap<DefaultKey, Binding<'v, V>> = self.bindings;
        let b = &bindings[link.raw()];
        self.cursor = b.next();
        self.remaining -= 1;
        Some((b.key(), b.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, 'v, V: ?Sized> ExactSizeIterator for Iter<'a, 'v, V> {}
impl<'a, 'v, V: ?Sized> FusedIterator for Iter<'a, 'v, V> {}

/// Head-to-tail iterator over the keys of a `SymTable`.
pub struct Keys<'a, 'v, V: ?Sized> {
    it: Iter<'a, 'v, V>,
}

impl<'a, 'v, V: ?Sized> Iterator for Keys<'a, 'v, V> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, 'v, V: ?Sized> ExactSizeIterator for Keys<'a, 'v, V> {}
impl<'a, 'v, V: ?Sized> FusedIterator for Keys<'a, 'v, V> {}
