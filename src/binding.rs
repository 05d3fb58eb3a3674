//! Binding: one key/value link in a `SymTable` chain.

use slotmap::DefaultKey;

/// Stable reference to a binding slot inside a table's arena. Links stay
/// valid until the binding they name is removed; the generation inside the
/// slot key keeps a stale link from resolving to a reused slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct Link(DefaultKey);

impl Link {
    pub(crate) fn new(k: DefaultKey) -> Self {
        Link(k)
    }
    pub(crate) fn raw(&self) -> DefaultKey {
        self.0
    }
}

/// A binding owns its key. A binding does not own its value.
#[derive(Debug)]
pub(crate) struct Binding<'v, V: ?Sized> {
    key: Box<str>,
    value: &'v V,
    next: Option<Link>,
}

impl<'v, V: ?Sized> Binding<'v, V> {
    /// Copies `key` into owned storage and links the binding in front of `next`.
    pub(crate) fn new(key: &str, value: &'v V, next: Option<Link>) -> Self {
        Self {
            key: Box::from(key),
            value,
            next,
        }
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn value(&self) -> &'v V {
        self.value
    }

    pub(crate) fn next(&self) -> Option<Link> {
        self.next
    }

    pub(crate) fn set_next(&mut self, next: Option<Link>) {
        self.next = next;
    }

    pub(crate) fn matches(&self, key: &str) -> bool {
        &*self.key == key
    }
}
