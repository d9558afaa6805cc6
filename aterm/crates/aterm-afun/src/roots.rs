//! Root Stack - Protected Symbol Management
//!
//! Roots are identities that must survive every collection, whether or not
//! the collector finds a reference to them. The stack is a multiset:
//! protecting an identity twice takes two unprotects to release it.
//!
//! # Removal Order
//!
//! [`RootStack::unprotect`] scans from the most recent entry towards the
//! oldest and swap-removes the first match. Callers that protect and
//! unprotect in LIFO order therefore pay O(1) per removal; other orders are
//! still correct but pay for the scan. [`RootStack::pop_last`] is the
//! dedicated LIFO path.

use crate::config::{ROOT_STACK_INCREMENT, ROOT_STACK_INITIAL};
use crate::symbol::SymbolId;

/// Stack of protected identities
#[derive(Debug, Clone)]
pub struct RootStack {
    roots: Vec<SymbolId>,
    increment: usize,
}

impl Default for RootStack {
    fn default() -> Self {
        Self::new(ROOT_STACK_INITIAL, ROOT_STACK_INCREMENT)
    }
}

impl RootStack {
    /// Create a stack with room for `initial` roots that grows by `increment`
    pub fn new(initial: usize, increment: usize) -> Self {
        Self {
            roots: Vec::with_capacity(initial),
            increment: increment.max(1),
        }
    }

    /// Add a root
    ///
    /// Grows the backing storage by the fixed increment when it is full.
    pub fn protect(&mut self, id: SymbolId) {
        if self.roots.len() == self.roots.capacity() {
            self.roots.reserve_exact(self.increment);
            log::trace!(
                "root stack grown to {} entries",
                self.roots.capacity()
            );
        }
        self.roots.push(id);
    }

    /// Remove the most recent occurrence of `id`
    ///
    /// Returns false, and leaves the stack unchanged, if `id` is not rooted.
    pub fn unprotect(&mut self, id: SymbolId) -> bool {
        match self.roots.iter().rposition(|&root| root == id) {
            Some(pos) => {
                self.roots.swap_remove(pos);
                true
            }
            None => {
                log::warn!("unprotect of {} which is not protected", id);
                false
            }
        }
    }

    /// Remove and return the most recently protected identity
    #[inline]
    pub fn pop_last(&mut self) -> Option<SymbolId> {
        self.roots.pop()
    }

    /// True if `id` occurs at least once
    pub fn contains(&self, id: SymbolId) -> bool {
        self.roots.contains(&id)
    }

    /// Number of occurrences of `id`
    pub fn count(&self, id: SymbolId) -> usize {
        self.roots.iter().filter(|&&root| root == id).count()
    }

    /// Total number of entries, duplicates included
    #[inline]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Allocated entries
    #[inline]
    pub fn capacity(&self) -> usize {
        self.roots.capacity()
    }

    /// Roots from oldest to most recent
    pub fn iter(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.roots.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u32) -> SymbolId {
        SymbolId::from_u32(raw)
    }

    #[test]
    fn test_protect_unprotect_is_symmetric() {
        let mut stack = RootStack::default();
        stack.protect(id(3));
        assert!(stack.contains(id(3)));

        assert!(stack.unprotect(id(3)));
        assert!(!stack.contains(id(3)));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_duplicates_need_matching_unprotects() {
        let mut stack = RootStack::default();
        stack.protect(id(3));
        stack.protect(id(3));
        assert_eq!(stack.count(id(3)), 2);

        stack.unprotect(id(3));
        assert!(stack.contains(id(3)));
        stack.unprotect(id(3));
        assert!(!stack.contains(id(3)));
    }

    #[test]
    fn test_unprotect_removes_most_recent_by_swap() {
        let mut stack = RootStack::default();
        for raw in [1, 2, 1, 4] {
            stack.protect(id(raw));
        }

        // The later `1` (position 2) goes; the last entry fills its place.
        assert!(stack.unprotect(id(1)));
        assert_eq!(stack.iter().collect::<Vec<_>>(), vec![id(1), id(2), id(4)]);
    }

    #[test]
    fn test_lifo_unprotect_touches_only_the_top() {
        let mut stack = RootStack::default();
        for raw in 0..5 {
            stack.protect(id(raw));
        }
        for raw in (0..5).rev() {
            assert!(stack.unprotect(id(raw)));
            assert_eq!(
                stack.iter().collect::<Vec<_>>(),
                (0..raw).map(id).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn test_unprotect_unknown_is_noop() {
        let mut stack = RootStack::default();
        stack.protect(id(1));
        assert!(!stack.unprotect(id(2)));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_pop_last() {
        let mut stack = RootStack::default();
        stack.protect(id(7));
        stack.protect(id(8));
        assert_eq!(stack.pop_last(), Some(id(8)));
        assert_eq!(stack.pop_last(), Some(id(7)));
        assert_eq!(stack.pop_last(), None);
    }

    #[test]
    fn test_grows_by_increment() {
        let mut stack = RootStack::new(2, 3);
        let initial = stack.capacity();
        for raw in 0..=initial as u32 {
            stack.protect(id(raw));
        }
        assert!(stack.capacity() >= initial + 3);
        assert_eq!(stack.len(), initial + 1);
    }
}
