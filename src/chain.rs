//! ChainedList: singly-linked sequence whose nodes live in a slot arena.
//!
//! Links are arena keys rather than pointers, so unlinking a node can never
//! leave a dangling `next` or `tail` behind: a removed key simply stops
//! resolving. The list never looks inside its payloads.

use core::fmt;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Node<T> {
    payload: T,
    next: Option<DefaultKey>,
}

/// Singly-linked list with O(1) append and O(index) positional access.
pub struct ChainedList<T> {
    nodes: SlotMap<DefaultKey, Node<T>>, // arena; one slot per linked node
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<T> ChainedList<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn front(&self) -> Option<&T> {
        self.head.map(|k| &self.nodes[k].payload)
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.map(|k| &self.nodes[k].payload)
    }

    /// Append `payload` after the current tail.
    pub fn push_back(&mut self, payload: T) {
        let k = self.nodes.insert(Node {
            payload,
            next: None,
        });
        match self.tail {
            Some(t) => self.nodes[t].next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
    }

    /// Payload at `index` (head-first), or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.key_at(index).map(|k| &self.nodes[k].payload)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let k = self.key_at(index)?;
        self.nodes.get_mut(k).map(|n| &mut n.payload)
    }

    /// Insert `payload` before the node currently at `index`.
    ///
    /// `index == len()` appends. An index past the end leaves the list
    /// untouched and hands the payload back.
    pub fn insert_at(&mut self, index: usize, payload: T) -> Result<(), T> {
        let len = self.len();
        if index > len {
            return Err(payload);
        }
        if index == len {
            self.push_back(payload);
            return Ok(());
        }

        // index < len: there is a successor, so the tail never moves here.
        let prev = match index {
            0 => None,
            i => self.key_at(i - 1),
        };
        let next = match prev {
            Some(p) => self.nodes[p].next,
            None => self.head,
        };
        let k = self.nodes.insert(Node { payload, next });
        match prev {
            Some(p) => self.nodes[p].next = Some(k),
            None => self.head = Some(k),
        }
        Ok(())
    }

    /// Unlink the node at `index` and return its payload.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        let (prev, cur) = self.locate(|pos, _| pos == index)?;
        Some(self.unlink(prev, cur))
    }

    /// Unlink the first payload matching `pred`, in a single forward pass.
    pub fn remove_first<F>(&mut self, mut pred: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let (prev, cur) = self.locate(|_, p| pred(p))?;
        Some(self.unlink(prev, cur))
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let h = self.head?;
        Some(self.unlink(None, h))
    }

    pub fn position<F>(&self, mut pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().position(|p| pred(p))
    }

    pub fn find<F>(&self, mut pred: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|p| pred(p))
    }

    pub fn find_mut<F>(&mut self, mut pred: F) -> Option<&mut T>
    where
        F: FnMut(&T) -> bool,
    {
        let (_, k) = self.locate(|_, p| pred(p))?;
        self.nodes.get_mut(k).map(|n| &mut n.payload)
    }

    /// Visit every payload mutably, head-first.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T),
    {
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = &mut self.nodes[k];
            f(&mut node.payload);
            cur = node.next;
        }
    }

    /// Drop every node and reset to the empty state.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            cur: self.head,
            remaining: self.len(),
        }
    }

    /// Remove payloads head-first. Whatever is not consumed is dropped
    /// together with the iterator.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { list: self }
    }

    fn key_at(&self, index: usize) -> Option<DefaultKey> {
        if index >= self.len() {
            return None;
        }
        self.keys().nth(index)
    }

    fn keys(&self) -> impl Iterator<Item = DefaultKey> + '_ {
        let mut cur = self.head;
        core::iter::from_fn(move || {
            let k = cur?;
            cur = self.nodes[k].next;
            Some(k)
        })
    }

    // Walk from head keeping the predecessor; returns (prev, matching node).
    fn locate<F>(&self, mut pred: F) -> Option<(Option<DefaultKey>, DefaultKey)>
    where
        F: FnMut(usize, &T) -> bool,
    {
        let mut prev = None;
        let mut cur = self.head;
        let mut pos = 0;
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if pred(pos, &node.payload) {
                return Some((prev, k));
            }
            prev = Some(k);
            cur = node.next;
            pos += 1;
        }
        None
    }

    fn unlink(&mut self, prev: Option<DefaultKey>, cur: DefaultKey) -> T {
        let node = self
            .nodes
            .remove(cur)
            .expect("located node must be live in the arena");
        match prev {
            Some(p) => self.nodes[p].next = node.next,
            None => self.head = node.next,
        }
        if self.tail == Some(cur) {
            self.tail = prev;
        }
        node.payload
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.head.is_none(), self.len() == 0, "head/len mismatch");
        assert_eq!(self.tail.is_none(), self.len() == 0, "tail/len mismatch");
        let mut last = None;
        let mut walked = 0;
        for k in self.keys() {
            walked += 1;
            assert!(walked <= self.len(), "chain longer than len (cycle?)");
            last = Some(k);
        }
        assert_eq!(walked, self.len(), "chain shorter than len");
        assert_eq!(last, self.tail, "tail is not the last reachable node");
    }
}

impl<T> Default for ChainedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ChainedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for ChainedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for p in iter {
            self.push_back(p);
        }
    }
}

impl<T> FromIterator<T> for ChainedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a ChainedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Head-first iterator over payloads.
pub struct Iter<'a, T> {
    nodes: &'a SlotMap<DefaultKey, Node<T>>,
    cur: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.nodes[self.cur?];
        self.cur = node.next;
        self.remaining -= 1;
        Some(&node.payload)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Draining iterator returned by [`ChainedList::drain`].
pub struct Drain<'a, T> {
    list: &'a mut ChainedList<T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;
    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        self.list.clear();
    }
}
