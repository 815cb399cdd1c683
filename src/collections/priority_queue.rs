//! Indexed priority queue with O(log n) arbitrary-item priority updates.
//!
//! A [`PriorityQueue`] is a binary heap of `(priority, item)` pairs plus a
//! side table mapping every item to its exact position in the heap array.
//! The table is what makes [`update_priority`](PriorityQueue::update_priority)
//! and [`remove`](PriorityQueue::remove) logarithmic instead of linear: the
//! position of any item can be found without scanning.
//!
//! Items must be unique. Callers that need duplicates can wrap items in a
//! tuple carrying a disambiguating tag.
//!
//! Every structural swap runs through a single helper that exchanges the two
//! heap cells and rewrites both index-table entries in the same step, keeping
//! the table exact at every point between public operations.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use thiserror::Error;

/// Errors raised by queue operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError<T: fmt::Debug> {
    /// `extract` or `peek` on a queue with no entries.
    #[error("queue is empty")]
    Empty,
    /// A priority lookup, update, or removal referenced an absent item.
    #[error("item {0:?} not present in queue")]
    NotFound(T),
    /// `insert` of an item the queue already holds.
    #[error("item {0:?} already present in queue")]
    Duplicate(T),
}

/// Ordering strategy for a queue, chosen at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// The smallest priority is extracted first.
    #[default]
    Min,
    /// The largest priority is extracted first.
    Max,
}

impl Order {
    /// Returns `true` when `a` should sit closer to the root than `b`.
    fn before<P: PartialOrd>(self, a: &P, b: &P) -> bool {
        match self {
            Order::Min => a < b,
            Order::Max => a > b,
        }
    }
}

#[derive(Clone)]
struct Entry<T, P> {
    item: T,
    priority: P,
}

/// A priority queue over unique items, supporting arbitrary-item updates.
pub struct PriorityQueue<T, P> {
    entries: Vec<Entry<T, P>>,
    index: HashMap<T, usize>,
    order: Order,
}

impl<T, P> PriorityQueue<T, P>
where
    T: Hash + Eq + Clone + fmt::Debug,
    P: PartialOrd,
{
    /// Creates an empty min-first queue.
    pub fn new() -> Self {
        Self::with_order(Order::Min)
    }

    /// Creates an empty queue with the given extraction order.
    pub fn with_order(order: Order) -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            order,
        }
    }

    /// Creates an empty queue with the given order, pre-allocating `capacity`
    /// slots.
    pub fn with_capacity(order: Order, capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            order,
        }
    }

    /// Returns the number of queued items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `item` is queued.
    pub fn contains(&self, item: &T) -> bool {
        self.index.contains_key(item)
    }

    /// Iterates over `(item, priority)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &P)> {
        self.entries.iter().map(|e| (&e.item, &e.priority))
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Adds `item` with `priority`.
    ///
    /// # Errors
    /// Returns [`QueueError::Duplicate`] if `item` is already queued; use
    /// [`update_priority`](Self::update_priority) to change its priority.
    pub fn insert(&mut self, item: T, priority: P) -> Result<(), QueueError<T>> {
        if self.index.contains_key(&item) {
            return Err(QueueError::Duplicate(item));
        }
        let node = self.entries.len();
        self.index.insert(item.clone(), node);
        self.entries.push(Entry { item, priority });
        self.sift_up(node);
        Ok(())
    }

    /// Removes and returns the front item and its priority.
    ///
    /// # Errors
    /// Returns [`QueueError::Empty`] if the queue holds no items.
    pub fn extract(&mut self) -> Result<(T, P), QueueError<T>> {
        let last = self.entries.len().checked_sub(1).ok_or(QueueError::Empty)?;
        self.swap_cells(0, last);
        let entry = self.entries.pop().ok_or(QueueError::Empty)?;
        self.index.remove(&entry.item);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Ok((entry.item, entry.priority))
    }

    /// Returns the front item and its priority without removing them.
    ///
    /// # Errors
    /// Returns [`QueueError::Empty`] if the queue holds no items.
    pub fn peek(&self) -> Result<(&T, &P), QueueError<T>> {
        self.entries
            .first()
            .map(|e| (&e.item, &e.priority))
            .ok_or(QueueError::Empty)
    }

    /// Returns the priority of `item`.
    ///
    /// # Errors
    /// Returns [`QueueError::NotFound`] if `item` is not queued.
    pub fn get_priority(&self, item: &T) -> Result<&P, QueueError<T>> {
        let node = self.position_of(item)?;
        Ok(&self.entries[node].priority)
    }

    /// Changes the priority of `item` to `priority`.
    ///
    /// The entry sifts toward the root when the new priority is more extreme
    /// under the configured order, and away from it otherwise.
    ///
    /// # Errors
    /// Returns [`QueueError::NotFound`] if `item` is not queued.
    pub fn update_priority(&mut self, item: &T, priority: P) -> Result<(), QueueError<T>> {
        let node = self.position_of(item)?;
        let toward_root = self.order.before(&priority, &self.entries[node].priority);
        self.entries[node].priority = priority;
        if toward_root {
            self.sift_up(node);
        } else {
            self.sift_down(node);
        }
        Ok(())
    }

    /// Removes `item` from the queue, returning it with its priority.
    ///
    /// The doomed entry is swapped with the last cell and popped; the
    /// displaced entry then sifts up or down depending on how it compares
    /// against its new parent. No sentinel priority is involved.
    ///
    /// # Errors
    /// Returns [`QueueError::NotFound`] if `item` is not queued.
    pub fn remove(&mut self, item: &T) -> Result<(T, P), QueueError<T>> {
        let node = self.position_of(item)?;
        let last = self.entries.len() - 1;
        self.swap_cells(node, last);
        let entry = self.entries.pop().ok_or(QueueError::Empty)?;
        self.index.remove(&entry.item);
        if node < self.entries.len() {
            self.resift(node);
        }
        Ok((entry.item, entry.priority))
    }

    fn position_of(&self, item: &T) -> Result<usize, QueueError<T>> {
        self.index
            .get(item)
            .copied()
            .ok_or_else(|| QueueError::NotFound(item.clone()))
    }

    // Re-establishes the heap order for a cell whose priority is unknown
    // relative to its surroundings.
    fn resift(&mut self, node: usize) {
        if node > 0 {
            let parent = (node - 1) / 2;
            if self
                .order
                .before(&self.entries[node].priority, &self.entries[parent].priority)
            {
                self.sift_up(node);
                return;
            }
        }
        self.sift_down(node);
    }

    // The crux of the indexed queue: cells and index table change together.
    fn swap_cells(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.entries.swap(a, b);
        self.index.insert(self.entries[a].item.clone(), a);
        self.index.insert(self.entries[b].item.clone(), b);
    }

    fn sift_up(&mut self, mut node: usize) {
        while node > 0 {
            let parent = (node - 1) / 2;
            if self
                .order
                .before(&self.entries[node].priority, &self.entries[parent].priority)
            {
                self.swap_cells(node, parent);
                node = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut node: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * node + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut winner = left;
            if right < len
                && self
                    .order
                    .before(&self.entries[right].priority, &self.entries[left].priority)
            {
                winner = right;
            }
            if self
                .order
                .before(&self.entries[winner].priority, &self.entries[node].priority)
            {
                self.swap_cells(node, winner);
                node = winner;
            } else {
                break;
            }
        }
    }
}

impl<T, P> Default for PriorityQueue<T, P>
where
    T: Hash + Eq + Clone + fmt::Debug,
    P: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> fmt::Debug for PriorityQueue<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.entries.len())
            .field("order", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Index table matches positions exactly and the heap order holds.
    fn assert_consistent<T, P>(queue: &PriorityQueue<T, P>)
    where
        T: Hash + Eq + Clone + fmt::Debug,
        P: PartialOrd,
    {
        assert_eq!(queue.index.len(), queue.entries.len());
        for (node, entry) in queue.entries.iter().enumerate() {
            assert_eq!(queue.index[&entry.item], node, "stale index for {:?}", entry.item);
        }
        for node in 1..queue.entries.len() {
            let parent = (node - 1) / 2;
            assert!(
                !queue.order.before(
                    &queue.entries[node].priority,
                    &queue.entries[parent].priority
                ),
                "heap order violated at {node}"
            );
        }
    }

    #[test]
    fn extracts_in_priority_order() {
        let mut queue = PriorityQueue::new();
        for (item, priority) in [("a", 5), ("b", 1), ("c", 9), ("d", 3), ("e", 7)] {
            queue.insert(item, priority).unwrap();
            assert_consistent(&queue);
        }

        let mut drained = Vec::new();
        while let Ok((item, _)) = queue.extract() {
            drained.push(item);
            assert_consistent(&queue);
        }
        assert_eq!(drained, vec!["b", "d", "a", "e", "c"]);
    }

    #[test]
    fn max_order_extracts_largest_first() {
        let mut queue = PriorityQueue::with_order(Order::Max);
        for (item, priority) in [("a", 5), ("b", 1), ("c", 9)] {
            queue.insert(item, priority).unwrap();
        }
        assert_eq!(queue.extract().unwrap(), ("c", 9));
        assert_eq!(queue.extract().unwrap(), ("a", 5));
        assert_eq!(queue.extract().unwrap(), ("b", 1));
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut queue = PriorityQueue::new();
        queue.insert("a", 1).unwrap();
        assert_eq!(queue.insert("a", 2), Err(QueueError::Duplicate("a")));
        // The original entry is untouched.
        assert_eq!(queue.get_priority(&"a"), Ok(&1));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn get_priority_reports_missing_items() {
        let mut queue = PriorityQueue::new();
        queue.insert("a", 1).unwrap();
        assert_eq!(queue.get_priority(&"z"), Err(QueueError::NotFound("z")));
    }

    #[test]
    fn update_priority_sifts_both_directions() {
        let mut queue = PriorityQueue::new();
        for (item, priority) in [("a", 10), ("b", 20), ("c", 30), ("d", 40), ("e", 50)] {
            queue.insert(item, priority).unwrap();
        }

        // More extreme: toward the root.
        queue.update_priority(&"e", 5).unwrap();
        assert_consistent(&queue);
        assert_eq!(queue.peek().unwrap(), (&"e", &5));

        // Less extreme: away from the root.
        queue.update_priority(&"e", 45).unwrap();
        assert_consistent(&queue);
        assert_eq!(queue.peek().unwrap(), (&"a", &10));

        assert_eq!(
            queue.update_priority(&"z", 1),
            Err(QueueError::NotFound("z"))
        );
    }

    #[test]
    fn remove_restores_prior_contents() {
        let mut queue = PriorityQueue::new();
        for (item, priority) in [("a", 4), ("b", 2), ("c", 6), ("d", 1)] {
            queue.insert(item, priority).unwrap();
        }
        let mut before: Vec<(&str, i32)> = queue.iter().map(|(i, p)| (*i, *p)).collect();
        before.sort_unstable();

        queue.insert("x", 3).unwrap();
        assert_eq!(queue.remove(&"x"), Ok(("x", 3)));
        assert_consistent(&queue);

        let mut after: Vec<(&str, i32)> = queue.iter().map(|(i, p)| (*i, *p)).collect();
        after.sort_unstable();
        assert_eq!(before, after);

        assert_eq!(queue.remove(&"x"), Err(QueueError::NotFound("x")));
    }

    #[test]
    fn remove_interior_item_resifts_displaced_entry() {
        let mut queue = PriorityQueue::new();
        for (item, priority) in [(0, 0), (1, 10), (2, 20), (3, 30), (4, 40), (5, 50), (6, 60)] {
            queue.insert(item, priority).unwrap();
        }
        queue.remove(&1).unwrap();
        assert_consistent(&queue);
        queue.remove(&6).unwrap();
        assert_consistent(&queue);

        let mut drained = Vec::new();
        while let Ok((item, _)) = queue.extract() {
            drained.push(item);
        }
        assert_eq!(drained, vec![0, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_queue_operations_fail() {
        let mut queue: PriorityQueue<&str, i32> = PriorityQueue::new();
        assert_eq!(queue.extract(), Err(QueueError::Empty));
        assert_eq!(queue.peek(), Err(QueueError::Empty));
        assert!(queue.is_empty());
    }

    #[test]
    fn contains_tracks_membership() {
        let mut queue = PriorityQueue::new();
        queue.insert("a", 1).unwrap();
        assert!(queue.contains(&"a"));
        queue.extract().unwrap();
        assert!(!queue.contains(&"a"));
    }
}
