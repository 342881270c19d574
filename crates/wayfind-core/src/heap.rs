//! A comparator-ordered binary heap.

use std::cmp::Ordering;
use std::fmt;

/// Binary heap ordered by an injected comparator.
///
/// The element for which `compare` returns [`Ordering::Greater`] against its
/// siblings is extracted first, so the comparator direction selects the heap's
/// behavior: `a.cmp(b)` extracts the largest element first, `b.cmp(a)` the
/// smallest. Both search engines use the latter to pop the cheapest frontier
/// node.
///
/// Unlike `std::collections::BinaryHeap`, an already-enqueued element's
/// priority can be changed in place with [`update`](Self::update), which the
/// searches use when a better route to an open node is found.
pub struct BinaryHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    data: Vec<T>,
    compare: F,
}

impl<T, F> BinaryHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Create an empty heap using `compare` for ordering.
    pub fn new(compare: F) -> Self {
        Self {
            data: Vec::new(),
            compare,
        }
    }

    /// Create an empty heap with room for `capacity` elements.
    pub fn with_capacity(capacity: usize, compare: F) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            compare,
        }
    }

    /// Number of elements currently enqueued.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the heap holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The element that would be dequeued next, if any.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// The backing storage in heap order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Drop all elements, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Insert `item`, sifting it up to its position. O(log n).
    pub fn enqueue(&mut self, item: T) {
        self.data.push(item);
        self.sift_up(self.data.len() - 1);
    }

    /// Remove and return the highest-priority element. O(log n).
    ///
    /// A heap of zero or one elements returns without any reordering work.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.data.len() < 2 {
            return self.data.pop();
        }
        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let result = self.data.pop();
        self.sift_down(0);
        result
    }

    /// Replace an enqueued element with `new` and restore heap order.
    ///
    /// `old` is located by equality (O(n)); the replacement then sifts up
    /// (O(log n)). Only priority *improvements* are supported: `new` must not
    /// compare lower than `old`, or heap order below the slot is not
    /// restored. Returns `false` when `old` is not present.
    pub fn update(&mut self, old: &T, new: T) -> bool
    where
        T: PartialEq,
    {
        let Some(idx) = self.data.iter().position(|item| item == old) else {
            return false;
        };
        self.data[idx] = new;
        self.sift_up(idx);
        true
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) >> 1;
            if (self.compare)(&self.data[idx], &self.data[parent]) == Ordering::Greater {
                self.data.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        loop {
            let mut child = (idx << 1) + 1;
            if child >= self.data.len() {
                break;
            }
            // Of two children, the strictly greater one wins.
            if child + 1 < self.data.len()
                && (self.compare)(&self.data[child], &self.data[child + 1]) == Ordering::Less
            {
                child += 1;
            }
            if (self.compare)(&self.data[idx], &self.data[child]) == Ordering::Less {
                self.data.swap(idx, child);
                idx = child;
            } else {
                break;
            }
        }
    }
}

impl<T, F> fmt::Debug for BinaryHeap<T, F>
where
    T: fmt::Debug,
    F: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    fn max_first(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    fn min_first(a: &i32, b: &i32) -> Ordering {
        b.cmp(a)
    }

    #[test]
    fn empty_dequeue_is_none() {
        let mut heap = BinaryHeap::new(max_first);
        assert!(heap.is_empty());
        assert_eq!(heap.dequeue(), None);
    }

    #[test]
    fn single_element_round_trip() {
        let mut heap = BinaryHeap::new(max_first);
        heap.enqueue(7);
        assert_eq!(heap.peek(), Some(&7));
        assert_eq!(heap.dequeue(), Some(7));
        assert_eq!(heap.dequeue(), None);
    }

    #[test]
    fn max_first_extraction_order() {
        let mut heap = BinaryHeap::new(max_first);
        for v in [3, 1, 4, 1, 5, 9, 2, 6] {
            heap.enqueue(v);
        }
        let mut out = Vec::new();
        while let Some(v) = heap.dequeue() {
            out.push(v);
        }
        assert_eq!(out, vec![9, 6, 5, 4, 3, 2, 1, 1]);
    }

    #[test]
    fn min_first_extraction_order() {
        let mut heap = BinaryHeap::new(min_first);
        for v in [3, 1, 4, 1, 5, 9, 2, 6] {
            heap.enqueue(v);
        }
        let mut out = Vec::new();
        while let Some(v) = heap.dequeue() {
            out.push(v);
        }
        assert_eq!(out, vec![1, 1, 2, 3, 4, 5, 6, 9]);
    }

    #[test]
    fn randomized_sequences_dequeue_sorted() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..50 {
            let len = rng.random_range(0..64);
            let values: Vec<i32> = (0..len).map(|_| rng.random_range(-100..100)).collect();

            let mut heap = BinaryHeap::with_capacity(values.len(), min_first);
            for &v in &values {
                heap.enqueue(v);
            }

            let mut expected = values.clone();
            expected.sort_unstable();
            let mut out = Vec::new();
            while let Some(v) = heap.dequeue() {
                out.push(v);
            }
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn update_raises_priority() {
        #[derive(Debug, PartialEq)]
        struct Entry {
            id: u32,
            cost: i32,
        }
        // Min-first by cost.
        let mut heap = BinaryHeap::new(|a: &Entry, b: &Entry| b.cost.cmp(&a.cost));
        heap.enqueue(Entry { id: 0, cost: 10 });
        heap.enqueue(Entry { id: 1, cost: 20 });
        heap.enqueue(Entry { id: 2, cost: 30 });

        // Improve id 2 so it beats everything.
        let moved = heap.update(&Entry { id: 2, cost: 30 }, Entry { id: 2, cost: 1 });
        assert!(moved);
        assert_eq!(heap.dequeue(), Some(Entry { id: 2, cost: 1 }));
        assert_eq!(heap.dequeue(), Some(Entry { id: 0, cost: 10 }));
        assert_eq!(heap.dequeue(), Some(Entry { id: 1, cost: 20 }));
    }

    #[test]
    fn update_missing_element_reports_false() {
        let mut heap = BinaryHeap::new(min_first);
        heap.enqueue(5);
        assert!(!heap.update(&17, 1));
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.dequeue(), Some(5));
    }

    #[test]
    fn clear_empties_heap() {
        let mut heap = BinaryHeap::new(max_first);
        for v in 0..10 {
            heap.enqueue(v);
        }
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.dequeue(), None);
    }
}
