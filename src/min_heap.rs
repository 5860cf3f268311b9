use crate::error::{HuffmanError, Result};

/// Strict ordering used by [`MinHeap`]: `a.precedes(b)` means `a` leaves the
/// queue before `b`.
pub trait Precedes {
    fn precedes(&self, other: &Self) -> bool;
}

/// Array-backed binary min-heap with a fixed upper bound on its length.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
    capacity: usize,
}

impl<T> MinHeap<T> {
    pub fn new(capacity: usize) -> Self {
        MinHeap {
            elements: Vec::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }

    pub fn peek(&self) -> Result<&T> {
        self.elements
            .first()
            .ok_or_else(|| HuffmanError::invalid_input("peek on an empty queue"))
    }
}

impl<T: Precedes> MinHeap<T> {
    pub fn insert(&mut self, value: T) -> Result<()> {
        if self.elements.len() >= self.capacity {
            return Err(HuffmanError::invalid_input(format!(
                "queue capacity {} exceeded",
                self.capacity
            )));
        }
        self.elements.push(value);
        self.sift_up(self.elements.len() - 1);
        Ok(())
    }

    pub fn extract_min(&mut self) -> Result<T> {
        if self.elements.is_empty() {
            return Err(HuffmanError::invalid_input("extract from an empty queue"));
        }
        let min = self.elements.swap_remove(0);
        self.sift_down(0);
        Ok(min)
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = Self::parent(i);
            if !self.elements[i].precedes(&self.elements[parent]) {
                break;
            }
            self.elements.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.elements.len();
        loop {
            let l = Self::left(i);
            if l >= n {
                break;
            }
            let r = Self::right(i);
            let smaller = if r < n && self.elements[r].precedes(&self.elements[l]) {
                r
            } else {
                l
            };
            // stop when the current node precedes or equals the smaller child
            if !self.elements[smaller].precedes(&self.elements[i]) {
                break;
            }
            self.elements.swap(i, smaller);
            i = smaller;
        }
    }

    /// No child precedes its parent.
    pub fn is_valid(&self) -> bool {
        (1..self.elements.len())
            .all(|i| !self.elements[i].precedes(&self.elements[Self::parent(i)]))
    }
}
