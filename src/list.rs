//! Arena-backed doubly linked list
//!
//! Nodes live in a slot vector and link to each other by index. Slots freed by
//! removal are recycled by later appends. [`SequenceList::rotate_tail_to_head`]
//! only rewires links, so a list that is rotated every tick never allocates.

/// A single link in the chain
#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Ordered doubly linked sequence that owns its payloads
#[derive(Debug, Clone)]
pub struct SequenceList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> SequenceList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Create an empty list with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append `value` as the new tail
    pub fn push_back(&mut self, value: T) {
        let idx = self.alloc(Node {
            value,
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }

        self.tail = Some(idx);
        self.len += 1;
    }

    /// Payload at the first position
    pub fn head(&self) -> Option<&T> {
        self.head.and_then(|idx| self.node(idx)).map(|n| &n.value)
    }

    /// Payload at the last position
    pub fn tail(&self) -> Option<&T> {
        self.tail.and_then(|idx| self.node(idx)).map(|n| &n.value)
    }

    pub fn head_mut(&mut self) -> Option<&mut T> {
        let idx = self.head?;
        self.node_mut(idx).map(|n| &mut n.value)
    }

    pub fn tail_mut(&mut self) -> Option<&mut T> {
        let idx = self.tail?;
        self.node_mut(idx).map(|n| &mut n.value)
    }

    /// Payload at `index`, counting from the head
    pub fn get(&self, index: usize) -> Option<&T> {
        let idx = self.slot_of(index)?;
        self.node(idx).map(|n| &n.value)
    }

    /// Remove the node at `index` and hand its payload back to the caller
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        let idx = self.slot_of(index)?;
        self.release(idx)
    }

    /// Move the tail node to the front of the list.
    ///
    /// The node itself is reused: no payload is moved or copied and the length
    /// is unchanged. Lists with fewer than two nodes are left as they are.
    pub fn rotate_tail_to_head(&mut self) {
        if self.len <= 1 {
            return;
        }

        let (Some(head), Some(tail)) = (self.head, self.tail) else {
            return;
        };
        let Some(new_tail) = self.node(tail).and_then(|n| n.prev) else {
            return;
        };

        if let Some(node) = self.node_mut(new_tail) {
            node.next = None;
        }
        self.tail = Some(new_tail);

        if let Some(node) = self.node_mut(tail) {
            node.prev = None;
            node.next = Some(head);
        }
        if let Some(node) = self.node_mut(head) {
            node.prev = Some(tail);
        }
        self.head = Some(tail);
    }

    /// Drop every node
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterate payloads from head to tail
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn node(&self, idx: usize) -> Option<&Node<T>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<T>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Slot index of the node at list position `index`
    fn slot_of(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }

        let mut cursor = self.head;
        for _ in 0..index {
            cursor = self.node(cursor?)?.next;
        }
        cursor
    }

    /// Unlink the node in slot `idx`, free the slot and return the payload
    fn release(&mut self, idx: usize) -> Option<T> {
        let node = self.slots.get_mut(idx)?.take()?;
        self.free.push(idx);

        match node.prev {
            Some(prev) => {
                if let Some(p) = self.node_mut(prev) {
                    p.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => {
                if let Some(n) = self.node_mut(next) {
                    n.prev = node.prev;
                }
            }
            None => self.tail = node.prev,
        }

        self.len -= 1;
        Some(node.value)
    }
}

impl<T: PartialEq> SequenceList<T> {
    /// Remove the first node whose payload equals `value`
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.node(idx)?;
            if node.value == *value {
                return self.release(idx);
            }
            cursor = node.next;
        }
        None
    }
}

impl<T: Clone> SequenceList<T> {
    /// Append a copy of every payload in `other`, keeping its order
    pub fn extend_from(&mut self, other: &SequenceList<T>) {
        for value in other {
            self.push_back(value.clone());
        }
    }
}

impl<T> Default for SequenceList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for SequenceList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push_back(value);
        }
        list
    }
}

impl<'a, T> IntoIterator for &'a SequenceList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Head-to-tail iterator over a [`SequenceList`]
pub struct Iter<'a, T> {
    list: &'a SequenceList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
