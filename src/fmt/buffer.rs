//! Growable argument storage shared by the call-style and fluent paths.

use super::Arg;

/// Covers the common case of a handful of arguments without regrowing.
pub const DEFAULT_CAPACITY: usize = 4;

/// Index-addressed argument sequence with an explicit growth policy.
///
/// Nothing is allocated until the first append. Owned by exactly one call or
/// chain; it is not meant to be shared.
#[derive(Debug, Clone, Default)]
pub struct ArgumentBuffer<'a> {
    slots: Vec<Arg<'a>>,
}

impl<'a> ArgumentBuffer<'a> {
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Adds one argument, doubling the backing store when it is full.
    pub fn append(&mut self, value: Arg<'a>) {
        let capacity = self.slots.capacity();
        if capacity == 0 {
            self.slots.reserve_exact(DEFAULT_CAPACITY);
        } else if self.slots.len() == capacity {
            self.slots.reserve_exact(capacity);
        }
        self.slots.push(value);
    }

    /// Adds a batch, growing to exactly fit it when doubling would not be enough.
    pub fn append_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = Arg<'a>>,
    {
        let values = values.into_iter();
        let (incoming, _) = values.size_hint();
        self.grow_for(incoming);
        for value in values {
            self.append(value);
        }
    }

    /// Pre-sizes the store for a template with `placeholders` markers.
    pub fn reserve_for(&mut self, placeholders: usize) {
        if placeholders > self.slots.capacity() {
            self.slots
                .reserve_exact(placeholders.saturating_sub(self.slots.len()));
        }
    }

    fn grow_for(&mut self, incoming: usize) {
        let len = self.slots.len();
        let capacity = self.slots.capacity();
        let needed = len + incoming;
        if needed <= capacity {
            return;
        }
        let target = if capacity == 0 {
            needed.max(DEFAULT_CAPACITY)
        } else {
            needed.max(capacity * 2)
        };
        self.slots.reserve_exact(target - len);
    }

    /// Logical length; trailing spare capacity is never visible.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arg<'a>> {
        self.slots.get(index)
    }

    /// The arguments the formatter iterates, bounded by the logical length.
    #[must_use]
    pub fn as_slice(&self) -> &[Arg<'a>] {
        &self.slots
    }
}

impl<'a> Extend<Arg<'a>> for ArgumentBuffer<'a> {
    fn extend<I: IntoIterator<Item = Arg<'a>>>(&mut self, iter: I) {
        self.append_all(iter);
    }
}

impl<'a> FromIterator<Arg<'a>> for ArgumentBuffer<'a> {
    fn from_iter<I: IntoIterator<Item = Arg<'a>>>(iter: I) -> Self {
        let mut buffer = Self::new();
        buffer.append_all(iter);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unallocated() {
        let buffer = ArgumentBuffer::new();
        assert_eq!(buffer.capacity(), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn first_append_allocates_default_capacity() {
        let mut buffer = ArgumentBuffer::new();
        buffer.append(Arg::from(1));
        assert!(buffer.capacity() >= DEFAULT_CAPACITY);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn single_append_doubles_when_full() {
        let mut buffer = ArgumentBuffer::new();
        for i in 0..DEFAULT_CAPACITY {
            buffer.append(Arg::from(i));
        }
        let before = buffer.capacity();
        buffer.append(Arg::from(99));
        assert!(buffer.capacity() >= before * 2);
        assert_eq!(buffer.len(), DEFAULT_CAPACITY + 1);
    }

    #[test]
    fn bulk_append_fits_large_batches() {
        let mut buffer = ArgumentBuffer::new();
        buffer.append(Arg::from(0));
        buffer.append_all((1..=20).map(Arg::from));
        assert_eq!(buffer.len(), 21);
        assert!(buffer.capacity() >= 21);
        assert_eq!(buffer.as_slice().len(), 21);
    }

    #[test]
    fn reserve_for_placeholders_keeps_len() {
        let mut buffer = ArgumentBuffer::new();
        buffer.reserve_for(6);
        assert!(buffer.capacity() >= 6);
        assert_eq!(buffer.len(), 0);
        assert!(buffer.as_slice().is_empty());
    }
}
