use std::iter::FromIterator;

use crate::stream::Cursor;

/// A cursor over a finite ordered sequence.
///
/// A source is built either from a plain `Vec<T>`, where every slot
/// holds an item, or from a `Vec<Option<T>>`, where `None` marks an
/// absent slot. Absent slots are skipped entirely: they are never
/// emitted and are distinct from the end-of-stream sentinel, which is
/// only reached once every slot has been visited.
///
/// # Example
///
/// ```rust
/// use pullstream::{Cursor, Source};
///
/// let mut cursor = Source::from_slots(vec![Some(1), None, Some(3)]);
/// assert_eq!(cursor.next(), Some(1));
/// assert_eq!(cursor.next(), Some(3));
/// assert_eq!(cursor.next(), None);
/// assert_eq!(cursor.next(), None);
/// ```
pub struct Source<T> {
    slots: Vec<Option<T>>,
    pos: usize,
}

impl<T> Source<T> {
    /// Creates a source that emits every element of `items` in order.
    pub fn new(items: Vec<T>) -> Source<T> {
        Source::from_slots(items.into_iter().map(Some).collect())
    }

    /// Creates a source over `slots`, skipping every `None` slot.
    pub fn from_slots(slots: Vec<Option<T>>) -> Source<T> {
        Source { slots, pos: 0 }
    }
}

impl<T> Cursor for Source<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while self.pos < self.slots.len() {
            let slot = self.slots[self.pos].take();
            self.pos += 1;
            if slot.is_some() {
                return slot;
            }
        }
        None
    }
}

impl<T> From<Vec<T>> for Source<T> {
    fn from(items: Vec<T>) -> Source<T> {
        Source::new(items)
    }
}

impl<T> FromIterator<T> for Source<T> {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Source<T> {
        Source::from_slots(items.into_iter().map(Some).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::stream::Cursor;

    use super::Source;

    #[test]
    fn drains_in_order() {
        let mut cursor = Source::new(vec![1, 5, 5]);
        assert_eq!(cursor.next(), Some(1));
        assert_eq!(cursor.next(), Some(5));
        assert_eq!(cursor.next(), Some(5));
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn skips_absent_slots() {
        let mut cursor =
            Source::from_slots(vec![None, Some('a'), None, None, Some('b'), None]);
        assert_eq!(cursor.next(), Some('a'));
        assert_eq!(cursor.next(), Some('b'));
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn empty_source_is_exhausted() {
        let mut cursor = Source::<u32>::new(vec![]);
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn absent_slots_are_not_the_sentinel() {
        // A source of options keeps "absent slot" and "end of stream"
        // apart: only the outer None signals exhaustion.
        let mut cursor = Source::new(vec![Some(1), None, Some(3)]);
        assert_eq!(cursor.next(), Some(Some(1)));
        assert_eq!(cursor.next(), Some(None));
        assert_eq!(cursor.next(), Some(Some(3)));
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn collects_from_iterators() {
        let cursor: Source<u32> = (1..=3).collect();
        assert_eq!(cursor.into_vec(), vec![1, 2, 3]);
    }
}
