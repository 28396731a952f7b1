use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::iter::FromIterator;
use std::rc::Rc;

use crate::stream::{Cursor, IntoCursor};

/// Permits merges to be heterogeneous with respect to cursor types.
pub type BoxedCursor<'f, T> = Box<dyn Cursor<Item = T> + 'f>;

type Comparator<'f, T> = Rc<dyn Fn(&T, &T) -> Ordering + 'f>;

/// A builder for collecting cursors to merge into one sorted cursor.
///
/// Every source must already emit its items in ascending order per the
/// comparator the merge is finally performed with; the merge interleaves
/// sorted streams, it does not re-sort misordered ones.
///
/// The merged cursor emits every item of every source exactly once, in
/// the global sorted order, with memory proportional to the number of
/// sources. Sources are identified by the order they were added,
/// starting at `0`; each pull draws a replacement item from whichever
/// source the emitted item came from, so no source is ever read more
/// than one item ahead.
///
/// # Example
///
/// ```rust
/// use pullstream::{Cursor, MergeBuilder, Source};
///
/// let merged = MergeBuilder::new()
///     .add(Source::new(vec![1, 5, 100]))
///     .add(Source::new(vec![0, 10, 20]))
///     .merge()
///     .into_vec();
/// assert_eq!(merged, vec![0, 1, 5, 10, 20, 100]);
/// ```
pub struct MergeBuilder<'f, T> {
    sources: Vec<BoxedCursor<'f, T>>,
}

impl<'f, T> MergeBuilder<'f, T> {
    /// Create a new merge builder with no sources.
    pub fn new() -> MergeBuilder<'f, T> {
        MergeBuilder { sources: vec![] }
    }

    /// Add a source to this merge.
    ///
    /// This is useful for a chaining style pattern, e.g.,
    /// `builder.add(a).add(b).merge()`.
    pub fn add<I>(mut self, source: I) -> Self
    where
        I: IntoCursor<Item = T>,
        I::Into: 'f,
    {
        self.push(source);
        self
    }

    /// Add a source to this merge.
    pub fn push<I>(&mut self, source: I)
    where
        I: IntoCursor<Item = T>,
        I::Into: 'f,
    {
        self.sources.push(Box::new(source.into_cursor()));
    }

    /// Merges all added sources in ascending `Ord` order.
    ///
    /// Every source must already be sorted ascending.
    pub fn merge(self) -> Merge<'f, T>
    where
        T: Ord + 'f,
    {
        self.merge_by(T::cmp)
    }

    /// Merges all added sources in ascending order per `cmp`.
    ///
    /// `cmp` must define a total order, and every source must already be
    /// sorted ascending by it.
    pub fn merge_by<C>(self, cmp: C) -> Merge<'f, T>
    where
        C: Fn(&T, &T) -> Ordering + 'f,
    {
        Merge { heap: SlotHeap::new(self.sources, Rc::new(cmp)) }
    }
}

impl<'f, T> Default for MergeBuilder<'f, T> {
    fn default() -> MergeBuilder<'f, T> {
        MergeBuilder::new()
    }
}

impl<'f, T, I> Extend<I> for MergeBuilder<'f, T>
where
    I: IntoCursor<Item = T>,
    I::Into: 'f,
{
    fn extend<It: IntoIterator<Item = I>>(&mut self, it: It) {
        for source in it {
            self.push(source);
        }
    }
}

impl<'f, T, I> FromIterator<I> for MergeBuilder<'f, T>
where
    I: IntoCursor<Item = T>,
    I::Into: 'f,
{
    fn from_iter<It: IntoIterator<Item = I>>(it: It) -> MergeBuilder<'f, T> {
        let mut builder = MergeBuilder::new();
        builder.extend(it);
        builder
    }
}

/// A cursor over the globally sorted interleaving of several sorted
/// sources.
///
/// Created by [`MergeBuilder`], [`Cursor::merge`] or
/// [`Cursor::merge_by`]. Items that compare equal across sources may
/// interleave in any order.
pub struct Merge<'f, T> {
    heap: SlotHeap<'f, T>,
}

impl<'f, T> Cursor for Merge<'f, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let slot = self.heap.pop()?;
        self.heap.refill(slot.idx);
        Some(slot.item)
    }
}

/// The merge invariant lives here: the heap holds exactly one slot per
/// not-yet-exhausted source, so popping the heap minimum yields the
/// global minimum across all source heads.
struct SlotHeap<'f, T> {
    rdrs: Vec<BoxedCursor<'f, T>>,
    heap: BinaryHeap<Slot<'f, T>>,
    cmp: Comparator<'f, T>,
}

impl<'f, T> SlotHeap<'f, T> {
    fn new(sources: Vec<BoxedCursor<'f, T>>, cmp: Comparator<'f, T>) -> SlotHeap<'f, T> {
        let mut u = SlotHeap { rdrs: sources, heap: BinaryHeap::new(), cmp };
        for i in 0..u.rdrs.len() {
            u.refill(i);
        }
        u
    }

    fn pop(&mut self) -> Option<Slot<'f, T>> {
        self.heap.pop()
    }

    fn refill(&mut self, idx: usize) {
        if let Some(item) = self.rdrs[idx].next() {
            self.heap.push(Slot { idx, item, cmp: Rc::clone(&self.cmp) });
        }
    }
}

struct Slot<'f, T> {
    idx: usize,
    item: T,
    cmp: Comparator<'f, T>,
}

impl<'f, T> PartialEq for Slot<'f, T> {
    fn eq(&self, other: &Slot<'f, T>) -> bool {
        (self.cmp)(&self.item, &other.item) == Ordering::Equal
    }
}

impl<'f, T> Eq for Slot<'f, T> {}

impl<'f, T> PartialOrd for Slot<'f, T> {
    fn partial_cmp(&self, other: &Slot<'f, T>) -> Option<Ordering> {
        Some(Ord::cmp(self, other))
    }
}

impl<'f, T> Ord for Slot<'f, T> {
    fn cmp(&self, other: &Slot<'f, T>) -> Ordering {
        // std's BinaryHeap pops its maximum; reversing here makes it
        // pop the minimum per the caller's ascending comparator.
        (self.cmp)(&self.item, &other.item).reverse()
    }
}

#[cfg(test)]
mod tests {
    use crate::source::Source;
    use crate::stream::Cursor;

    use super::MergeBuilder;

    fn sources(inputs: Vec<Vec<i32>>) -> Vec<Source<i32>> {
        inputs.into_iter().map(Source::new).collect()
    }

    #[test]
    fn merges_in_natural_ascending_order() {
        let op: MergeBuilder<i32> = sources(vec![
            vec![1, 5, 5, 100, 101],
            vec![0, 10, 20, 30, 40],
            vec![9, 10, 11],
        ])
        .into_iter()
        .collect();
        let merged = op.merge().into_vec();
        assert_eq!(
            merged,
            vec![0, 1, 5, 5, 9, 10, 10, 11, 20, 30, 40, 100, 101]
        );
    }

    #[test]
    fn caller_comparator_matches_natural_order() {
        let op: MergeBuilder<i32> = sources(vec![
            vec![1, 5, 5, 100, 101],
            vec![0, 10, 20, 30, 40],
            vec![9, 10, 11],
        ])
        .into_iter()
        .collect();
        let merged = op.merge_by(|lhs, rhs| lhs.cmp(rhs)).into_vec();
        assert_eq!(
            merged,
            vec![0, 1, 5, 5, 9, 10, 10, 11, 20, 30, 40, 100, 101]
        );
    }

    #[test]
    fn merges_descending_sources_with_a_descending_comparator() {
        let op: MergeBuilder<i32> =
            sources(vec![vec![9, 4, 1], vec![7, 7, 0]]).into_iter().collect();
        let merged = op.merge_by(|lhs, rhs| rhs.cmp(lhs)).into_vec();
        assert_eq!(merged, vec![9, 7, 7, 4, 1, 0]);
    }

    #[test]
    fn no_sources_is_immediately_exhausted() {
        let mut merged = MergeBuilder::<i32>::new().merge();
        assert_eq!(merged.next(), None);
        assert_eq!(merged.next(), None);
    }

    #[test]
    fn exhausted_sources_contribute_nothing() {
        let merged = MergeBuilder::new()
            .add(Source::new(vec![]))
            .add(Source::new(vec![2, 3]))
            .add(Source::new(vec![]))
            .merge()
            .into_vec();
        assert_eq!(merged, vec![2, 3]);
    }

    #[test]
    fn heterogeneous_sources_merge() {
        let evens = Source::new(vec![0, 1, 2, 3]).map(|n| n * 2);
        let odds = Source::new(vec![1, 3, 5]);
        let merged = MergeBuilder::new().add(evens).add(odds).merge().into_vec();
        assert_eq!(merged, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn fluent_merge_appends_self_last() {
        let merged = Source::new(vec![9, 10, 11])
            .merge(vec![
                Source::new(vec![1, 5, 5, 100, 101]),
                Source::new(vec![0, 10, 20, 30, 40]),
            ])
            .into_vec();
        assert_eq!(
            merged,
            vec![0, 1, 5, 5, 9, 10, 10, 11, 20, 30, 40, 100, 101]
        );
    }
}
