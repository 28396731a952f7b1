use std::cmp::Ordering;

use crate::aggregate::Aggregate;
use crate::error::Result;
use crate::group::Group;
use crate::memo::Memoize;
use crate::merge::{Merge, MergeBuilder};
use crate::transform::{Filter, Limit, Map};
use crate::window::{Accumulator, Combining, Incremental, Window};

/// Cursor describes a pull-based stream of items.
///
/// A cursor produces one item per call to `next`, or `None` once the
/// stream is exhausted. Every adapter in this crate both consumes and
/// implements this trait, so adapters can be layered fluently to any
/// depth. Pulling from the outermost adapter recursively pulls upstream
/// only as far as needed to produce one item; nothing is computed
/// eagerly and nothing is buffered beyond what an adapter's own
/// algorithm requires.
///
/// This is deliberately not `std::iter::Iterator`. The exhaustion
/// contract here is stricter than `Iterator`'s (see below), and the
/// adapter set is this crate's own; keeping the trait separate keeps
/// both under this crate's control.
///
/// # Exhaustion
///
/// Once `next` returns `None`, every subsequent call must also return
/// `None`. Exhaustion is final: a cursor never resurrects. Every adapter
/// in this crate preserves this invariant and relies on its upstream
/// cursors honoring it.
///
/// # Sharing
///
/// Each cursor is pulled by at most one logical consumer: adapters take
/// their upstream by value. The one sanctioned form of fan-out is
/// [`memoize`](#method.memoize), which records history so any number of
/// replay cursors can traverse it independently.
pub trait Cursor {
    /// The type of the item emitted by this cursor.
    type Item;

    /// Emits the next item, or `None` to indicate the stream has been
    /// exhausted. After `None` is emitted, every subsequent call also
    /// emits `None`.
    fn next(&mut self) -> Option<Self::Item>;

    /// Applies `map` to every item.
    ///
    /// The function is only ever called with real items, never with the
    /// end-of-stream sentinel.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pullstream::{Cursor, Source};
    ///
    /// let doubled = Source::new(vec![1, 2, 3]).map(|n| n * 2).into_vec();
    /// assert_eq!(doubled, vec![2, 4, 6]);
    /// ```
    fn map<B, F>(self, map: F) -> Map<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> B,
    {
        Map::new(self, map)
    }

    /// Admits only items satisfying `predicate`.
    ///
    /// A single pull may advance the upstream cursor several positions,
    /// discarding rejected items until one passes or the upstream
    /// exhausts.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        Filter::new(self, predicate)
    }

    /// Truncates this cursor to at most `limit` items.
    ///
    /// Once the limit is reached the upstream cursor is never pulled
    /// again.
    fn limit(self, limit: usize) -> Limit<Self>
    where
        Self: Sized,
    {
        Limit::new(self, limit)
    }

    /// Reduces contiguous runs of equal items into one combined value,
    /// judging equality with `==`.
    ///
    /// # Example
    ///
    /// Summing adjacent duplicates:
    ///
    /// ```rust
    /// use pullstream::{Cursor, Source};
    ///
    /// let mut summed = Source::new(vec![1, 5, 5, 2]).aggregate(|acc, n| acc + n);
    /// assert_eq!(summed.next(), Some(1));
    /// assert_eq!(summed.next(), Some(10));
    /// assert_eq!(summed.next(), Some(2));
    /// assert_eq!(summed.next(), None);
    /// ```
    fn aggregate<F>(
        self,
        reduce: F,
    ) -> Aggregate<Self, F, fn(&Self::Item, &Self::Item) -> bool>
    where
        Self: Sized,
        Self::Item: Clone + PartialEq,
        F: FnMut(Self::Item, Self::Item) -> Self::Item,
    {
        Aggregate::new(
            self,
            reduce,
            strict_equality::<Self::Item> as fn(&Self::Item, &Self::Item) -> bool,
        )
    }

    /// Reduces contiguous runs of items into one combined value, judging
    /// run membership with `is_equal`.
    ///
    /// `is_equal` receives the candidate item first and the run's first
    /// item (the seed) second. Run membership is always judged against
    /// the seed, not against the most recently admitted item.
    fn aggregate_by<F, E>(self, reduce: F, is_equal: E) -> Aggregate<Self, F, E>
    where
        Self: Sized,
        Self::Item: Clone,
        F: FnMut(Self::Item, Self::Item) -> Self::Item,
        E: FnMut(&Self::Item, &Self::Item) -> bool,
    {
        Aggregate::new(self, reduce, is_equal)
    }

    /// Batches maximal contiguous runs of equal items into `Vec`s,
    /// judging equality with `==`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pullstream::{Cursor, Source};
    ///
    /// let groups = Source::new(vec![5, 2, 2, 4, 4, 4]).group().into_vec();
    /// assert_eq!(groups, vec![vec![5], vec![2, 2], vec![4, 4, 4]]);
    /// ```
    fn group(self) -> Group<Self, fn(&Self::Item, &Self::Item) -> bool>
    where
        Self: Sized,
        Self::Item: PartialEq,
    {
        Group::new(
            self,
            strict_equality::<Self::Item> as fn(&Self::Item, &Self::Item) -> bool,
        )
    }

    /// Batches maximal contiguous runs into `Vec`s, judging run
    /// membership with `is_same_group`.
    ///
    /// `is_same_group` receives the run's first member and the candidate
    /// item, in that order. Membership is judged against the run's
    /// *first* member, never the most recently admitted one, so a
    /// predicate that is not transitive within a run can admit items
    /// that are unequal to their immediate predecessor.
    fn group_by<P>(self, is_same_group: P) -> Group<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item, &Self::Item) -> bool,
    {
        Group::new(self, is_same_group)
    }

    /// Emits one reduced value per input item, folded over a sliding
    /// window of the last `size` items (including the current one).
    ///
    /// Each pull folds the entire window through `reduce`, left to
    /// right, costing `O(size)` per item. For an `O(1)` alternative see
    /// [`window_with`](#method.window_with); both strategies emit
    /// identical values for equivalent reducers. Windows emit from the
    /// very first item: until the buffer fills, the fold covers whatever
    /// partial window exists.
    ///
    /// Returns an error if `size` is zero.
    ///
    /// # Example
    ///
    /// Moving sums over a window of two:
    ///
    /// ```rust
    /// use pullstream::{Cursor, Source};
    ///
    /// let sums = Source::new(vec![8, 9, 3, 5, 0, 7])
    ///     .window(2, |acc, n| acc + n)
    ///     .unwrap()
    ///     .into_vec();
    /// assert_eq!(sums, vec![8, 17, 12, 8, 5, 7]);
    /// ```
    fn window<F>(self, size: usize, reduce: F) -> Result<Window<Self, Combining<F>>>
    where
        Self: Sized,
        Self::Item: Clone,
        F: FnMut(Self::Item, Self::Item) -> Self::Item,
    {
        Window::new(self, size, Combining::new(reduce))
    }

    /// Emits one reduced value per input item over a sliding window of
    /// the last `size` items, maintained incrementally through an
    /// [`Accumulator`].
    ///
    /// The accumulator is told about every item entering and leaving the
    /// window, so each pull costs `O(1)` provided the accumulator's
    /// three operations do.
    ///
    /// Returns an error if `size` is zero.
    fn window_with<A>(self, size: usize, accumulator: A) -> Result<Window<Self, Incremental<A>>>
    where
        Self: Sized,
        A: Accumulator<Self::Item>,
    {
        Window::new(self, size, Incremental::new(accumulator))
    }

    /// Merges this cursor with `others`, all individually sorted
    /// ascending by `Ord`, into one globally sorted cursor.
    ///
    /// The sources keep their ordinal positions from `others`, with
    /// `self` appended last. For full control (or to merge without a
    /// fluent receiver) use [`MergeBuilder`].
    fn merge<'f, I>(self, others: I) -> Merge<'f, Self::Item>
    where
        Self: Sized + 'f,
        Self::Item: Ord + 'f,
        I: IntoIterator,
        I::Item: IntoCursor<Item = Self::Item>,
        <I::Item as IntoCursor>::Into: 'f,
    {
        let mut builder = MergeBuilder::new();
        builder.extend(others);
        builder.push(self);
        builder.merge()
    }

    /// Merges this cursor with `others`, all individually sorted
    /// ascending per `cmp`, into one globally sorted cursor.
    ///
    /// `cmp` must define a total order consistent with the order the
    /// sources are already sorted in; the merge never re-sorts
    /// misordered input.
    fn merge_by<'f, I, C>(self, others: I, cmp: C) -> Merge<'f, Self::Item>
    where
        Self: Sized + 'f,
        Self::Item: 'f,
        I: IntoIterator,
        I::Item: IntoCursor<Item = Self::Item>,
        <I::Item as IntoCursor>::Into: 'f,
        C: Fn(&Self::Item, &Self::Item) -> Ordering + 'f,
    {
        let mut builder = MergeBuilder::new();
        builder.extend(others);
        builder.push(self);
        builder.merge_by(cmp)
    }

    /// Records every item this cursor produces so that any number of
    /// [`Replay`](crate::Replay) cursors can traverse the same history
    /// independently, each at its own pace.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pullstream::{Cursor, Source};
    ///
    /// let mut primary = Source::new(vec![1, 2, 3]).memoize();
    /// assert_eq!(primary.next(), Some(1));
    /// assert_eq!(primary.next(), Some(2));
    ///
    /// let mut replay = primary.replay();
    /// assert_eq!(replay.next(), Some(1));
    /// assert_eq!(replay.next(), Some(2));
    /// // Reading ahead of the primary extends the shared history.
    /// assert_eq!(replay.next(), Some(3));
    /// assert_eq!(primary.next(), Some(3));
    /// ```
    fn memoize(self) -> Memoize<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        Memoize::new(self)
    }

    /// Drains this cursor into a `Vec`.
    fn into_vec(mut self) -> Vec<Self::Item>
    where
        Self: Sized,
    {
        let mut items = vec![];
        while let Some(item) = self.next() {
            items.push(item);
        }
        items
    }
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        (**self).next()
    }
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        (**self).next()
    }
}

/// IntoCursor describes types that can be converted to cursors.
///
/// This is analogous to the `IntoIterator` trait for `Iterator` in
/// `std::iter`. It exists so that operations over many sources, like
/// [`MergeBuilder`], can accept cursors and cursor constructors alike.
pub trait IntoCursor {
    /// The type of the item emitted by the cursor.
    type Item;
    /// The type of the cursor to be constructed.
    type Into: Cursor<Item = Self::Item>;

    /// Construct a cursor from `Self`.
    fn into_cursor(self) -> Self::Into;
}

impl<C: Cursor> IntoCursor for C {
    type Item = C::Item;
    type Into = C;

    fn into_cursor(self) -> C {
        self
    }
}

/// Adapts a closure into a cursor, for attaching this crate's adapters
/// to streams produced elsewhere.
///
/// The closure must honor the exhaustion contract: once it returns
/// `None`, it must keep returning `None`.
///
/// # Example
///
/// ```rust
/// use pullstream::{self, Cursor};
///
/// let mut count = 0;
/// let firsts = pullstream::from_fn(move || {
///     if count > 1 {
///         return None;
///     }
///     count += 1;
///     Some(count - 1)
/// });
/// assert_eq!(firsts.into_vec(), vec![0, 1]);
/// ```
pub fn from_fn<T, F>(pull: F) -> FromFn<F>
where
    F: FnMut() -> Option<T>,
{
    FromFn(pull)
}

/// A cursor that pulls its items from a closure.
///
/// Created by [`from_fn`].
pub struct FromFn<F>(F);

impl<T, F> Cursor for FromFn<F>
where
    F: FnMut() -> Option<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        (self.0)()
    }
}

fn strict_equality<T: PartialEq>(lhs: &T, rhs: &T) -> bool {
    lhs == rhs
}

#[cfg(test)]
mod tests {
    use crate::source::Source;
    use crate::stream::{from_fn, Cursor};

    #[test]
    fn from_fn_drains() {
        let mut count = 0;
        let mut cursor = from_fn(move || {
            if count > 1 {
                return None;
            }
            count += 1;
            Some(count - 1)
        });
        assert_eq!(cursor.next(), Some(0));
        assert_eq!(cursor.next(), Some(1));
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn boxed_cursors_are_cursors() {
        let mut cursor: Box<dyn Cursor<Item = u32>> =
            Box::new(Source::new(vec![7, 8]));
        assert_eq!(cursor.next(), Some(7));
        assert_eq!(cursor.next(), Some(8));
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn mut_refs_are_cursors() {
        let mut source = Source::new(vec![1, 2, 3]);
        let head = (&mut source).limit(2).into_vec();
        assert_eq!(head, vec![1, 2]);
        assert_eq!(source.next(), Some(3));
    }
}
