use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::stream::Cursor;

/// An incrementally maintained sliding-window reduction.
///
/// Implementors are told about every item entering and leaving the
/// window and must be able to produce the current reduced value at any
/// point. With `O(1)` implementations of all three operations, a
/// windowed reduction costs `O(1)` per emitted item regardless of the
/// window size.
///
/// # Example
///
/// A moving sum:
///
/// ```rust
/// use pullstream::{Accumulator, Cursor, Source};
///
/// #[derive(Default)]
/// struct Sum(i64);
///
/// impl Accumulator<i64> for Sum {
///     fn add(&mut self, item: &i64) {
///         self.0 += item;
///     }
///
///     fn remove(&mut self, item: &i64) {
///         self.0 -= item;
///     }
///
///     fn reduce(&self) -> i64 {
///         self.0
///     }
/// }
///
/// let sums = Source::new(vec![8, 9, 3])
///     .window_with(2, Sum::default())
///     .unwrap()
///     .into_vec();
/// assert_eq!(sums, vec![8, 17, 12]);
/// ```
pub trait Accumulator<T> {
    /// Folds `item` into the accumulated state. Called once when the
    /// item enters the window.
    fn add(&mut self, item: &T);

    /// Removes `item` from the accumulated state. Called once when the
    /// item leaves the window; items leave in the order they entered.
    fn remove(&mut self, item: &T);

    /// Produces the reduced value for the items currently in the
    /// window.
    fn reduce(&self) -> T;
}

/// The seam between a [`Window`] and its reduction strategy.
///
/// The two strategies, [`Combining`] and [`Incremental`], are chosen
/// statically at construction via [`Cursor::window`] and
/// [`Cursor::window_with`]; both see every item enter and leave the
/// buffer and both emit one value per input.
pub trait Reducer<T> {
    /// Notes that `item` entered the window.
    fn added(&mut self, item: &T);

    /// Notes that `item` left the window.
    fn evicted(&mut self, item: &T);

    /// Produces the reduced value for the current window. `buffer` is
    /// never empty.
    fn reduce(&mut self, buffer: &VecDeque<T>) -> T;
}

/// The whole-buffer fold strategy: a plain binary combining function
/// applied across the window, left to right, on every pull.
///
/// Costs `O(window size)` per emitted item.
pub struct Combining<F> {
    reduce: F,
}

impl<F> Combining<F> {
    pub(crate) fn new(reduce: F) -> Combining<F> {
        Combining { reduce }
    }
}

impl<T, F> Reducer<T> for Combining<F>
where
    T: Clone,
    F: FnMut(T, T) -> T,
{
    fn added(&mut self, _: &T) {}

    fn evicted(&mut self, _: &T) {}

    fn reduce(&mut self, buffer: &VecDeque<T>) -> T {
        let mut items = buffer.iter().cloned();
        // The window just admitted an item, so the buffer is non-empty.
        let seed = items.next().unwrap();
        items.fold(seed, &mut self.reduce)
    }
}

/// The incremental strategy: an [`Accumulator`] tracks the window state
/// as items enter and leave.
///
/// Costs `O(1)` per emitted item when the accumulator's operations are
/// `O(1)`.
pub struct Incremental<A> {
    accumulator: A,
}

impl<A> Incremental<A> {
    pub(crate) fn new(accumulator: A) -> Incremental<A> {
        Incremental { accumulator }
    }
}

impl<T, A> Reducer<T> for Incremental<A>
where
    A: Accumulator<T>,
{
    fn added(&mut self, item: &T) {
        self.accumulator.add(item);
    }

    fn evicted(&mut self, item: &T) {
        self.accumulator.remove(item);
    }

    fn reduce(&mut self, _: &VecDeque<T>) -> T {
        self.accumulator.reduce()
    }
}

/// A cursor that emits one reduced value per input item, over a sliding
/// window of the most recent items.
///
/// Created by [`Cursor::window`] and [`Cursor::window_with`].
///
/// The window covers the last `size` items including the current one.
/// Partial windows emit too: the first value is produced after exactly
/// one input. The oldest item is evicted as soon as the buffer reaches
/// `size`, after the current value has been reduced, so at most
/// `size - 1` items persist between pulls.
pub struct Window<S: Cursor, R> {
    source: S,
    size: usize,
    buffer: VecDeque<S::Item>,
    reducer: R,
}

impl<S: Cursor, R> Window<S, R> {
    pub(crate) fn new(source: S, size: usize, reducer: R) -> Result<Window<S, R>> {
        if size == 0 {
            return Err(Error::WindowSize(size));
        }
        Ok(Window { source, size, buffer: VecDeque::new(), reducer })
    }
}

impl<S, R> Cursor for Window<S, R>
where
    S: Cursor,
    R: Reducer<S::Item>,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        let item = self.source.next()?;
        self.reducer.added(&item);
        self.buffer.push_back(item);
        let reduced = self.reducer.reduce(&self.buffer);
        if self.buffer.len() >= self.size {
            // Non-empty: an item was pushed just above.
            let oldest = self.buffer.pop_front().unwrap();
            self.reducer.evicted(&oldest);
        }
        Some(reduced)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::source::Source;
    use crate::stream::Cursor;

    use super::Accumulator;

    #[derive(Default)]
    struct Sum(i64);

    impl Accumulator<i64> for Sum {
        fn add(&mut self, item: &i64) {
            self.0 += item;
        }

        fn remove(&mut self, item: &i64) {
            self.0 -= item;
        }

        fn reduce(&self) -> i64 {
            self.0
        }
    }

    #[test]
    fn combining_moving_sum() {
        let mut cursor = Source::new(vec![8, 9, 3, 5, 0, 7])
            .window(2, |acc, n| acc + n)
            .unwrap();
        assert_eq!(cursor.next(), Some(8));
        assert_eq!(cursor.next(), Some(17));
        assert_eq!(cursor.next(), Some(12));
        assert_eq!(cursor.next(), Some(8));
        assert_eq!(cursor.next(), Some(5));
        assert_eq!(cursor.next(), Some(7));
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn incremental_moving_sum_matches_combining() {
        let input = vec![8, 9, 3, 5, 0, 7];
        let combining = Source::new(input.clone())
            .window(2, |acc, n| acc + n)
            .unwrap()
            .into_vec();
        let incremental = Source::new(input)
            .window_with(2, Sum::default())
            .unwrap()
            .into_vec();
        assert_eq!(combining, vec![8, 17, 12, 8, 5, 7]);
        assert_eq!(incremental, combining);
    }

    #[test]
    fn partial_windows_emit() {
        let sums = Source::new(vec![1, 2, 3]).window(10, |acc, n| acc + n).unwrap().into_vec();
        assert_eq!(sums, vec![1, 3, 6]);
    }

    #[test]
    fn window_of_one_is_the_identity() {
        let out = Source::new(vec![4, 5, 6]).window(1, |acc, n| acc + n).unwrap().into_vec();
        assert_eq!(out, vec![4, 5, 6]);
    }

    #[test]
    fn zero_window_fails_at_construction() {
        let combining = Source::new(vec![1]).window(0, |acc: i32, n| acc + n);
        match combining {
            Err(err) => assert_eq!(err, Error::WindowSize(0)),
            Ok(_) => panic!("zero combining window accepted"),
        }

        let incremental = Source::new(vec![1]).window_with(0, Sum::default());
        match incremental {
            Err(err) => assert_eq!(err, Error::WindowSize(0)),
            Ok(_) => panic!("zero incremental window accepted"),
        }
    }

    #[test]
    fn fold_is_left_to_right() {
        let orders = Source::new(vec!["a", "b", "c"])
            .map(str::to_owned)
            .window(3, |acc, item| acc + &item)
            .unwrap()
            .into_vec();
        assert_eq!(orders, vec!["a", "ab", "abc"]);
    }
}
