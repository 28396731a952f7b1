use std::mem;

use crate::stream::Cursor;

/// The one-step lookahead held between pulls.
///
/// An aggregate must read one item past the end of a run to know the
/// run is over; that breaking item is parked here until the next pull.
enum Lookahead<T> {
    /// The upstream has never been pulled.
    Unprimed,
    /// The next run starts with this item.
    Item(T),
    /// The upstream is exhausted.
    Exhausted,
}

/// A cursor that reduces contiguous runs of equal items into one value.
///
/// Created by [`Cursor::aggregate`] and [`Cursor::aggregate_by`].
///
/// Each emitted value is the fold of one maximal run: the run's first
/// item seeds the accumulator and every further item judged equal to
/// that seed is folded in. The upstream is pulled lazily, starting with
/// the first pull of this cursor.
pub struct Aggregate<S: Cursor, F, E> {
    source: S,
    reduce: F,
    is_equal: E,
    lookahead: Lookahead<S::Item>,
}

impl<S: Cursor, F, E> Aggregate<S, F, E> {
    pub(crate) fn new(source: S, reduce: F, is_equal: E) -> Aggregate<S, F, E> {
        Aggregate { source, reduce, is_equal, lookahead: Lookahead::Unprimed }
    }
}

impl<S, F, E> Cursor for Aggregate<S, F, E>
where
    S: Cursor,
    S::Item: Clone,
    F: FnMut(S::Item, S::Item) -> S::Item,
    E: FnMut(&S::Item, &S::Item) -> bool,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if let Lookahead::Unprimed = self.lookahead {
            self.lookahead = match self.source.next() {
                Some(item) => Lookahead::Item(item),
                None => Lookahead::Exhausted,
            };
        }
        let seed = match mem::replace(&mut self.lookahead, Lookahead::Exhausted) {
            Lookahead::Item(item) => item,
            _ => return None,
        };
        let mut reduced = seed.clone();
        loop {
            match self.source.next() {
                Some(item) if (self.is_equal)(&item, &seed) => {
                    reduced = (self.reduce)(reduced, item);
                }
                Some(item) => {
                    self.lookahead = Lookahead::Item(item);
                    return Some(reduced);
                }
                None => return Some(reduced),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::source::Source;
    use crate::stream::Cursor;

    #[test]
    fn sums_adjacent_duplicates() {
        let mut cursor = Source::new(vec![1, 5, 5, 2]).aggregate(|acc, n| acc + n);
        assert_eq!(cursor.next(), Some(1));
        assert_eq!(cursor.next(), Some(10));
        assert_eq!(cursor.next(), Some(2));
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn custom_equality_drives_the_runs() {
        #[derive(Clone, Debug, PartialEq)]
        struct Point {
            x: u32,
        }

        let points: Vec<Point> =
            vec![1, 5, 5, 2].into_iter().map(|x| Point { x }).collect();
        let summed = Source::new(points)
            .aggregate_by(
                |acc, p| Point { x: acc.x + p.x },
                |lhs, rhs| lhs.x == rhs.x,
            )
            .into_vec();
        assert_eq!(
            summed,
            vec![Point { x: 1 }, Point { x: 10 }, Point { x: 2 }]
        );
    }

    #[test]
    fn runs_are_judged_against_their_seed() {
        // With candidate-vs-seed equality, a run of three 5s folds into
        // one 15 even though the accumulator stops matching after the
        // first fold.
        let folded = Source::new(vec![5, 5, 5, 9]).aggregate(|acc, n| acc + n).into_vec();
        assert_eq!(folded, vec![15, 9]);
    }

    #[test]
    fn empty_source_aggregates_to_nothing() {
        let mut cursor = Source::<u32>::new(vec![]).aggregate(|acc, n| acc + n);
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn single_run_emits_once() {
        let mut cursor = Source::new(vec![4, 4, 4]).aggregate(|acc, n| acc + n);
        assert_eq!(cursor.next(), Some(12));
        assert_eq!(cursor.next(), None);
    }
}
