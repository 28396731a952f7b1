use crate::stream::Cursor;

/// A cursor that applies a function to every upstream item.
///
/// Created by [`Cursor::map`].
pub struct Map<S, F> {
    source: S,
    map: F,
}

impl<S, F> Map<S, F> {
    pub(crate) fn new(source: S, map: F) -> Map<S, F> {
        Map { source, map }
    }
}

impl<S, B, F> Cursor for Map<S, F>
where
    S: Cursor,
    F: FnMut(S::Item) -> B,
{
    type Item = B;

    fn next(&mut self) -> Option<B> {
        self.source.next().map(&mut self.map)
    }
}

/// A cursor that admits only upstream items satisfying a predicate.
///
/// Created by [`Cursor::filter`].
pub struct Filter<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> Filter<S, P> {
    pub(crate) fn new(source: S, predicate: P) -> Filter<S, P> {
        Filter { source, predicate }
    }
}

impl<S, P> Cursor for Filter<S, P>
where
    S: Cursor,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        loop {
            let item = self.source.next()?;
            if (self.predicate)(&item) {
                return Some(item);
            }
        }
    }
}

/// A cursor truncated to a maximum number of items.
///
/// Created by [`Cursor::limit`].
pub struct Limit<S> {
    source: S,
    remaining: usize,
}

impl<S> Limit<S> {
    pub(crate) fn new(source: S, limit: usize) -> Limit<S> {
        Limit { source, remaining: limit }
    }
}

impl<S: Cursor> Cursor for Limit<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if self.remaining == 0 {
            return None;
        }
        match self.source.next() {
            Some(item) => {
                self.remaining -= 1;
                Some(item)
            }
            None => {
                // The upstream ran dry early; stop pulling it.
                self.remaining = 0;
                None
            }
        }
    }
}
