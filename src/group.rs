use std::mem;

use crate::stream::Cursor;

/// A cursor that batches maximal contiguous runs into `Vec`s.
///
/// Created by [`Cursor::group`] and [`Cursor::group_by`].
///
/// Unlike [`Aggregate`](crate::Aggregate), which collapses a run into
/// one value, this emits the run itself, in order. Membership in the
/// current run is judged against the run's first member.
pub struct Group<S: Cursor, P> {
    source: S,
    is_same_group: P,
    group: Vec<S::Item>,
}

impl<S: Cursor, P> Group<S, P> {
    pub(crate) fn new(source: S, is_same_group: P) -> Group<S, P> {
        Group { source, is_same_group, group: vec![] }
    }
}

impl<S, P> Cursor for Group<S, P>
where
    S: Cursor,
    P: FnMut(&S::Item, &S::Item) -> bool,
{
    type Item = Vec<S::Item>;

    fn next(&mut self) -> Option<Vec<S::Item>> {
        loop {
            let item = match self.source.next() {
                Some(item) => item,
                None => {
                    if self.group.is_empty() {
                        return None;
                    }
                    return Some(mem::take(&mut self.group));
                }
            };
            if self.group.is_empty() {
                self.group.push(item);
            } else if (self.is_same_group)(&self.group[0], &item) {
                self.group.push(item);
            } else {
                return Some(mem::replace(&mut self.group, vec![item]));
            }
        }
    }
}
