use std::cell::RefCell;
use std::rc::Rc;

use crate::stream::Cursor;

/// The shared append-only record of everything a memoized cursor has
/// produced, the end-of-stream sentinel included.
///
/// History only ever grows, one entry per pull of the wrapped cursor,
/// and only through `at`. Readers hold an `Rc` to the cell and an index
/// of their own; the `RefCell` enforces the single-writer discipline at
/// runtime.
struct History<S: Cursor> {
    source: S,
    entries: Vec<Option<S::Item>>,
}

impl<S: Cursor> History<S>
where
    S::Item: Clone,
{
    fn pull_next(&mut self) -> Option<S::Item> {
        let item = self.source.next();
        self.entries.push(item.clone());
        item
    }

    fn at(&mut self, index: usize) -> Option<S::Item> {
        use std::cmp::Ordering::*;

        match index.cmp(&self.entries.len()) {
            Less => self.entries[index].clone(),
            Equal => self.pull_next(),
            Greater => panic!(
                "replay index {} skips ahead of recorded history ({} entries)",
                index,
                self.entries.len()
            ),
        }
    }
}

/// A cursor that records every item it produces, so that any number of
/// [`Replay`] cursors can traverse the same history independently.
///
/// Created by [`Cursor::memoize`].
///
/// The memoized cursor and its replays are symmetric: all of them route
/// through the same recorded history, and whichever cursor first reads
/// past the recorded end pulls the wrapped cursor exactly once to
/// extend it. An item is pulled from the wrapped cursor once, ever, no
/// matter how many cursors read that position. The memoized cursor's
/// own `next` is itself a replay starting at position `0`.
pub struct Memoize<S: Cursor> {
    history: Rc<RefCell<History<S>>>,
    cursor: Replay<S>,
}

impl<S: Cursor> Memoize<S>
where
    S::Item: Clone,
{
    pub(crate) fn new(source: S) -> Memoize<S> {
        let history = Rc::new(RefCell::new(History { source, entries: vec![] }));
        let cursor = Replay { history: Rc::clone(&history), pos: 0 };
        Memoize { history, cursor }
    }

    /// Returns the item recorded at `index`, pulling the wrapped cursor
    /// once if `index` is the first unrecorded position.
    ///
    /// `None` entries are recorded too: an `index` at or past the
    /// wrapped cursor's exhaustion point yields `None`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is more than one position past the recorded
    /// history. History grows by exactly one entry per read of the
    /// frontier, so such an index can only come from a caller bug.
    pub fn at(&self, index: usize) -> Option<S::Item> {
        self.history.borrow_mut().at(index)
    }

    /// Creates an independent cursor over this history, starting at
    /// position `0`.
    ///
    /// Replays are not tied to the memoized cursor's position: a replay
    /// may lag behind it, re-observing recorded items without touching
    /// the wrapped cursor, or run ahead of it, growing the shared
    /// history that the memoized cursor will later re-observe.
    pub fn replay(&self) -> Replay<S> {
        Replay { history: Rc::clone(&self.history), pos: 0 }
    }
}

impl<S: Cursor> Cursor for Memoize<S>
where
    S::Item: Clone,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        self.cursor.next()
    }
}

/// An independent read position into a memoized cursor's history.
///
/// Created by [`Memoize::replay`]. A replay stays usable after the
/// [`Memoize`] that created it is dropped; the shared history (and the
/// wrapped cursor) live as long as any reader does.
pub struct Replay<S: Cursor> {
    history: Rc<RefCell<History<S>>>,
    pos: usize,
}

impl<S: Cursor> Cursor for Replay<S>
where
    S::Item: Clone,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        let item = self.history.borrow_mut().at(self.pos);
        self.pos += 1;
        item
    }
}
