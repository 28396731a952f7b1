/*!
Lazy, composable pull-based streams.

Everything here is built on one capability, [`Cursor`]: produce the next
item, or `None` once the stream is exhausted. Adapters wrap upstream
cursors and apply their transformation one pull at a time; nothing is
evaluated eagerly and a pull never advances an upstream cursor further
than producing one output item requires.

# Example

Group a sequence into runs, after collapsing adjacent duplicates:

```rust
use pullstream::{Cursor, Source};

let runs = Source::new(vec![1_i32, 5, 5, 2, 2, 3])
    .aggregate(|acc, n| acc + n)
    .group_by(|first, n| (n - first).abs() <= 1)
    .into_vec();
assert_eq!(runs, vec![vec![1], vec![10], vec![4, 3]]);
```

The stateful adapters are [`Aggregate`] (run-length reduce), [`Group`]
(run batching), [`Window`] (sliding-window reduction with two
interchangeable strategies), [`Merge`] (heap-based k-way sorted merge)
and [`Memoize`] (record-and-replay fan-out). All of them, and the plain
[`Map`]/[`Filter`]/[`Limit`] adapters, are reached fluently through the
methods on [`Cursor`].

This crate is strictly single threaded and synchronous: no I/O, no
background execution, no cancellation. A stream stops when its caller
stops pulling.
*/

pub use crate::aggregate::Aggregate;
pub use crate::error::{Error, Result};
pub use crate::group::Group;
pub use crate::memo::{Memoize, Replay};
pub use crate::merge::{BoxedCursor, Merge, MergeBuilder};
pub use crate::source::Source;
pub use crate::stream::{from_fn, Cursor, FromFn, IntoCursor};
pub use crate::transform::{Filter, Limit, Map};
pub use crate::window::{Accumulator, Combining, Incremental, Reducer, Window};

mod aggregate;
mod error;
mod group;
mod memo;
mod merge;
mod source;
mod stream;
mod transform;
mod window;
