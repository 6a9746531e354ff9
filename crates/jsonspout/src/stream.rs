use core::{
    pin::Pin,
    task::{Context, Poll},
};

use bytes::Bytes;
use futures::Stream;

use crate::{rand::RandSource, splitter::ChunkSplitter};

/// A [`ChunkSplitter`] is an endless, always-ready stream of chunks.
///
/// Generation is synchronous and bounded by one chunk's worth of documents,
/// so `poll_next` never returns `Pending` and never returns `None`. Consumers
/// stop it by dropping it.
///
/// # Example
/// ```
/// use futures::{StreamExt, executor::block_on};
/// use jsonspout::ChunkSplitter;
///
/// // `take` exists on both `Iterator` and `StreamExt`.
/// let chunks: Vec<_> = block_on(StreamExt::take(ChunkSplitter::from_seed(0), 4).collect());
/// assert_eq!(chunks.len(), 4);
/// ```
impl<R> Stream for ChunkSplitter<R>
where
    R: RandSource + Unpin,
{
    type Item = Bytes;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(Some(self.get_mut().next_chunk()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
