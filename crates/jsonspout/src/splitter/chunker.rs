use bytes::{Bytes, BytesMut};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    rand::{MersenneTwister, RandSource},
    splitter::{MAX_CHUNK_SIZE, chunk_size, write_document},
};

/// Re-slices an endless run of serialized documents into randomly sized
/// chunks.
///
/// The splitter owns the stream's random sequence and a FIFO byte buffer.
/// Each call draws a chunk size, tops the buffer up with whole documents until
/// it holds at least that many bytes, then splits exactly that many bytes off
/// the front. Chunk edges fall wherever they fall: inside strings, numbers,
/// multi-byte UTF-8 sequences or separators.
///
/// Bytes are never reordered or rewritten; they only enter at the tail and
/// leave at the head.
///
/// The splitter never ends. As an [`Iterator`] it always returns `Some`, so
/// callers bound it themselves, with [`Iterator::take`] or by dropping it
/// when the connection closes.
///
/// # Example
/// ```
/// use jsonspout::ChunkSplitter;
///
/// let mut a = ChunkSplitter::from_seed(0);
/// let mut b = ChunkSplitter::from_seed(0);
/// for _ in 0..16 {
///     assert_eq!(a.next_chunk(), b.next_chunk());
/// }
/// ```
#[derive(Debug)]
pub struct ChunkSplitter<R = MersenneTwister>
where
    R: RandSource,
{
    rng: R,
    buffer: BytesMut,
    documents: u64,
    emitted: u64,
}

impl ChunkSplitter<MersenneTwister> {
    /// Creates a splitter over a freshly seeded [`MersenneTwister`].
    pub fn from_seed(seed: u64) -> Self {
        Self::new(MersenneTwister::from_seed(seed))
    }
}

impl<R> ChunkSplitter<R>
where
    R: RandSource,
{
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            buffer: BytesMut::with_capacity(MAX_CHUNK_SIZE * 2),
            documents: 0,
            emitted: 0,
        }
    }

    /// Draws a chunk size and returns that many bytes of the stream.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_chunk(&mut self) -> Bytes {
        let size = chunk_size(&mut self.rng);
        self.chunk_of(size)
    }

    /// Returns exactly `size` bytes from the head of the stream, generating
    /// documents first if the buffer holds fewer.
    ///
    /// `chunk_of(0)` returns an empty chunk and never generates.
    pub fn chunk_of(&mut self, size: usize) -> Bytes {
        while self.buffer.len() < size {
            write_document(&mut self.rng, &mut self.buffer);
            self.documents += 1;

            #[cfg(feature = "tracing")]
            tracing::trace!(
                documents = self.documents,
                buffered = self.buffer.len(),
                "appended document"
            );
        }
        self.emitted += size as u64;
        self.buffer.split_to(size).freeze()
    }

    /// Number of documents generated so far.
    pub const fn documents_generated(&self) -> u64 {
        self.documents
    }

    /// Number of bytes handed out so far.
    pub const fn bytes_emitted(&self) -> u64 {
        self.emitted
    }

    /// Number of bytes generated but not yet handed out.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the random sequence, consuming the splitter and dropping any
    /// buffered bytes.
    pub fn into_rng(self) -> R {
        self.rng
    }
}

impl<R> Iterator for ChunkSplitter<R>
where
    R: RandSource,
{
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_chunk())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
