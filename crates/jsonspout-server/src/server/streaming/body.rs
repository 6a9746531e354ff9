use crate::server::telemetry::{
    decrement_streams_inflight, increment_documents_generated, increment_streams_inflight,
    increment_streams_opened, record_chunk_sent, record_stream_duration,
};
use bytes::Bytes;
use core::{
    convert::Infallible,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use futures::{Stream, StreamExt};
use jsonspout::ChunkSplitter;
use pin_project_lite::pin_project;
use std::time::Instant;
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

#[cfg(feature = "tracing")]
type StreamSpan = tracing::Span;
#[cfg(not(feature = "tracing"))]
type StreamSpan = ();

pin_project! {
    /// The body of one streaming response.
    ///
    /// Owns a freshly seeded [`ChunkSplitter`] and yields its chunks until
    /// either the server shuts down or the transport drops the body (client
    /// gone, write failed). Nothing is shared with other responses, so every
    /// connection replays the same bytes.
    ///
    /// The splitter is always ready, so backpressure comes entirely from the
    /// transport: a chunk is generated only when the body is polled.
    ///
    /// Polling and the final per-stream totals run inside a `stream` span
    /// carrying the stream id and seed.
    #[must_use = "streams do nothing unless polled"]
    pub struct ResponseStream {
        chunks: ChunkSplitter,
        #[pin]
        shutdown: WaitForCancellationFutureOwned,
        finished: bool,
        skip_empty_chunks: bool,
        chunks_sent: u64,
        started: Instant,
        span: StreamSpan,
    }

    impl PinnedDrop for ResponseStream {
        fn drop(this: Pin<&mut Self>) {
            let this = this.project();
            #[cfg(feature = "tracing")]
            let _entered = this.span.enter();
            let elapsed = this.started.elapsed();

            decrement_streams_inflight();
            increment_documents_generated(this.chunks.documents_generated());
            record_stream_duration(elapsed.as_secs_f64() * 1_000.0);

            #[cfg(feature = "tracing")]
            let reason = if *this.finished { "shutdown" } else { "disconnected" };
            #[cfg(feature = "tracing")]
            tracing::debug!(
                chunks = *this.chunks_sent,
                bytes = this.chunks.bytes_emitted(),
                documents = this.chunks.documents_generated(),
                elapsed_ms = elapsed.as_millis() as u64,
                reason,
                "stream closed"
            );
        }
    }
}

impl ResponseStream {
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn new(
        seed: u64,
        skip_empty_chunks: bool,
        shutdown: &CancellationToken,
        stream_id: u64,
    ) -> Self {
        increment_streams_opened();
        increment_streams_inflight();

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("stream", stream_id, seed);
        #[cfg(feature = "tracing")]
        span.in_scope(|| tracing::debug!("stream opened"));
        #[cfg(not(feature = "tracing"))]
        let span = ();

        Self {
            chunks: ChunkSplitter::from_seed(seed),
            shutdown: shutdown.clone().cancelled_owned(),
            finished: false,
            skip_empty_chunks,
            chunks_sent: 0,
            started: Instant::now(),
            span,
        }
    }
}

impl Stream for ResponseStream {
    type Item = Result<Bytes, Infallible>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        #[cfg(feature = "tracing")]
        let _entered = this.span.enter();
        if *this.finished {
            return Poll::Ready(None);
        }
        if this.shutdown.as_mut().poll(cx).is_ready() {
            *this.finished = true;
            return Poll::Ready(None);
        }

        loop {
            let chunk = match this.chunks.poll_next_unpin(cx) {
                Poll::Ready(Some(chunk)) => chunk,
                Poll::Ready(None) => {
                    *this.finished = true;
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            };
            if chunk.is_empty() && *this.skip_empty_chunks {
                continue;
            }

            *this.chunks_sent += 1;
            record_chunk_sent(chunk.len());
            return Poll::Ready(Some(Ok(chunk)));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            (0, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(skip_empty_chunks: bool, shutdown: &CancellationToken) -> Pin<Box<ResponseStream>> {
        Box::pin(ResponseStream::new(0, skip_empty_chunks, shutdown, 1))
    }

    fn collect_bytes(stream: &mut Pin<Box<ResponseStream>>, len: usize) -> Vec<u8> {
        futures::executor::block_on(async {
            let mut out = Vec::with_capacity(len + 1024);
            while out.len() < len {
                let chunk = stream.next().await.expect("endless").expect("infallible");
                out.extend_from_slice(&chunk);
            }
            out
        })
    }

    #[test]
    fn skipping_empty_chunks_keeps_the_byte_sequence() {
        let shutdown = CancellationToken::new();
        let mut skipping = open(true, &shutdown);
        let mut verbatim = open(false, &shutdown);

        let a = collect_bytes(&mut skipping, 8 * 1024);
        let b = collect_bytes(&mut verbatim, 8 * 1024);
        let len = a.len().min(b.len());
        assert_eq!(a[..len], b[..len]);
    }

    #[test]
    fn skipping_never_yields_empty_chunks() {
        let shutdown = CancellationToken::new();
        let mut stream = open(true, &shutdown);
        futures::executor::block_on(async {
            for _ in 0..200 {
                let chunk = stream.next().await.expect("endless").expect("infallible");
                assert!(!chunk.is_empty());
            }
        });
    }

    #[test]
    fn verbatim_mode_passes_empty_chunks_through() {
        let shutdown = CancellationToken::new();
        let mut stream = open(false, &shutdown);
        let sizes: Vec<_> = futures::executor::block_on(async {
            let mut sizes = Vec::new();
            for _ in 0..5 {
                sizes.push(stream.next().await.expect("endless").expect("infallible").len());
            }
            sizes
        });
        // First chunks of seed 0.
        assert_eq!(sizes, [861, 189, 0, 4, 1]);
    }

    #[test]
    fn shutdown_ends_the_stream() {
        let shutdown = CancellationToken::new();
        let mut stream = open(true, &shutdown);

        futures::executor::block_on(async {
            assert!(stream.next().await.is_some());
            shutdown.cancel();
            assert!(stream.next().await.is_none());
            assert!(stream.next().await.is_none());
        });
        assert_eq!(stream.size_hint(), (0, Some(0)));
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn stream_events_carry_the_stream_span() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let shutdown = CancellationToken::new();
            let mut stream = Box::pin(ResponseStream::new(7, true, &shutdown, 3));
            futures::executor::block_on(async {
                assert!(stream.next().await.is_some());
            });
            drop(stream);
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let closed = output
            .lines()
            .find(|line| line.contains("stream closed"))
            .expect("close event logged");
        assert!(closed.contains("stream{stream_id=3 seed=7}"), "{closed}");
        let opened = output
            .lines()
            .find(|line| line.contains("stream opened"))
            .expect("open event logged");
        assert!(opened.contains("stream{stream_id=3 seed=7}"), "{opened}");
    }
}
