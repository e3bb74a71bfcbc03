//! Stream operators for client pipelines.
//!
//! These compose with [`tokio_stream::StreamExt`] adapters (`filter_map` and
//! friends); within one pipeline the operators apply in declared order.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::time::{sleep, Sleep};
use tokio_stream::Stream;

/// Extension methods for building reactive client pipelines.
pub trait RxStreamExt: Stream {
    /// Suppress emissions until `window` of quiet; only the latest value in a
    /// burst survives. A pending value is flushed when the source ends.
    fn debounce(self, window: Duration) -> Debounce<Self>
    where
        Self: Sized,
    {
        Debounce {
            source: self,
            window,
            pending: None,
            delay: None,
            done: false,
        }
    }

    /// Drop emissions equal to the previous one.
    fn distinct_until_changed(self) -> DistinctUntilChanged<Self>
    where
        Self: Sized,
        Self::Item: Clone + PartialEq,
    {
        DistinctUntilChanged {
            source: self,
            last: None,
        }
    }
}

impl<S: Stream> RxStreamExt for S {}

/// See [`RxStreamExt::debounce`].
pub struct Debounce<S: Stream> {
    source: S,
    window: Duration,
    pending: Option<S::Item>,
    delay: Option<Pin<Box<Sleep>>>,
    done: bool,
}

impl<S> Stream for Debounce<S>
where
    S: Stream + Unpin,
    S::Item: Unpin,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let this = self.get_mut();

        // Drain everything the source has ready; each new value restarts the
        // quiet-period timer and replaces the pending value.
        while !this.done {
            match Pin::new(&mut this.source).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    this.pending = Some(item);
                    this.delay = Some(Box::pin(sleep(this.window)));
                }
                Poll::Ready(None) => {
                    this.done = true;
                }
                Poll::Pending => break,
            }
        }

        if this.done {
            // Flush the pending value on upstream end, then terminate.
            return Poll::Ready(this.pending.take());
        }

        if let Some(delay) = this.delay.as_mut() {
            match delay.as_mut().poll(cx) {
                Poll::Ready(()) => {
                    this.delay = None;
                    return Poll::Ready(this.pending.take());
                }
                Poll::Pending => {}
            }
        }

        Poll::Pending
    }
}

/// See [`RxStreamExt::distinct_until_changed`].
pub struct DistinctUntilChanged<S: Stream> {
    source: S,
    last: Option<S::Item>,
}

impl<S> Stream for DistinctUntilChanged<S>
where
    S: Stream + Unpin,
    S::Item: Clone + PartialEq + Unpin,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let this = self.get_mut();

        loop {
            match Pin::new(&mut this.source).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if this.last.as_ref() == Some(&item) {
                        continue;
                    }
                    this.last = Some(item.clone());
                    return Poll::Ready(Some(item));
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio_stream::wrappers::ReceiverStream;
    use tokio_stream::StreamExt;

    #[tokio::test(start_paused = true)]
    async fn debounce_keeps_only_the_latest_of_a_burst() {
        let (tx, rx) = mpsc::channel(16);
        let mut stream = ReceiverStream::new(rx).debounce(Duration::from_millis(100));

        tokio::spawn(async move {
            tx.send(1).await.unwrap();
            tokio::time::sleep(Duration::from_millis(10)).await;
            tx.send(2).await.unwrap();
            tokio::time::sleep(Duration::from_millis(10)).await;
            tx.send(3).await.unwrap();

            // Quiet period, then a second burst.
            tokio::time::sleep(Duration::from_millis(200)).await;
            tx.send(4).await.unwrap();
        });

        assert_eq!(stream.next().await, Some(3));
        assert_eq!(stream.next().await, Some(4));
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_flushes_pending_value_when_source_ends() {
        let (tx, rx) = mpsc::channel(16);
        let mut stream = ReceiverStream::new(rx).debounce(Duration::from_secs(3600));

        tx.send(42).await.unwrap();
        drop(tx);

        assert_eq!(stream.next().await, Some(42));
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_spaced_emissions_all_survive() {
        let (tx, rx) = mpsc::channel(16);
        let mut stream = ReceiverStream::new(rx).debounce(Duration::from_millis(100));

        tokio::spawn(async move {
            for n in [1, 2, 3] {
                tx.send(n).await.unwrap();
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        });

        assert_eq!(stream.next().await, Some(1));
        assert_eq!(stream.next().await, Some(2));
        assert_eq!(stream.next().await, Some(3));
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn distinct_until_changed_drops_consecutive_duplicates() {
        let source = tokio_stream::iter([1, 1, 2, 2, 2, 3, 1]);
        let collected: Vec<_> = source.distinct_until_changed().collect().await;
        assert_eq!(collected, vec![1, 2, 3, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn operators_compose_in_declared_order() {
        let (tx, rx) = mpsc::channel(16);
        let mut stream = ReceiverStream::new(rx)
            .debounce(Duration::from_millis(100))
            .distinct_until_changed();

        tokio::spawn(async move {
            // Two bursts that both settle on the same value: debounce emits
            // "7" twice, dedupe collapses the repeat.
            tx.send(1).await.unwrap();
            tx.send(7).await.unwrap();
            tokio::time::sleep(Duration::from_millis(200)).await;
            tx.send(2).await.unwrap();
            tx.send(7).await.unwrap();
        });

        assert_eq!(stream.next().await, Some(7));
        assert_eq!(stream.next().await, None);
    }
}
