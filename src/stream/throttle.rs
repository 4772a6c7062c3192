//! Rate limiting for progress streams

use futures::{Stream, ready};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};

/// Extension trait to add coalescing to any Stream
pub trait ThrottleExt: Stream {
    /// Emit at most once per `period`, keeping only the latest item
    ///
    /// Items for which `flush` returns true bypass the period and are emitted
    /// as soon as they arrive, dropping anything still pending. The last
    /// pending item is emitted when the inner stream ends.
    fn throttle_unless<F>(self, period: Duration, flush: F) -> Throttle<Self, F>
    where
        Self: Sized,
        F: FnMut(&Self::Item) -> bool,
    {
        Throttle::new(self, period, flush)
    }
}

impl<T: Stream> ThrottleExt for T {}

pin_project! {
    /// A stream combinator that coalesces items to a maximum rate
    pub struct Throttle<S: Stream, F> {
        #[pin]
        stream: S,
        interval: Interval,
        pending: Option<S::Item>,
        flush: F,
        finished: bool,
    }
}

impl<S: Stream, F> Throttle<S, F> {
    /// Create a new throttled stream
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(stream: S, period: Duration, flush: F) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self { stream, interval, pending: None, flush, finished: false }
    }
}

impl<S, F> Stream for Throttle<S, F>
where
    S: Stream,
    F: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(this.pending.take());
        }

        // Drain whatever is ready, keeping only the latest
        loop {
            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if (this.flush)(&item) {
                        *this.pending = None;
                        return Poll::Ready(Some(item));
                    }
                    *this.pending = Some(item);
                }
                Poll::Ready(None) => {
                    *this.finished = true;
                    return Poll::Ready(this.pending.take());
                }
                Poll::Pending => break,
            }
        }

        if this.pending.is_none() {
            return Poll::Pending;
        }

        ready!(this.interval.poll_tick(cx));
        Poll::Ready(this.pending.take())
    }
}
