//! Adapters driving a [`Limit`] on behalf of the caller
//!
//! - [`Limit::into_predicate`] - one-shot filter closure
//! - [`Windowed`] - iterator adapter, see [`WindowExt::windowed`]
//! - [`WindowedStream`] - stream adapter, see [`StreamWindowExt::windowed_stream`]

use super::types::{Limit, Page};
use futures::Stream;
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

// ============================================================================
// Predicate
// ============================================================================

impl Limit {
    /// Convert the limit into a filter predicate.
    ///
    /// Each call checks [`should_output`](Self::should_output) first and only advances the limit
    /// when the candidate is accepted, so rejected candidates are not counted. This differs from
    /// the advance-then-check loop protocol:
    /// - with a skip, nothing is ever accepted since the skip never drains;
    /// - with a bound of `n` and no skip, `n + 1` candidates are accepted.
    ///
    /// The predicate owns the limit and carries its state, so it can only serve one traversal.
    pub fn into_predicate<T: ?Sized>(mut self) -> impl FnMut(&T) -> bool {
        move |_: &T| {
            if self.should_output() {
                self.next_row();
                true
            } else {
                false
            }
        }
    }
}

// ============================================================================
// Iterator Adapter
// ============================================================================

/// Iterator yielding the items of an inner iterator that fall inside a window.
///
/// Stops pulling from the inner iterator as soon as the window is closed.
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Windowed<I> {
    inner: I,
    limit: Limit,
    done: bool,
}

impl<I> Windowed<I> {
    /// Create a new windowed iterator
    pub fn new(inner: I, limit: Limit) -> Self {
        Self {
            inner,
            limit,
            done: false,
        }
    }

    /// Whether the source was found to have items past the window
    pub fn has_more(&self) -> bool {
        !self.limit.should_continue()
    }

    /// Current state of the limit
    pub fn limit(&self) -> &Limit {
        &self.limit
    }

    /// Give back the inner iterator, positioned after the last pulled item
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: Iterator> Windowed<I> {
    /// Drain the window into a [`Page`]
    pub fn collect_page(mut self) -> Page<I::Item> {
        let items = self.by_ref().collect();
        Page {
            items,
            skip: self.limit.items_to_skip(),
            max_items: self.limit.max_items(),
            has_more: self.has_more(),
        }
    }
}

impl<I: Iterator> Iterator for Windowed<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let Some(item) = self.inner.next() else {
                self.done = true;
                break;
            };

            self.limit.next_row();
            let output = self.limit.should_output();
            if !self.limit.should_continue() {
                tracing::trace!(
                    "Window closed after {} items",
                    self.limit.total_items() + 1
                );
                self.done = true;
            }
            if output {
                return Some(item);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let (_, upper) = self.inner.size_hint();
        let max = self.limit.max_items();
        if max == 0 {
            (0, upper)
        } else {
            let max = usize::try_from(max).unwrap_or(usize::MAX);
            (0, Some(upper.map_or(max, |upper| upper.min(max))))
        }
    }
}

impl<I: Iterator> std::iter::FusedIterator for Windowed<I> {}

/// Extension trait adding [`windowed`](WindowExt::windowed) to every iterable
pub trait WindowExt: IntoIterator + Sized {
    /// Only yield the items inside the window described by `limit`
    fn windowed(self, limit: Limit) -> Windowed<Self::IntoIter> {
        Windowed::new(self.into_iter(), limit)
    }
}

impl<T: IntoIterator> WindowExt for T {}

// ============================================================================
// Stream Adapter
// ============================================================================

/// Max candidates discarded in a single `poll_next` before yielding back to the executor
const DISCARDS_PER_POLL: usize = 128;

pin_project! {
    /// Stream yielding the items of an inner stream that fall inside a window.
    ///
    /// Stops polling the inner stream as soon as the window is closed. Candidates outside the
    /// window are discarded at most 128 per poll; after that the task is woken and `Pending` is
    /// returned, so a long skip over a ready stream does not hog the executor.
    #[derive(Debug)]
    #[must_use = "streams do nothing unless polled"]
    pub struct WindowedStream<S> {
        #[pin]
        inner: S,
        limit: Limit,
        done: bool,
    }
}

impl<S> WindowedStream<S> {
    /// Create a new windowed stream
    pub fn new(inner: S, limit: Limit) -> Self {
        Self {
            inner,
            limit,
            done: false,
        }
    }

    /// Whether the source was found to have items past the window
    pub fn has_more(&self) -> bool {
        !self.limit.should_continue()
    }

    /// Current state of the limit
    pub fn limit(&self) -> &Limit {
        &self.limit
    }
}

impl<S: Stream> Stream for WindowedStream<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        let mut discarded = 0;
        while !*this.done {
            if discarded == DISCARDS_PER_POLL {
                cx.waker().wake_by_ref();
                return Poll::Pending;
            }
            match this.inner.as_mut().poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(None) => *this.done = true,
                Poll::Ready(Some(item)) => {
                    this.limit.next_row();
                    let output = this.limit.should_output();
                    if !this.limit.should_continue() {
                        tracing::trace!(
                            "Window closed after {} items",
                            this.limit.total_items() + 1
                        );
                        *this.done = true;
                    }
                    if output {
                        return Poll::Ready(Some(item));
                    }
                    discarded += 1;
                }
            }
        }
        Poll::Ready(None)
    }
}

/// Extension trait adding [`windowed_stream`](StreamWindowExt::windowed_stream) to every stream
pub trait StreamWindowExt: Stream + Sized {
    /// Only yield the items inside the window described by `limit`
    fn windowed_stream(self, limit: Limit) -> WindowedStream<Self> {
        WindowedStream::new(self, limit)
    }
}

impl<S: Stream> StreamWindowExt for S {}
