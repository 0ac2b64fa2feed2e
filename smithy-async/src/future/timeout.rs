/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Provides the [`Timeout`] future which races a future against a [`Sleep`].

use crate::rt::sleep::{AsyncSleep, Sleep};
use pin_project_lite::pin_project;
use std::error::Error;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

/// Error returned when a [`Timeout`] elapses before the wrapped future completes
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TimedOutError {
    after: Duration,
}

impl TimedOutError {
    /// The duration the wrapped future was given to complete
    pub fn after(&self) -> Duration {
        self.after
    }
}

impl Error for TimedOutError {}

impl fmt::Display for TimedOutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timed out after {:?}", self.after)
    }
}

pin_project! {
    /// Future that resolves to `Err(TimedOutError)` when its sleep completes first
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    #[derive(Debug)]
    pub struct Timeout<F> {
        #[pin]
        value: F,
        #[pin]
        sleep: Sleep,
        after: Duration,
    }
}

impl<F> Timeout<F> {
    /// Wrap `value` so that it fails once `after` has elapsed on `sleep_impl`
    pub fn new(value: F, sleep_impl: &dyn AsyncSleep, after: Duration) -> Timeout<F> {
        Timeout {
            value,
            sleep: sleep_impl.sleep(after),
            after,
        }
    }
}

impl<F> Future for Timeout<F>
where
    F: Future,
{
    type Output = Result<F::Output, TimedOutError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let me = self.project();

        // A value that is ready at the same time as the timer wins
        if let Poll::Ready(v) = me.value.poll(cx) {
            return Poll::Ready(Ok(v));
        }

        match me.sleep.poll(cx) {
            Poll::Ready(_) => Poll::Ready(Err(TimedOutError { after: *me.after })),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{TimedOutError, Timeout};
    use crate::future::never::Never;
    use crate::rt::sleep::TokioSleep;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn completes_before_timeout() {
        let sleep = TokioSleep::new();
        let result = Timeout::new(async { 5 }, &sleep, Duration::from_secs(1)).await;
        assert_eq!(Ok(5), result);
    }

    #[tokio::test(start_paused = true)]
    async fn never_times_out() {
        let sleep = TokioSleep::new();
        let err = Timeout::new(Never::new(), &sleep, Duration::from_millis(250))
            .await
            .expect_err("never resolves");
        assert_eq!(
            err,
            TimedOutError {
                after: Duration::from_millis(250)
            }
        );
        assert_eq!(err.to_string(), "timed out after 250ms");
    }

    #[tokio::test(start_paused = true)]
    async fn ready_value_beats_elapsed_timer() {
        let sleep = TokioSleep::new();
        let result = Timeout::new(async { "done" }, &sleep, Duration::from_secs(0)).await;
        assert_eq!(Ok("done"), result);
    }
}
