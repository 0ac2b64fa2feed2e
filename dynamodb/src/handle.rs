/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Cancellable calls running on their own task.

use crate::error::ServiceError;
use smithy_client::SdkError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// A call running on a Tokio task
///
/// Await the handle for the call's result. [`cancel`](CallHandle::cancel) stops the call: the
/// in-flight request is dropped and the result becomes [`SdkError::Cancelled`]. Cancelling a
/// call that already completed has no effect. Dropping the handle does not cancel the call.
#[derive(Debug)]
pub struct CallHandle<T> {
    task: JoinHandle<Result<T, SdkError<ServiceError>>>,
    cancel: Arc<Notify>,
}

async fn cancellable<T>(
    call: impl Future<Output = Result<T, SdkError<ServiceError>>>,
    cancel: Arc<Notify>,
) -> Result<T, SdkError<ServiceError>> {
    tokio::select! {
        biased;
        _ = cancel.notified() => {
            tracing::debug!("call cancelled");
            Err(SdkError::Cancelled)
        }
        result = call => result,
    }
}

impl<T> CallHandle<T>
where
    T: Send + 'static,
{
    pub(crate) fn spawn<F>(call: F) -> Self
    where
        F: Future<Output = Result<T, SdkError<ServiceError>>> + Send + 'static,
    {
        let cancel = Arc::new(Notify::new());
        let task = tokio::spawn(cancellable(call, cancel.clone()));
        CallHandle { task, cancel }
    }
}

impl CallHandle<()> {
    pub(crate) fn spawn_with_callback<T, F, C>(call: F, callback: C) -> Self
    where
        T: Send + 'static,
        F: Future<Output = Result<T, SdkError<ServiceError>>> + Send + 'static,
        C: FnOnce(Result<T, SdkError<ServiceError>>) + Send + 'static,
    {
        let cancel = Arc::new(Notify::new());
        let signal = cancel.clone();
        let task = tokio::spawn(async move {
            callback(cancellable(call, signal).await);
            Ok(())
        });
        CallHandle { task, cancel }
    }
}

impl<T> CallHandle<T> {
    /// Request cancellation of the call
    pub fn cancel(&self) {
        // `notify_one` stores a permit, so cancelling before the task first runs still counts
        self.cancel.notify_one();
    }
}

impl<T> Future for CallHandle<T> {
    type Output = Result<T, SdkError<ServiceError>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.get_mut().task).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(err)) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            // the runtime shut down before the task finished
            Poll::Ready(Err(_)) => Poll::Ready(Err(SdkError::Cancelled)),
        }
    }
}
