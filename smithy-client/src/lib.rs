/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! A retrying, timeout-aware service client.
//!
//! A [`Client`] turns an [`Operation`] into a parsed result. Each call runs through the same
//! pipeline:
//!
//! 1. the request is cloned for the attempt and passed through the [middleware](MapRequest)
//!    (endpoint resolution, signing, ...);
//! 2. the connector performs exactly one request/response exchange, optionally bounded by an
//!    attempt timeout;
//! 3. the response is parsed by the operation's response handler;
//! 4. the operation's retry classifier and the client's [retry policy](retry::Standard) decide
//!    whether to sleep and loop back to step 1, or to return the result to the caller.
#![warn(missing_debug_implementations, rust_2018_idioms)]

mod builder;
pub mod erase;
pub mod retry;
pub mod timeout;

#[cfg(any(test, feature = "test-util"))]
pub mod test_connection;

#[cfg(feature = "hyper")]
mod hyper_impls;

pub use builder::Builder;
#[cfg(feature = "hyper")]
pub use hyper_impls::Adapter;

use erase::DynConnector;
use smithy_async::future::timeout::Timeout;
use smithy_async::rt::sleep::{AsyncSleep, SharedAsyncSleep};
use smithy_http::body::SdkBody;
use smithy_http::middleware::{load_response, Identity, MapRequest};
use smithy_http::operation;
use smithy_http::operation::Operation;
use smithy_http::response::ParseHttpResponse;
pub use smithy_http::result::{SdkError, SdkSuccess};
use smithy_http::retry::ClassifyResponse;
use std::error::Error;
use tracing::{debug, debug_span, trace, warn, Instrument};

pub(crate) type BoxError = Box<dyn Error + Send + Sync>;

/// Service client.
///
/// The client owns a type-erased connector, a middleware that fills out each
/// [`http::Request`] before it is sent, the standard retry policy (whose retry quota is shared
/// by every call made through this client and its clones), an optional per-attempt timeout, and
/// the sleep implementation used for backoff and timeouts.
///
/// Construct one with [`Builder`].
#[derive(Debug, Clone)]
pub struct Client<M = Identity> {
    connector: DynConnector,
    middleware: M,
    retry_policy: retry::Standard,
    timeout_config: timeout::Config,
    sleep_impl: Option<SharedAsyncSleep>,
}

impl<M> Client<M> {
    /// Set the standard retry policy's configuration.
    pub fn set_retry_config(&mut self, config: retry::Config) {
        self.retry_policy.with_config(config);
    }

    pub fn retry_policy(&self) -> &retry::Standard {
        &self.retry_policy
    }

    pub fn timeout_config(&self) -> &timeout::Config {
        &self.timeout_config
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}

impl<M> Client<M>
where
    M: MapRequest,
{
    /// Dispatch this request to the network
    ///
    /// For ergonomics, this does not include the raw response for successful responses. To
    /// access the raw response use `call_raw`.
    pub async fn call<O, T, E, R>(&self, input: Operation<O, R>) -> Result<T, SdkError<E>>
    where
        O: ParseHttpResponse<SdkBody, Output = Result<T, E>>,
        R: ClassifyResponse<SdkSuccess<T>, SdkError<E>>,
    {
        self.call_raw(input).await.map(|res| res.parsed)
    }

    /// Dispatch this request to the network
    ///
    /// The returned result contains the raw HTTP response which can be useful for debugging or
    /// implementing unsupported features.
    pub async fn call_raw<O, T, E, R>(
        &self,
        input: Operation<O, R>,
    ) -> Result<SdkSuccess<T>, SdkError<E>>
    where
        O: ParseHttpResponse<SdkBody, Output = Result<T, E>>,
        R: ClassifyResponse<SdkSuccess<T>, SdkError<E>>,
    {
        let (request, parts) = input.into_request_response();
        let span = match &parts.metadata {
            Some(metadata) => debug_span!(
                "send_operation",
                operation = metadata.name(),
                service = metadata.service()
            ),
            None => debug_span!("send_operation"),
        };
        self.send_with_retries(request, &parts.response_handler, &parts.retry_policy)
            .instrument(span)
            .await
    }

    async fn send_with_retries<O, T, E, R>(
        &self,
        request: operation::Request,
        handler: &O,
        classifier: &R,
    ) -> Result<SdkSuccess<T>, SdkError<E>>
    where
        O: ParseHttpResponse<SdkBody, Output = Result<T, E>>,
        R: ClassifyResponse<SdkSuccess<T>, SdkError<E>>,
    {
        let mut retry_handler = self.retry_policy.new_request_policy();
        loop {
            let attempt = retry_handler.retries() + 1;
            let attempt_request = request.try_clone().ok_or_else(|| {
                SdkError::ConstructionFailure("request body cannot be replayed".into())
            })?;
            trace!(attempt, "dispatching attempt");
            let result = self.attempt(attempt_request, handler).await;
            if result.is_ok() {
                retry_handler.succeeded();
                return result;
            }
            let retry_kind = classifier.classify(result.as_ref());
            let delay = match retry_handler.should_retry(&retry_kind) {
                Some(delay) => delay,
                None => return result,
            };
            let sleep_impl = match &self.sleep_impl {
                Some(sleep_impl) => sleep_impl,
                None => {
                    warn!("a retry was requested but no sleep implementation is configured");
                    return result;
                }
            };
            debug!(attempt, retry_kind = ?retry_kind, backoff = ?delay, "retrying failed attempt");
            sleep_impl.sleep(delay).await;
        }
    }

    async fn attempt<O, T, E>(
        &self,
        request: operation::Request,
        handler: &O,
    ) -> Result<SdkSuccess<T>, SdkError<E>>
    where
        O: ParseHttpResponse<SdkBody, Output = Result<T, E>>,
    {
        let request = self
            .middleware
            .apply(request)
            .map_err(|err| SdkError::ConstructionFailure(err.into()))?;
        let (request, _properties) = request.into_parts();
        trace!(request = ?request, "sending request");
        let dispatch = self.connector.dispatch(request);
        let response = match (self.timeout_config.attempt_timeout(), &self.sleep_impl) {
            (Some(attempt_timeout), Some(sleep_impl)) => {
                Timeout::new(dispatch, sleep_impl, attempt_timeout)
                    .await
                    .map_err(|err| SdkError::TimeoutError(err.into()))?
            }
            _ => dispatch.await,
        };
        let response = response.map_err(SdkError::DispatchFailure)?;
        trace!(response = ?response, "received response");
        load_response(response, handler).await
    }
}
