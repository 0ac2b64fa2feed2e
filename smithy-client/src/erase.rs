/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Type-erased connectors

use crate::BoxError;
use smithy_http::body::SdkBody;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::util::BoxCloneService;
use tower::{Service, ServiceExt};

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// A boxed connector: any cloneable `tower::Service` from `http::Request<SdkBody>` to
/// `http::Response<SdkBody>`.
///
/// Each call clones the inner service and performs exactly one request/response exchange with
/// it; connection pooling is left to the inner service (e.g. the hyper client shares its pool
/// between clones).
#[derive(Clone)]
pub struct DynConnector(
    Arc<Mutex<BoxCloneService<http::Request<SdkBody>, http::Response<SdkBody>, BoxError>>>,
);

impl fmt::Debug for DynConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynConnector").finish()
    }
}

impl DynConnector {
    /// Erase the type of `connector`
    pub fn new<C>(connector: C) -> Self
    where
        C: Service<http::Request<SdkBody>, Response = http::Response<SdkBody>>
            + Clone
            + Send
            + 'static,
        C::Error: Into<BoxError> + Send + Sync + 'static,
        C::Future: Send + 'static,
    {
        let connector = connector.map_err(|err: C::Error| -> BoxError { err.into() });
        DynConnector(Arc::new(Mutex::new(BoxCloneService::new(connector))))
    }

    /// Dispatch a single request
    pub fn dispatch(
        &self,
        request: http::Request<SdkBody>,
    ) -> BoxFuture<Result<http::Response<SdkBody>, BoxError>> {
        let connector = self.0.lock().unwrap().clone();
        Box::pin(connector.oneshot(request))
    }
}

impl Service<http::Request<SdkBody>> for DynConnector {
    type Response = http::Response<SdkBody>;
    type Error = BoxError;
    type Future = BoxFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: http::Request<SdkBody>) -> Self::Future {
        self.dispatch(request)
    }
}
