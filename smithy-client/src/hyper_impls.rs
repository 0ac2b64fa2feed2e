/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::erase::DynConnector;
use crate::{BoxError, Builder};
use hyper::client::connect::Connect;
use smithy_http::body::SdkBody;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Adapter from a [`hyper::Client`] to a connector usable by a [`Client`](crate::Client).
///
/// The response body is read to completion before the response is returned, so the time spent
/// streaming the body counts against the attempt timeout.
#[derive(Clone, Debug)]
pub struct Adapter<C>(hyper::Client<C, SdkBody>);

impl<C> Adapter<C>
where
    C: Connect + Clone + Send + Sync + 'static,
{
    pub fn new(client: hyper::Client<C, SdkBody>) -> Self {
        Adapter(client)
    }
}

impl<C> tower::Service<http::Request<SdkBody>> for Adapter<C>
where
    C: Connect + Clone + Send + Sync + 'static,
{
    type Response = http::Response<SdkBody>;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: http::Request<SdkBody>) -> Self::Future {
        let response = self.0.request(request);
        Box::pin(async move {
            let response = response.await?;
            let (parts, body) = response.into_parts();
            let body = hyper::body::to_bytes(body).await?;
            Ok(http::Response::from_parts(parts, SdkBody::from(body)))
        })
    }
}

impl<M> Builder<(), M> {
    /// Connect over HTTPS using rustls and the platform's native root certificates.
    ///
    /// Connections are pooled by the underlying hyper client and shared by every clone of the
    /// resulting client.
    pub fn rustls(self) -> Builder<DynConnector, M> {
        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .build();
        self.hyper(https)
    }

    /// Use a custom hyper connector
    pub fn hyper<C>(self, connector: C) -> Builder<DynConnector, M>
    where
        C: Connect + Clone + Send + Sync + 'static,
    {
        let client = hyper::Client::builder().build::<_, SdkBody>(connector);
        self.connector(DynConnector::new(Adapter::new(client)))
    }
}
