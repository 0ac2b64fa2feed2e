/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Connectors for testing clients without a network

use crate::erase::DynConnector;
use crate::BoxError;
use http::header::HeaderName;
use smithy_async::future::never::Never;
use smithy_http::body::SdkBody;
use std::fmt;
use std::future::{Future, Ready};
use std::ops::Deref;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tower::Service;

type ConnectVec<B> = Vec<(http::Request<SdkBody>, http::Response<B>)>;

/// An expected request paired with the request that was actually dispatched
#[derive(Debug)]
pub struct ValidateRequest {
    pub expected: http::Request<SdkBody>,
    pub actual: http::Request<SdkBody>,
}

impl ValidateRequest {
    /// Assert that the expected headers, body and URI were sent
    ///
    /// Headers not present on the expected request are not checked.
    pub fn assert_matches(&self, ignore_headers: &[HeaderName]) {
        let (actual, expected) = (&self.actual, &self.expected);
        for (name, value) in expected.headers() {
            if !ignore_headers.contains(name) {
                let actual_header = actual
                    .headers()
                    .get(name)
                    .unwrap_or_else(|| panic!("Header {:?} missing", name));
                assert_eq!(actual_header, value, "Header mismatch for {:?}", name);
            }
        }
        let actual_body = actual.body().bytes().unwrap_or(&[]);
        let expected_body = expected.body().bytes().unwrap_or(&[]);
        match (
            std::str::from_utf8(actual_body),
            std::str::from_utf8(expected_body),
        ) {
            (Ok(actual), Ok(expected)) => assert_eq!(actual, expected),
            _ => assert_eq!(actual_body, expected_body),
        };
        assert_eq!(actual.uri(), expected.uri());
    }
}

/// A basic test connection. It will:
/// - Respond to requests with a preloaded series of responses
/// - Record requests for future examination
///
/// Once the responses run out, every further call fails with a dispatch error.
///
/// ```rust
/// use smithy_client::test_connection::TestConnection;
/// use smithy_http::body::SdkBody;
/// let events = vec![(
///    http::Request::new(SdkBody::from("request body")),
///    http::Response::builder()
///        .status(200)
///        .body("response body")
///        .unwrap(),
/// )];
/// let conn = TestConnection::new(events);
/// let client = smithy_client::Builder::new().connector(conn.clone()).build();
/// ```
pub struct TestConnection<B> {
    data: Arc<Mutex<ConnectVec<B>>>,
    requests: Arc<Mutex<Vec<ValidateRequest>>>,
}

// Cloning shares the recorded data, so `B` does not need to be `Clone`
impl<B> Clone for TestConnection<B> {
    fn clone(&self) -> Self {
        TestConnection {
            data: self.data.clone(),
            requests: self.requests.clone(),
        }
    }
}

impl<B> fmt::Debug for TestConnection<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestConnection")
            .field("remaining", &self.data.lock().unwrap().len())
            .field("requests", &self.requests.lock().unwrap().len())
            .finish()
    }
}

impl<B> TestConnection<B> {
    pub fn new(mut data: ConnectVec<B>) -> Self {
        data.reverse();
        TestConnection {
            data: Arc::new(Mutex::new(data)),
            requests: Default::default(),
        }
    }

    pub fn requests(&self) -> impl Deref<Target = Vec<ValidateRequest>> + '_ {
        self.requests.lock().unwrap()
    }

    pub fn num_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn assert_requests_match(&self, ignore_headers: &[HeaderName]) {
        for req in self.requests().iter() {
            req.assert_matches(ignore_headers)
        }
        let remaining_requests = self.data.lock().unwrap().len();
        assert_eq!(
            remaining_requests, 0,
            "Expected {} additional requests",
            remaining_requests
        );
    }
}

impl<B> Service<http::Request<SdkBody>> for TestConnection<B>
where
    B: Into<SdkBody>,
{
    type Response = http::Response<SdkBody>;
    type Error = BoxError;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, actual: http::Request<SdkBody>) -> Self::Future {
        let next = self.data.lock().unwrap().pop();
        match next {
            Some((expected, resp)) => {
                self.requests
                    .lock()
                    .unwrap()
                    .push(ValidateRequest { expected, actual });
                std::future::ready(Ok(resp.map(|body| body.into())))
            }
            None => std::future::ready(Err("No more data".into())),
        }
    }
}

/// Build a connector from a function that answers every request
///
/// Useful when the test only cares about the responses and how many times the connector was
/// invoked.
pub fn infallible_connection_fn<F>(f: F) -> DynConnector
where
    F: Fn(http::Request<SdkBody>) -> http::Response<SdkBody> + Send + Sync + 'static,
{
    let f = Arc::new(f);
    DynConnector::new(tower::service_fn(move |request| {
        let f = f.clone();
        async move { Ok::<_, BoxError>(f(request)) }
    }))
}

/// Connector whose requests never complete. Counts invocations.
#[derive(Clone, Debug, Default)]
pub struct NeverService {
    invocations: Arc<AtomicUsize>,
}

impl NeverService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_calls(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl Service<http::Request<SdkBody>> for NeverService {
    type Response = http::Response<SdkBody>;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _request: http::Request<SdkBody>) -> Self::Future {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        Box::pin(async {
            Never::new().await;
            Err("a never-completing request completed".into())
        })
    }
}

#[derive(Debug)]
struct Inner {
    response: Option<http::Response<SdkBody>>,
    sender: Option<oneshot::Sender<http::Request<SdkBody>>>,
}

/// Connector that captures the first request it receives and answers it with a canned response
#[derive(Clone, Debug)]
pub struct CaptureRequestHandler(Arc<Mutex<Inner>>);

impl Service<http::Request<SdkBody>> for CaptureRequestHandler {
    type Response = http::Response<SdkBody>;
    type Error = BoxError;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: http::Request<SdkBody>) -> Self::Future {
        let mut inner = self.0.lock().unwrap();
        if let Some(sender) = inner.sender.take() {
            let _ = sender.send(request);
        }
        match inner.response.take() {
            Some(response) => std::future::ready(Ok(response)),
            None => std::future::ready(Err("this connector only answers one request".into())),
        }
    }
}

/// Receiver for [`CaptureRequestHandler`](CaptureRequestHandler)
#[derive(Debug)]
pub struct CaptureRequestReceiver {
    receiver: oneshot::Receiver<http::Request<SdkBody>>,
}

impl CaptureRequestReceiver {
    /// Return the captured request, panicking if none was sent
    pub fn expect_request(mut self) -> http::Request<SdkBody> {
        self.receiver.try_recv().expect("no request was received")
    }

    /// Panic if a request was sent
    pub fn expect_no_request(mut self) {
        self.receiver
            .try_recv()
            .expect_err("expected no request to be received");
    }
}

/// Test connection used to capture a single request
///
/// If response is `None`, it will reply with a 200 response with an empty body
pub fn capture_request(
    response: Option<http::Response<SdkBody>>,
) -> (CaptureRequestHandler, CaptureRequestReceiver) {
    let (tx, rx) = oneshot::channel();
    (
        CaptureRequestHandler(Arc::new(Mutex::new(Inner {
            response: Some(response.unwrap_or_else(|| {
                http::Response::builder()
                    .status(200)
                    .body(SdkBody::empty())
                    .expect("unreachable")
            })),
            sender: Some(tx),
        }))),
        CaptureRequestReceiver { receiver: rx },
    )
}
