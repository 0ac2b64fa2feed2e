/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::erase::DynConnector;
use crate::{retry, timeout, BoxError, Client};
use smithy_async::rt::sleep::{default_async_sleep, SharedAsyncSleep};
use smithy_http::body::SdkBody;
use smithy_http::middleware::Identity;
use tower::Service;

/// A builder that provides more customization options when constructing a [`Client`].
///
/// To start, call [`Builder::new`]. Then, chain the method calls to configure the `Builder`.
/// When configured to your liking, call [`Builder::build`]. The individual methods have additional
/// documentation.
#[derive(Clone, Debug)]
pub struct Builder<C = (), M = Identity> {
    connector: C,
    middleware: M,
    retry_config: retry::Config,
    timeout_config: timeout::Config,
    sleep_impl: Option<SharedAsyncSleep>,
}

impl Default for Builder<(), Identity> {
    fn default() -> Self {
        Builder {
            connector: (),
            middleware: Identity,
            retry_config: retry::Config::default(),
            timeout_config: timeout::Config::default(),
            sleep_impl: None,
        }
    }
}

impl Builder<(), Identity> {
    /// Construct a new, unconfigured builder.
    ///
    /// This builder cannot yet be used, as it does not specify a [connector](Builder::connector).
    /// It uses the [standard retry mechanism](retry::Standard) and no attempt timeout.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C, M> Builder<C, M> {
    /// Specify the connector for the eventual client to use.
    ///
    /// The connector dictates how requests are turned into responses. Normally, this would entail
    /// sending the request to some kind of remote server, but in certain settings it's useful to
    /// be able to use a custom connector instead, such as to mock the network for tests.
    ///
    /// If you just want to specify a function from request to response instead, use
    /// [`Builder::map_connector`].
    pub fn connector<C2>(self, connector: C2) -> Builder<C2, M> {
        Builder {
            connector,
            middleware: self.middleware,
            retry_config: self.retry_config,
            timeout_config: self.timeout_config,
            sleep_impl: self.sleep_impl,
        }
    }

    /// Specify the middleware for the eventual client to use.
    ///
    /// The middleware adjusts requests before they are dispatched to the connector. It is
    /// responsible for filling in any request parameters that aren't specified by the protocol
    /// serializer, such as those used for routing (like the URL), authentication, and
    /// authorization.
    pub fn middleware<M2>(self, middleware: M2) -> Builder<C, M2> {
        Builder {
            connector: self.connector,
            middleware,
            retry_config: self.retry_config,
            timeout_config: self.timeout_config,
            sleep_impl: self.sleep_impl,
        }
    }

    /// Use a connector that directly maps each request to a response.
    ///
    /// ```rust
    /// use smithy_client::Builder;
    /// use smithy_http::body::SdkBody;
    /// let client = Builder::new()
    ///   .map_connector(|req: http::Request<SdkBody>| {
    ///     async move {
    ///       Ok(http::Response::new(SdkBody::empty()))
    ///     }
    ///   })
    ///   .build();
    /// ```
    pub fn map_connector<F, FF>(self, map: F) -> Builder<tower::util::ServiceFn<F>, M>
    where
        F: Fn(http::Request<SdkBody>) -> FF + Send,
        FF: std::future::Future<Output = Result<http::Response<SdkBody>, BoxError>>,
    {
        self.connector(tower::service_fn(map))
    }

    /// Set the standard retry policy's configuration.
    pub fn retry_config(mut self, retry_config: retry::Config) -> Self {
        self.set_retry_config(retry_config);
        self
    }

    /// Set the standard retry policy's configuration.
    pub fn set_retry_config(&mut self, retry_config: retry::Config) -> &mut Self {
        self.retry_config = retry_config;
        self
    }

    /// Set the per-attempt timeout configuration.
    pub fn timeout_config(mut self, timeout_config: timeout::Config) -> Self {
        self.timeout_config = timeout_config;
        self
    }

    /// Set the sleep implementation used for retry backoff and attempt timeouts.
    ///
    /// When unset, the default runtime sleep (Tokio) is used.
    pub fn sleep_impl(mut self, sleep_impl: SharedAsyncSleep) -> Self {
        self.sleep_impl = Some(sleep_impl);
        self
    }
}

impl<C, M> Builder<C, M>
where
    C: Service<http::Request<SdkBody>, Response = http::Response<SdkBody>> + Clone + Send + 'static,
    C::Error: Into<BoxError> + Send + Sync + 'static,
    C::Future: Send + 'static,
{
    /// Build a [`Client`].
    pub fn build(self) -> Client<M> {
        let sleep_impl = self.sleep_impl.or_else(default_async_sleep);
        if sleep_impl.is_none() {
            tracing::warn!(
                "no sleep implementation is available: retries and attempt timeouts are disabled"
            );
        }
        Client {
            connector: DynConnector::new(self.connector),
            middleware: self.middleware,
            retry_policy: retry::Standard::new(self.retry_config),
            timeout_config: self.timeout_config,
            sleep_impl,
        }
    }
}
