/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Synchronous access to the [`Client`].

use crate::client::Client;
use crate::error::ServiceError;
use crate::operation::DynamoDbOperation;
use smithy_client::SdkError;
use std::future::Future;
use tokio::runtime::{Builder, Runtime};

/// A [`Client`] that blocks the calling thread
///
/// The wrapper owns a single-threaded Tokio runtime and drives each call on it to completion.
/// Methods panic when called from within an async context; use the [`Client`] there instead.
#[derive(Debug)]
pub struct BlockingClient {
    client: Client,
    runtime: Runtime,
}

impl BlockingClient {
    pub fn new(client: Client) -> std::io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(BlockingClient { client, runtime })
    }

    #[cfg(feature = "rustls")]
    pub fn from_conf(conf: crate::Config) -> std::io::Result<Self> {
        // the HTTPS connector must be created inside the runtime it runs on
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let client = runtime.block_on(async { Client::from_conf(conf) });
        Ok(BlockingClient { client, runtime })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Invoke any operation and wait for its result
    pub fn send<I>(&self, input: I) -> Result<I::Output, SdkError<ServiceError>>
    where
        I: DynamoDbOperation,
    {
        self.runtime.block_on(self.client.send(input))
    }

    /// Run `f` against the async client and wait for the future it returns
    ///
    /// ```no_run
    /// # fn demo(blocking: dynamodb::blocking::BlockingClient) {
    /// use dynamodb::input::ListTablesInput;
    /// let tables = blocking.call(|client| client.list_tables(ListTablesInput::builder().build()));
    /// # }
    /// ```
    pub fn call<'a, F, Fut>(&'a self, f: F) -> Fut::Output
    where
        F: FnOnce(&'a Client) -> Fut,
        Fut: Future + 'a,
    {
        self.runtime.block_on(f(&self.client))
    }
}
