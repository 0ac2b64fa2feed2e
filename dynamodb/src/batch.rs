/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Batch calls that resubmit unprocessed work.
//!
//! `BatchWriteItem` and `BatchGetItem` may succeed while leaving part of the request
//! unprocessed, typically under throttling. The helpers here send only the unprocessed subset
//! again, backing off between rounds with the client's retry configuration, and merge the
//! responses. The number of rounds is bounded by the configured maximum attempts; whatever is
//! still unprocessed after the last round is returned in the merged output.

use crate::client::Client;
use crate::error::ServiceError;
use crate::input::{BatchGetItemInput, BatchWriteItemInput};
use crate::output::{BatchGetItemOutput, BatchWriteItemOutput};
use smithy_async::rt::sleep::AsyncSleep;
use smithy_client::SdkError;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use tracing::debug;

/// A batch round failed
///
/// When an earlier round succeeded, [`partial`](BatchError::partial) holds everything merged so
/// far. Its `UnprocessedItems` / `UnprocessedKeys` are exactly the requests of the failed round,
/// so the caller can tell what has been applied and what has not.
#[derive(Debug)]
pub struct BatchError<O> {
    round: u32,
    partial: Option<O>,
    source: SdkError<ServiceError>,
}

impl<O> BatchError<O> {
    /// Zero-based index of the round that failed
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Output merged from the rounds that succeeded, if any did
    pub fn partial(&self) -> Option<&O> {
        self.partial.as_ref()
    }

    /// The error returned by the failed round
    pub fn sdk_error(&self) -> &SdkError<ServiceError> {
        &self.source
    }

    pub fn into_parts(self) -> (Option<O>, SdkError<ServiceError>) {
        (self.partial, self.source)
    }
}

impl<O> fmt::Display for BatchError<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "batch round {} failed: {}", self.round, self.source)
    }
}

impl<O: fmt::Debug> Error for BatchError<O> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

fn is_empty<K, V>(map: &Option<HashMap<K, V>>) -> bool {
    map.as_ref().map(HashMap::is_empty).unwrap_or(true)
}

fn append<T>(into: &mut Option<Vec<T>>, from: Option<Vec<T>>) {
    if let Some(from) = from {
        into.get_or_insert_with(Vec::new).extend(from);
    }
}

fn merge_lists<T>(into: &mut Option<HashMap<String, Vec<T>>>, from: Option<HashMap<String, Vec<T>>>) {
    if let Some(from) = from {
        let into = into.get_or_insert_with(HashMap::new);
        for (table, entries) in from {
            into.entry(table).or_insert_with(Vec::new).extend(entries);
        }
    }
}

impl Client {
    async fn before_round(&self, round: u32, operation: &str) -> bool {
        let retry_config = &self.handle().conf.retry_config;
        if round >= retry_config.max_attempts() {
            return false;
        }
        let sleep_impl = match &self.handle().sleep_impl {
            Some(sleep_impl) => sleep_impl,
            None => return false,
        };
        let delay = retry_config.backoff(round - 1);
        debug!(operation, round, backoff = ?delay, "resubmitting unprocessed requests");
        sleep_impl.sleep(delay).await;
        true
    }

    /// `BatchWriteItem`, resubmitting `UnprocessedItems` until none remain
    pub async fn batch_write_all(
        &self,
        input: BatchWriteItemInput,
    ) -> Result<BatchWriteItemOutput, BatchError<BatchWriteItemOutput>> {
        let mut merged = self
            .batch_write_item(input.clone())
            .await
            .map_err(|source| BatchError { round: 0, partial: None, source })?;
        let mut round = 1;
        while !is_empty(&merged.unprocessed_items) && self.before_round(round, "BatchWriteItem").await {
            let pending = merged.unprocessed_items.take();
            let retry = BatchWriteItemInput {
                request_items: pending.clone(),
                ..input.clone()
            };
            let output = match self.batch_write_item(retry).await {
                Ok(output) => output,
                Err(source) => {
                    merged.unprocessed_items = pending;
                    return Err(BatchError { round, partial: Some(merged), source });
                }
            };
            merged.unprocessed_items = output.unprocessed_items;
            merge_lists(&mut merged.item_collection_metrics, output.item_collection_metrics);
            append(&mut merged.consumed_capacity, output.consumed_capacity);
            round += 1;
        }
        Ok(merged)
    }

    /// `BatchGetItem`, resubmitting `UnprocessedKeys` until none remain
    pub async fn batch_get_all(
        &self,
        input: BatchGetItemInput,
    ) -> Result<BatchGetItemOutput, BatchError<BatchGetItemOutput>> {
        let mut merged = self
            .batch_get_item(input.clone())
            .await
            .map_err(|source| BatchError { round: 0, partial: None, source })?;
        let mut round = 1;
        while !is_empty(&merged.unprocessed_keys) && self.before_round(round, "BatchGetItem").await {
            let pending = merged.unprocessed_keys.take();
            let retry = BatchGetItemInput {
                request_items: pending.clone(),
                ..input.clone()
            };
            let output = match self.batch_get_item(retry).await {
                Ok(output) => output,
                Err(source) => {
                    merged.unprocessed_keys = pending;
                    return Err(BatchError { round, partial: Some(merged), source });
                }
            };
            merged.unprocessed_keys = output.unprocessed_keys;
            merge_lists(&mut merged.responses, output.responses);
            append(&mut merged.consumed_capacity, output.consumed_capacity);
            round += 1;
        }
        Ok(merged)
    }
}
