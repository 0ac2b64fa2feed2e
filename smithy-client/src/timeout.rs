/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Timeout configuration

use std::time::Duration;

/// Per-attempt timeout configuration
///
/// When set, each dispatch to the connector (including reading the response) must complete within
/// `attempt_timeout` or the attempt fails with [`SdkError::TimeoutError`](crate::SdkError::TimeoutError).
/// Timed out attempts are retried like any other transient failure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    attempt_timeout: Option<Duration>,
}

impl Config {
    /// A configuration without any timeouts
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout for a single attempt
    pub fn with_attempt_timeout(mut self, attempt_timeout: Option<Duration>) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    pub fn attempt_timeout(&self) -> Option<Duration> {
        self.attempt_timeout
    }
}
