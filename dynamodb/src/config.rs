/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Client configuration.

use aws_endpoint::{AwsEndpointResolver, RegionalEndpoint, ResolveAwsEndpoint};
use aws_types::credentials::{
    EnvironmentVariableCredentialsProvider, ProvideCredentials, SharedCredentialsProvider,
};
use aws_types::os_shim_internal::Env;
use aws_types::region::{EnvironmentProvider, ProvideRegion, Region};
use smithy_async::rt::sleep::{AsyncSleep, SharedAsyncSleep};
use smithy_client::{retry, timeout};
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

const MAX_ATTEMPTS_ENV: &str = "AWS_MAX_ATTEMPTS";

/// Immutable configuration of a [`Client`](crate::Client)
///
/// Cloning a `Config` is cheap; the credentials provider and endpoint resolver are shared.
#[derive(Clone)]
pub struct Config {
    pub(crate) region: Option<Region>,
    pub(crate) credentials_provider: SharedCredentialsProvider,
    pub(crate) endpoint_resolver: AwsEndpointResolver,
    pub(crate) retry_config: retry::Config,
    pub(crate) timeout_config: timeout::Config,
    pub(crate) sleep_impl: Option<SharedAsyncSleep>,
    pub(crate) request_time: Option<SystemTime>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("endpoint_resolver", &self.endpoint_resolver)
            .field("retry_config", &self.retry_config)
            .field("timeout_config", &self.timeout_config)
            .finish()
    }
}

impl Config {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Load the configuration from the process environment
    ///
    /// See [`Builder::from_env`].
    pub fn from_env() -> Self {
        Builder::from_env(Env::real()).build()
    }

    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    pub fn retry_config(&self) -> &retry::Config {
        &self.retry_config
    }

    pub fn timeout_config(&self) -> &timeout::Config {
        &self.timeout_config
    }
}

#[derive(Debug, Default)]
pub struct Builder {
    region: Option<Region>,
    credentials_provider: Option<SharedCredentialsProvider>,
    endpoint_resolver: Option<AwsEndpointResolver>,
    retry_config: Option<retry::Config>,
    timeout_config: Option<timeout::Config>,
    sleep_impl: Option<SharedAsyncSleep>,
    request_time: Option<SystemTime>,
    env: Option<Env>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder whose region, credentials and retry settings come from `env`
    ///
    /// - region: `AWS_REGION`, then `AWS_DEFAULT_REGION`
    /// - credentials: `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, `AWS_SESSION_TOKEN`
    /// - maximum attempts: `AWS_MAX_ATTEMPTS`
    ///
    /// Explicit setters called afterwards take precedence.
    pub fn from_env(env: Env) -> Self {
        let mut builder = Builder::new();
        builder.region = EnvironmentProvider::new_with_env(env.clone()).region();
        builder.credentials_provider = Some(SharedCredentialsProvider::new(
            EnvironmentVariableCredentialsProvider::new_with_env(env.clone()),
        ));
        if let Ok(max_attempts) = env.get(MAX_ATTEMPTS_ENV) {
            match max_attempts.trim().parse::<u32>() {
                Ok(max_attempts) if max_attempts >= 1 => {
                    builder.retry_config =
                        Some(retry::Config::default().with_max_attempts(max_attempts))
                }
                _ => tracing::warn!(
                    value = %max_attempts,
                    "ignoring invalid {}: expected an integer of at least 1",
                    MAX_ATTEMPTS_ENV
                ),
            }
        }
        builder.env = Some(env);
        builder
    }

    pub fn region(mut self, region_provider: impl ProvideRegion) -> Self {
        self.region = region_provider.region();
        self
    }

    pub fn credentials_provider(
        mut self,
        credentials_provider: impl ProvideCredentials + 'static,
    ) -> Self {
        self.credentials_provider = Some(SharedCredentialsProvider::new(credentials_provider));
        self
    }

    /// Override the endpoint, eg. with a [`StaticEndpoint`](aws_endpoint::StaticEndpoint) for
    /// DynamoDB Local
    pub fn endpoint_resolver(mut self, endpoint_resolver: impl ResolveAwsEndpoint + 'static) -> Self {
        self.endpoint_resolver = Some(Arc::new(endpoint_resolver));
        self
    }

    pub fn retry_config(mut self, retry_config: retry::Config) -> Self {
        self.retry_config = Some(retry_config);
        self
    }

    pub fn timeout_config(mut self, timeout_config: timeout::Config) -> Self {
        self.timeout_config = Some(timeout_config);
        self
    }

    /// Sleep implementation for retry backoff and attempt timeouts. Defaults to Tokio.
    pub fn sleep_impl(mut self, sleep_impl: impl AsyncSleep + 'static) -> Self {
        self.sleep_impl = Some(SharedAsyncSleep::new(sleep_impl));
        self
    }

    /// Sign every request as if it were sent at `time`
    pub fn request_time(mut self, time: SystemTime) -> Self {
        self.request_time = Some(time);
        self
    }

    pub fn build(self) -> Config {
        let env = self.env.unwrap_or_else(Env::real);
        Config {
            region: self
                .region
                .or_else(|| EnvironmentProvider::new_with_env(env.clone()).region()),
            credentials_provider: self.credentials_provider.unwrap_or_else(|| {
                SharedCredentialsProvider::new(
                    EnvironmentVariableCredentialsProvider::new_with_env(env),
                )
            }),
            endpoint_resolver: self
                .endpoint_resolver
                .unwrap_or_else(|| Arc::new(RegionalEndpoint::new(crate::operation::SERVICE_NAME))),
            retry_config: self.retry_config.unwrap_or_default(),
            timeout_config: self.timeout_config.unwrap_or_default(),
            sleep_impl: self.sleep_impl,
            request_time: self.request_time,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::config::{Builder, Config};
    use aws_types::os_shim_internal::Env;
    use aws_types::region::Region;
    use tracing_test::traced_test;

    #[test]
    fn values_come_from_the_environment() {
        let env = Env::from_slice(&[
            ("AWS_DEFAULT_REGION", "eu-west-1"),
            ("AWS_ACCESS_KEY_ID", "akid"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
            ("AWS_MAX_ATTEMPTS", "7"),
        ]);
        let config = Builder::from_env(env).build();
        assert_eq!(config.region(), Some(&Region::new("eu-west-1")));
        assert_eq!(config.retry_config().max_attempts(), 7);
        use aws_types::credentials::ProvideCredentials;
        let creds = config.credentials_provider.provide_credentials().unwrap();
        assert_eq!(creds.access_key_id(), "akid");
    }

    #[test]
    fn explicit_settings_win() {
        let env = Env::from_slice(&[("AWS_REGION", "eu-west-1"), ("AWS_MAX_ATTEMPTS", "7")]);
        let config = Builder::from_env(env)
            .region(Region::new("us-west-2"))
            .retry_config(smithy_client::retry::Config::disabled())
            .build();
        assert_eq!(config.region(), Some(&Region::new("us-west-2")));
        assert_eq!(config.retry_config().max_attempts(), 1);
    }

    #[test]
    #[traced_test]
    fn invalid_max_attempts_is_ignored() {
        let env = Env::from_slice(&[("AWS_REGION", "us-east-1"), ("AWS_MAX_ATTEMPTS", "0")]);
        let config = Builder::from_env(env).build();
        assert_eq!(config.retry_config().max_attempts(), 3);
        assert!(logs_contain("ignoring invalid AWS_MAX_ATTEMPTS"));
    }

    #[test]
    fn defaults() {
        let config = Builder::from_env(Env::from_slice(&[])).build();
        assert_eq!(config.region(), None);
        assert_eq!(config.retry_config().max_attempts(), 3);
        assert_eq!(config.timeout_config().attempt_timeout(), None);
        let config = Config::builder().region(Region::new("us-east-1")).build();
        assert_eq!(config.region(), Some(&Region::new("us-east-1")));
    }
}
