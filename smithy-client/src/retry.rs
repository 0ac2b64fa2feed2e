/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Retry support
//!
//! Components:
//! - [`Standard`]: Top level manager, intended to be associated with a [`Client`](crate::Client).
//!   Its sole purpose in life is to create a [`RetryHandler`] for individual requests.
//! - [`RetryHandler`]: A request-scoped retry policy, backed by request-local state and shared
//!   state contained within [`Standard`].
//! - [`Config`]: Static configuration (max attempts, backoff base and cap, jitter) for retries.

use smithy_types::retry::{ErrorKind, RetryKind};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

/// Retry Policy Configuration
///
/// Without specific use cases, users should generally rely on the default values set by
/// [`Config::default`]: 3 attempts, a 50ms backoff base doubling up to 20s, and a jitter factor
/// drawn uniformly from `[0.5, 1.0]`.
#[derive(Clone, Debug)]
pub struct Config {
    initial_retry_tokens: usize,
    retry_cost: usize,
    no_retry_increment: usize,
    timeout_retry_cost: usize,
    max_attempts: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
    jitter: fn() -> f64,
}

impl Config {
    /// Override the jitter factor used for exponential backoff
    ///
    /// The factor must lie in `[0.0, 1.0]`; values outside are clamped. For deterministic tests,
    /// use a constant such as `|| 1.0`.
    pub fn with_jitter(mut self, jitter: fn() -> f64) -> Self {
        self.jitter = jitter;
        self
    }

    /// Override the maximum number of attempts
    ///
    /// `max_attempts` must be set to a value of at least `1` (indicating that retries are disabled).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Override the base delay of the exponential backoff
    pub fn with_initial_backoff(mut self, initial_backoff: Duration) -> Self {
        self.initial_backoff = initial_backoff;
        self
    }

    /// Override the upper bound of any single backoff delay
    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = max_backoff;
        self
    }

    /// A configuration that never retries
    pub fn disabled() -> Self {
        Self::default().with_max_attempts(1)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn initial_backoff(&self) -> Duration {
        self.initial_backoff
    }

    pub fn max_backoff(&self) -> Duration {
        self.max_backoff
    }

    /// Delay before retry number `retry` (starting at 0): `min(base * 2^retry, cap) * jitter`
    pub fn backoff(&self, retry: u32) -> Duration {
        let capped = 2_u32
            .checked_pow(retry)
            .and_then(|factor| self.initial_backoff.checked_mul(factor))
            .map_or(self.max_backoff, |exponential| exponential.min(self.max_backoff));
        let jitter = (self.jitter)();
        let jitter = if jitter.is_nan() {
            1.0
        } else {
            jitter.max(0.0).min(1.0)
        };
        Duration::try_from_secs_f64(capped.as_secs_f64() * jitter).unwrap_or(capped)
    }
}

/// Uniform jitter in `[0.5, 1.0]`
fn half_jitter() -> f64 {
    0.5 + 0.5 * fastrand::f64()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_retry_tokens: INITIAL_RETRY_TOKENS,
            retry_cost: RETRY_COST,
            no_retry_increment: 1,
            timeout_retry_cost: 10,
            max_attempts: MAX_ATTEMPTS,
            initial_backoff: Duration::from_millis(50),
            max_backoff: Duration::from_secs(20),
            jitter: half_jitter,
        }
    }
}

const MAX_ATTEMPTS: u32 = 3;
const INITIAL_RETRY_TOKENS: usize = 500;
const RETRY_COST: usize = 5;

/// Manage retries for a service
///
/// An implementation of the `standard` AWS retry strategy. A `Strategy` is scoped to a client.
/// For an individual request, call [`Standard::new_request_policy()`](Standard::new_request_policy)
#[derive(Debug, Clone)]
pub struct Standard {
    config: Config,
    shared_state: CrossRequestRetryState,
}

impl Standard {
    /// Construct a new standard retry policy from the given policy configuration.
    pub fn new(config: Config) -> Self {
        Self {
            shared_state: CrossRequestRetryState::new(config.initial_retry_tokens),
            config,
        }
    }

    /// Set the configuration for this retry policy.
    pub fn with_config(&mut self, config: Config) -> &mut Self {
        self.shared_state = CrossRequestRetryState::new(config.initial_retry_tokens);
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Create a request-scoped retry handler
    pub fn new_request_policy(&self) -> RetryHandler {
        RetryHandler {
            local: RequestLocalRetryState::new(),
            shared: self.shared_state.clone(),
            config: self.config.clone(),
        }
    }

    /// Number of retry tokens currently available to all requests of this client
    pub fn quota_available(&self) -> usize {
        self.shared_state.quota_available()
    }
}

impl Default for Standard {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[derive(Default, Clone, Debug)]
struct RequestLocalRetryState {
    attempts: u32,
    last_quota_usage: Option<usize>,
}

impl RequestLocalRetryState {
    fn new() -> Self {
        Self::default()
    }
}

/// Retry state shared by every request issued from the same client
#[derive(Clone, Debug)]
struct CrossRequestRetryState {
    quota_available: Arc<Mutex<usize>>,
}

#[allow(clippy::mutex_atomic)]
impl CrossRequestRetryState {
    fn new(initial_quota: usize) -> Self {
        Self {
            quota_available: Arc::new(Mutex::new(initial_quota)),
        }
    }

    fn quota_available(&self) -> usize {
        *self.quota_available.lock().unwrap()
    }

    fn quota_release(&self, value: Option<usize>, config: &Config) {
        let mut quota = self.quota_available.lock().unwrap();
        *quota += value.unwrap_or(config.no_retry_increment);
    }

    /// Attempt to acquire retry quota for `ErrorKind`
    ///
    /// If quota is available, the amount of quota consumed is returned
    /// If no quota is available, `None` is returned.
    fn quota_acquire(&self, err: &ErrorKind, config: &Config) -> Option<usize> {
        let mut quota = self.quota_available.lock().unwrap();
        let retry_cost = if err == &ErrorKind::TransientError {
            config.timeout_retry_cost
        } else {
            config.retry_cost
        };
        if retry_cost > *quota {
            None
        } else {
            *quota -= retry_cost;
            Some(retry_cost)
        }
    }
}

/// RetryHandler
///
/// Implementation of the standard retry strategy for a single request. `local` captures retry
/// state local to this request, `shared` captures state shared by all requests of the client.
#[derive(Clone, Debug)]
pub struct RetryHandler {
    local: RequestLocalRetryState,
    shared: CrossRequestRetryState,
    config: Config,
}

impl RetryHandler {
    /// Number of retries scheduled so far. The first attempt is not a retry.
    pub fn retries(&self) -> u32 {
        self.local.attempts
    }

    /// The attempt succeeded: return the quota it consumed (or a small increment) to the pool
    pub fn succeeded(&mut self) {
        self.shared
            .quota_release(self.local.last_quota_usage.take(), &self.config);
    }

    /// Decide whether the attempt that produced `retry_kind` should be retried
    ///
    /// Returns the delay to wait before the next attempt, or `None` when the last observed
    /// result should be surfaced to the caller.
    pub fn should_retry(&mut self, retry_kind: &RetryKind) -> Option<Duration> {
        let (kind, explicit_delay) = match retry_kind {
            RetryKind::Error(kind) => (*kind, None),
            RetryKind::Explicit(delay) => (ErrorKind::ThrottlingError, Some(*delay)),
            RetryKind::NotRetryable => return None,
            _ => return None,
        };
        if self.local.attempts + 1 >= self.config.max_attempts {
            debug!(
                attempts = self.local.attempts + 1,
                max_attempts = self.config.max_attempts,
                "not retrying: attempt limit reached"
            );
            return None;
        }
        let quota_used = match self.shared.quota_acquire(&kind, &self.config) {
            Some(quota) => quota,
            None => {
                warn!(error_kind = ?kind, "not retrying: retry quota exhausted");
                return None;
            }
        };
        self.local.last_quota_usage = Some(quota_used);
        let delay = match explicit_delay {
            Some(delay) => delay.min(self.config.max_backoff),
            None => self.backoff(),
        };
        self.local.attempts += 1;
        Some(delay)
    }

    /// `min(base * 2^n, cap) * jitter` for retry number `n` (starting at 0)
    fn backoff(&self) -> Duration {
        self.config.backoff(self.local.attempts)
    }
}

#[cfg(test)]
mod test {
    use crate::retry::{Config, Standard};
    use smithy_types::retry::{ErrorKind, RetryKind};
    use std::time::Duration;

    fn test_config() -> Config {
        Config::default()
            .with_jitter(|| 1.0)
            .with_initial_backoff(Duration::from_secs(1))
    }

    fn server_error() -> RetryKind {
        RetryKind::Error(ErrorKind::ServerError)
    }

    #[test]
    fn eventual_success() {
        let standard = Standard::new(test_config());
        let mut policy = standard.new_request_policy();
        let dur = policy.should_retry(&server_error()).expect("should retry");
        assert_eq!(dur, Duration::from_secs(1));
        assert_eq!(standard.quota_available(), 495);

        let dur = policy.should_retry(&server_error()).expect("should retry");
        assert_eq!(dur, Duration::from_secs(2));
        assert_eq!(standard.quota_available(), 490);

        policy.succeeded();
        assert_eq!(standard.quota_available(), 495);
    }

    #[test]
    fn no_more_attempts() {
        let standard = Standard::new(test_config());
        let mut policy = standard.new_request_policy();
        let dur = policy.should_retry(&server_error()).expect("should retry");
        assert_eq!(dur, Duration::from_secs(1));
        assert_eq!(standard.quota_available(), 495);

        let dur = policy.should_retry(&server_error()).expect("should retry");
        assert_eq!(dur, Duration::from_secs(2));
        assert_eq!(standard.quota_available(), 490);

        assert!(policy.should_retry(&server_error()).is_none());
        assert_eq!(standard.quota_available(), 490);
        assert_eq!(policy.retries(), 2);
    }

    #[test]
    fn no_quota() {
        let mut conf = test_config();
        conf.initial_retry_tokens = 5;
        let standard = Standard::new(conf);
        let mut policy = standard.new_request_policy();
        let dur = policy.should_retry(&server_error()).expect("should retry");
        assert_eq!(dur, Duration::from_secs(1));
        assert_eq!(standard.quota_available(), 0);
        assert!(policy.should_retry(&server_error()).is_none());
        assert_eq!(standard.quota_available(), 0);
    }

    #[test]
    fn transient_errors_cost_more_quota() {
        let standard = Standard::new(test_config());
        let mut policy = standard.new_request_policy();
        policy
            .should_retry(&RetryKind::Error(ErrorKind::TransientError))
            .expect("should retry");
        assert_eq!(standard.quota_available(), 490);
    }

    #[test]
    fn quota_is_shared_between_requests() {
        let mut conf = test_config();
        conf.initial_retry_tokens = 5;
        let standard = Standard::new(conf);
        let mut first = standard.new_request_policy();
        let mut second = standard.new_request_policy();
        assert!(first.should_retry(&server_error()).is_some());
        assert!(second.should_retry(&server_error()).is_none());
    }

    #[test]
    fn backoff_timing() {
        let standard = Standard::new(test_config().with_max_attempts(5));
        let mut policy = standard.new_request_policy();
        for (expected, quota) in [(1, 495), (2, 490), (4, 485), (8, 480)].iter() {
            let dur = policy.should_retry(&server_error()).expect("should retry");
            assert_eq!(dur, Duration::from_secs(*expected));
            assert_eq!(standard.quota_available(), *quota);
        }
        assert!(policy.should_retry(&server_error()).is_none());
        assert_eq!(standard.quota_available(), 480);
    }

    #[test]
    fn max_backoff_time() {
        let standard = Standard::new(
            test_config()
                .with_max_attempts(5)
                .with_max_backoff(Duration::from_secs(3)),
        );
        let mut policy = standard.new_request_policy();
        for expected in [1, 2, 3, 3].iter() {
            let dur = policy.should_retry(&server_error()).expect("should retry");
            assert_eq!(dur, Duration::from_secs(*expected));
        }
        assert!(policy.should_retry(&server_error()).is_none());
    }

    #[test]
    fn jitter_scales_delay() {
        let standard = Standard::new(test_config().with_jitter(|| 0.5));
        let mut policy = standard.new_request_policy();
        let dur = policy.should_retry(&server_error()).expect("should retry");
        assert_eq!(dur, Duration::from_millis(500));
    }

    #[test]
    fn huge_backoffs_saturate_at_the_cap() {
        let config = test_config()
            .with_initial_backoff(Duration::MAX)
            .with_max_backoff(Duration::MAX);
        assert_eq!(config.backoff(0), Duration::MAX);
        assert_eq!(config.backoff(40), Duration::MAX);
        let config = test_config().with_max_backoff(Duration::from_secs(20));
        assert_eq!(config.backoff(u32::MAX), Duration::from_secs(20));
    }

    #[test]
    fn default_jitter_stays_in_range() {
        let standard = Standard::new(Config::default().with_max_attempts(10));
        let mut policy = standard.new_request_policy();
        let mut cap = Duration::from_millis(50);
        while let Some(dur) = policy.should_retry(&server_error()) {
            assert!(dur <= cap, "{:?} exceeds {:?}", dur, cap);
            assert!(dur >= cap / 2, "{:?} below half of {:?}", dur, cap);
            cap *= 2;
        }
        assert_eq!(policy.retries(), 9);
    }

    #[test]
    fn explicit_delay_is_capped() {
        let standard = Standard::new(test_config().with_max_backoff(Duration::from_secs(3)));
        let mut policy = standard.new_request_policy();
        let dur = policy
            .should_retry(&RetryKind::Explicit(Duration::from_secs(60)))
            .expect("should retry");
        assert_eq!(dur, Duration::from_secs(3));
    }

    #[test]
    fn not_retryable_is_final() {
        let standard = Standard::new(test_config());
        let mut policy = standard.new_request_policy();
        assert!(policy.should_retry(&RetryKind::NotRetryable).is_none());
        assert_eq!(standard.quota_available(), 500);
    }

    #[test]
    fn disabled_never_retries() {
        let standard = Standard::new(Config::disabled());
        let mut policy = standard.new_request_policy();
        assert!(policy.should_retry(&server_error()).is_none());
    }
}
