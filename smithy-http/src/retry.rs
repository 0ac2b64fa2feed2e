/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! HTTP specific retry behaviors
//!
//! For protocol agnostic retries, see `smithy_types::retry`.

use crate::body::SdkBody;
use crate::result::{SdkError, SdkSuccess};
use smithy_types::retry::{ErrorKind, ProvideErrorKind, RetryKind};
use std::time::Duration;

/// Decide how (and whether) the outcome of one attempt may be retried.
pub trait ClassifyResponse<T, E>: Clone {
    fn classify(&self, response: Result<&T, &E>) -> RetryKind;
}

impl<T, E> ClassifyResponse<T, E> for () {
    fn classify(&self, _: Result<&T, &E>) -> RetryKind {
        RetryKind::NotRetryable
    }
}

/// Retry classifier used by default for every operation
///
/// - Dispatch failures and attempt timeouts are `TransientError`s.
/// - Service errors are retried when the error reports a retryable [`ErrorKind`]. A `Retry-After`
///   header on such a response turns into an explicit delay.
/// - Everything else (construction failures, unparseable responses, cancellation) is final.
///
/// Operations that are not safe to repeat are constructed with `retry_safe = false` and are
/// never retried.
#[derive(Clone, Copy, Debug)]
pub struct DefaultResponseClassifier {
    retry_safe: bool,
}

impl DefaultResponseClassifier {
    pub fn new(retry_safe: bool) -> Self {
        Self { retry_safe }
    }

    pub fn retry_safe(&self) -> bool {
        self.retry_safe
    }
}

impl Default for DefaultResponseClassifier {
    fn default() -> Self {
        Self::new(true)
    }
}

fn retry_after(raw: &http::Response<SdkBody>) -> Option<Duration> {
    raw.headers()
        .get(http::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

impl<T, E> ClassifyResponse<SdkSuccess<T>, SdkError<E>> for DefaultResponseClassifier
where
    E: ProvideErrorKind,
{
    fn classify(&self, response: Result<&SdkSuccess<T>, &SdkError<E>>) -> RetryKind {
        if !self.retry_safe {
            return RetryKind::NotRetryable;
        }
        let err = match response {
            Ok(_) => return RetryKind::NotRetryable,
            Err(err) => err,
        };
        match err {
            SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
                RetryKind::Error(ErrorKind::TransientError)
            }
            SdkError::ServiceError { err, raw } => match err.retryable_error_kind() {
                Some(kind) => match retry_after(raw) {
                    Some(delay) => RetryKind::Explicit(delay),
                    None => RetryKind::Error(kind),
                },
                None => RetryKind::NotRetryable,
            },
            SdkError::ConstructionFailure(_)
            | SdkError::ResponseError { .. }
            | SdkError::Cancelled => RetryKind::NotRetryable,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::body::SdkBody;
    use crate::result::{SdkError, SdkSuccess};
    use crate::retry::{ClassifyResponse, DefaultResponseClassifier};
    use smithy_types::retry::{ErrorKind, ProvideErrorKind, RetryKind};
    use std::fmt;
    use std::time::Duration;

    #[derive(Debug)]
    struct UnmodeledError(Option<ErrorKind>);

    impl fmt::Display for UnmodeledError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "UnmodeledError")
        }
    }

    impl std::error::Error for UnmodeledError {}

    impl ProvideErrorKind for UnmodeledError {
        fn retryable_error_kind(&self) -> Option<ErrorKind> {
            self.0
        }

        fn code(&self) -> Option<&str> {
            None
        }
    }

    fn service_error(kind: Option<ErrorKind>) -> SdkError<UnmodeledError> {
        SdkError::ServiceError {
            raw: http::Response::builder()
                .status(400)
                .body(SdkBody::empty())
                .unwrap(),
            err: UnmodeledError(kind),
        }
    }

    fn classify(
        classifier: DefaultResponseClassifier,
        err: &SdkError<UnmodeledError>,
    ) -> RetryKind {
        ClassifyResponse::<SdkSuccess<()>, _>::classify(&classifier, Err(err))
    }

    #[test]
    fn transport_errors_are_transient() {
        let classifier = DefaultResponseClassifier::default();
        assert_eq!(
            classify(classifier, &SdkError::DispatchFailure("connection reset".into())),
            RetryKind::Error(ErrorKind::TransientError)
        );
        assert_eq!(
            classify(classifier, &SdkError::TimeoutError("timed out".into())),
            RetryKind::Error(ErrorKind::TransientError)
        );
    }

    #[test]
    fn modeled_errors_use_their_kind() {
        let classifier = DefaultResponseClassifier::default();
        assert_eq!(
            classify(classifier, &service_error(Some(ErrorKind::ThrottlingError))),
            RetryKind::Error(ErrorKind::ThrottlingError)
        );
        assert_eq!(
            classify(classifier, &service_error(None)),
            RetryKind::NotRetryable
        );
        assert_eq!(
            classify(classifier, &SdkError::Cancelled),
            RetryKind::NotRetryable
        );
        assert_eq!(
            classify(classifier, &SdkError::ConstructionFailure("bad".into())),
            RetryKind::NotRetryable
        );
    }

    #[test]
    fn retry_after_header_is_explicit() {
        let err = SdkError::ServiceError {
            raw: http::Response::builder()
                .status(400)
                .header("Retry-After", "2")
                .body(SdkBody::empty())
                .unwrap(),
            err: UnmodeledError(Some(ErrorKind::ThrottlingError)),
        };
        assert_eq!(
            classify(DefaultResponseClassifier::default(), &err),
            RetryKind::Explicit(Duration::from_secs(2))
        );
    }

    #[test]
    fn unsafe_operations_are_never_retried() {
        let classifier = DefaultResponseClassifier::new(false);
        assert_eq!(
            classify(classifier, &SdkError::DispatchFailure("reset".into())),
            RetryKind::NotRetryable
        );
        assert_eq!(
            classify(classifier, &service_error(Some(ErrorKind::ServerError))),
            RetryKind::NotRetryable
        );
    }
}
