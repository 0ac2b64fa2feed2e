/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Errors returned by the DynamoDB client.
//!
//! Every failed call produces exactly one [`SdkError<ServiceError>`](smithy_http::result::SdkError).
//! [`ErrorKindExt::kind`] projects any such error onto the closed [`ErrorKind`] taxonomy.

use crate::json_errors::sanitize_error_code;
use crate::model::CancellationReason;
use crate::operation::BuildError;
use crate::validate::ValidationError;
use smithy_http::result::SdkError;
use smithy_types::retry::{ErrorKind as RetryErrorKind, ProvideErrorKind};
use std::error::Error;
use std::fmt;
use std::time::Duration;

type BoxError = Box<dyn Error + Send + Sync>;

/// The kind of a failed call
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// The request was malformed or missing required members. No request was sent.
    Validation,
    ConditionalCheckFailed,
    ResourceNotFound,
    ResourceInUse,
    ProvisionedThroughputExceeded,
    /// Account level throttling
    RequestLimitExceeded,
    ItemCollectionSizeLimitExceeded,
    TransactionCanceled,
    TransactionInProgress,
    IdempotentParameterMismatch,
    LimitExceeded,
    /// Connection failures and timeouts below the service layer
    Transport,
    Cancelled,
    /// An error code this client does not recognize
    Service,
    InternalServer,
}

impl ErrorKind {
    /// Whether the client's retry policy may retry an error of this kind
    pub fn is_retry_eligible(&self) -> bool {
        self.retry_kind().is_some()
    }

    fn retry_kind(&self) -> Option<RetryErrorKind> {
        match self {
            ErrorKind::RequestLimitExceeded | ErrorKind::ProvisionedThroughputExceeded => {
                Some(RetryErrorKind::ThrottlingError)
            }
            ErrorKind::InternalServer => Some(RetryErrorKind::ServerError),
            ErrorKind::Transport => Some(RetryErrorKind::TransientError),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Map an HTTP status and wire error code onto an [`ErrorKind`].
///
/// Total: unknown codes are `Service`; a response without a code is `InternalServer` for
/// 5xx statuses and `Service` otherwise.
pub fn map_error(status: u16, code: Option<&str>) -> ErrorKind {
    let code = match code.map(sanitize_error_code).filter(|code| !code.is_empty()) {
        Some(code) => code,
        None if status >= 500 => return ErrorKind::InternalServer,
        None => return ErrorKind::Service,
    };
    match code {
        "ValidationException"
        | "SerializationException"
        | "InvalidRestoreTimeException"
        | "InvalidExportTimeException"
        | "PointInTimeRecoveryUnavailableException"
        | "ContinuousBackupsUnavailableException" => ErrorKind::Validation,
        "ConditionalCheckFailedException" | "DuplicateItemException" => {
            ErrorKind::ConditionalCheckFailed
        }
        "ResourceNotFoundException"
        | "TableNotFoundException"
        | "BackupNotFoundException"
        | "GlobalTableNotFoundException"
        | "ReplicaNotFoundException"
        | "IndexNotFoundException"
        | "ExportNotFoundException"
        | "ImportNotFoundException" => ErrorKind::ResourceNotFound,
        "ResourceInUseException"
        | "TableInUseException"
        | "BackupInUseException"
        | "TableAlreadyExistsException"
        | "GlobalTableAlreadyExistsException"
        | "ReplicaAlreadyExistsException"
        | "ExportConflictException"
        | "ImportConflictException" => ErrorKind::ResourceInUse,
        "ProvisionedThroughputExceededException" => ErrorKind::ProvisionedThroughputExceeded,
        "RequestLimitExceeded" | "ThrottlingException" => ErrorKind::RequestLimitExceeded,
        "ItemCollectionSizeLimitExceededException" => ErrorKind::ItemCollectionSizeLimitExceeded,
        "TransactionCanceledException" => ErrorKind::TransactionCanceled,
        "TransactionInProgressException" | "TransactionConflictException" => {
            ErrorKind::TransactionInProgress
        }
        "IdempotentParameterMismatchException" => ErrorKind::IdempotentParameterMismatch,
        "LimitExceededException" => ErrorKind::LimitExceeded,
        "InternalServerError"
        | "InternalServerException"
        | "InternalFailure"
        | "ServiceUnavailable"
        | "ServiceUnavailableException" => ErrorKind::InternalServer,
        _ => ErrorKind::Service,
    }
}

/// An error response from DynamoDB, or a response that could not be understood
#[derive(Debug)]
pub struct ServiceError {
    kind: ErrorKind,
    code: Option<String>,
    message: Option<String>,
    request_id: Option<String>,
    retry_after: Option<Duration>,
    cancellation_reasons: Vec<CancellationReason>,
    source: Option<BoxError>,
}

impl ServiceError {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// An error for a response that could not be deserialized
    pub fn unhandled(source: impl Into<BoxError>) -> Self {
        Self::builder().source(source).build()
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// The delay requested by the service before the next attempt, if any
    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_after
    }

    /// Per-action reasons of a `TransactionCanceledException`, in request order
    pub fn cancellation_reasons(&self) -> &[CancellationReason] {
        &self.cancellation_reasons
    }

    pub fn is_conditional_check_failed(&self) -> bool {
        self.kind == ErrorKind::ConditionalCheckFailed
    }

    pub fn is_resource_not_found(&self) -> bool {
        self.kind == ErrorKind::ResourceNotFound
    }

    pub fn is_throttling(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::RequestLimitExceeded | ErrorKind::ProvisionedThroughputExceeded
        )
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{}", code)?,
            None => write!(f, "{}", self.kind)?,
        }
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        } else if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|err| err.as_ref() as _)
    }
}

impl ProvideErrorKind for ServiceError {
    fn retryable_error_kind(&self) -> Option<RetryErrorKind> {
        self.kind.retry_kind()
    }

    fn code(&self) -> Option<&str> {
        ServiceError::code(self)
    }
}

/// Builder for [`ServiceError`]
#[derive(Debug, Default)]
pub struct Builder {
    kind: Option<ErrorKind>,
    code: Option<String>,
    message: Option<String>,
    request_id: Option<String>,
    retry_after: Option<Duration>,
    cancellation_reasons: Vec<CancellationReason>,
    source: Option<BoxError>,
}

impl Builder {
    pub fn kind(mut self, kind: ErrorKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn retry_after(mut self, retry_after: Duration) -> Self {
        self.retry_after = Some(retry_after);
        self
    }

    pub fn cancellation_reasons(mut self, reasons: Vec<CancellationReason>) -> Self {
        self.cancellation_reasons = reasons;
        self
    }

    pub fn source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Build the error. Without an explicit kind, the kind is derived from the code.
    pub fn build(self) -> ServiceError {
        let kind = match self.kind {
            Some(kind) => kind,
            None => map_error(400, self.code.as_deref()),
        };
        ServiceError {
            kind,
            code: self.code,
            message: self.message,
            request_id: self.request_id,
            retry_after: self.retry_after,
            cancellation_reasons: self.cancellation_reasons,
            source: self.source,
        }
    }
}

/// Invalid input is `Validation`. Any other construction failure (credentials, endpoint
/// resolution, signing, a body that cannot be replayed) kept the request from being sent and is
/// reported as `Transport`.
fn construction_kind(err: &(dyn Error + Send + Sync + 'static)) -> ErrorKind {
    let invalid_input = matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::Validation(_)) | Some(BuildError::Serialization(_))
    ) || err.is::<ValidationError>();
    if invalid_input {
        ErrorKind::Validation
    } else {
        ErrorKind::Transport
    }
}

/// Project a failed call onto the closed [`ErrorKind`] taxonomy
pub trait ErrorKindExt {
    fn kind(&self) -> ErrorKind;
}

impl ErrorKindExt for SdkError<ServiceError> {
    fn kind(&self) -> ErrorKind {
        match self {
            SdkError::ConstructionFailure(err) => construction_kind(err.as_ref()),
            SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => ErrorKind::Transport,
            SdkError::ResponseError { .. } => ErrorKind::Service,
            SdkError::ServiceError { err, .. } => err.kind(),
            SdkError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::error::{map_error, ErrorKind, ErrorKindExt, ServiceError};
    use crate::operation::BuildError;
    use crate::validate::ValidationError;
    use proptest::prelude::*;
    use smithy_http::body::SdkBody;
    use smithy_http::result::SdkError;
    use smithy_types::retry::{ErrorKind as RetryErrorKind, ProvideErrorKind};

    #[test]
    fn known_codes() {
        let cases = [
            ("ConditionalCheckFailedException", ErrorKind::ConditionalCheckFailed),
            ("DuplicateItemException", ErrorKind::ConditionalCheckFailed),
            ("BackupNotFoundException", ErrorKind::ResourceNotFound),
            ("TableNotFoundException", ErrorKind::ResourceNotFound),
            ("BackupInUseException", ErrorKind::ResourceInUse),
            ("ExportConflictException", ErrorKind::ResourceInUse),
            ("ThrottlingException", ErrorKind::RequestLimitExceeded),
            ("RequestLimitExceeded", ErrorKind::RequestLimitExceeded),
            (
                "ProvisionedThroughputExceededException",
                ErrorKind::ProvisionedThroughputExceeded,
            ),
            ("TransactionConflictException", ErrorKind::TransactionInProgress),
            ("TransactionCanceledException", ErrorKind::TransactionCanceled),
            ("SerializationException", ErrorKind::Validation),
            ("InternalServerError", ErrorKind::InternalServer),
            (
                "com.amazonaws.dynamodb.v20120810#LimitExceededException",
                ErrorKind::LimitExceeded,
            ),
        ];
        for (code, kind) in &cases {
            assert_eq!(map_error(400, Some(code)), *kind, "{}", code);
        }
    }

    #[test]
    fn unknown_codes_are_service_errors() {
        assert_eq!(
            map_error(400, Some("BrandNewException")),
            ErrorKind::Service
        );
        assert_eq!(map_error(500, Some("BrandNewException")), ErrorKind::Service);
        assert_eq!(map_error(500, None), ErrorKind::InternalServer);
        assert_eq!(map_error(404, None), ErrorKind::Service);
        assert_eq!(map_error(503, Some("")), ErrorKind::InternalServer);
    }

    #[test]
    fn display_uses_code_and_message() {
        let err = ServiceError::builder()
            .code("ResourceNotFoundException")
            .message("Requested resource not found")
            .build();
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
        assert_eq!(
            err.to_string(),
            "ResourceNotFoundException: Requested resource not found"
        );
        let err = ServiceError::builder().kind(ErrorKind::InternalServer).build();
        assert_eq!(err.to_string(), "InternalServer");
    }

    #[test]
    fn retry_eligibility() {
        let throttled = ServiceError::builder().code("ThrottlingException").build();
        assert_eq!(
            throttled.retryable_error_kind(),
            Some(RetryErrorKind::ThrottlingError)
        );
        let server = ServiceError::builder().kind(ErrorKind::InternalServer).build();
        assert_eq!(
            server.retryable_error_kind(),
            Some(RetryErrorKind::ServerError)
        );
        let conditional = ServiceError::builder()
            .code("ConditionalCheckFailedException")
            .build();
        assert_eq!(conditional.retryable_error_kind(), None);
        assert!(!ErrorKind::Validation.is_retry_eligible());
        assert!(!ErrorKind::Cancelled.is_retry_eligible());
        assert!(ErrorKind::Transport.is_retry_eligible());
    }

    #[test]
    fn sdk_errors_project_onto_kinds() {
        let raw = || {
            http::Response::builder()
                .status(400)
                .body(SdkBody::empty())
                .unwrap()
        };
        let cases: Vec<(SdkError<ServiceError>, ErrorKind)> = vec![
            (
                SdkError::ConstructionFailure(
                    BuildError::from(ValidationError::new("TableName", "is required")).into(),
                ),
                ErrorKind::Validation,
            ),
            (
                SdkError::ConstructionFailure(ValidationError::new("Key", "is required").into()),
                ErrorKind::Validation,
            ),
            (
                SdkError::ConstructionFailure("No credentials provider in the property bag".into()),
                ErrorKind::Transport,
            ),
            (SdkError::TimeoutError("slow".into()), ErrorKind::Transport),
            (SdkError::DispatchFailure("reset".into()), ErrorKind::Transport),
            (
                SdkError::ResponseError {
                    raw: raw(),
                    err: "truncated".into(),
                },
                ErrorKind::Service,
            ),
            (
                SdkError::ServiceError {
                    raw: raw(),
                    err: ServiceError::builder().code("LimitExceededException").build(),
                },
                ErrorKind::LimitExceeded,
            ),
            (SdkError::Cancelled, ErrorKind::Cancelled),
        ];
        for (err, kind) in cases {
            assert_eq!(err.kind(), kind);
        }
    }

    proptest! {
        #[test]
        fn mapping_is_total(status in 100u16..600, code in proptest::option::of(".*")) {
            let kind = map_error(status, code.as_deref());
            if code.is_none() && status >= 500 {
                prop_assert_eq!(kind, ErrorKind::InternalServer);
            }
        }

        #[test]
        fn unrecognized_codes_are_service(code in "[a-z]{1,20}Unrecognized") {
            prop_assert_eq!(map_error(400, Some(&code)), ErrorKind::Service);
        }
    }
}
