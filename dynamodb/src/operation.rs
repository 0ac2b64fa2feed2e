/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Operation descriptors and request construction.
//!
//! Every input type implements [`DynamoDbOperation`], which ties it to its output type and to a
//! static [`OperationDescriptor`]. [`make_operation`] turns a validated input into a signed-ready
//! [`Operation`] for the client.

use crate::config::Config;
use crate::error::{ErrorKind, ServiceError};
use crate::input::*;
use crate::json_errors::parse_service_error;
use crate::output::*;
use crate::validate::{Validate, ValidationError};
use aws_endpoint::set_endpoint_resolver;
use aws_hyper::user_agent::{ApiMetadata, AwsUserAgent};
use aws_sig_auth::middleware::set_provider;
use aws_types::SigningService;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use smithy_http::body::SdkBody;
use smithy_http::operation::{self, Metadata, Operation};
use smithy_http::response::ParseStrictResponse;
use smithy_http::retry::DefaultResponseClassifier;
use std::fmt;
use std::marker::PhantomData;

/// Signing name and metadata service name
pub const SERVICE_NAME: &str = "dynamodb";

/// `content-type` of every request
pub const CONTENT_TYPE: &str = "application/x-amz-json-1.0";

pub(crate) const API_METADATA: ApiMetadata = ApiMetadata::new("dynamodb", env!("CARGO_PKG_VERSION"));

/// Static metadata of one API operation
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub http_method: &'static str,
    pub uri: &'static str,
    /// Value of the `x-amz-target` header
    pub target: &'static str,
    /// Whether a failed attempt may be repeated when the request carries no idempotency token
    pub retry_safe: bool,
    /// Modeled error kinds. Any call can additionally fail with `Validation`, `Transport`,
    /// `Cancelled`, `Service`, `InternalServer` or `RequestLimitExceeded`.
    pub errors: &'static [ErrorKind],
}

impl OperationDescriptor {
    /// Whether this operation's error set includes `kind`
    pub fn may_return(&self, kind: ErrorKind) -> bool {
        self.errors.contains(&kind)
    }
}

/// An operation input
pub trait DynamoDbOperation: Serialize + Validate + Send + Sync + 'static {
    type Output: DeserializeOwned + Send + 'static;

    const DESCRIPTOR: &'static OperationDescriptor;

    /// The idempotency token member, for operations that have one
    fn idempotency_token(&self) -> Option<&Option<String>> {
        None
    }

    fn idempotency_token_mut(&mut self) -> Option<&mut Option<String>> {
        None
    }

    /// Whether a failed attempt of this call may be repeated.
    ///
    /// An idempotency token makes any operation safe to retry: every attempt carries the same
    /// token, so the service applies the request at most once. Requests are built with a
    /// generated token when the caller does not supply one.
    fn retry_safe(&self) -> bool {
        Self::DESCRIPTOR.retry_safe || matches!(self.idempotency_token(), Some(Some(_)))
    }
}

macro_rules! operations {
    (
        $(
            $name:ident($input:ty => $output:ty) {
                retry_safe: $safe:expr,
                $(token: $token:ident,)?
                errors: [$($err:ident),* $(,)?] $(,)?
            }
        ),* $(,)?
    ) => {
        $(
            impl DynamoDbOperation for $input {
                type Output = $output;

                const DESCRIPTOR: &'static OperationDescriptor = &OperationDescriptor {
                    name: stringify!($name),
                    http_method: "POST",
                    uri: "/",
                    target: concat!("DynamoDB_20120810.", stringify!($name)),
                    retry_safe: $safe,
                    errors: &[$(ErrorKind::$err),*],
                };

                $(
                    fn idempotency_token(&self) -> Option<&Option<String>> {
                        Some(&self.$token)
                    }

                    fn idempotency_token_mut(&mut self) -> Option<&mut Option<String>> {
                        Some(&mut self.$token)
                    }
                )?
            }
        )*

        /// Every operation descriptor, in alphabetical order
        pub const DESCRIPTORS: &[&OperationDescriptor] = &[
            $( <$input as DynamoDbOperation>::DESCRIPTOR, )*
        ];
    };
}

operations! {
    BatchExecuteStatement(BatchExecuteStatementInput => BatchExecuteStatementOutput) {
        retry_safe: false,
        errors: [],
    },
    BatchGetItem(BatchGetItemInput => BatchGetItemOutput) {
        retry_safe: true,
        errors: [ProvisionedThroughputExceeded, ResourceNotFound],
    },
    BatchWriteItem(BatchWriteItemInput => BatchWriteItemOutput) {
        retry_safe: true,
        errors: [ItemCollectionSizeLimitExceeded, ProvisionedThroughputExceeded, ResourceNotFound],
    },
    CreateBackup(CreateBackupInput => CreateBackupOutput) {
        retry_safe: false,
        errors: [ResourceInUse, ResourceNotFound, LimitExceeded, Validation],
    },
    CreateGlobalTable(CreateGlobalTableInput => CreateGlobalTableOutput) {
        retry_safe: true,
        errors: [LimitExceeded, ResourceInUse, ResourceNotFound],
    },
    CreateTable(CreateTableInput => CreateTableOutput) {
        retry_safe: true,
        errors: [LimitExceeded, ResourceInUse],
    },
    DeleteBackup(DeleteBackupInput => DeleteBackupOutput) {
        retry_safe: true,
        errors: [ResourceInUse, ResourceNotFound, LimitExceeded],
    },
    DeleteItem(DeleteItemInput => DeleteItemOutput) {
        retry_safe: true,
        errors: [
            ConditionalCheckFailed,
            ItemCollectionSizeLimitExceeded,
            ProvisionedThroughputExceeded,
            ResourceNotFound,
            TransactionInProgress,
        ],
    },
    DeleteTable(DeleteTableInput => DeleteTableOutput) {
        retry_safe: true,
        errors: [LimitExceeded, ResourceInUse, ResourceNotFound],
    },
    DescribeBackup(DescribeBackupInput => DescribeBackupOutput) {
        retry_safe: true,
        errors: [ResourceNotFound],
    },
    DescribeContinuousBackups(DescribeContinuousBackupsInput => DescribeContinuousBackupsOutput) {
        retry_safe: true,
        errors: [ResourceNotFound],
    },
    DescribeContributorInsights(DescribeContributorInsightsInput => DescribeContributorInsightsOutput) {
        retry_safe: true,
        errors: [ResourceNotFound],
    },
    DescribeEndpoints(DescribeEndpointsInput => DescribeEndpointsOutput) {
        retry_safe: true,
        errors: [],
    },
    DescribeExport(DescribeExportInput => DescribeExportOutput) {
        retry_safe: true,
        errors: [ResourceNotFound, LimitExceeded],
    },
    DescribeGlobalTable(DescribeGlobalTableInput => DescribeGlobalTableOutput) {
        retry_safe: true,
        errors: [ResourceNotFound],
    },
    DescribeGlobalTableSettings(DescribeGlobalTableSettingsInput => DescribeGlobalTableSettingsOutput) {
        retry_safe: true,
        errors: [ResourceNotFound],
    },
    DescribeImport(DescribeImportInput => DescribeImportOutput) {
        retry_safe: true,
        errors: [ResourceNotFound],
    },
    DescribeKinesisStreamingDestination(DescribeKinesisStreamingDestinationInput => DescribeKinesisStreamingDestinationOutput) {
        retry_safe: true,
        errors: [ResourceNotFound],
    },
    DescribeLimits(DescribeLimitsInput => DescribeLimitsOutput) {
        retry_safe: true,
        errors: [],
    },
    DescribeTable(DescribeTableInput => DescribeTableOutput) {
        retry_safe: true,
        errors: [ResourceNotFound],
    },
    DescribeTableReplicaAutoScaling(DescribeTableReplicaAutoScalingInput => DescribeTableReplicaAutoScalingOutput) {
        retry_safe: true,
        errors: [ResourceNotFound],
    },
    DescribeTimeToLive(DescribeTimeToLiveInput => DescribeTimeToLiveOutput) {
        retry_safe: true,
        errors: [ResourceNotFound],
    },
    DisableKinesisStreamingDestination(DisableKinesisStreamingDestinationInput => DisableKinesisStreamingDestinationOutput) {
        retry_safe: true,
        errors: [LimitExceeded, ResourceInUse, ResourceNotFound],
    },
    EnableKinesisStreamingDestination(EnableKinesisStreamingDestinationInput => EnableKinesisStreamingDestinationOutput) {
        retry_safe: true,
        errors: [LimitExceeded, ResourceInUse, ResourceNotFound],
    },
    ExecuteStatement(ExecuteStatementInput => ExecuteStatementOutput) {
        retry_safe: false,
        errors: [
            ConditionalCheckFailed,
            ResourceInUse,
            ItemCollectionSizeLimitExceeded,
            ProvisionedThroughputExceeded,
            ResourceNotFound,
            TransactionInProgress,
        ],
    },
    ExecuteTransaction(ExecuteTransactionInput => ExecuteTransactionOutput) {
        retry_safe: false,
        token: client_request_token,
        errors: [
            IdempotentParameterMismatch,
            ProvisionedThroughputExceeded,
            ResourceNotFound,
            TransactionCanceled,
            TransactionInProgress,
        ],
    },
    ExportTableToPointInTime(ExportTableToPointInTimeInput => ExportTableToPointInTimeOutput) {
        retry_safe: false,
        token: client_token,
        errors: [ResourceInUse, Validation, LimitExceeded, ResourceNotFound],
    },
    GetItem(GetItemInput => GetItemOutput) {
        retry_safe: true,
        errors: [ProvisionedThroughputExceeded, ResourceNotFound],
    },
    ImportTable(ImportTableInput => ImportTableOutput) {
        retry_safe: false,
        token: client_token,
        errors: [ResourceInUse, LimitExceeded],
    },
    ListBackups(ListBackupsInput => ListBackupsOutput) {
        retry_safe: true,
        errors: [],
    },
    ListContributorInsights(ListContributorInsightsInput => ListContributorInsightsOutput) {
        retry_safe: true,
        errors: [ResourceNotFound],
    },
    ListExports(ListExportsInput => ListExportsOutput) {
        retry_safe: true,
        errors: [LimitExceeded],
    },
    ListGlobalTables(ListGlobalTablesInput => ListGlobalTablesOutput) {
        retry_safe: true,
        errors: [],
    },
    ListImports(ListImportsInput => ListImportsOutput) {
        retry_safe: true,
        errors: [LimitExceeded],
    },
    ListTables(ListTablesInput => ListTablesOutput) {
        retry_safe: true,
        errors: [],
    },
    ListTagsOfResource(ListTagsOfResourceInput => ListTagsOfResourceOutput) {
        retry_safe: true,
        errors: [ResourceNotFound],
    },
    PutItem(PutItemInput => PutItemOutput) {
        retry_safe: true,
        errors: [
            ConditionalCheckFailed,
            ItemCollectionSizeLimitExceeded,
            ProvisionedThroughputExceeded,
            ResourceNotFound,
            TransactionInProgress,
        ],
    },
    Query(QueryInput => QueryOutput) {
        retry_safe: true,
        errors: [ProvisionedThroughputExceeded, ResourceNotFound],
    },
    RestoreTableFromBackup(RestoreTableFromBackupInput => RestoreTableFromBackupOutput) {
        retry_safe: true,
        errors: [ResourceInUse, ResourceNotFound, LimitExceeded],
    },
    RestoreTableToPointInTime(RestoreTableToPointInTimeInput => RestoreTableToPointInTimeOutput) {
        retry_safe: true,
        errors: [ResourceInUse, ResourceNotFound, LimitExceeded, Validation],
    },
    Scan(ScanInput => ScanOutput) {
        retry_safe: true,
        errors: [ProvisionedThroughputExceeded, ResourceNotFound],
    },
    TagResource(TagResourceInput => TagResourceOutput) {
        retry_safe: true,
        errors: [LimitExceeded, ResourceInUse, ResourceNotFound],
    },
    TransactGetItems(TransactGetItemsInput => TransactGetItemsOutput) {
        retry_safe: true,
        errors: [ProvisionedThroughputExceeded, ResourceNotFound, TransactionCanceled],
    },
    TransactWriteItems(TransactWriteItemsInput => TransactWriteItemsOutput) {
        retry_safe: false,
        token: client_request_token,
        errors: [
            IdempotentParameterMismatch,
            ProvisionedThroughputExceeded,
            ResourceNotFound,
            TransactionCanceled,
            TransactionInProgress,
        ],
    },
    UntagResource(UntagResourceInput => UntagResourceOutput) {
        retry_safe: true,
        errors: [LimitExceeded, ResourceInUse, ResourceNotFound],
    },
    UpdateContinuousBackups(UpdateContinuousBackupsInput => UpdateContinuousBackupsOutput) {
        retry_safe: true,
        errors: [ResourceNotFound, Validation],
    },
    UpdateContributorInsights(UpdateContributorInsightsInput => UpdateContributorInsightsOutput) {
        retry_safe: true,
        errors: [ResourceNotFound],
    },
    UpdateGlobalTable(UpdateGlobalTableInput => UpdateGlobalTableOutput) {
        retry_safe: true,
        errors: [ResourceNotFound, ResourceInUse],
    },
    UpdateGlobalTableSettings(UpdateGlobalTableSettingsInput => UpdateGlobalTableSettingsOutput) {
        retry_safe: true,
        errors: [ResourceNotFound, LimitExceeded, ResourceInUse],
    },
    UpdateItem(UpdateItemInput => UpdateItemOutput) {
        retry_safe: false,
        errors: [
            ConditionalCheckFailed,
            ItemCollectionSizeLimitExceeded,
            ProvisionedThroughputExceeded,
            ResourceNotFound,
            TransactionInProgress,
        ],
    },
    UpdateTable(UpdateTableInput => UpdateTableOutput) {
        retry_safe: true,
        errors: [LimitExceeded, ResourceInUse, ResourceNotFound],
    },
    UpdateTableReplicaAutoScaling(UpdateTableReplicaAutoScalingInput => UpdateTableReplicaAutoScalingOutput) {
        retry_safe: true,
        errors: [LimitExceeded, ResourceInUse, ResourceNotFound],
    },
    UpdateTimeToLive(UpdateTimeToLiveInput => UpdateTimeToLiveOutput) {
        retry_safe: true,
        errors: [LimitExceeded, ResourceInUse, ResourceNotFound],
    },
}

/// Look up an operation descriptor by operation name
pub fn descriptor(name: &str) -> Option<&'static OperationDescriptor> {
    DESCRIPTORS
        .iter()
        .copied()
        .find(|descriptor| descriptor.name == name)
}

/// Format 128 random bits as a version 4 UUID
pub(crate) fn uuid_v4(input: u128) -> String {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(36);
    // index of the next random nibble
    let mut rnd_idx: u32 = 0;
    for str_idx in 0..36 {
        if str_idx == 8 || str_idx == 13 || str_idx == 18 || str_idx == 23 {
            out.push('-');
        } else if str_idx == 14 {
            out.push('4');
        } else {
            let mut nibble = ((input >> (rnd_idx * 4)) & 0x0F) as u8;
            // RFC 4122 variant
            if str_idx == 19 {
                nibble = (nibble & 0b0011) | 0b1000;
            }
            rnd_idx += 1;
            out.push(HEX_CHARS[nibble as usize] as char);
        }
    }
    out
}

/// Fill the idempotency token if the operation has one and the caller did not set it
fn fill_idempotency_token<I: DynamoDbOperation>(input: &mut I) {
    if let Some(token) = input.idempotency_token_mut() {
        if token.is_none() {
            *token = Some(uuid_v4(fastrand::u128(..)));
        }
    }
}

/// Failure to construct a request. No request was sent.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to serialize the request body: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to build the HTTP request: {0}")]
    Http(#[from] http::Error),
}

/// Response handler that deserializes `O` from a successful response body
pub struct ParseResponse<O> {
    _output: PhantomData<fn() -> O>,
}

impl<O> ParseResponse<O> {
    pub fn new() -> Self {
        ParseResponse {
            _output: PhantomData,
        }
    }
}

impl<O> Default for ParseResponse<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> Clone for ParseResponse<O> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<O> fmt::Debug for ParseResponse<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseResponse")
            .field("output", &std::any::type_name::<O>())
            .finish()
    }
}

impl<O> ParseStrictResponse for ParseResponse<O>
where
    O: DeserializeOwned,
{
    type Output = Result<O, ServiceError>;

    fn parse(&self, response: &http::Response<Bytes>) -> Self::Output {
        if !response.status().is_success() {
            return Err(parse_service_error(response));
        }
        let body: &[u8] = match response.body().as_ref() {
            b"" => b"{}",
            body => body,
        };
        serde_json::from_slice(body).map_err(|err| {
            let mut builder = ServiceError::builder()
                .kind(ErrorKind::Service)
                .message("the response body could not be deserialized")
                .source(err);
            if let Some(request_id) = crate::json_errors::request_id(response.headers()) {
                builder = builder.request_id(request_id);
            }
            builder.build()
        })
    }
}

/// Build the [`Operation`] for one call.
///
/// Validation and idempotency token generation happen here, so a failure never reaches the
/// network. The property bag is filled from `config` for the endpoint, user agent and signing
/// stages.
pub fn make_operation<I>(
    mut input: I,
    config: &Config,
) -> Result<Operation<ParseResponse<I::Output>, DefaultResponseClassifier>, BuildError>
where
    I: DynamoDbOperation,
{
    input.validate()?;
    fill_idempotency_token(&mut input);
    let retry_safe = input.retry_safe();
    let descriptor = I::DESCRIPTOR;
    let body = serde_json::to_vec(&input)?;
    let request = http::Request::builder()
        .method(descriptor.http_method)
        .uri(descriptor.uri)
        .header(http::header::CONTENT_TYPE, CONTENT_TYPE)
        .header("x-amz-target", descriptor.target)
        .header(http::header::CONTENT_LENGTH, body.len())
        .body(SdkBody::from(body))?;
    let request = operation::Request::new(request).augment(|request, properties| {
        if let Some(region) = config.region() {
            properties.insert(region.clone());
        }
        properties.insert(SigningService::from_static(SERVICE_NAME));
        set_endpoint_resolver(properties, config.endpoint_resolver.clone());
        set_provider(properties, config.credentials_provider.clone());
        properties.insert(AwsUserAgent::new_from_environment(API_METADATA));
        if let Some(time) = config.request_time {
            properties.insert(time);
        }
        Result::<_, std::convert::Infallible>::Ok(request)
    });
    let request = match request {
        Ok(request) => request,
        Err(never) => match never {},
    };
    Ok(Operation::new(request, ParseResponse::new())
        .with_metadata(Metadata::new(descriptor.name, SERVICE_NAME))
        .with_retry_policy(DefaultResponseClassifier::new(retry_safe)))
}
