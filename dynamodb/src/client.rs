/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::config::Config;
use crate::error::ServiceError;
use crate::handle::CallHandle;
use crate::input::*;
use crate::operation::{make_operation, DynamoDbOperation};
use crate::paginator::{Paginate, Paginator};
use aws_hyper::{AwsMiddleware, BoxError};
use smithy_async::rt::sleep::{default_async_sleep, SharedAsyncSleep};
use smithy_client::SdkError;
use smithy_http::body::SdkBody;
use std::sync::Arc;
use tower::Service;

#[derive(Debug)]
pub(crate) struct Handle {
    pub(crate) client: aws_hyper::Client,
    pub(crate) conf: Config,
    pub(crate) sleep_impl: Option<SharedAsyncSleep>,
}

/// Client for Amazon DynamoDB
///
/// Every operation is an async method taking the operation's input. Inputs are validated before
/// anything is sent; failed attempts are retried according to the [retry
/// configuration](crate::config::Builder::retry_config) when the operation is safe to repeat.
///
/// The client is cheap to clone and can be shared between tasks. Clones share the connection
/// pool and the retry quota.
#[derive(Clone, Debug)]
pub struct Client {
    handle: Arc<Handle>,
}

impl Client {
    /// A client that connects over HTTPS
    #[cfg(feature = "rustls")]
    pub fn from_conf(conf: Config) -> Self {
        Self::from_builder(aws_hyper::builder().rustls(), conf)
    }

    /// A client that sends every request through `conn`
    pub fn from_conf_conn<C>(conf: Config, conn: C) -> Self
    where
        C: Service<http::Request<SdkBody>, Response = http::Response<SdkBody>>
            + Clone
            + Send
            + 'static,
        C::Error: Into<BoxError> + Send + Sync + 'static,
        C::Future: Send + 'static,
    {
        Self::from_builder(aws_hyper::builder().connector(conn), conf)
    }

    fn from_builder<C>(builder: smithy_client::Builder<C, AwsMiddleware>, conf: Config) -> Self
    where
        C: Service<http::Request<SdkBody>, Response = http::Response<SdkBody>>
            + Clone
            + Send
            + 'static,
        C::Error: Into<BoxError> + Send + Sync + 'static,
        C::Future: Send + 'static,
    {
        let sleep_impl = conf.sleep_impl.clone().or_else(default_async_sleep);
        let mut builder = builder
            .retry_config(conf.retry_config.clone())
            .timeout_config(conf.timeout_config.clone());
        if let Some(sleep_impl) = &sleep_impl {
            builder = builder.sleep_impl(sleep_impl.clone());
        }
        Client {
            handle: Arc::new(Handle {
                client: builder.build(),
                conf,
                sleep_impl,
            }),
        }
    }

    pub fn conf(&self) -> &Config {
        &self.handle.conf
    }

    pub(crate) fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Invoke any operation
    ///
    /// Invalid input fails with [`SdkError::ConstructionFailure`] before any request is sent.
    pub async fn send<I>(&self, input: I) -> Result<I::Output, SdkError<ServiceError>>
    where
        I: DynamoDbOperation,
    {
        let op = make_operation(input, &self.handle.conf).map_err(|err| {
            tracing::debug!(operation = I::DESCRIPTOR.name, error = %err, "failed to construct request");
            SdkError::ConstructionFailure(err.into())
        })?;
        self.handle.client.call(op).await
    }

    /// Run a call on a Tokio task. The returned handle can cancel it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<I>(&self, input: I) -> CallHandle<I::Output>
    where
        I: DynamoDbOperation,
    {
        let client = self.clone();
        CallHandle::spawn(async move { client.send(input).await })
    }

    /// Run a call on a Tokio task and pass its result to `callback`
    ///
    /// `callback` is invoked exactly once: with the result of the call, or with
    /// [`SdkError::Cancelled`] if the handle is cancelled first.
    pub fn spawn_with_callback<I, F>(&self, input: I, callback: F) -> CallHandle<()>
    where
        I: DynamoDbOperation,
        F: FnOnce(Result<I::Output, SdkError<ServiceError>>) + Send + 'static,
    {
        let client = self.clone();
        CallHandle::spawn_with_callback(async move { client.send(input).await }, callback)
    }

    /// Page through the results of `input`, starting at its current position
    pub fn paginate<I>(&self, input: I) -> Paginator<I>
    where
        I: Paginate,
    {
        Paginator::new(self.clone(), input)
    }
}

macro_rules! operation_methods {
    ($($method:ident($input:ty)),* $(,)?) => {
        impl Client {
            $(
                #[doc = concat!("Invoke `", stringify!($input), "`'s operation")]
                pub async fn $method(
                    &self,
                    input: $input,
                ) -> Result<<$input as DynamoDbOperation>::Output, SdkError<ServiceError>> {
                    self.send(input).await
                }
            )*
        }
    };
}

operation_methods! {
    batch_execute_statement(BatchExecuteStatementInput),
    batch_get_item(BatchGetItemInput),
    batch_write_item(BatchWriteItemInput),
    create_backup(CreateBackupInput),
    create_global_table(CreateGlobalTableInput),
    create_table(CreateTableInput),
    delete_backup(DeleteBackupInput),
    delete_item(DeleteItemInput),
    delete_table(DeleteTableInput),
    describe_backup(DescribeBackupInput),
    describe_continuous_backups(DescribeContinuousBackupsInput),
    describe_contributor_insights(DescribeContributorInsightsInput),
    describe_endpoints(DescribeEndpointsInput),
    describe_export(DescribeExportInput),
    describe_global_table(DescribeGlobalTableInput),
    describe_global_table_settings(DescribeGlobalTableSettingsInput),
    describe_import(DescribeImportInput),
    describe_kinesis_streaming_destination(DescribeKinesisStreamingDestinationInput),
    describe_limits(DescribeLimitsInput),
    describe_table(DescribeTableInput),
    describe_table_replica_auto_scaling(DescribeTableReplicaAutoScalingInput),
    describe_time_to_live(DescribeTimeToLiveInput),
    disable_kinesis_streaming_destination(DisableKinesisStreamingDestinationInput),
    enable_kinesis_streaming_destination(EnableKinesisStreamingDestinationInput),
    execute_statement(ExecuteStatementInput),
    execute_transaction(ExecuteTransactionInput),
    export_table_to_point_in_time(ExportTableToPointInTimeInput),
    get_item(GetItemInput),
    import_table(ImportTableInput),
    list_backups(ListBackupsInput),
    list_contributor_insights(ListContributorInsightsInput),
    list_exports(ListExportsInput),
    list_global_tables(ListGlobalTablesInput),
    list_imports(ListImportsInput),
    list_tables(ListTablesInput),
    list_tags_of_resource(ListTagsOfResourceInput),
    put_item(PutItemInput),
    query(QueryInput),
    restore_table_from_backup(RestoreTableFromBackupInput),
    restore_table_to_point_in_time(RestoreTableToPointInTimeInput),
    scan(ScanInput),
    tag_resource(TagResourceInput),
    transact_get_items(TransactGetItemsInput),
    transact_write_items(TransactWriteItemsInput),
    untag_resource(UntagResourceInput),
    update_continuous_backups(UpdateContinuousBackupsInput),
    update_contributor_insights(UpdateContributorInsightsInput),
    update_global_table(UpdateGlobalTableInput),
    update_global_table_settings(UpdateGlobalTableSettingsInput),
    update_item(UpdateItemInput),
    update_table(UpdateTableInput),
    update_table_replica_auto_scaling(UpdateTableReplicaAutoScalingInput),
    update_time_to_live(UpdateTimeToLiveInput),
}
