/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Structural validation of operation inputs.
//!
//! Validation runs before a request is built. A failure is returned to the caller as
//! `SdkError::ConstructionFailure` and nothing is sent over the network.

use crate::input::*;
use crate::model::{BillingMode, Item, TransactWriteItem, WriteRequest};
use std::collections::HashMap;

/// Maximum number of put and delete requests in one `BatchWriteItem` call
pub const MAX_BATCH_WRITE_REQUESTS: usize = 25;

/// Maximum number of keys in one `BatchGetItem` call
pub const MAX_BATCH_GET_KEYS: usize = 100;

/// Maximum number of actions in one transaction
pub const MAX_TRANSACT_ITEMS: usize = 100;

/// Maximum serialized size of a transaction request
pub const MAX_TRANSACTION_BYTES: usize = 4 * 1024 * 1024;

/// Maximum number of statements in one `BatchExecuteStatement` call
pub const MAX_BATCH_STATEMENTS: usize = 25;

/// Maximum value of `TotalSegments` for a parallel scan
pub const MAX_TOTAL_SEGMENTS: i32 = 1_000_000;

/// An input that failed validation
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid value for `{field}`: {reason}")]
pub struct ValidationError {
    field: String,
    reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Wire name of the offending member, e.g. `TransactItems[2].Put.TableName`
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Check that an input is structurally valid before it is sent
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

fn required<'a, T>(field: &str, value: &'a Option<T>) -> Result<&'a T, ValidationError> {
    value
        .as_ref()
        .ok_or_else(|| ValidationError::new(field, "is required"))
}

fn non_empty_str<'a>(field: &str, value: &'a Option<String>) -> Result<&'a str, ValidationError> {
    match required(field, value)? {
        s if s.is_empty() => Err(ValidationError::new(field, "must not be empty")),
        s => Ok(s),
    }
}

fn check_table_name(field: &str, name: &str) -> Result<(), ValidationError> {
    if name.starts_with("arn:") {
        return if name.len() <= 1024 {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                "table ARNs must be at most 1024 characters",
            ))
        };
    }
    if !(3..=255).contains(&name.len()) {
        return Err(ValidationError::new(
            field,
            format!("must be between 3 and 255 characters, got {}", name.len()),
        ));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(ValidationError::new(
            field,
            format!("contains `{}`; only [A-Za-z0-9_.-] are allowed", c),
        ));
    }
    Ok(())
}

fn table_name(field: &str, value: &Option<String>) -> Result<(), ValidationError> {
    check_table_name(field, required(field, value)?)
}

fn optional_table_name(field: &str, value: &Option<String>) -> Result<(), ValidationError> {
    match value {
        Some(name) => check_table_name(field, name),
        None => Ok(()),
    }
}

fn non_empty_item<'a>(field: &str, value: &'a Option<Item>) -> Result<&'a Item, ValidationError> {
    match required(field, value)? {
        item if item.is_empty() => Err(ValidationError::new(field, "must not be empty")),
        item => Ok(item),
    }
}

fn count_between<'a, T>(
    field: &str,
    value: &'a Option<Vec<T>>,
    min: usize,
    max: usize,
) -> Result<&'a [T], ValidationError> {
    let items = required(field, value)?;
    if items.len() < min || items.len() > max {
        return Err(ValidationError::new(
            field,
            format!(
                "must contain between {} and {} entries, got {}",
                min,
                max,
                items.len()
            ),
        ));
    }
    Ok(items)
}

fn limit(field: &str, value: Option<i32>, min: i32, max: i32) -> Result<(), ValidationError> {
    match value {
        Some(v) if v < min || v > max => Err(ValidationError::new(
            field,
            format!("must be between {} and {}, got {}", min, max, v),
        )),
        _ => Ok(()),
    }
}

fn serialized_size<T: serde::Serialize>(field: &str, input: &T) -> Result<(), ValidationError> {
    let size = serde_json::to_vec(input)
        .map_err(|err| ValidationError::new(field, err.to_string()))?
        .len();
    if size > MAX_TRANSACTION_BYTES {
        return Err(ValidationError::new(
            field,
            format!(
                "the request is {} bytes; transactions are limited to {} bytes",
                size, MAX_TRANSACTION_BYTES
            ),
        ));
    }
    Ok(())
}

macro_rules! validate_table_name {
    ($($input:ty),* $(,)?) => {
        $(
            impl Validate for $input {
                fn validate(&self) -> Result<(), ValidationError> {
                    table_name("TableName", &self.table_name)
                }
            }
        )*
    };
}

macro_rules! validate_nothing {
    ($($input:ty),* $(,)?) => {
        $(
            impl Validate for $input {
                fn validate(&self) -> Result<(), ValidationError> {
                    Ok(())
                }
            }
        )*
    };
}

validate_table_name!(
    DeleteTableInput,
    DescribeTableInput,
    DescribeContinuousBackupsInput,
    DescribeContributorInsightsInput,
    DescribeKinesisStreamingDestinationInput,
    DescribeTableReplicaAutoScalingInput,
    DescribeTimeToLiveInput,
    UpdateTableReplicaAutoScalingInput,
);

validate_nothing!(DescribeEndpointsInput, DescribeLimitsInput, ListExportsInput);

impl Validate for BatchExecuteStatementInput {
    fn validate(&self) -> Result<(), ValidationError> {
        let statements = count_between("Statements", &self.statements, 1, MAX_BATCH_STATEMENTS)?;
        for (idx, statement) in statements.iter().enumerate() {
            non_empty_str(&format!("Statements[{}].Statement", idx), &statement.statement)?;
        }
        Ok(())
    }
}

impl Validate for BatchGetItemInput {
    fn validate(&self) -> Result<(), ValidationError> {
        let request_items = required("RequestItems", &self.request_items)?;
        if request_items.is_empty() {
            return Err(ValidationError::new("RequestItems", "must not be empty"));
        }
        let mut total = 0;
        for (table, keys_and_attributes) in request_items {
            check_table_name("RequestItems", table)?;
            let field = format!("RequestItems.{}.Keys", table);
            let keys = count_between(&field, &keys_and_attributes.keys, 1, MAX_BATCH_GET_KEYS)?;
            if keys.iter().any(HashMap::is_empty) {
                return Err(ValidationError::new(field, "keys must not be empty"));
            }
            total += keys.len();
        }
        if total > MAX_BATCH_GET_KEYS {
            return Err(ValidationError::new(
                "RequestItems",
                format!(
                    "at most {} keys may be requested, got {}",
                    MAX_BATCH_GET_KEYS, total
                ),
            ));
        }
        Ok(())
    }
}

fn write_request(field: &str, request: &WriteRequest) -> Result<(), ValidationError> {
    match (&request.put_request, &request.delete_request) {
        (Some(put), None) => non_empty_item(&format!("{}.PutRequest.Item", field), &put.item)
            .map(|_| ()),
        (None, Some(delete)) => {
            non_empty_item(&format!("{}.DeleteRequest.Key", field), &delete.key).map(|_| ())
        }
        _ => Err(ValidationError::new(
            field,
            "exactly one of PutRequest or DeleteRequest must be set",
        )),
    }
}

impl Validate for BatchWriteItemInput {
    fn validate(&self) -> Result<(), ValidationError> {
        let request_items = required("RequestItems", &self.request_items)?;
        if request_items.is_empty() {
            return Err(ValidationError::new("RequestItems", "must not be empty"));
        }
        let mut total = 0;
        for (table, requests) in request_items {
            check_table_name("RequestItems", table)?;
            if requests.is_empty() {
                return Err(ValidationError::new(
                    format!("RequestItems.{}", table),
                    "must not be empty",
                ));
            }
            for (idx, request) in requests.iter().enumerate() {
                write_request(&format!("RequestItems.{}[{}]", table, idx), request)?;
            }
            total += requests.len();
        }
        if total > MAX_BATCH_WRITE_REQUESTS {
            return Err(ValidationError::new(
                "RequestItems",
                format!(
                    "at most {} requests may be sent, got {}",
                    MAX_BATCH_WRITE_REQUESTS, total
                ),
            ));
        }
        Ok(())
    }
}

impl Validate for CreateBackupInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("TableName", &self.table_name)?;
        table_name("BackupName", &self.backup_name)
    }
}

impl Validate for CreateGlobalTableInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("GlobalTableName", &self.global_table_name)?;
        required("ReplicationGroup", &self.replication_group)?;
        Ok(())
    }
}

impl Validate for CreateTableInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("TableName", &self.table_name)?;
        count_between("KeySchema", &self.key_schema, 1, 2)?;
        count_between(
            "AttributeDefinitions",
            &self.attribute_definitions,
            1,
            usize::MAX,
        )?;
        let on_demand = matches!(self.billing_mode, Some(BillingMode::PayPerRequest));
        if !on_demand && self.provisioned_throughput.is_none() {
            return Err(ValidationError::new(
                "ProvisionedThroughput",
                "is required unless BillingMode is PAY_PER_REQUEST",
            ));
        }
        Ok(())
    }
}

impl Validate for DeleteBackupInput {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty_str("BackupArn", &self.backup_arn).map(|_| ())
    }
}

impl Validate for DescribeBackupInput {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty_str("BackupArn", &self.backup_arn).map(|_| ())
    }
}

impl Validate for DeleteItemInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("TableName", &self.table_name)?;
        non_empty_item("Key", &self.key).map(|_| ())
    }
}

impl Validate for DescribeExportInput {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty_str("ExportArn", &self.export_arn).map(|_| ())
    }
}

impl Validate for DescribeImportInput {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty_str("ImportArn", &self.import_arn).map(|_| ())
    }
}

impl Validate for DescribeGlobalTableInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("GlobalTableName", &self.global_table_name)
    }
}

impl Validate for DescribeGlobalTableSettingsInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("GlobalTableName", &self.global_table_name)
    }
}

impl Validate for DisableKinesisStreamingDestinationInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("TableName", &self.table_name)?;
        non_empty_str("StreamArn", &self.stream_arn).map(|_| ())
    }
}

impl Validate for EnableKinesisStreamingDestinationInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("TableName", &self.table_name)?;
        non_empty_str("StreamArn", &self.stream_arn).map(|_| ())
    }
}

impl Validate for ExecuteStatementInput {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty_str("Statement", &self.statement)?;
        limit("Limit", self.limit, 1, i32::MAX)
    }
}

impl Validate for ExecuteTransactionInput {
    fn validate(&self) -> Result<(), ValidationError> {
        let statements = count_between(
            "TransactStatements",
            &self.transact_statements,
            1,
            MAX_TRANSACT_ITEMS,
        )?;
        for (idx, statement) in statements.iter().enumerate() {
            non_empty_str(
                &format!("TransactStatements[{}].Statement", idx),
                &statement.statement,
            )?;
        }
        Ok(())
    }
}

impl Validate for ExportTableToPointInTimeInput {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty_str("TableArn", &self.table_arn)?;
        non_empty_str("S3Bucket", &self.s3_bucket).map(|_| ())
    }
}

impl Validate for GetItemInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("TableName", &self.table_name)?;
        non_empty_item("Key", &self.key).map(|_| ())
    }
}

impl Validate for ImportTableInput {
    fn validate(&self) -> Result<(), ValidationError> {
        let source = required("S3BucketSource", &self.s3_bucket_source)?;
        non_empty_str("S3BucketSource.S3Bucket", &source.s3_bucket)?;
        required("InputFormat", &self.input_format)?;
        let table = required("TableCreationParameters", &self.table_creation_parameters)?;
        table_name("TableCreationParameters.TableName", &table.table_name)?;
        count_between("TableCreationParameters.KeySchema", &table.key_schema, 1, 2)?;
        count_between(
            "TableCreationParameters.AttributeDefinitions",
            &table.attribute_definitions,
            1,
            usize::MAX,
        )?;
        Ok(())
    }
}

impl Validate for ListBackupsInput {
    fn validate(&self) -> Result<(), ValidationError> {
        optional_table_name("TableName", &self.table_name)?;
        limit("Limit", self.limit, 1, 100)
    }
}

impl Validate for ListContributorInsightsInput {
    fn validate(&self) -> Result<(), ValidationError> {
        optional_table_name("TableName", &self.table_name)?;
        limit("MaxResults", self.max_results, 0, 100)
    }
}

impl Validate for ListGlobalTablesInput {
    fn validate(&self) -> Result<(), ValidationError> {
        limit("Limit", self.limit, 1, i32::MAX)
    }
}

impl Validate for ListImportsInput {
    fn validate(&self) -> Result<(), ValidationError> {
        limit("PageSize", self.page_size, 1, 25)
    }
}

impl Validate for ListTablesInput {
    fn validate(&self) -> Result<(), ValidationError> {
        limit("Limit", self.limit, 1, 100)
    }
}

impl Validate for ListTagsOfResourceInput {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty_str("ResourceArn", &self.resource_arn).map(|_| ())
    }
}

impl Validate for PutItemInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("TableName", &self.table_name)?;
        non_empty_item("Item", &self.item).map(|_| ())
    }
}

impl Validate for QueryInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("TableName", &self.table_name)?;
        if self.key_condition_expression.is_none() && self.key_conditions.is_none() {
            return Err(ValidationError::new(
                "KeyConditionExpression",
                "is required",
            ));
        }
        limit("Limit", self.limit, 1, i32::MAX)
    }
}

impl Validate for RestoreTableFromBackupInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("TargetTableName", &self.target_table_name)?;
        non_empty_str("BackupArn", &self.backup_arn).map(|_| ())
    }
}

impl Validate for RestoreTableToPointInTimeInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("TargetTableName", &self.target_table_name)?;
        optional_table_name("SourceTableName", &self.source_table_name)?;
        if self.source_table_name.is_none() && self.source_table_arn.is_none() {
            return Err(ValidationError::new(
                "SourceTableName",
                "one of SourceTableName or SourceTableArn is required",
            ));
        }
        Ok(())
    }
}

impl Validate for ScanInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("TableName", &self.table_name)?;
        limit("Limit", self.limit, 1, i32::MAX)?;
        match (self.segment, self.total_segments) {
            (None, None) => Ok(()),
            (Some(segment), Some(total)) => {
                limit("TotalSegments", Some(total), 1, MAX_TOTAL_SEGMENTS)?;
                limit("Segment", Some(segment), 0, total - 1)
            }
            (Some(_), None) => Err(ValidationError::new(
                "TotalSegments",
                "is required when Segment is set",
            )),
            (None, Some(_)) => Err(ValidationError::new(
                "Segment",
                "is required when TotalSegments is set",
            )),
        }
    }
}

impl Validate for TagResourceInput {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty_str("ResourceArn", &self.resource_arn)?;
        count_between("Tags", &self.tags, 1, usize::MAX).map(|_| ())
    }
}

impl Validate for UntagResourceInput {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty_str("ResourceArn", &self.resource_arn)?;
        count_between("TagKeys", &self.tag_keys, 1, usize::MAX).map(|_| ())
    }
}

impl Validate for TransactGetItemsInput {
    fn validate(&self) -> Result<(), ValidationError> {
        let items = count_between("TransactItems", &self.transact_items, 1, MAX_TRANSACT_ITEMS)?;
        for (idx, item) in items.iter().enumerate() {
            let field = format!("TransactItems[{}].Get", idx);
            let get = required(&field, &item.get)?;
            table_name(&format!("{}.TableName", field), &get.table_name)?;
            non_empty_item(&format!("{}.Key", field), &get.key)?;
        }
        serialized_size("TransactItems", self)
    }
}

fn transact_write_item(field: &str, item: &TransactWriteItem) -> Result<(), ValidationError> {
    let actions = [
        item.condition_check.is_some(),
        item.put.is_some(),
        item.delete.is_some(),
        item.update.is_some(),
    ];
    if actions.iter().filter(|set| **set).count() != 1 {
        return Err(ValidationError::new(
            field,
            "exactly one of ConditionCheck, Put, Delete or Update must be set",
        ));
    }
    if let Some(check) = &item.condition_check {
        table_name(&format!("{}.ConditionCheck.TableName", field), &check.table_name)?;
        non_empty_item(&format!("{}.ConditionCheck.Key", field), &check.key)?;
        non_empty_str(
            &format!("{}.ConditionCheck.ConditionExpression", field),
            &check.condition_expression,
        )?;
    }
    if let Some(put) = &item.put {
        table_name(&format!("{}.Put.TableName", field), &put.table_name)?;
        non_empty_item(&format!("{}.Put.Item", field), &put.item)?;
    }
    if let Some(delete) = &item.delete {
        table_name(&format!("{}.Delete.TableName", field), &delete.table_name)?;
        non_empty_item(&format!("{}.Delete.Key", field), &delete.key)?;
    }
    if let Some(update) = &item.update {
        table_name(&format!("{}.Update.TableName", field), &update.table_name)?;
        non_empty_item(&format!("{}.Update.Key", field), &update.key)?;
        non_empty_str(
            &format!("{}.Update.UpdateExpression", field),
            &update.update_expression,
        )?;
    }
    Ok(())
}

impl Validate for TransactWriteItemsInput {
    fn validate(&self) -> Result<(), ValidationError> {
        let items = count_between("TransactItems", &self.transact_items, 1, MAX_TRANSACT_ITEMS)?;
        for (idx, item) in items.iter().enumerate() {
            transact_write_item(&format!("TransactItems[{}]", idx), item)?;
        }
        serialized_size("TransactItems", self)
    }
}

impl Validate for UpdateContinuousBackupsInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("TableName", &self.table_name)?;
        let spec = required(
            "PointInTimeRecoverySpecification",
            &self.point_in_time_recovery_specification,
        )?;
        required(
            "PointInTimeRecoverySpecification.PointInTimeRecoveryEnabled",
            &spec.point_in_time_recovery_enabled,
        )
        .map(|_| ())
    }
}

impl Validate for UpdateContributorInsightsInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("TableName", &self.table_name)?;
        required("ContributorInsightsAction", &self.contributor_insights_action).map(|_| ())
    }
}

impl Validate for UpdateGlobalTableInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("GlobalTableName", &self.global_table_name)?;
        count_between("ReplicaUpdates", &self.replica_updates, 1, usize::MAX).map(|_| ())
    }
}

impl Validate for UpdateGlobalTableSettingsInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("GlobalTableName", &self.global_table_name)
    }
}

impl Validate for UpdateItemInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("TableName", &self.table_name)?;
        non_empty_item("Key", &self.key).map(|_| ())
    }
}

impl Validate for UpdateTableInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("TableName", &self.table_name)
    }
}

impl Validate for UpdateTimeToLiveInput {
    fn validate(&self) -> Result<(), ValidationError> {
        table_name("TableName", &self.table_name)?;
        let spec = required("TimeToLiveSpecification", &self.time_to_live_specification)?;
        required("TimeToLiveSpecification.Enabled", &spec.enabled)?;
        non_empty_str(
            "TimeToLiveSpecification.AttributeName",
            &spec.attribute_name,
        )
        .map(|_| ())
    }
}
