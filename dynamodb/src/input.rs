/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Operation inputs. Every input has a builder: `GetItemInput::builder()...build()`.

use crate::model::*;
use std::collections::HashMap;

shape! {
    pub struct BatchExecuteStatementInput => batch_execute_statement_input {
        statements: Vec<BatchStatementRequest>,
        return_consumed_capacity: ReturnConsumedCapacity,
    }
}

shape! {
    /// Read up to 100 items from one or more tables
    pub struct BatchGetItemInput => batch_get_item_input {
        request_items: HashMap<String, KeysAndAttributes>,
        return_consumed_capacity: ReturnConsumedCapacity,
    }
}

shape! {
    /// Put or delete up to 25 items in one or more tables
    pub struct BatchWriteItemInput => batch_write_item_input {
        request_items: HashMap<String, Vec<WriteRequest>>,
        return_consumed_capacity: ReturnConsumedCapacity,
        return_item_collection_metrics: ReturnItemCollectionMetrics,
    }
}

shape! {
    pub struct CreateBackupInput => create_backup_input {
        table_name: String,
        backup_name: String,
    }
}

shape! {
    pub struct CreateGlobalTableInput => create_global_table_input {
        global_table_name: String,
        replication_group: Vec<Replica>,
    }
}

shape! {
    pub struct CreateTableInput => create_table_input {
        attribute_definitions: Vec<AttributeDefinition>,
        table_name: String,
        key_schema: Vec<KeySchemaElement>,
        local_secondary_indexes: Vec<LocalSecondaryIndex>,
        global_secondary_indexes: Vec<GlobalSecondaryIndex>,
        billing_mode: BillingMode,
        provisioned_throughput: ProvisionedThroughput,
        stream_specification: StreamSpecification,
        #[serde(rename = "SSESpecification")]
        sse_specification: SseSpecification,
        tags: Vec<Tag>,
        table_class: TableClass,
        deletion_protection_enabled: bool,
    }
}

shape! {
    pub struct DeleteBackupInput => delete_backup_input {
        backup_arn: String,
    }
}

shape! {
    pub struct DeleteItemInput => delete_item_input {
        table_name: String,
        key: Item,
        expected: HashMap<String, ExpectedAttributeValue>,
        conditional_operator: ConditionalOperator,
        return_values: ReturnValue,
        return_consumed_capacity: ReturnConsumedCapacity,
        return_item_collection_metrics: ReturnItemCollectionMetrics,
        condition_expression: String,
        expression_attribute_names: HashMap<String, String>,
        expression_attribute_values: HashMap<String, AttributeValue>,
        return_values_on_condition_check_failure: ReturnValuesOnConditionCheckFailure,
    }
}

shape! {
    pub struct DeleteTableInput => delete_table_input {
        table_name: String,
    }
}

shape! {
    pub struct DescribeBackupInput => describe_backup_input {
        backup_arn: String,
    }
}

shape! {
    pub struct DescribeContinuousBackupsInput => describe_continuous_backups_input {
        table_name: String,
    }
}

shape! {
    pub struct DescribeContributorInsightsInput => describe_contributor_insights_input {
        table_name: String,
        index_name: String,
    }
}

shape! {
    pub struct DescribeEndpointsInput => describe_endpoints_input {}
}

shape! {
    pub struct DescribeExportInput => describe_export_input {
        export_arn: String,
    }
}

shape! {
    pub struct DescribeGlobalTableInput => describe_global_table_input {
        global_table_name: String,
    }
}

shape! {
    pub struct DescribeGlobalTableSettingsInput => describe_global_table_settings_input {
        global_table_name: String,
    }
}

shape! {
    pub struct DescribeImportInput => describe_import_input {
        import_arn: String,
    }
}

shape! {
    pub struct DescribeKinesisStreamingDestinationInput => describe_kinesis_streaming_destination_input {
        table_name: String,
    }
}

shape! {
    pub struct DescribeLimitsInput => describe_limits_input {}
}

shape! {
    pub struct DescribeTableInput => describe_table_input {
        table_name: String,
    }
}

shape! {
    pub struct DescribeTableReplicaAutoScalingInput => describe_table_replica_auto_scaling_input {
        table_name: String,
    }
}

shape! {
    pub struct DescribeTimeToLiveInput => describe_time_to_live_input {
        table_name: String,
    }
}

shape! {
    pub struct DisableKinesisStreamingDestinationInput => disable_kinesis_streaming_destination_input {
        table_name: String,
        stream_arn: String,
    }
}

shape! {
    pub struct EnableKinesisStreamingDestinationInput => enable_kinesis_streaming_destination_input {
        table_name: String,
        stream_arn: String,
    }
}

shape! {
    /// Run a PartiQL statement
    pub struct ExecuteStatementInput => execute_statement_input {
        statement: String,
        parameters: Vec<AttributeValue>,
        consistent_read: bool,
        next_token: String,
        return_consumed_capacity: ReturnConsumedCapacity,
        limit: i32,
        return_values_on_condition_check_failure: ReturnValuesOnConditionCheckFailure,
    }
}

shape! {
    pub struct ExecuteTransactionInput => execute_transaction_input {
        transact_statements: Vec<ParameterizedStatement>,
        client_request_token: String,
        return_consumed_capacity: ReturnConsumedCapacity,
    }
}

shape! {
    pub struct ExportTableToPointInTimeInput => export_table_to_point_in_time_input {
        table_arn: String,
        export_time: f64,
        client_token: String,
        s3_bucket: String,
        s3_bucket_owner: String,
        s3_prefix: String,
        s3_sse_algorithm: S3SseAlgorithm,
        s3_sse_kms_key_id: String,
        export_format: ExportFormat,
    }
}

shape! {
    /// Read a single item by primary key
    pub struct GetItemInput => get_item_input {
        table_name: String,
        key: Item,
        attributes_to_get: Vec<String>,
        consistent_read: bool,
        return_consumed_capacity: ReturnConsumedCapacity,
        projection_expression: String,
        expression_attribute_names: HashMap<String, String>,
    }
}

shape! {
    pub struct ImportTableInput => import_table_input {
        client_token: String,
        s3_bucket_source: S3BucketSource,
        input_format: InputFormat,
        input_format_options: serde_json::Value,
        input_compression_type: InputCompressionType,
        table_creation_parameters: TableCreationParameters,
    }
}

shape! {
    pub struct ListBackupsInput => list_backups_input {
        table_name: String,
        limit: i32,
        time_range_lower_bound: f64,
        time_range_upper_bound: f64,
        exclusive_start_backup_arn: String,
        backup_type: BackupTypeFilter,
    }
}

shape! {
    pub struct ListContributorInsightsInput => list_contributor_insights_input {
        table_name: String,
        next_token: String,
        max_results: i32,
    }
}

shape! {
    pub struct ListExportsInput => list_exports_input {
        table_arn: String,
        max_results: i32,
        next_token: String,
    }
}

shape! {
    pub struct ListGlobalTablesInput => list_global_tables_input {
        exclusive_start_global_table_name: String,
        limit: i32,
        region_name: String,
    }
}

shape! {
    pub struct ListImportsInput => list_imports_input {
        table_arn: String,
        page_size: i32,
        next_token: String,
    }
}

shape! {
    pub struct ListTablesInput => list_tables_input {
        exclusive_start_table_name: String,
        limit: i32,
    }
}

shape! {
    pub struct ListTagsOfResourceInput => list_tags_of_resource_input {
        resource_arn: String,
        next_token: String,
    }
}

shape! {
    /// Create or replace a single item
    pub struct PutItemInput => put_item_input {
        table_name: String,
        item: Item,
        expected: HashMap<String, ExpectedAttributeValue>,
        return_values: ReturnValue,
        return_consumed_capacity: ReturnConsumedCapacity,
        return_item_collection_metrics: ReturnItemCollectionMetrics,
        conditional_operator: ConditionalOperator,
        condition_expression: String,
        expression_attribute_names: HashMap<String, String>,
        expression_attribute_values: HashMap<String, AttributeValue>,
        return_values_on_condition_check_failure: ReturnValuesOnConditionCheckFailure,
    }
}

shape! {
    pub struct QueryInput => query_input {
        table_name: String,
        index_name: String,
        select: Select,
        attributes_to_get: Vec<String>,
        limit: i32,
        consistent_read: bool,
        key_conditions: HashMap<String, Condition>,
        query_filter: HashMap<String, Condition>,
        conditional_operator: ConditionalOperator,
        scan_index_forward: bool,
        exclusive_start_key: Item,
        return_consumed_capacity: ReturnConsumedCapacity,
        projection_expression: String,
        filter_expression: String,
        key_condition_expression: String,
        expression_attribute_names: HashMap<String, String>,
        expression_attribute_values: HashMap<String, AttributeValue>,
    }
}

shape! {
    pub struct RestoreTableFromBackupInput => restore_table_from_backup_input {
        target_table_name: String,
        backup_arn: String,
        billing_mode_override: BillingMode,
        global_secondary_index_override: Vec<GlobalSecondaryIndex>,
        local_secondary_index_override: Vec<LocalSecondaryIndex>,
        provisioned_throughput_override: ProvisionedThroughput,
        #[serde(rename = "SSESpecificationOverride")]
        sse_specification_override: SseSpecification,
    }
}

shape! {
    pub struct RestoreTableToPointInTimeInput => restore_table_to_point_in_time_input {
        source_table_arn: String,
        source_table_name: String,
        target_table_name: String,
        use_latest_restorable_time: bool,
        restore_date_time: f64,
        billing_mode_override: BillingMode,
        global_secondary_index_override: Vec<GlobalSecondaryIndex>,
        local_secondary_index_override: Vec<LocalSecondaryIndex>,
        provisioned_throughput_override: ProvisionedThroughput,
        #[serde(rename = "SSESpecificationOverride")]
        sse_specification_override: SseSpecification,
    }
}

shape! {
    pub struct ScanInput => scan_input {
        table_name: String,
        index_name: String,
        attributes_to_get: Vec<String>,
        limit: i32,
        select: Select,
        scan_filter: HashMap<String, Condition>,
        conditional_operator: ConditionalOperator,
        exclusive_start_key: Item,
        return_consumed_capacity: ReturnConsumedCapacity,
        total_segments: i32,
        segment: i32,
        projection_expression: String,
        filter_expression: String,
        expression_attribute_names: HashMap<String, String>,
        expression_attribute_values: HashMap<String, AttributeValue>,
        consistent_read: bool,
    }
}

impl ScanInput {
    /// Split this scan into `total` parallel scan segments.
    ///
    /// Each returned input scans one segment (`Segment` 0 through `total - 1`) and can be
    /// paginated independently of the others.
    pub fn segments(&self, total: i32) -> Vec<ScanInput> {
        (0..total)
            .map(|segment| ScanInput {
                segment: Some(segment),
                total_segments: Some(total),
                ..self.clone()
            })
            .collect()
    }
}

shape! {
    pub struct TagResourceInput => tag_resource_input {
        resource_arn: String,
        tags: Vec<Tag>,
    }
}

shape! {
    pub struct TransactGetItemsInput => transact_get_items_input {
        transact_items: Vec<TransactGetItem>,
        return_consumed_capacity: ReturnConsumedCapacity,
    }
}

shape! {
    pub struct TransactWriteItemsInput => transact_write_items_input {
        transact_items: Vec<TransactWriteItem>,
        return_consumed_capacity: ReturnConsumedCapacity,
        return_item_collection_metrics: ReturnItemCollectionMetrics,
        client_request_token: String,
    }
}

shape! {
    pub struct UntagResourceInput => untag_resource_input {
        resource_arn: String,
        tag_keys: Vec<String>,
    }
}

shape! {
    pub struct UpdateContinuousBackupsInput => update_continuous_backups_input {
        table_name: String,
        point_in_time_recovery_specification: PointInTimeRecoverySpecification,
    }
}

shape! {
    pub struct UpdateContributorInsightsInput => update_contributor_insights_input {
        table_name: String,
        index_name: String,
        contributor_insights_action: ContributorInsightsAction,
    }
}

shape! {
    pub struct UpdateGlobalTableInput => update_global_table_input {
        global_table_name: String,
        replica_updates: Vec<ReplicaUpdate>,
    }
}

shape! {
    /// Settings updates are passed through to the service as JSON documents
    pub struct UpdateGlobalTableSettingsInput => update_global_table_settings_input {
        global_table_name: String,
        global_table_billing_mode: BillingMode,
        global_table_provisioned_write_capacity_units: i64,
        global_table_provisioned_write_capacity_auto_scaling_settings_update: serde_json::Value,
        global_table_global_secondary_index_settings_update: Vec<serde_json::Value>,
        replica_settings_update: Vec<serde_json::Value>,
    }
}

shape! {
    pub struct UpdateItemInput => update_item_input {
        table_name: String,
        key: Item,
        attribute_updates: HashMap<String, AttributeValueUpdate>,
        expected: HashMap<String, ExpectedAttributeValue>,
        conditional_operator: ConditionalOperator,
        return_values: ReturnValue,
        return_consumed_capacity: ReturnConsumedCapacity,
        return_item_collection_metrics: ReturnItemCollectionMetrics,
        update_expression: String,
        condition_expression: String,
        expression_attribute_names: HashMap<String, String>,
        expression_attribute_values: HashMap<String, AttributeValue>,
        return_values_on_condition_check_failure: ReturnValuesOnConditionCheckFailure,
    }
}

shape! {
    pub struct UpdateTableInput => update_table_input {
        attribute_definitions: Vec<AttributeDefinition>,
        table_name: String,
        billing_mode: BillingMode,
        provisioned_throughput: ProvisionedThroughput,
        global_secondary_index_updates: Vec<GlobalSecondaryIndexUpdate>,
        stream_specification: StreamSpecification,
        #[serde(rename = "SSESpecification")]
        sse_specification: SseSpecification,
        replica_updates: Vec<serde_json::Value>,
        table_class: TableClass,
        deletion_protection_enabled: bool,
    }
}

shape! {
    pub struct UpdateTableReplicaAutoScalingInput => update_table_replica_auto_scaling_input {
        global_secondary_index_updates: Vec<serde_json::Value>,
        table_name: String,
        provisioned_write_capacity_auto_scaling_update: serde_json::Value,
        replica_updates: Vec<serde_json::Value>,
    }
}

shape! {
    pub struct UpdateTimeToLiveInput => update_time_to_live_input {
        table_name: String,
        time_to_live_specification: TimeToLiveSpecification,
    }
}
