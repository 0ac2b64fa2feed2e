/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Operation outputs. Members the service did not send are `None`.

use crate::model::*;
use std::collections::HashMap;

shape! {
    pub struct BatchExecuteStatementOutput => batch_execute_statement_output {
        responses: Vec<BatchStatementResponse>,
        consumed_capacity: Vec<ConsumedCapacity>,
    }
}

shape! {
    pub struct BatchGetItemOutput => batch_get_item_output {
        responses: HashMap<String, Vec<Item>>,
        unprocessed_keys: HashMap<String, KeysAndAttributes>,
        consumed_capacity: Vec<ConsumedCapacity>,
    }
}

shape! {
    pub struct BatchWriteItemOutput => batch_write_item_output {
        unprocessed_items: HashMap<String, Vec<WriteRequest>>,
        item_collection_metrics: HashMap<String, Vec<ItemCollectionMetrics>>,
        consumed_capacity: Vec<ConsumedCapacity>,
    }
}

shape! {
    pub struct CreateBackupOutput => create_backup_output {
        backup_details: BackupDetails,
    }
}

shape! {
    pub struct CreateGlobalTableOutput => create_global_table_output {
        global_table_description: GlobalTableDescription,
    }
}

shape! {
    pub struct CreateTableOutput => create_table_output {
        table_description: TableDescription,
    }
}

shape! {
    pub struct DeleteBackupOutput => delete_backup_output {
        backup_description: BackupDescription,
    }
}

shape! {
    pub struct DeleteItemOutput => delete_item_output {
        attributes: Item,
        consumed_capacity: ConsumedCapacity,
        item_collection_metrics: ItemCollectionMetrics,
    }
}

shape! {
    pub struct DeleteTableOutput => delete_table_output {
        table_description: TableDescription,
    }
}

shape! {
    pub struct DescribeBackupOutput => describe_backup_output {
        backup_description: BackupDescription,
    }
}

shape! {
    pub struct DescribeContinuousBackupsOutput => describe_continuous_backups_output {
        continuous_backups_description: ContinuousBackupsDescription,
    }
}

shape! {
    pub struct DescribeContributorInsightsOutput => describe_contributor_insights_output {
        table_name: String,
        index_name: String,
        contributor_insights_rule_list: Vec<String>,
        contributor_insights_status: ContributorInsightsStatus,
        last_update_date_time: f64,
        failure_exception: serde_json::Value,
    }
}

shape! {
    pub struct DescribeEndpointsOutput => describe_endpoints_output {
        endpoints: Vec<Endpoint>,
    }
}

shape! {
    pub struct DescribeExportOutput => describe_export_output {
        export_description: ExportDescription,
    }
}

shape! {
    pub struct DescribeGlobalTableOutput => describe_global_table_output {
        global_table_description: GlobalTableDescription,
    }
}

shape! {
    pub struct DescribeGlobalTableSettingsOutput => describe_global_table_settings_output {
        global_table_name: String,
        replica_settings: Vec<serde_json::Value>,
    }
}

shape! {
    pub struct DescribeImportOutput => describe_import_output {
        import_table_description: ImportTableDescription,
    }
}

shape! {
    pub struct DescribeKinesisStreamingDestinationOutput => describe_kinesis_streaming_destination_output {
        table_name: String,
        kinesis_data_stream_destinations: Vec<KinesisDataStreamDestination>,
    }
}

shape! {
    pub struct DescribeLimitsOutput => describe_limits_output {
        account_max_read_capacity_units: i64,
        account_max_write_capacity_units: i64,
        table_max_read_capacity_units: i64,
        table_max_write_capacity_units: i64,
    }
}

shape! {
    pub struct DescribeTableOutput => describe_table_output {
        table: TableDescription,
    }
}

shape! {
    pub struct DescribeTableReplicaAutoScalingOutput => describe_table_replica_auto_scaling_output {
        table_auto_scaling_description: serde_json::Value,
    }
}

shape! {
    pub struct DescribeTimeToLiveOutput => describe_time_to_live_output {
        time_to_live_description: TimeToLiveDescription,
    }
}

shape! {
    pub struct DisableKinesisStreamingDestinationOutput => disable_kinesis_streaming_destination_output {
        table_name: String,
        stream_arn: String,
        destination_status: DestinationStatus,
    }
}

shape! {
    pub struct EnableKinesisStreamingDestinationOutput => enable_kinesis_streaming_destination_output {
        table_name: String,
        stream_arn: String,
        destination_status: DestinationStatus,
    }
}

shape! {
    pub struct ExecuteStatementOutput => execute_statement_output {
        items: Vec<Item>,
        next_token: String,
        consumed_capacity: ConsumedCapacity,
        last_evaluated_key: Item,
    }
}

shape! {
    pub struct ExecuteTransactionOutput => execute_transaction_output {
        responses: Vec<ItemResponse>,
        consumed_capacity: Vec<ConsumedCapacity>,
    }
}

shape! {
    pub struct ExportTableToPointInTimeOutput => export_table_to_point_in_time_output {
        export_description: ExportDescription,
    }
}

shape! {
    pub struct GetItemOutput => get_item_output {
        item: Item,
        consumed_capacity: ConsumedCapacity,
    }
}

shape! {
    pub struct ImportTableOutput => import_table_output {
        import_table_description: ImportTableDescription,
    }
}

shape! {
    pub struct ListBackupsOutput => list_backups_output {
        backup_summaries: Vec<BackupSummary>,
        last_evaluated_backup_arn: String,
    }
}

shape! {
    pub struct ListContributorInsightsOutput => list_contributor_insights_output {
        contributor_insights_summaries: Vec<ContributorInsightsSummary>,
        next_token: String,
    }
}

shape! {
    pub struct ListExportsOutput => list_exports_output {
        export_summaries: Vec<ExportSummary>,
        next_token: String,
    }
}

shape! {
    pub struct ListGlobalTablesOutput => list_global_tables_output {
        global_tables: Vec<GlobalTable>,
        last_evaluated_global_table_name: String,
    }
}

shape! {
    pub struct ListImportsOutput => list_imports_output {
        import_summary_list: Vec<ImportSummary>,
        next_token: String,
    }
}

shape! {
    pub struct ListTablesOutput => list_tables_output {
        table_names: Vec<String>,
        last_evaluated_table_name: String,
    }
}

shape! {
    pub struct ListTagsOfResourceOutput => list_tags_of_resource_output {
        tags: Vec<Tag>,
        next_token: String,
    }
}

shape! {
    pub struct PutItemOutput => put_item_output {
        attributes: Item,
        consumed_capacity: ConsumedCapacity,
        item_collection_metrics: ItemCollectionMetrics,
    }
}

shape! {
    pub struct QueryOutput => query_output {
        items: Vec<Item>,
        count: i32,
        scanned_count: i32,
        last_evaluated_key: Item,
        consumed_capacity: ConsumedCapacity,
    }
}

shape! {
    pub struct RestoreTableFromBackupOutput => restore_table_from_backup_output {
        table_description: TableDescription,
    }
}

shape! {
    pub struct RestoreTableToPointInTimeOutput => restore_table_to_point_in_time_output {
        table_description: TableDescription,
    }
}

shape! {
    pub struct ScanOutput => scan_output {
        items: Vec<Item>,
        count: i32,
        scanned_count: i32,
        last_evaluated_key: Item,
        consumed_capacity: ConsumedCapacity,
    }
}

shape! {
    pub struct TagResourceOutput => tag_resource_output {}
}

shape! {
    pub struct TransactGetItemsOutput => transact_get_items_output {
        consumed_capacity: Vec<ConsumedCapacity>,
        responses: Vec<ItemResponse>,
    }
}

shape! {
    pub struct TransactWriteItemsOutput => transact_write_items_output {
        consumed_capacity: Vec<ConsumedCapacity>,
        item_collection_metrics: HashMap<String, Vec<ItemCollectionMetrics>>,
    }
}

shape! {
    pub struct UntagResourceOutput => untag_resource_output {}
}

shape! {
    pub struct UpdateContinuousBackupsOutput => update_continuous_backups_output {
        continuous_backups_description: ContinuousBackupsDescription,
    }
}

shape! {
    pub struct UpdateContributorInsightsOutput => update_contributor_insights_output {
        table_name: String,
        index_name: String,
        contributor_insights_status: ContributorInsightsStatus,
    }
}

shape! {
    pub struct UpdateGlobalTableOutput => update_global_table_output {
        global_table_description: GlobalTableDescription,
    }
}

shape! {
    pub struct UpdateGlobalTableSettingsOutput => update_global_table_settings_output {
        global_table_name: String,
        replica_settings: Vec<serde_json::Value>,
    }
}

shape! {
    pub struct UpdateItemOutput => update_item_output {
        attributes: Item,
        consumed_capacity: ConsumedCapacity,
        item_collection_metrics: ItemCollectionMetrics,
    }
}

shape! {
    pub struct UpdateTableOutput => update_table_output {
        table_description: TableDescription,
    }
}

shape! {
    pub struct UpdateTableReplicaAutoScalingOutput => update_table_replica_auto_scaling_output {
        table_auto_scaling_description: serde_json::Value,
    }
}

shape! {
    pub struct UpdateTimeToLiveOutput => update_time_to_live_output {
        time_to_live_specification: TimeToLiveSpecification,
    }
}
