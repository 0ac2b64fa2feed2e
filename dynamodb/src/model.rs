/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Data shapes shared by operation inputs and outputs.

use serde::{Deserialize, Serialize};
use smithy_types::Blob;
use std::collections::HashMap;

/// An item: attribute name to value
pub type Item = HashMap<String, AttributeValue>;

/// Represents the data for an attribute.
///
/// Each attribute value is exactly one data type. Numbers are carried as their decimal string
/// so that no precision is lost between the caller and the service. Binary values are
/// base64-encoded on the wire.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// String
    S(String),
    /// Number, as a decimal string
    N(String),
    /// Binary
    B(#[serde(with = "blob")] Blob),
    /// String set
    #[serde(rename = "SS")]
    Ss(Vec<String>),
    /// Number set
    #[serde(rename = "NS")]
    Ns(Vec<String>),
    /// Binary set
    #[serde(rename = "BS")]
    Bs(#[serde(with = "blob_list")] Vec<Blob>),
    /// Map of attribute values
    M(HashMap<String, AttributeValue>),
    /// List of attribute values
    L(Vec<AttributeValue>),
    /// Null. The service always sends `true`.
    #[serde(rename = "NULL")]
    Null(bool),
    /// Boolean
    #[serde(rename = "BOOL")]
    Bool(bool),
}

impl AttributeValue {
    /// Build a number attribute from anything that displays as a number
    pub fn number(n: impl std::fmt::Display) -> Self {
        AttributeValue::N(n.to_string())
    }

    pub fn as_s(&self) -> Result<&String, &Self> {
        if let AttributeValue::S(val) = self {
            Ok(val)
        } else {
            Err(self)
        }
    }

    pub fn as_n(&self) -> Result<&String, &Self> {
        if let AttributeValue::N(val) = self {
            Ok(val)
        } else {
            Err(self)
        }
    }

    pub fn as_b(&self) -> Result<&Blob, &Self> {
        if let AttributeValue::B(val) = self {
            Ok(val)
        } else {
            Err(self)
        }
    }

    pub fn as_m(&self) -> Result<&HashMap<String, AttributeValue>, &Self> {
        if let AttributeValue::M(val) = self {
            Ok(val)
        } else {
            Err(self)
        }
    }

    pub fn as_l(&self) -> Result<&Vec<AttributeValue>, &Self> {
        if let AttributeValue::L(val) = self {
            Ok(val)
        } else {
            Err(self)
        }
    }

    pub fn as_bool(&self) -> Result<&bool, &Self> {
        if let AttributeValue::Bool(val) = self {
            Ok(val)
        } else {
            Err(self)
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null(_))
    }
}

mod blob {
    use serde::{Deserialize, Deserializer, Serializer};
    use smithy_types::Blob;

    pub fn serialize<S: Serializer>(blob: &Blob, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::encode(blob.as_ref()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Blob, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        base64::decode(&encoded)
            .map(Blob::new)
            .map_err(serde::de::Error::custom)
    }
}

mod blob_list {
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};
    use smithy_types::Blob;

    pub fn serialize<S: Serializer>(blobs: &[Blob], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(blobs.len()))?;
        for blob in blobs {
            seq.serialize_element(&base64::encode(blob.as_ref()))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Blob>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|encoded| {
                base64::decode(encoded)
                    .map(Blob::new)
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}

string_enum! {
    pub enum KeyType {
        Hash => "HASH",
        Range => "RANGE",
    }
}

string_enum! {
    pub enum ScalarAttributeType {
        S => "S",
        N => "N",
        B => "B",
    }
}

string_enum! {
    pub enum ReturnValue {
        None => "NONE",
        AllOld => "ALL_OLD",
        UpdatedOld => "UPDATED_OLD",
        AllNew => "ALL_NEW",
        UpdatedNew => "UPDATED_NEW",
    }
}

string_enum! {
    pub enum ReturnValuesOnConditionCheckFailure {
        AllOld => "ALL_OLD",
        None => "NONE",
    }
}

string_enum! {
    pub enum ReturnConsumedCapacity {
        Indexes => "INDEXES",
        Total => "TOTAL",
        None => "NONE",
    }
}

string_enum! {
    pub enum ReturnItemCollectionMetrics {
        Size => "SIZE",
        None => "NONE",
    }
}

string_enum! {
    pub enum Select {
        AllAttributes => "ALL_ATTRIBUTES",
        AllProjectedAttributes => "ALL_PROJECTED_ATTRIBUTES",
        SpecificAttributes => "SPECIFIC_ATTRIBUTES",
        Count => "COUNT",
    }
}

string_enum! {
    pub enum BillingMode {
        Provisioned => "PROVISIONED",
        PayPerRequest => "PAY_PER_REQUEST",
    }
}

string_enum! {
    pub enum TableStatus {
        Creating => "CREATING",
        Updating => "UPDATING",
        Deleting => "DELETING",
        Active => "ACTIVE",
        InaccessibleEncryptionCredentials => "INACCESSIBLE_ENCRYPTION_CREDENTIALS",
        Archiving => "ARCHIVING",
        Archived => "ARCHIVED",
    }
}

string_enum! {
    pub enum TableClass {
        Standard => "STANDARD",
        StandardInfrequentAccess => "STANDARD_INFREQUENT_ACCESS",
    }
}

string_enum! {
    pub enum IndexStatus {
        Creating => "CREATING",
        Updating => "UPDATING",
        Deleting => "DELETING",
        Active => "ACTIVE",
    }
}

string_enum! {
    pub enum ProjectionType {
        All => "ALL",
        KeysOnly => "KEYS_ONLY",
        Include => "INCLUDE",
    }
}

string_enum! {
    pub enum StreamViewType {
        NewImage => "NEW_IMAGE",
        OldImage => "OLD_IMAGE",
        NewAndOldImages => "NEW_AND_OLD_IMAGES",
        KeysOnly => "KEYS_ONLY",
    }
}

string_enum! {
    pub enum ComparisonOperator {
        Eq => "EQ",
        Ne => "NE",
        In => "IN",
        Le => "LE",
        Lt => "LT",
        Ge => "GE",
        Gt => "GT",
        Between => "BETWEEN",
        NotNull => "NOT_NULL",
        Null => "NULL",
        Contains => "CONTAINS",
        NotContains => "NOT_CONTAINS",
        BeginsWith => "BEGINS_WITH",
    }
}

string_enum! {
    pub enum ConditionalOperator {
        And => "AND",
        Or => "OR",
    }
}

string_enum! {
    pub enum AttributeAction {
        Add => "ADD",
        Put => "PUT",
        Delete => "DELETE",
    }
}

string_enum! {
    pub enum BackupStatus {
        Creating => "CREATING",
        Deleted => "DELETED",
        Available => "AVAILABLE",
    }
}

string_enum! {
    pub enum BackupType {
        User => "USER",
        System => "SYSTEM",
        AwsBackup => "AWS_BACKUP",
    }
}

string_enum! {
    pub enum BackupTypeFilter {
        User => "USER",
        System => "SYSTEM",
        AwsBackup => "AWS_BACKUP",
        All => "ALL",
    }
}

string_enum! {
    pub enum SseType {
        Aes256 => "AES256",
        Kms => "KMS",
    }
}

string_enum! {
    pub enum SseStatus {
        Enabling => "ENABLING",
        Enabled => "ENABLED",
        Disabling => "DISABLING",
        Disabled => "DISABLED",
        Updating => "UPDATING",
    }
}

string_enum! {
    pub enum ContinuousBackupsStatus {
        Enabled => "ENABLED",
        Disabled => "DISABLED",
    }
}

string_enum! {
    pub enum PointInTimeRecoveryStatus {
        Enabled => "ENABLED",
        Disabled => "DISABLED",
    }
}

string_enum! {
    pub enum GlobalTableStatus {
        Creating => "CREATING",
        Active => "ACTIVE",
        Deleting => "DELETING",
        Updating => "UPDATING",
    }
}

string_enum! {
    pub enum ReplicaStatus {
        Creating => "CREATING",
        CreationFailed => "CREATION_FAILED",
        Updating => "UPDATING",
        Deleting => "DELETING",
        Active => "ACTIVE",
        RegionDisabled => "REGION_DISABLED",
        InaccessibleEncryptionCredentials => "INACCESSIBLE_ENCRYPTION_CREDENTIALS",
    }
}

string_enum! {
    pub enum TimeToLiveStatus {
        Enabling => "ENABLING",
        Disabling => "DISABLING",
        Enabled => "ENABLED",
        Disabled => "DISABLED",
    }
}

string_enum! {
    pub enum ContributorInsightsAction {
        Enable => "ENABLE",
        Disable => "DISABLE",
    }
}

string_enum! {
    pub enum ContributorInsightsStatus {
        Enabling => "ENABLING",
        Enabled => "ENABLED",
        Disabling => "DISABLING",
        Disabled => "DISABLED",
        Failed => "FAILED",
    }
}

string_enum! {
    pub enum DestinationStatus {
        Enabling => "ENABLING",
        Active => "ACTIVE",
        Disabling => "DISABLING",
        Disabled => "DISABLED",
        EnableFailed => "ENABLE_FAILED",
    }
}

string_enum! {
    pub enum ExportStatus {
        InProgress => "IN_PROGRESS",
        Completed => "COMPLETED",
        Failed => "FAILED",
    }
}

string_enum! {
    pub enum ExportFormat {
        DynamodbJson => "DYNAMODB_JSON",
        Ion => "ION",
    }
}

string_enum! {
    pub enum S3SseAlgorithm {
        Aes256 => "AES256",
        Kms => "KMS",
    }
}

string_enum! {
    pub enum ImportStatus {
        InProgress => "IN_PROGRESS",
        Completed => "COMPLETED",
        Cancelling => "CANCELLING",
        Cancelled => "CANCELLED",
        Failed => "FAILED",
    }
}

string_enum! {
    pub enum InputFormat {
        DynamodbJson => "DYNAMODB_JSON",
        Ion => "ION",
        Csv => "CSV",
    }
}

string_enum! {
    pub enum InputCompressionType {
        Gzip => "GZIP",
        Zstd => "ZSTD",
        None => "NONE",
    }
}

string_enum! {
    pub enum BatchStatementErrorCode {
        ConditionalCheckFailed => "ConditionalCheckFailed",
        ItemCollectionSizeLimitExceeded => "ItemCollectionSizeLimitExceeded",
        RequestLimitExceeded => "RequestLimitExceeded",
        ValidationError => "ValidationError",
        ProvisionedThroughputExceeded => "ProvisionedThroughputExceeded",
        TransactionConflict => "TransactionConflict",
        ThrottlingError => "ThrottlingError",
        InternalServerError => "InternalServerError",
        ResourceNotFound => "ResourceNotFound",
        AccessDenied => "AccessDenied",
        DuplicateItem => "DuplicateItem",
    }
}

shape! {
    /// An attribute of the key schema or of an index key schema
    pub struct AttributeDefinition => attribute_definition {
        attribute_name: String,
        attribute_type: ScalarAttributeType,
    }
}

shape! {
    /// One element of a primary key or index key
    pub struct KeySchemaElement => key_schema_element {
        attribute_name: String,
        key_type: KeyType,
    }
}

shape! {
    pub struct ProvisionedThroughput => provisioned_throughput {
        read_capacity_units: i64,
        write_capacity_units: i64,
    }
}

shape! {
    pub struct ProvisionedThroughputDescription => provisioned_throughput_description {
        last_increase_date_time: f64,
        last_decrease_date_time: f64,
        number_of_decreases_today: i64,
        read_capacity_units: i64,
        write_capacity_units: i64,
    }
}

shape! {
    /// The attributes copied (projected) into an index
    pub struct Projection => projection {
        projection_type: ProjectionType,
        non_key_attributes: Vec<String>,
    }
}

shape! {
    pub struct LocalSecondaryIndex => local_secondary_index {
        index_name: String,
        key_schema: Vec<KeySchemaElement>,
        projection: Projection,
    }
}

shape! {
    pub struct GlobalSecondaryIndex => global_secondary_index {
        index_name: String,
        key_schema: Vec<KeySchemaElement>,
        projection: Projection,
        provisioned_throughput: ProvisionedThroughput,
    }
}

shape! {
    pub struct LocalSecondaryIndexDescription => local_secondary_index_description {
        index_name: String,
        key_schema: Vec<KeySchemaElement>,
        projection: Projection,
        index_size_bytes: i64,
        item_count: i64,
        index_arn: String,
    }
}

shape! {
    pub struct GlobalSecondaryIndexDescription => global_secondary_index_description {
        index_name: String,
        key_schema: Vec<KeySchemaElement>,
        projection: Projection,
        index_status: IndexStatus,
        backfilling: bool,
        provisioned_throughput: ProvisionedThroughputDescription,
        index_size_bytes: i64,
        item_count: i64,
        index_arn: String,
    }
}

shape! {
    pub struct CreateGlobalSecondaryIndexAction => create_global_secondary_index_action {
        index_name: String,
        key_schema: Vec<KeySchemaElement>,
        projection: Projection,
        provisioned_throughput: ProvisionedThroughput,
    }
}

shape! {
    pub struct UpdateGlobalSecondaryIndexAction => update_global_secondary_index_action {
        index_name: String,
        provisioned_throughput: ProvisionedThroughput,
    }
}

shape! {
    pub struct DeleteGlobalSecondaryIndexAction => delete_global_secondary_index_action {
        index_name: String,
    }
}

shape! {
    /// Exactly one of `create`, `update` or `delete`
    pub struct GlobalSecondaryIndexUpdate => global_secondary_index_update {
        update: UpdateGlobalSecondaryIndexAction,
        create: CreateGlobalSecondaryIndexAction,
        delete: DeleteGlobalSecondaryIndexAction,
    }
}

shape! {
    pub struct StreamSpecification => stream_specification {
        stream_enabled: bool,
        stream_view_type: StreamViewType,
    }
}

shape! {
    /// Server-side encryption settings requested for a table
    pub struct SseSpecification => sse_specification {
        enabled: bool,
        #[serde(rename = "SSEType")]
        sse_type: SseType,
        #[serde(rename = "KMSMasterKeyId")]
        kms_master_key_id: String,
    }
}

shape! {
    pub struct SseDescription => sse_description {
        status: SseStatus,
        #[serde(rename = "SSEType")]
        sse_type: SseType,
        #[serde(rename = "KMSMasterKeyArn")]
        kms_master_key_arn: String,
        inaccessible_encryption_date_time: f64,
    }
}

shape! {
    pub struct BillingModeSummary => billing_mode_summary {
        billing_mode: BillingMode,
        last_update_to_pay_per_request_date_time: f64,
    }
}

shape! {
    pub struct TableClassSummary => table_class_summary {
        table_class: TableClass,
        last_update_date_time: f64,
    }
}

shape! {
    pub struct RestoreSummary => restore_summary {
        source_backup_arn: String,
        source_table_arn: String,
        restore_date_time: f64,
        restore_in_progress: bool,
    }
}

shape! {
    pub struct ReplicaDescription => replica_description {
        region_name: String,
        replica_status: ReplicaStatus,
        replica_status_description: String,
        replica_status_percent_progress: String,
        #[serde(rename = "KMSMasterKeyId")]
        kms_master_key_id: String,
        replica_inaccessible_date_time: f64,
        replica_table_class_summary: TableClassSummary,
    }
}

shape! {
    /// The properties of a table
    pub struct TableDescription => table_description {
        attribute_definitions: Vec<AttributeDefinition>,
        table_name: String,
        key_schema: Vec<KeySchemaElement>,
        table_status: TableStatus,
        creation_date_time: f64,
        provisioned_throughput: ProvisionedThroughputDescription,
        table_size_bytes: i64,
        item_count: i64,
        table_arn: String,
        table_id: String,
        billing_mode_summary: BillingModeSummary,
        local_secondary_indexes: Vec<LocalSecondaryIndexDescription>,
        global_secondary_indexes: Vec<GlobalSecondaryIndexDescription>,
        stream_specification: StreamSpecification,
        latest_stream_label: String,
        latest_stream_arn: String,
        global_table_version: String,
        replicas: Vec<ReplicaDescription>,
        restore_summary: RestoreSummary,
        #[serde(rename = "SSEDescription")]
        sse_description: SseDescription,
        archival_summary: serde_json::Value,
        table_class_summary: TableClassSummary,
        deletion_protection_enabled: bool,
    }
}

shape! {
    pub struct Capacity => capacity {
        read_capacity_units: f64,
        write_capacity_units: f64,
        capacity_units: f64,
    }
}

shape! {
    /// The capacity units consumed by an operation
    pub struct ConsumedCapacity => consumed_capacity {
        table_name: String,
        capacity_units: f64,
        read_capacity_units: f64,
        write_capacity_units: f64,
        table: Capacity,
        local_secondary_indexes: HashMap<String, Capacity>,
        global_secondary_indexes: HashMap<String, Capacity>,
    }
}

shape! {
    pub struct ItemCollectionMetrics => item_collection_metrics {
        item_collection_key: Item,
        #[serde(rename = "SizeEstimateRangeGB")]
        size_estimate_range_gb: Vec<f64>,
    }
}

shape! {
    /// Legacy conditional parameter
    pub struct ExpectedAttributeValue => expected_attribute_value {
        value: AttributeValue,
        exists: bool,
        comparison_operator: ComparisonOperator,
        attribute_value_list: Vec<AttributeValue>,
    }
}

shape! {
    /// Legacy key condition or filter
    pub struct Condition => condition {
        attribute_value_list: Vec<AttributeValue>,
        comparison_operator: ComparisonOperator,
    }
}

shape! {
    /// Legacy update action for one attribute
    pub struct AttributeValueUpdate => attribute_value_update {
        value: AttributeValue,
        action: AttributeAction,
    }
}

shape! {
    pub struct PutRequest => put_request {
        item: Item,
    }
}

shape! {
    pub struct DeleteRequest => delete_request {
        key: Item,
    }
}

shape! {
    /// One put or delete in a `BatchWriteItem` call. Exactly one member must be set.
    pub struct WriteRequest => write_request {
        put_request: PutRequest,
        delete_request: DeleteRequest,
    }
}

shape! {
    /// The keys to read from one table in a `BatchGetItem` call
    pub struct KeysAndAttributes => keys_and_attributes {
        keys: Vec<Item>,
        attributes_to_get: Vec<String>,
        consistent_read: bool,
        projection_expression: String,
        expression_attribute_names: HashMap<String, String>,
    }
}

shape! {
    pub struct Get => get {
        key: Item,
        table_name: String,
        projection_expression: String,
        expression_attribute_names: HashMap<String, String>,
    }
}

shape! {
    pub struct TransactGetItem => transact_get_item {
        get: Get,
    }
}

shape! {
    pub struct ItemResponse => item_response {
        item: Item,
    }
}

shape! {
    pub struct ConditionCheck => condition_check {
        key: Item,
        table_name: String,
        condition_expression: String,
        expression_attribute_names: HashMap<String, String>,
        expression_attribute_values: HashMap<String, AttributeValue>,
        return_values_on_condition_check_failure: ReturnValuesOnConditionCheckFailure,
    }
}

shape! {
    pub struct Put => put {
        item: Item,
        table_name: String,
        condition_expression: String,
        expression_attribute_names: HashMap<String, String>,
        expression_attribute_values: HashMap<String, AttributeValue>,
        return_values_on_condition_check_failure: ReturnValuesOnConditionCheckFailure,
    }
}

shape! {
    pub struct Delete => delete {
        key: Item,
        table_name: String,
        condition_expression: String,
        expression_attribute_names: HashMap<String, String>,
        expression_attribute_values: HashMap<String, AttributeValue>,
        return_values_on_condition_check_failure: ReturnValuesOnConditionCheckFailure,
    }
}

shape! {
    pub struct Update => update {
        key: Item,
        update_expression: String,
        table_name: String,
        condition_expression: String,
        expression_attribute_names: HashMap<String, String>,
        expression_attribute_values: HashMap<String, AttributeValue>,
        return_values_on_condition_check_failure: ReturnValuesOnConditionCheckFailure,
    }
}

shape! {
    /// One action of a `TransactWriteItems` call. Exactly one member must be set.
    pub struct TransactWriteItem => transact_write_item {
        condition_check: ConditionCheck,
        put: Put,
        delete: Delete,
        update: Update,
    }
}

shape! {
    /// Why one action of a cancelled transaction failed
    pub struct CancellationReason => cancellation_reason {
        item: Item,
        code: String,
        message: String,
    }
}

shape! {
    pub struct BatchStatementRequest => batch_statement_request {
        statement: String,
        parameters: Vec<AttributeValue>,
        consistent_read: bool,
        return_values_on_condition_check_failure: ReturnValuesOnConditionCheckFailure,
    }
}

shape! {
    pub struct BatchStatementError => batch_statement_error {
        code: BatchStatementErrorCode,
        message: String,
        item: Item,
    }
}

shape! {
    pub struct BatchStatementResponse => batch_statement_response {
        error: BatchStatementError,
        table_name: String,
        item: Item,
    }
}

shape! {
    pub struct ParameterizedStatement => parameterized_statement {
        statement: String,
        parameters: Vec<AttributeValue>,
        return_values_on_condition_check_failure: ReturnValuesOnConditionCheckFailure,
    }
}

shape! {
    pub struct BackupDetails => backup_details {
        backup_arn: String,
        backup_name: String,
        backup_size_bytes: i64,
        backup_status: BackupStatus,
        backup_type: BackupType,
        backup_creation_date_time: f64,
        backup_expiry_date_time: f64,
    }
}

shape! {
    pub struct BackupSummary => backup_summary {
        table_name: String,
        table_id: String,
        table_arn: String,
        backup_arn: String,
        backup_name: String,
        backup_creation_date_time: f64,
        backup_expiry_date_time: f64,
        backup_status: BackupStatus,
        backup_type: BackupType,
        backup_size_bytes: i64,
    }
}

shape! {
    pub struct SourceTableDetails => source_table_details {
        table_name: String,
        table_id: String,
        table_arn: String,
        table_size_bytes: i64,
        key_schema: Vec<KeySchemaElement>,
        table_creation_date_time: f64,
        provisioned_throughput: ProvisionedThroughput,
        item_count: i64,
        billing_mode: BillingMode,
    }
}

shape! {
    pub struct BackupDescription => backup_description {
        backup_details: BackupDetails,
        source_table_details: SourceTableDetails,
        source_table_feature_details: serde_json::Value,
    }
}

shape! {
    pub struct PointInTimeRecoveryDescription => point_in_time_recovery_description {
        point_in_time_recovery_status: PointInTimeRecoveryStatus,
        earliest_restorable_date_time: f64,
        latest_restorable_date_time: f64,
    }
}

shape! {
    pub struct PointInTimeRecoverySpecification => point_in_time_recovery_specification {
        point_in_time_recovery_enabled: bool,
    }
}

shape! {
    pub struct ContinuousBackupsDescription => continuous_backups_description {
        continuous_backups_status: ContinuousBackupsStatus,
        point_in_time_recovery_description: PointInTimeRecoveryDescription,
    }
}

shape! {
    pub struct ContributorInsightsSummary => contributor_insights_summary {
        table_name: String,
        index_name: String,
        contributor_insights_status: ContributorInsightsStatus,
    }
}

shape! {
    pub struct Replica => replica {
        region_name: String,
    }
}

shape! {
    pub struct CreateReplicaAction => create_replica_action {
        region_name: String,
    }
}

shape! {
    pub struct DeleteReplicaAction => delete_replica_action {
        region_name: String,
    }
}

shape! {
    /// Exactly one of `create` or `delete`
    pub struct ReplicaUpdate => replica_update {
        create: CreateReplicaAction,
        delete: DeleteReplicaAction,
    }
}

shape! {
    pub struct GlobalTable => global_table {
        global_table_name: String,
        replication_group: Vec<Replica>,
    }
}

shape! {
    pub struct GlobalTableDescription => global_table_description {
        replication_group: Vec<ReplicaDescription>,
        global_table_arn: String,
        creation_date_time: f64,
        global_table_status: GlobalTableStatus,
        global_table_name: String,
    }
}

shape! {
    /// An endpoint reported by `DescribeEndpoints`
    pub struct Endpoint => endpoint {
        address: String,
        cache_period_in_minutes: i64,
    }
}

shape! {
    pub struct TimeToLiveSpecification => time_to_live_specification {
        enabled: bool,
        attribute_name: String,
    }
}

shape! {
    pub struct TimeToLiveDescription => time_to_live_description {
        time_to_live_status: TimeToLiveStatus,
        attribute_name: String,
    }
}

shape! {
    pub struct KinesisDataStreamDestination => kinesis_data_stream_destination {
        stream_arn: String,
        destination_status: DestinationStatus,
        destination_status_description: String,
    }
}

shape! {
    pub struct ExportDescription => export_description {
        export_arn: String,
        export_status: ExportStatus,
        start_time: f64,
        end_time: f64,
        export_manifest: String,
        table_arn: String,
        table_id: String,
        export_time: f64,
        client_token: String,
        s3_bucket: String,
        s3_bucket_owner: String,
        s3_prefix: String,
        s3_sse_algorithm: S3SseAlgorithm,
        s3_sse_kms_key_id: String,
        failure_code: String,
        failure_message: String,
        export_format: ExportFormat,
        billed_size_bytes: i64,
        item_count: i64,
    }
}

shape! {
    pub struct ExportSummary => export_summary {
        export_arn: String,
        export_status: ExportStatus,
    }
}

shape! {
    pub struct S3BucketSource => s3_bucket_source {
        s3_bucket_owner: String,
        s3_bucket: String,
        s3_key_prefix: String,
    }
}

shape! {
    /// The table an import creates
    pub struct TableCreationParameters => table_creation_parameters {
        table_name: String,
        attribute_definitions: Vec<AttributeDefinition>,
        key_schema: Vec<KeySchemaElement>,
        billing_mode: BillingMode,
        provisioned_throughput: ProvisionedThroughput,
        #[serde(rename = "SSESpecification")]
        sse_specification: SseSpecification,
        global_secondary_indexes: Vec<GlobalSecondaryIndex>,
    }
}

shape! {
    pub struct ImportTableDescription => import_table_description {
        import_arn: String,
        import_status: ImportStatus,
        table_arn: String,
        table_id: String,
        client_token: String,
        s3_bucket_source: S3BucketSource,
        error_count: i64,
        cloud_watch_log_group_arn: String,
        input_format: InputFormat,
        input_format_options: serde_json::Value,
        input_compression_type: InputCompressionType,
        table_creation_parameters: TableCreationParameters,
        start_time: f64,
        end_time: f64,
        processed_size_bytes: i64,
        processed_item_count: i64,
        imported_item_count: i64,
        failure_code: String,
        failure_message: String,
    }
}

shape! {
    pub struct ImportSummary => import_summary {
        import_arn: String,
        import_status: ImportStatus,
        table_arn: String,
        s3_bucket_source: S3BucketSource,
        cloud_watch_log_group_arn: String,
        input_format: InputFormat,
        start_time: f64,
        end_time: f64,
    }
}

shape! {
    pub struct Tag => tag {
        key: String,
        value: String,
    }
}

#[cfg(test)]
mod test {
    use crate::model::{AttributeValue, KeyType, TableDescription, TableStatus};
    use proptest::prelude::*;
    use serde_json::json;
    use smithy_types::Blob;
    use std::collections::HashMap;

    #[test]
    fn attribute_values_use_wire_tags() {
        let mut map = HashMap::new();
        map.insert("flag".to_string(), AttributeValue::Bool(true));
        map.insert("nothing".to_string(), AttributeValue::Null(true));
        map.insert("set".to_string(), AttributeValue::Ss(vec!["a".into()]));
        let value = AttributeValue::L(vec![
            AttributeValue::N("1.50".into()),
            AttributeValue::B(Blob::new(&b"\x00\x01"[..])),
            AttributeValue::M(map),
        ]);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"L": [
                {"N": "1.50"},
                {"B": "AAE="},
                {"M": {"flag": {"BOOL": true}, "nothing": {"NULL": true}, "set": {"SS": ["a"]}}}
            ]})
        );
    }

    #[test]
    fn numbers_keep_their_exact_text() {
        let text = r#"{"N":"123456789012345678901234567890.000000000000000000000000000001"}"#;
        let value: AttributeValue = serde_json::from_str(text).unwrap();
        assert_eq!(
            value.as_n().unwrap(),
            "123456789012345678901234567890.000000000000000000000000000001"
        );
        assert_eq!(serde_json::to_string(&value).unwrap(), text);
    }

    #[test]
    fn binary_sets_are_base64() {
        let value: AttributeValue = serde_json::from_str(r#"{"BS":["AAE=","/w=="]}"#).unwrap();
        assert_eq!(
            value,
            AttributeValue::Bs(vec![Blob::new(vec![0, 1]), Blob::new(vec![255])])
        );
        assert!(serde_json::from_str::<AttributeValue>(r#"{"B":"not base64!"}"#).is_err());
    }

    #[test]
    fn unknown_enum_values_are_preserved() {
        let table: TableDescription = serde_json::from_value(json!({
            "TableName": "Music",
            "TableStatus": "HIBERNATING",
            "KeySchema": [{"AttributeName": "Artist", "KeyType": "HASH"}],
            "SomeFutureMember": {"nested": true}
        }))
        .unwrap();
        assert_eq!(
            table.table_status,
            Some(TableStatus::Unknown("HIBERNATING".into()))
        );
        let key = &table.key_schema.as_ref().unwrap()[0];
        assert_eq!(key.key_type, Some(KeyType::Hash));
        assert_eq!(
            serde_json::to_value(&table).unwrap()["TableStatus"],
            json!("HIBERNATING")
        );
    }

    #[test]
    fn absent_members_are_omitted() {
        let table = TableDescription::builder().table_name("Music").build();
        assert_eq!(
            serde_json::to_value(&table).unwrap(),
            json!({"TableName": "Music"})
        );
    }

    proptest! {
        #[test]
        fn numbers_and_binaries_round_trip(
            number in "-?[0-9]{1,38}(\\.[0-9]{1,38})?",
            bytes in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let value = AttributeValue::L(vec![
                AttributeValue::N(number),
                AttributeValue::B(Blob::new(bytes.clone())),
                AttributeValue::Bs(vec![Blob::new(bytes)]),
            ]);
            let wire = serde_json::to_string(&value).unwrap();
            let parsed: AttributeValue = serde_json::from_str(&wire).unwrap();
            prop_assert_eq!(parsed, value);
        }
    }
}
