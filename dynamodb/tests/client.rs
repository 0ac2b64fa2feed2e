/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_types::credentials::EnvironmentVariableCredentialsProvider;
use aws_types::os_shim_internal::Env;
use dynamodb::blocking::BlockingClient;
use dynamodb::input::{GetItemInput, ListTablesInput, UpdateItemInput};
use dynamodb::model::AttributeValue;
use dynamodb::{retry, timeout, Client, Config, Credentials, ErrorKind, ErrorKindExt, Region, SdkError};
use smithy_async::rt::sleep::{AsyncSleep, Sleep};
use smithy_client::test_connection::{capture_request, NeverService, TestConnection};
use smithy_http::body::SdkBody;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_test::traced_test;

const THROTTLED: &str = r#"{"__type":"com.amazonaws.dynamodb.v20120810#ThrottlingException","message":"Rate of requests exceeds the allowed throughput."}"#;
const INTERNAL: &str = r#"{"__type":"com.amazonaws.dynamodb.v20120810#InternalServerError","message":"Internal server error"}"#;

#[derive(Debug, Default)]
struct RecordingSleep {
    durations: Mutex<Vec<Duration>>,
}

impl AsyncSleep for RecordingSleep {
    fn sleep(&self, duration: Duration) -> Sleep {
        self.durations.lock().unwrap().push(duration);
        Sleep::new(async {})
    }
}

fn config(retry_config: retry::Config) -> dynamodb::config::Builder {
    Config::builder()
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::from_keys("AKIDEXAMPLE", "secret", None))
        .retry_config(retry_config)
}

fn key() -> HashMap<String, AttributeValue> {
    let mut key = HashMap::new();
    key.insert("id".to_string(), AttributeValue::S("1".into()));
    key
}

fn get_item() -> GetItemInput {
    GetItemInput::builder().table_name("Music").key(key()).build()
}

fn response(status: u16, body: &'static str) -> http::Response<&'static str> {
    http::Response::builder()
        .status(status)
        .header("x-amzn-requestid", "request-id")
        .body(body)
        .unwrap()
}

fn event(status: u16, body: &'static str) -> (http::Request<SdkBody>, http::Response<&'static str>) {
    (http::Request::new(SdkBody::empty()), response(status, body))
}

#[tokio::test]
async fn request_is_signed_and_targeted() {
    let (conn, request) = capture_request(None);
    let client = Client::from_conf_conn(config(retry::Config::disabled()).build(), conn);
    client.get_item(get_item()).await.unwrap();
    let request = request.expect_request();
    assert_eq!(request.uri(), "https://dynamodb.us-east-1.amazonaws.com/");
    assert_eq!(request.headers()["x-amz-target"], "DynamoDB_20120810.GetItem");
    assert_eq!(
        request.headers()["content-type"],
        "application/x-amz-json-1.0"
    );
    let authorization = request.headers()["authorization"].to_str().unwrap();
    assert!(authorization.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
    assert!(authorization.contains("/us-east-1/dynamodb/aws4_request"));
    let body: serde_json::Value =
        serde_json::from_slice(request.body().bytes().unwrap()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"TableName": "Music", "Key": {"id": {"S": "1"}}})
    );
}

#[tokio::test]
async fn attribute_values_survive_a_call() {
    let conn = TestConnection::new(vec![event(
        200,
        r#"{"Item":{"id":{"S":"1"},"big":{"N":"123456789012345678901234567890.000000001"},"raw":{"B":"AAEC/w=="},"set":{"NS":["1","2.50"]}}}"#,
    )]);
    let client = Client::from_conf_conn(config(retry::Config::disabled()).build(), conn);
    let item = client.get_item(get_item()).await.unwrap().item.unwrap();
    assert_eq!(
        item["big"],
        AttributeValue::N("123456789012345678901234567890.000000001".into())
    );
    assert_eq!(item["raw"].as_b().unwrap().as_ref(), &[0u8, 1, 2, 255][..]);
    assert_eq!(
        item["set"],
        AttributeValue::Ns(vec!["1".into(), "2.50".into()])
    );
}

#[tokio::test]
async fn invalid_input_is_never_sent() {
    let conn = TestConnection::<&'static str>::new(vec![]);
    let client = Client::from_conf_conn(config(retry::Config::default()).build(), conn.clone());
    let err = client
        .get_item(GetItemInput::builder().table_name("Music").build())
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::ConstructionFailure(_)), "{:?}", err);
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(conn.num_calls(), 0);

    let err = client
        .get_item(GetItemInput::builder().table_name("x").key(key()).build())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(conn.num_calls(), 0);
}

#[tokio::test]
async fn missing_credentials_are_not_validation_errors() {
    let conn = TestConnection::<&'static str>::new(vec![]);
    let config = Config::builder()
        .region(Region::new("us-east-1"))
        .credentials_provider(EnvironmentVariableCredentialsProvider::new_with_env(
            Env::from_slice(&[]),
        ))
        .build();
    let client = Client::from_conf_conn(config, conn.clone());
    let err = client.get_item(get_item()).await.unwrap_err();
    assert!(matches!(err, SdkError::ConstructionFailure(_)), "{:?}", err);
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(conn.num_calls(), 0);
}

#[tokio::test]
#[traced_test]
async fn throttling_is_retried_with_bounded_backoff() {
    let sleep = Arc::new(RecordingSleep::default());
    let conn = TestConnection::new(vec![
        event(400, THROTTLED),
        event(400, THROTTLED),
        event(200, r#"{"Item":{"id":{"S":"1"}}}"#),
    ]);
    let retry_config = retry::Config::default()
        .with_max_attempts(5)
        .with_initial_backoff(Duration::from_millis(100))
        .with_max_backoff(Duration::from_secs(1));
    let client = Client::from_conf_conn(
        config(retry_config).sleep_impl(sleep.clone()).build(),
        conn.clone(),
    );
    let output = client.get_item(get_item()).await.unwrap();
    assert!(output.item.is_some());
    assert_eq!(conn.num_calls(), 3);

    let durations = sleep.durations.lock().unwrap();
    assert_eq!(durations.len(), 2);
    for (retry, delay) in durations.iter().enumerate() {
        let ceiling = Duration::from_millis(100 * 2u64.pow(retry as u32));
        assert!(*delay >= ceiling / 2 && *delay <= ceiling, "{:?}", delay);
    }
    assert!(logs_contain("retrying failed attempt"));
}

#[tokio::test]
async fn server_errors_surface_after_max_attempts() {
    let conn = TestConnection::new(vec![
        event(500, INTERNAL),
        event(500, INTERNAL),
        event(500, INTERNAL),
        event(200, "{}"),
    ]);
    let client = Client::from_conf_conn(
        config(retry::Config::default().with_max_attempts(3))
            .sleep_impl(RecordingSleep::default())
            .build(),
        conn.clone(),
    );
    let err = client.get_item(get_item()).await.unwrap_err();
    assert_eq!(conn.num_calls(), 3);
    assert_eq!(err.kind(), ErrorKind::InternalServer);
    let service_error = err.service_error().unwrap();
    assert_eq!(service_error.code(), Some("InternalServerError"));
    assert_eq!(service_error.request_id(), Some("request-id"));
}

#[tokio::test]
async fn unsafe_operations_are_attempted_once() {
    let conn = TestConnection::new(vec![event(500, INTERNAL), event(200, "{}")]);
    let client = Client::from_conf_conn(
        config(retry::Config::default().with_max_attempts(5))
            .sleep_impl(RecordingSleep::default())
            .build(),
        conn.clone(),
    );
    let input = UpdateItemInput::builder()
        .table_name("Music")
        .key(key())
        .update_expression("SET plays = plays + :one")
        .build();
    let err = client.update_item(input).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InternalServer);
    assert_eq!(conn.num_calls(), 1);
}

#[tokio::test]
async fn unknown_codes_are_service_errors() {
    let conn = TestConnection::new(vec![event(
        400,
        r#"{"__type":"com.amazonaws.dynamodb.v20120810#BrandNewException","message":"something new"}"#,
    )]);
    let client = Client::from_conf_conn(config(retry::Config::default()).build(), conn.clone());
    let err = client.get_item(get_item()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Service);
    assert_eq!(conn.num_calls(), 1);
    let service_error = err.into_service_error().unwrap();
    assert_eq!(service_error.code(), Some("BrandNewException"));
    assert_eq!(service_error.to_string(), "BrandNewException: something new");
}

#[tokio::test]
async fn conditional_check_failures_are_typed() {
    let conn = TestConnection::new(vec![event(
        400,
        r#"{"__type":"com.amazonaws.dynamodb.v20120810#ConditionalCheckFailedException","message":"The conditional request failed"}"#,
    )]);
    let client = Client::from_conf_conn(config(retry::Config::default()).build(), conn);
    let err = client.get_item(get_item()).await.unwrap_err();
    assert!(err.service_error().unwrap().is_conditional_check_failed());
}

#[tokio::test(start_paused = true)]
async fn timeouts_are_retried_then_surface_as_transport() {
    let conn = NeverService::new();
    let client = Client::from_conf_conn(
        config(retry::Config::default().with_max_attempts(3))
            .timeout_config(timeout::Config::new().with_attempt_timeout(Some(Duration::from_millis(200))))
            .build(),
        conn.clone(),
    );
    let err = client.get_item(get_item()).await.unwrap_err();
    assert!(matches!(err, SdkError::TimeoutError(_)), "{:?}", err);
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(conn.num_calls(), 3);
}

#[tokio::test]
async fn cancellation_fires_the_callback_once() {
    let conn = NeverService::new();
    let client = Client::from_conf_conn(config(retry::Config::default()).build(), conn.clone());
    let invocations = Arc::new(AtomicUsize::new(0));
    let kinds = Arc::new(Mutex::new(Vec::new()));
    let handle = {
        let (invocations, kinds) = (invocations.clone(), kinds.clone());
        client.spawn_with_callback(get_item(), move |result| {
            invocations.fetch_add(1, Ordering::SeqCst);
            kinds.lock().unwrap().push(result.unwrap_err().kind());
        })
    };
    tokio::task::yield_now().await;
    handle.cancel();
    handle.await.unwrap();
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
    assert_eq!(*kinds.lock().unwrap(), vec![ErrorKind::Cancelled]);
}

#[tokio::test]
async fn spawned_calls_complete_or_cancel() {
    let conn = TestConnection::new(vec![event(200, r#"{"TableNames":["Music"]}"#)]);
    let client = Client::from_conf_conn(config(retry::Config::default()).build(), conn);
    let output = client
        .spawn(ListTablesInput::builder().build())
        .await
        .unwrap();
    assert_eq!(output.table_names, Some(vec!["Music".to_string()]));

    let client = Client::from_conf_conn(config(retry::Config::default()).build(), NeverService::new());
    let handle = client.spawn(get_item());
    handle.cancel();
    let err = handle.await.unwrap_err();
    assert!(matches!(err, SdkError::Cancelled));
    assert_eq!(err.kind(), ErrorKind::Cancelled);
}

#[test]
fn blocking_client_waits_for_the_result() {
    let conn = TestConnection::new(vec![
        event(200, r#"{"TableNames":["Music"]}"#),
        event(200, r#"{"TableNames":["Books"]}"#),
    ]);
    let client = Client::from_conf_conn(config(retry::Config::disabled()).build(), conn);
    let blocking = BlockingClient::new(client).unwrap();
    let output = blocking.send(ListTablesInput::builder().build()).unwrap();
    assert_eq!(output.table_names, Some(vec!["Music".to_string()]));
    let output = blocking
        .call(|client| client.list_tables(ListTablesInput::builder().build()))
        .unwrap();
    assert_eq!(output.table_names, Some(vec!["Books".to_string()]));
}
