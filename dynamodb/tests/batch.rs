/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use dynamodb::input::{BatchGetItemInput, BatchWriteItemInput};
use dynamodb::model::{AttributeValue, KeysAndAttributes, PutRequest, WriteRequest};
use dynamodb::{retry, Client, Config, Credentials, ErrorKind, ErrorKindExt, Region};
use smithy_client::test_connection::infallible_connection_fn;
use smithy_http::body::SdkBody;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn client(conn: smithy_client::erase::DynConnector, max_attempts: u32) -> Client {
    let config = Config::builder()
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::from_keys("akid", "secret", None))
        .retry_config(
            retry::Config::default()
                .with_max_attempts(max_attempts)
                .with_initial_backoff(Duration::from_millis(10)),
        )
        .build();
    Client::from_conf_conn(config, conn)
}

fn item(id: &str) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert("id".to_string(), AttributeValue::S(id.into()));
    item
}

fn put(id: &str) -> WriteRequest {
    WriteRequest::builder()
        .put_request(PutRequest::builder().item(item(id)).build())
        .build()
}

fn ok(body: &str) -> http::Response<SdkBody> {
    http::Response::builder()
        .status(200)
        .body(SdkBody::from(body.to_string()))
        .unwrap()
}

fn record(bodies: &Arc<Mutex<Vec<serde_json::Value>>>, request: &http::Request<SdkBody>) -> usize {
    let mut bodies = bodies.lock().unwrap();
    bodies.push(serde_json::from_slice(request.body().bytes().unwrap()).unwrap());
    bodies.len()
}

#[tokio::test(start_paused = true)]
async fn only_unprocessed_items_are_resubmitted() {
    let bodies = Arc::new(Mutex::new(Vec::new()));
    let recorded = bodies.clone();
    let conn = infallible_connection_fn(move |request| match record(&recorded, &request) {
        1 => ok(
            r#"{"UnprocessedItems":{"Music":[{"PutRequest":{"Item":{"id":{"S":"2"}}}}]},"ConsumedCapacity":[{"TableName":"Music","CapacityUnits":1.0}]}"#,
        ),
        _ => ok(r#"{"UnprocessedItems":{},"ConsumedCapacity":[{"TableName":"Music","CapacityUnits":1.0}]}"#),
    });
    let mut request_items = HashMap::new();
    request_items.insert("Music".to_string(), vec![put("1"), put("2"), put("3")]);
    let output = client(conn, 3)
        .batch_write_all(
            BatchWriteItemInput::builder()
                .request_items(request_items)
                .build(),
        )
        .await
        .unwrap();
    assert!(output.unprocessed_items.unwrap().is_empty());
    assert_eq!(output.consumed_capacity.unwrap().len(), 2);

    let bodies = bodies.lock().unwrap();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0]["RequestItems"]["Music"].as_array().unwrap().len(), 3);
    assert_eq!(
        bodies[1],
        serde_json::json!({
            "RequestItems": {"Music": [{"PutRequest": {"Item": {"id": {"S": "2"}}}}]}
        })
    );
}

#[tokio::test(start_paused = true)]
async fn rounds_are_bounded() {
    let bodies = Arc::new(Mutex::new(Vec::new()));
    let recorded = bodies.clone();
    let conn = infallible_connection_fn(move |request| {
        record(&recorded, &request);
        ok(r#"{"UnprocessedKeys":{"Music":{"Keys":[{"id":{"S":"2"}}]}},"Responses":{"Music":[{"id":{"S":"1"}}]}}"#)
    });
    let mut request_items = HashMap::new();
    request_items.insert(
        "Music".to_string(),
        KeysAndAttributes::builder()
            .keys(vec![item("1"), item("2")])
            .build(),
    );
    let output = client(conn, 2)
        .batch_get_all(
            BatchGetItemInput::builder()
                .request_items(request_items)
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(bodies.lock().unwrap().len(), 2);
    assert_eq!(output.responses.unwrap()["Music"].len(), 2);
    assert_eq!(
        output.unprocessed_keys.unwrap()["Music"].keys,
        Some(vec![item("2")])
    );
}

#[tokio::test(start_paused = true)]
async fn failed_rounds_keep_earlier_progress() {
    let bodies = Arc::new(Mutex::new(Vec::new()));
    let recorded = bodies.clone();
    let conn = infallible_connection_fn(move |request| match record(&recorded, &request) {
        1 => ok(
            r#"{"UnprocessedItems":{"Music":[{"PutRequest":{"Item":{"id":{"S":"2"}}}}]},"ConsumedCapacity":[{"TableName":"Music","CapacityUnits":1.0}]}"#,
        ),
        _ => http::Response::builder()
            .status(400)
            .body(SdkBody::from(
                r#"{"__type":"com.amazonaws.dynamodb.v20120810#ResourceNotFoundException","message":"gone"}"#,
            ))
            .unwrap(),
    });
    let mut request_items = HashMap::new();
    request_items.insert("Music".to_string(), vec![put("1"), put("2")]);
    let err = client(conn, 3)
        .batch_write_all(
            BatchWriteItemInput::builder()
                .request_items(request_items)
                .build(),
        )
        .await
        .unwrap_err();
    assert_eq!(bodies.lock().unwrap().len(), 2);
    assert_eq!(err.round(), 1);
    assert_eq!(err.sdk_error().kind(), ErrorKind::ResourceNotFound);

    let (partial, _) = err.into_parts();
    let partial = partial.expect("the first round succeeded");
    let mut unsent = HashMap::new();
    unsent.insert("Music".to_string(), vec![put("2")]);
    assert_eq!(partial.unprocessed_items, Some(unsent));
    assert_eq!(partial.consumed_capacity.unwrap().len(), 1);
}

#[tokio::test]
async fn a_failed_first_round_has_no_partial_output() {
    let conn = infallible_connection_fn(|_| {
        http::Response::builder()
            .status(400)
            .body(SdkBody::from(
                r#"{"__type":"com.amazonaws.dynamodb.v20120810#ResourceNotFoundException","message":"gone"}"#,
            ))
            .unwrap()
    });
    let mut request_items = HashMap::new();
    request_items.insert(
        "Music".to_string(),
        KeysAndAttributes::builder().keys(vec![item("1")]).build(),
    );
    let err = client(conn, 3)
        .batch_get_all(
            BatchGetItemInput::builder()
                .request_items(request_items)
                .build(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.round(), 0);
    assert!(err.partial().is_none());
    assert!(err.to_string().starts_with("batch round 0 failed"), "{}", err);
}
