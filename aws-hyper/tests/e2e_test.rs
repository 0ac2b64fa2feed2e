/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_endpoint::{set_endpoint_resolver, RegionalEndpoint};
use aws_hyper::user_agent::AwsUserAgent;
use aws_sig_auth::middleware::set_provider;
use aws_types::credentials::{Credentials, SharedCredentialsProvider};
use aws_types::region::Region;
use aws_types::SigningService;
use bytes::Bytes;
use http::header::{AUTHORIZATION, USER_AGENT};
use http::Uri;
use smithy_client::test_connection::TestConnection;
use smithy_client::{retry, SdkError};
use smithy_http::body::SdkBody;
use smithy_http::operation::{self, Metadata, Operation};
use smithy_http::response::ParseStrictResponse;
use smithy_http::retry::DefaultResponseClassifier;
use smithy_types::retry::{ErrorKind, ProvideErrorKind};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

#[derive(Clone)]
struct TestOperationParser;

#[derive(Debug)]
struct OperationError;

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OperationError")
    }
}

impl std::error::Error for OperationError {}

impl ProvideErrorKind for OperationError {
    fn retryable_error_kind(&self) -> Option<ErrorKind> {
        Some(ErrorKind::ThrottlingError)
    }

    fn code(&self) -> Option<&str> {
        None
    }
}

impl ParseStrictResponse for TestOperationParser {
    type Output = Result<String, OperationError>;

    fn parse(&self, response: &http::Response<Bytes>) -> Self::Output {
        if response.status().is_success() {
            Ok("Hello!".to_string())
        } else {
            Err(OperationError)
        }
    }
}

fn test_operation(with_credentials: bool) -> Operation<TestOperationParser, DefaultResponseClassifier> {
    let req = operation::Request::new(
        http::Request::builder()
            .method("POST")
            .uri("/")
            .header("x-amz-target", "DynamoDB_20120810.ListTables")
            .body(SdkBody::from("{}"))
            .unwrap(),
    )
    .augment(|req, conf| {
        set_endpoint_resolver(conf, Arc::new(RegionalEndpoint::new("dynamodb")));
        conf.insert(Region::new("us-east-1"));
        conf.insert(SigningService::from_static("dynamodb"));
        conf.insert(UNIX_EPOCH + Duration::from_secs(1_613_414_417));
        conf.insert(AwsUserAgent::for_tests());
        if with_credentials {
            set_provider(
                conf,
                SharedCredentialsProvider::new(Credentials::from_keys(
                    "access_key",
                    "secret_key",
                    None,
                )),
            );
        }
        Result::<_, ()>::Ok(req)
    })
    .unwrap();
    Operation::new(req, TestOperationParser)
        .with_metadata(Metadata::new("ListTables", "dynamodb"))
        .with_retry_policy(DefaultResponseClassifier::default())
}

fn expected_request() -> http::Request<SdkBody> {
    http::Request::builder()
        .header(USER_AGENT, "aws-sdk-rust/0.123.test os/windows")
        .header("x-amz-user-agent", "aws-sdk-rust/0.123.test api/test-service/0.123 os/windows lang/rust")
        .header("x-amz-date", "20210215T184017Z")
        .header("x-amz-target", "DynamoDB_20120810.ListTables")
        .uri(Uri::from_static("https://dynamodb.us-east-1.amazonaws.com/"))
        .body(SdkBody::from("{}"))
        .unwrap()
}

#[tokio::test]
async fn e2e_test() {
    let conn = TestConnection::new(vec![(
        expected_request(),
        http::Response::builder()
            .status(http::StatusCode::from_u16(200).unwrap())
            .body("response body")
            .unwrap(),
    )]);
    let client = aws_hyper::builder().connector(conn.clone()).build();
    let resp = client.call(test_operation(true)).await;
    assert_eq!(resp.expect("successful operation"), "Hello!");
    conn.assert_requests_match(&[]);

    let requests = conn.requests();
    let auth = requests[0]
        .actual
        .headers()
        .get(AUTHORIZATION)
        .expect("request is signed")
        .to_str()
        .unwrap();
    assert!(auth.starts_with(
        "AWS4-HMAC-SHA256 Credential=access_key/20210215/us-east-1/dynamodb/aws4_request, \
         SignedHeaders=host;x-amz-date;x-amz-target, Signature="
    ));
}

#[tokio::test]
async fn every_attempt_is_signed_again() {
    let conn = TestConnection::new(vec![
        (
            expected_request(),
            http::Response::builder().status(400).body("").unwrap(),
        ),
        (
            expected_request(),
            http::Response::builder().status(200).body("").unwrap(),
        ),
    ]);
    let client = aws_hyper::builder()
        .connector(conn.clone())
        .retry_config(retry::Config::default().with_jitter(|| 0.0))
        .build();
    client
        .call(test_operation(true))
        .await
        .expect("second attempt succeeds");
    assert_eq!(conn.num_calls(), 2);
    for request in conn.requests().iter() {
        assert_eq!(
            request.actual.headers().get_all(AUTHORIZATION).iter().count(),
            1
        );
    }
}

#[tokio::test]
async fn missing_credentials_fail_before_dispatch() {
    let conn = TestConnection::<&'static str>::new(vec![]);
    let client = aws_hyper::builder().connector(conn.clone()).build();
    let err = client
        .call(test_operation(false))
        .await
        .expect_err("no credentials");
    match err {
        SdkError::ConstructionFailure(err) => {
            assert!(err.to_string().contains("credentials provider"), "{}", err)
        }
        other => panic!("expected a construction failure, got {:?}", other),
    }
    assert_eq!(conn.num_calls(), 0);
}
