/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Parsing of AWS JSON 1.0 error responses.

use crate::error::{map_error, ServiceError};
use crate::model::CancellationReason;
use bytes::Bytes;
use http::header::{HeaderMap, RETRY_AFTER};
use serde_json::Value;
use std::time::Duration;

const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";
const REQUEST_ID_HEADERS: &[&str] = &["x-amzn-requestid", "x-amz-request-id"];

/// Strip the namespace and any trailing URL from a wire error code.
///
/// `aws.protocoltests.restjson#FooError:http://internal.amazon.com/coral/...` becomes `FooError`.
pub fn sanitize_error_code(error_code: &str) -> &str {
    // Trim a trailing URL from the error code, beginning with a `:`
    let error_code = match error_code.find(':') {
        Some(idx) => &error_code[..idx],
        None => error_code,
    };

    // Trim a prefixing namespace from the error code, beginning with a `#`
    match error_code.find('#') {
        Some(idx) => &error_code[idx + 1..],
        None => error_code,
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

pub(crate) fn request_id(headers: &HeaderMap) -> Option<String> {
    REQUEST_ID_HEADERS
        .iter()
        .find_map(|name| header(headers, name))
        .map(str::to_owned)
}

fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    header(headers, RETRY_AFTER.as_str())?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

fn string_member(body: &Value, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| body.get(*name).and_then(Value::as_str))
        .map(str::to_owned)
}

/// Convert a non-2xx response into a [`ServiceError`].
///
/// The error code is taken from the `x-amzn-errortype` header when present, otherwise from the
/// `__type` member of the body. A body that is empty or not JSON still produces an error; its
/// kind then depends on the status code alone.
pub(crate) fn parse_service_error(response: &http::Response<Bytes>) -> ServiceError {
    let body: Value = if response.body().is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(response.body()).unwrap_or(Value::Null)
    };
    let code = header(response.headers(), ERROR_TYPE_HEADER)
        .map(str::to_owned)
        .or_else(|| string_member(&body, &["__type", "code"]))
        .map(|code| sanitize_error_code(&code).to_owned())
        .filter(|code| !code.is_empty());
    let message = string_member(&body, &["message", "Message", "errorMessage"]);
    let cancellation_reasons = body
        .get("CancellationReasons")
        .cloned()
        .and_then(|reasons| serde_json::from_value::<Vec<CancellationReason>>(reasons).ok())
        .unwrap_or_default();
    let kind = map_error(response.status().as_u16(), code.as_deref());
    let mut builder = ServiceError::builder()
        .kind(kind)
        .cancellation_reasons(cancellation_reasons);
    if let Some(code) = code {
        builder = builder.code(code);
    }
    if let Some(message) = message {
        builder = builder.message(message);
    }
    if let Some(request_id) = request_id(response.headers()) {
        builder = builder.request_id(request_id);
    }
    if let Some(delay) = retry_after(response.headers()) {
        builder = builder.retry_after(delay);
    }
    builder.build()
}

#[cfg(test)]
mod test {
    use crate::error::ErrorKind;
    use crate::json_errors::{parse_service_error, sanitize_error_code};
    use bytes::Bytes;
    use std::time::Duration;

    fn response(status: u16, headers: &[(&str, &str)], body: &str) -> http::Response<Bytes> {
        let mut builder = http::Response::builder().status(status);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Bytes::from(body.to_owned())).unwrap()
    }

    #[test]
    fn error_codes_are_sanitized() {
        assert_eq!(
            sanitize_error_code("aws.protocoltests.restjson#FooError:http://internal.amazon.com/coral/com.amazon.coral.validate/"),
            "FooError"
        );
        assert_eq!(
            sanitize_error_code("com.amazonaws.dynamodb.v20120810#ResourceNotFoundException"),
            "ResourceNotFoundException"
        );
        assert_eq!(sanitize_error_code("FooError:http://example.com"), "FooError");
        assert_eq!(sanitize_error_code("FooError"), "FooError");
    }

    #[test]
    fn body_type_and_message() {
        let err = parse_service_error(&response(
            400,
            &[("x-amzn-requestid", "ABCDEF")],
            r#"{"__type":"com.amazonaws.dynamodb.v20120810#ConditionalCheckFailedException","message":"The conditional request failed"}"#,
        ));
        assert_eq!(err.kind(), ErrorKind::ConditionalCheckFailed);
        assert_eq!(err.code(), Some("ConditionalCheckFailedException"));
        assert_eq!(err.message(), Some("The conditional request failed"));
        assert_eq!(err.request_id(), Some("ABCDEF"));
    }

    #[test]
    fn header_takes_precedence_over_body() {
        let err = parse_service_error(&response(
            400,
            &[("x-amzn-errortype", "ThrottlingException:http://internal.amazon.com/")],
            r#"{"__type":"ValidationException","Message":"Rate exceeded"}"#,
        ));
        assert_eq!(err.code(), Some("ThrottlingException"));
        assert_eq!(err.kind(), ErrorKind::RequestLimitExceeded);
        assert_eq!(err.message(), Some("Rate exceeded"));
    }

    #[test]
    fn cancellation_reasons_are_kept() {
        let err = parse_service_error(&response(
            400,
            &[],
            r#"{
                "__type": "com.amazonaws.dynamodb.v20120810#TransactionCanceledException",
                "Message": "Transaction cancelled, please refer cancellation reasons for specific reasons [None, ConditionalCheckFailed]",
                "CancellationReasons": [
                    {"Code": "None"},
                    {"Code": "ConditionalCheckFailed", "Message": "The conditional request failed", "Item": {"id": {"S": "1"}}}
                ]
            }"#,
        ));
        assert_eq!(err.kind(), ErrorKind::TransactionCanceled);
        let reasons = err.cancellation_reasons();
        assert_eq!(reasons.len(), 2);
        assert_eq!(reasons[0].code.as_deref(), Some("None"));
        assert_eq!(reasons[1].code.as_deref(), Some("ConditionalCheckFailed"));
        assert!(reasons[1].item.as_ref().unwrap().contains_key("id"));
    }

    #[test]
    fn unparseable_bodies_fall_back_to_status() {
        let err = parse_service_error(&response(503, &[("Retry-After", "3")], "<html>oops</html>"));
        assert_eq!(err.kind(), ErrorKind::InternalServer);
        assert_eq!(err.code(), None);
        assert_eq!(err.retry_after(), Some(Duration::from_secs(3)));

        let err = parse_service_error(&response(400, &[], ""));
        assert_eq!(err.kind(), ErrorKind::Service);
    }
}
