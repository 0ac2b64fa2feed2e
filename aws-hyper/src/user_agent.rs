/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use http::header::{HeaderValue, InvalidHeaderValue, USER_AGENT};
use smithy_http::middleware::MapRequest;
use smithy_http::operation::Request;
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// AWS User Agent
///
/// This struct should be inserted into the [`PropertyBag`](smithy_http::property_bag::PropertyBag)
/// during operation construction. [`UserAgentStage`](UserAgentStage) reads `AwsUserAgent`
/// from the property bag and sets the `User-Agent` and `x-amz-user-agent` headers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AwsUserAgent {
    sdk_version: &'static str,
    api_metadata: ApiMetadata,
    os: &'static str,
}

impl AwsUserAgent {
    pub fn new_from_environment(api_metadata: ApiMetadata) -> Self {
        AwsUserAgent {
            sdk_version: SDK_VERSION,
            api_metadata,
            os: std::env::consts::OS,
        }
    }

    /// For test purposes, construct an environment-independent User Agent
    pub fn for_tests() -> Self {
        AwsUserAgent {
            sdk_version: "0.123.test",
            api_metadata: ApiMetadata::new("test-service", "0.123"),
            os: "windows",
        }
    }

    /// Generate a new-style user agent header
    pub fn aws_ua_header(&self) -> String {
        format!(
            "aws-sdk-rust/{} {} os/{} lang/rust",
            self.sdk_version, self.api_metadata, self.os
        )
    }

    /// Generate an old-style User-Agent header for backward compatibility
    pub fn ua_header(&self) -> String {
        format!("aws-sdk-rust/{} os/{}", self.sdk_version, self.os)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiMetadata {
    service_id: &'static str,
    version: &'static str,
}

impl ApiMetadata {
    pub const fn new(service_id: &'static str, version: &'static str) -> Self {
        Self {
            service_id,
            version,
        }
    }
}

impl Display for ApiMetadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "api/{}/{}", self.service_id, self.version)
    }
}

#[derive(Clone, Copy, Debug, Default)]
#[non_exhaustive]
pub struct UserAgentStage;

impl UserAgentStage {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug)]
pub enum UserAgentStageError {
    UserAgentMissing,
    InvalidHeader(InvalidHeaderValue),
}

impl Error for UserAgentStageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            UserAgentStageError::InvalidHeader(err) => Some(err),
            UserAgentStageError::UserAgentMissing => None,
        }
    }
}

impl Display for UserAgentStageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            UserAgentStageError::UserAgentMissing => {
                write!(f, "user agent missing from property bag")
            }
            UserAgentStageError::InvalidHeader(_) => {
                write!(f, "provided user agent header was invalid")
            }
        }
    }
}

impl From<InvalidHeaderValue> for UserAgentStageError {
    fn from(err: InvalidHeaderValue) -> Self {
        UserAgentStageError::InvalidHeader(err)
    }
}

const X_AMZ_USER_AGENT: &str = "x-amz-user-agent";

impl MapRequest for UserAgentStage {
    type Error = UserAgentStageError;

    fn apply(&self, request: Request) -> Result<Request, Self::Error> {
        request.augment(|mut req, conf| {
            let ua = conf
                .get::<AwsUserAgent>()
                .ok_or(UserAgentStageError::UserAgentMissing)?;
            req.headers_mut()
                .insert(USER_AGENT, HeaderValue::from_str(&ua.ua_header())?);
            req.headers_mut()
                .insert(X_AMZ_USER_AGENT, HeaderValue::from_str(&ua.aws_ua_header())?);
            Ok(req)
        })
    }
}
