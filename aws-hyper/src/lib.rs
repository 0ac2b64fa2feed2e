/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! The AWS middleware stack and the standard client for AWS services.
//!
//! [`AwsMiddleware`] runs, in order, endpoint resolution, user agent generation and SigV4
//! signing against the configuration stored in each request's property bag. Service crates
//! build a [`Client`] with it.

pub mod user_agent;

use aws_endpoint::AwsEndpointStage;
use aws_sig_auth::middleware::SigV4SigningStage;
use aws_sig_auth::signer::SigV4Signer;
use smithy_http::middleware::MapRequest;
use smithy_http::operation;
use std::error::Error;
use user_agent::UserAgentStage;

pub type BoxError = Box<dyn Error + Send + Sync>;

/// The standard client for AWS services
pub type Client = smithy_client::Client<AwsMiddleware>;

/// AWS Middleware Stack
///
/// This implements the middleware stack for this service. It will:
/// 1. Load credentials from the credentials provider in the property bag
/// 2. Resolve the endpoint and the signing scope
/// 3. Set the user agent headers
/// 4. Sign with credentials
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct AwsMiddleware {
    signer: SigV4SigningStage,
}

impl AwsMiddleware {
    pub fn new() -> Self {
        AwsMiddleware {
            signer: SigV4SigningStage::new(SigV4Signer::new()),
        }
    }
}

impl MapRequest for AwsMiddleware {
    type Error = BoxError;

    fn apply(&self, request: operation::Request) -> Result<operation::Request, Self::Error> {
        let request = AwsEndpointStage.apply(request)?;
        let request = UserAgentStage::new().apply(request)?;
        let request = self.signer.apply(request)?;
        Ok(request)
    }
}

/// A client builder with the AWS middleware stack installed
pub fn builder() -> smithy_client::Builder<(), AwsMiddleware> {
    smithy_client::Builder::new().middleware(AwsMiddleware::new())
}

/// A client that connects over HTTPS with rustls, using the default retry policy
#[cfg(feature = "rustls")]
pub fn https() -> Client {
    builder().rustls().build()
}
