/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::signer::{RequestConfig, SigV4Signer, SigningError};
use aws_types::credentials::{CredentialsError, ProvideCredentials, SharedCredentialsProvider};
use aws_types::region::SigningRegion;
use aws_types::SigningService;
use smithy_http::middleware::MapRequest;
use smithy_http::operation::Request;
use smithy_http::property_bag::PropertyBag;
use std::time::SystemTime;
use thiserror::Error;

/// Middleware stage to sign requests with SigV4
///
/// SigV4SigningStage will load configuration from the request property bag and add
/// a signature.
///
/// Prior to signing, the following fields MUST be present in the property bag:
/// - [`SigningRegion`](SigningRegion): The region used when signing the request, eg. `us-east-1`
/// - [`SigningService`](SigningService): The name of the service to use when signing the request, eg. `dynamodb`
/// - [`SharedCredentialsProvider`](SharedCredentialsProvider): A credentials provider to retrieve credentials
/// If any of these fields are missing, the middleware will return an error.
///
/// The following fields MAY be present in the property bag:
/// - [`SystemTime`](SystemTime): The timestamp to use when signing the request. If this field is not present
///   [`SystemTime::now`](SystemTime::now) will be used.
#[derive(Clone, Debug, Default)]
pub struct SigV4SigningStage {
    signer: SigV4Signer,
}

impl SigV4SigningStage {
    pub fn new(signer: SigV4Signer) -> Self {
        Self { signer }
    }
}

#[derive(Debug, Error)]
pub enum SigningStageError {
    #[error("No credentials provider in the property bag")]
    MissingCredentialsProvider,
    #[error("No signing region in the property bag")]
    MissingSigningRegion,
    #[error("No signing service in the property bag")]
    MissingSigningService,
    #[error("Signing failed: {0}")]
    SigningFailure(#[from] SigningError),
    #[error("Failed to load credentials from the credentials provider: {0}")]
    CredentialsLoadingError(#[from] CredentialsError),
}

pub fn set_provider(bag: &mut PropertyBag, provider: SharedCredentialsProvider) {
    bag.insert(provider);
}

impl MapRequest for SigV4SigningStage {
    type Error = SigningStageError;

    fn apply(&self, req: Request) -> Result<Request, Self::Error> {
        req.augment(|mut req, config| {
            let creds = config
                .get::<SharedCredentialsProvider>()
                .ok_or(SigningStageError::MissingCredentialsProvider)?
                .provide_credentials()?;
            let region = config
                .get::<SigningRegion>()
                .ok_or(SigningStageError::MissingSigningRegion)?;
            let service = config
                .get::<SigningService>()
                .ok_or(SigningStageError::MissingSigningService)?;
            let request_config = RequestConfig {
                request_ts: config
                    .get::<SystemTime>()
                    .copied()
                    .unwrap_or_else(SystemTime::now),
                region,
                service,
            };

            self.signer.sign(&request_config, &creds, &mut req)?;
            Ok(req)
        })
    }
}

#[cfg(test)]
mod test {
    use crate::middleware::{set_provider, SigV4SigningStage, SigningStageError};
    use aws_endpoint::{set_endpoint_resolver, AwsEndpointStage, RegionalEndpoint};
    use aws_types::credentials::{Credentials, SharedCredentialsProvider};
    use aws_types::region::Region;
    use aws_types::SigningService;
    use http::header::AUTHORIZATION;
    use smithy_http::body::SdkBody;
    use smithy_http::middleware::MapRequest;
    use smithy_http::operation;
    use std::sync::Arc;
    use std::time::{Duration, UNIX_EPOCH};

    fn request() -> operation::Request {
        let req = http::Request::builder()
            .method("POST")
            .uri("/")
            .header("x-amz-target", "DynamoDB_20120810.ListTables")
            .header("content-type", "application/x-amz-json-1.0")
            .body(SdkBody::from("{}"))
            .unwrap();
        let mut req = operation::Request::new(req);
        {
            let mut props = req.properties_mut();
            props.insert(Region::new("us-east-1"));
            props.insert(SigningService::from_static("dynamodb"));
            props.insert(UNIX_EPOCH + Duration::from_secs(1_600_000_000));
            set_endpoint_resolver(&mut props, Arc::new(RegionalEndpoint::new("dynamodb")));
        }
        req
    }

    // check that the endpoint middleware followed by signing middleware produce the expected result
    #[test]
    fn endpoint_plus_signer() {
        let mut req = request();
        set_provider(
            &mut req.properties_mut(),
            SharedCredentialsProvider::new(Credentials::from_keys("AKID", "secret", None)),
        );
        let req = AwsEndpointStage.apply(req).expect("endpoint resolves");
        let req = SigV4SigningStage::default()
            .apply(req)
            .expect("signing succeeded");
        let (req, _) = req.into_parts();
        let auth = req
            .headers()
            .get(AUTHORIZATION)
            .expect("auth header must be present")
            .to_str()
            .unwrap();
        assert!(
            auth.starts_with(
                "AWS4-HMAC-SHA256 Credential=AKID/20200913/us-east-1/dynamodb/aws4_request, \
                 SignedHeaders=content-type;host;x-amz-date;x-amz-target, Signature="
            ),
            "{}",
            auth
        );
        assert_eq!(req.headers().get("x-amz-date").unwrap(), "20200913T122640Z");
        assert_eq!(req.body().bytes(), Some(&b"{}"[..]));
    }

    #[test]
    fn missing_credentials_is_an_error() {
        let req = AwsEndpointStage.apply(request()).expect("endpoint resolves");
        let err = SigV4SigningStage::default()
            .apply(req)
            .expect_err("no credentials provider");
        assert!(matches!(err, SigningStageError::MissingCredentialsProvider));
    }

    #[test]
    fn missing_signing_region_is_an_error() {
        let mut req = request();
        set_provider(
            &mut req.properties_mut(),
            SharedCredentialsProvider::new(Credentials::from_keys("AKID", "secret", None)),
        );
        let err = SigV4SigningStage::default()
            .apply(req)
            .expect_err("endpoint stage did not run");
        assert!(matches!(err, SigningStageError::MissingSigningRegion));
    }
}
