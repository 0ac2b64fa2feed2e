/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SigningParams, SigningSettings};
use aws_types::region::SigningRegion;
use aws_types::{Credentials, SigningService};
use smithy_http::body::SdkBody;
use std::fmt;
use std::time::SystemTime;

pub type SigningError = aws_sigv4::http_request::SigningError;

/// Signing Configuration for an individual Request
///
/// These fields may vary on a per-request basis
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RequestConfig<'a> {
    pub request_ts: SystemTime,
    pub region: &'a SigningRegion,
    pub service: &'a SigningService,
}

#[derive(Clone, Default)]
pub struct SigV4Signer {
    _private: (),
}

impl fmt::Debug for SigV4Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigV4Signer").finish()
    }
}

impl SigV4Signer {
    pub fn new() -> Self {
        SigV4Signer { _private: () }
    }

    fn signing_params<'a>(
        credentials: &'a Credentials,
        request_config: &'a RequestConfig<'a>,
    ) -> SigningParams<'a> {
        let mut builder = SigningParams::builder()
            .access_key(credentials.access_key_id())
            .secret_key(credentials.secret_access_key())
            .region(request_config.region.as_ref())
            .service_name(request_config.service.as_ref())
            .time(request_config.request_ts)
            .settings(SigningSettings::default());
        builder.set_security_token(credentials.session_token());
        builder.build().expect("all required fields set")
    }

    /// Sign `request` in place, adding `x-amz-date`, `x-amz-security-token` (for temporary
    /// credentials) and `authorization` headers. Returns the hex signature.
    ///
    /// Bodies that are not loaded into memory are signed as `UNSIGNED-PAYLOAD`.
    pub fn sign(
        &self,
        request_config: &RequestConfig<'_>,
        credentials: &Credentials,
        request: &mut http::Request<SdkBody>,
    ) -> Result<String, SigningError> {
        let signing_params = Self::signing_params(credentials, request_config);
        let (signing_instructions, signature) = {
            let signable_body = request
                .body()
                .bytes()
                .map(SignableBody::Bytes)
                .unwrap_or(SignableBody::UnsignedPayload);
            let signable_request = SignableRequest::new(
                request.method(),
                request.uri(),
                request.headers(),
                signable_body,
            );
            sign(signable_request, &signing_params)?
        }
        .into_parts();
        tracing::trace!(signature = %signature, "signed request");
        signing_instructions.apply_to_request(request);
        Ok(signature)
    }
}
