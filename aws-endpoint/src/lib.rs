/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use std::error::Error;
use std::fmt::Debug;
use std::str::FromStr;
use std::sync::Arc;

use http::uri::{InvalidUri, Uri};

use aws_types::region::{Region, SigningRegion};
use aws_types::SigningService;
use smithy_http::middleware::MapRequest;
use smithy_http::operation::Request;
use smithy_http::property_bag::PropertyBag;

pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// The scope for AWS credentials
///
/// Endpoints may override the region or service a request is signed with.
#[derive(Clone, Default, Debug, Eq, PartialEq)]
pub struct CredentialScope {
    region: Option<SigningRegion>,
    service: Option<SigningService>,
}

impl CredentialScope {
    pub fn new(region: Option<SigningRegion>, service: Option<SigningService>) -> Self {
        CredentialScope { region, service }
    }

    pub fn region(&self) -> Option<&SigningRegion> {
        self.region.as_ref()
    }

    pub fn service(&self) -> Option<&SigningService> {
        self.service.as_ref()
    }
}

/// A resolved endpoint: the base URI requests are sent to and the scope they are signed with.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AwsEndpoint {
    uri: Uri,
    credential_scope: CredentialScope,
}

impl AwsEndpoint {
    pub fn new(uri: Uri, credential_scope: CredentialScope) -> Self {
        AwsEndpoint {
            uri,
            credential_scope,
        }
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn credential_scope(&self) -> &CredentialScope {
        &self.credential_scope
    }

    /// Replace the scheme and authority of `uri` with this endpoint's, keeping the path and query.
    pub fn set_endpoint(&self, uri: &mut Uri) -> Result<(), http::Error> {
        let path_and_query = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let base_path = self.uri.path().trim_end_matches('/');
        let mut builder = Uri::builder();
        if let Some(scheme) = self.uri.scheme() {
            builder = builder.scheme(scheme.clone());
        }
        if let Some(authority) = self.uri.authority() {
            builder = builder.authority(authority.clone());
        }
        *uri = builder
            .path_and_query(format!("{}{}", base_path, path_and_query))
            .build()?;
        Ok(())
    }
}

/// Resolve the endpoint for a region
pub trait ResolveAwsEndpoint: Send + Sync + Debug {
    fn resolve_endpoint(&self, region: &Region) -> Result<AwsEndpoint, BoxError>;
}

/// Regional endpoint resolver following the `{service}.{region}.{dns suffix}` pattern
///
/// Regions in the China partition (`cn-` prefix) use the `amazonaws.com.cn` suffix.
#[derive(Clone, Debug)]
pub struct RegionalEndpoint {
    service: &'static str,
}

impl RegionalEndpoint {
    pub fn new(service: &'static str) -> Self {
        RegionalEndpoint { service }
    }
}

impl ResolveAwsEndpoint for RegionalEndpoint {
    fn resolve_endpoint(&self, region: &Region) -> Result<AwsEndpoint, BoxError> {
        let region = region.as_ref();
        if region.is_empty() || !region.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(format!("invalid region: `{}`", region).into());
        }
        let suffix = if region.starts_with("cn-") {
            "amazonaws.com.cn"
        } else {
            "amazonaws.com"
        };
        let uri = Uri::from_str(&format!("https://{}.{}.{}", self.service, region, suffix))?;
        Ok(AwsEndpoint::new(uri, CredentialScope::default()))
    }
}

/// An endpoint that ignores the region, eg. DynamoDB Local at `http://localhost:8000`
#[derive(Clone, Debug)]
pub struct StaticEndpoint(AwsEndpoint);

impl StaticEndpoint {
    pub fn from_uri(uri: Uri) -> Self {
        StaticEndpoint(AwsEndpoint::new(uri, CredentialScope::default()))
    }

    pub fn parse(uri: &str) -> Result<Self, InvalidUri> {
        Ok(Self::from_uri(Uri::from_str(uri)?))
    }

    pub fn with_credential_scope(mut self, scope: CredentialScope) -> Self {
        self.0.credential_scope = scope;
        self
    }
}

impl ResolveAwsEndpoint for StaticEndpoint {
    fn resolve_endpoint(&self, _region: &Region) -> Result<AwsEndpoint, BoxError> {
        Ok(self.0.clone())
    }
}

pub type AwsEndpointResolver = Arc<dyn ResolveAwsEndpoint>;

pub fn get_endpoint_resolver(properties: &PropertyBag) -> Option<&AwsEndpointResolver> {
    properties.get()
}

pub fn set_endpoint_resolver(properties: &mut PropertyBag, provider: AwsEndpointResolver) {
    properties.insert(provider);
}

/// Middleware Stage to Add an Endpoint to a Request
///
/// AwsEndpointStage implements [`MapRequest`](smithy_http::middleware::MapRequest). It will:
/// 1. Load an endpoint provider from the property bag.
/// 2. Load an endpoint given the [`Region`](aws_types::region::Region) in the property bag.
/// 3. Apply the endpoint to the URI in the request
/// 4. Set the `SigningRegion` and `SigningService` in the property bag to drive downstream
/// signing middleware.
#[derive(Clone, Debug)]
pub struct AwsEndpointStage;

#[derive(Debug, thiserror::Error)]
pub enum AwsEndpointStageError {
    #[error("no endpoint resolver in the property bag")]
    NoEndpointResolver,
    #[error("no region in the property bag")]
    NoRegion,
    #[error("failed to resolve an endpoint: {0}")]
    EndpointResolutionError(BoxError),
    #[error("resolved endpoint produced an invalid URI: {0}")]
    InvalidUri(#[from] http::Error),
}

impl MapRequest for AwsEndpointStage {
    type Error = AwsEndpointStageError;

    fn apply(&self, request: Request) -> Result<Request, Self::Error> {
        request.augment(|mut http_req, props| {
            let provider =
                get_endpoint_resolver(props).ok_or(AwsEndpointStageError::NoEndpointResolver)?;
            let region = props
                .get::<Region>()
                .ok_or(AwsEndpointStageError::NoRegion)?;
            let endpoint = provider
                .resolve_endpoint(region)
                .map_err(AwsEndpointStageError::EndpointResolutionError)?;
            tracing::debug!(endpoint = ?endpoint.uri(), base_region = %region, "resolved endpoint");
            let signing_region = endpoint
                .credential_scope()
                .region()
                .cloned()
                .unwrap_or_else(|| region.clone().into());
            props.insert::<SigningRegion>(signing_region);
            if let Some(signing_service) = endpoint.credential_scope().service() {
                props.insert::<SigningService>(signing_service.clone());
            }
            endpoint.set_endpoint(http_req.uri_mut())?;
            Ok(http_req)
        })
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use http::header::HOST;
    use http::Uri;

    use aws_types::region::{Region, SigningRegion};
    use aws_types::SigningService;
    use smithy_http::body::SdkBody;
    use smithy_http::middleware::MapRequest;
    use smithy_http::operation;

    use crate::{
        set_endpoint_resolver, AwsEndpointStage, AwsEndpointStageError, CredentialScope,
        RegionalEndpoint, ResolveAwsEndpoint, StaticEndpoint,
    };

    fn request(region: Option<Region>, resolver: Arc<dyn ResolveAwsEndpoint>) -> operation::Request {
        let req = http::Request::builder()
            .uri("/")
            .body(SdkBody::from("{}"))
            .unwrap();
        let mut req = operation::Request::new(req);
        {
            let mut props = req.properties_mut();
            if let Some(region) = region {
                props.insert(region);
            }
            props.insert(SigningService::from_static("dynamodb"));
            set_endpoint_resolver(&mut props, resolver);
        }
        req
    }

    #[test]
    fn default_endpoint_updates_request() {
        let region = Region::new("us-east-1");
        let req = request(
            Some(region.clone()),
            Arc::new(RegionalEndpoint::new("dynamodb")),
        );
        let req = AwsEndpointStage.apply(req).expect("should succeed");
        assert_eq!(req.properties().get(), Some(&SigningRegion::from(region)));
        assert_eq!(
            req.properties().get(),
            Some(&SigningService::from_static("dynamodb"))
        );

        let (req, _conf) = req.into_parts();
        assert_eq!(
            req.uri(),
            &Uri::from_static("https://dynamodb.us-east-1.amazonaws.com/")
        );
        assert!(req.headers().get(HOST).is_none());
    }

    #[test]
    fn china_regions_use_the_cn_suffix() {
        let endpoint = RegionalEndpoint::new("dynamodb")
            .resolve_endpoint(&Region::from_static("cn-north-1"))
            .expect("valid region");
        assert_eq!(
            endpoint.uri(),
            &Uri::from_static("https://dynamodb.cn-north-1.amazonaws.com.cn")
        );
    }

    #[test]
    fn invalid_regions_are_rejected() {
        let err = RegionalEndpoint::new("dynamodb")
            .resolve_endpoint(&Region::from_static("us-east-1/../evil"))
            .expect_err("slashes are not valid in regions");
        assert!(err.to_string().contains("invalid region"));
    }

    #[test]
    fn static_endpoint_keeps_path_and_overrides_scope() {
        let resolver = StaticEndpoint::parse("http://localhost:8000")
            .expect("valid uri")
            .with_credential_scope(CredentialScope::new(
                Some(SigningRegion::from_static("local")),
                Some(SigningService::from_static("ddb-local")),
            ));
        let req = request(Some(Region::new("us-east-1")), Arc::new(resolver));
        let req = AwsEndpointStage.apply(req).expect("should succeed");
        assert_eq!(
            req.properties().get(),
            Some(&SigningRegion::from_static("local"))
        );
        assert_eq!(
            req.properties().get(),
            Some(&SigningService::from_static("ddb-local"))
        );
        assert_eq!(req.http().uri(), &Uri::from_static("http://localhost:8000/"));
    }

    #[test]
    fn missing_region_fails() {
        let req = request(None, Arc::new(RegionalEndpoint::new("dynamodb")));
        let err = AwsEndpointStage.apply(req).expect_err("no region");
        assert!(matches!(err, AwsEndpointStageError::NoRegion));
    }
}
