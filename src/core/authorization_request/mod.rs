use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use tracing::debug;
use url::Url;

use crate::config::AuthenticationOptions;

use super::{
    claims::Claims,
    metadata::ProviderMetadata,
    scope::ScopeSet,
    version::{detection::InvalidScope, Version},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Code,
}

/// A Mobile Connect authentication request, as sent to the provider's
/// `authorization_endpoint`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub response_type: ResponseType,
    pub redirect_uri: Url,
    pub scope: String,
    pub version: Version,
    pub state: String,
    pub nonce: String,
    /// The serialized KYC `claims` document, if any attribute is requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claims: Option<String>,
}

impl AuthorizationRequest {
    /// Prepare an authentication request, resolving the protocol version against the
    /// provider's metadata.
    ///
    /// # Errors
    /// Returns [InvalidScope] if no version supported by the provider accepts the
    /// requested scope.
    pub fn new(
        options: &AuthenticationOptions,
        provider_metadata: Option<&ProviderMetadata>,
        client_id: String,
        redirect_uri: Url,
        state: String,
        nonce: String,
    ) -> Result<Self, InvalidScope> {
        let version = options.resolve_version(provider_metadata)?;
        if let Some(provider_metadata) = provider_metadata {
            match provider_metadata.unsupported_scopes(&ScopeSet::parse(&options.scope)) {
                Ok(unsupported) => {
                    for scope in unsupported {
                        debug!("scope '{scope}' is not in the provider's scopes_supported")
                    }
                }
                Err(e) => debug!("ignoring provider scopes_supported: {e:#}"),
            }
        }
        Ok(Self {
            client_id,
            response_type: ResponseType::Code,
            redirect_uri,
            scope: options.scope.clone(),
            version,
            state,
            nonce,
            claims: options.claims(),
        })
    }

    pub fn scopes(&self) -> ScopeSet {
        ScopeSet::parse(&self.scope)
    }

    /// Parse the `claims` parameter back into a JSON document.
    pub fn claims(&self) -> Option<Result<Claims>> {
        self.claims
            .clone()
            .map(|claims| Claims::try_from(Json::String(claims)))
    }

    /// Encode as [Url], using the `authorization_endpoint` as a base.
    /// ```
    /// # use mobile_connect::core::authorization_request::{AuthorizationRequest, ResponseType};
    /// # use mobile_connect::core::version::Version;
    /// # use url::Url;
    /// let authorization_endpoint: Url = "https://operator.example/authorize".parse().unwrap();
    /// let authorization_request = AuthorizationRequest {
    ///     client_id: "xyz".to_string(),
    ///     response_type: ResponseType::Code,
    ///     redirect_uri: "https://rp.example/cb".parse().unwrap(),
    ///     scope: "openid mc_authn".to_string(),
    ///     version: Version::V2_0,
    ///     state: "s1".to_string(),
    ///     nonce: "n1".to_string(),
    ///     claims: None,
    /// };
    ///
    /// let authorization_request_url = authorization_request.to_url(authorization_endpoint).unwrap();
    ///
    /// assert_eq!(
    ///     authorization_request_url.as_str(),
    ///     "https://operator.example/authorize?client_id=xyz&response_type=code\
    ///      &redirect_uri=https%3A%2F%2Frp.example%2Fcb&scope=openid+mc_authn\
    ///      &version=mc_v2.0&state=s1&nonce=n1"
    /// );
    /// ```
    pub fn to_url(self, mut authorization_endpoint: Url) -> Result<Url> {
        let query = serde_urlencoded::to_string(self)?;
        authorization_endpoint.set_query(Some(&query));
        Ok(authorization_endpoint)
    }

    /// Parse from [Url], validating the authorization_endpoint.
    pub fn from_url(url: Url, authorization_endpoint: &Url) -> Result<Self> {
        let query = url
            .query()
            .ok_or(anyhow!("missing query params in authentication request uri"))?;
        let fnd = url.authority();
        let exp = authorization_endpoint.authority();
        if fnd != exp {
            bail!("unexpected authorization_endpoint authority, expected '{exp}', received '{fnd}'")
        }
        let fnd = url.path();
        let exp = authorization_endpoint.path();
        if fnd != exp {
            bail!("unexpected authorization_endpoint path, expected '{exp}', received '{fnd}'")
        }
        Self::from_query_params(query)
    }

    /// Parse from urlencoded query parameters.
    /// ```
    /// # use mobile_connect::core::authorization_request::AuthorizationRequest;
    /// # use mobile_connect::core::version::Version;
    /// let query = "client_id=xyz&response_type=code&redirect_uri=https%3A%2F%2Frp.example%2Fcb\
    ///              &scope=openid&version=mc_v1.1&state=s1&nonce=n1";
    ///
    /// let authorization_request = AuthorizationRequest::from_query_params(query).unwrap();
    ///
    /// assert_eq!(authorization_request.client_id, "xyz");
    /// assert_eq!(authorization_request.version, Version::V1_1);
    /// assert!(authorization_request.claims.is_none());
    /// ```
    pub fn from_query_params(query_params: &str) -> Result<Self> {
        serde_urlencoded::from_str(query_params)
            .context("unable to parse authentication request from query params")
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use crate::core::claims::{KycClaims, PREMIUM_INFO};

    use super::*;

    fn endpoint() -> Url {
        "https://operator.example/oidc/authorize".parse().unwrap()
    }

    fn request(claims: Option<String>) -> AuthorizationRequest {
        AuthorizationRequest {
            client_id: "client-1".into(),
            response_type: ResponseType::Code,
            redirect_uri: "https://rp.example/callback".parse().unwrap(),
            scope: "openid mc_kyc_plain".into(),
            version: Version::V2_3Di,
            state: "state-1".into(),
            nonce: "nonce-1".into(),
            claims,
        }
    }

    #[test]
    fn url_round_trip_with_claims() {
        let claims = KycClaims::builder()
            .with_postal_code("SW1A 1AA".into())
            .build()
            .to_request_parameter();
        let exp = request(claims);

        let url = exp.clone().to_url(endpoint()).unwrap();
        assert!(url
            .query()
            .unwrap()
            .contains("claims=%7B%22premiuminfo%22"));

        let parsed = AuthorizationRequest::from_url(url, &endpoint()).unwrap();
        assert_eq!(parsed, exp);

        let Claims(document) = parsed.claims().unwrap().unwrap();
        assert_eq!(
            document[PREMIUM_INFO],
            json!({ "postal_code": { "value": "SW1A 1AA" } })
        );
    }

    #[test]
    fn claims_omitted_when_absent() {
        let url = request(None).to_url(endpoint()).unwrap();
        assert!(!url.query().unwrap().contains("claims"));
    }

    #[test]
    fn from_url_checks_endpoint() {
        let url = request(None).to_url(endpoint()).unwrap();
        let other: Url = "https://operator.example/other".parse().unwrap();
        let err = AuthorizationRequest::from_url(url, &other).unwrap_err();
        assert!(err.to_string().contains("unexpected authorization_endpoint path"));

        let err = AuthorizationRequest::from_url(endpoint(), &endpoint()).unwrap_err();
        assert!(err.to_string().contains("missing query params"));
    }

    #[test]
    fn scopes_outside_scopes_supported_are_still_requested() {
        let options = AuthenticationOptions {
            scope: "openid mc_authn mc_vm_match".into(),
            ..Default::default()
        };
        for scopes_supported in [json!(["openid", "mc_authn"]), json!("openid")] {
            let metadata: ProviderMetadata = serde_json::from_value(json!({
                "scopes_supported": scopes_supported,
                "mc_version": ["mc_v2.0"]
            }))
            .unwrap();
            let request = AuthorizationRequest::new(
                &options,
                Some(&metadata),
                "client-1".into(),
                "https://rp.example/callback".parse().unwrap(),
                "state-1".into(),
                "nonce-1".into(),
            )
            .unwrap();
            assert_eq!(request.scope, "openid mc_authn mc_vm_match");
            assert_eq!(request.version, Version::V2_0);
        }
    }

    #[test]
    fn scopes() {
        let scopes = request(None).scopes();
        assert_eq!(scopes, ScopeSet::parse("mc_kyc_plain openid"));
    }
}
