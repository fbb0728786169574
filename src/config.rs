use std::ops::Deref;

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

use crate::core::{
    claims::KycClaims,
    metadata::ProviderMetadata,
    version::{detection, detection::InvalidScope, Version},
};

const DEFAULT_SCOPE: &str = "openid";
const AUTHORIZE_PATH: &str = "authorize";

/// Caller options for a Mobile Connect authentication.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AuthenticationOptions {
    /// Space-delimited scope; `openid` when unset.
    #[serde(default = "default_scope")]
    pub scope: String,
    /// Explicit version hint, e.g. `mc_v2.0`.
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub kyc_claims: Option<KycClaims>,
    /// Provider base url. When set, requests go to `<base>authorize` regardless of
    /// the discovery metadata.
    #[serde(default)]
    pub provider_base: Option<BaseUrl>,
}

/// A url that is always a base (can be safely join()'ed with further path elements without
/// mangling).
#[derive(Deserialize, Debug, Clone, Hash, PartialEq, Eq)]
#[serde(try_from = "String")]
pub struct BaseUrl(Url);

impl Deref for BaseUrl {
    type Target = Url;

    fn deref(&self) -> &Url {
        &self.0
    }
}

impl TryFrom<String> for BaseUrl {
    type Error = url::ParseError;

    fn try_from(mut url: String) -> Result<Self, Self::Error> {
        if !url.ends_with('/') {
            url += "/"
        }
        url.parse().map(Self)
    }
}

fn default_scope() -> String {
    DEFAULT_SCOPE.to_owned()
}

impl Default for AuthenticationOptions {
    fn default() -> Self {
        Self {
            scope: default_scope(),
            version: None,
            kyc_claims: None,
            provider_base: None,
        }
    }
}

impl AuthenticationOptions {
    pub fn resolve_version(
        &self,
        provider_metadata: Option<&ProviderMetadata>,
    ) -> Result<Version, InvalidScope> {
        detection::resolve(self.version.as_deref(), &self.scope, provider_metadata)
    }

    /// Where to send the authentication request: the configured provider base if any,
    /// otherwise the `authorization_endpoint` from the discovery metadata.
    pub fn authorization_endpoint(
        &self,
        provider_metadata: Option<&ProviderMetadata>,
    ) -> Result<Url> {
        if let Some(base) = &self.provider_base {
            return base
                .join(AUTHORIZE_PATH)
                .context("unable to build authorization endpoint from provider base");
        }
        let provider_metadata =
            provider_metadata.context("no provider base or discovery metadata configured")?;
        Ok(provider_metadata.authorization_endpoint()?.0)
    }

    /// The serialized `claims` parameter. `None` unless at least one attribute is
    /// requested.
    pub fn claims(&self) -> Option<String> {
        self.kyc_claims
            .as_ref()
            .filter(|claims| !claims.is_empty())
            .and_then(KycClaims::to_request_parameter)
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn defaults() {
        let options: AuthenticationOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(options, AuthenticationOptions::default());
        assert_eq!(options.scope, "openid");
        assert_eq!(options.resolve_version(None), Ok(Version::V1_1));
        assert_eq!(options.claims(), None);
    }

    #[test]
    fn version_hint() {
        let options: AuthenticationOptions = serde_json::from_value(json!({
            "scope": "openid mc_authz",
            "version": "mc_v1.2"
        }))
        .unwrap();
        assert_eq!(options.resolve_version(None), Ok(Version::V1_2));
    }

    #[test]
    fn kyc_claims() {
        let options: AuthenticationOptions = serde_json::from_value(json!({
            "scope": "openid mc_kyc_hashed",
            "kyc_claims": { "birthdate_hashed": "5e8a" }
        }))
        .unwrap();
        assert_eq!(
            options.claims().as_deref(),
            Some(r#"{"premiuminfo":{"birthdate_hashed":{"value":"5e8a"}}}"#)
        );

        let metadata = ProviderMetadata::new(vec![Version::V2_3Di], None);
        assert_eq!(options.resolve_version(Some(&metadata)), Ok(Version::V2_3Di));
    }

    #[test]
    fn base_url_is_normalized() {
        let base = BaseUrl::try_from("https://operator.example/mc".to_owned()).unwrap();
        assert_eq!(base.as_str(), "https://operator.example/mc/");
        assert_eq!(
            base.join("authorize").unwrap().as_str(),
            "https://operator.example/mc/authorize"
        );

        let base = BaseUrl::try_from("https://operator.example/mc/".to_owned()).unwrap();
        assert_eq!(base.as_str(), "https://operator.example/mc/");

        assert!(BaseUrl::try_from("not a url".to_owned()).is_err());
    }

    #[test]
    fn provider_base_from_config() {
        let options: AuthenticationOptions = serde_json::from_value(json!({
            "provider_base": "https://operator.example/oidc"
        }))
        .unwrap();
        assert_eq!(
            options.provider_base.as_deref().map(Url::as_str),
            Some("https://operator.example/oidc/")
        );

        assert!(serde_json::from_value::<AuthenticationOptions>(json!({
            "provider_base": "operator.example"
        }))
        .is_err());
    }

    #[test]
    fn provider_base_overrides_discovery() {
        let metadata: ProviderMetadata = serde_json::from_value(json!({
            "authorization_endpoint": "https://discovered.example/authorize"
        }))
        .unwrap();

        let options = AuthenticationOptions::default();
        assert_eq!(
            options.authorization_endpoint(Some(&metadata)).unwrap().as_str(),
            "https://discovered.example/authorize"
        );

        let options: AuthenticationOptions = serde_json::from_value(json!({
            "provider_base": "https://operator.example/oidc"
        }))
        .unwrap();
        assert_eq!(
            options.authorization_endpoint(Some(&metadata)).unwrap().as_str(),
            "https://operator.example/oidc/authorize"
        );
        assert_eq!(
            options.authorization_endpoint(None).unwrap().as_str(),
            "https://operator.example/oidc/authorize"
        );
    }

    #[test]
    fn no_authorization_endpoint() {
        let options = AuthenticationOptions::default();
        assert!(options.authorization_endpoint(None).is_err());

        let metadata = ProviderMetadata::new(vec![Version::V1_1], None);
        let err = options.authorization_endpoint(Some(&metadata)).unwrap_err();
        assert_eq!(err.to_string(), "'authorization_endpoint' is missing");
    }

    #[test]
    fn empty_kyc_claims_are_dropped() {
        let options: AuthenticationOptions = serde_json::from_value(json!({
            "kyc_claims": { "town": "" }
        }))
        .unwrap();
        assert_eq!(options.claims(), None);
    }
}
