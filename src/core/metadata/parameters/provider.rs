use anyhow::{Error, Result};
use serde_json::Value as Json;
use tracing::debug;
use url::Url;

use crate::core::{object::TypedParameter, scope::Scope, version::Version};

#[derive(Debug, Clone)]
pub struct AuthorizationEndpoint(pub Url);

impl TypedParameter for AuthorizationEndpoint {
    const KEY: &'static str = "authorization_endpoint";
}

impl TryFrom<Json> for AuthorizationEndpoint {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self, Self::Error> {
        Ok(Self(serde_json::from_value(value)?))
    }
}

impl From<AuthorizationEndpoint> for Json {
    fn from(value: AuthorizationEndpoint) -> Json {
        Json::String(value.0.to_string())
    }
}

/// `mc_version`: the Mobile Connect versions the provider advertises, in the
/// provider's order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct McVersion(pub Vec<Version>);

impl TypedParameter for McVersion {
    const KEY: &'static str = "mc_version";
}

impl TryFrom<Json> for McVersion {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self, Self::Error> {
        // Some providers publish `"mc_version": null` rather than omitting the entry.
        if value.is_null() {
            return Ok(Self::default());
        }
        let versions: Vec<Version> = serde_json::from_value(value)?;
        for version in versions.iter().filter(|v| !v.is_recognized()) {
            debug!("provider advertises unrecognized version '{version}'");
        }
        Ok(Self(versions))
    }
}

impl From<McVersion> for Json {
    fn from(value: McVersion) -> Json {
        Json::Array(
            value
                .0
                .into_iter()
                .map(String::from)
                .map(Json::from)
                .collect(),
        )
    }
}

/// `scopes_supported`: the scope tokens the provider publishes. Informational only,
/// version resolution does not depend on it.
#[derive(Debug, Clone, Default)]
pub struct ScopesSupported(pub Vec<Scope>);

impl TypedParameter for ScopesSupported {
    const KEY: &'static str = "scopes_supported";
}

impl TryFrom<Json> for ScopesSupported {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self, Self::Error> {
        Ok(Self(serde_json::from_value(value)?))
    }
}

impl From<ScopesSupported> for Json {
    fn from(value: ScopesSupported) -> Json {
        Json::Array(
            value
                .0
                .into_iter()
                .map(String::from)
                .map(Json::from)
                .collect(),
        )
    }
}
