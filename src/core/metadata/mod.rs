use std::ops::Deref;

use anyhow::Error;
use serde::{Deserialize, Serialize};

use self::parameters::provider::{AuthorizationEndpoint, McVersion, ScopesSupported};

use super::{
    object::{ParsingErrorContext, UntypedObject},
    scope::{Scope, ScopeSet},
    version::Version,
};

pub mod parameters;

/// The identity provider's discovery metadata.
///
/// Only `mc_version` is parsed eagerly; every other entry stays available through
/// [UntypedObject::get].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "UntypedObject", into = "UntypedObject")]
pub struct ProviderMetadata(UntypedObject, McVersion);

impl ProviderMetadata {
    pub fn new(mc_version: Vec<Version>, other: Option<UntypedObject>) -> Self {
        Self(other.unwrap_or_default(), McVersion(mc_version))
    }

    pub fn mc_version(&self) -> &McVersion {
        &self.1
    }

    /// The `authorization_endpoint` entry, where authentication requests are sent.
    pub fn authorization_endpoint(&self) -> anyhow::Result<AuthorizationEndpoint> {
        self.0.get::<AuthorizationEndpoint>().parsing_error()
    }

    /// The requested scopes missing from `scopes_supported`. Empty when the provider
    /// does not publish the entry.
    pub fn unsupported_scopes(&self, scopes: &ScopeSet) -> anyhow::Result<Vec<Scope>> {
        let Some(scopes_supported) = self.0.get::<ScopesSupported>() else {
            return Ok(vec![]);
        };
        let ScopesSupported(supported) = scopes_supported.parsing_error()?;
        Ok(scopes
            .iter()
            .filter(|scope| !supported.contains(scope))
            .cloned()
            .collect())
    }
}

impl From<ProviderMetadata> for UntypedObject {
    fn from(value: ProviderMetadata) -> Self {
        let mut inner = value.0;
        inner.insert(value.1);
        inner
    }
}

impl TryFrom<UntypedObject> for ProviderMetadata {
    type Error = Error;

    fn try_from(value: UntypedObject) -> Result<Self, Self::Error> {
        let mc_version = value.get_or_default::<McVersion>().parsing_error()?;
        Ok(Self(value, mc_version))
    }
}

impl Deref for ProviderMetadata {
    type Target = UntypedObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
