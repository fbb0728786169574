//! Selection of the Mobile Connect version that governs an authentication flow.
//!
//! An explicit, recognized version hint from the caller always wins. Otherwise the
//! version is inferred from the requested scope, preferring the most capable version
//! the provider supports:
//!
//! | Version          | Requires `openid` plus                                          |
//! |------------------|-----------------------------------------------------------------|
//! | `mc_di_r2_v2.3`  | anything accepted by `mc_v2.0`, or a KYC scope                  |
//! | `mc_v2.0`        | an identity scope, or a universal scope                         |
//! | `mc_v1.1`        | nothing else, or a universal scope                              |
//! | `mc_v1.2`        | as `mc_v2.0`, and only when it is the provider's sole version   |

use std::fmt;

use tracing::{debug, warn};

use crate::core::{
    metadata::ProviderMetadata,
    scope::{Scope, ScopeGroup, ScopeSet},
};

use super::{SupportedVersions, Version};

/// No supported version accepts the requested scope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid scope: '{scope}'")]
pub struct InvalidScope {
    /// The `scope` value exactly as requested.
    pub scope: String,
}

/// A non-fatal observation made while resolving a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionWarning {
    /// The caller asked for a version the provider does not advertise.
    Unsupported(Version),
    /// The provider only speaks a deprecated version.
    Deprecated(Version),
}

impl fmt::Display for VersionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionWarning::Unsupported(v) => {
                write!(f, "check version, it might be unsupported: '{v}'")
            }
            VersionWarning::Deprecated(v) => write!(f, "version '{v}' is deprecated"),
        }
    }
}

/// The outcome of [negotiate].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiation {
    pub version: Version,
    pub warning: Option<VersionWarning>,
}

impl Negotiation {
    fn new(version: Version) -> Self {
        Self {
            version,
            warning: None,
        }
    }

    fn with_warning(version: Version, warning: VersionWarning) -> Self {
        warn!("{warning}");
        Self {
            version,
            warning: Some(warning),
        }
    }
}

/// Resolve the version for an authentication request.
///
/// See [negotiate] for the rules; this drops the [VersionWarning], which is still
/// logged.
pub fn resolve(
    requested_version: Option<&str>,
    requested_scope: &str,
    provider_metadata: Option<&ProviderMetadata>,
) -> Result<Version, InvalidScope> {
    negotiate(requested_version, requested_scope, provider_metadata).map(|n| n.version)
}

/// Resolve the version for an authentication request, reporting any warning.
///
/// `requested_version` is honoured whenever it is a recognized version string, even
/// if the provider does not list it. Unrecognized strings are ignored and the version
/// is inferred from `requested_scope` instead.
///
/// # Errors
/// Returns [InvalidScope] when no supported version accepts `requested_scope`.
pub fn negotiate(
    requested_version: Option<&str>,
    requested_scope: &str,
    provider_metadata: Option<&ProviderMetadata>,
) -> Result<Negotiation, InvalidScope> {
    let supported = SupportedVersions::from_metadata(provider_metadata);

    if let Some(version) = requested_version
        .map(Version::from)
        .filter(Version::is_recognized)
    {
        if supported.contains(&version) {
            debug!("using requested version '{version}'");
            return Ok(Negotiation::new(version));
        }
        return Ok(Negotiation::with_warning(
            version.clone(),
            VersionWarning::Unsupported(version),
        ));
    }

    let scopes = ScopeSet::parse(requested_scope);
    let negotiation = infer(&supported, &scopes).ok_or_else(|| InvalidScope {
        scope: requested_scope.to_owned(),
    })?;
    debug!(
        "resolved version '{}' for scope '{requested_scope}'",
        negotiation.version
    );
    Ok(negotiation)
}

fn infer(supported: &SupportedVersions, scopes: &ScopeSet) -> Option<Negotiation> {
    if supported.contains(&Version::V2_3Di) && accepted_by_v2_3(scopes) {
        Some(Negotiation::new(Version::V2_3Di))
    } else if supported.contains(&Version::V2_0) && accepted_by_v2_0(scopes) {
        Some(Negotiation::new(Version::V2_0))
    } else if supported.contains(&Version::V1_1) && accepted_by_v1_1(scopes) {
        Some(Negotiation::new(Version::V1_1))
    } else if supported.is_only(&Version::V1_2) && accepted_by_v2_0(scopes) {
        Some(Negotiation::with_warning(
            Version::V1_2,
            VersionWarning::Deprecated(Version::V1_2),
        ))
    } else {
        None
    }
}

fn has_openid(scopes: &ScopeSet) -> bool {
    scopes.contains(&Scope::OpenId)
}

fn has_universal(scopes: &ScopeSet) -> bool {
    scopes.contains_group(ScopeGroup::Universal)
}

fn accepted_by_v1_1(scopes: &ScopeSet) -> bool {
    has_openid(scopes) && (scopes.len() == 1 || has_universal(scopes))
}

fn accepted_by_v2_0(scopes: &ScopeSet) -> bool {
    has_openid(scopes) && (scopes.contains_group(ScopeGroup::Identity) || has_universal(scopes))
}

fn accepted_by_v2_3(scopes: &ScopeSet) -> bool {
    has_openid(scopes) && (accepted_by_v2_0(scopes) || scopes.contains_group(ScopeGroup::Kyc))
}
