use std::{cmp::Ordering, fmt, ops::Deref};

use serde::{Deserialize, Serialize};

use crate::core::metadata::{parameters::provider::McVersion, ProviderMetadata};

pub mod detection;

const MC_V1_1: &str = "mc_v1.1";
const MC_V1_2: &str = "mc_v1.2";
const MC_V2_0: &str = "mc_v2.0";
const MC_DI_R2_V2_3: &str = "mc_di_r2_v2.3";

/// A Mobile Connect protocol version, as carried in the `version` request parameter
/// and the provider's `mc_version` metadata.
///
/// Recognized versions are ordered by capability, `V1_1 < V1_2 < V2_0 < V2_3Di`.
/// Wire strings that are not recognized are kept in [Version::Other], which is
/// unordered with respect to every other version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Version {
    /// `mc_v1.1`
    V1_1,
    /// `mc_v1.2`, deprecated.
    V1_2,
    /// `mc_v2.0`
    V2_0,
    /// `mc_di_r2_v2.3`
    V2_3Di,
    Other(String),
}

impl Version {
    /// The recognized versions, least capable first.
    pub const RECOGNIZED: [Version; 4] =
        [Version::V1_1, Version::V1_2, Version::V2_0, Version::V2_3Di];

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Version::Other(_))
    }

    pub fn is_deprecated(&self) -> bool {
        matches!(self, Version::V1_2)
    }

    fn capability(&self) -> Option<u8> {
        match self {
            Version::V1_1 => Some(0),
            Version::V1_2 => Some(1),
            Version::V2_0 => Some(2),
            Version::V2_3Di => Some(3),
            Version::Other(_) => None,
        }
    }

    fn as_str(&self) -> &str {
        match self {
            Version::V1_1 => MC_V1_1,
            Version::V1_2 => MC_V1_2,
            Version::V2_0 => MC_V2_0,
            Version::V2_3Di => MC_DI_R2_V2_3,
            Version::Other(o) => o,
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        self.capability()?.partial_cmp(&other.capability()?)
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Self {
        match s {
            MC_V1_1 => Version::V1_1,
            MC_V1_2 => Version::V1_2,
            MC_V2_0 => Version::V2_0,
            MC_DI_R2_V2_3 => Version::V2_3Di,
            _ => Version::Other(s.to_owned()),
        }
    }
}

impl From<String> for Version {
    fn from(s: String) -> Self {
        match Version::from(s.as_str()) {
            Version::Other(_) => Version::Other(s),
            known => known,
        }
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        match version {
            Version::Other(o) => o,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The versions a provider can be assumed to speak. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedVersions(Vec<Version>);

impl SupportedVersions {
    /// Read `mc_version` from the provider metadata.
    ///
    /// Missing metadata, a missing `mc_version` entry and an empty list all fall back
    /// to `mc_v1.1` only.
    pub fn from_metadata(provider_metadata: Option<&ProviderMetadata>) -> Self {
        match provider_metadata.map(ProviderMetadata::mc_version) {
            Some(McVersion(versions)) if !versions.is_empty() => Self(versions.clone()),
            _ => Self::default(),
        }
    }

    /// True if `version` is the one and only supported version.
    pub fn is_only(&self, version: &Version) -> bool {
        matches!(self.0.as_slice(), [only] if only == version)
    }
}

impl Default for SupportedVersions {
    fn default() -> Self {
        Self(vec![Version::V1_1])
    }
}

impl Deref for SupportedVersions {
    type Target = [Version];

    fn deref(&self) -> &[Version] {
        &self.0
    }
}
