use anyhow::Error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use tracing::warn;

use crate::core::object::TypedParameter;

pub use builder::KycClaimsBuilder;

mod builder;

/// Top-level key of the KYC `claims` document.
pub const PREMIUM_INFO: &str = "premiuminfo";
/// Key holding the requested value of a single claim.
pub const VALUE: &str = "value";

/// A personal-data field that can be requested for know-your-customer checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimAttribute {
    Name,
    GivenName,
    FamilyName,
    Address,
    HousenoOrHousename,
    PostalCode,
    Town,
    Country,
    Birthdate,
}

impl ClaimAttribute {
    /// Every attribute, in the order claims are emitted.
    pub const ALL: [ClaimAttribute; 9] = [
        ClaimAttribute::Name,
        ClaimAttribute::GivenName,
        ClaimAttribute::FamilyName,
        ClaimAttribute::Address,
        ClaimAttribute::HousenoOrHousename,
        ClaimAttribute::PostalCode,
        ClaimAttribute::Town,
        ClaimAttribute::Country,
        ClaimAttribute::Birthdate,
    ];

    /// Claim name for the plain value.
    pub fn key(self) -> &'static str {
        match self {
            ClaimAttribute::Name => "name",
            ClaimAttribute::GivenName => "given_name",
            ClaimAttribute::FamilyName => "family_name",
            ClaimAttribute::Address => "address",
            ClaimAttribute::HousenoOrHousename => "houseno_or_housename",
            ClaimAttribute::PostalCode => "postal_code",
            ClaimAttribute::Town => "town",
            ClaimAttribute::Country => "country",
            ClaimAttribute::Birthdate => "birthdate",
        }
    }

    /// Claim name for the one-way hashed value.
    pub fn hashed_key(self) -> &'static str {
        match self {
            ClaimAttribute::Name => "name_hashed",
            ClaimAttribute::GivenName => "given_name_hashed",
            ClaimAttribute::FamilyName => "family_name_hashed",
            ClaimAttribute::Address => "address_hashed",
            ClaimAttribute::HousenoOrHousename => "houseno_or_housename_hashed",
            ClaimAttribute::PostalCode => "postal_code_hashed",
            ClaimAttribute::Town => "town_hashed",
            ClaimAttribute::Country => "country_hashed",
            ClaimAttribute::Birthdate => "birthdate_hashed",
        }
    }
}

/// The KYC attributes to request from the provider, each in plain and/or hashed
/// form.
///
/// Built with [KycClaims::builder], or deserialized from an object keyed by claim
/// name (`given_name`, `postal_code_hashed`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KycClaims {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    houseno_or_housename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    town: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    birthdate: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    name_hashed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    given_name_hashed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    family_name_hashed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address_hashed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    houseno_or_housename_hashed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code_hashed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    town_hashed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country_hashed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    birthdate_hashed: Option<String>,
}

impl KycClaims {
    pub fn builder() -> KycClaimsBuilder {
        KycClaimsBuilder::default()
    }

    /// The plain value requested for `attribute`.
    pub fn plain(&self, attribute: ClaimAttribute) -> Option<&str> {
        let value = match attribute {
            ClaimAttribute::Name => &self.name,
            ClaimAttribute::GivenName => &self.given_name,
            ClaimAttribute::FamilyName => &self.family_name,
            ClaimAttribute::Address => &self.address,
            ClaimAttribute::HousenoOrHousename => &self.houseno_or_housename,
            ClaimAttribute::PostalCode => &self.postal_code,
            ClaimAttribute::Town => &self.town,
            ClaimAttribute::Country => &self.country,
            ClaimAttribute::Birthdate => &self.birthdate,
        };
        value.as_deref()
    }

    /// The hashed value requested for `attribute`.
    pub fn hashed(&self, attribute: ClaimAttribute) -> Option<&str> {
        let value = match attribute {
            ClaimAttribute::Name => &self.name_hashed,
            ClaimAttribute::GivenName => &self.given_name_hashed,
            ClaimAttribute::FamilyName => &self.family_name_hashed,
            ClaimAttribute::Address => &self.address_hashed,
            ClaimAttribute::HousenoOrHousename => &self.houseno_or_housename_hashed,
            ClaimAttribute::PostalCode => &self.postal_code_hashed,
            ClaimAttribute::Town => &self.town_hashed,
            ClaimAttribute::Country => &self.country_hashed,
            ClaimAttribute::Birthdate => &self.birthdate_hashed,
        };
        value.as_deref()
    }

    /// The populated claims, keyed by claim name: every plain value first, then every
    /// hashed value. Empty strings count as unset.
    pub fn premium_info(&self) -> Map<String, Json> {
        let plain = ClaimAttribute::ALL
            .into_iter()
            .map(|attribute| (attribute.key(), self.plain(attribute)));
        let hashed = ClaimAttribute::ALL
            .into_iter()
            .map(|attribute| (attribute.hashed_key(), self.hashed(attribute)));

        plain
            .chain(hashed)
            .filter_map(|(key, value)| Some((key, value.filter(|v| !v.is_empty())?)))
            .map(|(key, value)| {
                let mut claim = Map::new();
                claim.insert(VALUE.to_owned(), Json::from(value));
                (key.to_owned(), Json::Object(claim))
            })
            .collect()
    }

    /// True if no attribute is requested. Empty strings count as unset.
    pub fn is_empty(&self) -> bool {
        ClaimAttribute::ALL.into_iter().all(|attribute| {
            self.plain(attribute).map_or(true, str::is_empty)
                && self.hashed(attribute).map_or(true, str::is_empty)
        })
    }

    /// The `claims` document: `{"premiuminfo": {"<claim>": {"value": "..."}, ...}}`.
    pub fn to_claims(&self) -> Claims {
        let mut document = Map::new();
        document.insert(PREMIUM_INFO.to_owned(), Json::Object(self.premium_info()));
        Claims(Json::Object(document))
    }

    /// Serialize the `claims` document for use as an authorization request parameter.
    ///
    /// With no attribute requested this is still `{"premiuminfo":{}}`. Serialization
    /// failures are logged and yield `None`, which callers treat as no claims.
    pub fn to_request_parameter(&self) -> Option<String> {
        match serde_json::to_string(&self.to_claims().0) {
            Ok(claims) => Some(claims),
            Err(e) => {
                warn!("unable to serialize KYC claims: {e}");
                None
            }
        }
    }
}

/// `claims` parameter of an authentication request.
#[derive(Debug, Clone, PartialEq)]
pub struct Claims(pub Json);

impl TypedParameter for Claims {
    const KEY: &'static str = "claims";
}

impl TryFrom<Json> for Claims {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self, Self::Error> {
        match value {
            // Carried as a string in query parameters.
            Json::String(s) => Ok(Self(serde_json::from_str(&s)?)),
            value => Ok(Self(value)),
        }
    }
}

impl From<Claims> for Json {
    fn from(value: Claims) -> Json {
        value.0
    }
}
