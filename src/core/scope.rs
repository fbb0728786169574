use std::{collections::BTreeSet, fmt, ops::Deref};

use serde::{Deserialize, Serialize};

const OPENID: &str = "openid";
const AUTHN: &str = "mc_authn";
const AUTHZ: &str = "mc_authz";
const IDENTITY_PHONENUMBER: &str = "mc_identity_phonenumber";
const PHONENUMBER: &str = "mc_phonenumber";
const IDENTITY_NATIONALID: &str = "mc_identity_nationalid";
const NATIONALID: &str = "mc_nationalid";
const IDENTITY_SIGNUP: &str = "mc_identity_signup";
const SIGNUP: &str = "mc_signup";
const IDENTITY_SIGNUPPLUS: &str = "mc_identity_signupplus";
const INDIA_TC: &str = "mc_india_tc";
const MNV_VALIDATE: &str = "mc_mnv_validate";
const MNV_VALIDATE_PLUS: &str = "mc_mnv_validate_plus";
const VM_SHARE: &str = "mc_vm_share";
const VM_SHARE_HASH: &str = "mc_vm_share_hash";
const ATTR_VM_SHARE: &str = "mc_attr_vm_share";
const ATTR_VM_SHARE_HASH: &str = "mc_attr_vm_share_hash";
const VM_MATCH: &str = "mc_vm_match";
const VM_MATCH_HASH: &str = "mc_vm_match_hash";
const ATTR_VM_MATCH: &str = "mc_attr_vm_match";
const ATTR_VM_MATCH_HASH: &str = "mc_attr_vm_match_hash";
const KYC_PLAIN: &str = "mc_kyc_plain";
const KYC_HASHED: &str = "mc_kyc_hashed";

/// An OAuth scope token understood by Mobile Connect providers.
///
/// Tokens outside the known vocabulary are kept as [Scope::Other]. They survive a
/// round trip through a [ScopeSet] but never select a protocol version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Scope {
    OpenId,
    Authn,
    Authz,
    IdentityPhoneNumber,
    PhoneNumber,
    IdentityNationalId,
    NationalId,
    IdentitySignUp,
    SignUp,
    IdentitySignUpPlus,
    IndiaTc,
    MnvValidate,
    MnvValidatePlus,
    VmShare,
    VmShareHash,
    AttrVmShare,
    AttrVmShareHash,
    VmMatch,
    VmMatchHash,
    AttrVmMatch,
    AttrVmMatchHash,
    KycPlain,
    KycHashed,
    Other(String),
}

/// The role a [Scope] plays when inferring a protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeGroup {
    /// `openid`, required by every version.
    OpenId,
    /// Authentication, authorization and identity products introduced in `mc_v2.0`.
    Identity,
    /// Validation, matching and sharing products accepted by every version.
    Universal,
    /// Know-your-customer products introduced in `mc_di_r2_v2.3`.
    Kyc,
    /// Tokens that never select a version: unrecognized ones, and products such as
    /// `mc_vm_share_hash` that no version rule accepts.
    Inert,
}

impl Scope {
    pub fn group(&self) -> ScopeGroup {
        match self {
            Scope::OpenId => ScopeGroup::OpenId,
            Scope::Authn
            | Scope::Authz
            | Scope::IdentityPhoneNumber
            | Scope::PhoneNumber
            | Scope::IdentityNationalId
            | Scope::NationalId
            | Scope::IdentitySignUp
            | Scope::SignUp
            | Scope::IdentitySignUpPlus => ScopeGroup::Identity,
            Scope::IndiaTc
            | Scope::MnvValidate
            | Scope::MnvValidatePlus
            | Scope::VmShare
            | Scope::AttrVmShare
            | Scope::AttrVmShareHash
            | Scope::VmMatch
            | Scope::VmMatchHash
            | Scope::AttrVmMatch
            | Scope::AttrVmMatchHash => ScopeGroup::Universal,
            Scope::KycPlain | Scope::KycHashed => ScopeGroup::Kyc,
            Scope::VmShareHash | Scope::Other(_) => ScopeGroup::Inert,
        }
    }

    fn as_str(&self) -> &str {
        match self {
            Scope::OpenId => OPENID,
            Scope::Authn => AUTHN,
            Scope::Authz => AUTHZ,
            Scope::IdentityPhoneNumber => IDENTITY_PHONENUMBER,
            Scope::PhoneNumber => PHONENUMBER,
            Scope::IdentityNationalId => IDENTITY_NATIONALID,
            Scope::NationalId => NATIONALID,
            Scope::IdentitySignUp => IDENTITY_SIGNUP,
            Scope::SignUp => SIGNUP,
            Scope::IdentitySignUpPlus => IDENTITY_SIGNUPPLUS,
            Scope::IndiaTc => INDIA_TC,
            Scope::MnvValidate => MNV_VALIDATE,
            Scope::MnvValidatePlus => MNV_VALIDATE_PLUS,
            Scope::VmShare => VM_SHARE,
            Scope::VmShareHash => VM_SHARE_HASH,
            Scope::AttrVmShare => ATTR_VM_SHARE,
            Scope::AttrVmShareHash => ATTR_VM_SHARE_HASH,
            Scope::VmMatch => VM_MATCH,
            Scope::VmMatchHash => VM_MATCH_HASH,
            Scope::AttrVmMatch => ATTR_VM_MATCH,
            Scope::AttrVmMatchHash => ATTR_VM_MATCH_HASH,
            Scope::KycPlain => KYC_PLAIN,
            Scope::KycHashed => KYC_HASHED,
            Scope::Other(o) => o,
        }
    }
}

impl From<&str> for Scope {
    fn from(s: &str) -> Self {
        match s {
            OPENID => Scope::OpenId,
            AUTHN => Scope::Authn,
            AUTHZ => Scope::Authz,
            IDENTITY_PHONENUMBER => Scope::IdentityPhoneNumber,
            PHONENUMBER => Scope::PhoneNumber,
            IDENTITY_NATIONALID => Scope::IdentityNationalId,
            NATIONALID => Scope::NationalId,
            IDENTITY_SIGNUP => Scope::IdentitySignUp,
            SIGNUP => Scope::SignUp,
            IDENTITY_SIGNUPPLUS => Scope::IdentitySignUpPlus,
            INDIA_TC => Scope::IndiaTc,
            MNV_VALIDATE => Scope::MnvValidate,
            MNV_VALIDATE_PLUS => Scope::MnvValidatePlus,
            VM_SHARE => Scope::VmShare,
            VM_SHARE_HASH => Scope::VmShareHash,
            ATTR_VM_SHARE => Scope::AttrVmShare,
            ATTR_VM_SHARE_HASH => Scope::AttrVmShareHash,
            VM_MATCH => Scope::VmMatch,
            VM_MATCH_HASH => Scope::VmMatchHash,
            ATTR_VM_MATCH => Scope::AttrVmMatch,
            ATTR_VM_MATCH_HASH => Scope::AttrVmMatchHash,
            KYC_PLAIN => Scope::KycPlain,
            KYC_HASHED => Scope::KycHashed,
            _ => Scope::Other(s.to_owned()),
        }
    }
}

impl From<String> for Scope {
    fn from(s: String) -> Self {
        match Scope::from(s.as_str()) {
            Scope::Other(_) => Scope::Other(s),
            known => known,
        }
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Other(o) => o,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The distinct tokens of a space-delimited `scope` request value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct ScopeSet(BTreeSet<Scope>);

impl ScopeSet {
    /// Split a `scope` value on whitespace. Repeated tokens collapse into one.
    pub fn parse(scope: &str) -> Self {
        scope.split_whitespace().map(Scope::from).collect()
    }

    /// True if any token belongs to `group`.
    pub fn contains_group(&self, group: ScopeGroup) -> bool {
        self.0.iter().any(|scope| scope.group() == group)
    }
}

impl Deref for ScopeSet {
    type Target = BTreeSet<Scope>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Scope> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = Scope>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<String> for ScopeSet {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ScopeSet> for String {
    fn from(value: ScopeSet) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut scopes = self.0.iter();
        if let Some(first) = scopes.next() {
            write!(f, "{first}")?;
        }
        for scope in scopes {
            write!(f, " {scope}")?;
        }
        Ok(())
    }
}
