//! Version negotiation and KYC claims for [GSMA Mobile Connect] authentication.
//!
//! [GSMA Mobile Connect]: <https://developer.mobileconnect.io/>
//!
//! # Version Negotiation
//!
//! A Mobile Connect provider advertises the protocol versions it speaks in the
//! `mc_version` entry of its discovery document. Before authenticating, a client
//! picks one of them from its own version hint and the scope it is about to
//! request:
//!
//! ```
//! use mobile_connect::core::metadata::ProviderMetadata;
//! use mobile_connect::core::version::{detection, Version};
//! use serde_json::json;
//!
//! let metadata: ProviderMetadata = serde_json::from_value(json!({
//!     "authorization_endpoint": "https://operator.example/authorize",
//!     "mc_version": ["mc_v1.1", "mc_v2.0"]
//! }))?;
//!
//! let version = detection::resolve(None, "openid mc_authz", Some(&metadata))?;
//! assert_eq!(version, Version::V2_0);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! The rules are documented in [`core::version::detection`]. A scope that no
//! supported version accepts is rejected with
//! [`InvalidScope`](crate::core::version::detection::InvalidScope).
//!
//! # KYC Claims
//!
//! Providers speaking `mc_di_r2_v2.3` can check personal data supplied by the
//! client. The attributes are collected with [`KycClaims`] and sent as the `claims`
//! request parameter:
//!
//! ```
//! use mobile_connect::core::claims::KycClaims;
//!
//! let claims = KycClaims::builder()
//!     .with_given_name("Ada".to_string())
//!     .with_birthdate_hashed("9b74c9".to_string())
//!     .build();
//!
//! assert_eq!(
//!     claims.to_request_parameter().unwrap(),
//!     r#"{"premiuminfo":{"given_name":{"value":"Ada"},"birthdate_hashed":{"value":"9b74c9"}}}"#
//! );
//! ```
//!
//! [`KycClaims`]: crate::core::claims::KycClaims
//!
//! # Authentication Requests
//!
//! [`AuthenticationOptions`] ties both together, and
//! [`AuthorizationRequest`] encodes the result for the provider's
//! `authorization_endpoint`.
//!
//! [`AuthenticationOptions`]: crate::config::AuthenticationOptions
//! [`AuthorizationRequest`]: crate::core::authorization_request::AuthorizationRequest

pub mod config;
pub mod core;
