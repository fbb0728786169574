use mobile_connect::{
    config::AuthenticationOptions,
    core::{
        authorization_request::AuthorizationRequest,
        claims::{Claims, KycClaims, PREMIUM_INFO, VALUE},
        metadata::ProviderMetadata,
        version::{
            detection::{self, InvalidScope, Negotiation, VersionWarning},
            Version,
        },
    },
};
use serde_json::json;
use url::Url;

fn discovery(mc_version: serde_json::Value) -> ProviderMetadata {
    serde_json::from_value(json!({
        "issuer": "https://operator-c.mobileconnect.example",
        "authorization_endpoint": "https://operator-c.mobileconnect.example/oidc/authorize",
        "scopes_supported": ["openid", "mc_authn", "mc_authz", "mc_kyc_plain", "mc_kyc_hashed"],
        "mc_version": mc_version
    }))
    .unwrap()
}

#[test]
fn kyc_authentication_request() {
    let metadata = discovery(json!(["mc_v1.1", "mc_v2.0", "mc_di_r2_v2.3"]));
    let options: AuthenticationOptions = serde_json::from_value(json!({
        "scope": "openid mc_kyc_plain",
        "kyc_claims": {
            "name": "Ada Lovelace",
            "family_name": "Lovelace",
            "birthdate_hashed": "0c1d5e"
        }
    }))
    .unwrap();

    let request = AuthorizationRequest::new(
        &options,
        Some(&metadata),
        "client-42".into(),
        "https://rp.example/callback".parse().unwrap(),
        "state-42".into(),
        "nonce-42".into(),
    )
    .unwrap();
    assert_eq!(request.version, Version::V2_3Di);

    let endpoint = options.authorization_endpoint(Some(&metadata)).unwrap();
    assert_eq!(endpoint.path(), "/oidc/authorize");
    let url = request.clone().to_url(endpoint.clone()).unwrap();
    assert!(url.as_str().contains("version=mc_di_r2_v2.3"));

    let received = AuthorizationRequest::from_url(url, &endpoint).unwrap();
    assert_eq!(received, request);

    let Claims(document) = received.claims().unwrap().unwrap();
    assert_eq!(
        document,
        json!({
            "premiuminfo": {
                "name": { "value": "Ada Lovelace" },
                "family_name": { "value": "Lovelace" },
                "birthdate_hashed": { "value": "0c1d5e" }
            }
        })
    );
}

#[test]
fn provider_without_mc_version() {
    let metadata: ProviderMetadata = serde_json::from_value(json!({
        "issuer": "https://legacy.mobileconnect.example"
    }))
    .unwrap();

    assert_eq!(
        detection::resolve(None, "openid", Some(&metadata)),
        Ok(Version::V1_1)
    );
    assert_eq!(
        detection::resolve(None, "openid mc_authn", Some(&metadata)),
        Err(InvalidScope {
            scope: "openid mc_authn".into()
        })
    );
}

#[test]
fn provider_with_null_mc_version() {
    let metadata = discovery(json!(null));
    assert_eq!(
        detection::resolve(None, "openid", Some(&metadata)),
        Ok(Version::V1_1)
    );
}

#[test]
fn deprecated_provider() {
    let metadata = discovery(json!(["mc_v1.2"]));
    let negotiation = detection::negotiate(None, "openid mc_identity_phonenumber", Some(&metadata));
    assert_eq!(
        negotiation,
        Ok(Negotiation {
            version: Version::V1_2,
            warning: Some(VersionWarning::Deprecated(Version::V1_2)),
        })
    );
}

#[test]
fn explicit_version_overrides_negotiation() {
    let metadata = discovery(json!(["mc_v1.1"]));
    let options = AuthenticationOptions {
        version: Some("mc_v2.0".into()),
        ..Default::default()
    };
    assert_eq!(options.resolve_version(Some(&metadata)), Ok(Version::V2_0));
    assert_eq!(
        detection::negotiate(options.version.as_deref(), &options.scope, Some(&metadata))
            .unwrap()
            .warning,
        Some(VersionWarning::Unsupported(Version::V2_0))
    );
}

#[test]
fn invalid_scope_surfaces_to_caller() {
    let metadata = discovery(json!(["mc_di_r2_v2.3"]));
    let options = AuthenticationOptions {
        scope: "profile email".into(),
        ..Default::default()
    };
    let redirect_uri: Url = "https://rp.example/callback".parse().unwrap();
    let err = AuthorizationRequest::new(
        &options,
        Some(&metadata),
        "client-42".into(),
        redirect_uri,
        "s".into(),
        "n".into(),
    )
    .unwrap_err();
    assert_eq!(err.scope, "profile email");
}

#[test]
fn claims_parameter_shape() {
    let claims = KycClaims::builder()
        .with_houseno_or_housename("221B".into())
        .with_postal_code_hashed("f00d".into())
        .build();
    let document: serde_json::Value =
        serde_json::from_str(&claims.to_request_parameter().unwrap()).unwrap();

    let premium_info = document[PREMIUM_INFO].as_object().unwrap();
    assert_eq!(premium_info.len(), 2);
    assert_eq!(premium_info["houseno_or_housename"][VALUE], "221B");
    assert_eq!(premium_info["postal_code_hashed"][VALUE], "f00d");
}
