use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Error;
use crate::types::Result;
use crate::webauthn::credential::{
    serialize_assertion, serialize_credential, AssertionCredential, AttestationCredential,
};
use crate::webauthn::options::{
    deserialize_creation_options, deserialize_request_options, PublicKeyCredentialCreationOptions,
    PublicKeyCredentialRequestOptions,
};

/// Platform credential API (authenticators, browser or OS)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialPlatform: Send + Sync {
    /// Create a new credential; `None` when the platform produced nothing
    async fn create(
        &self,
        options: PublicKeyCredentialCreationOptions,
    ) -> Result<Option<AttestationCredential>>;

    /// Assert an existing credential; `None` when the platform produced nothing
    async fn get(
        &self,
        options: PublicKeyCredentialRequestOptions,
    ) -> Result<Option<AssertionCredential>>;
}

/// Decode creation options, create a credential on the platform and encode
/// it for the backend
pub async fn create_credential<P>(platform: &P, serialized_options: Value) -> Result<Value>
where
    P: CredentialPlatform + ?Sized,
{
    let options = deserialize_creation_options(serialized_options)?;
    debug!(
        exclude = options.exclude_credentials.as_ref().map_or(0, Vec::len),
        "Creating platform credential"
    );

    match platform.create(options).await? {
        Some(credential) => serialize_credential(&credential),
        None => {
            warn!("Platform returned no credential");
            Err(Error::CredentialCreationFailed(
                "Platform credential API returned no credential".into(),
            ))
        }
    }
}

/// Decode request options, get an assertion from the platform and encode it
/// for the backend
pub async fn get_assertion<P>(platform: &P, serialized_options: Value) -> Result<Value>
where
    P: CredentialPlatform + ?Sized,
{
    let options = deserialize_request_options(serialized_options)?;
    debug!("Requesting platform assertion");

    match platform.get(options).await? {
        Some(credential) => serialize_assertion(&credential),
        None => {
            warn!("Platform returned no assertion");
            Err(Error::CredentialAssertionFailed(
                "Platform credential API returned no assertion".into(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webauthn::credential::{
        AuthenticatorAssertionResponse, AuthenticatorAttestationResponse, PublicKeyCredential,
    };
    use serde_json::{json, Map};

    fn creation_options() -> Value {
        json!({
            "rp": { "name": "Secutils.dev" },
            "user": { "id": "AQID", "name": "dev", "displayName": "Dev" },
            "challenge": "AAEC",
            "pubKeyCredParams": [{ "type": "public-key", "alg": -8 }]
        })
    }

    #[tokio::test]
    async fn test_create_credential() {
        let mut platform = MockCredentialPlatform::new();
        platform
            .expect_create()
            .withf(|options| options.challenge.as_bytes() == [0, 1, 2] && options.user.id.as_bytes() == [1, 2, 3])
            .times(1)
            .returning(|_| {
                Ok(Some(PublicKeyCredential {
                    id: "AQID".to_string(),
                    raw_id: vec![1, 2, 3],
                    credential_type: "public-key".to_string(),
                    client_extension_results: Map::new(),
                    response: AuthenticatorAttestationResponse {
                        attestation_object: vec![0xa0],
                        client_data_json: b"{}".to_vec(),
                        transports: None,
                    },
                }))
            });

        let serialized = create_credential(&platform, creation_options()).await.unwrap();
        assert_eq!(serialized["rawId"], json!("AQID"));
        assert!(serialized["response"].get("transports").is_none());
    }

    #[tokio::test]
    async fn test_create_credential_without_result() {
        let mut platform = MockCredentialPlatform::new();
        platform.expect_create().returning(|_| Ok(None));

        let err = create_credential(&platform, creation_options()).await.unwrap_err();
        assert!(matches!(err, Error::CredentialCreationFailed(_)));
    }

    #[tokio::test]
    async fn test_malformed_options_never_reach_platform() {
        let mut platform = MockCredentialPlatform::new();
        platform.expect_create().times(0);

        let err = create_credential(&platform, json!({ "challenge": "AAEC" })).await.unwrap_err();
        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_get_assertion() {
        let mut platform = MockCredentialPlatform::new();
        platform.expect_get().times(1).returning(|_| {
            Ok(Some(PublicKeyCredential {
                id: "AQID".to_string(),
                raw_id: vec![1, 2, 3],
                credential_type: "public-key".to_string(),
                client_extension_results: Map::new(),
                response: AuthenticatorAssertionResponse {
                    authenticator_data: vec![0],
                    client_data_json: b"{}".to_vec(),
                    signature: vec![1],
                    user_handle: Some(vec![1, 2, 3]),
                },
            }))
        });

        let serialized = get_assertion(&platform, json!({ "challenge": "AAEC" })).await.unwrap();
        assert_eq!(serialized["response"]["userHandle"], json!("AQID"));

        let mut empty = MockCredentialPlatform::new();
        empty.expect_get().returning(|_| Ok(None));
        let err = get_assertion(&empty, json!({ "challenge": "AAEC" })).await.unwrap_err();
        assert!(matches!(err, Error::CredentialAssertionFailed(_)));
    }
}
