use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::Result;
use crate::webauthn::base64url::Base64UrlBytes;

/// Reference to an existing credential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicKeyCredentialDescriptor {
    pub id: Base64UrlBytes,
    /// `type`, `transports` and anything else, passed through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// User account the credential is created for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicKeyCredentialUserEntity {
    pub id: Base64UrlBytes,
    /// `name`, `displayName` and anything else, passed through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Options for creating a new credential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyCredentialCreationOptions {
    pub challenge: Base64UrlBytes,
    pub user: PublicKeyCredentialUserEntity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_credentials: Option<Vec<PublicKeyCredentialDescriptor>>,
    /// `rp`, `pubKeyCredParams`, `timeout` and the rest, passed through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Options for asserting an existing credential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyCredentialRequestOptions {
    pub challenge: Base64UrlBytes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_credentials: Option<Vec<PublicKeyCredentialDescriptor>>,
    /// `rpId`, `timeout`, `userVerification` and the rest, passed through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Decode serialized creation options received from the backend
pub fn deserialize_creation_options(serialized: Value) -> Result<PublicKeyCredentialCreationOptions> {
    Ok(serde_json::from_value(serialized)?)
}

/// Decode serialized request options received from the backend
pub fn deserialize_request_options(serialized: Value) -> Result<PublicKeyCredentialRequestOptions> {
    Ok(serde_json::from_value(serialized)?)
}
