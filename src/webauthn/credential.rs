use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::Result;
use crate::webauthn::base64url::Base64UrlBytes;

/// Authenticator response to a credential creation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatorAttestationResponse {
    pub attestation_object: Vec<u8>,
    pub client_data_json: Vec<u8>,
    /// `None` when the platform does not expose transports
    pub transports: Option<Vec<String>>,
}

/// Authenticator response to an assertion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatorAssertionResponse {
    pub authenticator_data: Vec<u8>,
    pub client_data_json: Vec<u8>,
    pub signature: Vec<u8>,
    pub user_handle: Option<Vec<u8>>,
}

/// Credential returned by the platform credential API
#[derive(Debug, Clone, PartialEq)]
pub struct PublicKeyCredential<R> {
    pub id: String,
    pub raw_id: Vec<u8>,
    pub credential_type: String,
    pub client_extension_results: Map<String, Value>,
    pub response: R,
}

/// Newly created credential
pub type AttestationCredential = PublicKeyCredential<AuthenticatorAttestationResponse>;

/// Assertion of an existing credential
pub type AssertionCredential = PublicKeyCredential<AuthenticatorAssertionResponse>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedAttestationResponse {
    pub attestation_object: Base64UrlBytes,
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: Base64UrlBytes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transports: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedAssertionResponse {
    pub authenticator_data: Base64UrlBytes,
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: Base64UrlBytes,
    pub signature: Base64UrlBytes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_handle: Option<Base64UrlBytes>,
}

/// JSON transport shape of a credential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedCredential<R> {
    pub id: String,
    pub raw_id: Base64UrlBytes,
    #[serde(rename = "type")]
    pub credential_type: String,
    pub extensions: Map<String, Value>,
    pub response: R,
}

pub type SerializedAttestationCredential = SerializedCredential<SerializedAttestationResponse>;
pub type SerializedAssertionCredential = SerializedCredential<SerializedAssertionResponse>;

impl From<&AuthenticatorAttestationResponse> for SerializedAttestationResponse {
    fn from(response: &AuthenticatorAttestationResponse) -> Self {
        Self {
            attestation_object: response.attestation_object.as_slice().into(),
            client_data_json: response.client_data_json.as_slice().into(),
            transports: response.transports.clone(),
        }
    }
}

impl From<&AuthenticatorAssertionResponse> for SerializedAssertionResponse {
    fn from(response: &AuthenticatorAssertionResponse) -> Self {
        Self {
            authenticator_data: response.authenticator_data.as_slice().into(),
            client_data_json: response.client_data_json.as_slice().into(),
            signature: response.signature.as_slice().into(),
            user_handle: response.user_handle.as_deref().map(Base64UrlBytes::from),
        }
    }
}

impl<'a, R, S> From<&'a PublicKeyCredential<R>> for SerializedCredential<S>
where
    S: From<&'a R>,
{
    fn from(credential: &'a PublicKeyCredential<R>) -> Self {
        Self {
            id: credential.id.clone(),
            raw_id: credential.raw_id.as_slice().into(),
            credential_type: credential.credential_type.clone(),
            extensions: credential.client_extension_results.clone(),
            response: S::from(&credential.response),
        }
    }
}

/// Encode a newly created credential for JSON transport
pub fn serialize_credential(credential: &AttestationCredential) -> Result<Value> {
    Ok(serde_json::to_value(SerializedAttestationCredential::from(credential))?)
}

/// Encode an assertion for JSON transport
pub fn serialize_assertion(credential: &AssertionCredential) -> Result<Value> {
    Ok(serde_json::to_value(SerializedAssertionCredential::from(credential))?)
}
