//! WebAuthn payload codec
//!
//! The backend exchanges credential options and credentials as JSON with
//! binary fields encoded as base64url; platform credential APIs need raw
//! buffers. This module converts between the two.

pub mod base64url;
pub mod credential;
pub mod options;
pub mod platform;

// Re-export key types
pub use base64url::{base64url_to_buffer, buffer_to_base64url, Base64UrlBytes};
pub use credential::{
    serialize_assertion, serialize_credential, AssertionCredential, AttestationCredential,
    AuthenticatorAssertionResponse, AuthenticatorAttestationResponse, PublicKeyCredential,
    SerializedAssertionCredential, SerializedAttestationCredential,
};
pub use options::{
    deserialize_creation_options, deserialize_request_options, PublicKeyCredentialCreationOptions,
    PublicKeyCredentialDescriptor, PublicKeyCredentialRequestOptions, PublicKeyCredentialUserEntity,
};
pub use platform::{create_credential, get_assertion, CredentialPlatform};
