use std::fmt;

use serde::{Deserialize, Serialize};

/// Signature algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    Ed25519,
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureAlgorithm::Md5 => write!(f, "md5"),
            SignatureAlgorithm::Sha1 => write!(f, "sha1"),
            SignatureAlgorithm::Sha256 => write!(f, "sha256"),
            SignatureAlgorithm::Sha384 => write!(f, "sha384"),
            SignatureAlgorithm::Sha512 => write!(f, "sha512"),
            SignatureAlgorithm::Ed25519 => write!(f, "ed25519"),
        }
    }
}

/// RSA modulus size in bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RsaKeySize {
    #[serde(rename = "1024")]
    Size1024,
    #[serde(rename = "2048")]
    Size2048,
    #[serde(rename = "4096")]
    Size4096,
    #[serde(rename = "8192")]
    Size8192,
}

/// DSA key size in bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DsaKeySize {
    #[serde(rename = "1024")]
    Size1024,
    #[serde(rename = "2048")]
    Size2048,
}

/// Named elliptic curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EllipticCurve {
    Secp256r1,
    Secp384r1,
    Secp521r1,
}

/// Private key algorithm together with its algorithm-specific parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "keyType", rename_all = "camelCase")]
pub enum PrivateKeyAlgorithm {
    #[serde(rename_all = "camelCase")]
    Rsa { key_size: RsaKeySize },
    #[serde(rename_all = "camelCase")]
    Dsa { key_size: DsaKeySize },
    Ecdsa { curve: EllipticCurve },
    Ed25519,
}

impl PrivateKeyAlgorithm {
    /// Signature algorithms that can be used with keys of this type
    pub fn signature_algorithms(&self) -> &'static [SignatureAlgorithm] {
        use SignatureAlgorithm::*;
        match self {
            PrivateKeyAlgorithm::Rsa { .. } => &[Md5, Sha1, Sha256, Sha384, Sha512],
            PrivateKeyAlgorithm::Dsa { .. } => &[Sha1, Sha256],
            PrivateKeyAlgorithm::Ecdsa { .. } => &[Sha256, Sha384, Sha512],
            PrivateKeyAlgorithm::Ed25519 => &[Ed25519],
        }
    }

    /// Signature algorithm offered by default for keys of this type
    pub fn default_signature_algorithm(&self) -> SignatureAlgorithm {
        match self {
            PrivateKeyAlgorithm::Ed25519 => SignatureAlgorithm::Ed25519,
            _ => SignatureAlgorithm::Sha256,
        }
    }

    /// Check if a signature algorithm can be used with keys of this type
    pub fn supports(&self, signature_algorithm: SignatureAlgorithm) -> bool {
        self.signature_algorithms().contains(&signature_algorithm)
    }

    /// Flat public key algorithm name
    pub fn public_key_algorithm(&self) -> PublicKeyAlgorithm {
        match self {
            PrivateKeyAlgorithm::Rsa { .. } => PublicKeyAlgorithm::Rsa,
            PrivateKeyAlgorithm::Dsa { .. } => PublicKeyAlgorithm::Dsa,
            PrivateKeyAlgorithm::Ecdsa { .. } => PublicKeyAlgorithm::Ecdsa,
            PrivateKeyAlgorithm::Ed25519 => PublicKeyAlgorithm::Ed25519,
        }
    }
}

impl Default for PrivateKeyAlgorithm {
    fn default() -> Self {
        PrivateKeyAlgorithm::Rsa { key_size: RsaKeySize::Size2048 }
    }
}

/// Public key algorithm without parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicKeyAlgorithm {
    Rsa,
    Dsa,
    Ecdsa,
    Ed25519,
}

/// Key usage extension value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyUsage {
    CrlSigning,
    DataEncipherment,
    DecipherOnly,
    DigitalSignature,
    EncipherOnly,
    KeyAgreement,
    KeyCertificateSigning,
    KeyEncipherment,
    NonRepudiation,
}

/// Extended key usage extension value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtendedKeyUsage {
    CodeSigning,
    EmailProtection,
    TimeStamping,
    TlsWebClientAuthentication,
    TlsWebServerAuthentication,
}

/// Optional distinguished name fields shared by templates and certificates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistinguishedName {
    /// Common name
    pub common_name: Option<String>,
    /// Country
    pub country: Option<String>,
    /// State or province
    pub state_or_province: Option<String>,
    /// Locality
    pub locality: Option<String>,
    /// Organization
    pub organization: Option<String>,
    /// Organizational unit
    pub organizational_unit: Option<String>,
}

impl DistinguishedName {
    /// Render as an RFC 4514 style subject string, most specific first
    pub fn to_subject(&self) -> String {
        let parts = [
            ("CN", &self.common_name),
            ("OU", &self.organizational_unit),
            ("O", &self.organization),
            ("L", &self.locality),
            ("ST", &self.state_or_province),
            ("C", &self.country),
        ];

        parts
            .iter()
            .filter_map(|(attr, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| format!("{}={}", attr, v))
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_algorithm_wire_shape() {
        let rsa = PrivateKeyAlgorithm::Rsa { key_size: RsaKeySize::Size4096 };
        assert_eq!(serde_json::to_value(rsa).unwrap(), json!({ "keyType": "rsa", "keySize": "4096" }));

        let ec: PrivateKeyAlgorithm =
            serde_json::from_value(json!({ "keyType": "ecdsa", "curve": "secp384r1" })).unwrap();
        assert_eq!(ec, PrivateKeyAlgorithm::Ecdsa { curve: EllipticCurve::Secp384r1 });

        let ed: PrivateKeyAlgorithm = serde_json::from_value(json!({ "keyType": "ed25519" })).unwrap();
        assert_eq!(ed, PrivateKeyAlgorithm::Ed25519);
    }

    #[test]
    fn test_signature_compatibility() {
        assert!(PrivateKeyAlgorithm::Ed25519.supports(SignatureAlgorithm::Ed25519));
        assert!(!PrivateKeyAlgorithm::Ed25519.supports(SignatureAlgorithm::Sha256));
        let dsa = PrivateKeyAlgorithm::Dsa { key_size: DsaKeySize::Size2048 };
        assert!(!dsa.supports(SignatureAlgorithm::Sha512));
        assert_eq!(dsa.default_signature_algorithm(), SignatureAlgorithm::Sha256);
        assert_eq!(dsa.public_key_algorithm(), PublicKeyAlgorithm::Dsa);
    }

    #[test]
    fn test_usage_wire_names() {
        assert_eq!(serde_json::to_value(KeyUsage::CrlSigning).unwrap(), json!("crlSigning"));
        assert_eq!(
            serde_json::to_value(ExtendedKeyUsage::TlsWebServerAuthentication).unwrap(),
            json!("tlsWebServerAuthentication")
        );
    }

    #[test]
    fn test_subject_rendering() {
        let dn = DistinguishedName {
            common_name: Some("example.com".into()),
            country: Some("US".into()),
            organizational_unit: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(dn.to_subject(), "CN=example.com,C=US");
    }
}
