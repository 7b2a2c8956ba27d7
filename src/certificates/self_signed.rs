use serde::{Deserialize, Serialize};

use crate::certificates::attributes::{
    DistinguishedName, ExtendedKeyUsage, KeyUsage, PublicKeyAlgorithm, SignatureAlgorithm,
};
use crate::certificates::template::CertificateTemplate;
use crate::codec::{non_empty_list, non_empty_string, require_name, CompactCodec};
use crate::error::Error;
use crate::types::{Result, UnixTimestamp};

/// Lowest X.509 version
pub const MIN_CERTIFICATE_VERSION: u8 = 1;
/// Highest X.509 version
pub const MAX_CERTIFICATE_VERSION: u8 = 3;

/// Self-signed certificate description with a flat key algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfSignedCertificate {
    pub name: String,
    pub subject: DistinguishedName,
    pub public_key_algorithm: PublicKeyAlgorithm,
    pub signature_algorithm: SignatureAlgorithm,
    pub not_valid_before: UnixTimestamp,
    pub not_valid_after: UnixTimestamp,
    /// X.509 version, 1 to 3
    pub version: u8,
    pub is_ca: bool,
    pub key_usage: Option<Vec<KeyUsage>>,
    pub extended_key_usage: Option<Vec<ExtendedKeyUsage>>,
}

/// Compact wire record of a [`SelfSignedCertificate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedSelfSignedCertificate {
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "cn", skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(rename = "c", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "s", skip_serializing_if = "Option::is_none")]
    pub state_or_province: Option<String>,
    #[serde(rename = "l", skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(rename = "o", skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(rename = "ou", skip_serializing_if = "Option::is_none")]
    pub organizational_unit: Option<String>,
    #[serde(rename = "pka")]
    pub public_key_algorithm: PublicKeyAlgorithm,
    #[serde(rename = "sa")]
    pub signature_algorithm: SignatureAlgorithm,
    #[serde(rename = "nb")]
    pub not_valid_before: UnixTimestamp,
    #[serde(rename = "na")]
    pub not_valid_after: UnixTimestamp,
    #[serde(rename = "v")]
    pub version: u8,
    #[serde(rename = "ca")]
    pub is_ca: bool,
    #[serde(rename = "ku", skip_serializing_if = "Option::is_none")]
    pub key_usage: Option<Vec<KeyUsage>>,
    #[serde(rename = "eku", skip_serializing_if = "Option::is_none")]
    pub extended_key_usage: Option<Vec<ExtendedKeyUsage>>,
}

impl From<&CertificateTemplate> for SelfSignedCertificate {
    fn from(template: &CertificateTemplate) -> Self {
        Self {
            name: template.name.clone(),
            subject: template.subject.clone(),
            public_key_algorithm: template.key_algorithm.public_key_algorithm(),
            signature_algorithm: template.signature_algorithm,
            not_valid_before: template.not_valid_before,
            not_valid_after: template.not_valid_after,
            version: MAX_CERTIFICATE_VERSION,
            is_ca: template.is_ca,
            key_usage: template.key_usage.clone(),
            extended_key_usage: template.extended_key_usage.clone(),
        }
    }
}

impl CompactCodec for SelfSignedCertificate {
    type Compact = SerializedSelfSignedCertificate;
    const USER_DATA_KEY: &'static str = "selfSignedCertificates";

    fn collection_key(&self) -> &str {
        &self.name
    }

    fn to_compact(&self) -> SerializedSelfSignedCertificate {
        SerializedSelfSignedCertificate {
            name: self.name.clone(),
            common_name: non_empty_string(&self.subject.common_name),
            country: non_empty_string(&self.subject.country),
            state_or_province: non_empty_string(&self.subject.state_or_province),
            locality: non_empty_string(&self.subject.locality),
            organization: non_empty_string(&self.subject.organization),
            organizational_unit: non_empty_string(&self.subject.organizational_unit),
            public_key_algorithm: self.public_key_algorithm,
            signature_algorithm: self.signature_algorithm,
            not_valid_before: self.not_valid_before,
            not_valid_after: self.not_valid_after,
            version: self.version,
            is_ca: self.is_ca,
            key_usage: non_empty_list(&self.key_usage),
            extended_key_usage: non_empty_list(&self.extended_key_usage),
        }
    }

    fn from_compact(compact: SerializedSelfSignedCertificate) -> Result<Self> {
        if !(MIN_CERTIFICATE_VERSION..=MAX_CERTIFICATE_VERSION).contains(&compact.version) {
            return Err(Error::Decode(format!(
                "Unsupported certificate version {} for {}",
                compact.version, compact.name
            )));
        }

        Ok(Self {
            name: require_name(compact.name)?,
            subject: DistinguishedName {
                common_name: compact.common_name,
                country: compact.country,
                state_or_province: compact.state_or_province,
                locality: compact.locality,
                organization: compact.organization,
                organizational_unit: compact.organizational_unit,
            },
            public_key_algorithm: compact.public_key_algorithm,
            signature_algorithm: compact.signature_algorithm,
            not_valid_before: compact.not_valid_before,
            not_valid_after: compact.not_valid_after,
            version: compact.version,
            is_ca: compact.is_ca,
            key_usage: compact.key_usage,
            extended_key_usage: compact.extended_key_usage,
        })
    }
}
