use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::certificates::attributes::{
    DistinguishedName, ExtendedKeyUsage, KeyUsage, PrivateKeyAlgorithm, SignatureAlgorithm,
};
use crate::codec::{non_empty_list, non_empty_string, require_name, CompactCodec};
use crate::types::{now_timestamp, timestamp_to_datetime, Result, UnixTimestamp};

/// Reusable description of a certificate to be issued by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateTemplate {
    /// Template name, unique within a user's collection
    pub name: String,
    /// Subject fields
    pub subject: DistinguishedName,
    /// Key algorithm and its parameters
    pub key_algorithm: PrivateKeyAlgorithm,
    /// Signature algorithm
    pub signature_algorithm: SignatureAlgorithm,
    /// Start of validity (Unix seconds)
    pub not_valid_before: UnixTimestamp,
    /// End of validity (Unix seconds)
    pub not_valid_after: UnixTimestamp,
    /// Whether the certificate is a CA
    pub is_ca: bool,
    /// Key usage
    pub key_usage: Option<Vec<KeyUsage>>,
    /// Extended key usage
    pub extended_key_usage: Option<Vec<ExtendedKeyUsage>>,
}

/// Compact wire record of a [`CertificateTemplate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedCertificateTemplate {
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
    #[serde(rename = "ka")]
    pub key_algorithm: PrivateKeyAlgorithm,
    #[serde(rename = "sa")]
    pub signature_algorithm: SignatureAlgorithm,
    #[serde(rename = "nb")]
    pub not_valid_before: UnixTimestamp,
    #[serde(rename = "na")]
    pub not_valid_after: UnixTimestamp,
    #[serde(rename = "ca")]
    pub is_ca: bool,
    #[serde(rename = "ku", skip_serializing_if = "Option::is_none")]
    pub key_usage: Option<Vec<KeyUsage>>,
    #[serde(rename = "eku", skip_serializing_if = "Option::is_none")]
    pub extended_key_usage: Option<Vec<ExtendedKeyUsage>>,
}

impl CertificateTemplate {
    /// Create a template with default settings: RSA-2048 key, SHA-256
    /// signature, valid for one year starting now, not a CA
    pub fn new(name: impl Into<String>) -> Self {
        let key_algorithm = PrivateKeyAlgorithm::default();
        let not_valid_before = now_timestamp();

        Self {
            name: name.into(),
            subject: DistinguishedName::default(),
            signature_algorithm: key_algorithm.default_signature_algorithm(),
            key_algorithm,
            not_valid_before,
            not_valid_after: not_valid_before + Duration::days(365).num_seconds(),
            is_ca: false,
            key_usage: None,
            extended_key_usage: None,
        }
    }

    /// Start of validity as a date-time
    pub fn not_valid_before_utc(&self) -> Option<DateTime<Utc>> {
        timestamp_to_datetime(self.not_valid_before)
    }

    /// End of validity as a date-time
    pub fn not_valid_after_utc(&self) -> Option<DateTime<Utc>> {
        timestamp_to_datetime(self.not_valid_after)
    }

    /// Change the key algorithm, switching to its default signature algorithm
    /// if the current one is not supported by the new key type
    pub fn set_key_algorithm(&mut self, key_algorithm: PrivateKeyAlgorithm) {
        self.key_algorithm = key_algorithm;
        if !key_algorithm.supports(self.signature_algorithm) {
            self.signature_algorithm = key_algorithm.default_signature_algorithm();
        }
    }
}

impl CompactCodec for CertificateTemplate {
    type Compact = SerializedCertificateTemplate;
    const USER_DATA_KEY: &'static str = "certificateTemplates";

    fn collection_key(&self) -> &str {
        &self.name
    }

    fn to_compact(&self) -> SerializedCertificateTemplate {
        SerializedCertificateTemplate {
            name: self.name.clone(),
            common_name: non_empty_string(&self.subject.common_name),
            country: non_empty_string(&self.subject.country),
            state_or_province: non_empty_string(&self.subject.state_or_province),
            locality: non_empty_string(&self.subject.locality),
            organization: non_empty_string(&self.subject.organization),
            organizational_unit: non_empty_string(&self.subject.organizational_unit),
            key_algorithm: self.key_algorithm,
            signature_algorithm: self.signature_algorithm,
            not_valid_before: self.not_valid_before,
            not_valid_after: self.not_valid_after,
            is_ca: self.is_ca,
            key_usage: non_empty_list(&self.key_usage),
            extended_key_usage: non_empty_list(&self.extended_key_usage),
        }
    }

    fn from_compact(compact: SerializedCertificateTemplate) -> Result<Self> {
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
            key_algorithm: compact.key_algorithm,
            signature_algorithm: compact.signature_algorithm,
            not_valid_before: compact.not_valid_before,
            not_valid_after: compact.not_valid_after,
            is_ca: compact.is_ca,
            key_usage: compact.key_usage,
            extended_key_usage: compact.extended_key_usage,
        })
    }
}
