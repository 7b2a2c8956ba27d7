pub mod attributes;
pub mod self_signed;
pub mod template;

// Re-export key types
pub use attributes::{
    DistinguishedName, DsaKeySize, EllipticCurve, ExtendedKeyUsage, KeyUsage, PrivateKeyAlgorithm,
    PublicKeyAlgorithm, RsaKeySize, SignatureAlgorithm,
};
pub use self_signed::{SelfSignedCertificate, SerializedSelfSignedCertificate};
pub use template::{CertificateTemplate, SerializedCertificateTemplate};
