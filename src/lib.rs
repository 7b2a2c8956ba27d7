//! Secutils client - data models, compact codecs and API access for the
//! Secutils security utilities
//!
//! Covers certificate templates, content security policies, web page
//! trackers, webhook responders and WebAuthn payload conversion.

// Foundational layer
pub mod error;
pub mod types;
pub mod config;
pub mod telemetry;

// Core layer
pub mod codec;
pub mod certificates;
pub mod csp;
pub mod trackers;
pub mod responders;
pub mod webauthn;

// Interface layer
pub mod api;

// Public key types
pub use crate::error::Error;
pub use crate::types::Result;
pub use crate::codec::CompactCodec;
pub use crate::config::Settings;
pub use crate::api::{ApiClient, UserDataStore};
pub use crate::certificates::{CertificateTemplate, SelfSignedCertificate};
pub use crate::csp::ContentSecurityPolicy;
pub use crate::trackers::{ContentTracker, ResourcesTracker, Schedule};
pub use crate::responders::Responder;
