//! Content security policies: ordered directive maps, compact codec,
//! policy string rendering and header import

pub mod parser;
pub mod policy;

pub use parser::{is_known_directive, parse_policy};
pub use policy::{
    content_security_policy_string, ContentSecurityPolicy, DirectiveMap, PolicySource,
    SerializedContentSecurityPolicy, SerializedDirective,
};
