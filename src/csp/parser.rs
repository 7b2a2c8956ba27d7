//! Import of content security policies from header text

use std::collections::HashSet;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::csp::policy::{ContentSecurityPolicy, DirectiveMap};
use crate::error::Error;
use crate::types::Result;

/// Directive names defined by CSP Level 3 and still in common use
static KNOWN_DIRECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "base-uri",
        "block-all-mixed-content",
        "child-src",
        "connect-src",
        "default-src",
        "font-src",
        "form-action",
        "frame-ancestors",
        "frame-src",
        "img-src",
        "manifest-src",
        "media-src",
        "object-src",
        "plugin-types",
        "prefetch-src",
        "report-to",
        "report-uri",
        "require-trusted-types-for",
        "sandbox",
        "script-src",
        "script-src-attr",
        "script-src-elem",
        "style-src",
        "style-src-attr",
        "style-src-elem",
        "trusted-types",
        "upgrade-insecure-requests",
        "worker-src",
    ]
    .into_iter()
    .collect()
});

/// Check if a directive name is a known CSP directive
pub fn is_known_directive(name: &str) -> bool {
    KNOWN_DIRECTIVES.contains(name)
}

/// Parse header text such as `default-src 'self'; sandbox` into a policy.
///
/// Directive names are lowercased, empty segments are skipped and, as in
/// browsers, only the first occurrence of a repeated directive is kept.
pub fn parse_policy(name: impl Into<String>, text: &str) -> Result<ContentSecurityPolicy> {
    let name = name.into();
    if name.is_empty() {
        return Err(Error::Validation("Policy name cannot be empty".into()));
    }

    let mut directives = DirectiveMap::new();
    for segment in text.split(';') {
        let mut parts = segment.split_whitespace();
        let directive = match parts.next() {
            Some(directive) => directive.to_lowercase(),
            None => continue,
        };

        if directives.contains(&directive) {
            debug!("Ignoring repeated directive: {}", directive);
            continue;
        }

        if !is_known_directive(&directive) {
            debug!("Importing unknown directive: {}", directive);
        }

        directives.insert(directive, parts.map(str::to_string).collect());
    }

    if directives.is_empty() {
        return Err(Error::Validation(format!("Policy {} has no directives", name)));
    }

    Ok(ContentSecurityPolicy::new(name, directives))
}
