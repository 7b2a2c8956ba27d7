use serde::{Deserialize, Serialize};

use crate::codec::{require_name, CompactCodec};
use crate::types::Result;

/// Directives that have no effect when a policy is delivered in a `<meta>` tag
pub const META_IGNORED_DIRECTIVES: [&str; 4] = ["frame-ancestors", "report-uri", "report-to", "sandbox"];

/// Ordered map from directive name to its values.
///
/// Iteration order is insertion order; inserting an existing name replaces
/// its values in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveMap {
    entries: Vec<(String, Vec<String>)>,
}

impl DirectiveMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a directive, returning the previous values
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) -> Option<Vec<String>> {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, current)) => Some(std::mem::replace(current, values)),
            None => {
                self.entries.push((name, values));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        let index = self.entries.iter().position(|(existing, _)| existing == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, Vec<String>)> for DirectiveMap {
    fn from_iter<I: IntoIterator<Item = (N, Vec<String>)>>(iter: I) -> Self {
        let mut map = DirectiveMap::new();
        for (name, values) in iter {
            map.insert(name, values);
        }
        map
    }
}

/// Where a rendered policy is going to be delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PolicySource {
    /// `Content-Security-Policy` response header
    Header,
    /// `<meta http-equiv="Content-Security-Policy">` tag
    Meta,
}

/// Named content security policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSecurityPolicy {
    /// Policy name, unique within a user's collection
    pub name: String,
    /// Directives in user-defined order
    pub directives: DirectiveMap,
}

/// Compact wire record of a single directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedDirective {
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "v")]
    pub values: Vec<String>,
}

/// Compact wire record of a [`ContentSecurityPolicy`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedContentSecurityPolicy {
    pub name: String,
    pub directives: Vec<SerializedDirective>,
}

impl ContentSecurityPolicy {
    pub fn new(name: impl Into<String>, directives: DirectiveMap) -> Self {
        Self { name: name.into(), directives }
    }

    /// Render the policy as a single-line header value
    pub fn to_policy_string(&self) -> String {
        render_directives(self.directives.iter())
    }

    /// Render the policy for a specific delivery source
    pub fn to_policy_string_for(&self, source: PolicySource) -> String {
        match source {
            PolicySource::Header => self.to_policy_string(),
            PolicySource::Meta => render_directives(
                self.directives
                    .iter()
                    .filter(|(name, _)| !META_IGNORED_DIRECTIVES.contains(name)),
            ),
        }
    }

    /// Render as an HTML `<meta>` element
    pub fn to_meta_tag(&self) -> String {
        let content = self
            .to_policy_string_for(PolicySource::Meta)
            .replace('&', "&amp;")
            .replace('"', "&quot;");
        format!(r#"<meta http-equiv="Content-Security-Policy" content="{}">"#, content)
    }
}

/// Render a policy as `"<name> <v1> <v2>; <name2>"`, flag directives as bare names
pub fn content_security_policy_string(policy: &ContentSecurityPolicy) -> String {
    policy.to_policy_string()
}

fn render_directives<'a>(directives: impl Iterator<Item = (&'a str, &'a [String])>) -> String {
    directives
        .map(|(name, values)| {
            if values.is_empty() {
                name.to_string()
            } else {
                format!("{} {}", name, values.join(" "))
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl CompactCodec for ContentSecurityPolicy {
    type Compact = SerializedContentSecurityPolicy;
    const USER_DATA_KEY: &'static str = "contentSecurityPolicies";

    fn collection_key(&self) -> &str {
        &self.name
    }

    fn to_compact(&self) -> SerializedContentSecurityPolicy {
        SerializedContentSecurityPolicy {
            name: self.name.clone(),
            directives: self
                .directives
                .iter()
                .map(|(name, values)| SerializedDirective {
                    name: name.to_string(),
                    values: values.to_vec(),
                })
                .collect(),
        }
    }

    /// A repeated directive name keeps the position of its first occurrence
    /// and the values of its last one.
    fn from_compact(compact: SerializedContentSecurityPolicy) -> Result<Self> {
        Ok(Self {
            name: require_name(compact.name)?,
            directives: compact
                .directives
                .into_iter()
                .map(|directive| (directive.name, directive.values))
                .collect(),
        })
    }
}
