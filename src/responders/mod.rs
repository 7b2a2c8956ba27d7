//! Webhook responders: user-configured HTTP endpoints returning a fixed or
//! scripted response

use std::fmt;

use http::header::{HeaderName, HeaderValue};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::Error;
use crate::types::{Result, UnixTimestamp};

/// Most requests a responder may keep in its history
pub const MAX_REQUESTS_TO_TRACK: u32 = 100;

/// HTTP method a responder answers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponderMethod {
    /// Any method
    Any,
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Connect,
    Trace,
    Patch,
}

impl fmt::Display for ResponderMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponderMethod::Any => "ANY",
            ResponderMethod::Get => "GET",
            ResponderMethod::Post => "POST",
            ResponderMethod::Put => "PUT",
            ResponderMethod::Delete => "DELETE",
            ResponderMethod::Head => "HEAD",
            ResponderMethod::Options => "OPTIONS",
            ResponderMethod::Connect => "CONNECT",
            ResponderMethod::Trace => "TRACE",
            ResponderMethod::Patch => "PATCH",
        };
        write!(f, "{}", name)
    }
}

impl ResponderMethod {
    /// Check if a request with the given method is handled by this responder
    pub fn matches(&self, method: &http::Method) -> bool {
        match self {
            ResponderMethod::Any => true,
            other => other.to_string() == method.as_str(),
        }
    }
}

/// Response settings of a responder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponderSettings {
    /// 100 to 999
    pub status_code: u16,
    /// Response headers in order, as `[name, value]` pairs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<(String, String)>,
    /// Forbidden for `HEAD` responders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Delay before responding, in milliseconds
    #[serde(default)]
    pub delay: u64,
    /// Number of requests kept in history, 0 to 100
    pub requests_to_track: u32,
    /// Script generating the response dynamically
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

impl Default for ResponderSettings {
    fn default() -> Self {
        Self {
            status_code: 200,
            headers: Vec::new(),
            body: None,
            delay: 0,
            requests_to_track: 10,
            script: None,
        }
    }
}

/// User-configured synthetic HTTP endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Responder {
    pub id: Uuid,
    pub name: String,
    /// Starts with `/`, does not end with `/`
    pub path: String,
    pub method: ResponderMethod,
    pub settings: ResponderSettings,
}

impl Responder {
    /// Check if the response is generated by a script rather than fixed
    pub fn is_dynamic(&self) -> bool {
        self.settings.script.as_deref().map_or(false, |script| !script.trim().is_empty())
    }

    /// Full URL the responder is reachable at under the given base
    pub fn endpoint_url(&self, base: &Url) -> Result<Url> {
        Ok(base.join(self.path.trim_start_matches('/'))?)
    }

    /// Check structural constraints before the responder is sent to the backend
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Responder name cannot be empty".into()));
        }

        if !self.path.starts_with('/') || self.path.ends_with('/') {
            return Err(Error::Validation(format!(
                "Responder path must start and must not end with '/': {}",
                self.path
            )));
        }

        let settings = &self.settings;
        StatusCode::from_u16(settings.status_code).map_err(|_| {
            Error::Validation(format!("Invalid status code: {}", settings.status_code))
        })?;

        for (name, value) in &settings.headers {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::Validation(format!("Invalid header name: {}", name)))?;
            HeaderValue::from_str(value)
                .map_err(|_| Error::Validation(format!("Invalid value for header {}", name)))?;
        }

        if self.method == ResponderMethod::Head && settings.body.is_some() {
            return Err(Error::Validation("HEAD responders cannot have a body".into()));
        }

        if settings.requests_to_track > MAX_REQUESTS_TO_TRACK {
            return Err(Error::Validation(format!(
                "Responder can track at most {} requests",
                MAX_REQUESTS_TO_TRACK
            )));
        }

        Ok(())
    }
}

/// Request received by a responder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponderRequest {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_address: Option<String>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<(String, String)>>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<u8>>,
    pub created_at: UnixTimestamp,
}

impl ResponderRequest {
    /// Body as UTF-8 text, replacing invalid sequences
    pub fn body_text(&self) -> Option<String> {
        self.body.as_ref().map(|body| String::from_utf8_lossy(body).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn responder() -> Responder {
        Responder {
            id: Uuid::nil(),
            name: "webhook".to_string(),
            path: "/hooks/github".to_string(),
            method: ResponderMethod::Post,
            settings: ResponderSettings {
                status_code: 201,
                headers: vec![
                    ("Content-Type".to_string(), "application/json".to_string()),
                    ("X-Trace".to_string(), "1".to_string()),
                ],
                body: Some("{}".to_string()),
                delay: 100,
                requests_to_track: 5,
                script: None,
            },
        }
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(responder()).unwrap();
        assert_eq!(value["method"], json!("POST"));
        assert_eq!(value["settings"]["statusCode"], json!(201));
        assert_eq!(
            value["settings"]["headers"],
            json!([["Content-Type", "application/json"], ["X-Trace", "1"]])
        );
        assert!(value["settings"].get("script").is_none());

        let decoded: Responder = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, responder());
    }

    #[test]
    fn test_validate_path() {
        assert!(responder().validate().is_ok());

        for path in ["hooks", "/hooks/", "/"] {
            let mut r = responder();
            r.path = path.to_string();
            assert!(r.validate().is_err(), "path {} should be rejected", path);
        }
    }

    #[test]
    fn test_validate_status_and_headers() {
        let mut r = responder();
        r.settings.status_code = 99;
        assert!(r.validate().is_err());
        r.settings.status_code = 999;
        assert!(r.validate().is_ok());

        let mut r = responder();
        r.settings.headers.push(("Bad Header".to_string(), "x".to_string()));
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_validate_head_body_and_tracking() {
        let mut r = responder();
        r.method = ResponderMethod::Head;
        assert!(r.validate().is_err());
        r.settings.body = None;
        assert!(r.validate().is_ok());

        r.settings.requests_to_track = MAX_REQUESTS_TO_TRACK + 1;
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_method_matching() {
        assert!(ResponderMethod::Any.matches(&http::Method::DELETE));
        assert!(ResponderMethod::Post.matches(&http::Method::POST));
        assert!(!ResponderMethod::Post.matches(&http::Method::GET));
    }

    #[test]
    fn test_dynamic_and_endpoint() {
        let mut r = responder();
        assert!(!r.is_dynamic());
        r.settings.script = Some("(() => ({ statusCode: 200 }))()".to_string());
        assert!(r.is_dynamic());

        let base = Url::parse("https://user.webhooks.example.com/").unwrap();
        assert_eq!(
            r.endpoint_url(&base).unwrap().as_str(),
            "https://user.webhooks.example.com/hooks/github"
        );
    }

    #[test]
    fn test_request_body_text() {
        let request: ResponderRequest = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "method": "POST",
            "url": "/hooks/github?x=1",
            "body": [104, 105],
            "createdAt": 1
        }))
        .unwrap();
        assert_eq!(request.body_text().as_deref(), Some("hi"));
        assert_eq!(request.client_address, None);
    }
}
