use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::config::ApiSettings;
use crate::error::Error;
use crate::types::Result;

const USER_DATA_PATH: &str = "api/user/data";
const UTILS_ACTION_PATH: &str = "api/utils/action";
const UTILS_EXECUTE_PATH: &str = "api/utils/execute";

/// Client for the Secutils backend API
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// HTTP client for API requests
    client: reqwest::Client,
    /// Base URL, always ending with `/`
    base_url: Url,
}

/// Request payload for storing user data
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetUserDataRequest {
    /// JSON-encoded value
    data_value: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(settings.user_agent.clone())
            .timeout(settings.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url()?,
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Fetch the value stored under a user data key
    pub async fn get_user_data(&self, data_type: &str) -> Result<Option<Value>> {
        debug!("Fetching user data: {}", data_type);

        let response = self
            .client
            .get(self.endpoint(USER_DATA_PATH)?)
            .query(&[("dataType", data_type)])
            .send()
            .await?;

        let mut body: Value = Self::check_status(response).await?.json().await?;
        Ok(match body.get_mut(data_type).map(Value::take) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        })
    }

    /// Store a value under a user data key
    pub async fn set_user_data(&self, data_type: &str, value: &Value) -> Result<()> {
        debug!("Storing user data: {}", data_type);

        let request = SetUserDataRequest {
            data_value: serde_json::to_string(value)?,
        };

        let response = self
            .client
            .post(self.endpoint(USER_DATA_PATH)?)
            .query(&[("dataType", data_type)])
            .json(&request)
            .send()
            .await?;

        Self::check_status(response).await?;
        info!("User data {} stored", data_type);
        Ok(())
    }

    /// Run a utility action (`/api/utils/action`)
    pub async fn action<T, R>(&self, request: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.post_json(UTILS_ACTION_PATH, request).await
    }

    /// Execute a utility (`/api/utils/execute`)
    pub async fn execute<T, R>(&self, request: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.post_json(UTILS_EXECUTE_PATH, request).await
    }

    async fn post_json<T, R>(&self, path: &str, request: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(path)?)
            .json(request)
            .send()
            .await?;

        let text = Self::check_status(response).await?.text().await?;

        // Empty bodies (204 and friends) decode as null
        let body = if text.trim().is_empty() { "null" } else { text.as_str() };
        Ok(serde_json::from_str(body)?)
    }

    /// Turn non-success responses into API errors
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = if text.is_empty() {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        } else {
            text
        };

        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}
