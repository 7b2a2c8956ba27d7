use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::Error;
use crate::trackers::schedule::{Schedule, SchedulerJobRetryStrategy};
use crate::types::{Result, UnixTimestamp};

/// Most revisions a tracker may keep
pub const MAX_TRACKER_REVISIONS: u32 = 10;

/// Longest delay before a page is captured, in milliseconds
pub const MAX_TRACKER_DELAY_MS: u64 = 60_000;

/// Scripts payload of a concrete tracker kind
pub trait TrackerScripts:
    Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync
{
    /// Tracker kind identifier used by the backend
    const KIND: &'static str;
}

/// Scripts of a tracker that watches the resources a page loads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesScripts {
    /// Script mapping or filtering each captured resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_filter_map: Option<String>,
}

impl TrackerScripts for ResourcesScripts {
    const KIND: &'static str = "webPageResources";
}

/// Scripts of a tracker that watches page content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentScripts {
    /// Script extracting the tracked content from the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract_content: Option<String>,
}

impl TrackerScripts for ContentScripts {
    const KIND: &'static str = "webPageContent";
}

/// Tracker settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "S: TrackerScripts"))]
pub struct WebPageTrackerSettings<S: TrackerScripts> {
    /// Number of revisions to keep
    pub revisions: u32,
    /// Delay before capturing the page, in milliseconds
    pub delay: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<S>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_strategy: Option<SchedulerJobRetryStrategy>,
    /// Notify the user about detected changes
    #[serde(default)]
    pub notifications: bool,
}

impl<S: TrackerScripts> Default for WebPageTrackerSettings<S> {
    fn default() -> Self {
        Self {
            revisions: 3,
            delay: 5_000,
            schedule: None,
            scripts: None,
            retry_strategy: None,
            notifications: false,
        }
    }
}

/// Web page tracker, generic over the scripts of its concrete kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "S: TrackerScripts"))]
pub struct WebPageTracker<S: TrackerScripts> {
    /// Server-assigned identifier
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub created_at: UnixTimestamp,
    pub settings: WebPageTrackerSettings<S>,
}

/// Tracker of the resources (scripts, styles) a page loads
pub type ResourcesTracker = WebPageTracker<ResourcesScripts>;

/// Tracker of page content
pub type ContentTracker = WebPageTracker<ContentScripts>;

impl<S: TrackerScripts> WebPageTracker<S> {
    /// Backend kind identifier of this tracker
    pub fn kind(&self) -> &'static str {
        S::KIND
    }

    /// Parsed tracker URL
    pub fn parsed_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.url)?)
    }

    /// Check structural constraints before the tracker is sent to the backend
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Tracker name cannot be empty".into()));
        }

        let url = self.parsed_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Validation(format!(
                "Tracker URL must use http or https, got {}",
                url.scheme()
            )));
        }

        if self.settings.revisions > MAX_TRACKER_REVISIONS {
            return Err(Error::Validation(format!(
                "Tracker can keep at most {} revisions",
                MAX_TRACKER_REVISIONS
            )));
        }

        if self.settings.delay > MAX_TRACKER_DELAY_MS {
            return Err(Error::Validation(format!(
                "Tracker delay cannot exceed {}ms",
                MAX_TRACKER_DELAY_MS
            )));
        }

        if let Some(strategy) = &self.settings.retry_strategy {
            let schedule = self.settings.schedule.clone().unwrap_or(Schedule::Manual);
            strategy.validate(&schedule)?;
        }

        Ok(())
    }
}

/// Change status of a resource relative to the previous revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WebPageResourceDiffStatus {
    Added,
    Removed,
    Changed,
}

/// Digest and size of a resource body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebPageResourceContent {
    pub digest: String,
    pub size: u64,
}

/// Resource captured by a resources tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPageResource {
    /// Absent for inline resources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<WebPageResourceContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_status: Option<WebPageResourceDiffStatus>,
}

/// Scripts and styles captured at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebPageResourcesData {
    #[serde(default)]
    pub scripts: Vec<WebPageResource>,
    #[serde(default)]
    pub styles: Vec<WebPageResource>,
}

/// Revision of a resources tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPageResourcesRevision {
    pub id: Uuid,
    pub data: WebPageResourcesData,
    pub created_at: UnixTimestamp,
}

impl WebPageResourcesRevision {
    /// Resources that differ from the previous revision
    pub fn changed_resources(&self) -> impl Iterator<Item = &WebPageResource> {
        self.data
            .scripts
            .iter()
            .chain(self.data.styles.iter())
            .filter(|resource| resource.diff_status.is_some())
    }
}

/// Revision of a content tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPageContentRevision {
    pub id: Uuid,
    pub data: String,
    pub created_at: UnixTimestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trackers::schedule::RetryStrategyType;
    use serde_json::json;

    fn resources_tracker() -> ResourcesTracker {
        WebPageTracker {
            id: Uuid::nil(),
            name: "landing".to_string(),
            url: "https://example.com/".to_string(),
            created_at: 1_700_000_000,
            settings: WebPageTrackerSettings {
                revisions: 3,
                delay: 2_000,
                schedule: Some(Schedule::Hourly),
                scripts: Some(ResourcesScripts {
                    resource_filter_map: Some("return resource;".to_string()),
                }),
                retry_strategy: Schedule::Hourly.default_retry_strategy(),
                notifications: true,
            },
        }
    }

    #[test]
    fn test_tracker_wire_shape() {
        let value = serde_json::to_value(resources_tracker()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "name": "landing",
                "url": "https://example.com/",
                "createdAt": 1700000000,
                "settings": {
                    "revisions": 3,
                    "delay": 2000,
                    "schedule": "@hourly",
                    "scripts": { "resourceFilterMap": "return resource;" },
                    "retryStrategy": { "type": "constant", "maxAttempts": 3, "interval": 300000 },
                    "notifications": true
                }
            })
        );
    }

    #[test]
    fn test_content_tracker_minimal_settings() {
        let tracker: ContentTracker = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "name": "pricing",
            "url": "https://example.com/pricing",
            "createdAt": 1,
            "settings": { "revisions": 0, "delay": 0 }
        }))
        .unwrap();

        assert_eq!(tracker.kind(), "webPageContent");
        assert_eq!(tracker.settings.schedule, None);
        assert_eq!(tracker.settings.scripts, None);
        assert!(!tracker.settings.notifications);
        assert!(tracker.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let tracker = resources_tracker();
        assert_eq!(tracker.kind(), "webPageResources");
        assert!(tracker.validate().is_ok());

        let mut bad_url = tracker.clone();
        bad_url.url = "ftp://example.com".to_string();
        assert!(bad_url.validate().is_err());

        let mut too_many = tracker.clone();
        too_many.settings.revisions = MAX_TRACKER_REVISIONS + 1;
        assert!(too_many.validate().is_err());

        let mut manual_with_retries = tracker.clone();
        manual_with_retries.settings.schedule = None;
        assert!(manual_with_retries.validate().is_err());

        let mut no_retries = manual_with_retries.clone();
        no_retries.settings.retry_strategy = Some(SchedulerJobRetryStrategy {
            strategy_type: RetryStrategyType::None,
            max_attempts: 1,
            interval: 0,
        });
        assert!(no_retries.validate().is_ok());
    }

    #[test]
    fn test_resources_revision() {
        let revision: WebPageResourcesRevision = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "createdAt": 10,
            "data": {
                "scripts": [
                    { "url": "https://example.com/app.js", "content": { "digest": "abc", "size": 10 }, "diffStatus": "changed" },
                    { "content": { "digest": "def", "size": 3 } }
                ],
                "styles": [{ "url": "https://example.com/app.css", "diffStatus": "added" }]
            }
        }))
        .unwrap();

        assert_eq!(revision.changed_resources().count(), 2);
        assert_eq!(revision.data.scripts[1].url, None);
    }
}
