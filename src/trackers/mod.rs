pub mod schedule;
pub mod tracker;

// Re-export key types
pub use schedule::{
    retry_intervals_for, RetryInterval, RetryStrategyType, Schedule, SchedulerJobRetryStrategy,
};
pub use tracker::{
    ContentScripts, ContentTracker, ResourcesScripts, ResourcesTracker, TrackerScripts,
    WebPageContentRevision, WebPageResource, WebPageResourceContent, WebPageResourceDiffStatus,
    WebPageResourcesData, WebPageResourcesRevision, WebPageTracker, WebPageTrackerSettings,
};
