//! Analytics events recorded for page views and button clicks.

use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::identity::{IdentityStore, VisitorIdentity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    PageView,
    ButtonClick,
}

impl EventType {
    pub const fn label(self) -> &'static str {
        match self {
            EventType::PageView => "page_view",
            EventType::ButtonClick => "button_click",
        }
    }
}

/// Posting fields attached to events raised from job pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobContext {
    pub job_id: Option<String>,
    pub job_slug: Option<String>,
    pub job_reference_number: Option<String>,
    pub job_title: Option<String>,
    pub job_company: Option<String>,
}

/// Client environment captured at the time of the event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    pub page_url: Option<String>,
    pub page_path: Option<String>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub screen_width: Option<u32>,
    pub screen_height: Option<u32>,
}

/// One row of the events table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingEvent {
    pub visitor_id: String,
    pub session_id: String,
    pub event_type: EventType,
    pub event_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_reference_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum EventSinkError {
    #[error("event store rejected the event: {0}")]
    Rejected(String),
    #[error("event store unavailable: {0}")]
    Unavailable(String),
}

/// Destination for tracked events.
pub trait EventSink: Debug + Send + Sync {
    fn record(&self, event: TrackingEvent) -> Result<(), EventSinkError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryEventSink {
    events: Arc<Mutex<Vec<TrackingEvent>>>,
}

impl MemoryEventSink {
    pub fn events(&self) -> Vec<TrackingEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl EventSink for MemoryEventSink {
    fn record(&self, event: TrackingEvent) -> Result<(), EventSinkError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|err| EventSinkError::Unavailable(err.to_string()))?;
        guard.push(event);
        Ok(())
    }
}

/// Stamps events with visitor identity and hands them to a sink.
///
/// Tracking never fails the caller: sink errors are logged and dropped.
pub struct Tracker<P, S, E> {
    identity: VisitorIdentity<P, S>,
    sink: E,
}

impl<P, S, E> Tracker<P, S, E>
where
    P: IdentityStore,
    S: IdentityStore,
    E: EventSink,
{
    pub fn new(identity: VisitorIdentity<P, S>, sink: E) -> Self {
        Self { identity, sink }
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn track_page_view(
        &self,
        page_name: &str,
        page: &PageContext,
        job: Option<&JobContext>,
        metadata: Option<Value>,
    ) {
        self.track(EventType::PageView, page_name, page, job, metadata);
    }

    pub fn track_button_click(
        &self,
        button_name: &str,
        page: &PageContext,
        job: Option<&JobContext>,
        metadata: Option<Value>,
    ) {
        self.track(EventType::ButtonClick, button_name, page, job, metadata);
    }

    pub fn track(
        &self,
        event_type: EventType,
        event_name: &str,
        page: &PageContext,
        job: Option<&JobContext>,
        metadata: Option<Value>,
    ) {
        let ids = self.identity.tracking_ids();
        let job = job.cloned().unwrap_or_default();
        let event = TrackingEvent {
            visitor_id: ids.visitor_id,
            session_id: ids.session_id,
            event_type,
            event_name: event_name.to_string(),
            page_url: page.page_url.clone(),
            page_path: page.page_path.clone(),
            referrer: page.referrer.clone().filter(|referrer| !referrer.is_empty()),
            user_agent: page.user_agent.clone(),
            screen_width: page.screen_width,
            screen_height: page.screen_height,
            job_id: job.job_id,
            job_slug: job.job_slug,
            job_reference_number: job.job_reference_number,
            job_title: job.job_title,
            job_company: job.job_company,
            metadata,
        };

        match self.sink.record(event) {
            Ok(()) => debug!(event_type = event_type.label(), event_name, "tracked event"),
            Err(err) => warn!(
                event_type = event_type.label(),
                event_name,
                error = %err,
                "failed to track event"
            ),
        }
    }
}

/// Ensures a page view is tracked once per job slug.
#[derive(Debug, Default)]
pub struct PageViewGuard {
    tracked: bool,
    last_slug: Option<String>,
}

impl PageViewGuard {
    /// Returns true when the caller should emit a page view now.
    pub fn should_track(&mut self, job_slug: Option<&str>, enabled: bool) -> bool {
        if self.last_slug.as_deref() != job_slug {
            self.tracked = false;
            self.last_slug = job_slug.map(str::to_string);
        }

        if enabled && !self.tracked {
            self.tracked = true;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.tracked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::MemoryIdentityStore;
    use serde_json::json;

    #[derive(Debug)]
    struct RejectingSink;

    impl EventSink for RejectingSink {
        fn record(&self, _event: TrackingEvent) -> Result<(), EventSinkError> {
            Err(EventSinkError::Rejected("insert denied".to_string()))
        }
    }

    fn identity() -> VisitorIdentity<MemoryIdentityStore, MemoryIdentityStore> {
        VisitorIdentity::new(MemoryIdentityStore::default(), MemoryIdentityStore::default())
    }

    fn job() -> JobContext {
        JobContext {
            job_id: Some("42".to_string()),
            job_slug: Some("line-cook-austin".to_string()),
            job_title: Some("Line Cook".to_string()),
            ..JobContext::default()
        }
    }

    #[test]
    fn page_views_carry_identity_and_job_context() {
        let tracker = Tracker::new(identity(), MemoryEventSink::default());
        let page = PageContext {
            page_path: Some("/jobs/line-cook-austin".to_string()),
            referrer: Some(String::new()),
            ..PageContext::default()
        };

        tracker.track_page_view("job_detail", &page, Some(&job()), None);
        tracker.track_button_click("apply", &page, Some(&job()), Some(json!({ "step": 1 })));

        let events = tracker.sink().events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, EventType::PageView);
        assert_eq!(events[0].visitor_id, events[1].visitor_id);
        assert_eq!(events[0].job_slug.as_deref(), Some("line-cook-austin"));
        assert_eq!(events[0].referrer, None);
        assert_eq!(events[1].metadata, Some(json!({ "step": 1 })));
    }

    #[test]
    fn serialized_events_omit_missing_fields() {
        let tracker = Tracker::new(identity(), MemoryEventSink::default());
        tracker.track_page_view("jobs_list", &PageContext::default(), None, None);

        let record = serde_json::to_value(&tracker.sink().events()[0]).expect("event serializes");
        assert_eq!(record["event_type"], "page_view");
        assert_eq!(record["event_name"], "jobs_list");
        assert!(record.get("job_id").is_none());
        assert!(record.get("metadata").is_none());
    }

    #[test]
    fn sink_errors_are_swallowed() {
        let tracker = Tracker::new(identity(), RejectingSink);
        tracker.track_button_click("apply", &PageContext::default(), None, None);
    }

    #[test]
    fn guard_tracks_once_per_slug() {
        let mut guard = PageViewGuard::default();
        assert!(guard.should_track(Some("a"), true));
        assert!(!guard.should_track(Some("a"), true));
        assert!(guard.should_track(Some("b"), true));
        guard.reset();
        assert!(guard.should_track(Some("b"), true));
    }

    #[test]
    fn disabled_guard_waits_until_enabled() {
        let mut guard = PageViewGuard::default();
        assert!(!guard.should_track(None, false));
        assert!(guard.should_track(None, true));
        assert!(!guard.should_track(None, true));
    }
}
