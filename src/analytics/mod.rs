// Analytics - the shared usage-signal capability
//
// The shell forwards coarse-grained usage signals (app launch, tab switch)
// to whatever sink is injected at composition time. Using an enum for the
// events allows pattern matching and ensures type-safe communication between
// the shell and the sink task.

pub mod sink;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Usage events emitted by the shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")] // {"type": "tab_selected", ...}
pub enum AnalyticsEvent {
    /// The shell's root content rendered for the first time
    AppLaunched,

    /// The user switched to a tab
    TabSelected { title: String },
}

/// A timestamped event as written to the session log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: AnalyticsEvent,
}

impl TrackedEvent {
    pub fn new(event: AnalyticsEvent) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Capability for tracking usage events
///
/// `track` is fire-and-forget: it must never block the caller and has no
/// error channel back into the shell. Whatever happens inside the sink stays
/// inside the sink.
pub trait Analytics: Send + Sync {
    fn track(&self, event: AnalyticsEvent);
}

/// Channel-backed analytics implementation
///
/// Forwards events over a bounded mpsc channel to the background sink task.
/// Uses `try_send` so a slow or dead sink can never stall the UI event loop;
/// events are dropped when the buffer is full.
pub struct ChannelAnalytics {
    tx: mpsc::Sender<TrackedEvent>,
}

impl ChannelAnalytics {
    pub fn new(tx: mpsc::Sender<TrackedEvent>) -> Self {
        Self { tx }
    }
}

impl Analytics for ChannelAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        // Dropped events are acceptable: delivery guarantees are explicitly
        // not part of the sink contract
        if self.tx.try_send(TrackedEvent::new(event)).is_err() {
            tracing::debug!("Analytics buffer full, event dropped");
        }
    }
}

/// Test support: a sink that records every event it is handed
#[cfg(test)]
pub(crate) mod testing {
    use super::{Analytics, AnalyticsEvent};
    use std::sync::Mutex;

    /// Records tracked events in order, for asserting dispatch behavior
    #[derive(Default)]
    pub(crate) struct RecordingAnalytics {
        events: Mutex<Vec<AnalyticsEvent>>,
    }

    impl RecordingAnalytics {
        pub(crate) fn events(&self) -> Vec<AnalyticsEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl Analytics for RecordingAnalytics {
        fn track(&self, event: AnalyticsEvent) {
            self.events.lock().unwrap().push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingAnalytics;
    use super::*;
    use std::sync::Arc;

    #[test]
    fn event_json_uses_snake_case_tag() {
        let json = serde_json::to_string(&AnalyticsEvent::AppLaunched).unwrap();
        assert_eq!(json, r#"{"type":"app_launched"}"#);

        let json = serde_json::to_string(&AnalyticsEvent::TabSelected {
            title: "Feed".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"tab_selected","title":"Feed"}"#);
    }

    #[test]
    fn tracked_event_flattens_payload() {
        let tracked = TrackedEvent::new(AnalyticsEvent::TabSelected {
            title: "Friends".to_string(),
        });
        let value = serde_json::to_value(&tracked).unwrap();

        assert_eq!(value["type"], "tab_selected");
        assert_eq!(value["title"], "Friends");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn channel_analytics_never_blocks_when_full() {
        let (tx, _rx) = tokio::sync::mpsc::channel(1);
        let analytics = ChannelAnalytics::new(tx);

        // Second send hits a full buffer; must return, not block or panic
        analytics.track(AnalyticsEvent::AppLaunched);
        analytics.track(AnalyticsEvent::AppLaunched);
    }

    #[test]
    fn recording_sink_preserves_order() {
        let sink = Arc::new(RecordingAnalytics::default());
        sink.track(AnalyticsEvent::AppLaunched);
        sink.track(AnalyticsEvent::TabSelected {
            title: "Feed".to_string(),
        });

        assert_eq!(
            sink.events(),
            vec![
                AnalyticsEvent::AppLaunched,
                AnalyticsEvent::TabSelected {
                    title: "Feed".to_string()
                },
            ]
        );
    }
}
