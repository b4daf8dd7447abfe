//! User-visible notifications ("toasts").
//!
//! State machines emit notifications on their terminal transitions. Delivery
//! is fire-and-forget: a notifier never fails and never feeds back into the
//! state that emitted it.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A single notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification ID
    pub id: String,
    /// When it was raised
    pub ts: DateTime<Utc>,
    pub level: NotificationLevel,
    /// Component that raised it (e.g. "brief-wizard")
    pub source: String,
    /// Human-readable message
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Notification {
    pub fn new(
        level: NotificationLevel,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            ts: Utc::now(),
            level,
            source: source.into(),
            message: message.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn info(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, source, message)
    }

    pub fn success(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, source, message)
    }

    pub fn error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, source, message)
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// Receives notifications from the state machines.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => {
                error!(source = %notification.source, "{}", notification.message)
            }
            _ => info!(source = %notification.source, "{}", notification.message),
        }
    }
}

/// Keeps every notification in memory.
///
/// Clones share the same buffer, so a test can hand one clone to the state
/// machine and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications received so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.read().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifications
            .read()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.notifications.read().len()
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications.read().last().cloned()
    }

    pub fn clear(&self) {
        self.notifications.write().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.write().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_shares_buffer() {
        let notifier = RecordingNotifier::new();
        let handle = notifier.clone();

        notifier.notify(Notification::success("test", "done"));
        notifier.notify(Notification::error("test", "broken"));

        assert_eq!(handle.count(), 2);
        assert_eq!(handle.messages(), vec!["done", "broken"]);
        assert_eq!(handle.last().unwrap().level, NotificationLevel::Error);

        handle.clear();
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_notification_serialization() {
        let notification = Notification::info("content-generator", "started")
            .with_metadata("stage", serde_json::json!("slides"));

        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["level"], "info");
        assert_eq!(json["source"], "content-generator");
        assert_eq!(json["metadata"]["stage"], "slides");
    }

    #[test]
    fn test_metadata_omitted_when_empty() {
        let json = serde_json::to_value(Notification::success("x", "y")).unwrap();
        assert!(json.get("metadata").is_none());
    }
}
