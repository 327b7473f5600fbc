//! Notification center
//!
//! Every failed action ends up here, so a front-end renders one
//! dismissible list instead of ad hoc alerts.
//!
//! ```text
//! FloorStore / view-models
//!       │ push()
//!       ▼
//! NotificationCenter
//!   ├── active: Vec<Notification>   (until dismissed)
//!   └── broadcast: Sender<Notification>  (fan-out to renderers)
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::ClientError;

/// Broadcast channel capacity
const BROADCAST_CAPACITY: usize = 64;

/// Notification level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    active: Arc<Mutex<Vec<Notification>>>,
    tx: broadcast::Sender<Notification>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            active: Arc::new(Mutex::new(Vec::new())),
            tx,
        }
    }

    fn active_list(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a notification and fan it out; returns its id
    pub fn push(&self, notification: Notification) -> Uuid {
        let id = notification.id;
        self.active_list().push(notification.clone());
        // No subscribers is fine
        let _ = self.tx.send(notification);
        id
    }

    pub fn info(&self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.push(Notification::new(NotificationLevel::Info, title, message))
    }

    pub fn error(&self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.push(Notification::new(NotificationLevel::Error, title, message))
    }

    /// Error notification for a failed action
    pub fn from_error(&self, action: &str, error: &ClientError) -> Uuid {
        let level = match error {
            ClientError::Validation(_) | ClientError::InvalidState(_) => {
                NotificationLevel::Warning
            }
            _ => NotificationLevel::Error,
        };
        self.push(Notification::new(level, action, error.to_string()))
    }

    /// Currently shown notifications, oldest first
    pub fn active(&self) -> Vec<Notification> {
        self.active_list().clone()
    }

    /// Dismiss one notification; false if it was already gone
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut active = self.active_list();
        let before = active.len();
        active.retain(|n| n.id != id);
        active.len() != before
    }

    pub fn clear(&self) {
        self.active_list().clear();
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}
