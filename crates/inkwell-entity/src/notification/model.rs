//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::verb::{NotificationTarget, NotificationTargetKind, NotificationVerb};

/// A notification delivered to a user about comment activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The user being notified.
    pub recipient_id: Uuid,
    /// The user whose action triggered the notification.
    pub actor_id: Uuid,
    /// What the actor did.
    pub verb: NotificationVerb,
    /// Discriminant of the target.
    pub target_kind: NotificationTargetKind,
    /// ID of the article or comment the notification points at.
    pub target_id: Uuid,
    /// Whether the recipient has seen it.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// The typed target.
    pub fn target(&self) -> NotificationTarget {
        NotificationTarget::from_parts(self.target_kind, self.target_id)
    }

    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

/// Data required to create a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// The user being notified.
    pub recipient_id: Uuid,
    /// The acting user.
    pub actor_id: Uuid,
    /// What the actor did.
    pub verb: NotificationVerb,
    /// What the notification points at.
    pub target: NotificationTarget,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl NewNotification {
    /// Materialize the unread row this insert will produce.
    pub fn into_notification(self, id: Uuid) -> Notification {
        let (target_kind, target_id) = self.target.into_parts();
        Notification {
            id,
            recipient_id: self.recipient_id,
            actor_id: self.actor_id,
            verb: self.verb,
            target_kind,
            target_id,
            is_read: false,
            created_at: self.created_at,
        }
    }
}
