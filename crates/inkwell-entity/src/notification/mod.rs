//! Notification domain entities.

pub mod model;
pub mod verb;

pub use model::{NewNotification, Notification};
pub use verb::{NotificationTarget, NotificationTargetKind, NotificationVerb};
