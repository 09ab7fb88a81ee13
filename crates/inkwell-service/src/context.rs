//! Request context carrying the identity of the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use inkwell_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built by the API layer from the identity forwarded by the upstream
/// session layer and passed into service methods so that every operation
/// knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role.
    pub role: UserRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self {
            user_id,
            role,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user may moderate content.
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}
