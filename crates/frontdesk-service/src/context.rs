//! Request context carrying the acting tenant and user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use frontdesk_core::types::{TenantId, UserId};
use frontdesk_entity::user::{User, UserRole};

/// Scope of the current caller.
///
/// Every read and read-state transition is confined to
/// `(tenant_id, user_id)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The tenant the caller acts in.
    pub tenant_id: TenantId,
    /// The calling user.
    pub user_id: UserId,
    /// The caller's role in the tenant.
    pub role: UserRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(tenant_id: TenantId, user_id: UserId, role: UserRole) -> Self {
        Self {
            tenant_id,
            user_id,
            role,
            request_time: Utc::now(),
        }
    }

    /// Creates a context acting as the given user.
    pub fn for_user(user: &User) -> Self {
        Self::new(user.tenant_id, user.id, user.role)
    }

    /// Returns whether the caller is at least a manager.
    pub fn is_manager_or_above(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::Manager)
    }
}
