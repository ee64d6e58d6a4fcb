//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use frontdesk_core::types::{TenantId, UserId};

use super::role::UserRole;

/// A member of staff inside one tenant. Users are both notification
/// recipients and the actors that trigger events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Display name, used when rendering messages such as mentions.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role inside the tenant.
    pub role: UserRole,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether the user is scoped to the given tenant.
    pub fn belongs_to(&self, tenant_id: TenantId) -> bool {
        self.tenant_id == tenant_id
    }
}
