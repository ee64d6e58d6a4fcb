//! In-memory tenant and user directory.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use frontdesk_core::result::AppResult;
use frontdesk_core::types::{TenantId, UserId};
use frontdesk_entity::tenant::Tenant;
use frontdesk_entity::user::{User, UserRole};

use crate::store::Directory;

/// Directory kept in process memory and populated by the embedding code.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    tenants: Arc<RwLock<HashMap<TenantId, Tenant>>>,
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a tenant.
    pub async fn insert_tenant(&self, tenant: Tenant) {
        self.tenants.write().await.insert(tenant.id, tenant);
    }

    /// Add or replace a user.
    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn find_tenant(&self, id: TenantId) -> AppResult<Option<Tenant>> {
        Ok(self.tenants.read().await.get(&id).cloned())
    }

    async fn find_users(&self, tenant_id: TenantId, ids: &[UserId]) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| users.get(id))
            .filter(|user| user.belongs_to(tenant_id))
            .cloned()
            .collect())
    }

    async fn find_users_by_roles(
        &self,
        tenant_id: TenantId,
        roles: &[UserRole],
    ) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        let mut matching: Vec<User> = users
            .values()
            .filter(|user| user.belongs_to(tenant_id) && roles.contains(&user.role))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(matching)
    }
}
