//! PostgreSQL tenant and user directory.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use frontdesk_core::error::{AppError, ErrorKind};
use frontdesk_core::result::AppResult;
use frontdesk_core::types::{TenantId, UserId};
use frontdesk_entity::tenant::Tenant;
use frontdesk_entity::user::{User, UserRole};

use crate::store::Directory;

/// Directory backed by the `tenants` and `users` tables.
#[derive(Debug, Clone)]
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    /// Create a new directory over the pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Directory for PgDirectory {
    async fn find_tenant(&self, id: TenantId) -> AppResult<Option<Tenant>> {
        sqlx::query_as::<_, Tenant>(
            "SELECT id, name, timezone, created_at FROM tenants WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tenant", e))
    }

    async fn find_users(&self, tenant_id: TenantId, ids: &[UserId]) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = ids.iter().map(|id| id.into_uuid()).collect();

        sqlx::query_as::<_, User>(
            "SELECT id, tenant_id, name, email, role, created_at FROM users \
             WHERE tenant_id = $1 AND id = ANY($2)",
        )
        .bind(tenant_id)
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to resolve users", e))
    }

    async fn find_users_by_roles(
        &self,
        tenant_id: TenantId,
        roles: &[UserRole],
    ) -> AppResult<Vec<User>> {
        if roles.is_empty() {
            return Ok(Vec::new());
        }
        let roles: Vec<String> = roles.iter().map(|role| role.as_str().to_string()).collect();

        sqlx::query_as::<_, User>(
            "SELECT id, tenant_id, name, email, role, created_at FROM users \
             WHERE tenant_id = $1 AND role::text = ANY($2) ORDER BY created_at",
        )
        .bind(tenant_id)
        .bind(&roles)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find users by role", e)
        })
    }
}
