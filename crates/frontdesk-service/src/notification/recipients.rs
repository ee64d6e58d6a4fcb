//! Recipient normalization.

use std::collections::HashSet;

use tracing::{debug, warn};

use frontdesk_core::result::AppResult;
use frontdesk_core::types::{TenantId, UserId};
use frontdesk_database::store::Directory;
use frontdesk_entity::user::User;

/// Recipients of one fan-out call, given either as loaded users or as ids.
#[derive(Debug, Clone, PartialEq)]
pub enum Recipients {
    /// Already-loaded user records.
    Users(Vec<User>),
    /// Identifiers still to be resolved.
    Ids(Vec<UserId>),
}

impl Recipients {
    /// Whether no recipient was given.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Users(users) => users.is_empty(),
            Self::Ids(ids) => ids.is_empty(),
        }
    }

    /// Resolve to live users of `tenant_id`, each at most once, in the
    /// order first given.
    ///
    /// Unknown ids and users of other tenants are dropped without error.
    pub async fn resolve(
        self,
        tenant_id: TenantId,
        directory: &dyn Directory,
    ) -> AppResult<Vec<User>> {
        let users = match self {
            Self::Users(users) => {
                let given = users.len();
                let scoped: Vec<User> = users
                    .into_iter()
                    .filter(|user| user.belongs_to(tenant_id))
                    .collect();
                if scoped.len() < given {
                    warn!(
                        tenant_id = %tenant_id,
                        dropped = given - scoped.len(),
                        "Dropped recipients outside the tenant"
                    );
                }
                scoped
            }
            Self::Ids(ids) => {
                if ids.is_empty() {
                    return Ok(Vec::new());
                }
                let users = directory.find_users(tenant_id, &ids).await?;
                let known: HashSet<UserId> = users.iter().map(|user| user.id).collect();
                let unresolved = ids.iter().filter(|id| !known.contains(id)).count();
                if unresolved > 0 {
                    debug!(
                        tenant_id = %tenant_id,
                        unresolved,
                        "Skipped unresolvable recipient ids"
                    );
                }
                users
            }
        };

        let mut seen = HashSet::with_capacity(users.len());
        Ok(users
            .into_iter()
            .filter(|user| seen.insert(user.id))
            .collect())
    }
}

impl From<Vec<User>> for Recipients {
    fn from(users: Vec<User>) -> Self {
        Self::Users(users)
    }
}

impl From<Vec<UserId>> for Recipients {
    fn from(ids: Vec<UserId>) -> Self {
        Self::Ids(ids)
    }
}

impl From<User> for Recipients {
    fn from(user: User) -> Self {
        Self::Users(vec![user])
    }
}

impl From<UserId> for Recipients {
    fn from(id: UserId) -> Self {
        Self::Ids(vec![id])
    }
}
