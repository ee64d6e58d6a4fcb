//! Agenda task model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use frontdesk_core::types::{TaskId, TenantId, UserId};

/// A unit of work in the agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Task title.
    pub title: String,
    /// Current assignee, if any.
    pub assigned_to: Option<UserId>,
    /// User who created the task.
    pub created_by: UserId,
    /// Due date.
    pub due_at: Option<DateTime<Utc>>,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Whether the task is past its due date at `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_at.is_some_and(|due| due < now)
    }
}
