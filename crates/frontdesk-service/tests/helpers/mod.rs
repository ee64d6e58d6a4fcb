//! Shared test helpers for service integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};

use frontdesk_core::config::NotificationsConfig;
use frontdesk_core::types::{
    ChatMessageId, MeetingId, TaskId, TenantId, UserId, VideoRoomId,
};
use frontdesk_database::memory::{MemoryDirectory, MemoryNotificationStore};
use frontdesk_entity::source::{ChatMessage, Meeting, Task, VideoRoom, VideoRoomStatus};
use frontdesk_entity::tenant::Tenant;
use frontdesk_entity::user::{User, UserRole};
use frontdesk_service::{EventRegistry, NotificationService, RequestContext};
use uuid::Uuid;

/// Service wired to in-memory storage with one seeded tenant.
pub struct TestApp {
    /// Notification store, shared with the service.
    pub store: MemoryNotificationStore,
    /// Tenant and user directory, shared with the service.
    pub directory: MemoryDirectory,
    /// The service under test.
    pub service: Arc<NotificationService>,
    /// Registry with every default handler.
    pub registry: EventRegistry,
    /// The default tenant.
    pub tenant: Tenant,
}

impl TestApp {
    /// Create a new test application with the default configuration.
    pub async fn new() -> Self {
        Self::with_config(NotificationsConfig::default()).await
    }

    /// Create a new test application with the given configuration.
    pub async fn with_config(config: NotificationsConfig) -> Self {
        let store = MemoryNotificationStore::new(config.dedup_window());
        let directory = MemoryDirectory::new();

        let service = Arc::new(NotificationService::new(
            Arc::new(store.clone()),
            Arc::new(directory.clone()),
            &config,
        ));
        let registry =
            EventRegistry::with_default_handlers(Arc::clone(&service), Arc::new(directory.clone()));

        let tenant = Tenant {
            id: TenantId::new(),
            name: "Hotel Atlantico".to_string(),
            timezone: "Europe/Lisbon".to_string(),
            created_at: Utc::now(),
        };
        directory.insert_tenant(tenant.clone()).await;

        Self {
            store,
            directory,
            service,
            registry,
            tenant,
        }
    }

    /// Seed another tenant.
    pub async fn create_tenant(&self, name: &str) -> Tenant {
        let tenant = Tenant {
            id: TenantId::new(),
            name: name.to_string(),
            timezone: "UTC".to_string(),
            created_at: Utc::now(),
        };
        self.directory.insert_tenant(tenant.clone()).await;
        tenant
    }

    /// Seed a user in the default tenant.
    pub async fn create_user(&self, name: &str, role: UserRole) -> User {
        self.create_user_in(self.tenant.id, name, role).await
    }

    /// Seed a user in the given tenant.
    pub async fn create_user_in(&self, tenant_id: TenantId, name: &str, role: UserRole) -> User {
        let user = User {
            id: UserId::new(),
            tenant_id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role,
            created_at: Utc::now(),
        };
        self.directory.insert_user(user.clone()).await;
        user
    }

    /// A task in the default tenant.
    pub fn task(&self, assigned_to: Option<UserId>, created_by: UserId) -> Task {
        Task {
            id: TaskId::new(),
            tenant_id: self.tenant.id,
            title: "Restock minibar in 312".to_string(),
            assigned_to,
            created_by,
            due_at: Some(Utc::now() - Duration::hours(1)),
            created_at: Utc::now() - Duration::days(1),
        }
    }

    /// A meeting in the default tenant.
    pub fn meeting(&self, created_by: UserId, participant_ids: Vec<UserId>) -> Meeting {
        Meeting {
            id: MeetingId::new(),
            tenant_id: self.tenant.id,
            title: "Morning briefing".to_string(),
            starts_at: Utc::now() + Duration::minutes(10),
            created_by,
            participant_ids,
        }
    }

    /// A chat message in the default tenant.
    pub fn chat_message(&self, sender_id: UserId, mentioned_user_ids: Vec<UserId>) -> ChatMessage {
        ChatMessage {
            id: ChatMessageId::new(),
            tenant_id: self.tenant.id,
            room_id: Uuid::new_v4(),
            sender_id,
            body: "Can someone check the lobby?".to_string(),
            mentioned_user_ids,
            created_at: Utc::now(),
        }
    }

    /// A live video room in the default tenant.
    pub fn video_room(&self, started_by: UserId) -> VideoRoom {
        VideoRoom {
            id: VideoRoomId::new(),
            tenant_id: self.tenant.id,
            name: "Shift handover".to_string(),
            started_by,
            status: VideoRoomStatus::Active,
        }
    }

    /// Request context acting as `user`.
    pub fn ctx(&self, user: &User) -> RequestContext {
        RequestContext::for_user(user)
    }
}
